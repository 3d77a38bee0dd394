use anyhow::Result;
use comfy_table::{Cell, Table};
use seleflow_core::list_actions;

use crate::cli::OutputFormat;
use crate::output::json::print_json;
use crate::output::table::print_table;

pub fn run(format: OutputFormat) -> Result<()> {
    let actions = list_actions();

    if format.is_json() {
        return print_json(actions);
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Action", "Parameter", "Label", "Placeholder"]);

    for (index, action) in actions.iter().enumerate() {
        for (position, param) in action.params.iter().enumerate() {
            let (number, kind) = if position == 0 {
                ((index + 1).to_string(), action.kind.as_str())
            } else {
                (String::new(), "")
            };
            table.add_row(vec![
                Cell::new(number),
                Cell::new(kind),
                Cell::new(param.name),
                Cell::new(param.label),
                Cell::new(param.placeholder),
            ]);
        }
    }

    print_table(table)
}
