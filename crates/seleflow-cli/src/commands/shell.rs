//! Line-oriented flow editor.
//!
//! Each input line is split with shell quoting rules and turned into an
//! [`EditorCommand`]. `set` is the exception: its value is the raw rest of
//! the line, so selectors such as `#submit` survive unquoted. Step positions shown by `list` are 1-based; step ids
//! are the ids assigned by the flow.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use seleflow_core::{
    EditorCommand, EditorEvent, EditorState, SCRIPT_FILE_NAME, StepParams, export_script,
    get_action, list_actions, reduce,
};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::cli::{ShellArgs, parse_param};
use crate::config::CliConfig;

const HELP: &str = "\
Commands:
  start <url>                     Start a new flow at <url>
  actions                         List available actions
  select <action>                 Choose an action for the form
  set <name> <value>              Fill a form field
  draft                           Show the current form
  add                             Add the form as a step (or save the step being edited)
  cancel                          Clear the form
  append <action> [name=value]..  Add a step directly
  edit <id>                       Load a step into the form
  update <id> <action> [name=value]..
                                  Replace a step's action and parameters
  delete <id>                     Remove a step
  move <from> <to>                Move the step at position <from> to position <to>
  expand <id>                     Show or hide a step's code in `list`
  list                            Show the steps
  code                            Show the generated script
  export [path]                   Write the script (default: selenium_script.py)
  help                            Show this help
  quit                            Leave the shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub fn run(args: ShellArgs, config: &CliConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();

    let mut session = ShellSession::new(config.output_dir());
    if let Some(url) = args.url {
        session.start_with(&url, &mut stdout)?;
    }

    session.run(stdin.lock(), &mut stdout, interactive)
}

pub struct ShellSession {
    state: EditorState,
    output_dir: PathBuf,
}

impl ShellSession {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            state: EditorState::new(),
            output_dir,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Starts a flow before reading input. A rejected URL is reported and the
    /// shell still opens without a flow.
    pub fn start_with<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let line = shell_words::join(["start", url]);
        if let Err(err) = self.execute(&line, out) {
            tracing::debug!(url = %url, error = %err, "Initial URL rejected");
            writeln!(out, "{} {:#}", "error:".red().bold(), err)?;
        }
        Ok(())
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<()> {
        if prompt {
            writeln!(out, "SeleFlow shell. Type `help` for commands.")?;
        }

        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "seleflow> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.execute(&line, out) {
                Ok(Control::Quit) => break,
                Ok(Control::Continue) => {}
                Err(err) => {
                    tracing::debug!(line = %line, error = %err, "Shell command failed");
                    writeln!(out, "{} {:#}", "error:".red().bold(), err)?;
                }
            }
        }

        Ok(())
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Control> {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("set")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            self.set_param(rest.trim())?;
            return Ok(Control::Continue);
        }

        let words = shell_words::split(line).context("Failed to parse command line")?;
        let Some((command, args)) = words.split_first() else {
            return Ok(Control::Continue);
        };

        match command.as_str() {
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Control::Quit),
            "start" => {
                let [url] = args else {
                    bail!("usage: start <url>");
                };
                let event = reduce(&mut self.state, EditorCommand::StartFlow { url: url.clone() });
                match event {
                    EditorEvent::UrlRejected { message } => bail!(message),
                    _ => writeln!(out, "Started flow at {url}")?,
                }
            }
            "actions" => {
                for action in list_actions() {
                    let names: Vec<&str> = action.param_names().collect();
                    writeln!(out, "{}  ({})", action.kind, names.join(", "))?;
                }
            }
            "select" => {
                self.require_flow()?;
                let kind = args.join(" ");
                if get_action(&kind).is_none() {
                    bail!("Unknown action '{kind}'; type `actions` to list them");
                }
                reduce(&mut self.state, EditorCommand::SelectAction { kind });
                self.write_draft(out)?;
            }
            "draft" => {
                self.require_flow()?;
                self.write_draft(out)?;
            }
            "add" | "submit" => {
                self.require_flow()?;
                let event = reduce(&mut self.state, EditorCommand::SubmitDraft);
                if event == EditorEvent::Ignored {
                    bail!("Nothing to add; select an action first");
                }
                write_event(out, &event)?;
            }
            "cancel" => {
                self.require_flow()?;
                reduce(&mut self.state, EditorCommand::CancelDraft);
                writeln!(out, "Form cleared")?;
            }
            "append" => {
                self.require_flow()?;
                let Some((kind, pairs)) = args.split_first() else {
                    bail!("usage: append <action> [name=value]...");
                };
                let params = parse_params(pairs)?;
                let event = reduce(
                    &mut self.state,
                    EditorCommand::AppendStep {
                        kind: kind.clone(),
                        params,
                    },
                );
                write_event(out, &event)?;
            }
            "edit" => {
                self.require_flow()?;
                let [id] = args else {
                    bail!("usage: edit <id>");
                };
                let event = reduce(&mut self.state, EditorCommand::BeginEdit { id: id.clone() });
                if event == EditorEvent::Ignored {
                    bail!("No step with id {id}");
                }
                self.write_draft(out)?;
            }
            "update" => {
                self.require_flow()?;
                let [id, kind, pairs @ ..] = args else {
                    bail!("usage: update <id> <action> [name=value]...");
                };
                let params = parse_params(pairs)?;
                let event = reduce(
                    &mut self.state,
                    EditorCommand::UpdateStep {
                        id: id.clone(),
                        kind: kind.clone(),
                        params,
                    },
                );
                if event == EditorEvent::Ignored {
                    bail!("No step with id {id}");
                }
                write_event(out, &event)?;
            }
            "delete" | "rm" => {
                self.require_flow()?;
                let [id] = args else {
                    bail!("usage: delete <id>");
                };
                let event = reduce(&mut self.state, EditorCommand::DeleteStep { id: id.clone() });
                if event == EditorEvent::Ignored {
                    bail!("No step with id {id}");
                }
                write_event(out, &event)?;
            }
            "move" | "mv" => {
                self.require_flow()?;
                let [from, to] = args else {
                    bail!("usage: move <from> <to>");
                };
                let from = parse_position(from)?;
                let to = parse_position(to)?;
                let event = reduce(&mut self.state, EditorCommand::MoveStep { from, to });
                if event == EditorEvent::Ignored {
                    bail!("Positions must be between 1 and the number of steps");
                }
                write_event(out, &event)?;
            }
            "expand" => {
                self.require_flow()?;
                let [id] = args else {
                    bail!("usage: expand <id>");
                };
                let event = reduce(&mut self.state, EditorCommand::ToggleExpand { id: id.clone() });
                if event == EditorEvent::Ignored {
                    bail!("No step with id {id}");
                }
                write_event(out, &event)?;
            }
            "list" | "ls" => {
                self.require_flow()?;
                self.write_steps(out)?;
            }
            "code" | "script" => {
                self.require_flow()?;
                if let Some(flow) = &self.state.flow {
                    write!(out, "{}", flow.script())?;
                }
            }
            "export" => {
                self.require_flow()?;
                let target = match args {
                    [] => self.output_dir.join(SCRIPT_FILE_NAME),
                    [path] => PathBuf::from(path),
                    _ => bail!("usage: export [path]"),
                };
                if let Some(flow) = &self.state.flow {
                    let path = export_script(flow.steps().list(), &target)
                        .with_context(|| format!("Failed to write {}", target.display()))?;
                    writeln!(out, "{} {}", "Wrote".green().bold(), path.display())?;
                }
            }
            other => bail!("Unknown command '{other}'; type `help` for a list"),
        }

        Ok(Control::Continue)
    }

    fn set_param(&mut self, args: &str) -> Result<()> {
        self.require_flow()?;
        let (name, value) = args
            .split_once(char::is_whitespace)
            .map(|(name, value)| (name, unquote(value.trim())))
            .unwrap_or((args, ""));
        if name.is_empty() || value.is_empty() {
            bail!("usage: set <name> <value>");
        }

        let event = reduce(
            &mut self.state,
            EditorCommand::SetParam {
                name: name.to_string(),
                value: value.to_string(),
            },
        );
        if event == EditorEvent::Ignored {
            bail!("Select an action first with `select <action>`");
        }
        Ok(())
    }

    fn require_flow(&self) -> Result<()> {
        if self.state.flow.is_none() {
            bail!("No flow yet; start one with `start <url>`");
        }
        Ok(())
    }

    fn write_draft<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = &self.state.view;
        let Some(kind) = view.selected_action.as_deref() else {
            writeln!(out, "No action selected")?;
            return Ok(());
        };

        match view.editing.as_deref() {
            Some(id) => writeln!(out, "Editing step {id}: {}", kind.bold())?,
            None => writeln!(out, "Action: {}", kind.bold())?,
        }

        if let Some(action) = get_action(kind) {
            for param in action.params {
                match view.draft_params.get(param.name) {
                    Some(value) => writeln!(out, "  {} ({}) = {}", param.name, param.label, value)?,
                    None => writeln!(
                        out,
                        "  {} ({}) {}",
                        param.name,
                        param.label,
                        format!("e.g. {}", param.placeholder).dimmed()
                    )?,
                }
            }
        }
        Ok(())
    }

    fn write_steps<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(flow) = &self.state.flow else {
            return Ok(());
        };

        writeln!(out, "Flow for {}", flow.target_url())?;
        if flow.steps().is_empty() {
            writeln!(out, "No steps added yet.")?;
            return Ok(());
        }

        for (index, step) in flow.steps().list().iter().enumerate() {
            writeln!(
                out,
                "{:>3}. [id {}] {}  {}",
                index + 1,
                step.id,
                step.kind.bold(),
                step.summary()
            )?;
            if self.state.view.expanded.contains(&step.id) {
                for line in step.code.lines() {
                    writeln!(out, "       {line}")?;
                }
            }
        }
        Ok(())
    }
}

fn write_event<W: Write>(out: &mut W, event: &EditorEvent) -> Result<()> {
    match event {
        EditorEvent::StepAdded { id } => writeln!(out, "Added step {id}")?,
        EditorEvent::StepUpdated { id } => writeln!(out, "Updated step {id}")?,
        EditorEvent::StepDeleted { id } => writeln!(out, "Deleted step {id}")?,
        EditorEvent::StepMoved { from, to } => {
            writeln!(out, "Moved step from position {} to {}", from + 1, to + 1)?
        }
        EditorEvent::ExpandToggled { id, expanded } => {
            let state = if *expanded { "expanded" } else { "collapsed" };
            writeln!(out, "Step {id} {state}")?
        }
        EditorEvent::FlowStarted { .. }
        | EditorEvent::UrlRejected { .. }
        | EditorEvent::DraftChanged
        | EditorEvent::Ignored => {}
    }
    Ok(())
}

fn parse_params(pairs: &[String]) -> Result<StepParams> {
    pairs
        .iter()
        .map(|pair| parse_param(pair).map_err(anyhow::Error::msg))
        .collect()
}

/// Strips one pair of matching outer quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// 1-based position to list index.
fn parse_position(input: &str) -> Result<usize> {
    let position: usize = input
        .parse()
        .with_context(|| format!("Invalid position '{input}'"))?;
    position
        .checked_sub(1)
        .with_context(|| format!("Invalid position '{input}'; positions start at 1"))
}
