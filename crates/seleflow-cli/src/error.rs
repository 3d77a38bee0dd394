use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("valid url") || msg.contains("enter a url") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Use an absolute URL including the scheme, for example:");
        eprintln!("  {} https://example.com", "url =".dimmed());
    }

    if msg.contains("flow definition") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  A flow definition needs a `url` and a `steps` list of `kind` + `params`.");
        eprintln!("  List the available actions and their parameters with:");
        eprintln!("  {} seleflow actions", "$".dimmed());
    }

    std::process::exit(1);
}
