use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn overview_text(registry: &CommandRegistry) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for entry in registry.list() {
        lines.push(format!("  {:<14} {}", entry.name, entry.description));
    }
    lines.push("Use `help <command>` for details.".to_string());
    lines.join("\n")
}

pub fn command_text(entry: &CommandEntry) -> String {
    let mut out = format!("{}: {}\n  Usage: {}", entry.name, entry.description, entry.usage);
    if !entry.params.is_empty() {
        let params: Vec<String> = entry.params.iter().map(|name| format!("/{name}")).collect();
        out.push_str(&format!("\n  Parameters: {}", params.join(" ")));
    }
    out
}
