//! Event rendering for the terminal: text lines by severity, or JSON lines.

use spotbatch_core::events::{Event, Severity};

fn tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "    ",
        Severity::Success => " ok ",
        Severity::Warning => "warn",
        Severity::Error => "fail",
    }
}

/// One output line for `event`.
pub fn format_event(event: &Event, json: bool) -> String {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("could not serialize event: {}", e);
                String::new()
            }
        }
    } else {
        format!("[{}] {}", tag(event.severity()), event)
    }
}

pub fn print_event(event: &Event, json: bool) {
    let line = format_event(event, json);
    if line.is_empty() {
        return;
    }
    match event.severity() {
        Severity::Warning | Severity::Error if !json => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}
