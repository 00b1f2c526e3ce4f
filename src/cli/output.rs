use colored::Colorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Plain output drops colours and decorations, e.g. when piping into another program.
pub fn set_plain(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
    if plain {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

pub fn is_plain() -> bool {
    PLAIN.load(Ordering::Relaxed)
}

pub fn style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    if is_plain() {
        return match kind {
            MessageKind::Warning => format!("Warning: {text}"),
            MessageKind::Error => format!("Error: {text}"),
            MessageKind::Section => format!("== {} ==", text.trim()),
            MessageKind::Info | MessageKind::Success => text,
        };
    }
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    println!("{}", style(kind, message));
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
