use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(false);

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

pub fn set_color(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn color_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

pub fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = match kind {
        MessageKind::Info => message.to_string(),
        MessageKind::Success => format!("OK: {message}"),
        MessageKind::Warning => format!("WARNING: {message}"),
        MessageKind::Error => format!("ERROR: {message}"),
    };
    if !color_enabled() {
        return text;
    }
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => text.green().to_string(),
        MessageKind::Warning => text.yellow().to_string(),
        MessageKind::Error => text.red().bold().to_string(),
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Error, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_prefix_severity() {
        set_color(false);
        assert_eq!(styled(MessageKind::Warning, "careful"), "WARNING: careful");
        assert_eq!(styled(MessageKind::Error, "boom"), "ERROR: boom");
        assert_eq!(styled(MessageKind::Info, "hello"), "hello");
    }
}
