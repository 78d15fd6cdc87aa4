use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress status, success, warning and info lines. Requested output such
/// as tables, JSON and scope listings still prints.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a status message for an operation in progress
pub fn status_message(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {} ... ", "⏳".yellow(), message.bright_white());
    let _ = io::stdout().flush();
}

/// Print a success message
pub fn success_message(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {} ====", title).cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Print one entry of a numbered list
pub fn step_message(step_number: usize, message: &str) {
    println!("  {}. {}", format!("{}", step_number).cyan(), message);
}
