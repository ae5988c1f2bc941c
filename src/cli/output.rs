use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Set the global verbosity from the `--verbose` / `--quiet` flags.
pub fn configure(verbose: bool, quiet: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !quiet() {
        println!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print a warning on stderr, even in quiet mode.
pub fn notice(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if !quiet() {
        println!("\n{}", msg.bold());
    }
}

/// Print a detail line, only with `--verbose`.
pub fn verbose(msg: &str) {
    if VERBOSE.load(Ordering::Relaxed) {
        eprintln!("  {} {}", "·".dimmed(), msg.dimmed());
    }
}
