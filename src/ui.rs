/// User interface and status output utilities
///
/// This module handles:
/// - Thread-safe status output
/// - Colored terminal text
/// - Asking before existing files are overwritten
///
/// Everything here writes to stderr: stdout may be carrying the report.
use crate::report::ConfirmOverwrite;
use lazy_static::lazy_static;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
/// Prevents interleaved output from multiple threads
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stderr() else {
            return false;
        };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print a status message with "gammon-report: " prefix (thread-safe)
pub fn status(s: &str) {
    status_lock(|| {
        eprintln!("gammon-report: {}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        eprintln!();
        print_color("error", term::color::BRIGHT_RED);
        eprintln!(": {}", msg);
        eprintln!();
    });
}

/// Asks on the terminal before replacing a file
pub struct PromptConfirm;

impl ConfirmOverwrite for PromptConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        let mut answer = String::new();
        status_lock(|| {
            print_color("warning", term::color::BRIGHT_YELLOW);
            eprint!(": {} exists. Overwrite? [y/N] ", path.display());
            let _ = io::stderr().flush();
            if io::stdin().lock().read_line(&mut answer).is_err() {
                answer.clear();
            }
        });
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
