/// User interface and status output utilities
///
/// This module handles:
/// - The interactive serial number prompt
/// - Colored terminal text
/// - Status message formatting
use std::io::{self, BufRead, Write};

/// Print the "warranty: " prefix for status messages
fn print_status_header() {
    print!("warranty: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stdout() else {
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

/// Print a status message with "warranty: " prefix
pub fn status(s: &str) {
    print_status_header();
    println!("{}", s);
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!();
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!();
}

/// Show `message` and read one line from `input`, without its line ending
pub fn prompt_line<R: BufRead>(message: &str, input: &mut R) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt on stdin
pub fn prompt(message: &str) -> io::Result<String> {
    prompt_line(message, &mut io::stdin().lock())
}
