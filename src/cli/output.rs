//! Terminal output helpers shared by every command.
//!
//! Status lines go to stdout. Warnings, errors and tips go to stderr so
//! that `dotp get` stays pipeable.

use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

fn status(symbol: StyledObject<&str>, msg: &str) -> String {
    format!("{symbol} {msg}")
}

/// `✓ msg` in green.
pub fn success(msg: &str) {
    println!("{}", status(style("\u{2713}").green().bold(), msg));
}

/// `✗ msg` in red, on stderr.
pub fn error(msg: &str) {
    eprintln!("{}", status(style("\u{2717}").for_stderr().red().bold(), msg));
}

/// `⚠ msg` in yellow, on stderr.
pub fn warning(msg: &str) {
    eprintln!("{}", status(style("\u{26a0}").for_stderr().yellow().bold(), msg));
}

pub fn info(msg: &str) {
    println!("{}", status(style("\u{2139}").blue().bold(), msg));
}

/// Dimmed hint on stderr, e.g. the next command to run.
pub fn tip(msg: &str) {
    eprintln!(
        "{} {}",
        style("\u{2192}").for_stderr().dim(),
        style(msg).for_stderr().dim()
    );
}

/// Print a single code. `bare` prints just the digits for scripts.
pub fn print_code(code: &str, bare: bool) {
    if bare {
        println!("{code}");
    } else {
        println!("{}", style(code).green().bold());
    }
}

/// One row of the codes table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    /// Decoded label.
    pub label: String,
    /// Current code, or a short reason it could not be generated.
    pub code: String,
}

/// Print a titled two-column table of labels and codes.
pub fn print_codes_table(title: &str, rows: &[CodeRow]) {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Label", "Code"]);

    for row in rows {
        table.add_row(vec![
            style(&row.label).cyan().to_string(),
            style(&row.code).green().bold().to_string(),
        ]);
    }

    println!("{}", style(title).bold());
    println!("{table}");
}
