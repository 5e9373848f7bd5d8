//! User interaction prompts and colored output macros
//!
//! ERROR HANDLING STRATEGY FOR DECORATIVE I/O:
//! All termcolor operations use `let _ =` to deliberately ignore errors.
//! Colored output is decorative and non-essential. If stderr/stdout is unavailable
//! (broken pipe, no TTY, etc.), the program continues gracefully without colors.

use crate::error::Result;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Macro for printing warnings with yellow color
///
/// Note: All termcolor operations use `let _ =` to deliberately ignore errors.
/// Colored output is decorative and non-essential. If stderr is unavailable
/// (broken pipe, no TTY, etc.), the program continues gracefully.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use std::io::Write as _;
        use termcolor::WriteColor as _;
        let bufwtr = termcolor::BufferWriter::stderr(termcolor::ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let _ = buffer.set_color(termcolor::ColorSpec::new().set_fg(Some(termcolor::Color::Yellow)));
        let _ = write!(&mut buffer, "⚠️  ");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, $($arg)*);
        let _ = bufwtr.print(&buffer);
    }};
}

/// Macro for printing errors with red color
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use std::io::Write as _;
        use termcolor::WriteColor as _;
        let bufwtr = termcolor::BufferWriter::stderr(termcolor::ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let _ = buffer.set_color(termcolor::ColorSpec::new().set_fg(Some(termcolor::Color::Red)));
        let _ = write!(&mut buffer, "❌ ");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, $($arg)*);
        let _ = bufwtr.print(&buffer);
    }};
}

/// Macro for printing success messages with green color
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {{
        use std::io::Write as _;
        use termcolor::WriteColor as _;
        let bufwtr = termcolor::BufferWriter::stdout(termcolor::ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let _ = buffer.set_color(termcolor::ColorSpec::new().set_fg(Some(termcolor::Color::Green)));
        let _ = write!(&mut buffer, "✓ ");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, $($arg)*);
        let _ = bufwtr.print(&buffer);
    }};
}

/// Print the application banner.
pub fn print_header(text: &str) {
    let bufwtr = BufferWriter::stdout(ColorChoice::Auto);
    let mut buffer = bufwtr.buffer();
    let _ = writeln!(&mut buffer, "{}", "=".repeat(60));
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true));
    let _ = writeln!(&mut buffer, "🔧 {text}");
    let _ = buffer.reset();
    let _ = writeln!(&mut buffer, "Platform: {}", std::env::consts::OS);
    let _ = writeln!(&mut buffer, "{}", "=".repeat(60));
    let _ = bufwtr.print(&buffer);
}

/// Print a phase/section divider.
pub fn print_section(text: &str) {
    let bufwtr = BufferWriter::stdout(ColorChoice::Auto);
    let mut buffer = bufwtr.buffer();
    let _ = writeln!(&mut buffer, "\n{}", "━".repeat(60));
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true));
    let _ = writeln!(&mut buffer, "{text}");
    let _ = buffer.reset();
    let _ = bufwtr.print(&buffer);
}

/// Ask a single question, returning the trimmed answer.
///
/// - The default (when given) is shown in the prompt label and returned on
///   empty input.
/// - EOF (Ctrl+D on Unix, Ctrl+Z on Windows) is treated as accepting the
///   default, or the empty string when there is none.
pub fn ask(label: &str, default: Option<&str>) -> Result<String> {
    let hint = match default {
        Some(d) if !d.is_empty() => format!(" (default: {d})"),
        _ => String::new(),
    };
    print!("{label}{hint}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes_read = io::stdin().read_line(&mut input)?;

    if bytes_read == 0 {
        println!();
        return Ok(default.unwrap_or("").to_string());
    }

    let input = input.trim();
    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Pause until the operator presses Enter. EOF also continues.
pub fn press_enter(label: &str) -> Result<()> {
    print!("{label}... ");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes_read = io::stdin().read_line(&mut input)?;
    if bytes_read == 0 {
        println!();
    }
    Ok(())
}

/// Prompt user for yes/no answer, looping until valid input
///
/// Features:
/// - Accepts "y", "yes", "n", "no" (case insensitive)
/// - Re-prompts on invalid input with clear error message
/// - Handles EOF (Ctrl+D) gracefully, treating as "no"
pub fn prompt_yes_no(question: &str) -> Result<bool> {
    loop {
        print!("{question} (y/n): ");
        io::stdout().flush()?;

        let mut response = String::new();
        let bytes_read = io::stdin().read_line(&mut response)?;

        // Handle EOF (Ctrl+D)
        if bytes_read == 0 {
            println!("\nEOF detected, treating as 'no'");
            return Ok(false);
        }

        let response = response.trim().to_lowercase();

        match response.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            "" => {
                eprintln!("⚠️  Empty input. Please enter 'y' for yes or 'n' for no.");
                continue;
            }
            _ => {
                eprintln!("⚠️  Invalid input: '{response}'. Please enter 'y' or 'n'.");
                continue;
            }
        }
    }
}

/// Ask whether an existing, non-empty artifact should be regenerated.
///
/// Returns `true` for override. The default is keep, so a bare Enter (or EOF)
/// leaves the existing file authoritative.
pub fn prompt_override_keep(path: &Path) -> Result<bool> {
    crate::warn!("File exists with content: {}", path.display());
    let ans = ask("Override (o) or keep existing (k)? [o/k]", Some("k"))?;
    Ok(ans.eq_ignore_ascii_case("o") || ans.eq_ignore_ascii_case("override"))
}
