//! Interactive prompts on stdin/stdout.

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{BufRead, Write};
use unshort_core::output::OutputFormat;

pub const PASTE_PROMPT: &str = "Please paste your URLs and type 'END' on a new line when done:";

const MENU: &str = "Please choose an output format:\n1) CSV\n2) TXT\n3) Terminal";
const INVALID_CHOICE: &str = "Invalid input. Please enter 1, 2 or 3.";

/// Terminal version of [`choose_format`]: dialoguer handles line editing and
/// re-prompting.
pub fn choose_format_interactive() -> Result<OutputFormat> {
    println!("{}", MENU);
    let choice: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter a number")
        .validate_with(validate_choice)
        .interact_text()?;
    OutputFormat::from_menu_choice(&choice).context("format choice")
}

// dialoguer validates `Input<String>` through `&String`.
#[allow(clippy::ptr_arg)]
fn validate_choice(input: &String) -> Result<(), &'static str> {
    match OutputFormat::from_menu_choice(input) {
        Some(_) => Ok(()),
        None => Err(INVALID_CHOICE),
    }
}

/// Shows the format menu and re-prompts until a valid choice is entered.
/// Fails only if input ends before a choice is made.
pub fn choose_format<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<OutputFormat> {
    writeln!(out, "{}", MENU)?;
    loop {
        write!(out, "Enter a number: ")?;
        out.flush()?;

        let mut line = String::new();
        let n = input.read_line(&mut line).context("read format choice")?;
        if n == 0 {
            anyhow::bail!("input closed before an output format was chosen");
        }
        match OutputFormat::from_menu_choice(&line) {
            Some(format) => return Ok(format),
            None => writeln!(out, "{}", INVALID_CHOICE)?,
        }
    }
}
