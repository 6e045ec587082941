//! Output formatters: CSV file, line-delimited text file, or console.
//!
//! The text format lists only expanded records; CSV and console also render
//! failures, with a marker.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::record::ResultRecord;

/// Marker rendered in place of an expanded URL when resolution failed.
pub const FAILURE_MARKER: &str = "Error expanding URL";

pub const CSV_FILE_NAME: &str = "urls.csv";
pub const TEXT_FILE_NAME: &str = "urls.txt";

const CSV_HEADER: [&str; 4] = ["Title", "Short URL", "Expanded URL", "Truncated URL"];

/// The three exclusive output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Text,
    Console,
}

impl OutputFormat {
    /// Maps the interactive menu choices `1`, `2`, `3`.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(OutputFormat::Csv),
            "2" => Some(OutputFormat::Text),
            "3" => Some(OutputFormat::Console),
            _ => None,
        }
    }

    /// File name for file-backed formats.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            OutputFormat::Csv => Some(CSV_FILE_NAME),
            OutputFormat::Text => Some(TEXT_FILE_NAME),
            OutputFormat::Console => None,
        }
    }

    /// Renders `records` in this format to `out`.
    pub fn write<W: Write>(self, records: &[ResultRecord], out: W) -> io::Result<()> {
        match self {
            OutputFormat::Csv => write_csv(records, out),
            OutputFormat::Text => write_text(records, out),
            OutputFormat::Console => write_console(records, out),
        }
    }
}

/// Quotes a field only when it contains a delimiter, quote, CR or LF.
fn csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\r', '\n'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_csv_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    write!(out, "{}\r\n", row.join(","))
}

/// Header row plus one row per record, failures included.
pub fn write_csv<W: Write>(records: &[ResultRecord], mut out: W) -> io::Result<()> {
    write_csv_row(&mut out, &CSV_HEADER)?;
    for r in records {
        match (&r.resolved_url, &r.canonical_url) {
            (Some(resolved), Some(canonical)) if r.is_expanded() => {
                write_csv_row(
                    &mut out,
                    &[r.title.as_str(), r.short_url.as_str(), resolved.as_str(), canonical.as_str()],
                )?;
            }
            _ => write_csv_row(
                &mut out,
                &[r.title.as_str(), r.short_url.as_str(), FAILURE_MARKER, ""],
            )?,
        }
    }
    out.flush()
}

/// `<title>: <canonical_url>` per expanded record; failures are omitted.
pub fn write_text<W: Write>(records: &[ResultRecord], mut out: W) -> io::Result<()> {
    for r in records.iter().filter(|r| r.is_expanded()) {
        if let Some(canonical) = &r.canonical_url {
            writeln!(out, "{}: {}", r.title, canonical)?;
        }
    }
    out.flush()
}

/// One line per record; failures as `<short_url>: Error expanding URL`.
pub fn write_console<W: Write>(records: &[ResultRecord], mut out: W) -> io::Result<()> {
    for r in records {
        match &r.canonical_url {
            Some(canonical) if r.is_expanded() => writeln!(out, "{}: {}", r.title, canonical)?,
            _ => writeln!(out, "{}: {}", r.short_url, FAILURE_MARKER)?,
        }
    }
    out.flush()
}

/// Writes a file-backed format into `dir` (created if missing) and returns
/// the path written. Fails for [`OutputFormat::Console`].
pub fn render_to_dir(format: OutputFormat, records: &[ResultRecord], dir: &Path) -> Result<PathBuf> {
    let name = format
        .file_name()
        .with_context(|| format!("{:?} output has no file target", format))?;
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(name);
    let file = fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
    format
        .write(records, BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "output written");
    Ok(path)
}
