//! `unshort canonicalize <url>...` – print truncated URLs without network access.

use anyhow::Result;
use std::io::{self, Write};
use unshort_core::canonical::canonicalize;

pub fn run_canonicalize(urls: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for url in urls {
        writeln!(out, "{}", canonicalize(url))?;
    }
    Ok(())
}
