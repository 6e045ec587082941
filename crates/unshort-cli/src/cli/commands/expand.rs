//! `unshort expand` – read URLs, expand them, write the chosen output.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use unshort_core::config::UnshortConfig;
use unshort_core::input::{extract_urls, read_until_end};
use unshort_core::output::{self, OutputFormat};
use unshort_core::pipeline::{Diagnostic, Pipeline};
use unshort_core::progress::Spinner;
use unshort_core::record::ResultRecord;
use unshort_core::resolver::HttpStatusResolver;
use unshort_core::suggest::{Credentials, OpenAiSuggester};
use unshort_core::title::HttpTitleFetcher;

use crate::cli::prompt::{self, PASTE_PROMPT};
use crate::cli::ExpandArgs;

pub fn run_expand(cfg: &UnshortConfig, args: &ExpandArgs) -> Result<()> {
    let text = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        None => {
            println!("{}", PASTE_PROMPT);
            read_until_end(io::stdin().lock()).context("read pasted URLs")?
        }
    };
    let urls = extract_urls(&text);
    tracing::info!(count = urls.len(), "extracted urls");

    let format = match args.format {
        Some(f) => f.into(),
        None if io::stdin().is_terminal() => prompt::choose_format_interactive()?,
        None => prompt::choose_format(io::stdin().lock(), io::stdout())?,
    };

    let records = expand(cfg, &urls, !args.no_suggest, !args.no_progress);

    let output_dir = args.output_dir.as_deref().unwrap_or(&cfg.output_dir);
    emit(format, &records, output_dir)?;

    println!("Done.");
    Ok(())
}

/// Wires the collaborators from config and runs the pipeline.
fn expand(cfg: &UnshortConfig, urls: &[String], suggest: bool, progress: bool) -> Vec<ResultRecord> {
    let http = cfg.http_options();
    let resolver = HttpStatusResolver::new(cfg.resolver_endpoint.clone(), http.clone());
    let titles = HttpTitleFetcher::new(http.clone());

    let suggest_cfg = cfg.suggest();
    let suggester = if suggest && suggest_cfg.enabled {
        let creds = Credentials::from_env();
        if creds.is_none() {
            tracing::info!("OPENAI_API_KEY not set; suggestions disabled");
        }
        creds.map(|c| OpenAiSuggester::new(suggest_cfg, c, http.clone()))
    } else {
        None
    };

    let mut pipeline = Pipeline::new(&resolver, &titles);
    if let Some(s) = suggester.as_ref() {
        pipeline = pipeline.with_suggester(s);
    }

    let spinner = progress.then(|| Spinner::start("Expanding URLs"));
    let records = pipeline.process_with(urls, |d| {
        let print = || {
            let _ = writeln!(io::stderr(), "{}", format_diagnostic(&d));
        };
        match &spinner {
            Some(spinner) => spinner.suspend(print),
            None => print(),
        }
    });
    if let Some(spinner) = spinner {
        spinner.stop();
    }
    records
}

fn emit(format: OutputFormat, records: &[ResultRecord], output_dir: &Path) -> Result<()> {
    match format {
        OutputFormat::Console => {
            let stdout = io::stdout();
            output::write_console(records, stdout.lock())?;
        }
        OutputFormat::Csv | OutputFormat::Text => {
            let path = output::render_to_dir(format, records, output_dir)?;
            let label = if format == OutputFormat::Csv { "CSV" } else { "Text" };
            println!("{} output saved to {}", label, path.display());
        }
    }
    Ok(())
}

/// Operator-facing text for a diagnostic.
pub(crate) fn format_diagnostic(d: &Diagnostic) -> String {
    match d {
        Diagnostic::ResolutionFailed {
            message, detail, ..
        } => match detail {
            Some(body) => format!("{}\nJSON response: {}", message, body),
            None => message.clone(),
        },
        Diagnostic::Suggestion { text, .. } => format!("Suggestions:\n{}", text),
        Diagnostic::SuggestionUnavailable { reason, .. } => {
            format!("Warning: no suggestions available ({})", reason)
        }
        Diagnostic::TitleDegraded { url, reason } => {
            format!("Warning: {} for URL {}.", capitalize(reason), url)
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
