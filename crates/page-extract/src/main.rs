//! `page-extract`: prints the GIF metadata a saved GIF page embeds in its HTML.
//!
//! Without a field the whole record is printed as indented JSON. With a dot-separated field a
//! scalar prints bare, a list one item per line, and a mapping as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use page_extract::cli::Args;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,page_extract=info")),
        )
        .init();

    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("read {:?}", args.html))?;
    tracing::debug!(path = ?args.html, bytes = html.len(), "page loaded");

    for line in page_extract::render(&html, args.field.as_deref())? {
        println!("{line}");
    }
    Ok(())
}
