use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

use super::list::render_phrases;

pub fn run(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let hits = app.storage.search(query).context("Search failed")?;
    render_phrases(&hits, format, use_color)
}
