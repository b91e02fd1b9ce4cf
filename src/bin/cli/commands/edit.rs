use anyhow::{bail, Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    needle: &str,
    text: Option<&str>,
    translation: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    if text.is_none() && translation.is_none() {
        bail!("Nothing to change. Pass --text and/or --translation.");
    }

    let phrase = app.find_phrase(needle)?;
    let new_text = text.unwrap_or(&phrase.text);
    let new_translation = translation.unwrap_or(&phrase.translation);

    let updated = app.storage
        .update_phrase(phrase.id, new_text, new_translation)
        .context("Failed to update phrase")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        OutputFormat::Plain => {
            println!("Updated \"{}\" · \"{}\"", updated.text, updated.translation);
        }
    }

    Ok(())
}
