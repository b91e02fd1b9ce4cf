use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, text: &str, translation: &str, format: &OutputFormat) -> Result<()> {
    let phrase = app.storage
        .add_phrase(text, translation)
        .context("Failed to add phrase")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&phrase)?);
        }
        OutputFormat::Plain => {
            println!("Added \"{}\" · \"{}\"", phrase.text, phrase.translation);
            println!("  ID: {}", phrase.id);
        }
    }

    Ok(())
}
