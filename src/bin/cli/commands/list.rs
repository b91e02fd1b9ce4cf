use anyhow::Result;

use fraza_lib::phrases::Phrase;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let phrases = app.list_phrases()?;
    render_phrases(&phrases, format, use_color)
}

/// Shared renderer for list and search output
pub fn render_phrases(phrases: &[Phrase], format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(phrases)?);
        }
        OutputFormat::Plain => {
            if phrases.is_empty() {
                println!("No phrases found. Start by adding your first phrase.");
                return Ok(());
            }

            for phrase in phrases {
                let (ok, fail) = if use_color {
                    (
                        format!("\x1b[32m✓{}\x1b[0m", phrase.success_count),
                        format!("\x1b[31m✗{}\x1b[0m", phrase.failure_count),
                    )
                } else {
                    (
                        format!("✓{}", phrase.success_count),
                        format!("✗{}", phrase.failure_count),
                    )
                };

                println!(
                    "{}  {} · {}  {} {}  ({})",
                    &phrase.id.to_string()[..8],
                    phrase.text,
                    phrase.translation,
                    ok,
                    fail,
                    phrase.created_at.format("%Y-%m-%d"),
                );
            }
        }
    }

    Ok(())
}
