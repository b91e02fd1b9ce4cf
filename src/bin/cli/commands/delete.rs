use std::io::Write;

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, needle: &str, yes: bool) -> Result<()> {
    let phrase = app.find_phrase(needle)?;

    if !yes {
        print!(
            "Delete \"{}\" · \"{}\"? This cannot be undone. [y/N] ",
            phrase.text, phrase.translation
        );
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.storage
        .delete_phrase(phrase.id)
        .context("Failed to delete phrase")?;

    println!("Deleted \"{}\"", phrase.text);
    Ok(())
}
