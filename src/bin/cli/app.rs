use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use fraza_lib::phrases::{JsonPhraseStore, Phrase};

/// Shared application state for CLI commands
pub struct App {
    pub storage: JsonPhraseStore,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(dir),
            None => JsonPhraseStore::default_data_dir()
                .context("Failed to get data directory")?,
        };

        let storage = JsonPhraseStore::new(data_dir);
        storage.init().context("Failed to initialize phrase storage")?;

        Ok(Self { storage })
    }

    /// List all phrases, newest first
    pub fn list_phrases(&self) -> Result<Vec<Phrase>> {
        self.storage.list_phrases().context("Failed to list phrases")
    }

    /// Find a phrase by exact text (case-insensitive) or id prefix
    pub fn find_phrase(&self, needle: &str) -> Result<Phrase> {
        let phrases = self.list_phrases()?;
        let needle_lower = needle.to_lowercase();

        // Exact text match first
        if let Some(p) = phrases.iter().find(|p| p.text.to_lowercase() == needle_lower) {
            return Ok(p.clone());
        }

        // Id prefix match
        let matches: Vec<&Phrase> = phrases.iter()
            .filter(|p| p.id.to_string().starts_with(&needle_lower))
            .collect();

        match matches.len() {
            0 => bail!("No phrase matching '{}'", needle),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous phrase '{}'. Matches:\n{}", needle,
                matches.iter()
                    .map(|p| format!("  - {}  {}", p.id, p.text))
                    .collect::<Vec<_>>()
                    .join("\n")),
        }
    }
}
