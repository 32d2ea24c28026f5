//! High-score table persistence
//!
//! A bounded top-10 list of name/score pairs, stored as TOML in
//! ~/.config/termtris/high_scores.toml (or platform equivalent).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Table capacity
pub const MAX_ENTRIES: usize = 10;
/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 12;

/// One table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// The high-score table, kept sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            entries: (0..MAX_ENTRIES)
                .map(|_| ScoreEntry {
                    name: "NA".to_string(),
                    score: 0,
                })
                .collect(),
        }
    }
}

impl HighScores {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "termtris", "termtris")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the table file path
    fn table_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("high_scores.toml"))
    }

    /// Load the table from file, or fall back to the default placeholders
    pub fn load() -> Self {
        let Some(path) = Self::table_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut table: Self = toml::from_str(&contents).unwrap_or_default();
                table.normalize();
                table
            }
            Err(_) => Self::default(),
        }
    }

    /// Save the table to file
    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = Self::config_dir() else {
            return Err("Could not determine config directory".to_string());
        };

        let Some(path) = Self::table_path() else {
            return Err("Could not determine high-score path".to_string());
        };

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config dir: {}", e))?;

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write high scores: {}", e))?;

        tracing::info!(path = %path.display(), "high scores saved");
        Ok(())
    }

    /// Whether a final score earns a spot on the table
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_ENTRIES
                || self.entries.last().map_or(true, |e| score > e.score))
    }

    /// Insert a new entry, keeping the table sorted and bounded
    pub fn insert(&mut self, name: &str, score: u32) {
        let name = sanitize_name(name);
        self.entries.push(ScoreEntry { name, score });
        self.normalize();
    }

    /// The highest recorded score
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore sorted order and the size bound after edits or a load
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}

/// Clamp a player name to printable characters and the length bound;
/// empty input becomes the placeholder
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LEN)
        .collect();
    if cleaned.trim().is_empty() {
        "NA".to_string()
    } else {
        cleaned
    }
}
