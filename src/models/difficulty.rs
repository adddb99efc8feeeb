//! Difficulty levels and the label lookup table
//!
//! Routes carry one of three tag tokens (`easy`, `medium`, `hard`). Users
//! pick a human label in the client; `DifficultyMap` translates between the
//! two and is injected wherever the translation is needed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tag token stored on routes
    pub fn tag(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Closed mapping from human-readable labels to difficulty levels.
///
/// Keys are stored trimmed and lowercased; lookups are normalised the same
/// way.
#[derive(Debug, Clone)]
pub struct DifficultyMap {
    labels: Vec<(String, Difficulty)>,
}

impl DifficultyMap {
    pub fn empty() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn with_label(mut self, label: &str, difficulty: Difficulty) -> Self {
        let key = normalize(label);
        self.labels.retain(|(existing, _)| *existing != key);
        self.labels.push((key, difficulty));
        self
    }

    /// `None` means the label is unknown, callers treat that as "no filter".
    pub fn resolve(&self, label: &str) -> Option<Difficulty> {
        let key = normalize(label);
        self.labels
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, difficulty)| *difficulty)
    }
}

impl Default for DifficultyMap {
    fn default() -> Self {
        Self::empty()
            .with_label("Người mới", Difficulty::Easy)
            .with_label("beginner", Difficulty::Easy)
            .with_label("Có kinh nghiệm", Difficulty::Medium)
            .with_label("experienced", Difficulty::Medium)
            .with_label("Chuyên nghiệp", Difficulty::Hard)
            .with_label("professional", Difficulty::Hard)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
