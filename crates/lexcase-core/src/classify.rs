//! Priority classification shared by importance, severity, and priority fields.

use serde::Serialize;

/// Visual severity of a rated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Critical,
    Caution,
    Safe,
    Neutral,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Critical => "critical",
            Category::Caution => "caution",
            Category::Safe => "safe",
            Category::Neutral => "neutral",
        }
    }

    /// Badge colour as a hex RGB string.
    pub fn color(self) -> &'static str {
        match self {
            Category::Critical => "#dc2626",
            Category::Caution => "#d97706",
            Category::Safe => "#16a34a",
            Category::Neutral => "#64748b",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a High / Medium / Low level onto a [`Category`].
///
/// Case-insensitive. Anything else, including a missing level, is
/// [`Category::Neutral`].
pub fn classify(level: Option<&str>) -> Category {
    let Some(level) = level else {
        return Category::Neutral;
    };
    match level.to_lowercase().as_str() {
        "high" => Category::Critical,
        "medium" => Category::Caution,
        "low" => Category::Safe,
        _ => Category::Neutral,
    }
}
