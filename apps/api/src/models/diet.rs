use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diet classification carried by every catalog recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    #[serde(rename = "Veg")]
    Veg,
    #[serde(rename = "Vegan")]
    Vegan,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl Diet {
    pub fn label(self) -> &'static str {
        match self {
            Diet::Veg => "Veg",
            Diet::Vegan => "Vegan",
            Diet::NonVeg => "Non-Veg",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Diet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veg" => Ok(Diet::Veg),
            "vegan" => Ok(Diet::Vegan),
            "non-veg" => Ok(Diet::NonVeg),
            other => Err(format!("unknown diet label '{}'", other)),
        }
    }
}

/// Diet requested by a user.
///
/// `Vegetarian` is what a request for "Veg" means: it accepts both `Veg`
/// and `Vegan` recipes. Any other explicit value only matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DietPreference {
    #[default]
    All,
    Vegetarian,
    Only(String),
}

impl DietPreference {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            DietPreference::All
        } else if trimmed.eq_ignore_ascii_case("veg") {
            DietPreference::Vegetarian
        } else {
            DietPreference::Only(trimmed.to_string())
        }
    }

    /// Exact label comparison, used against the main catalog
    pub fn matches(&self, diet: Diet) -> bool {
        match self {
            DietPreference::All => true,
            DietPreference::Vegetarian => matches!(diet, Diet::Veg | Diet::Vegan),
            DietPreference::Only(label) => diet.label() == label,
        }
    }

    /// Case-insensitive comparison against free-text labels of the regional catalog
    pub fn matches_label(&self, label: Option<&str>) -> bool {
        match (self, label.map(|l| l.trim().to_lowercase())) {
            (DietPreference::All, _) => true,
            (_, None) => false,
            (DietPreference::Vegetarian, Some(l)) => l == "veg" || l == "vegan",
            (DietPreference::Only(wanted), Some(l)) => wanted.to_lowercase() == l,
        }
    }
}
