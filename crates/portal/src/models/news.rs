use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;
use crate::error::Error;

/// Closed set of news categories. Stored by their Russian names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    #[serde(rename = "политика")]
    Politics,
    #[serde(rename = "транспорт")]
    Transport,
    #[serde(rename = "кадры")]
    Personnel,
    #[serde(rename = "строительство")]
    Construction,
    #[serde(rename = "культура")]
    Culture,
    #[serde(rename = "технологии")]
    Technology,
}

impl NewsCategory {
    /// All categories in filter-bar order.
    pub const ALL: [Self; 6] = [
        Self::Politics,
        Self::Transport,
        Self::Personnel,
        Self::Construction,
        Self::Culture,
        Self::Technology,
    ];

    /// The stored (and displayed) name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Politics => "политика",
            Self::Transport => "транспорт",
            Self::Personnel => "кадры",
            Self::Construction => "строительство",
            Self::Culture => "культура",
            Self::Technology => "технологии",
        }
    }

    /// Icon name shown next to items of this category.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Politics => "Landmark",
            Self::Transport => "Train",
            Self::Personnel => "Users",
            Self::Construction => "HardHat",
            Self::Culture => "Theater",
            Self::Technology => "Cpu",
        }
    }

    /// Badge colour class for this category.
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Politics => "bg-primary",
            Self::Transport => "bg-blue-600",
            Self::Personnel => "bg-purple-600",
            Self::Construction => "bg-orange-600",
            Self::Culture => "bg-pink-600",
            Self::Technology => "bg-green-600",
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = Error;

    /// Accepts the stored Russian name or an English alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .or(match lowered.as_str() {
                "politics" => Some(Self::Politics),
                "transport" => Some(Self::Transport),
                "personnel" => Some(Self::Personnel),
                "construction" => Some(Self::Construction),
                "culture" => Some(Self::Culture),
                "technology" => Some(Self::Technology),
                _ => None,
            })
            .ok_or_else(|| Error::invalid_value("category", format!("unknown category '{s}'")))
    }
}

/// A state news item. The collection is kept newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    pub date: DateTime<Utc>,
}

/// Fields entered when publishing news.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
}

impl Draft for NewNews {
    type Record = NewsItem;

    fn into_record(self, id: String, now: DateTime<Utc>) -> NewsItem {
        NewsItem {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            date: now,
        }
    }
}
