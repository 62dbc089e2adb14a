use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;

/// A city news item. Same shape as state news without a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityNewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCityNews {
    pub title: String,
    pub content: String,
}

impl Draft for NewCityNews {
    type Record = CityNewsItem;

    fn into_record(self, id: String, now: DateTime<Utc>) -> CityNewsItem {
        CityNewsItem {
            id,
            title: self.title,
            content: self.content,
            date: now,
        }
    }
}
