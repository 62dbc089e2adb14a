use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;
use crate::error::Error;

/// A gallery photo. Only the URL is kept; images are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPhoto {
    pub url: String,
    pub title: Option<String>,
}

impl Draft for NewPhoto {
    type Record = Photo;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Photo {
        Photo {
            id,
            url: self.url,
            title: self.title,
        }
    }
}

/// The independent photo galleries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoAlbum {
    City,
    Construction,
    Metro,
}

impl PhotoAlbum {
    pub const ALL: [Self; 3] = [Self::City, Self::Construction, Self::Metro];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Construction => "construction",
            Self::Metro => "metro",
        }
    }
}

impl std::fmt::Display for PhotoAlbum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoAlbum {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|album| album.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_value("album", format!("unknown album '{s}'")))
    }
}
