//! Records kept by the portal store.
//!
//! Every record is a flat JSON object with a client-generated string `id`.
//! Field names are camelCase so existing browser data decodes unchanged.

mod army;
mod city;
mod construction;
mod news;
mod person;
mod photo;
mod request;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub use army::{ArmyStats, ArmyUnit, NewArmyUnit};
pub use city::{CityNewsItem, NewCityNews};
pub use construction::{average_progress, ConstructionProject, NewProject, MAX_PROGRESS};
pub use news::{NewNews, NewsCategory, NewsItem};
pub use person::{NewPerson, Person, RoleCategory};
pub use photo::{NewPhoto, Photo, PhotoAlbum};
pub use request::{NewRoleRequest, RequestStatus, RoleRequest, ROLE_OPTIONS};

/// A record that lives in a persisted collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The record's identifier within its collection.
    fn id(&self) -> &str;
}

/// The user-supplied part of a record, before the store assigns identity.
pub trait Draft {
    /// The record this draft becomes.
    type Record: Record;

    /// Complete the record with a fresh `id` and creation time.
    ///
    /// Records without a date field ignore `now`.
    fn into_record(self, id: String, now: DateTime<Utc>) -> Self::Record;
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record!(
    Person,
    NewsItem,
    RoleRequest,
    ConstructionProject,
    CityNewsItem,
    Photo,
    ArmyUnit,
);
