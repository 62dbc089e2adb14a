//! Typed handles for the persisted collections.

use std::marker::PhantomData;

use super::keys;
use crate::models::{
    ArmyUnit, CityNewsItem, ConstructionProject, NewsItem, Person, Photo, PhotoAlbum, RoleRequest,
};

/// Where `add` places a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Insertion order (oldest first).
    Append,
    /// Most recent first.
    Prepend,
}

/// A named collection of `T` records persisted as one JSON array.
#[derive(Debug)]
pub struct Collection<T> {
    key: &'static str,
    insertion: Insertion,
    _record: PhantomData<fn() -> T>,
}

// Manual impls: derives would require `T: Clone`.
impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> Collection<T> {
    const fn new(key: &'static str, insertion: Insertion) -> Self {
        Self {
            key,
            insertion,
            _record: PhantomData,
        }
    }

    /// The persistence key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        self.key
    }

    /// Where new records go.
    #[must_use]
    pub const fn insertion(self) -> Insertion {
        self.insertion
    }
}

pub const PEOPLE: Collection<Person> = Collection::new(keys::PEOPLE, Insertion::Append);
pub const NEWS: Collection<NewsItem> = Collection::new(keys::NEWS, Insertion::Prepend);
pub const ROLE_REQUESTS: Collection<RoleRequest> =
    Collection::new(keys::ROLE_REQUESTS, Insertion::Append);
pub const CITY_NEWS: Collection<CityNewsItem> = Collection::new(keys::CITY_NEWS, Insertion::Prepend);
pub const CONSTRUCTION_PROJECTS: Collection<ConstructionProject> =
    Collection::new(keys::CONSTRUCTION_PROJECTS, Insertion::Append);
pub const ARMY_UNITS: Collection<ArmyUnit> = Collection::new(keys::ARMY_UNITS, Insertion::Append);
pub const CITY_PHOTOS: Collection<Photo> = Collection::new(keys::CITY_PHOTOS, Insertion::Append);
pub const CONSTRUCTION_PHOTOS: Collection<Photo> =
    Collection::new(keys::CONSTRUCTION_PHOTOS, Insertion::Append);
pub const METRO_PHOTOS: Collection<Photo> = Collection::new(keys::METRO_PHOTOS, Insertion::Append);

/// The collection backing a photo gallery.
#[must_use]
pub fn photos(album: PhotoAlbum) -> Collection<Photo> {
    match album {
        PhotoAlbum::City => CITY_PHOTOS,
        PhotoAlbum::Construction => CONSTRUCTION_PHOTOS,
        PhotoAlbum::Metro => METRO_PHOTOS,
    }
}

/// Keys of every collection, for statistics.
pub const COLLECTION_KEYS: &[&str] = &[
    keys::PEOPLE,
    keys::NEWS,
    keys::ROLE_REQUESTS,
    keys::CITY_NEWS,
    keys::CONSTRUCTION_PROJECTS,
    keys::ARMY_UNITS,
    keys::CITY_PHOTOS,
    keys::CONSTRUCTION_PHOTOS,
    keys::METRO_PHOTOS,
];
