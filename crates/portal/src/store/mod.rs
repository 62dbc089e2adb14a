//! The persisted content store.
//!
//! [`PortalStore`] layers typed collections and scalar settings over any
//! [`KeyValueBackend`]. There is no cache: every read decodes the stored
//! value and every write re-encodes the whole collection, so a read always
//! observes the writes made before it.
//!
//! Reads treat a stored value that fails to decode as absent: the
//! documented default is returned and a warning is logged. Writes never do.
//! A collection that cannot be decoded is left untouched and the write fails
//! with [`Error::InvalidValue`].

pub mod collection;
pub mod defaults;
pub mod ids;
pub mod keys;
pub mod settings;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{
    ArmyStats, ArmyUnit, CityNewsItem, ConstructionProject, Draft, NewsItem, Person, Photo,
    Record, RequestStatus, RoleRequest, MAX_PROGRESS,
};
use crate::storage::KeyValueBackend;

pub use collection::{Collection, Insertion};
pub use ids::IdGenerator;
pub use settings::Setting;

/// Typed CRUD over the portal's collections and settings.
#[derive(Debug)]
pub struct PortalStore<B> {
    backend: B,
    ids: IdGenerator,
}

impl<B: KeyValueBackend> PortalStore<B> {
    /// Wrap a backend without seeding it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ids: IdGenerator::new(),
        }
    }

    /// Wrap a backend and seed any missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::new(backend);
        store.initialize()?;
        Ok(store)
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The underlying backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Write the default value for every known key that is absent.
    ///
    /// Existing keys are never overwritten, so repeated calls are no-ops.
    /// Returns the number of keys seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn initialize(&mut self) -> Result<usize> {
        let now = Utc::now();
        let mut seeded = 0;
        for key in keys::ALL {
            if self.backend.contains(key)? {
                continue;
            }
            let value = defaults::encoded(key, now)?
                .ok_or_else(|| Error::internal(format!("no default for key {key}")))?;
            self.backend.set(key, &value)?;
            seeded += 1;
        }
        if seeded > 0 {
            info!(seeded, "seeded default content");
        }
        Ok(seeded)
    }

    /// Every record in `collection`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn all<T: Record>(&self, collection: Collection<T>) -> Result<Vec<T>> {
        self.read_json(collection.key(), Vec::new)
    }

    /// The record with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn find<T: Record>(&self, collection: Collection<T>, id: &str) -> Result<Option<T>> {
        Ok(self
            .all(collection)?
            .into_iter()
            .find(|record| record.id() == id))
    }

    /// Create a record from `draft` with a fresh id (and date).
    ///
    /// News-like collections put it first; the rest append it.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection is malformed or the backend
    /// cannot be read or written.
    pub fn add<D: Draft>(&mut self, collection: Collection<D::Record>, draft: D) -> Result<D::Record> {
        let mut records = self.records_for_write(collection)?;
        let id = self.ids.next_for(&records);
        let record = draft.into_record(id, Utc::now());

        match collection.insertion() {
            Insertion::Append => records.push(record.clone()),
            Insertion::Prepend => records.insert(0, record.clone()),
        }
        self.write_json(collection.key(), &records)?;
        debug!(key = collection.key(), id = record.id(), "added record");
        Ok(record)
    }

    /// Replace the record with the same id, keeping its position.
    ///
    /// Returns `false`, writing nothing, when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection is malformed or the backend
    /// cannot be read or written.
    pub fn update<T: Record>(&mut self, collection: Collection<T>, item: T) -> Result<bool> {
        let id = item.id().to_string();
        self.modify(collection, &id, |record| *record = item)
    }

    /// Apply `change` to the record with `id` and write the collection back.
    ///
    /// Returns `false`, writing nothing, when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection is malformed or the backend
    /// cannot be read or written.
    pub fn modify<T: Record>(
        &mut self,
        collection: Collection<T>,
        id: &str,
        change: impl FnOnce(&mut T),
    ) -> Result<bool> {
        let mut records = self.records_for_write(collection)?;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            debug!(key = collection.key(), id, "update target not found");
            return Ok(false);
        };
        change(record);
        self.write_json(collection.key(), &records)?;
        debug!(key = collection.key(), id, "updated record");
        Ok(true)
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false`, writing nothing, when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection is malformed or the backend
    /// cannot be read or written.
    pub fn delete<T: Record>(&mut self, collection: Collection<T>, id: &str) -> Result<bool> {
        let mut records = self.records_for_write(collection)?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            debug!(key = collection.key(), id, "delete target not found");
            return Ok(false);
        }
        self.write_json(collection.key(), &records)?;
        debug!(key = collection.key(), id, "deleted record");
        Ok(true)
    }

    /// Move a role request to `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn set_request_status(&mut self, id: &str, status: RequestStatus) -> Result<bool> {
        self.modify(collection::ROLE_REQUESTS, id, |request| {
            request.status = status;
        })
    }

    /// Current value of a setting as it is stored (JSON for structured ones).
    ///
    /// Absent settings read as their default.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn setting(&self, setting: Setting) -> Result<String> {
        match setting {
            Setting::ConstructionProgress => Ok(self.construction_progress()?.to_string()),
            Setting::ArmyStats => Ok(serde_json::to_string(&self.army_stats()?)?),
            plain => Ok(match self.backend.get(plain.key())? {
                Some(value) => value,
                None => defaults::text(plain).unwrap_or_default().to_string(),
            }),
        }
    }

    /// Store a setting from its textual form.
    ///
    /// Plain settings are stored raw. Structured settings are parsed first
    /// and rejected with [`Error::InvalidValue`] if they do not parse.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is invalid or the backend cannot be written.
    pub fn set_setting(&mut self, setting: Setting, value: &str) -> Result<()> {
        match setting {
            Setting::ConstructionProgress => {
                let progress = value.trim().parse::<u8>().map_err(|err| {
                    Error::invalid_value("constructionProgress", err.to_string())
                })?;
                self.set_construction_progress(progress)
            }
            Setting::ArmyStats => {
                let stats: ArmyStats = serde_json::from_str(value)
                    .map_err(|err| Error::invalid_value("armyStats", err.to_string()))?;
                self.set_army_stats(stats)
            }
            plain => {
                self.backend.set(plain.key(), value)?;
                debug!(key = plain.key(), "updated setting");
                Ok(())
            }
        }
    }

    /// City construction progress in percent, clamped to `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn construction_progress(&self) -> Result<u8> {
        // The browser stored whatever `parseInt` produced, negatives included.
        let progress: i64 = self.read_json(keys::CONSTRUCTION_PROGRESS, || {
            i64::from(defaults::construction_progress())
        })?;
        let clamped = progress.clamp(0, i64::from(MAX_PROGRESS));
        Ok(u8::try_from(clamped).unwrap_or(MAX_PROGRESS))
    }

    /// # Errors
    ///
    /// Returns an error if `progress` exceeds 100 or the backend cannot be written.
    pub fn set_construction_progress(&mut self, progress: u8) -> Result<()> {
        if progress > MAX_PROGRESS {
            return Err(Error::invalid_value(
                "constructionProgress",
                format!("{progress} is above {MAX_PROGRESS}"),
            ));
        }
        self.write_json(keys::CONSTRUCTION_PROGRESS, &progress)
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn army_stats(&self) -> Result<ArmyStats> {
        self.read_json(keys::ARMY_STATS, ArmyStats::default)
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn set_army_stats(&mut self, stats: ArmyStats) -> Result<()> {
        self.write_json(keys::ARMY_STATS, &stats)
    }

    /// Remove all content and the session flag, then seed again.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn reset(&mut self) -> Result<usize> {
        for key in keys::ALL.iter().chain(std::iter::once(&keys::ADMIN_FLAG)) {
            self.backend.remove(key)?;
        }
        warn!("store reset to defaults");
        self.initialize()
    }

    /// Snapshot of every stored content key as one JSON object.
    ///
    /// JSON values are embedded decoded; plain text is embedded as strings.
    /// Structured values that no longer decode are left out with a warning,
    /// so every snapshot can be imported again.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn export(&self) -> Result<Value> {
        let mut snapshot = serde_json::Map::new();
        for &key in keys::ALL {
            let Some(raw) = self.backend.get(key)? else {
                continue;
            };
            let value = if is_json_key(key) {
                let decoded = serde_json::from_str::<Value>(&raw)
                    .map_err(|err| Error::invalid_value(key, err.to_string()))
                    .and_then(|value| check_structured(key, &value).map(|()| value));
                match decoded {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(key, error = %err, "leaving malformed value out of export");
                        continue;
                    }
                }
            } else {
                Value::String(raw)
            };
            snapshot.insert(key.to_string(), value);
        }
        Ok(Value::Object(snapshot))
    }

    /// Load a snapshot produced by [`export`](Self::export) or a raw dump
    /// of the browser's local storage (where every value is a string).
    ///
    /// Unknown keys are skipped. Values for JSON keys must decode into the
    /// key's record or setting type, and nothing is written unless they all
    /// do. Returns the number of keys
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if `snapshot` is not an object, a JSON value is
    /// malformed, or the backend cannot be written.
    pub fn import(&mut self, snapshot: &Value) -> Result<usize> {
        let object = snapshot
            .as_object()
            .ok_or_else(|| Error::invalid_value("snapshot", "expected a JSON object"))?;

        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let Some(&known) = keys::ALL.iter().find(|k| **k == key.as_str()) else {
                warn!(key = key.as_str(), "skipping unknown key");
                continue;
            };
            let encoded = match (is_json_key(known), value) {
                (true, Value::String(raw)) => {
                    let decoded = serde_json::from_str::<Value>(raw)
                        .map_err(|err| Error::invalid_value(known, err.to_string()))?;
                    check_structured(known, &decoded)?;
                    raw.clone()
                }
                (true, other) => {
                    check_structured(known, other)?;
                    serde_json::to_string(other)?
                }
                (false, Value::String(text)) => text.clone(),
                (false, other) => other.to_string(),
            };
            entries.push((known, encoded));
        }

        // Everything is validated before the first write.
        for (key, encoded) in &entries {
            self.backend.set(key, encoded)?;
        }
        info!(written = entries.len(), "imported snapshot");
        Ok(entries.len())
    }

    /// Collection sizes and key counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn stats(&self) -> Result<StoreStats> {
        let mut collections = Vec::with_capacity(collection::COLLECTION_KEYS.len());
        for key in collection::COLLECTION_KEYS {
            let records: Vec<Value> = self.read_json(key, Vec::new)?;
            collections.push((*key, records.len()));
        }

        let mut keys_present = 0;
        for key in keys::ALL {
            if self.backend.contains(key)? {
                keys_present += 1;
            }
        }

        let unknown_keys = self
            .backend
            .keys()?
            .into_iter()
            .filter(|key| key.as_str() != keys::ADMIN_FLAG && !keys::ALL.contains(&key.as_str()))
            .collect();

        Ok(StoreStats {
            collections,
            keys_present,
            keys_known: keys::ALL.len(),
            unknown_keys,
        })
    }

    /// The stored collection for a read-modify-write. Unlike [`all`](Self::all)
    /// a malformed value is an error, so the write cannot replace it.
    fn records_for_write<T: Record>(&self, collection: Collection<T>) -> Result<Vec<T>> {
        let key = collection.key();
        let Some(raw) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| {
            warn!(key, error = %err, "refusing to rewrite malformed collection");
            Error::invalid_value(key, err.to_string())
        })
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str, fallback: impl FnOnce() -> T) -> Result<T> {
        let Some(raw) = self.backend.get(key)? else {
            debug!(key, "key absent, using default");
            return Ok(fallback());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is malformed, using default");
                Ok(fallback())
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.backend.set(key, &encoded)
    }
}

/// Check that `value` decodes as the type stored under `key`.
fn check_structured(key: &'static str, value: &Value) -> Result<()> {
    match key {
        keys::PEOPLE => decodes_as::<Vec<Person>>(key, value),
        keys::NEWS => decodes_as::<Vec<NewsItem>>(key, value),
        keys::ROLE_REQUESTS => decodes_as::<Vec<RoleRequest>>(key, value),
        keys::CITY_NEWS => decodes_as::<Vec<CityNewsItem>>(key, value),
        keys::CITY_PHOTOS | keys::METRO_PHOTOS | keys::CONSTRUCTION_PHOTOS => {
            decodes_as::<Vec<Photo>>(key, value)
        }
        keys::CONSTRUCTION_PROJECTS => decodes_as::<Vec<ConstructionProject>>(key, value),
        keys::ARMY_UNITS => decodes_as::<Vec<ArmyUnit>>(key, value),
        keys::ARMY_STATS => decodes_as::<ArmyStats>(key, value),
        keys::CONSTRUCTION_PROGRESS => decodes_as::<i64>(key, value),
        _ => Ok(()),
    }
}

fn decodes_as<T: DeserializeOwned>(key: &'static str, value: &Value) -> Result<()> {
    serde_json::from_value::<T>(value.clone())
        .map(drop)
        .map_err(|err| Error::invalid_value(key, err.to_string()))
}

fn is_json_key(key: &str) -> bool {
    collection::COLLECTION_KEYS.contains(&key)
        || Setting::from_key(key).is_some_and(Setting::is_structured)
}

/// Summary of what the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Record count per collection key.
    pub collections: Vec<(&'static str, usize)>,
    /// How many content keys are present.
    pub keys_present: usize,
    /// How many content keys exist.
    pub keys_known: usize,
    /// Keys in the backend that the portal does not use, sorted.
    pub unknown_keys: Vec<String>,
}
