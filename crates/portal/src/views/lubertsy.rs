//! The Lubertsy city page.

use std::fmt;

use tracing::info;

use super::gallery::Gallery;
use super::{heading, id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{CityNewsItem, NewCityNews, Person, PhotoAlbum};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore, Setting};

/// Role held by the city's head.
pub const CITY_HEAD_ROLE: &str = "Глава города Люберцы";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LubertsyPage {
    pub status: String,
    /// The city's own progress figure, edited by hand.
    pub progress: u8,
    pub start_date: String,
    pub description: String,
    pub head: Option<Person>,
    pub news: Vec<CityNewsItem>,
    pub gallery: Gallery,
    admin: bool,
}

impl LubertsyPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let head = store
            .all(collection::PEOPLE)?
            .into_iter()
            .find(|person| person.holds(CITY_HEAD_ROLE));
        Ok(Self {
            status: store.setting(Setting::ConstructionStatus)?,
            progress: store.construction_progress()?,
            start_date: store.setting(Setting::ConstructionStartDate)?,
            description: store.setting(Setting::CityDescription)?,
            head,
            news: store.all(collection::CITY_NEWS)?,
            gallery: Gallery::load(store, PhotoAlbum::City, admin)?,
            admin,
        })
    }
}

impl fmt::Display for LubertsyPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Городской округ Люберцы")?;

        section(f, "Статус строительства")?;
        writeln!(f, "  Статус:   {}", self.status)?;
        writeln!(f, "  Прогресс: {}%", self.progress)?;
        writeln!(f, "  Дата начала строительства: {}", self.start_date)?;
        if let Some(head) = &self.head {
            writeln!(f, "  Глава города: {}", head.name)?;
        }

        section(f, "О городе")?;
        writeln!(f, "  {}", self.description)?;

        write!(f, "{}", self.gallery)?;

        section(f, "Новости города")?;
        if self.news.is_empty() {
            writeln!(f, "  Новостей пока нет")?;
        }
        for item in &self.news {
            writeln!(
                f,
                "  {}{} ({})",
                id_tag(self.admin, &item.id),
                item.title,
                item.date.format("%d.%m.%Y")
            )?;
            writeln!(f, "    {}", item.content)?;
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Replace the three construction status fields together.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, if `progress` exceeds 100, or if
    /// the store cannot be written.
    pub fn update_city_status(&mut self, status: &str, progress: u8, start_date: &str) -> Result<()> {
        self.admin()?;
        let store = self.store_mut();
        store.set_construction_progress(progress)?;
        store.set_setting(Setting::ConstructionStatus, status)?;
        store.set_setting(Setting::ConstructionStartDate, start_date)?;
        info!(progress, "city status updated");
        Ok(())
    }

    /// Post city news at the top of the list. Title and content are required.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty required field, or
    /// if the store cannot be written.
    pub fn add_city_news(&mut self, news: NewCityNews) -> Result<CityNewsItem> {
        self.admin()?;
        require_all(&[
            ("title", news.title.as_str()),
            ("content", news.content.as_str()),
        ])?;
        let item = self.store_mut().add(collection::CITY_NEWS, news)?;
        info!(id = item.id.as_str(), "city news added");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_city_news(&mut self, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut().delete(collection::CITY_NEWS, id)
    }
}
