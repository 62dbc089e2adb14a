use std::fmt;

use super::gallery::Gallery;
use super::{heading, section, Portal};
use crate::error::Result;
use crate::models::{Person, PhotoAlbum};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore, Setting};

/// Role held by the head of the metro.
pub const METRO_HEAD_ROLE: &str = "Начальник Метрополитена";

pub const RULES: &[&str] = &[
    "Соблюдайте чистоту и порядок на территории метрополитена",
    "Не заходите за жёлтую линию безопасности",
    "Уступайте места пожилым, инвалидам и пассажирам с детьми",
    "Запрещено курение, распитие алкогольных напитков",
    "Сохраняйте билеты до конца поездки",
    "При возникновении чрезвычайной ситуации обращайтесь к персоналу",
    "Запрещено проносить крупногабаритный багаж без разрешения",
    "Следуйте указаниям персонала метрополитена",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetroPage {
    pub stations: String,
    pub lines: String,
    pub description: String,
    pub head: Option<Person>,
    pub gallery: Gallery,
}

impl MetroPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let head = store
            .all(collection::PEOPLE)?
            .into_iter()
            .find(|person| person.holds(METRO_HEAD_ROLE));
        Ok(Self {
            stations: store.setting(Setting::MetroStations)?,
            lines: store.setting(Setting::MetroLines)?,
            description: store.setting(Setting::MetroDescription)?,
            head,
            gallery: Gallery::load(store, PhotoAlbum::Metro, admin)?,
        })
    }
}

impl fmt::Display for MetroPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Метрополитен ЦК КПСС")?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "  Станций: {} (в разработке)", self.stations)?;
        writeln!(f, "  Линий:   {} (в разработке)", self.lines)?;

        if let Some(head) = &self.head {
            section(f, "Руководство")?;
            writeln!(f, "  {} ({})", head.name, head.role)?;
            if !head.description.is_empty() {
                writeln!(f, "  {}", head.description)?;
            }
        }

        section(f, "Правила метрополитена")?;
        for (number, rule) in RULES.iter().enumerate() {
            writeln!(f, "  {}. {rule}", number + 1)?;
        }

        write!(f, "{}", self.gallery)
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Replace the station and line summaries together.
    ///
    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn update_metro_network(&mut self, stations: &str, lines: &str) -> Result<()> {
        self.admin()?;
        let store = self.store_mut();
        store.set_setting(Setting::MetroStations, stations)?;
        store.set_setting(Setting::MetroLines, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;

    #[test]
    fn test_seeded_metro_page() {
        let page = MetroPage::load(portal().store(), false).unwrap();
        assert_eq!(page.stations, "Люберцы");
        assert_eq!(page.lines, "Красная линия");
        assert_eq!(page.head.as_ref().map(|p| p.name.as_str()), Some("Денис"));

        let text = page.to_string();
        assert!(text.contains("8. Следуйте указаниям персонала метрополитена"));
        assert!(text.contains("Денис (Начальник Метрополитена)"));
    }

    #[test]
    fn test_network_update() {
        let mut portal = admin_portal();
        portal
            .update_metro_network("Люберцы, Котельники", "Красная линия, Синяя линия")
            .unwrap();

        let page = MetroPage::load(portal.store(), true).unwrap();
        assert_eq!(page.stations, "Люберцы, Котельники");
        assert_eq!(page.lines, "Красная линия, Синяя линия");
    }

    #[test]
    fn test_network_update_requires_admin() {
        let mut portal = portal();
        assert_admin_required(portal.update_metro_network("a", "b"));
        assert_eq!(MetroPage::load(portal.store(), false).unwrap().stations, "Люберцы");
    }
}
