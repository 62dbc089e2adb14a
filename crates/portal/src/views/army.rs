//! Armed forces: commander, headline numbers, units and recruitment.

use std::fmt;

use tracing::info;

use super::{heading, id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{ArmyStats, ArmyUnit, NewArmyUnit, Person};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore, Setting};

/// Role held by the army's commander.
pub const COMMANDER_ROLE: &str = "НарКом Армии";

/// Specialities recruits can ask for.
pub const RECRUIT_SPECIALITIES: &[&str] = &[
    "Солдат пехоты",
    "Танкист",
    "Лётчик",
    "Сапёр",
    "Связист",
    "Медик",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmyPage {
    pub commander: Option<Person>,
    pub stats: ArmyStats,
    pub units: Vec<ArmyUnit>,
    pub description: String,
    admin: bool,
}

impl ArmyPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let commander = store
            .all(collection::PEOPLE)?
            .into_iter()
            .find(|person| person.holds(COMMANDER_ROLE));
        Ok(Self {
            commander,
            stats: store.army_stats()?,
            units: store.all(collection::ARMY_UNITS)?,
            description: store.setting(Setting::ArmyDescription)?,
            admin,
        })
    }
}

impl fmt::Display for ArmyPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Вооружённые силы")?;
        writeln!(f, "{}", self.description)?;

        if let Some(commander) = &self.commander {
            section(f, "Руководство")?;
            writeln!(f, "  {} ({})", commander.name, commander.role)?;
            if !commander.description.is_empty() {
                writeln!(f, "  {}", commander.description)?;
            }
        }

        section(f, "Боевая готовность")?;
        writeln!(f, "  Военнослужащих: {}", self.stats.soldiers)?;
        writeln!(f, "  Подразделений:  {}", self.stats.units)?;

        section(f, "Структура вооружённых сил")?;
        if self.units.is_empty() {
            writeln!(f, "  Подразделений пока нет")?;
        }
        for (number, unit) in self.units.iter().enumerate() {
            writeln!(
                f,
                "  {}{}. {} [{}]",
                id_tag(self.admin, &unit.id),
                number + 1,
                unit.name,
                unit.status
            )?;
        }

        section(f, "Призыв на службу")?;
        writeln!(
            f,
            "  Подайте заявку в разделе \"Запрос роли\" и укажите желаемую специальность:"
        )?;
        for speciality in RECRUIT_SPECIALITIES {
            writeln!(f, "  ★ {speciality}")?;
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn update_army_stats(&mut self, stats: ArmyStats) -> Result<()> {
        self.admin()?;
        self.store_mut().set_army_stats(stats)
    }

    /// Add a unit. The name is required.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty name, or if the
    /// store cannot be written.
    pub fn add_unit(&mut self, unit: NewArmyUnit) -> Result<ArmyUnit> {
        self.admin()?;
        require_all(&[("name", unit.name.as_str())])?;
        let unit = self.store_mut().add(collection::ARMY_UNITS, unit)?;
        info!(id = unit.id.as_str(), "army unit added");
        Ok(unit)
    }

    /// # Errors
    ///
    /// Returns an error without a session, on an empty name, or if the
    /// store cannot be written.
    pub fn update_unit(&mut self, unit: ArmyUnit) -> Result<bool> {
        self.admin()?;
        require_all(&[("name", unit.name.as_str())])?;
        self.store_mut().update(collection::ARMY_UNITS, unit)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_unit(&mut self, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut().delete(collection::ARMY_UNITS, id)
    }
}
