use std::fmt;

use super::{heading, section};
use crate::error::Result;
use crate::models::{Person, RoleCategory};
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore, Setting};

const POWERS: &[&str] = &[
    "Принятие государственных постановлений",
    "Назначение должностных лиц",
    "Управление городским строительством",
    "Руководство вооружёнными силами",
    "Определение политического курса",
    "Контроль за соблюдением законов",
];

/// The party leadership: everyone in the leadership category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadershipPage {
    pub leaders: Vec<Person>,
    pub description: String,
}

impl LeadershipPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>) -> Result<Self> {
        let leaders = store
            .all(collection::PEOPLE)?
            .into_iter()
            .filter(|person| person.category() == RoleCategory::Leadership)
            .collect();
        Ok(Self {
            leaders,
            description: store.setting(Setting::LeadershipDescription)?,
        })
    }
}

impl fmt::Display for LeadershipPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Высшее руководство")?;
        writeln!(f, "☭ Центральный Комитет КПСС")?;
        writeln!(f, "  {}", self.description)?;

        for leader in &self.leaders {
            section(f, &leader.name)?;
            writeln!(f, "  {}", leader.role)?;
            if !leader.description.is_empty() {
                writeln!(f, "  {}", leader.description)?;
            }
            writeln!(f, "  Партийный билет · Высшая власть")?;
        }

        section(f, "Полномочия руководства")?;
        for power in POWERS {
            writeln!(f, "  • {power}")?;
        }
        Ok(())
    }
}
