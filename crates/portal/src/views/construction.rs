//! Construction projects and their aggregate progress.

use std::fmt;

use tracing::info;

use super::gallery::Gallery;
use super::{heading, id_tag, require_all, section, Portal};
use crate::error::{Error, Result};
use crate::models::{average_progress, ConstructionProject, NewProject, PhotoAlbum, MAX_PROGRESS};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore};

/// Work crews: name, headcount, assignment.
pub const BRIGADES: &[(&str, u32, &str)] = &[
    ("Бригада №1", 15, "Жилой квартал"),
    ("Бригада №2", 12, "Метрополитен"),
    ("Бригада №3", 18, "Промышленность"),
    ("Бригада №4", 10, "Инфраструктура"),
];

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionPage {
    pub projects: Vec<ConstructionProject>,
    /// Rounded mean of the projects' progress, recomputed on every load.
    pub overall: u8,
    pub gallery: Gallery,
    admin: bool,
}

impl ConstructionPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let projects = store.all(collection::CONSTRUCTION_PROJECTS)?;
        Ok(Self {
            overall: average_progress(&projects),
            projects,
            gallery: Gallery::load(store, PhotoAlbum::Construction, admin)?,
            admin,
        })
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(MAX_PROGRESS)) * BAR_WIDTH / usize::from(MAX_PROGRESS);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl fmt::Display for ConstructionPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Строительство")?;

        section(f, "Общий прогресс застройки")?;
        writeln!(f, "  {} {}%", progress_bar(self.overall), self.overall)?;
        writeln!(
            f,
            "  Ведётся активная застройка городских округов, развитие инфраструктуры и транспортной сети"
        )?;

        section(f, "Проекты")?;
        if self.projects.is_empty() {
            writeln!(f, "  Проектов пока нет")?;
        }
        for project in &self.projects {
            writeln!(
                f,
                "  {}{} [{}]",
                id_tag(self.admin, &project.id),
                project.name,
                project.status
            )?;
            writeln!(
                f,
                "    {} {}%",
                progress_bar(project.progress),
                project.progress
            )?;
        }

        section(f, "Строительные бригады")?;
        for (name, workers, work) in BRIGADES {
            writeln!(f, "  {name}: {workers} чел., работы: {work}")?;
        }

        write!(f, "{}", self.gallery)
    }
}

fn check_progress(progress: u8) -> Result<()> {
    if progress > MAX_PROGRESS {
        return Err(Error::invalid_value(
            "progress",
            format!("{progress} is above {MAX_PROGRESS}"),
        ));
    }
    Ok(())
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Add a project. The name is required and progress is at most 100.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty name or out of range
    /// progress, or if the store cannot be written.
    pub fn add_project(&mut self, project: NewProject) -> Result<ConstructionProject> {
        self.admin()?;
        require_all(&[("name", project.name.as_str())])?;
        check_progress(project.progress)?;
        let project = self
            .store_mut()
            .add(collection::CONSTRUCTION_PROJECTS, project)?;
        info!(id = project.id.as_str(), "construction project added");
        Ok(project)
    }

    /// # Errors
    ///
    /// Returns an error without a session, on an empty name or out of range
    /// progress, or if the store cannot be written.
    pub fn update_project(&mut self, project: ConstructionProject) -> Result<bool> {
        self.admin()?;
        require_all(&[("name", project.name.as_str())])?;
        check_progress(project.progress)?;
        self.store_mut()
            .update(collection::CONSTRUCTION_PROJECTS, project)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_project(&mut self, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut()
            .delete(collection::CONSTRUCTION_PROJECTS, id)
    }
}
