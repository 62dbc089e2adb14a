use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;

/// Upper bound for project and city progress percentages.
pub const MAX_PROGRESS: u8 = 100;

/// A building project shown on the construction page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionProject {
    pub id: String,
    pub name: String,
    /// Percent complete, 0 to 100.
    pub progress: u8,
    pub status: String,
    pub icon: String,
}

/// Fields entered when adding a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub progress: u8,
    pub status: String,
    pub icon: String,
}

impl Draft for NewProject {
    type Record = ConstructionProject;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> ConstructionProject {
        ConstructionProject {
            id,
            name: self.name,
            progress: self.progress,
            status: self.status,
            icon: self.icon,
        }
    }
}

/// Overall progress: the mean of all project progresses, rounded half up.
///
/// An empty project list has no progress.
#[must_use]
pub fn average_progress(projects: &[ConstructionProject]) -> u8 {
    if projects.is_empty() {
        return 0;
    }
    let total: u32 = projects.iter().map(|p| u32::from(p.progress)).sum();
    let count = u32::try_from(projects.len()).unwrap_or(u32::MAX);
    // Integer half-up rounding of total / count.
    let rounded = (2 * total + count) / (2 * count);
    u8::try_from(rounded.min(u32::from(MAX_PROGRESS))).unwrap_or(MAX_PROGRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(progresses: &[u8]) -> Vec<ConstructionProject> {
        progresses
            .iter()
            .enumerate()
            .map(|(i, &progress)| ConstructionProject {
                id: i.to_string(),
                name: format!("Объект {i}"),
                progress,
                status: "В работе".to_string(),
                icon: "Building2".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_average_of_seeded_projects() {
        assert_eq!(average_progress(&projects(&[45, 30, 20, 60, 15, 25])), 33);
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average_progress(&projects(&[10, 11])), 11);
        assert_eq!(average_progress(&projects(&[10, 10, 11])), 10);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_progress(&[]), 0);
    }

    #[test]
    fn test_average_bounds() {
        assert_eq!(average_progress(&projects(&[100, 100])), 100);
        assert_eq!(average_progress(&projects(&[0])), 0);
    }
}
