//! Persistence key names.
//!
//! These match the keys written by the browser front end bit for bit, so a
//! dump of its local storage can be loaded unchanged.

pub const PEOPLE: &str = "people";
pub const NEWS: &str = "news";
pub const ROLE_REQUESTS: &str = "roleRequests";
pub const IMPORTANT_ANNOUNCEMENT: &str = "importantAnnouncement";
pub const SERVER_IP: &str = "serverIP";
pub const CITY_NEWS: &str = "cityNews";
pub const CITY_PHOTOS: &str = "cityPhotos";
pub const CONSTRUCTION_STATUS: &str = "constructionStatus";
pub const CONSTRUCTION_PROGRESS: &str = "constructionProgress";
pub const CONSTRUCTION_START_DATE: &str = "constructionStartDate";
pub const METRO_STATIONS: &str = "metroStations";
pub const METRO_LINES: &str = "metroLines";
pub const METRO_DESCRIPTION: &str = "metroDescription";
pub const METRO_PHOTOS: &str = "metroPhotos";
pub const CONSTRUCTION_PROJECTS: &str = "constructionProjects";
pub const CONSTRUCTION_PHOTOS: &str = "constructionPhotos";
pub const ARMY_UNITS: &str = "armyUnits";
pub const ARMY_STATS: &str = "armyStats";
pub const ARMY_DESCRIPTION: &str = "armyDescription";
pub const CITY_DESCRIPTION: &str = "cityDescription";
pub const LEADERSHIP_DESCRIPTION: &str = "leadershipDescription";

/// Administrator session flag.
pub const ADMIN_FLAG: &str = "isAdmin";

/// Every content key, in seeding order. The session flag is not content.
pub const ALL: &[&str] = &[
    PEOPLE,
    NEWS,
    ROLE_REQUESTS,
    IMPORTANT_ANNOUNCEMENT,
    SERVER_IP,
    CITY_NEWS,
    CITY_PHOTOS,
    CONSTRUCTION_STATUS,
    CONSTRUCTION_PROGRESS,
    CONSTRUCTION_START_DATE,
    METRO_STATIONS,
    METRO_LINES,
    METRO_DESCRIPTION,
    METRO_PHOTOS,
    CONSTRUCTION_PROJECTS,
    CONSTRUCTION_PHOTOS,
    ARMY_UNITS,
    ARMY_STATS,
    ARMY_DESCRIPTION,
    CITY_DESCRIPTION,
    LEADERSHIP_DESCRIPTION,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let unique: std::collections::HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
        assert!(!ALL.contains(&ADMIN_FLAG));
    }
}
