//! Scalar settings: single values persisted under their own keys.

use std::str::FromStr;

use super::keys;
use crate::error::Error;

/// A named scalar setting.
///
/// Most settings are plain text stored raw. Construction progress and army
/// stats are structured and stored as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Announcement,
    ServerIp,
    ConstructionStatus,
    ConstructionProgress,
    ConstructionStartDate,
    MetroStations,
    MetroLines,
    MetroDescription,
    ArmyStats,
    ArmyDescription,
    CityDescription,
    LeadershipDescription,
}

impl Setting {
    pub const ALL: [Self; 12] = [
        Self::Announcement,
        Self::ServerIp,
        Self::ConstructionStatus,
        Self::ConstructionProgress,
        Self::ConstructionStartDate,
        Self::MetroStations,
        Self::MetroLines,
        Self::MetroDescription,
        Self::ArmyStats,
        Self::ArmyDescription,
        Self::CityDescription,
        Self::LeadershipDescription,
    ];

    /// The persistence key, also used as the setting's name on the CLI.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Announcement => keys::IMPORTANT_ANNOUNCEMENT,
            Self::ServerIp => keys::SERVER_IP,
            Self::ConstructionStatus => keys::CONSTRUCTION_STATUS,
            Self::ConstructionProgress => keys::CONSTRUCTION_PROGRESS,
            Self::ConstructionStartDate => keys::CONSTRUCTION_START_DATE,
            Self::MetroStations => keys::METRO_STATIONS,
            Self::MetroLines => keys::METRO_LINES,
            Self::MetroDescription => keys::METRO_DESCRIPTION,
            Self::ArmyStats => keys::ARMY_STATS,
            Self::ArmyDescription => keys::ARMY_DESCRIPTION,
            Self::CityDescription => keys::CITY_DESCRIPTION,
            Self::LeadershipDescription => keys::LEADERSHIP_DESCRIPTION,
        }
    }

    /// Whether the value is JSON rather than raw text.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(self, Self::ConstructionProgress | Self::ArmyStats)
    }

    /// Look up the setting stored under `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|setting| setting.key() == key)
    }
}

impl std::fmt::Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Setting {
    type Err = Error;

    /// Case-insensitive match on the key name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|setting| setting.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSetting(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_from_str() {
        assert_eq!("serverIP".parse::<Setting>().unwrap(), Setting::ServerIp);
        assert_eq!("serverip".parse::<Setting>().unwrap(), Setting::ServerIp);
        assert!(matches!(
            "people".parse::<Setting>(),
            Err(Error::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_every_setting_key_is_known() {
        for setting in Setting::ALL {
            assert!(keys::ALL.contains(&setting.key()), "{setting}");
            assert_eq!(Setting::from_key(setting.key()), Some(setting));
        }
    }

    #[test]
    fn test_structured_settings() {
        assert!(Setting::ArmyStats.is_structured());
        assert!(Setting::ConstructionProgress.is_structured());
        assert!(!Setting::Announcement.is_structured());
    }
}
