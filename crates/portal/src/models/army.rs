use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;

/// A branch of the armed forces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyUnit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArmyUnit {
    pub name: String,
    pub icon: String,
    pub status: String,
}

impl Draft for NewArmyUnit {
    type Record = ArmyUnit;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> ArmyUnit {
        ArmyUnit {
            id,
            name: self.name,
            icon: self.icon,
            status: self.status,
        }
    }
}

/// Headline numbers on the army page. Stored as one JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyStats {
    pub soldiers: u32,
    pub units: u32,
}

impl Default for ArmyStats {
    fn default() -> Self {
        Self {
            soldiers: 12,
            units: 3,
        }
    }
}
