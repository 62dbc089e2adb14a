use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;

/// An official or citizen listed on the structure page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Person {
    /// Display category derived from the role text.
    #[must_use]
    pub fn category(&self) -> RoleCategory {
        RoleCategory::from_role(&self.role)
    }

    /// Whether the role text contains `needle`.
    #[must_use]
    pub fn holds(&self, needle: &str) -> bool {
        self.role.contains(needle)
    }
}

/// Fields entered when adding a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub role: String,
    pub description: String,
    pub avatar: Option<String>,
}

impl Draft for NewPerson {
    type Record = Person;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Person {
        Person {
            id,
            name: self.name,
            role: self.role,
            description: self.description,
            avatar: self.avatar,
        }
    }
}

/// Where a person is listed, derived from their role by substring match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// General secretary and deputies.
    Leadership,
    /// Heads of cities and municipal formations.
    City,
    /// People's commissars and department chiefs.
    Ministry,
    /// Everyone else.
    Citizen,
}

impl RoleCategory {
    /// Display order on the structure page.
    pub const ALL: [Self; 4] = [Self::Leadership, Self::City, Self::Ministry, Self::Citizen];

    /// Classify a role. Earlier rules win: a deputy head is leadership.
    #[must_use]
    pub fn from_role(role: &str) -> Self {
        if role.contains("ГенСек") || role.contains("Зам") {
            Self::Leadership
        } else if role.contains("Глава") {
            Self::City
        } else if role.contains("НарКом") || role.contains("Начальник") {
            Self::Ministry
        } else {
            Self::Citizen
        }
    }

    /// Section heading for this category.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Leadership => "Высшее руководство",
            Self::City => "Главы городов",
            Self::Ministry => "Народные комиссариаты",
            Self::Citizen => "Граждане",
        }
    }
}

impl std::fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leadership => write!(f, "leadership"),
            Self::City => write!(f, "city"),
            Self::Ministry => write!(f, "ministry"),
            Self::Citizen => write!(f, "citizen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_categories() {
        assert_eq!(
            RoleCategory::from_role("ГенСек ЦК КПСС"),
            RoleCategory::Leadership
        );
        assert_eq!(
            RoleCategory::from_role("Глава города Люберцы"),
            RoleCategory::City
        );
        assert_eq!(RoleCategory::from_role("НарКом Армии"), RoleCategory::Ministry);
        assert_eq!(RoleCategory::from_role("Гражданин"), RoleCategory::Citizen);
    }

    #[test]
    fn test_role_category_precedence() {
        assert_eq!(
            RoleCategory::from_role("1й Зам ГенСека ЦК КПСС"),
            RoleCategory::Leadership
        );
        assert_eq!(
            RoleCategory::from_role("Начальник Метрополитена"),
            RoleCategory::Ministry
        );
        assert_eq!(RoleCategory::from_role(""), RoleCategory::Citizen);
    }

    #[test]
    fn test_person_without_avatar_omits_field() {
        let person = NewPerson {
            name: "Егор".to_string(),
            role: "Гражданин".to_string(),
            description: "Гражданин СССР".to_string(),
            avatar: None,
        }
        .into_record("42".to_string(), Utc::now());

        let json = serde_json::to_string(&person).unwrap();
        assert!(!json.contains("avatar"));
        assert_eq!(person.category(), RoleCategory::Citizen);
    }

    #[test]
    fn test_person_decodes_browser_json() {
        let json = r#"{"id":"6","name":"Даня","role":"НарКом Армии","description":"Народный комиссар"}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert!(person.holds("НарКом Армии"));
        assert!(person.avatar.is_none());
    }
}
