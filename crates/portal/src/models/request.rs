use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Draft;

/// Roles a citizen can apply for on the request page.
pub const ROLE_OPTIONS: &[&str] = &[
    "Машинист метро",
    "Строитель метрополитена",
    "Диспетчер железнодорожный",
    "Проводник поезда",
    "Механик подвижного состава",
    "Путевой рабочий",
    "Электромеханик СЦБ",
    "Фермер",
    "Строитель",
    "Инженер",
    "Врач",
    "Учитель",
];

/// Review state of a role request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Heading used when requests are grouped by status.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Pending => "На рассмотрении",
            Self::Approved => "Одобрено",
            Self::Rejected => "Отклонено",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A citizen's application for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub id: String,
    pub name: String,
    pub desired_role: String,
    pub motivation: String,
    pub status: RequestStatus,
    pub date: DateTime<Utc>,
}

/// Fields entered on the request form. New requests are always pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRoleRequest {
    pub name: String,
    pub desired_role: String,
    pub motivation: String,
}

impl Draft for NewRoleRequest {
    type Record = RoleRequest;

    fn into_record(self, id: String, now: DateTime<Utc>) -> RoleRequest {
        RoleRequest {
            id,
            name: self.name,
            desired_role: self.desired_role,
            motivation: self.motivation,
            status: RequestStatus::Pending,
            date: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = NewRoleRequest {
            name: "Матвей".to_string(),
            desired_role: "Фермер".to_string(),
            motivation: "Люблю землю".to_string(),
        }
        .into_record("7".to_string(), Utc::now());

        assert_eq!(request.status, RequestStatus::Pending);
    }

    #[test]
    fn test_request_wire_format() {
        let request = NewRoleRequest {
            name: "Матвей".to_string(),
            desired_role: "Врач".to_string(),
            motivation: "Лечить".to_string(),
        }
        .into_record("7".to_string(), Utc::now());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["desiredRole"], "Врач");
        assert_eq!(json["status"], "pending");
    }
}
