//! Values written on first use of a fresh namespace.

use chrono::{DateTime, Utc};

use super::keys;
use super::settings::Setting;
use crate::error::Result;
use crate::models::{
    average_progress, ArmyStats, ArmyUnit, ConstructionProject, NewsCategory, NewsItem, Person,
    Photo, RoleRequest,
};

pub const ANNOUNCEMENT: &str = "Добро пожаловать на официальный портал ЦК КПСС! Городской округ Люберцы находится в активной стадии строительства.";
pub const SERVER_IP: &str = "3PM3511.aternos.me:51574";
pub const CONSTRUCTION_STATUS: &str = "активно";
pub const CONSTRUCTION_START_DATE: &str = "2025-01-15";
pub const METRO_STATIONS: &str = "Люберцы";
pub const METRO_LINES: &str = "Красная линия";
pub const METRO_DESCRIPTION: &str = "Метрополитен ЦК КПСС соединяет жилые кварталы Люберец с промышленными районами. Первая станция строится на Красной линии.";
pub const ARMY_DESCRIPTION: &str = "Вооружённые силы ЦК КПСС стоят на страже мирного труда граждан и обороняют рубежи государства.";
pub const CITY_DESCRIPTION: &str = "Городской округ Люберцы — первый город государства, где ведётся строительство жилых кварталов, метрополитена и промышленности.";
pub const LEADERSHIP_DESCRIPTION: &str = "Центральный Комитет КПСС — высший орган партийной власти, определяющий политику государства.";

fn person(id: &str, name: &str, role: &str, description: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        avatar: None,
    }
}

/// The founding roster.
#[must_use]
pub fn people() -> Vec<Person> {
    let citizen = "Гражданин СССР";
    vec![
        person("1", "Сталин", "ГенСек ЦК КПСС", "Генеральный Секретарь Центрального Комитета Коммунистической Партии Советского Союза"),
        person("2", "Алексей", "1й Зам ГенСека ЦК КПСС", "Первый Заместитель Генерального Секретаря"),
        person("3", "Вагнер", "Глава города Люберцы", "Руководитель городского образования Люберцы"),
        person("4", "Илья", "Глава Городского Образования \"Энгельс\"", "Руководитель городского образования Энгельс"),
        person("5", "Денис", "Начальник Метрополитена", "Руководитель городского метрополитена"),
        person("6", "Даня", "НарКом Армии", "Народный комиссар вооружённых сил"),
        person("7", "Блохин", "НарКом ТяжПрома", "Народный комиссар тяжёлой промышленности"),
        person("8", "Егор", "Гражданин", citizen),
        person("9", "Седой", "Гражданин", citizen),
        person("10", "Матвей", "Гражданин", citizen),
        person("11", "Беляев", "Гражданин", citizen),
        person("12", "ТВ", "Гражданин", citizen),
    ]
}

/// Two launch announcements, dated at seeding time.
#[must_use]
pub fn news(now: DateTime<Utc>) -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "1".to_string(),
            title: "Запуск официального портала государства".to_string(),
            content: "Открыт официальный информационный портал ЦК КПСС для граждан и администрации."
                .to_string(),
            category: NewsCategory::Technology,
            date: now,
        },
        NewsItem {
            id: "2".to_string(),
            title: "Утверждён государственный гимн ЦК КПСС".to_string(),
            content: "Центральным Комитетом утверждён официальный гимн государства.".to_string(),
            category: NewsCategory::Politics,
            date: now,
        },
    ]
}

#[must_use]
pub fn construction_projects() -> Vec<ConstructionProject> {
    [
        ("1", "Жилой квартал №1 (Люберцы)", 45, "Building2"),
        ("2", "Станция метро \"Люберцы\"", 30, "Train"),
        ("3", "Промышленный комплекс", 20, "Factory"),
        ("4", "Городская площадь", 60, "Landmark"),
        ("5", "Электростанция", 15, "Zap"),
        ("6", "Железнодорожная ветка", 25, "Route"),
    ]
    .into_iter()
    .map(|(id, name, progress, icon)| ConstructionProject {
        id: id.to_string(),
        name: name.to_string(),
        progress,
        status: "В работе".to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

#[must_use]
pub fn army_units() -> Vec<ArmyUnit> {
    [
        ("1", "Сухопутные войска", "Users", "Активны"),
        ("2", "ПВО", "Shield", "Готовность"),
        ("3", "Инженерные войска", "HardHat", "Активны"),
    ]
    .into_iter()
    .map(|(id, name, icon, status)| ArmyUnit {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        status: status.to_string(),
    })
    .collect()
}

/// City progress seeds from the projects so both pages agree on first run.
#[must_use]
pub fn construction_progress() -> u8 {
    average_progress(&construction_projects())
}

/// Default for a plain-text setting, or `None` for structured ones.
#[must_use]
pub fn text(setting: Setting) -> Option<&'static str> {
    match setting {
        Setting::Announcement => Some(ANNOUNCEMENT),
        Setting::ServerIp => Some(SERVER_IP),
        Setting::ConstructionStatus => Some(CONSTRUCTION_STATUS),
        Setting::ConstructionStartDate => Some(CONSTRUCTION_START_DATE),
        Setting::MetroStations => Some(METRO_STATIONS),
        Setting::MetroLines => Some(METRO_LINES),
        Setting::MetroDescription => Some(METRO_DESCRIPTION),
        Setting::ArmyDescription => Some(ARMY_DESCRIPTION),
        Setting::CityDescription => Some(CITY_DESCRIPTION),
        Setting::LeadershipDescription => Some(LEADERSHIP_DESCRIPTION),
        Setting::ConstructionProgress | Setting::ArmyStats => None,
    }
}

/// The stored form of the default for `key`, or `None` for unknown keys.
///
/// # Errors
///
/// Returns an error if a default cannot be encoded.
pub fn encoded(key: &str, now: DateTime<Utc>) -> Result<Option<String>> {
    let empty_photos: Vec<Photo> = Vec::new();
    let empty_requests: Vec<RoleRequest> = Vec::new();

    let value = match key {
        keys::PEOPLE => serde_json::to_string(&people())?,
        keys::NEWS => serde_json::to_string(&news(now))?,
        keys::ROLE_REQUESTS => serde_json::to_string(&empty_requests)?,
        keys::CITY_NEWS | keys::CITY_PHOTOS | keys::METRO_PHOTOS | keys::CONSTRUCTION_PHOTOS => {
            serde_json::to_string(&empty_photos)?
        }
        keys::CONSTRUCTION_PROJECTS => serde_json::to_string(&construction_projects())?,
        keys::ARMY_UNITS => serde_json::to_string(&army_units())?,
        keys::CONSTRUCTION_PROGRESS => serde_json::to_string(&construction_progress())?,
        keys::ARMY_STATS => serde_json::to_string(&ArmyStats::default())?,
        other => match Setting::from_key(other).and_then(text) {
            Some(text) => text.to_string(),
            None => return Ok(None),
        },
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_default() {
        let now = Utc::now();
        for key in keys::ALL {
            assert!(encoded(key, now).unwrap().is_some(), "no default for {key}");
        }
        assert!(encoded("unknown", now).unwrap().is_none());
        assert!(encoded(keys::ADMIN_FLAG, now).unwrap().is_none());
    }

    #[test]
    fn test_seeded_progress_matches_projects() {
        assert_eq!(construction_progress(), 33);
        assert_eq!(
            encoded(keys::CONSTRUCTION_PROGRESS, Utc::now())
                .unwrap()
                .as_deref(),
            Some("33")
        );
    }

    #[test]
    fn test_roster_ids_are_unique() {
        let people = people();
        let ids: std::collections::HashSet<_> = people.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_plain_text_defaults_are_stored_raw() {
        assert_eq!(
            encoded(keys::METRO_LINES, Utc::now()).unwrap().as_deref(),
            Some("Красная линия")
        );
    }
}
