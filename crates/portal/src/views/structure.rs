//! The full roster, grouped by role category.

use std::fmt;

use tracing::info;

use super::{heading, id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{NewPerson, Person, RoleCategory};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructurePage {
    /// Every category in display order, each with its people in stored order.
    pub groups: Vec<(RoleCategory, Vec<Person>)>,
    admin: bool,
}

impl StructurePage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let people = store.all(collection::PEOPLE)?;
        let groups = RoleCategory::ALL
            .into_iter()
            .map(|category| {
                let members = people
                    .iter()
                    .filter(|person| person.category() == category)
                    .cloned()
                    .collect();
                (category, members)
            })
            .collect();
        Ok(Self { groups, admin })
    }

    /// People in `category`.
    #[must_use]
    pub fn group(&self, category: RoleCategory) -> &[Person] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, people)| people.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for StructurePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Структура власти")?;
        for (category, people) in &self.groups {
            if people.is_empty() {
                continue;
            }
            section(f, category.title())?;
            for person in people {
                writeln!(
                    f,
                    "  {}{} ({})",
                    id_tag(self.admin, &person.id),
                    person.name,
                    person.role
                )?;
                if !person.description.is_empty() {
                    writeln!(f, "      {}", person.description)?;
                }
            }
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Add a person. Name and role are required.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty required field, or
    /// if the store cannot be written.
    pub fn add_person(&mut self, person: NewPerson) -> Result<Person> {
        self.admin()?;
        require_all(&[("name", person.name.as_str()), ("role", person.role.as_str())])?;
        let person = self.store_mut().add(collection::PEOPLE, person)?;
        info!(id = person.id.as_str(), role = person.role.as_str(), "person added");
        Ok(person)
    }

    /// Replace a person's details.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty required field, or
    /// if the store cannot be written.
    pub fn update_person(&mut self, person: Person) -> Result<bool> {
        self.admin()?;
        require_all(&[("name", person.name.as_str()), ("role", person.role.as_str())])?;
        self.store_mut().update(collection::PEOPLE, person)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_person(&mut self, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut().delete(collection::PEOPLE, id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;

    fn draft(name: &str, role: &str) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            role: role.to_string(),
            ..NewPerson::default()
        }
    }

    #[test]
    fn test_seeded_groups() {
        let page = StructurePage::load(portal().store(), false).unwrap();

        let names = |category| -> Vec<String> {
            page.group(category).iter().map(|p| p.name.clone()).collect()
        };
        assert_eq!(names(RoleCategory::Leadership), vec!["Сталин", "Алексей"]);
        assert_eq!(names(RoleCategory::City), vec!["Вагнер", "Илья"]);
        assert_eq!(names(RoleCategory::Ministry), vec!["Денис", "Даня", "Блохин"]);
        assert_eq!(page.group(RoleCategory::Citizen).len(), 5);
    }

    #[test]
    fn test_groups_render_in_order() {
        let text = StructurePage::load(portal().store(), false)
            .unwrap()
            .to_string();
        let leadership = text.find("Высшее руководство").unwrap();
        let city = text.find("Главы городов").unwrap();
        let ministry = text.find("Народные комиссариаты").unwrap();
        let citizens = text.find("Граждане").unwrap();
        assert!(leadership < city && city < ministry && ministry < citizens);
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_admin_sees_ids() {
        let text = StructurePage::load(admin_portal().store(), true)
            .unwrap()
            .to_string();
        assert!(text.contains("[1] Сталин"));
    }

    #[test]
    fn test_add_person_lands_in_category() {
        let mut portal = admin_portal();
        let added = portal
            .add_person(draft("Пётр", "Глава города Энгельс"))
            .unwrap();

        let page = StructurePage::load(portal.store(), true).unwrap();
        assert_eq!(page.group(RoleCategory::City).last(), Some(&added));
    }

    #[test]
    fn test_add_person_requires_name_and_role() {
        let mut portal = admin_portal();
        assert!(portal
            .add_person(draft("", "Гражданин"))
            .unwrap_err()
            .is_missing_field());
        assert!(portal
            .add_person(draft("Пётр", " "))
            .unwrap_err()
            .is_missing_field());
        assert_eq!(portal.store().all(collection::PEOPLE).unwrap().len(), 12);
    }

    #[test]
    fn test_update_and_delete_person() {
        let mut portal = admin_portal();
        let mut egor = portal.store().find(collection::PEOPLE, "8").unwrap().unwrap();
        egor.role = "НарКом Культуры".to_string();

        assert!(portal.update_person(egor).unwrap());
        let page = StructurePage::load(portal.store(), true).unwrap();
        assert!(page
            .group(RoleCategory::Ministry)
            .iter()
            .any(|p| p.name == "Егор"));

        assert!(portal.delete_person("8").unwrap());
        assert!(!portal.delete_person("8").unwrap());
    }

    #[test]
    fn test_person_edits_require_admin() {
        let mut portal = portal();
        assert_admin_required(portal.add_person(draft("Пётр", "Гражданин")));
        assert_admin_required(portal.delete_person("1"));
        assert_eq!(portal.store().all(collection::PEOPLE).unwrap().len(), 12);
    }
}
