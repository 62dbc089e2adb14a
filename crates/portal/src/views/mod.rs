//! Page view models.
//!
//! A [`Portal`] owns the store and the session gate. Each page loads a
//! snapshot from the store, renders it as text, and adds its admin edits as
//! methods on `Portal`. Edits check the session first and fail with
//! [`AdminRequired`](crate::Error::AdminRequired) without one. Empty
//! required fields fail with [`MissingField`](crate::Error::MissingField).
//! Either way nothing is written.

pub mod army;
pub mod construction;
pub mod edit;
pub mod gallery;
pub mod home;
pub mod leadership;
pub mod lubertsy;
pub mod metro;
pub mod news;
pub mod request_role;
pub mod structure;

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::session::{AuthProvider, Credentials, FixedCredentials, Session, SessionGate};
use crate::shell::{self, Route};
use crate::storage::KeyValueBackend;
use crate::store::{PortalStore, Setting};

pub use edit::EditState;

/// The store and session gate every page works against.
#[derive(Debug)]
pub struct Portal<B, P = FixedCredentials> {
    store: PortalStore<B>,
    gate: SessionGate<P>,
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    pub fn new(store: PortalStore<B>, gate: SessionGate<P>) -> Self {
        Self { store, gate }
    }

    pub fn store(&self) -> &PortalStore<B> {
        &self.store
    }

    /// Direct store access, bypassing the admin check.
    pub fn store_mut(&mut self) -> &mut PortalStore<B> {
        &mut self.store
    }

    /// # Errors
    ///
    /// Returns an error if the session flag cannot be written.
    pub fn login(&mut self, credentials: &Credentials) -> Result<bool> {
        self.gate.login(&mut self.store, credentials)
    }

    /// # Errors
    ///
    /// Returns an error if the session flag cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.gate.logout(&mut self.store)
    }

    /// # Errors
    ///
    /// Returns an error if the session flag cannot be read.
    pub fn is_admin(&self) -> Result<bool> {
        self.gate.is_authenticated(&self.store)
    }

    /// The current admin session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AdminRequired`] when nobody is logged in.
    pub fn admin(&self) -> Result<Session> {
        self.gate.require_admin(&self.store)
    }

    /// Replace a scalar setting from its textual form.
    ///
    /// # Errors
    ///
    /// Returns an error without a session or if the value is invalid.
    pub fn update_setting(&mut self, setting: Setting, value: &str) -> Result<()> {
        self.admin()?;
        self.store.set_setting(setting, value)
    }

    /// Load the page at `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn page(&self, route: &Route) -> Result<Page> {
        let admin = self.is_admin()?;
        let store = &self.store;
        debug!(route = route.path(), admin, "loading page");

        Ok(match route {
            Route::Home => Page::Home(home::HomePage::load(store, admin)?),
            Route::Structure => Page::Structure(structure::StructurePage::load(store, admin)?),
            Route::Leadership => Page::Leadership(leadership::LeadershipPage::load(store)?),
            Route::Army => Page::Army(army::ArmyPage::load(store, admin)?),
            Route::News => Page::News(news::NewsPage::load(store, admin, None)?),
            Route::Lubertsy => Page::Lubertsy(lubertsy::LubertsyPage::load(store, admin)?),
            Route::Metro => Page::Metro(metro::MetroPage::load(store, admin)?),
            Route::Construction => {
                Page::Construction(construction::ConstructionPage::load(store, admin)?)
            }
            Route::RequestRole => {
                Page::RequestRole(request_role::RequestRolePage::load(store, admin)?)
            }
            Route::NotFound(path) => Page::NotFound(NotFoundPage { path: path.clone() }),
        })
    }

    /// Render the page at `route` inside the navigation shell.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn render(&self, route: &Route) -> Result<String> {
        let page = self.page(route)?;
        Ok(shell::render(route, &page.to_string(), self.is_admin()?))
    }
}

/// A loaded page.
#[derive(Debug, Clone)]
pub enum Page {
    Home(home::HomePage),
    Structure(structure::StructurePage),
    Leadership(leadership::LeadershipPage),
    Army(army::ArmyPage),
    News(news::NewsPage),
    Lubertsy(lubertsy::LubertsyPage),
    Metro(metro::MetroPage),
    Construction(construction::ConstructionPage),
    RequestRole(request_role::RequestRolePage),
    NotFound(NotFoundPage),
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home(page) => fmt::Display::fmt(page, f),
            Self::Structure(page) => fmt::Display::fmt(page, f),
            Self::Leadership(page) => fmt::Display::fmt(page, f),
            Self::Army(page) => fmt::Display::fmt(page, f),
            Self::News(page) => fmt::Display::fmt(page, f),
            Self::Lubertsy(page) => fmt::Display::fmt(page, f),
            Self::Metro(page) => fmt::Display::fmt(page, f),
            Self::Construction(page) => fmt::Display::fmt(page, f),
            Self::RequestRole(page) => fmt::Display::fmt(page, f),
            Self::NotFound(page) => fmt::Display::fmt(page, f),
        }
    }
}

/// Shown for any path without a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundPage {
    pub path: String,
}

impl fmt::Display for NotFoundPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "404")?;
        writeln!(f, "Страница {} не найдена.", self.path)?;
        writeln!(f, "Вернуться на главную: /")
    }
}

/// Fail with [`crate::Error::MissingField`] unless every field has content.
pub(crate) fn require_all(fields: &[(&'static str, &str)]) -> Result<()> {
    for &(field, value) in fields {
        crate::error::require(field, value)?;
    }
    Ok(())
}

pub(crate) fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "─".repeat(title.chars().count()))
}

pub(crate) fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "■ {title}")
}

/// `[id] ` prefix so admins can address records from the command line.
pub(crate) fn id_tag(admin: bool, id: &str) -> String {
    if admin {
        format!("[{id}] ")
    } else {
        String::new()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_every_route_renders() {
        let portal = portal();
        for item in &shell::NAV_ITEMS {
            let route = Route::parse(item.path);
            let text = portal.render(&route).unwrap();
            assert!(text.contains(shell::FOOTER_COPYRIGHT), "{}", item.path);
        }
    }

    #[test]
    fn test_unknown_route_renders_not_found() {
        let text = portal().render(&Route::parse("/missing")).unwrap();
        assert!(text.contains("404"));
        assert!(text.contains("/missing"));
    }

    #[test]
    fn test_update_setting_requires_admin() {
        let mut portal = portal();
        assert_admin_required(portal.update_setting(Setting::ServerIp, "x:1"));
        assert_eq!(
            portal.store().setting(Setting::ServerIp).unwrap(),
            crate::store::defaults::SERVER_IP
        );
    }

    #[test]
    fn test_update_setting_as_admin() {
        let mut portal = admin_portal();
        portal
            .update_setting(Setting::ServerIp, "play.example:25565")
            .unwrap();
        let text = portal.render(&Route::Home).unwrap();
        assert!(text.contains("play.example:25565"));
        assert!(text.contains("[Выход]"));
    }

    #[test]
    fn test_logout_ends_admin_rendering() {
        let mut portal = admin_portal();
        portal.logout().unwrap();
        assert!(!portal.is_admin().unwrap());
        assert!(!portal.render(&Route::Home).unwrap().contains("[Выход]"));
    }

    #[test]
    fn test_require_all_names_first_empty_field() {
        let err = require_all(&[("name", "Иван"), ("role", "  "), ("bio", "")]).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "role" }));
    }
}
