//! Navigation shell: routes, the header with its menu, and the footer.

use std::fmt::{self, Write as _};

/// A page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Structure,
    Leadership,
    Army,
    News,
    Lubertsy,
    Metro,
    Construction,
    RequestRole,
    /// Any path that matches no page. Keeps the path as requested.
    NotFound(String),
}

impl Route {
    /// Resolve a path. Trailing slashes are ignored, so `/news/` is `/news`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        let normalized = if normalized.is_empty() { "/" } else { normalized };

        NAV_ITEMS
            .iter()
            .find(|item| item.path == normalized)
            .map_or_else(|| Self::NotFound(trimmed.to_string()), |item| item.route())
    }

    /// The canonical path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::Structure => "/structure",
            Self::Leadership => "/leadership",
            Self::Army => "/army",
            Self::News => "/news",
            Self::Lubertsy => "/lubertsy",
            Self::Metro => "/metro",
            Self::Construction => "/construction",
            Self::RequestRole => "/request-role",
            Self::NotFound(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

impl NavItem {
    fn route(self) -> Route {
        match self.path {
            "/structure" => Route::Structure,
            "/leadership" => Route::Leadership,
            "/army" => Route::Army,
            "/news" => Route::News,
            "/lubertsy" => Route::Lubertsy,
            "/metro" => Route::Metro,
            "/construction" => Route::Construction,
            "/request-role" => Route::RequestRole,
            _ => Route::Home,
        }
    }
}

pub const NAV_ITEMS: [NavItem; 9] = [
    NavItem { name: "Главная", path: "/", icon: "Home" },
    NavItem { name: "Структура власти", path: "/structure", icon: "Users" },
    NavItem { name: "Руководство", path: "/leadership", icon: "Crown" },
    NavItem { name: "Армия", path: "/army", icon: "Shield" },
    NavItem { name: "Новости", path: "/news", icon: "Newspaper" },
    NavItem { name: "Люберцы", path: "/lubertsy", icon: "Building2" },
    NavItem { name: "Метрополитен", path: "/metro", icon: "Train" },
    NavItem { name: "Строительство", path: "/construction", icon: "HardHat" },
    NavItem { name: "Запрос роли", path: "/request-role", icon: "FileText" },
];

pub const SITE_TITLE: &str = "ЦК КПСС";
pub const SITE_SUBTITLE: &str = "Официальный портал государства";
pub const FOOTER_COPYRIGHT: &str =
    "© 2025 Центральный Комитет Коммунистической Партии Советского Союза";
pub const FOOTER_MOTTO: &str = "Пролетарии всех стран, соединяйтесь!";

const RULE: &str = "════════════════════════════════════════════════════════════";

/// Frame `body` with the header, menu and footer.
///
/// The menu marks the active route; the logout control is shown only to an
/// administrator.
#[must_use]
pub fn render(route: &Route, body: &str, is_admin: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "☭ {SITE_TITLE}");
    let _ = writeln!(out, "  {SITE_SUBTITLE}");
    if is_admin {
        let _ = writeln!(out, "  [Выход]");
    }
    let _ = writeln!(out);

    for item in &NAV_ITEMS {
        let marker = if item.path == route.path() { '▶' } else { ' ' };
        let _ = writeln!(out, " {marker} {:<18} {}", item.name, item.path);
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);

    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{FOOTER_COPYRIGHT}");
    let _ = writeln!(out, "{FOOTER_MOTTO}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        for item in &NAV_ITEMS {
            assert_eq!(Route::parse(item.path).path(), item.path);
        }
        assert_eq!(Route::parse("/request-role"), Route::RequestRole);
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(Route::parse("/news/"), Route::News);
        assert_eq!(Route::parse("/army//"), Route::Army);
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            Route::parse("/kremlin"),
            Route::NotFound("/kremlin".to_string())
        );
        assert_eq!(
            Route::parse("/news/42"),
            Route::NotFound("/news/42".to_string())
        );
    }

    #[test]
    fn test_frame_marks_active_route() {
        let page = render(&Route::Metro, "тело", false);
        assert!(page.contains("▶ Метрополитен"));
        assert!(page.contains("тело"));
        assert!(page.contains(FOOTER_MOTTO));
        assert!(!page.contains("[Выход]"));
    }

    #[test]
    fn test_logout_control_for_admin() {
        let page = render(&Route::Home, "", true);
        assert!(page.contains("[Выход]"));
        assert!(page.contains(SITE_SUBTITLE));
    }
}
