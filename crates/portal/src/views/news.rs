use std::fmt;

use tracing::info;

use super::{heading, id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{NewNews, NewsCategory, NewsItem};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore};

/// State news, newest first, optionally narrowed to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    pub filter: Option<NewsCategory>,
    admin: bool,
}

impl NewsPage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(
        store: &PortalStore<B>,
        admin: bool,
        filter: Option<NewsCategory>,
    ) -> Result<Self> {
        let items = store
            .all(collection::NEWS)?
            .into_iter()
            .filter(|item| filter.map_or(true, |category| item.category == category))
            .collect();
        Ok(Self {
            items,
            filter,
            admin,
        })
    }
}

impl fmt::Display for NewsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Новости государства")?;
        if let Some(category) = self.filter {
            writeln!(f, "Категория: {category}")?;
        }
        if self.items.is_empty() {
            writeln!(f)?;
            return writeln!(f, "Новостей пока нет");
        }
        for item in &self.items {
            section(f, &format!("{}{}", id_tag(self.admin, &item.id), item.title))?;
            writeln!(
                f,
                "  [{}] {} · {}",
                item.category.icon(),
                item.category,
                item.date.format("%d.%m.%Y")
            )?;
            writeln!(f, "  {}", item.content)?;
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Publish a news item at the top of the feed. Title and content are
    /// required.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on an empty required field, or
    /// if the store cannot be written.
    pub fn publish_news(&mut self, news: NewNews) -> Result<NewsItem> {
        self.admin()?;
        require_all(&[
            ("title", news.title.as_str()),
            ("content", news.content.as_str()),
        ])?;
        let item = self.store_mut().add(collection::NEWS, news)?;
        info!(id = item.id.as_str(), category = item.category.as_str(), "news published");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_news(&mut self, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut().delete(collection::NEWS, id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;

    fn draft(title: &str, category: NewsCategory) -> NewNews {
        NewNews {
            title: title.to_string(),
            content: "Подробности".to_string(),
            category,
        }
    }

    #[test]
    fn test_published_news_comes_first() {
        let mut portal = admin_portal();
        portal
            .publish_news(draft("Открыта станция", NewsCategory::Transport))
            .unwrap();

        let page = NewsPage::load(portal.store(), true, None).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].title, "Открыта станция");
        assert!(page.to_string().contains("[Train] транспорт"));
    }

    #[test]
    fn test_category_filter() {
        let page = NewsPage::load(portal().store(), false, Some(NewsCategory::Politics)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].category, NewsCategory::Politics);

        let empty = NewsPage::load(portal().store(), false, Some(NewsCategory::Culture)).unwrap();
        assert!(empty.items.is_empty());
        assert!(empty.to_string().contains("Новостей пока нет"));
    }

    #[test]
    fn test_publish_requires_title_and_content() {
        let mut portal = admin_portal();
        let mut news = draft("Заголовок", NewsCategory::Culture);
        news.content = String::new();

        assert!(portal.publish_news(news).unwrap_err().is_missing_field());
        assert_eq!(portal.store().all(collection::NEWS).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_news() {
        let mut portal = admin_portal();
        assert!(portal.delete_news("1").unwrap());
        assert!(!portal.delete_news("1").unwrap());
        assert_eq!(portal.store().all(collection::NEWS).unwrap().len(), 1);
    }

    #[test]
    fn test_news_edits_require_admin() {
        let mut portal = portal();
        assert_admin_required(portal.publish_news(draft("x", NewsCategory::Politics)));
        assert_admin_required(portal.delete_news("1"));
    }
}
