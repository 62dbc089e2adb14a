//! Photo galleries shared by the city, metro and construction pages.

use std::fmt;

use tracing::info;

use super::{id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{NewPhoto, Photo, PhotoAlbum};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub album: PhotoAlbum,
    pub photos: Vec<Photo>,
    admin: bool,
}

impl Gallery {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(
        store: &PortalStore<B>,
        album: PhotoAlbum,
        admin: bool,
    ) -> Result<Self> {
        Ok(Self {
            album,
            photos: store.all(collection::photos(album))?,
            admin,
        })
    }

    fn title(&self) -> &'static str {
        match self.album {
            PhotoAlbum::City | PhotoAlbum::Construction => "Галерея строительства",
            PhotoAlbum::Metro => "Фотографии метрополитена",
        }
    }
}

impl fmt::Display for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, self.title())?;
        if self.photos.is_empty() {
            return writeln!(f, "  Фотографий пока нет");
        }
        for photo in &self.photos {
            let tag = id_tag(self.admin, &photo.id);
            match &photo.title {
                Some(title) => writeln!(f, "  {tag}{title}: {}", photo.url)?,
                None => writeln!(f, "  {tag}{}", photo.url)?,
            }
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// Add a photo to `album`. The URL is required.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, if the URL is empty, or if the
    /// store cannot be written.
    pub fn add_photo(&mut self, album: PhotoAlbum, photo: NewPhoto) -> Result<Photo> {
        self.admin()?;
        require_all(&[("url", photo.url.as_str())])?;
        let photo = self.store_mut().add(collection::photos(album), photo)?;
        info!(album = album.as_str(), id = photo.id.as_str(), "photo added");
        Ok(photo)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn delete_photo(&mut self, album: PhotoAlbum, id: &str) -> Result<bool> {
        self.admin()?;
        self.store_mut().delete(collection::photos(album), id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;

    fn photo(url: &str) -> NewPhoto {
        NewPhoto {
            url: url.to_string(),
            title: Some("Котлован".to_string()),
        }
    }

    #[test]
    fn test_add_and_delete_photo() {
        let mut portal = admin_portal();
        let added = portal
            .add_photo(PhotoAlbum::Construction, photo("https://img.example/pit.jpg"))
            .unwrap();

        let gallery = Gallery::load(portal.store(), PhotoAlbum::Construction, true).unwrap();
        assert_eq!(gallery.photos, vec![added.clone()]);
        assert!(gallery.to_string().contains("Котлован: https://img.example/pit.jpg"));

        // Other albums are untouched.
        assert!(Gallery::load(portal.store(), PhotoAlbum::City, true)
            .unwrap()
            .photos
            .is_empty());

        assert!(portal.delete_photo(PhotoAlbum::Construction, &added.id).unwrap());
        assert!(!portal.delete_photo(PhotoAlbum::Construction, &added.id).unwrap());
    }

    #[test]
    fn test_photo_url_required() {
        let mut portal = admin_portal();
        let err = portal.add_photo(PhotoAlbum::Metro, photo(" ")).unwrap_err();
        assert!(err.is_missing_field());
        assert!(portal
            .store()
            .all(collection::METRO_PHOTOS)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_photo_edits_require_admin() {
        let mut portal = portal();
        assert_admin_required(portal.add_photo(PhotoAlbum::City, photo("https://x/y.png")));
        assert_admin_required(portal.delete_photo(PhotoAlbum::City, "1"));
    }

    #[test]
    fn test_empty_gallery_message() {
        let gallery = Gallery::load(portal().store(), PhotoAlbum::Metro, false).unwrap();
        assert!(gallery.to_string().contains("Фотографий пока нет"));
    }
}
