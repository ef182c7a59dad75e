// SPDX-License-Identifier: MPL-2.0
//! Image registry for managing the list of opened images and the selection.
//!
//! The registry is the single source of truth for which images are open and
//! which one is selected. It performs no I/O.

use crate::domain::media::ImageRef;
use crate::error::{Error, Result};
use tracing::debug;

/// Ordered set of image references plus an optional selection.
///
/// The selection is always either absent or a member of the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageRegistry {
    images: Vec<ImageRef>,
    selected: Option<ImageRef>,
}

impl ImageRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `image` unless it is already present.
    ///
    /// Returns whether it was inserted. The selection is not changed.
    pub fn insert(&mut self, image: ImageRef) -> bool {
        if self.contains(&image) {
            return false;
        }
        debug!(image = %image, "image registered");
        self.images.push(image);
        true
    }

    /// Removes `image` if present, clearing the selection if it was selected.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, image: &ImageRef) -> bool {
        let Some(index) = self.position(image) else {
            return false;
        };
        self.images.remove(index);
        if self.selected.as_ref() == Some(image) {
            self.selected = None;
        }
        debug!(image = %image, "image removed");
        true
    }

    /// Empties the registry and clears the selection.
    pub fn clear(&mut self) {
        self.images.clear();
        self.selected = None;
    }

    /// Sets the selection to `image`, or clears it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] without changing anything if `image`
    /// is not in the registry.
    pub fn select(&mut self, image: Option<ImageRef>) -> Result<()> {
        if let Some(candidate) = &image {
            if !self.contains(candidate) {
                return Err(Error::NotRegistered(candidate.path().to_path_buf()));
            }
        }
        self.selected = image;
        Ok(())
    }

    /// Returns the image at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn get_by_index(&self, index: usize) -> Result<&ImageRef> {
        self.images.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.images.len(),
        })
    }

    /// Returns all images in insertion order.
    pub fn all(&self) -> &[ImageRef] {
        &self.images
    }

    /// Returns the selected image, if any.
    pub fn selected(&self) -> Option<&ImageRef> {
        self.selected.as_ref()
    }

    /// Returns the position of the selected image, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.as_ref().and_then(|image| self.position(image))
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.images.contains(image)
    }

    pub fn position(&self, image: &ImageRef) -> Option<usize> {
        self.images.iter().position(|candidate| candidate == image)
    }

    /// Returns the total number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Checks if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageRef {
        ImageRef::from(format!("/photos/{name}").as_str())
    }

    fn registry_with(names: &[&str]) -> ImageRegistry {
        let mut registry = ImageRegistry::new();
        for name in names {
            registry.insert(image(name));
        }
        registry
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ImageRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn insert_appends_in_order() {
        let registry = registry_with(&["a.jpg", "b.png", "c.jpg"]);
        assert_eq!(registry.all(), &[image("a.jpg"), image("b.png"), image("c.jpg")]);
    }

    #[test]
    fn insert_is_idempotent_under_duplicates() {
        let mut registry = ImageRegistry::new();
        assert!(registry.insert(image("a.jpg")));
        assert!(!registry.insert(image("a.jpg")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn insert_does_not_change_selection() {
        let mut registry = registry_with(&["a.jpg"]);
        registry.select(Some(image("a.jpg"))).expect("member");
        registry.insert(image("b.jpg"));
        assert_eq!(registry.selected(), Some(&image("a.jpg")));
    }

    #[test]
    fn removing_selected_image_clears_selection() {
        let mut registry = registry_with(&["a.jpg", "b.jpg"]);
        registry.select(Some(image("b.jpg"))).expect("member");

        assert!(registry.remove(&image("b.jpg")));
        assert_eq!(registry.selected(), None);
        assert_eq!(registry.all(), &[image("a.jpg")]);
    }

    #[test]
    fn removing_other_image_keeps_selection() {
        let mut registry = registry_with(&["a.jpg", "b.jpg"]);
        registry.select(Some(image("b.jpg"))).expect("member");

        registry.remove(&image("a.jpg"));
        assert_eq!(registry.selected(), Some(&image("b.jpg")));
        assert_eq!(registry.selected_index(), Some(0));
    }

    #[test]
    fn removing_absent_image_is_a_no_op() {
        let mut registry = registry_with(&["a.jpg"]);
        let before = registry.clone();
        assert!(!registry.remove(&image("zzz.jpg")));
        assert_eq!(registry, before);
    }

    #[test]
    fn clear_empties_and_deselects() {
        let mut registry = registry_with(&["a.jpg", "b.jpg"]);
        registry.select(Some(image("a.jpg"))).expect("member");

        registry.clear();
        assert!(registry.all().is_empty());
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn selecting_non_member_is_rejected_without_change() {
        let mut registry = registry_with(&["a.jpg"]);
        registry.select(Some(image("a.jpg"))).expect("member");

        let err = registry.select(Some(image("ghost.jpg"))).expect_err("not a member");
        assert!(err.is_contract_violation());
        assert_eq!(registry.selected(), Some(&image("a.jpg")));
    }

    #[test]
    fn selecting_none_clears_selection() {
        let mut registry = registry_with(&["a.jpg"]);
        registry.select(Some(image("a.jpg"))).expect("member");
        registry.select(None).expect("absent is always allowed");
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn get_by_index_checks_bounds() {
        let registry = registry_with(&["a.jpg", "b.jpg"]);
        assert_eq!(registry.get_by_index(1), Ok(&image("b.jpg")));
        assert_eq!(
            registry.get_by_index(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }
}
