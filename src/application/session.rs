// SPDX-License-Identifier: MPL-2.0
//! Session combining the image registry with the data derived from the
//! selected image.
//!
//! Every call runs to completion before returning. File info, tags and GPS
//! block are recomputed when the selection changes and dropped when it
//! becomes absent. Subscribers are called once after each successful
//! mutation, when the state is already settled.
//!
//! # Example
//!
//! ```no_run
//! use exif_lens::application::ExifSession;
//! use exif_lens::config::Config;
//!
//! let mut session = ExifSession::new(Config::default());
//! session.subscribe(|| println!("selection changed"));
//! session.insert("holiday.jpg")?;
//! if let Some(link) = session.current_map_link() {
//!     println!("{link}");
//! }
//! # Ok::<(), exif_lens::error::Error>(())
//! ```

use crate::application::port::{ExifReader, MetadataReader};
use crate::config::Config;
use crate::domain::media::ImageRef;
use crate::domain::metadata::{Coordinates, FileInfo, GeoInfo, TagMap};
use crate::error::{Error, Result};
use crate::image_registry::ImageRegistry;
use crate::media::geo;
use crate::media::metadata::ExtractedMetadata;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Handle returned by [`ExifSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut()>;

pub struct ExifSession<R = ExifReader> {
    registry: ImageRegistry,
    reader: R,
    config: Config,
    current: Option<ExtractedMetadata>,
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
}

impl ExifSession<ExifReader> {
    /// Creates a session that reads images from disk.
    pub fn new(config: Config) -> Self {
        Self::with_reader(ExifReader, config)
    }
}

impl Default for ExifSession<ExifReader> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<R: MetadataReader> ExifSession<R> {
    pub fn with_reader(reader: R, config: Config) -> Self {
        Self {
            registry: ImageRegistry::new(),
            reader,
            config,
            current: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Registers `handler`, called without arguments after every settled
    /// mutation. Observers re-query the session for the new state.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(candidate, _)| *candidate != id);
        self.subscribers.len() != before
    }

    /// Opens the image at `path`, appends it and selects it.
    ///
    /// Returns `Ok(false)` without notifying when the image is already
    /// registered.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] if the extension is not accepted
    /// - [`Error::ImageUnreadable`] if the image cannot be read; nothing is
    ///   inserted and the current selection is kept
    pub fn insert<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();
        if !self.config.accepts(path) {
            return Err(Error::UnsupportedFormat(path.to_path_buf()));
        }

        let image = ImageRef::from(path);
        if self.registry.contains(&image) {
            debug!(image = %image, "image already registered");
            return Ok(false);
        }

        let metadata = self.reader.extract(&image)?;
        self.registry.insert(image.clone());
        self.registry.select(Some(image.clone()))?;
        self.current = Some(metadata);
        info!(image = %image, images = self.registry.len(), "image opened");
        self.notify();
        Ok(true)
    }

    /// Selects the image at `index`, or clears the selection with `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`] if `index` is past the end
    /// - [`Error::ImageUnreadable`] if the image cannot be read; the previous
    ///   selection and its data are kept
    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        let Some(index) = index else {
            self.registry.select(None)?;
            self.current = None;
            self.notify();
            return Ok(());
        };

        let image = self.registry.get_by_index(index)?.clone();
        let metadata = self.reader.extract(&image)?;
        self.registry.select(Some(image))?;
        self.current = Some(metadata);
        self.notify();
        Ok(())
    }

    /// Removes the image at `index`. Removing the selected image clears the
    /// selection and its data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        let image = self.registry.get_by_index(index)?.clone();
        self.registry.remove(&image);
        if self.registry.selected().is_none() {
            self.current = None;
        }
        info!(image = %image, images = self.registry.len(), "image closed");
        self.notify();
        Ok(())
    }

    /// Removes every image and clears the selection.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.current = None;
        self.notify();
    }

    pub fn current_selection(&self) -> Option<&ImageRef> {
        self.registry.selected()
    }

    pub fn current_selection_index(&self) -> Option<usize> {
        self.registry.selected_index()
    }

    pub fn current_file_info(&self) -> Option<&FileInfo> {
        self.current.as_ref().map(|metadata| &metadata.file_info)
    }

    pub fn current_tags(&self) -> Option<&TagMap> {
        self.current.as_ref().map(|metadata| &metadata.tags)
    }

    /// GPS block of the selected image, `None` when there is no selection
    /// or the image carries no GPS data.
    pub fn current_geo(&self) -> Option<&GeoInfo> {
        self.current.as_ref().and_then(|metadata| metadata.geo.as_ref())
    }

    /// Unsigned decimal coordinates of the selected image.
    pub fn current_coordinates(&self) -> Option<Coordinates> {
        self.current_geo().and_then(|geo| geo::coordinates(geo).ok())
    }

    /// Map link for the selected image on the configured map service.
    pub fn current_map_link(&self) -> Option<String> {
        self.current_coordinates()
            .map(|coords| coords.map_link_with(&self.config.map_base_url))
    }

    pub fn all_images(&self) -> &[ImageRef] {
        self.registry.all()
    }

    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn notify(&mut self) {
        for (_, handler) in &mut self.subscribers {
            handler();
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for ExifSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExifSession")
            .field("registry", &self.registry)
            .field("reader", &self.reader)
            .field("config", &self.config)
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
