//! Destination gallery modal.
//!
//! A fixed table of destinations, each with a keyword string sent to the
//! image search. Opening one shows the modal with a spinner, fetches once,
//! then renders tiles or a fixed error; the spinner always clears.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use crate::api::{ApiError, ImageResult, TravelApi};

pub const GALLERY_ERROR: &str = "Error loading images. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub key: &'static str,
    pub title: &'static str,
    pub keywords: &'static str,
}

pub const DESTINATIONS: [Destination; 10] = [
    Destination {
        key: "paris",
        title: "Paris, France",
        keywords: "paris france eiffel tower louvre notre dame champs elysées arc de triomphe montmartre sacré coeur seine river versailles latin quarter musée d",
    },
    Destination { key: "tokyo", title: "Tokyo, Japan", keywords: "tokyo japan shibuya shinjuku landmarks" },
    Destination { key: "dubai", title: "Dubai, UAE", keywords: "dubai uae burj khalifa burj al arab" },
    Destination {
        key: "vancouver",
        title: "Vancouver, Canada",
        keywords: "vancouver canada nature mountains cityscape",
    },
    Destination {
        key: "zermatt",
        title: "Zermatt, Switzerland",
        keywords: "zermatt switzerland matterhorn gornergrat glacier paradise schwarzsee riffelsee sunnegga rotthorn matterhorn museum bahnhofstrasse hike zermatt gorner glacier stellisee ski resort matterhorn express findeln kirchbrücke bridge",
    },
    Destination { key: "maldives", title: "Maldives, South Asia", keywords: "Maldives Landscape Beach Sea" },
    Destination { key: "bali", title: "Bali, Indonesia", keywords: "Bali Indonesia Coast Ocean Waves Building" },
    Destination { key: "santorini", title: "Santorini, Greece", keywords: "Architectural Dome Cityscape Greece" },
    Destination { key: "edinburgh", title: "Edinburgh, Scotland", keywords: "Edinburgh Cityscape Scotland" },
    Destination { key: "italy", title: "Italy, Europe", keywords: "Italy Roman Empire Skyline" },
];

#[must_use]
pub fn destination(key: &str) -> Option<&'static Destination> {
    DESTINATIONS.iter().find(|d| d.key == key)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTile {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GalleryContent {
    #[default]
    Empty,
    Images(Vec<ImageTile>),
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    pub visible: bool,
    pub spinner: bool,
    pub title: String,
    pub content: GalleryContent,
}

#[derive(Debug, Default)]
pub struct Gallery {
    view: GalleryView,
}

impl Gallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> &GalleryView {
        &self.view
    }

    /// Show the modal for `key` with the spinner running.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::UnknownDestination` for a key not in the table;
    /// the view is left unchanged.
    pub fn begin_open(&mut self, key: &str) -> Result<&'static Destination, GalleryError> {
        let dest = destination(key).ok_or_else(|| GalleryError::UnknownDestination(key.to_owned()))?;
        self.view = GalleryView { visible: true, spinner: true, title: dest.title.to_owned(), content: GalleryContent::Empty };
        Ok(dest)
    }

    /// Render the fetch outcome and stop the spinner.
    pub fn finish_open(&mut self, dest: &Destination, result: Result<Vec<ImageResult>, ApiError>) {
        self.view.content = match result {
            Ok(images) => GalleryContent::Images(images.into_iter().map(|img| tile(img, dest)).collect()),
            Err(e) => {
                log::error!("destination images for {} failed: {e}", dest.key);
                GalleryContent::Failed
            }
        };
        self.view.spinner = false;
    }

    /// Full open cycle.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::UnknownDestination` for a key not in the table.
    pub async fn open(&mut self, api: &dyn TravelApi, key: &str) -> Result<(), GalleryError> {
        let dest = self.begin_open(key)?;
        let result = api.destination_images(dest.keywords).await;
        self.finish_open(dest, result);
        Ok(())
    }

    pub fn close(&mut self) {
        self.view.visible = false;
    }

    /// Escape closes the modal. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.view.visible {
            self.close();
            true
        } else {
            false
        }
    }

    /// Clicks on the backdrop itself close the modal; clicks inside it do not.
    pub fn handle_click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }
}

fn tile(image: ImageResult, dest: &Destination) -> ImageTile {
    let alt = image
        .alt_description
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| dest.title.to_owned());
    ImageTile { src: image.urls.regular, alt }
}
