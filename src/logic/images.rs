use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;

use crate::models::plant::PlantSummary;

/// Resolves plant names to absolute image URLs, remembering every answer.
///
/// Owned by the application state; entries live until [`ImageCache::clear`]
/// or process exit.
#[derive(Debug)]
pub struct ImageCache {
    base_url: String,
    catalog: Vec<PlantSummary>,
    entries: RwLock<HashMap<String, Option<String>>>,
}

impl ImageCache {
    pub fn new(base_url: impl Into<String>, catalog: Vec<PlantSummary>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            catalog,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Absolute image URL for `name`; misses are cached too.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return hit.clone();
        }

        let resolved = self.find(&key).map(|plant| self.normalize(&plant.image));
        debug!("image lookup for {key:?} → {resolved:?}");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, resolved.clone());
        resolved
    }

    /// Exact name first, then the closest partial match.
    fn find(&self, key: &str) -> Option<&PlantSummary> {
        self.catalog
            .iter()
            .find(|p| p.name.to_lowercase() == key)
            .or_else(|| {
                self.catalog.iter().find(|p| {
                    let name = p.name.to_lowercase();
                    name.starts_with(key) || key.contains(name.as_str())
                })
            })
    }

    /// Relative image paths are served from the image host.
    pub fn normalize(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
