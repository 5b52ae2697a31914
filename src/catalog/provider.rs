//! Catalog collaborator contracts and the file-backed provider.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::models::{MealCandidate, RawMealRecord};

/// Category buckets fetched in addition to the 26 starting letters.
pub const CATEGORY_BUCKETS: &[&str] = &["Dessert", "Side", "Snack"];

/// Key of one catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    Letter(char),
    Category(&'static str),
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKey::Letter(letter) => write!(f, "letter_{}", letter),
            PageKey::Category(category) => write!(f, "category_{}", category.to_lowercase()),
        }
    }
}

/// All page keys fetched when assembling a full pool.
pub fn page_keys() -> Vec<PageKey> {
    ('a'..='z')
        .map(PageKey::Letter)
        .chain(CATEGORY_BUCKETS.iter().copied().map(PageKey::Category))
        .collect()
}

/// Source of raw catalog pages.
///
/// Fetching never errors into the planner: any failure surfaces as an empty
/// page.
pub trait CatalogProvider {
    fn fetch_page(&self, key: &PageKey) -> Vec<RawMealRecord>;
}

/// Best-effort memoization of the normalized candidate pool.
pub trait CatalogCache {
    fn get(&self) -> Option<Vec<MealCandidate>>;
    fn put(&self, candidates: &[MealCandidate]);
}

/// Provider reading one JSON file per page key from a local directory.
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CatalogProvider for DirectoryCatalog {
    fn fetch_page(&self, key: &PageKey) -> Vec<RawMealRecord> {
        let path = self.dir.join(format!("{}.json", key));
        let Ok(content) = fs::read_to_string(&path) else {
            debug!(page = %key, "catalog page missing, contributing nothing");
            return Vec::new();
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                debug!(page = %key, %err, "unreadable catalog page skipped");
                Vec::new()
            }
        }
    }
}
