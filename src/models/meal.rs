use serde::{Deserialize, Serialize};

use crate::planner::constants::is_dessert_title;

/// One raw catalog record as returned by a catalog page fetch.
///
/// Ingredient slots may be blank anywhere in the list; the normalizer keeps
/// only non-empty slots, up to the slot limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMealRecord {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Image", default)]
    pub image: String,

    #[serde(rename = "Category", default)]
    pub category: Option<String>,

    #[serde(rename = "Ingredients", default)]
    pub ingredients: Vec<String>,
}

/// A scored meal option, immutable for the duration of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealCandidate {
    #[serde(rename = "OriginalId")]
    pub original_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Image", default)]
    pub image: String,

    #[serde(rename = "Cost")]
    pub cost: f64,

    #[serde(rename = "Ingredients")]
    pub ingredients: Vec<String>,

    #[serde(rename = "SeasonalScore")]
    pub seasonal_score: u32,

    #[serde(rename = "IsFresh")]
    pub is_fresh: bool,
}

impl MealCandidate {
    /// Dessert classification by title keyword.
    pub fn is_dessert(&self) -> bool {
        is_dessert_title(&self.title)
    }
}
