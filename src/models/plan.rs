use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    is_dessert_title, MAX_DAILY_DESSERTS, MAX_DAILY_MEALS, MAX_WEEKLY_DESSERTS, MAX_WEEKLY_MEALS,
};

/// Planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Daily,
    Weekly,
}

impl PlanMode {
    /// Maximum plan entries for this horizon.
    pub fn slot_cap(&self) -> usize {
        match self {
            PlanMode::Daily => MAX_DAILY_MEALS,
            PlanMode::Weekly => MAX_WEEKLY_MEALS,
        }
    }

    /// Maximum dessert-classified entries for this horizon.
    pub fn dessert_cap(&self) -> usize {
        match self {
            PlanMode::Daily => MAX_DAILY_DESSERTS,
            PlanMode::Weekly => MAX_WEEKLY_DESSERTS,
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMode::Daily => write!(f, "daily"),
            PlanMode::Weekly => write!(f, "weekly"),
        }
    }
}

/// Selection phase that minted a plan entry; part of its instance id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPhase {
    Seed,
    Fill,
    Dessert,
    Repeat,
}

impl PlanPhase {
    pub fn tag(&self) -> &'static str {
        match self {
            PlanPhase::Seed => "seed",
            PlanPhase::Fill => "fill",
            PlanPhase::Dessert => "dessert",
            PlanPhase::Repeat => "repeat",
        }
    }
}

/// One slot in a generated plan.
///
/// Entries are immutable once appended; repeat entries copy a committed
/// entry's identity but carry their own instance id and a flat cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(rename = "OriginalId")]
    pub original_id: String,

    #[serde(rename = "InstanceId")]
    pub instance_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Image", default)]
    pub image: String,

    #[serde(rename = "Cost")]
    pub cost: f64,

    #[serde(rename = "Ingredients")]
    pub ingredients: Vec<String>,

    #[serde(rename = "ReusedIngredients", default)]
    pub reused_ingredients: Vec<String>,

    #[serde(rename = "SeasonalScore")]
    pub seasonal_score: u32,

    #[serde(rename = "IsFresh")]
    pub is_fresh: bool,

    #[serde(rename = "IsRepeat", default)]
    pub is_repeat: bool,

    #[serde(rename = "RepeatCount")]
    pub repeat_count: u32,

    #[serde(rename = "RepeatMessage", default, skip_serializing_if = "Option::is_none")]
    pub repeat_message: Option<String>,
}

impl PlanEntry {
    /// Structured instance id: original id, minting phase, per-run sequence.
    pub fn instance_id(original_id: &str, phase: PlanPhase, seq: u32) -> String {
        format!("{}-{}-{}", original_id, phase.tag(), seq)
    }

    /// Dessert classification by title keyword.
    pub fn is_dessert(&self) -> bool {
        is_dessert_title(&self.title)
    }
}

/// Caller-owned planner state persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    #[serde(rename = "Mode")]
    pub mode: PlanMode,

    #[serde(rename = "Budget")]
    pub budget: f64,

    #[serde(rename = "Meals", default)]
    pub meals: Vec<PlanEntry>,
}
