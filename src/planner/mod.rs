pub mod constants;
pub mod normalize;
pub mod replacement;
pub mod seasonal;
pub mod selection;

pub use constants::*;
pub use normalize::{
    cost_tier, normalize_candidate, normalize_pool, CostModel, CostTier, TierFloorCost, TieredCost,
};
pub use replacement::{generate_replacements, ReplacementOutcome};
pub use seasonal::{is_all_year, is_in_season, normalize_ingredient};
pub use selection::generate_plan;
