//! Candidate normalization: raw catalog records into scored candidates.

use rand::Rng;

use crate::models::{MealCandidate, RawMealRecord};
use crate::planner::constants::{
    ALL_YEAR_POINTS, BASE_COST_MIN, BASE_COST_SPREAD, IN_SEASON_POINTS, MAX_INGREDIENT_SLOTS,
    MID_COST_MIN, MID_COST_SPREAD, MID_TIER_KEYWORDS, PROTEIN_COST_MIN, PROTEIN_COST_SPREAD,
    PROTEIN_KEYWORDS,
};
use crate::planner::seasonal::{is_all_year, is_in_season, normalize_ingredient};

/// Cost tier assigned from a meal title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    Protein,
    Mid,
    Base,
}

impl CostTier {
    /// (minimum, uniform spread) of the tier's cost range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            CostTier::Protein => (PROTEIN_COST_MIN, PROTEIN_COST_SPREAD),
            CostTier::Mid => (MID_COST_MIN, MID_COST_SPREAD),
            CostTier::Base => (BASE_COST_MIN, BASE_COST_SPREAD),
        }
    }
}

/// Classify a title into its cost tier by case-insensitive keyword match.
pub fn cost_tier(title: &str) -> CostTier {
    let title = title.to_lowercase();
    if PROTEIN_KEYWORDS.iter().any(|k| title.contains(k)) {
        CostTier::Protein
    } else if MID_TIER_KEYWORDS.iter().any(|k| title.contains(k)) {
        CostTier::Mid
    } else {
        CostTier::Base
    }
}

/// Produces the cost for a candidate meal.
///
/// Injected into normalization so tests can pin costs.
pub trait CostModel {
    fn cost_for(&mut self, title: &str) -> f64;
}

/// Production model: uniform draw within the title's tier range.
pub struct TieredCost<R: Rng> {
    rng: R,
}

impl<R: Rng> TieredCost<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CostModel for TieredCost<R> {
    fn cost_for(&mut self, title: &str) -> f64 {
        let (min, spread) = cost_tier(title).range();
        self.rng.gen_range(min..min + spread)
    }
}

/// Pinned model: every title resolves to its tier's range minimum.
pub struct TierFloorCost;

impl CostModel for TierFloorCost {
    fn cost_for(&mut self, title: &str) -> f64 {
        cost_tier(title).range().0
    }
}

/// Round to two decimals, the precision costs are carried at.
fn round_cost(cost: f64) -> f64 {
    (cost * 100.0).round() / 100.0
}

/// Build a scored candidate from one raw record.
///
/// Ingredients, seasonal score and freshness are pure functions of the record
/// and the month; the cost is drawn once from the supplied model.
pub fn normalize_candidate(
    record: &RawMealRecord,
    month: usize,
    cost_model: &mut impl CostModel,
) -> MealCandidate {
    let ingredients: Vec<String> = record
        .ingredients
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .take(MAX_INGREDIENT_SLOTS)
        .map(|raw| normalize_ingredient(raw))
        .collect();

    let seasonal_score = ingredients
        .iter()
        .map(|ing| {
            if is_in_season(ing, month) {
                IN_SEASON_POINTS
            } else if is_all_year(ing) {
                ALL_YEAR_POINTS
            } else {
                0
            }
        })
        .sum();

    let is_fresh = ingredients.iter().any(|ing| is_in_season(ing, month));

    MealCandidate {
        original_id: record.id.clone(),
        title: record.title.clone(),
        image: record.image.clone(),
        cost: round_cost(cost_model.cost_for(&record.title)),
        ingredients,
        seasonal_score,
        is_fresh,
    }
}

/// Normalize a whole batch of records against one month and cost model.
pub fn normalize_pool(
    records: &[RawMealRecord],
    month: usize,
    cost_model: &mut impl CostModel,
) -> Vec<MealCandidate> {
    records
        .iter()
        .map(|record| normalize_candidate(record, month, cost_model))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(title: &str, ingredients: &[&str]) -> RawMealRecord {
        RawMealRecord {
            id: "52772".to_string(),
            title: title.to_string(),
            image: String::new(),
            category: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_cost_tier_keywords() {
        assert_eq!(cost_tier("Teriyaki Chicken Casserole"), CostTier::Protein);
        assert_eq!(cost_tier("BEEF Wellington"), CostTier::Protein);
        assert_eq!(cost_tier("Three Cheese Pasta"), CostTier::Mid);
        assert_eq!(cost_tier("Red Lentil Curry"), CostTier::Mid);
        assert_eq!(cost_tier("Garden Salad"), CostTier::Base);
    }

    #[test]
    fn test_tiered_cost_stays_in_range() {
        let mut model = TieredCost::new(StdRng::seed_from_u64(7));
        for _ in 0..50 {
            let cost = model.cost_for("Roast Beef");
            assert!((7.0..10.0).contains(&cost));

            let cost = model.cost_for("Cheese Toastie");
            assert!((5.0..7.0).contains(&cost));

            let cost = model.cost_for("Plain Rice");
            assert!((3.0..5.0).contains(&cost));
        }
        // Raw draws sit below the tier ceiling; only rounding can touch it.
    }

    #[test]
    fn test_normalize_skips_blank_slots_and_caps_count() {
        let mut slots: Vec<&str> = vec!["Rice", "", "  ", "Tomatoes"];
        let extra: Vec<String> = (0..25).map(|i| format!("filler{}", i)).collect();
        slots.extend(extra.iter().map(|s| s.as_str()));

        let record = record("Garden Salad", &slots);
        let candidate = normalize_candidate(&record, 0, &mut TierFloorCost);

        assert_eq!(candidate.ingredients.len(), MAX_INGREDIENT_SLOTS);
        assert_eq!(candidate.ingredients[0], "rice");
        assert_eq!(candidate.ingredients[1], "tomatoes");
    }

    #[test]
    fn test_seasonal_score_and_freshness() {
        // tomatoes: broad summer group (+3); garlic: all-year (+1); saffron: neither.
        let record = record("Garden Salad", &["Tomatoes", "Garlic", "Saffron"]);
        let candidate = normalize_candidate(&record, 0, &mut TierFloorCost);

        assert_eq!(candidate.seasonal_score, 4);
        assert!(candidate.is_fresh);
    }

    #[test]
    fn test_no_fresh_ingredient_means_not_fresh() {
        let record = record("Garden Salad", &["Garlic", "Onions"]);
        let candidate = normalize_candidate(&record, 0, &mut TierFloorCost);

        assert_eq!(candidate.seasonal_score, 2);
        assert!(!candidate.is_fresh);
    }

    #[test]
    fn test_deterministic_fields_idempotent() {
        let record = record("Beef Stew", &["Beef", "Carrots!", "Onions"]);

        let first = normalize_candidate(&record, 3, &mut TierFloorCost);
        let second = normalize_candidate(&record, 3, &mut TierFloorCost);

        assert_eq!(first.ingredients, second.ingredients);
        assert_eq!(first.seasonal_score, second.seasonal_score);
        assert_eq!(first.is_fresh, second.is_fresh);
    }

    #[test]
    fn test_cost_rounded_to_two_decimals() {
        let record = record("Garden Salad", &[]);
        let mut model = TieredCost::new(StdRng::seed_from_u64(42));
        let candidate = normalize_candidate(&record, 0, &mut model);

        let scaled = candidate.cost * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }
}
