//! Selection engine: Seed → Fill → Dessert → Repeat over a candidate pool.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::{MealCandidate, PlanEntry, PlanMode, PlanPhase};
use crate::planner::constants::{FILL_WEIGHT_PER_POINT, REPEAT_COST, REPEAT_MESSAGE};

/// Run-scoped selection state, discarded when the call returns.
///
/// The ingredient registry only grows during a run; the budget check happens
/// before a candidate is committed, never after.
struct PlanningContext {
    budget: f64,
    spent: f64,
    used_ingredients: HashSet<String>,
    used_original_ids: HashSet<String>,
    next_seq: u32,
}

impl PlanningContext {
    fn new(budget: f64) -> Self {
        Self {
            budget,
            spent: 0.0,
            used_ingredients: HashSet::new(),
            used_original_ids: HashSet::new(),
            next_seq: 0,
        }
    }

    fn remaining(&self) -> f64 {
        self.budget - self.spent
    }

    /// Ingredients already present in the registry, in candidate order.
    fn reused_ingredients(&self, ingredients: &[String]) -> Vec<String> {
        ingredients
            .iter()
            .filter(|i| self.used_ingredients.contains(*i))
            .cloned()
            .collect()
    }

    fn register_ingredients(&mut self, ingredients: &[String]) {
        for ingredient in ingredients {
            self.used_ingredients.insert(ingredient.clone());
        }
    }

    fn next_instance_id(&mut self, original_id: &str, phase: PlanPhase) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        PlanEntry::instance_id(original_id, phase, seq)
    }

    /// Append `candidate` to the plan: snapshot its reused ingredients against
    /// the registry as it stood, then register its ingredients, mark the
    /// recipe used and deduct its cost.
    fn commit(&mut self, plan: &mut Vec<PlanEntry>, candidate: &MealCandidate, phase: PlanPhase) {
        let reused_ingredients = self.reused_ingredients(&candidate.ingredients);
        let entry = PlanEntry {
            original_id: candidate.original_id.clone(),
            instance_id: self.next_instance_id(&candidate.original_id, phase),
            title: candidate.title.clone(),
            image: candidate.image.clone(),
            cost: candidate.cost,
            ingredients: candidate.ingredients.clone(),
            reused_ingredients,
            seasonal_score: candidate.seasonal_score,
            is_fresh: candidate.is_fresh,
            is_repeat: false,
            repeat_count: 1,
            repeat_message: None,
        };
        self.register_ingredients(&candidate.ingredients);
        self.used_original_ids.insert(candidate.original_id.clone());
        self.spent += candidate.cost;
        plan.push(entry);
    }
}

/// Generate an ordered plan from the candidate pool.
///
/// Candidates whose original id is in `exclude` never enter the run. A zero
/// or negative budget, or an empty pool, yields an empty plan.
pub fn generate_plan(
    pool: &[MealCandidate],
    budget: f64,
    mode: PlanMode,
    exclude: &HashSet<String>,
    rng: &mut impl Rng,
) -> Vec<PlanEntry> {
    if budget <= 0.0 || pool.is_empty() {
        return Vec::new();
    }

    let mut deck: Vec<&MealCandidate> = pool
        .iter()
        .filter(|c| !exclude.contains(&c.original_id))
        .collect();

    deck.sort_by(|a, b| {
        b.seasonal_score
            .cmp(&a.seasonal_score)
            .then_with(|| a.cost.total_cmp(&b.cost))
    });
    deck.shuffle(rng);

    let slot_cap = mode.slot_cap();
    let dessert_cap = mode.dessert_cap();

    let mut ctx = PlanningContext::new(budget);
    let mut plan: Vec<PlanEntry> = Vec::new();

    // Seed: one fresh non-dessert meal when the budget allows.
    if let Some(candidate) = deck
        .iter()
        .find(|c| c.is_fresh && !c.is_dessert() && c.cost <= budget)
    {
        ctx.commit(&mut plan, candidate, PlanPhase::Seed);
    }

    // Fill remaining slots by seasonal-weighted sampling.
    while plan.len() < slot_cap && ctx.spent < budget {
        let candidates: Vec<&MealCandidate> = deck
            .iter()
            .copied()
            .filter(|c| {
                !ctx.used_original_ids.contains(&c.original_id)
                    && !c.is_dessert()
                    && ctx.spent + c.cost <= budget
            })
            .collect();
        if candidates.is_empty() {
            break;
        }

        let selected = weighted_pick(&candidates, rng);
        ctx.commit(&mut plan, selected, PlanPhase::Fill);
    }

    // Fill the dessert quota while slots remain.
    let mut dessert_count = plan.iter().filter(|e| e.is_dessert()).count();
    while dessert_count < dessert_cap && plan.len() < slot_cap {
        let Some(dessert) = pick_dessert(&deck, &plan, &ctx, rng) else {
            break;
        };
        ctx.commit(&mut plan, dessert, PlanPhase::Dessert);
        dessert_count += 1;
    }

    // Backfill unused slots with flat-cost repeats of committed meals.
    append_repeats(&mut plan, &mut ctx, slot_cap);

    debug!(
        entries = plan.len(),
        spent = ctx.spent,
        %mode,
        "plan assembled"
    );

    plan.truncate(slot_cap);
    plan
}

/// Weighted draw over the fill candidates: weight 2 × seasonal score. When no
/// candidate carries weight, the first in iteration order is taken.
fn weighted_pick<'a>(candidates: &[&'a MealCandidate], rng: &mut impl Rng) -> &'a MealCandidate {
    let total_weight: f64 = candidates
        .iter()
        .map(|c| c.seasonal_score as f64 * FILL_WEIGHT_PER_POINT)
        .sum();

    if total_weight > 0.0 {
        let mut r = rng.gen_range(0.0..total_weight);
        for candidate in candidates {
            r -= candidate.seasonal_score as f64 * FILL_WEIGHT_PER_POINT;
            if r <= 0.0 {
                return candidate;
            }
        }
    }

    candidates[0]
}

/// One affordable dessert not yet in the plan, preferring fresh ones, chosen
/// uniformly at random.
fn pick_dessert<'a>(
    deck: &[&'a MealCandidate],
    plan: &[PlanEntry],
    ctx: &PlanningContext,
    rng: &mut impl Rng,
) -> Option<&'a MealCandidate> {
    let candidates: Vec<&MealCandidate> = deck
        .iter()
        .copied()
        .filter(|c| {
            c.is_dessert()
                && c.cost <= ctx.remaining()
                && !plan.iter().any(|e| e.original_id == c.original_id)
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let fresh: Vec<&MealCandidate> = candidates.iter().copied().filter(|c| c.is_fresh).collect();
    let pool = if fresh.is_empty() { &candidates } else { &fresh };
    Some(pool[rng.gen_range(0..pool.len())])
}

/// Backfill unused slots with repeats of already-committed non-dessert
/// entries, ranked by most reused ingredients, then seasonal score.
fn append_repeats(plan: &mut Vec<PlanEntry>, ctx: &mut PlanningContext, slot_cap: usize) {
    if plan.len() >= slot_cap {
        return;
    }
    let needed = slot_cap - plan.len();

    let mut bases: Vec<PlanEntry> = plan.iter().filter(|e| !e.is_dessert()).cloned().collect();
    bases.sort_by(|a, b| {
        b.reused_ingredients
            .len()
            .cmp(&a.reused_ingredients.len())
            .then_with(|| b.seasonal_score.cmp(&a.seasonal_score))
    });
    bases.truncate(needed);

    for base in bases {
        if ctx.spent + REPEAT_COST > ctx.budget {
            break;
        }

        let reused_ingredients = ctx.reused_ingredients(&base.ingredients);
        ctx.register_ingredients(&base.ingredients);
        ctx.used_original_ids.insert(base.original_id.clone());
        ctx.spent += REPEAT_COST;

        let entry = PlanEntry {
            instance_id: ctx.next_instance_id(&base.original_id, PlanPhase::Repeat),
            cost: REPEAT_COST,
            reused_ingredients,
            is_repeat: true,
            repeat_count: base.repeat_count + 1,
            repeat_message: Some(REPEAT_MESSAGE.to_string()),
            ..base
        };
        plan.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(id: &str, title: &str, cost: f64, score: u32, fresh: bool) -> MealCandidate {
        MealCandidate {
            original_id: id.to_string(),
            title: title.to_string(),
            image: String::new(),
            cost,
            ingredients: vec!["rice".to_string(), "garlic".to_string()],
            seasonal_score: score,
            is_fresh: fresh,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn test_zero_budget_yields_empty_plan() {
        let pool = vec![candidate("A", "Rice Bowl", 3.0, 1, true)];
        let plan = generate_plan(&pool, 0.0, PlanMode::Weekly, &HashSet::new(), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_empty_pool_yields_empty_plan() {
        let plan = generate_plan(&[], 100.0, PlanMode::Weekly, &HashSet::new(), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_seed_prefers_fresh_non_dessert() {
        let pool = vec![
            candidate("A", "Winter Cake", 3.0, 5, true),
            candidate("B", "Kale Stir Fry", 4.0, 5, true),
        ];
        let plan = generate_plan(&pool, 4.0, PlanMode::Daily, &HashSet::new(), &mut rng());

        // Only B is seedable: A is a dessert, and after B the budget is spent.
        assert_eq!(plan[0].original_id, "B");
        assert!(!plan[0].is_repeat);
    }

    #[test]
    fn test_excluded_ids_never_selected() {
        let pool = vec![
            candidate("A", "Kale Stir Fry", 3.0, 5, true),
            candidate("B", "Bean Chili", 3.0, 2, false),
        ];
        let exclude: HashSet<String> = ["A".to_string()].into();
        let plan = generate_plan(&pool, 50.0, PlanMode::Weekly, &exclude, &mut rng());

        assert!(plan.iter().all(|e| e.original_id != "A"));
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_budget_respected_at_every_commit() {
        let pool: Vec<MealCandidate> = (0..20)
            .map(|i| candidate(&format!("m{}", i), "Veggie Bowl", 4.0, i % 4, i % 3 == 0))
            .collect();
        let plan = generate_plan(&pool, 15.0, PlanMode::Weekly, &HashSet::new(), &mut rng());

        let total: f64 = plan.iter().map(|e| e.cost).sum();
        assert!(total <= 15.0, "plan cost {} exceeds budget", total);
    }

    #[test]
    fn test_repeat_entries_backfill_cheap_slots() {
        // One affordable meal, generous budget: the remaining daily slot must
        // be a flat-cost repeat of it.
        let pool = vec![candidate("A", "Kale Stir Fry", 3.0, 5, true)];
        let plan = generate_plan(&pool, 10.0, PlanMode::Daily, &HashSet::new(), &mut rng());

        assert_eq!(plan.len(), 2);
        assert!(!plan[0].is_repeat);
        assert!(plan[1].is_repeat);
        assert_eq!(plan[1].cost, REPEAT_COST);
        assert_eq!(plan[1].repeat_count, 2);
        assert_eq!(plan[1].original_id, "A");
        assert!(plan[1].repeat_message.is_some());
        // The base meal's ingredients were registered when it was committed.
        assert_eq!(plan[1].reused_ingredients, plan[1].ingredients);
    }

    #[test]
    fn test_instance_ids_are_unique_and_structured() {
        let pool = vec![candidate("A", "Kale Stir Fry", 3.0, 5, true)];
        let plan = generate_plan(&pool, 10.0, PlanMode::Daily, &HashSet::new(), &mut rng());

        assert_eq!(plan[0].instance_id, "A-seed-0");
        assert_eq!(plan[1].instance_id, "A-repeat-1");

        let ids: HashSet<&str> = plan.iter().map(|e| e.instance_id.as_str()).collect();
        assert_eq!(ids.len(), plan.len());
    }

    #[test]
    fn test_reuse_snapshot_taken_before_registration() {
        // Two meals sharing "garlic": the second committed entry must report
        // the shared ingredient as reused, the first must not.
        let pool = vec![
            candidate("A", "Kale Stir Fry", 3.0, 5, true),
            candidate("B", "Garlic Noodles", 3.0, 5, true),
        ];
        let plan = generate_plan(&pool, 6.0, PlanMode::Daily, &HashSet::new(), &mut rng());

        assert_eq!(plan.len(), 2);
        assert!(plan[0].reused_ingredients.is_empty());
        assert_eq!(plan[1].reused_ingredients.len(), 2);
    }

    #[test]
    fn test_dessert_quota_enforced() {
        let mut pool: Vec<MealCandidate> = (0..10)
            .map(|i| candidate(&format!("d{}", i), &format!("Cake {}", i), 3.0, 1, false))
            .collect();
        pool.push(candidate("m", "Kale Stir Fry", 3.0, 5, true));

        let plan = generate_plan(&pool, 100.0, PlanMode::Weekly, &HashSet::new(), &mut rng());
        let desserts = plan.iter().filter(|e| e.is_dessert()).count();
        assert!(desserts <= PlanMode::Weekly.dessert_cap());
        assert!(desserts > 0);
    }

    #[test]
    fn test_determinism_under_fixed_seed() {
        let pool: Vec<MealCandidate> = (0..30)
            .map(|i| {
                candidate(
                    &format!("m{}", i),
                    if i % 5 == 0 { "Berry Cake" } else { "Veggie Bowl" },
                    3.0 + (i % 4) as f64,
                    i % 6,
                    i % 2 == 0,
                )
            })
            .collect();

        let first = generate_plan(
            &pool,
            60.0,
            PlanMode::Weekly,
            &HashSet::new(),
            &mut StdRng::seed_from_u64(1234),
        );
        let second = generate_plan(
            &pool,
            60.0,
            PlanMode::Weekly,
            &HashSet::new(),
            &mut StdRng::seed_from_u64(1234),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_weighted_pick_skips_zero_weight_when_weighted() {
        let heavy = candidate("H", "Seasonal Feast", 3.0, 10, true);
        let zero = candidate("Z", "Plain Toast", 3.0, 0, false);
        let candidates = vec![&zero, &heavy];

        // With weight in play the zero-score candidate can only be reached
        // when the draw lands at exactly zero, so the heavy one dominates.
        let mut hits = 0;
        let mut rng = rng();
        for _ in 0..100 {
            if weighted_pick(&candidates, &mut rng).original_id == "H" {
                hits += 1;
            }
        }
        assert!(hits >= 99);
    }

    #[test]
    fn test_weighted_pick_falls_back_to_first() {
        let a = candidate("A", "Plain Toast", 3.0, 0, false);
        let b = candidate("B", "Plain Bagel", 3.0, 0, false);
        let candidates = vec![&a, &b];

        let picked = weighted_pick(&candidates, &mut rng());
        assert_eq!(picked.original_id, "A");
    }
}
