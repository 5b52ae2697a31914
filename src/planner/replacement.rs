//! Replacement pass: top up a plan after manual removals.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::models::{MealCandidate, PlanEntry, PlanMode};
use crate::planner::constants::REPLACEMENT_BUDGET_FACTOR;
use crate::planner::selection::generate_plan;

/// Result of a replacement pass.
#[derive(Debug, Clone)]
pub struct ReplacementOutcome {
    /// New entries to append to the current plan.
    pub added: Vec<PlanEntry>,
    /// False when the engine found nothing new, so the caller can report it
    /// instead of silently merging an empty list.
    pub replacements_available: bool,
}

/// Re-run the selection engine with an inflated working budget and every
/// confirmed or still-present recipe excluded.
///
/// Confirmed entries are committed and non-negotiable: their cost reduces the
/// working budget and their slots reduce the room left for new entries. The
/// returned `added` list is truncated so `current` plus `added` fits the
/// slots remaining after confirmations.
pub fn generate_replacements(
    pool: &[MealCandidate],
    confirmed: &[PlanEntry],
    current: &[PlanEntry],
    original_budget: f64,
    mode: PlanMode,
    rng: &mut impl Rng,
) -> ReplacementOutcome {
    let committed: f64 = confirmed.iter().chain(current).map(|e| e.cost).sum();
    let working_budget = REPLACEMENT_BUDGET_FACTOR * original_budget - committed;

    let exclude: HashSet<String> = confirmed
        .iter()
        .chain(current)
        .map(|e| e.original_id.clone())
        .collect();

    let mut added = generate_plan(pool, working_budget, mode, &exclude, rng);
    let replacements_available = !added.is_empty();

    let remaining_slots = mode.slot_cap().saturating_sub(confirmed.len());
    let room = remaining_slots.saturating_sub(current.len());
    added.truncate(room);

    debug!(
        working_budget,
        added = added.len(),
        replacements_available,
        "replacement pass finished"
    );

    ReplacementOutcome {
        added,
        replacements_available,
    }
}
