//! Pool assembly: parallel best-effort page fan-out and cache fallback.

use std::thread;

use tracing::{debug, info};

use crate::catalog::provider::{page_keys, CatalogCache, CatalogProvider};
use crate::models::{MealCandidate, RawMealRecord};
use crate::planner::normalize::{normalize_pool, CostModel};

/// Fetch every catalog page in parallel and union the results.
///
/// Each fetch is independently fault tolerant: a failed or empty page
/// contributes nothing and never aborts the aggregate.
pub fn assemble_pool<P: CatalogProvider + Sync>(provider: &P) -> Vec<RawMealRecord> {
    let keys = page_keys();

    let mut records = Vec::new();
    thread::scope(|scope| {
        let handles: Vec<_> = keys
            .iter()
            .map(|key| scope.spawn(move || provider.fetch_page(key)))
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(page) => records.extend(page),
                Err(_) => debug!("catalog fetch thread panicked, page dropped"),
            }
        }
    });

    info!(records = records.len(), "catalog pool assembled");
    records
}

/// Return the cached candidate pool, or rebuild it from the provider and
/// store the result.
pub fn snapshot_or_rebuild<P, C>(
    cache: &C,
    provider: &P,
    month: usize,
    cost_model: &mut impl CostModel,
) -> Vec<MealCandidate>
where
    P: CatalogProvider + Sync,
    C: CatalogCache,
{
    if let Some(candidates) = cache.get() {
        debug!(candidates = candidates.len(), "using cached candidate pool");
        return candidates;
    }

    let records = assemble_pool(provider);
    let candidates = normalize_pool(&records, month, cost_model);
    cache.put(&candidates);
    candidates
}
