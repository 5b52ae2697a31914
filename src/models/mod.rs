pub mod meal;
pub mod plan;

pub use meal::{MealCandidate, RawMealRecord};
pub use plan::{PlanEntry, PlanMode, PlanPhase, PlannerState};
