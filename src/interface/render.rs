use crate::models::PlanEntry;

/// Display a generated plan with per-entry tags and totals.
pub fn display_plan(plan: &[PlanEntry], budget: f64) {
    if plan.is_empty() {
        println!("No plan generated (empty catalog or exhausted budget).");
        return;
    }

    println!();
    println!("=== Meal Plan ===");
    println!();

    // Find max title length for alignment
    let max_title_len = plan.iter().map(|e| e.title.len()).max().unwrap_or(10);
    let total_cost: f64 = plan.iter().map(|e| e.cost).sum();

    for (i, entry) in plan.iter().enumerate() {
        let mut tags = Vec::new();

        let freshness = if entry.is_fresh { "seasonal" } else { "all-year" };
        tags.push(freshness.to_string());

        if !entry.reused_ingredients.is_empty() {
            tags.push(format!("reuses {}", entry.reused_ingredients.join(", ")));
        }

        if entry.is_repeat {
            tags.push(format!("repeat x{}", entry.repeat_count));
        }

        println!(
            "{:>3}. {:<width$} - ${:>6.2}  [{}]",
            i + 1,
            entry.title,
            entry.cost,
            tags.join(", "),
            width = max_title_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Total meals: {}", plan.len());
    println!(
        "Desserts: {}",
        plan.iter().filter(|e| e.is_dessert()).count()
    );
    println!("Budget used: ${:.2} / ${:.2}", total_cost, budget);
    println!();
}
