use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::{PlanEntry, PlanMode};

/// Prompt for the plan budget.
pub fn prompt_budget() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("What is your meal budget?")
        .default("50".to_string())
        .interact_text()?;

    let budget: f64 = input
        .parse()
        .map_err(|_| PlannerError::InvalidInput("Invalid number".to_string()))?;

    if budget <= 0.0 {
        return Err(PlannerError::InvalidInput(
            "Budget must be positive".to_string(),
        ));
    }

    Ok(budget)
}

/// Prompt for the planning horizon.
pub fn prompt_mode() -> Result<PlanMode> {
    let selection = Select::new()
        .with_prompt("Plan for a single day or a full week?")
        .items(&["Daily", "Weekly"])
        .default(1)
        .interact()?;

    Ok(if selection == 0 {
        PlanMode::Daily
    } else {
        PlanMode::Weekly
    })
}

/// Prompt for plan entries to remove, with fuzzy title matching.
///
/// Returns the instance ids of the removed entries.
pub fn prompt_removals(entries: &[PlanEntry]) -> Result<Vec<String>> {
    let mut removed: Vec<String> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a meal to remove (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        let open: Vec<&PlanEntry> = entries
            .iter()
            .filter(|e| !removed.contains(&e.instance_id))
            .collect();

        // Try exact match first (case-insensitive)
        let exact_match = open
            .iter()
            .find(|e| e.title.to_lowercase() == input.to_lowercase());

        if let Some(entry) = exact_match {
            removed.push(entry.instance_id.clone());
            println!("Removed: {}", entry.title);
            continue;
        }

        // Try fuzzy matching
        let mut candidates: Vec<(&PlanEntry, f64)> = open
            .iter()
            .map(|e| (*e, jaro_winkler(&e.title.to_lowercase(), &input.to_lowercase())))
            .filter(|(_, score)| *score > 0.7)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching meal found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let entry = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", entry.title))
                .default(true)
                .interact()?;

            if confirm {
                removed.push(entry.instance_id.clone());
                println!("Removed: {}", entry.title);
            }
        } else {
            // Multiple matches - let user select
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(e, _)| e.title.clone())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                let entry = candidates[selection].0;
                removed.push(entry.instance_id.clone());
                println!("Removed: {}", entry.title);
            }
        }
    }

    Ok(removed)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
