use std::path::Path;

use crate::error::Result;
use crate::models::PlanEntry;

/// Write a plan to a CSV file, one row per entry.
pub fn write_plan_csv(plan: &[PlanEntry], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "slot",
        "title",
        "cost",
        "seasonal_score",
        "fresh",
        "repeat",
        "repeat_count",
        "reused_ingredients",
    ])?;

    for (i, entry) in plan.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            entry.title.clone(),
            format!("{:.2}", entry.cost),
            entry.seasonal_score.to_string(),
            entry.is_fresh.to_string(),
            entry.is_repeat.to_string(),
            entry.repeat_count.to_string(),
            entry.reused_ingredients.join("; "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::PlanPhase;

    #[test]
    fn test_export_writes_one_row_per_entry() {
        let plan = vec![PlanEntry {
            original_id: "1".to_string(),
            instance_id: PlanEntry::instance_id("1", PlanPhase::Seed, 0),
            title: "Apple Crumble".to_string(),
            image: String::new(),
            cost: 3.5,
            ingredients: vec!["apples".to_string()],
            reused_ingredients: vec!["apples".to_string()],
            seasonal_score: 1,
            is_fresh: false,
            is_repeat: false,
            repeat_count: 1,
            repeat_message: None,
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        write_plan_csv(&plan, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("slot,title,cost"));
        assert!(lines[1].contains("Apple Crumble"));
        assert!(lines[1].contains("3.50"));
    }
}
