//! Seasonality calendar: static produce availability tables and predicates.

/// Ingredients treated as available year-round.
pub const ALL_YEAR_INGREDIENTS: &[&str] = &[
    "apples", "beets", "cabbage", "carrots", "chard",
    "collards", "garlic", "kale", "microgreens", "mushrooms",
    "onions", "potatoes", "shallots", "sweet potatoes",
];

/// Broad seasonal produce groups, matched regardless of the current month.
pub const SEASONAL_GROUPS: &[&[&str]] = &[
    // spring
    &["asparagus", "peas", "spinach", "strawberries"],
    // summer
    &["tomatoes", "zucchini", "peaches", "corn", "blueberries"],
    // fall
    &["pumpkin", "apples", "brussels sprouts", "squash"],
    // winter
    &["kale", "sweet potatoes", "citrus", "root vegetables"],
];

/// Per-month produce, indexed 0 (January) through 11 (December).
pub const MONTHLY_INGREDIENTS: [&[&str]; 12] = [
    &["kalettes", "radishes"],
    &["herbs", "radishes", "scallions"],
    &[
        "brussels sprouts", "celery root", "chestnuts", "kohlrabi", "leeks", "parsnips",
        "pears", "romanesco", "sunchokes", "turnips",
    ],
    &[
        "asparagus", "brussels sprouts", "green garlic", "morels", "nettles", "parsnips",
        "pea shoots", "ramps", "rhubarb", "spring onions", "strawberries", "sunchokes",
        "turnips",
    ],
    &[
        "asparagus", "dandelion greens", "garlic scapes", "green garlic", "morels",
        "nettles", "pea shoots", "ramps", "rhubarb", "snap peas", "snow peas", "sorrel",
        "strawberries", "vegetable starters",
    ],
    &[
        "apricots", "arugula", "cherries", "fava beans", "gooseberries", "lettuces",
        "radishes", "shelling peas", "snap peas", "snow peas", "strawberries",
    ],
    &[
        "blackberries", "cherries", "corn", "eggplant", "gooseberries", "ground cherries",
        "leeks", "melons", "nectarines", "okra", "peaches", "peppers", "shelling beans",
        "snap peas", "snow peas", "strawberries", "tomatillos",
    ],
    &[
        "blackberries", "celery", "corn", "edamame", "eggplant", "grapes", "leeks",
        "lima beans", "melons", "nectarines", "okra", "peaches", "peppers", "salad greens",
        "shelling beans", "tomatillos", "winter squash",
    ],
    &[
        "corn", "cucumbers", "currants", "eggplant", "figs", "grapes", "green beans",
        "melons", "okra", "pawpaws", "peaches", "peppers", "plums", "salad greens",
        "shelling beans", "summer squash", "tomatillos", "tomatoes",
    ],
    &[
        "arugula", "brussels sprouts", "chestnuts", "cucumbers", "eggplant", "fennel",
        "green beans", "kiwi berries", "parsnips", "peppers", "persimmons", "plums",
        "quince", "romanesco", "scallions", "shelling beans", "spinach", "summer squash",
        "sunchokes", "tomatillos", "tomatoes", "turnips",
    ],
    &[
        "arugula", "brussels sprouts", "chestnuts", "fennel", "parsnips", "persimmons",
        "quince", "romanesco", "scallions", "spinach", "sunchokes", "turnips",
    ],
    &["broccoli", "kalettes", "quince"],
];

/// Normalize an ingredient name for table lookups: trim, lowercase, strip
/// every character except ASCII letters and spaces.
pub fn normalize_ingredient(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect()
}

/// True if the ingredient appears in the month's table or any broad seasonal
/// group. `month` is 0-based (January = 0); out-of-range months only consult
/// the broad groups.
pub fn is_in_season(ingredient: &str, month: usize) -> bool {
    let needle = normalize_ingredient(ingredient);

    if let Some(list) = MONTHLY_INGREDIENTS.get(month) {
        if list.iter().any(|i| normalize_ingredient(i) == needle) {
            return true;
        }
    }

    SEASONAL_GROUPS
        .iter()
        .any(|group| group.iter().any(|i| normalize_ingredient(i) == needle))
}

/// True if the ingredient is in the all-year list.
pub fn is_all_year(ingredient: &str) -> bool {
    let needle = normalize_ingredient(ingredient);
    ALL_YEAR_INGREDIENTS
        .iter()
        .any(|i| normalize_ingredient(i) == needle)
}
