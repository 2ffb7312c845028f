// ABOUTME: Shopping-list aggregation - groups ingredient amounts by (name, unit)
// ABOUTME: Renders the downloadable text payload, one line per ingredient group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Shopping-list aggregation.
//!
//! Folds the (name, unit, amount) tuples of every recipe in a user's
//! shopping list into one total per (name, unit) group. Output order is the
//! first-seen order of each group, not alphabetical.

use std::collections::HashMap;

/// Attachment filename for the rendered shopping list
pub const ATTACHMENT_FILENAME: &str = "shopping_list.txt";

/// One aggregated ingredient group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Summed amount across all shopping-list recipes
    pub amount: i64,
}

/// Fold raw (name, unit, amount) tuples into aggregated groups.
///
/// Groups are keyed by (name, unit) and emitted in first-seen order.
#[must_use]
pub fn aggregate(rows: &[(String, String, i64)]) -> Vec<ShoppingListLine> {
    let mut lines: Vec<ShoppingListLine> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (name, unit, amount) in rows {
        let key = (name.clone(), unit.clone());
        if let Some(&at) = index.get(&key) {
            lines[at].amount += amount;
        } else {
            index.insert(key, lines.len());
            lines.push(ShoppingListLine {
                name: name.clone(),
                measurement_unit: unit.clone(),
                amount: *amount,
            });
        }
    }

    lines
}

/// Render aggregated groups as the downloadable text payload.
///
/// One `name (unit) - amount` line per group, each newline-terminated. An
/// empty input renders an empty string.
#[must_use]
pub fn render(lines: &[ShoppingListLine]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&format!(
            "{} ({}) - {}\n",
            line.name, line.measurement_unit, line.amount
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i64) -> (String, String, i64) {
        (name.to_owned(), unit.to_owned(), amount)
    }

    #[test]
    fn test_amounts_summed_per_name_and_unit() {
        let rows = vec![row("Flour", "g", 100), row("Flour", "g", 50)];
        let lines = aggregate(&rows);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 150);
        assert_eq!(render(&lines), "Flour (g) - 150\n");
    }

    #[test]
    fn test_same_name_different_unit_kept_apart() {
        let rows = vec![row("Butter", "g", 200), row("Butter", "tbsp", 2)];
        let lines = aggregate(&rows);
        assert_eq!(lines.len(), 2);
        assert_eq!(render(&lines), "Butter (g) - 200\nButter (tbsp) - 2\n");
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let rows = vec![
            row("Zucchini", "pc", 1),
            row("Apple", "pc", 2),
            row("Zucchini", "pc", 3),
            row("Milk", "ml", 500),
        ];
        let lines = aggregate(&rows);
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        // Insertion order of first appearance, not alphabetical
        assert_eq!(names, vec!["Zucchini", "Apple", "Milk"]);
        assert_eq!(lines[0].amount, 4);
    }

    #[test]
    fn test_empty_input_renders_empty_payload() {
        let lines = aggregate(&[]);
        assert!(lines.is_empty());
        assert_eq!(render(&lines), "");
    }
}
