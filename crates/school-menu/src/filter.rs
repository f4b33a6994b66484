//! Deny-list filtering of boilerplate menu items
//!
//! Cafeteria menus repeat the same sides every day (salad bar, milk
//! variants). Those lines crowd out the actual meal on a small panel, so they
//! are removed before layout.

use serde::{Deserialize, Serialize};

/// Entries matched as substrings of the normalised item name
pub const DEFAULT_DENY_LIST: &[&str] = &[
    "garden bar",
    "fresh fruits and veggies",
    "1% milk",
    "milk - 1%",
    "non-fat milk",
    "nonfat milk",
    "milk - non-fat",
    "fat free milk",
];

/// What a day shows when every one of its items is deny-listed
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyDayPolicy {
    /// Show the day's unfiltered list instead of nothing
    #[default]
    KeepUnfiltered,
    /// Show the day header with no items
    ShowEmpty,
}

/// Trim, lowercase and collapse runs of whitespace to a single space
pub fn normalize_item(item: &str) -> String {
    item.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive substring deny-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    entries: Vec<String>,
}

impl Default for DenyList {
    fn default() -> Self {
        Self::new(DEFAULT_DENY_LIST.iter().copied())
    }
}

impl DenyList {
    /// Build a deny-list; entries are normalised and blank ones dropped
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| normalize_item(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// A deny-list that removes nothing
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Normalised entries
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True if the item contains any entry after normalisation
    pub fn is_denied(&self, item: &str) -> bool {
        let normalized = normalize_item(item);
        self.entries.iter().any(|entry| normalized.contains(entry))
    }

    /// Surviving items in their original order and spelling
    pub fn filter(&self, items: &[String]) -> Vec<String> {
        items
            .iter()
            .filter(|item| !self.is_denied(item))
            .cloned()
            .collect()
    }

    /// Filter one day's items, applying `policy` if nothing survives
    pub fn filter_day(&self, items: &[String], policy: EmptyDayPolicy) -> Vec<String> {
        let kept = self.filter(items);
        if kept.is_empty() && policy == EmptyDayPolicy::KeepUnfiltered {
            return items.to_vec();
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_normalize_item() {
        assert_eq!(normalize_item("  Garden   BAR\t"), "garden bar");
        assert_eq!(normalize_item(""), "");
        assert_eq!(normalize_item("Pizza"), "pizza");
    }

    #[test]
    fn test_pizza_day() {
        let deny = DenyList::default();
        let items = strings(&["Pizza", "Garden Bar", "Milk - 1%"]);
        assert_eq!(deny.filter(&items), strings(&["Pizza"]));
    }

    #[test]
    fn test_substring_and_case_insensitive() {
        let deny = DenyList::default();
        assert!(deny.is_denied("Organic Fresh Fruits and Veggies"));
        assert!(deny.is_denied("Straus Organic 1% MILK"));
        assert!(deny.is_denied("Garden   Bar:"));
        assert!(deny.is_denied("Fat Free Milk"));
        assert!(!deny.is_denied("Milkshake"));
        assert!(!deny.is_denied("Chicken Teriyaki Bowl"));
    }

    #[test]
    fn test_order_preserved() {
        let deny = DenyList::default();
        let items = strings(&["Tacos", "Non-Fat Milk", "Rice", "Beans", "Garden Bar"]);
        assert_eq!(deny.filter(&items), strings(&["Tacos", "Rice", "Beans"]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let deny = DenyList::default();
        let items = strings(&[
            "Pizza",
            "Garden Bar",
            "Milk - 1%",
            "nonfat milk",
            "Apple Slices",
        ]);
        let once = deny.filter(&items);
        assert_eq!(deny.filter(&once), once);

        for policy in [EmptyDayPolicy::KeepUnfiltered, EmptyDayPolicy::ShowEmpty] {
            let once = deny.filter_day(&items, policy);
            assert_eq!(deny.filter_day(&once, policy), once);
        }
    }

    #[test]
    fn test_all_filtered_keeps_unfiltered_by_default() {
        let deny = DenyList::default();
        let items = strings(&["Garden Bar", "Milk - 1%"]);
        assert_eq!(
            deny.filter_day(&items, EmptyDayPolicy::default()),
            items
        );
        assert!(deny
            .filter_day(&items, EmptyDayPolicy::ShowEmpty)
            .is_empty());
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let deny = DenyList::new(["", "   ", "Pickles"]);
        assert_eq!(deny.entries(), ["pickles"]);
        assert!(!deny.is_denied("Pizza"));
        assert!(deny.is_denied("Dill PICKLES"));
    }

    #[test]
    fn test_empty_deny_list_keeps_everything() {
        let items = strings(&["Garden Bar", "Milk - 1%"]);
        assert_eq!(DenyList::empty().filter(&items), items);
    }
}
