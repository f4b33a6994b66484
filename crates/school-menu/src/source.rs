//! Menu data sources
//!
//! Live fetching is not implemented. [`MenuSource::menu_from_url`] always
//! falls back to the source's own data and says so in the log and in the
//! returned [`MenuFetchResult`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Items for one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDay {
    /// Calendar date the items are served on
    pub date: NaiveDate,
    /// Item names in menu order
    pub items: Vec<String>,
}

impl MenuDay {
    /// Pair a date with its items
    pub fn new(date: NaiveDate, items: Vec<String>) -> Self {
        Self { date, items }
    }
}

/// Why mock data was returned instead of fetched data
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockReason {
    /// A URL was configured but network fetching is not supported
    UrlFetchUnsupported,
    /// The configured URL was blank
    NoUrl,
}

/// Outcome of a URL fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuFetchResult {
    /// Placeholder items served from the source's own data
    Mock {
        /// Why the fallback happened
        reason: MockReason,
        /// Items for the requested date
        items: Vec<String>,
    },
    /// Items obtained from the URL
    Fetched(Vec<String>),
}

impl MenuFetchResult {
    /// Items regardless of origin
    pub fn items(&self) -> &[String] {
        match self {
            MenuFetchResult::Mock { items, .. } | MenuFetchResult::Fetched(items) => items,
        }
    }

    /// Consume into the item list
    pub fn into_items(self) -> Vec<String> {
        match self {
            MenuFetchResult::Mock { items, .. } | MenuFetchResult::Fetched(items) => items,
        }
    }

    /// True for fallback data
    pub fn is_mock(&self) -> bool {
        matches!(self, MenuFetchResult::Mock { .. })
    }
}

/// Provider of daily menu items
pub trait MenuSource {
    /// Items served on `date`; never empty
    fn menu_for_date(&self, date: NaiveDate) -> Vec<String>;

    /// Items for `date` from `url`
    ///
    /// The provided implementation performs no I/O: it warns and returns
    /// [`menu_for_date`](Self::menu_for_date) wrapped as mock data.
    fn menu_from_url(&self, url: &str, date: NaiveDate) -> MenuFetchResult {
        let url = url.trim();
        let reason = if url.is_empty() {
            tracing::warn!(%date, "menu URL is empty, using mock menu data");
            MockReason::NoUrl
        } else {
            tracing::warn!(
                url,
                %date,
                "fetching menus from a URL is not supported, using mock menu data"
            );
            MockReason::UrlFetchUnsupported
        };
        MenuFetchResult::Mock {
            reason,
            items: self.menu_for_date(date),
        }
    }
}

impl<S: MenuSource + ?Sized> MenuSource for &S {
    fn menu_for_date(&self, date: NaiveDate) -> Vec<String> {
        (**self).menu_for_date(date)
    }

    fn menu_from_url(&self, url: &str, date: NaiveDate) -> MenuFetchResult {
        (**self).menu_from_url(url, date)
    }
}

/// Generic lunches for dates missing from the table, indexed Monday first
const DEFAULT_MENUS: [&[&str]; 5] = [
    &["Chicken Nuggets", "Steamed Broccoli", "Dinner Roll"],
    &["Beef Tacos", "Spanish Rice", "Pinto Beans", "Salsa"],
    &["Cheese Pizza", "Caesar Salad", "Apple Slices"],
    &["Turkey Sandwich", "Vegetable Soup", "Baked Chips", "Orange Wedges"],
    &["Fish Sticks", "Sweet Potato Fries", "Coleslaw"],
];

/// Sample week used by previews and tests
const SAMPLE_MENUS: &[((i32, u32, u32), &[&str])] = &[
    (
        (2025, 1, 6),
        &[
            "Chicken Teriyaki Bowl",
            "Brown Rice",
            "Steamed Edamame",
            "Garden Bar",
            "Organic Fresh Fruits and Veggies",
            "Straus Organic 1% Milk",
        ],
    ),
    (
        (2025, 1, 7),
        &[
            "Bean and Cheese Burrito",
            "Spanish Rice",
            "Roasted Corn",
            "Garden Bar",
            "Non-Fat Milk",
        ],
    ),
    ((2025, 1, 8), &["Pizza", "Garden Bar", "Milk - 1%"]),
    (
        (2025, 1, 9),
        &[
            "Turkey Meatball Sub",
            "Roasted Carrots",
            "Fresh Fruits and Veggies",
            "Milk - 1%",
        ],
    ),
    (
        (2025, 1, 10),
        &[
            "Fish Tacos",
            "Black Beans",
            "Corn Salsa",
            "Garden Bar",
            "Nonfat Milk",
        ],
    ),
    (
        (2025, 1, 13),
        &[
            "Macaroni and Cheese",
            "Green Beans",
            "Apple Slices",
            "Milk - 1%",
        ],
    ),
    ((2025, 1, 14), &["Garden Bar", "Milk - Non-Fat"]),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Table-backed source with a weekday-rotated default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMenuSource {
    table: BTreeMap<NaiveDate, Vec<String>>,
}

impl Default for MockMenuSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMenuSource {
    /// Source backed by the built-in sample weeks of January 2025
    pub fn new() -> Self {
        Self::with_table(Self::sample_table())
    }

    /// Source backed by a caller-supplied table
    pub fn with_table(table: BTreeMap<NaiveDate, Vec<String>>) -> Self {
        Self { table }
    }

    /// The built-in sample table
    pub fn sample_table() -> BTreeMap<NaiveDate, Vec<String>> {
        SAMPLE_MENUS
            .iter()
            .filter_map(|&((y, m, d), items)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| (date, owned(items)))
            })
            .collect()
    }

    /// Dates present in the table
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.table.keys().copied()
    }

    /// Generic items for a date missing from the table
    pub fn default_menu(date: NaiveDate) -> Vec<String> {
        let index = date.weekday().num_days_from_monday() as usize % DEFAULT_MENUS.len();
        DEFAULT_MENUS
            .get(index)
            .map(|items| owned(items))
            .unwrap_or_default()
    }
}

impl MenuSource for MockMenuSource {
    fn menu_for_date(&self, date: NaiveDate) -> Vec<String> {
        match self.table.get(&date) {
            Some(items) if !items.is_empty() => items.clone(),
            _ => Self::default_menu(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_table_dates() {
        let source = MockMenuSource::new();
        let dates: Vec<NaiveDate> = source.dates().collect();
        assert_eq!(
            dates,
            [
                date(2025, 1, 6),
                date(2025, 1, 7),
                date(2025, 1, 8),
                date(2025, 1, 9),
                date(2025, 1, 10),
                date(2025, 1, 13),
                date(2025, 1, 14),
            ]
        );
    }

    #[test]
    fn test_table_lookup() {
        let source = MockMenuSource::new();
        assert_eq!(
            source.menu_for_date(date(2025, 1, 8)),
            ["Pizza", "Garden Bar", "Milk - 1%"]
        );
    }

    #[test]
    fn test_menu_is_total_and_never_empty() {
        let source = MockMenuSource::new();
        let mut day = date(2024, 12, 1);
        for _ in 0..120 {
            let items = source.menu_for_date(day);
            assert!(!items.is_empty(), "{day} has no items");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_default_menu_is_deterministic() {
        let source = MockMenuSource::new();
        let day = date(2030, 3, 4);
        assert_eq!(source.menu_for_date(day), source.menu_for_date(day));
        for items in DEFAULT_MENUS {
            assert!((3..=4).contains(&items.len()));
        }
        // Same weekday, same default
        assert_eq!(
            MockMenuSource::default_menu(date(2030, 3, 4)),
            MockMenuSource::default_menu(date(2030, 3, 11))
        );
        assert_ne!(
            MockMenuSource::default_menu(date(2030, 3, 4)),
            MockMenuSource::default_menu(date(2030, 3, 5))
        );
    }

    #[test]
    fn test_custom_table() {
        let mut table = BTreeMap::new();
        table.insert(date(2026, 5, 4), vec!["Ramen".to_string()]);
        table.insert(date(2026, 5, 5), Vec::new());
        let source = MockMenuSource::with_table(table);
        assert_eq!(source.menu_for_date(date(2026, 5, 4)), ["Ramen"]);
        // Empty entries fall back to the default rotation
        assert_eq!(
            source.menu_for_date(date(2026, 5, 5)),
            MockMenuSource::default_menu(date(2026, 5, 5))
        );
    }

    #[test]
    fn test_url_always_returns_mock() {
        let source = MockMenuSource::new();
        let day = date(2025, 1, 8);

        let result = source.menu_from_url("https://example.org/lunch", day);
        assert!(result.is_mock());
        assert_eq!(
            result,
            MenuFetchResult::Mock {
                reason: MockReason::UrlFetchUnsupported,
                items: source.menu_for_date(day),
            }
        );

        let blank = source.menu_from_url("  ", day);
        assert!(matches!(
            blank,
            MenuFetchResult::Mock {
                reason: MockReason::NoUrl,
                ..
            }
        ));
        assert_eq!(blank.into_items(), source.menu_for_date(day));
    }

    #[test]
    fn test_fetched_items_accessor() {
        let fetched = MenuFetchResult::Fetched(vec!["Soup".to_string()]);
        assert!(!fetched.is_mock());
        assert_eq!(fetched.items(), ["Soup"]);
    }
}
