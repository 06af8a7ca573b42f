//! Shared data types for the shopping list.

use crate::error::UnknownCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed grouping tag for an item.
///
/// Variant order is the taxonomy order used when presenting groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Bakery,
    Pantry,
    Frozen,
    Household,
    Personal,
    #[default]
    Other,
}

impl Category {
    /// Every category, in taxonomy order.
    pub const ALL: [Category; 9] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Bakery,
        Category::Pantry,
        Category::Frozen,
        Category::Household,
        Category::Personal,
        Category::Other,
    ];

    /// Stable identifier used on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Bakery => "bakery",
            Category::Pantry => "pantry",
            Category::Frozen => "frozen",
            Category::Household => "household",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat & Seafood",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Household => "Household",
            Category::Personal => "Personal Care",
            Category::Other => "Other",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Category::Produce => "🥬",
            Category::Dairy => "🥛",
            Category::Meat => "🥩",
            Category::Bakery => "🥖",
            Category::Pantry => "🥫",
            Category::Frozen => "🧊",
            Category::Household => "🧽",
            Category::Personal => "🧴",
            Category::Other => "📦",
        }
    }

    /// Position in the taxonomy.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(Self::ALL.len() - 1)
    }

    /// The following category, wrapping around. Used to cycle a picker.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding category, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One entry in the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub category: Category,
    pub purchased: bool,
    /// ISO-8601 creation time, never changed after creation.
    pub created_at: String,
}

/// Which items a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Purchased,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Purchased];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All Items",
            Filter::Pending => "Pending",
            Filter::Purchased => "Purchased",
        }
    }

    /// Whether `item` is visible under this filter.
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !item.purchased,
            Filter::Purchased => item.purchased,
        }
    }

    /// Cycle to the next filter.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Purchased,
            Filter::Purchased => Filter::All,
        }
    }
}

/// Derived item totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemCounts {
    pub total: usize,
    pub pending: usize,
    pub purchased: usize,
}

impl ItemCounts {
    /// Count for the bucket a filter selects.
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Purchased => self.purchased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.id().parse::<Category>(), Ok(category));
        }
        assert!("Dairy".parse::<Category>().is_err());
        assert!("snacks".parse::<Category>().is_err());
    }

    #[test]
    fn category_cycling_wraps() {
        assert_eq!(Category::Other.next(), Category::Produce);
        assert_eq!(Category::Produce.prev(), Category::Other);
        assert_eq!(Category::Dairy.next().prev(), Category::Dairy);
    }

    #[test]
    fn item_serializes_with_camel_case_keys() {
        let item = Item {
            id: 1,
            name: "Milk".to_string(),
            quantity: 2,
            category: Category::Dairy,
            purchased: false,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["category"], "dairy");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn filter_matches_purchase_state() {
        let mut item = Item {
            id: 1,
            name: "Bread".to_string(),
            quantity: 1,
            category: Category::Bakery,
            purchased: false,
            created_at: String::new(),
        };
        assert!(Filter::All.matches(&item));
        assert!(Filter::Pending.matches(&item));
        assert!(!Filter::Purchased.matches(&item));

        item.purchased = true;
        assert!(!Filter::Pending.matches(&item));
        assert!(Filter::Purchased.matches(&item));
    }
}
