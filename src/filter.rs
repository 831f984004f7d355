/// Card filtering
///
/// A query is split into lowercase whitespace-delimited terms; a card
/// matches iff every term is a substring of its precomputed lowercase
/// brand + name haystack (logical AND, any order). Re-evaluation is pure
/// and idempotent over the full card set; no indexing, no ranking.

use crate::model::Category;
use crate::view::CardEntry;
use log::debug;

/// Result of one filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Total cards in the dashboard
    pub total: usize,
    /// Cards left visible by this pass
    pub visible: usize,
    /// Visible cards per category, indexed by `Category::index`
    pub category_visible: [usize; 4],
    /// False when the query was empty (everything restored)
    pub query_active: bool,
}

impl FilterOutcome {
    pub fn visible_in(&self, category: Category) -> usize {
        self.category_visible[category.index()]
    }

    /// A section is empty under filter when the query is active and it has
    /// no visible cards left
    pub fn empty_under_filter(&self, category: Category) -> bool {
        self.query_active && self.visible_in(category) == 0
    }
}

/// Split a query into lowercase search terms
pub fn parse_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// True iff every term occurs somewhere in the haystack
pub fn matches(haystack: &str, terms: &[String]) -> bool {
    terms.iter().all(|t| haystack.contains(t.as_str()))
}

/// Re-evaluate visibility of every card against the query.
///
/// An empty query restores all cards to visible.
pub fn apply_filter(entries: &mut [CardEntry], query: &str) -> FilterOutcome {
    let terms = parse_query(query);
    let mut category_visible = [0usize; 4];
    let mut visible = 0;

    for entry in entries.iter_mut() {
        entry.visible = terms.is_empty() || matches(&entry.haystack, &terms);
        if entry.visible {
            visible += 1;
            category_visible[entry.category.index()] += 1;
        }
    }

    debug!("filter {:?} left {} of {} cards visible", terms, visible, entries.len());

    FilterOutcome { total: entries.len(), visible, category_visible, query_active: !terms.is_empty() }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;
