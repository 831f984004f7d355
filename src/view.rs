/// Presentation seam between the dashboard logic and the terminal
///
/// The renderer and filter never touch the console directly; they write
/// through `DashboardView`. `MemoryView` records every call so both can be
/// unit tested without a real output surface.

use crate::model::Category;
#[cfg(test)]
use std::collections::HashMap;

/// Fixed text slots the renderer writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    LastChecked,
    OldDocName,
    NewDocName,
    CountNew,
    CountIncrease,
    CountDecrease,
    CountStockout,
    BubbleNew,
    BubbleStockout,
    FilterInfo,
}

impl Slot {
    /// Counter slot for a category
    pub fn count_for(category: Category) -> Slot {
        match category {
            Category::New => Slot::CountNew,
            Category::Increase => Slot::CountIncrease,
            Category::Decrease => Slot::CountDecrease,
            Category::Stockout => Slot::CountStockout,
        }
    }
}

/// Category-specific price markup for one card
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDisplay {
    /// Single current price with its row label ("Wholesale Price" / "Last Price")
    Single { label: &'static str, value: String },
    /// Old -> new transition with a signed percentage badge
    Change { old: String, new: String, badge: String },
}

/// Everything needed to draw one product card
#[derive(Debug, Clone, PartialEq)]
pub struct CardBody {
    pub brand: String,
    pub product_name: String,
    /// Display page number, "?" when the document has none
    pub page: String,
    pub price: PriceDisplay,
}

/// One rendered card plus the state the filter operates on
#[derive(Debug, Clone)]
pub struct CardEntry {
    pub category: Category,
    /// Precomputed lowercase brand + name the filter matches against
    pub haystack: String,
    pub visible: bool,
    pub body: CardBody,
}

/// What the renderer and filter need from a presentation surface
pub trait DashboardView {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_visible(&mut self, slot: Slot, visible: bool);
    /// Start a category grid that will receive `total` cards
    fn begin_grid(&mut self, category: Category, total: usize);
    fn push_card(&mut self, category: Category, body: &CardBody);
    /// Replace a grid with a placeholder message (empty list, or empty under filter)
    fn grid_placeholder(&mut self, category: Category, text: &str);
}

/// In-memory fake view for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryView {
    pub texts: HashMap<Slot, String>,
    pub visibility: HashMap<Slot, bool>,
    pub grids: HashMap<Category, Vec<CardBody>>,
    pub placeholders: HashMap<Category, String>,
}

#[cfg(test)]
impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, slot: Slot) -> &str {
        self.texts.get(&slot).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn cards_in(&self, category: Category) -> usize {
        self.grids.get(&category).map(|g| g.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl DashboardView for MemoryView {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) {
        self.visibility.insert(slot, visible);
    }

    fn begin_grid(&mut self, category: Category, _total: usize) {
        self.grids.insert(category, Vec::new());
        self.placeholders.remove(&category);
    }

    fn push_card(&mut self, category: Category, body: &CardBody) {
        self.grids.entry(category).or_default().push(body.clone());
    }

    fn grid_placeholder(&mut self, category: Category, text: &str) {
        self.grids.remove(&category);
        self.placeholders.insert(category, text.to_string());
    }
}
