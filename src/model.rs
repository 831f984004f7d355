/// Report data model
///
/// This module defines the shape of a comparison report: the metadata block
/// produced by the comparator, the four category product lists, and the
/// price value/formatting rules shared by the renderer.

use serde::{Deserialize, Serialize};

/// A fetched comparison report between two source price lists.
///
/// Category lists default to empty when the document omits them; a missing
/// list is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: Metadata,
    #[serde(default)]
    pub newly_added_products: Vec<Product>,
    #[serde(default)]
    pub price_increased_products: Vec<Product>,
    #[serde(default)]
    pub price_decreased_products: Vec<Product>,
    #[serde(default)]
    pub stock_out_products: Vec<Product>,
}

impl Report {
    /// Get the product list for a category
    pub fn products(&self, category: Category) -> &[Product] {
        match category {
            Category::New => &self.newly_added_products,
            Category::Increase => &self.price_increased_products,
            Category::Decrease => &self.price_decreased_products,
            Category::Stockout => &self.stock_out_products,
        }
    }

    /// Total number of products across all four categories
    pub fn total_products(&self) -> usize {
        Category::ALL.iter().map(|c| self.products(*c).len()).sum()
    }
}

/// Metadata block: when the comparison ran and which documents it compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub comparison_date: String,
    #[serde(default)]
    pub old_pdf: String,
    #[serde(default)]
    pub new_pdf: String,
    #[serde(default)]
    pub old_pdf_total_products: Option<u64>,
    #[serde(default)]
    pub new_pdf_total_products: Option<u64>,
    #[serde(default)]
    pub summary: Summary,
}

/// Per-category counts as reported by the comparator.
///
/// These are display values only; they are not checked against the actual
/// list lengths (a mismatch is logged at debug level by the loader).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub newly_added_count: u64,
    #[serde(default)]
    pub price_increased_count: u64,
    #[serde(default)]
    pub price_decreased_count: u64,
    #[serde(default)]
    pub stock_out_count: u64,
}

impl Summary {
    pub fn count(&self, category: Category) -> u64 {
        match category {
            Category::New => self.newly_added_count,
            Category::Increase => self.price_increased_count,
            Category::Decrease => self.price_decreased_count,
            Category::Stockout => self.stock_out_count,
        }
    }
}

/// One line item within a report category list.
///
/// Which price fields are present depends on the category: new/stockout
/// entries carry a single current price, increase/decrease entries carry
/// the old and new prices plus the derived difference and percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub wholesale_price: Option<PriceValue>,
    #[serde(default)]
    pub wholesale_price_for_you: Option<PriceValue>,
    #[serde(default)]
    pub old_wholesale_price: Option<PriceValue>,
    #[serde(default)]
    pub old_wholesale_price_for_you: Option<PriceValue>,
    #[serde(default)]
    pub new_wholesale_price: Option<PriceValue>,
    #[serde(default)]
    pub new_wholesale_price_for_you: Option<PriceValue>,
    #[serde(default)]
    pub price_difference: Option<f64>,
    #[serde(default)]
    pub percentage_change: Option<f64>,
}

/// A price as it appears in the document: the extractor emits strings,
/// the comparator emits numbers for derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

/// One of the four report categories, each with its own grid and
/// price-display rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    New,
    Increase,
    Decrease,
    Stockout,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::New, Category::Increase, Category::Decrease, Category::Stockout];

    /// Section heading shown above the grid
    pub fn label(&self) -> &'static str {
        match self {
            Category::New => "Newly Added Products",
            Category::Increase => "Price Increased",
            Category::Decrease => "Price Decreased",
            Category::Stockout => "Out of Stock",
        }
    }

    /// Stable index for per-category counters
    pub fn index(&self) -> usize {
        match self {
            Category::New => 0,
            Category::Increase => 1,
            Category::Decrease => 2,
            Category::Stockout => 3,
        }
    }

    /// Whether this category shows an old -> new price transition
    pub fn is_change(&self) -> bool {
        matches!(self, Category::Increase | Category::Decrease)
    }
}

/// Format a price value for display.
///
/// Absent values, empty strings, numeric zero, and the extractor's "nan"
/// sentinel all render as "N/A". Strings with a leading number format that
/// number with thousands grouping (up to three fraction digits); strings
/// with no leading number are returned unchanged. A numeric-string "0" is
/// a value, not an absence, and formats to "0".
pub fn format_price(price: Option<&PriceValue>) -> String {
    match price {
        None => "N/A".to_string(),
        Some(PriceValue::Number(n)) => {
            if *n == 0.0 {
                "N/A".to_string()
            } else {
                group_thousands(*n)
            }
        }
        Some(PriceValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                return "N/A".to_string();
            }
            match parse_float_prefix(trimmed) {
                Some(n) => group_thousands(n),
                None => s.clone(),
            }
        }
    }
}

/// Parse the leading decimal number of a string, ignoring whatever trails
/// it ("1250 Tk" -> 1250.0). None when the string does not start with a
/// number.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                seen_digit = true;
                i += 1;
                end = i;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

/// Render a number with comma grouping and at most three fraction digits
fn group_thousands(n: f64) -> String {
    let negative = n < 0.0;
    let rounded = format!("{:.3}", n.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Option<PriceValue> {
        Some(PriceValue::Number(n))
    }

    fn text(s: &str) -> Option<PriceValue> {
        Some(PriceValue::Text(s.to_string()))
    }

    #[test]
    fn test_format_price_missing_is_na() {
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_price(text("").as_ref()), "N/A");
        assert_eq!(format_price(text("  ").as_ref()), "N/A");
        assert_eq!(format_price(text("nan").as_ref()), "N/A");
    }

    #[test]
    fn test_format_price_numeric_zero_is_na() {
        assert_eq!(format_price(num(0.0).as_ref()), "N/A");
    }

    #[test]
    fn test_format_price_zero_string_is_a_value() {
        // The string "0" carries a number, unlike an absent price
        assert_eq!(format_price(text("0").as_ref()), "0");
        assert_eq!(format_price(text("0.00").as_ref()), "0");
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(num(12345.5).as_ref()), "12,345.5");
        assert_eq!(format_price(num(1234567.0).as_ref()), "1,234,567");
        assert_eq!(format_price(num(950.0).as_ref()), "950");
        assert_eq!(format_price(text("1250").as_ref()), "1,250");
        assert_eq!(format_price(text("1234.567").as_ref()), "1,234.567");
    }

    #[test]
    fn test_format_price_uses_leading_number_of_string() {
        assert_eq!(format_price(text("1250 Tk").as_ref()), "1,250");
        assert_eq!(format_price(text("12345.5/=").as_ref()), "12,345.5");
        assert_eq!(format_price(text("-150 off").as_ref()), "-150");
    }

    #[test]
    fn test_format_price_non_numeric_string_unchanged() {
        assert_eq!(format_price(text("Call for price").as_ref()), "Call for price");
        assert_eq!(format_price(text("TK 500/=").as_ref()), "TK 500/=");
    }

    #[test]
    fn test_price_value_deserializes_number_or_string() {
        let n: PriceValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(n, PriceValue::Number(42.5));

        let s: PriceValue = serde_json::from_str("\"1250\"").unwrap();
        assert_eq!(s, PriceValue::Text("1250".to_string()));
    }

    #[test]
    fn test_report_missing_lists_default_empty() {
        let json = r#"{
            "metadata": {
                "comparison_date": "2024-06-01T10:00:00",
                "old_pdf": "lists/old.pdf",
                "new_pdf": "lists/new.pdf",
                "summary": { "newly_added_count": 1 }
            },
            "newly_added_products": [
                { "brand": "Acme", "product_name": "Soap", "page": 3 }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.newly_added_products.len(), 1);
        assert!(report.price_increased_products.is_empty());
        assert!(report.stock_out_products.is_empty());
        assert_eq!(report.metadata.summary.newly_added_count, 1);
        assert_eq!(report.metadata.summary.stock_out_count, 0);
    }

    #[test]
    fn test_product_price_fields_accept_mixed_types() {
        let json = r#"{
            "brand": "Acme",
            "product_name": "Soap",
            "page": 2,
            "old_wholesale_price_for_you": "1200",
            "new_wholesale_price_for_you": 1350.0,
            "price_difference": 150.0,
            "percentage_change": 12.5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.old_wholesale_price_for_you, Some(PriceValue::Text("1200".to_string())));
        assert_eq!(product.new_wholesale_price_for_you, Some(PriceValue::Number(1350.0)));
        assert_eq!(product.percentage_change, Some(12.5));
    }
}
