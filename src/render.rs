/// Dashboard rendering - Report to view transformations
///
/// Given a parsed report, this module writes the header slots (timestamp,
/// source document names, summary counts, bubbles) and builds one card per
/// product per category with the category's price rule. It returns the flat
/// card list the filter operates on; re-rendering after a filter pass goes
/// through `render_filtered`.

use crate::filter::FilterOutcome;
use crate::model::{Category, Product, Report, format_price};
use crate::view::{CardBody, CardEntry, DashboardView, PriceDisplay, Slot};
use chrono::NaiveDateTime;

const EMPTY_CATEGORY_TEXT: &str = "No products found for this category.";
const EMPTY_FILTER_TEXT: &str = "No matching products.";

/// Render the full dashboard into the view and return the card entries
pub fn render_dashboard(report: &Report, view: &mut dyn DashboardView) -> Vec<CardEntry> {
    let meta = &report.metadata;

    view.set_text(Slot::LastChecked, &format_last_checked(&meta.comparison_date));
    view.set_text(Slot::OldDocName, &doc_display(&meta.old_pdf, meta.old_pdf_total_products));
    view.set_text(Slot::NewDocName, &doc_display(&meta.new_pdf, meta.new_pdf_total_products));

    for category in Category::ALL {
        view.set_text(Slot::count_for(category), &meta.summary.count(category).to_string());
    }
    view.set_text(Slot::BubbleNew, &meta.summary.newly_added_count.to_string());
    view.set_text(Slot::BubbleStockout, &meta.summary.stock_out_count.to_string());

    let mut entries = Vec::with_capacity(report.total_products());
    for category in Category::ALL {
        render_grid(report.products(category), category, view, &mut entries);
    }
    entries
}

fn render_grid(
    products: &[Product],
    category: Category,
    view: &mut dyn DashboardView,
    entries: &mut Vec<CardEntry>,
) {
    if products.is_empty() {
        view.grid_placeholder(category, EMPTY_CATEGORY_TEXT);
        return;
    }

    view.begin_grid(category, products.len());
    for product in products {
        let body = card_body(product, category);
        view.push_card(category, &body);
        entries.push(CardEntry {
            category,
            haystack: format!("{} {}", product.brand.to_lowercase(), product.product_name.to_lowercase()),
            visible: true,
            body,
        });
    }
}

/// Re-render the grids showing only visible cards, plus the filter info line
pub fn render_filtered(entries: &[CardEntry], query: &str, outcome: &FilterOutcome, view: &mut dyn DashboardView) {
    view.set_visible(Slot::FilterInfo, outcome.query_active);
    if outcome.query_active {
        view.set_text(
            Slot::FilterInfo,
            &format!("{} of {} products match \"{}\"", outcome.visible, outcome.total, query),
        );
    }

    for category in Category::ALL {
        let in_category: Vec<&CardEntry> = entries.iter().filter(|e| e.category == category).collect();
        if in_category.is_empty() {
            view.grid_placeholder(category, EMPTY_CATEGORY_TEXT);
            continue;
        }
        if outcome.empty_under_filter(category) {
            view.grid_placeholder(category, EMPTY_FILTER_TEXT);
            continue;
        }

        view.begin_grid(category, outcome.visible_in(category));
        for entry in in_category.iter().filter(|e| e.visible) {
            view.push_card(category, &entry.body);
        }
    }
}

/// Build the card markup for one product under a category's price rule
pub fn card_body(product: &Product, category: Category) -> CardBody {
    let price = if category.is_change() {
        let badge_icon = if category == Category::Increase { "↑" } else { "↓" };
        PriceDisplay::Change {
            old: format_price(product.old_wholesale_price_for_you.as_ref()),
            new: format_price(product.new_wholesale_price_for_you.as_ref()),
            badge: format!(
                "{} {} ({}%)",
                badge_icon,
                product.price_difference.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string()),
                product.percentage_change.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string()),
            ),
        }
    } else {
        let label = match category {
            Category::New => "Wholesale Price",
            _ => "Last Price",
        };
        PriceDisplay::Single { label, value: format_price(product.wholesale_price_for_you.as_ref()) }
    };

    CardBody {
        brand: product.brand.clone(),
        product_name: product.product_name.clone(),
        page: product.page.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string()),
        price,
    }
}

/// Header line for a source document: short name plus its product total
/// when the comparator reported one
fn doc_display(path: &str, total: Option<u64>) -> String {
    let name = short_doc_name(path);
    match total {
        Some(t) => format!("{} ({} products)", name, t),
        None => name,
    }
}

/// Derive a short display name from a source document path:
/// strip directories and the .pdf extension
pub fn short_doc_name(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.strip_suffix(".pdf").or_else(|| name.strip_suffix(".PDF")).unwrap_or(name).to_string()
}

/// Format the comparison timestamp for local display, falling back to the
/// raw string when it does not parse
pub fn format_last_checked(raw: &str) -> String {
    // The comparator emits a naive ISO-8601 local timestamp
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.naive_local().format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
