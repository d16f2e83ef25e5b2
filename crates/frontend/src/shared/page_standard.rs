//! Page category constants.
//!
//! Every page rendered inside a tab declares an HTML `id` in the form
//! `{entity}--{category}` (e.g. `"a006_cashflow_plan--list"`) and a
//! `data-page-category` taken from the constants below.

/// Records table with filters
pub const PAGE_CAT_LIST: &str = "list";

/// Single record form
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Multi-step action (wizards, bulk flows)
pub const PAGE_CAT_USECASE: &str = "usecase";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_USECASE];

/// `{entity}--{category}` with both parts non-empty
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a006_cashflow_plan--list"));
        assert!(!is_valid_page_id("a006_cashflow_plan"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_USECASE));
        assert!(!is_known_category("dashboard"));
    }
}
