//! Page category constants for pages rendered inside a tab.
//!
//! Every page declares an HTML `id` of the form `{entity}--{category}`
//! (e.g. `"a001_documento--list"`) and a `data-page-category` with one of
//! the constants below. The entity part matches the `domain/` directory.

/// Table of records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Entry / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Multi-record operation (bulk payroll liquidation).
pub const PAGE_CAT_USECASE: &str = "usecase";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_USECASE];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_documento--detail"));
        assert!(is_valid_page_id("a007_nomina--usecase"));
        assert!(!is_valid_page_id("a001_documento"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_documento--dashboard"));
    }
}
