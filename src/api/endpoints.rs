//! REST API endpoints for the customer store

/// API endpoint paths
pub mod paths {
    // Authentication
    pub const ADMIN_TOKEN: &str = "/rest/V1/integration/admin/token";

    // Customers
    pub const CUSTOMERS_SEARCH: &str = "/rest/V1/customers/search";
}

/// Search criteria for list endpoints
///
/// The default value carries no page size or page number and asks the store
/// for its unfiltered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub page_size: Option<u32>,
    pub current_page: Option<u32>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn current_page(mut self, page: u32) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Query string pairs in the store's `searchCriteria[...]` notation
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.page_size {
            query.push(("searchCriteria[pageSize]", size.to_string()));
        }
        if let Some(page) = self.current_page {
            query.push(("searchCriteria[currentPage]", page.to_string()));
        }
        // The search endpoint rejects requests without any searchCriteria parameter
        if query.is_empty() {
            query.push(("searchCriteria", String::new()));
        }
        query
    }
}
