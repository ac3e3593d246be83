//! Customer store abstraction and full-listing helper

use async_trait::async_trait;

use super::endpoints::SearchCriteria;
use crate::error::ApiResult;
use crate::models::{Customer, SearchResults};

/// Anything that can list customers matching search criteria
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Return one result page for the given criteria, in store order
    async fn get_list(&self, criteria: &SearchCriteria) -> ApiResult<SearchResults<Customer>>;
}

/// Fetch every customer from the store.
///
/// With a non-zero `page_size` pages are requested until the store's
/// `total_count` is reached or an empty page comes back. Without a reported
/// total a short page also ends the listing. A `page_size`
/// of 0 sends the default criteria once and returns whatever that yields.
pub async fn get_all_customers<S>(store: &S, page_size: u32) -> ApiResult<Vec<Customer>>
where
    S: CustomerStore + ?Sized,
{
    if page_size == 0 {
        let results = store.get_list(&SearchCriteria::default()).await?;
        tracing::debug!(
            "Fetched {} customers in a single request (total_count: {:?})",
            results.items.len(),
            results.total_count
        );
        return Ok(results.items);
    }

    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        let criteria = SearchCriteria::new().page_size(page_size).current_page(page);
        let response = store.get_list(&criteria).await?;

        let count = response.items.len();
        tracing::debug!(
            "Customers page {} got {} items (total_count: {:?})",
            page,
            count,
            response.total_count
        );
        all_items.extend(response.items);

        if count == 0 {
            break;
        }

        // Stores may cap the page size below the requested one, so a short
        // page only means the end when no total is reported
        match response.total_count {
            Some(total) => {
                if all_items.len() as u64 >= total {
                    break;
                }
                if (count as u32) < page_size {
                    tracing::debug!(
                        "Store returned {} of {} requested items, continuing to total {}",
                        count,
                        page_size,
                        total
                    );
                }
            }
            None => {
                if (count as u32) < page_size {
                    break;
                }
            }
        }

        page += 1;
    }

    Ok(all_items)
}
