//! Filtered collection queries

use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use serde::de::DeserializeOwned;

/// Query a collection endpoint (`dcim/devices`, relative to `/api/`).
///
/// Returns the first page unless `fetch_all` is set.
pub async fn query_resources<T: DeserializeOwned>(
    http: &HttpClient,
    endpoint: &str,
    filters: &[(&str, &str)],
    fetch_all: bool,
) -> Result<Vec<T>, NetBoxError> {
    let path = collection_path(http, endpoint, filters);

    if fetch_all {
        http.fetch_all_pages(&path).await
    } else {
        let page: PaginatedResponse<T> = http.get(&path).await?;
        Ok(page.results)
    }
}

fn collection_path(http: &HttpClient, endpoint: &str, filters: &[(&str, &str)]) -> String {
    match filters {
        [] => format!("/api/{}/", endpoint),
        _ => format!("/api/{}/?{}", endpoint, http.build_query_string(filters)),
    }
}
