use serde::{Deserialize, Serialize};

/// Paginated list envelope used by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<T>,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub current_page_number: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Page<T> {
    pub fn single(results: Vec<T>) -> Self {
        Self {
            count: Some(results.len() as u64),
            page_size: Some(results.len() as u64),
            current_page_number: Some(1),
            total_pages: Some(1),
            next: None,
            previous: None,
            results,
        }
    }
}
