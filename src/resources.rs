use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::model::{PageResponse, Person, Planet, SortDirection, SortKey};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 15;

const PEOPLE_PATH: &str = "/people";
const PLANETS_PATH: &str = "/planets";

/// Query parameters accepted by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    pub sort: SortKey,
    pub dir: SortDirection,
}

impl ListQuery {
    /// Defaults used by `/people`: descending by name.
    pub fn people() -> Self {
        Self::with_direction(SortDirection::Desc)
    }

    /// Defaults used by `/planets`.
    pub fn planets() -> Self {
        Self::with_direction(SortDirection::Asc)
    }

    fn with_direction(dir: SortDirection) -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort: SortKey::Name,
            dir,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ApiError::InvalidQuery(format!(
                "page must be at least 1 (got {})",
                self.page
            )));
        }
        if self.size < 1 {
            return Err(ApiError::InvalidQuery(format!(
                "size must be at least 1 (got {})",
                self.size
            )));
        }
        Ok(())
    }
}

impl ApiClient {
    pub async fn people(&self, query: &ListQuery) -> Result<PageResponse<Person>> {
        self.list(PEOPLE_PATH, query).await
    }

    pub async fn planets(&self, query: &ListQuery) -> Result<PageResponse<Planet>> {
        self.list(PLANETS_PATH, query).await
    }

    async fn list<T>(&self, path: &str, query: &ListQuery) -> Result<PageResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        query.validate()?;
        debug!(path, ?query, "listing");
        self.get_json_with_query(path, query).await
    }
}
