//! Configured HTTP client for the SWAPI aggregation backend.
//!
//! Build one [`ApiClient`] at startup and pass it (or cheap clones of it)
//! to every call site:
//!
//! ```no_run
//! # async fn run() -> swapi_client::Result<()> {
//! use swapi_client::{ApiClient, ListQuery};
//!
//! let client = ApiClient::from_env()?;
//! let page = client.people(&ListQuery::people()).await?;
//! println!("{} people", page.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod resources;

pub use config::{API_BASE_ENV, ClientConfig, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use error::{ApiError, Result};
pub use http::ApiClient;
pub use model::{Entity, PageResponse, Person, Planet, SortDirection, SortKey};
pub use resources::ListQuery;
