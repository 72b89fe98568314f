use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Fields shared by every listed entity.
pub trait Entity {
    fn name(&self) -> Option<&str>;
    fn created(&self) -> Option<DateTime<Utc>>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub diameter: Option<String>,
    pub climate: Option<String>,
    pub gravity: Option<String>,
    pub terrain: Option<String>,
    pub url: Option<String>,
}

impl Entity for Person {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

impl Entity for Planet {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

/// One page of a listing, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl<T> PageResponse<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Created => "created",
        }
    }
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "created" => Ok(SortKey::Created),
            _ => Err(ApiError::InvalidQuery(format!(
                "unknown sort key: {} (expected 'name' or 'created')",
                s
            ))),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ApiError::InvalidQuery(format!(
                "unknown sort direction: {} (expected 'asc' or 'desc')",
                s
            ))),
        }
    }
}
