use clap::{Args, Parser, Subcommand};

use swapi_client::{ClientConfig, ListQuery, SortDirection, SortKey};

#[derive(Parser)]
#[command(about = "SWAPI client - query the people and planets listings", version)]
pub struct Cli {
    /// API base URL (falls back to $VITE_API_BASE, then http://localhost:6969/api)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// A non-empty `--base-url` wins; otherwise the environment decides.
    pub fn client_config(&self) -> ClientConfig {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    fn client_config_with<F>(&self, lookup: F) -> ClientConfig
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => ClientConfig::with_base_url(Some(url.to_string())),
            None => ClientConfig::from_lookup(lookup),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the resolved client configuration
    Config,
    /// List people
    People(ListArgs),
    /// List planets
    Planets(ListArgs),
    /// GET a path relative to the base URL and print the JSON body
    Get {
        /// Relative path or absolute URL
        path: String,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,
    /// Page size
    #[arg(long)]
    pub size: Option<u32>,
    /// Case-insensitive name filter
    #[arg(long)]
    pub search: Option<String>,
    /// Sort key (name or created)
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Sort direction (asc or desc)
    #[arg(long)]
    pub dir: Option<SortDirection>,
    /// Print the raw page as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Overlays the given flags on top of an endpoint's defaults.
    pub fn to_query(&self, defaults: ListQuery) -> ListQuery {
        ListQuery {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
            search: self.search.clone().unwrap_or(defaults.search),
            sort: self.sort.unwrap_or(defaults.sort),
            dir: self.dir.unwrap_or(defaults.dir),
        }
    }
}
