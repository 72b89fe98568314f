mod cli;
mod display;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use cli::{Cli, Command, ListArgs};
use display::{format_page_footer, people_table, planets_table};
use swapi_client::{ApiClient, ClientConfig, ListQuery, PageResponse};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = cli.client_config();
    debug!(base_url = config.base_url(), timeout_ms = %config.timeout_millis(), "resolved config");

    match cli.command {
        Command::Config => cmd_config(&config)?,
        Command::People(args) => {
            let client = ApiClient::new(config)?;
            cmd_people(&client, &args).await?
        }
        Command::Planets(args) => {
            let client = ApiClient::new(config)?;
            cmd_planets(&client, &args).await?
        }
        Command::Get { path } => {
            let client = ApiClient::new(config)?;
            cmd_get(&client, &path).await?
        }
    }

    Ok(())
}

fn cmd_config(config: &ClientConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

async fn cmd_people(client: &ApiClient, args: &ListArgs) -> Result<()> {
    let query = args.to_query(ListQuery::people());
    let page = client
        .people(&query)
        .await
        .with_context(|| format!("failed to list people from {}", client.url("people")))?;

    if args.json {
        return print_json(&page);
    }
    people_table(&page).print();
    print_footer(&page);
    Ok(())
}

async fn cmd_planets(client: &ApiClient, args: &ListArgs) -> Result<()> {
    let query = args.to_query(ListQuery::planets());
    let page = client
        .planets(&query)
        .await
        .with_context(|| format!("failed to list planets from {}", client.url("planets")))?;

    if args.json {
        return print_json(&page);
    }
    planets_table(&page).print();
    print_footer(&page);
    Ok(())
}

async fn cmd_get(client: &ApiClient, path: &str) -> Result<()> {
    let body: Value = client
        .get_json(path)
        .await
        .with_context(|| format!("GET {} failed", client.url(path)))?;
    print_json(&body)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_footer<T>(page: &PageResponse<T>) {
    println!();
    println!("{}", format_page_footer(page));
}
