use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use oncall_client::infra::notifications::LogNotifier;
use oncall_client::{ClientConfig, IntegrationFilters, PaginatedQuery, RootStore};
use oncall_model::{AlertReceiveChannelId, ChannelFilterId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "oncallctl", about = "Inspect OnCall integrations and their routes")]
struct Cli {
    /// Config file (defaults to <config_dir>/oncall-client/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the API base URL
    #[arg(long, global = true)]
    url: Option<String>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List or show integrations
    Integrations {
        #[command(subcommand)]
        action: IntegrationsAction,
    },
    /// Inspect and reorder the routes of an integration
    Routes {
        #[command(subcommand)]
        action: RoutesAction,
    },
    /// Alert counters for all integrations or one
    Counters { integration: Option<String> },
    /// ServiceNow integration helpers
    Servicenow {
        #[command(subcommand)]
        action: ServiceNowAction,
    },
}

#[derive(Subcommand)]
enum IntegrationsAction {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    Show {
        id: String,
    },
}

#[derive(Subcommand)]
enum RoutesAction {
    List {
        integration: String,
    },
    Move {
        integration: String,
        from: usize,
        to: usize,
    },
    Delete {
        integration: String,
        route: String,
    },
}

#[derive(Subcommand)]
enum ServiceNowAction {
    CheckToken { integration: String },
    Statuses { integration: String },
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("oncall_client", LevelFilter::Info)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

fn integration_id(raw: &str) -> Result<AlertReceiveChannelId> {
    AlertReceiveChannelId::new(raw).context("invalid integration id")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    let root = RootStore::from_config(&config, Arc::new(LogNotifier))?;
    let store = &root.alert_receive_channel_store;

    match cli.command {
        Command::Integrations { action } => match action {
            IntegrationsAction::List {
                search,
                page,
                per_page,
            } => {
                if page.is_none() && per_page.is_none() {
                    let items = store.fetch_items(search.unwrap_or_default()).await?;
                    print_json(&items, cli.pretty)?;
                } else {
                    let filters = IntegrationFilters {
                        search,
                        ..IntegrationFilters::default()
                    };
                    let mut query = PaginatedQuery::new(filters).page(page.unwrap_or(1));
                    if let Some(per_page) = per_page {
                        query = query.per_page(per_page);
                    }
                    let items = store.fetch_paginated_items(query).await?;
                    print_json(&items, cli.pretty)?;
                }
            }
            IntegrationsAction::Show { id } => {
                let item = store.fetch_item_by_id(&integration_id(&id)?, false).await?;
                print_json(&item, cli.pretty)?;
            }
        },
        Command::Routes { action } => match action {
            RoutesAction::List { integration } => {
                let filters = store
                    .fetch_channel_filters(&integration_id(&integration)?, false)
                    .await?;
                print_json(&filters, cli.pretty)?;
            }
            RoutesAction::Move {
                integration,
                from,
                to,
            } => {
                let id = integration_id(&integration)?;
                store.fetch_channel_filters(&id, false).await?;
                store.move_channel_filter_to_position(&id, from, to).await?;
                print_json(&store.channel_filters(&id), cli.pretty)?;
            }
            RoutesAction::Delete { integration, route } => {
                let id = integration_id(&integration)?;
                let route = ChannelFilterId::new(route).context("invalid route id")?;
                store.fetch_channel_filters(&id, false).await?;
                store.delete_channel_filter(&route).await?;
                print_json(&store.channel_filters(&id), cli.pretty)?;
            }
        },
        Command::Counters { integration } => match integration {
            Some(raw) => {
                let counters = store
                    .fetch_counters_for_integration(&integration_id(&raw)?)
                    .await?;
                print_json(&counters, cli.pretty)?;
            }
            None => print_json(&store.fetch_counters().await?, cli.pretty)?,
        },
        Command::Servicenow { action } => match action {
            ServiceNowAction::CheckToken { integration } => {
                let has_token = store
                    .has_service_now_token(&integration_id(&integration)?)
                    .await;
                print_json(&serde_json::json!({ "has_token": has_token }), cli.pretty)?;
            }
            ServiceNowAction::Statuses { integration } => {
                let statuses = store
                    .fetch_service_now_status_list(&integration_id(&integration)?, false)
                    .await?;
                print_json(&statuses, cli.pretty)?;
            }
        },
    }

    Ok(())
}
