use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use thriftfinder::api::create_router;
use thriftfinder::config::CONFIG;
use thriftfinder::data_models::SearchQuery;
use thriftfinder::pipeline::SearchPipeline;

#[derive(Parser, Debug)]
#[command(name = "thriftfinder", about = "Find the cheapest second-hand listing across marketplaces")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overrides BIND_ADDR
        #[arg(long)]
        addr: Option<String>,
    },
    /// Resolve one query and print the results as JSON
    Search {
        /// Free-text description
        #[arg(short, long)]
        q: Option<String>,
        /// Product page url
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let pipeline = Arc::new(SearchPipeline::new(&CONFIG)?);

    match cli.command {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| CONFIG.bind_addr.clone());
            tracing::info!(
                %addr,
                provider = pipeline.provider_name().unwrap_or("mock"),
                "starting server"
            );
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            axum::serve(listener, create_router(pipeline)).await?;
        }
        Command::Search { q, url } => {
            let query = SearchQuery::new(q, url);
            let results = pipeline.search(query).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}
