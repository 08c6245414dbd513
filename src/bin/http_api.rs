//! HTTP facade over the catalog search, for frontends that cannot call the
//! catalog service directly.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use tunegrep::clients::entities::MatchRecord;
use tunegrep::clients::itunes::Entity;
use tunegrep::lookup::{CatalogLookup, ConfigBuilder};

// Page size the web frontend always requested
const SEARCH_LIMIT: u32 = 20;

#[derive(Parser)]
#[command(name = "http_api")]
#[command(version, about = "HTTP endpoint for catalog search", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: String,
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search(
    State(lookup): State<Arc<CatalogLookup>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query parameter required" })),
        );
    };

    match lookup.search(&query, None).await {
        Ok(entries) => {
            let results: Vec<MatchRecord> = entries.iter().map(MatchRecord::from).collect();
            (
                StatusCode::OK,
                Json(json!({ "resultCount": results.len(), "results": results })),
            )
        }
        Err(e) => {
            warn!("Catalog search failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch music", "details": e.to_string() })),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .entity(Entity::Song)
        .limit(SEARCH_LIMIT)
        .build()?;
    let lookup = Arc::new(CatalogLookup::new(config));

    let app = Router::new()
        .route("/search", get(search))
        .with_state(lookup);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("Listening on {} ...", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
