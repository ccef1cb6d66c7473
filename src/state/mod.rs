// state module: AppState, MongoDB initialization, and re-exports of the
// client and statement stores.

use anyhow::Result;
use mongodb::{Client as MongoClient, Collection, Database};
use std::env;

use crate::models::Client;

mod clients;
mod statements;

pub use clients::*;
pub use statements::*;

#[derive(Clone)]
pub struct AppState {
    pub clients: Collection<Client>,
    pub balance_sheets: Collection<BalanceSheetDoc>,
    pub profit_loss: Collection<ProfitLossDoc>,
}

/// Connects to the given database and prepares the collections. Callers
/// that already know where they want to live (the test harness) use this
/// directly; the server goes through `init_state`.
pub async fn connect(uri: &str, db_name: &str) -> Result<AppState> {
    let client = MongoClient::with_uri_str(uri).await?;
    let db = client.database(db_name);

    ensure_collections(&db).await?;

    Ok(AppState {
        clients: db.collection::<Client>("clients"),
        balance_sheets: db.collection::<BalanceSheetDoc>("balanceSheets"),
        profit_loss: db.collection::<ProfitLossDoc>("profitAndLoss"),
    })
}

pub async fn init_state() -> Result<AppState> {
    let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let db_name = env::var("MONGODB_DB").unwrap_or_else(|_| "ledgerbook".to_string());
    connect(&uri, &db_name).await
}

// Explicit, idempotent collection setup at process start; no runtime
// "database initialized" flag.
async fn ensure_collections(db: &Database) -> Result<()> {
    let existing = db.list_collection_names().await?;
    for name in ["clients", "balanceSheets", "profitAndLoss"] {
        if !existing.iter().any(|n| n == name) {
            db.create_collection(name).await?;
        }
    }
    Ok(())
}
