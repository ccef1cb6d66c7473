// Shared harness for the integration tests. Each test gets its own
// timestamped database through `state::connect`, serialized by a global
// lock, and drops it again on teardown. When no MongoDB is reachable the
// test is skipped rather than failed, so the pure-logic suites still run
// everywhere.

use std::{
    env,
    sync::{Mutex, MutexGuard, OnceLock},
    time::{SystemTime, UNIX_EPOCH},
};

use mongodb::Client;

use ledgerbook::state::{AppState, connect};

static TEST_DB_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub struct TestContext {
    pub state: AppState,
    uri: String,
    db_name: String,
    _guard: MutexGuard<'static, ()>,
}

fn mongo_uri() -> String {
    env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

pub async fn setup_state() -> Option<TestContext> {
    let guard = TEST_DB_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("failed to lock test db mutex");

    let uri = mongo_uri();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis();
    let db_name = format!("ledgerbooktest_{stamp}");

    match connect(&uri, &db_name).await {
        Ok(state) => Some(TestContext {
            state,
            uri,
            db_name,
            _guard: guard,
        }),
        Err(err) => {
            eprintln!("Skipping test; cannot connect to MongoDB: {err:?}");
            drop(guard);
            None
        }
    }
}

pub async fn teardown(ctx: Option<TestContext>) {
    if let Some(ctx) = ctx {
        if let Ok(client) = Client::with_uri_str(&ctx.uri).await {
            let _ = client.database(&ctx.db_name).drop().await;
        }
        drop(ctx);
    }
}
