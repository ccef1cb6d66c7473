// main.rs
// Axum server wiring: connects to MongoDB and serves the bookkeeping API on
// :8080.
//
// Endpoints:
// - /api/clients[...]                      -> client registry CRUD
// - /api/clients/{id}/balance-sheet?year=  -> balance sheet fetch/save
// - /api/clients/{id}/profit-loss?year=    -> P&L fetch/save
// - /api/previous-*?clientId=&year=        -> previous-year reference data
// - /api/client-years[...]                 -> fiscal years with data
// - /api/reports/{pdf,excel}/{id}/{year}   -> statement exports
// - /api/reset                             -> wipe everything

use dotenvy::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use ledgerbook::{app, state};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let state = Arc::new(
        state::init_state()
            .await
            .expect("failed to initialize MongoDB state"),
    );

    let router = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    log::info!("listening on {addr}");
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, router)
        .await
        .expect("server terminated unexpectedly");
}
