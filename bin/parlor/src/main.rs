//! Parlor Gateway Binary
//!
//! Runs the HTTP/WebSocket gateway plus the daily scheduler.
//! Listens on BIND_ADDR (e.g. 0.0.0.0:8080).

#[tokio::main]
async fn main() {
    parlor_core::log();
    parlor_core::kys();
    parlor_server::run().await.unwrap();
}
