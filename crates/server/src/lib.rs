//! HTTP/WebSocket Gateway
//!
//! The boundary between the chat platform and the router. A platform
//! adapter POSTs inbound events here and holds one WebSocket per
//! channel for outbound traffic.
//!
//! ## Submodules
//!
//! - [`switchboard`] — Outbound delivery and the community roster
//! - [`handlers`] — Route handlers for events and channel attachment
//! - [`dto`] — Wire types for events, frames, and the boot roster

pub mod dto;
pub mod handlers;
pub mod switchboard;

pub use switchboard::Switchboard;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use parlor_records::RecordStore;
use parlor_router::Router;
use parlor_router::Scheduler;
use std::sync::Arc;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[cfg(feature = "database")]
async fn store() -> anyhow::Result<Arc<dyn RecordStore>> {
    let store = parlor_records::PgStore::connect().await?;
    store.migrate().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn store() -> anyhow::Result<Arc<dyn RecordStore>> {
    log::warn!("[server] database feature off, records live in memory only");
    Ok(Arc::new(parlor_records::MemoryStore::new()))
}

#[rustfmt::skip]
pub async fn run() -> anyhow::Result<()> {
    let store = store().await?;
    let switchboard = Arc::new(Switchboard::from_env()?);
    let router = Arc::new(Router::new(store.clone(), switchboard.clone() as Arc<dyn parlor_router::Chat>));
    tokio::spawn(Scheduler::new(store, switchboard.clone() as Arc<dyn parlor_router::Chat>).run());
    let switchboard = web::Data::new(switchboard);
    let router = web::Data::new(router);
    log::info!("starting gateway");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(router.clone())
            .app_data(switchboard.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/event")
                    .route("/interaction", web::post().to(handlers::interaction))
                    .route("/message", web::post().to(handlers::message)),
            )
            .route("/channel/{id}/attach", web::get().to(handlers::attach))
    })
    .workers(2)
    .bind(std::env::var("BIND_ADDR")?)?
    .run()
    .await?;
    Ok(())
}
