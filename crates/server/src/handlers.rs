use super::Switchboard;
use super::dto::InteractionDto;
use super::dto::MessageDto;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use parlor_core::Channel;
use parlor_core::ID;
use parlor_router::Router;
use std::sync::Arc;

pub async fn interaction(
    router: web::Data<Arc<Router>>,
    body: web::Json<InteractionDto>,
) -> impl Responder {
    match body.into_inner().into_event() {
        Ok(event) => {
            router.interaction(event).await;
            HttpResponse::Ok().json(serde_json::json!({ "status": "accepted" }))
        }
        Err(e) => HttpResponse::BadRequest().body(e),
    }
}

pub async fn message(
    router: web::Data<Arc<Router>>,
    body: web::Json<MessageDto>,
) -> impl Responder {
    router.message(body.into_inner().into()).await;
    HttpResponse::Ok().json(serde_json::json!({ "status": "accepted" }))
}

/// Spawns a WebSocket bridge carrying a channel's outbound frames.
/// Inbound traffic arrives over the HTTP event routes, so anything the
/// socket sends besides Close is ignored.
pub async fn attach(
    switchboard: web::Data<Arc<Switchboard>>,
    path: web::Path<u64>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let channel: ID<Channel> = ID::from(path.into_inner());
    match actix_ws::handle(&req, body) {
        Ok((response, mut session, mut stream)) => {
            let mut rx = switchboard.attach(channel).await;
            actix_web::rt::spawn(async move {
                use futures::StreamExt;
                'sesh: loop {
                    tokio::select! {
                        biased;
                        frame = rx.recv() => match frame {
                            Some(json) => if session.text(json).await.is_err() { break 'sesh },
                            None => break 'sesh,
                        },
                        msg = stream.next() => match msg {
                            Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                            Some(Err(_)) => break 'sesh,
                            None => break 'sesh,
                            _ => continue 'sesh,
                        },
                    }
                }
                log::debug!("[attach {}] disconnected", channel);
            });
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
