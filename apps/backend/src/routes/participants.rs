//! Participant routes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{ParticipantId, ValidatedJson};
use crate::state::app_state::AppState;
use crate::store::{SeaStore, Store};

#[derive(Debug, Deserialize)]
pub struct CreateParticipantRequest {
    pub username: String,
}

/// POST /api/participants
async fn create_participant(
    http_req: HttpRequest,
    body: ValidatedJson<CreateParticipantRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let participant = store.create_participant(&body.username).await?;
    Ok(HttpResponse::Created().json(participant))
}

/// GET /api/participants/{participant_id}
async fn get_participant(
    http_req: HttpRequest,
    participant_id: ParticipantId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let participant = store.get_participant(participant_id.0).await?;
    Ok(HttpResponse::Ok().json(participant))
}

/// GET /api/participants/{participant_id}/matches
///
/// Every match the participant plays in either slot, newest first.
async fn list_participant_matches(
    http_req: HttpRequest,
    participant_id: ParticipantId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let matches = store.list_participant_matches(participant_id.0).await?;
    Ok(HttpResponse::Ok().json(matches))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/participants").route(web::post().to(create_participant)));
    cfg.service(
        web::resource("/participants/{participant_id}").route(web::get().to(get_participant)),
    );
    cfg.service(
        web::resource("/participants/{participant_id}/matches")
            .route(web::get().to(list_participant_matches)),
    );
}
