//! Match routes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{MatchId, ValidatedJson};
use crate::state::app_state::AppState;
use crate::store::{SeaStore, Store};

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub total_rounds: i32,
    pub participant_one_id: i64,
    pub participant_two_id: i64,
}

/// POST /api/matches
async fn create_match(
    http_req: HttpRequest,
    body: ValidatedJson<CreateMatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let created = store
        .create_match(
            body.total_rounds,
            body.participant_one_id,
            body.participant_two_id,
        )
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/matches/{match_id}
///
/// The match with its rounds ordered by `round_no`.
async fn get_match(
    http_req: HttpRequest,
    match_id: MatchId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let detail = store.get_match_detail(match_id.0).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/matches/{match_id}/rounds
async fn open_round(
    http_req: HttpRequest,
    match_id: MatchId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let round = store.create_round(match_id.0).await?;
    Ok(HttpResponse::Created().json(round))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/matches").route(web::post().to(create_match)));
    cfg.service(web::resource("/matches/{match_id}").route(web::get().to(get_match)));
    cfg.service(web::resource("/matches/{match_id}/rounds").route(web::post().to(open_round)));
}
