//! Round routes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::domain::Hand;
use crate::error::AppError;
use crate::extractors::{RoundId, ValidatedJson};
use crate::state::app_state::AppState;
use crate::store::{SeaStore, Store};

#[derive(Debug, Deserialize)]
pub struct SubmitHandRequest {
    pub participant_id: i64,
    /// Parsed after deserialization so a bad token is a 422, not a 400
    pub hand: String,
}

/// GET /api/rounds/{round_id}
async fn get_round(
    http_req: HttpRequest,
    round_id: RoundId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = SeaStore::for_request(&http_req, &app_state);
    let round = store.get_round(round_id.0).await?;
    Ok(HttpResponse::Ok().json(round))
}

/// POST /api/rounds/{round_id}/hands
///
/// Returns the round after the submission; when this hand resolved it,
/// the updated match is included under `match`.
async fn submit_hand(
    http_req: HttpRequest,
    round_id: RoundId,
    body: ValidatedJson<SubmitHandRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let hand: Hand = body.hand.parse()?;

    let store = SeaStore::for_request(&http_req, &app_state);
    let submission = store
        .submit_hand(round_id.0, body.participant_id, hand)
        .await?;
    Ok(HttpResponse::Ok().json(submission))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/rounds/{round_id}").route(web::get().to(get_round)));
    cfg.service(web::resource("/rounds/{round_id}/hands").route(web::post().to(submit_hand)));
}
