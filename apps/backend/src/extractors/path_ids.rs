//! Positive-integer path ids.
//!
//! These only validate shape; existence is checked by the service that
//! loads the row, so a missing row is a 404 with the entity's own code.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, AppError> {
    let raw = req.match_info().get(param).ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidId, format!("Missing {param} parameter"))
    })?;

    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidId, format!("Invalid {param}: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidId,
            format!("{param} must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

macro_rules! path_id {
    ($(#[$doc:meta])* $name:ident, $param:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = AppError;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

path_id!(
    /// `{match_id}` route segment
    MatchId,
    "match_id"
);
path_id!(
    /// `{round_id}` route segment
    RoundId,
    "round_id"
);
path_id!(
    /// `{participant_id}` route segment
    ParticipantId,
    "participant_id"
);
