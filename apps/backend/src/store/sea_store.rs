use actix_web::HttpRequest;
use async_trait::async_trait;

use super::Store;
use crate::db::retry::{with_retry, RetryPolicy};
use crate::db::txn::{has_shared_txn, with_txn};
use crate::domain::Hand;
use crate::error::AppError;
use crate::repos::matches::Match;
use crate::repos::participants::Participant;
use crate::repos::rounds::Round;
use crate::services::matches::{self as match_service, MatchDetail};
use crate::services::participants as participant_service;
use crate::services::{RoundEngine, Submission};
use crate::state::app_state::AppState;

/// [`Store`] over the SeaORM connection in [`AppState`].
///
/// Every operation runs in its own transaction (or the request's shared one
/// under test) and is re-run on lost races up to the state's retry policy.
pub struct SeaStore<'a> {
    req: Option<&'a HttpRequest>,
    state: &'a AppState,
    engine: RoundEngine,
}

impl<'a> SeaStore<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            req: None,
            state,
            engine: RoundEngine::new(),
        }
    }

    /// Bind to a request so an injected `SharedTxn` is honoured.
    pub fn for_request(req: &'a HttpRequest, state: &'a AppState) -> Self {
        Self {
            req: Some(req),
            state,
            engine: RoundEngine::new(),
        }
    }

    /// Retry budget for write operations.
    ///
    /// An injected `SharedTxn` cannot be restarted, so a failed attempt
    /// inside it is final.
    pub fn retry_policy(&self) -> RetryPolicy {
        if has_shared_txn(self.req) {
            RetryPolicy::new(1)
        } else {
            self.state.retry_policy()
        }
    }
}

#[async_trait(?Send)]
impl Store for SeaStore<'_> {
    async fn create_match(
        &self,
        total_rounds: i32,
        participant_one_id: i64,
        participant_two_id: i64,
    ) -> Result<Match, AppError> {
        with_retry(self.retry_policy(), || {
            with_txn(self.req, self.state, move |txn| {
                Box::pin(async move {
                    match_service::create_match(
                        txn,
                        total_rounds,
                        participant_one_id,
                        participant_two_id,
                    )
                    .await
                })
            })
        })
        .await
    }

    async fn get_match(&self, match_id: i64) -> Result<Match, AppError> {
        with_txn(self.req, self.state, move |txn| {
            Box::pin(async move { match_service::get_match(txn, match_id).await })
        })
        .await
    }

    async fn get_match_detail(&self, match_id: i64) -> Result<MatchDetail, AppError> {
        with_txn(self.req, self.state, move |txn| {
            Box::pin(async move { match_service::get_match_detail(txn, match_id).await })
        })
        .await
    }

    async fn create_round(&self, match_id: i64) -> Result<Round, AppError> {
        let engine = self.engine;
        with_retry(self.retry_policy(), || {
            with_txn(self.req, self.state, move |txn| {
                Box::pin(async move { engine.open_round(txn, match_id).await })
            })
        })
        .await
    }

    async fn get_round(&self, round_id: i64) -> Result<Round, AppError> {
        with_txn(self.req, self.state, move |txn| {
            Box::pin(async move { match_service::get_round(txn, round_id).await })
        })
        .await
    }

    async fn submit_hand(
        &self,
        round_id: i64,
        participant_id: i64,
        hand: Hand,
    ) -> Result<Submission, AppError> {
        let engine = self.engine;
        with_retry(self.retry_policy(), || {
            with_txn(self.req, self.state, move |txn| {
                Box::pin(async move {
                    engine
                        .submit_hand(txn, round_id, participant_id, hand)
                        .await
                })
            })
        })
        .await
    }

    async fn create_participant(&self, username: &str) -> Result<Participant, AppError> {
        with_retry(self.retry_policy(), || {
            let username = username.to_owned();
            with_txn(self.req, self.state, move |txn| {
                Box::pin(async move {
                    participant_service::create_participant(txn, &username).await
                })
            })
        })
        .await
    }

    async fn get_participant(&self, participant_id: i64) -> Result<Participant, AppError> {
        with_txn(self.req, self.state, move |txn| {
            Box::pin(async move { participant_service::get_participant(txn, participant_id).await })
        })
        .await
    }

    async fn list_participant_matches(
        &self,
        participant_id: i64,
    ) -> Result<Vec<Match>, AppError> {
        with_txn(self.req, self.state, move |txn| {
            Box::pin(async move {
                participant_service::list_participant_matches(txn, participant_id).await
            })
        })
        .await
    }
}
