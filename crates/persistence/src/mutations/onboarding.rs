// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Onboarding mutations.
//!
//! Each client has at most one submission row. Resubmitting replaces the
//! answers and resets the review state; whether a resubmission is allowed
//! is decided by the caller.

use apply_bureau_domain::OnboardingStatus;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::OnboardingData;
use crate::diesel_schema::onboarding_submissions;
use crate::error::PersistenceError;
use crate::queries::onboarding::get_onboarding;
use crate::timestamps;

/// Stores a client's questionnaire as `pending_approval`, replacing any
/// earlier submission.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_onboarding(
    conn: &mut SqliteConnection,
    client_id: &str,
    responses: &serde_json::Value,
    now: OffsetDateTime,
) -> Result<OnboardingData, PersistenceError> {
    let responses_json: String = serde_json::to_string(responses)?;
    let submitted_at: String = timestamps::format(now)?;
    let pending: &str = OnboardingStatus::PendingApproval.as_str();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let replaced: usize = diesel::update(onboarding_submissions::table)
            .filter(onboarding_submissions::client_id.eq(client_id))
            .set((
                onboarding_submissions::responses.eq(&responses_json),
                onboarding_submissions::status.eq(pending),
                onboarding_submissions::submitted_at.eq(&submitted_at),
                onboarding_submissions::approved_at.eq(None::<String>),
                onboarding_submissions::approved_by.eq(None::<String>),
            ))
            .execute(conn)?;

        if replaced == 0 {
            diesel::insert_into(onboarding_submissions::table)
                .values((
                    onboarding_submissions::id.eq(super::new_id()),
                    onboarding_submissions::client_id.eq(client_id),
                    onboarding_submissions::responses.eq(&responses_json),
                    onboarding_submissions::status.eq(pending),
                    onboarding_submissions::submitted_at.eq(&submitted_at),
                ))
                .execute(conn)?;
        }

        info!(client_id, replaced = replaced > 0, "Onboarding submission stored");

        get_onboarding(conn, client_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("onboarding for {client_id}")))
    })
}

/// Marks a client's submission as approved.
///
/// Returns `Ok(None)` if the client has not submitted.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn approve_onboarding(
    conn: &mut SqliteConnection,
    client_id: &str,
    approved_by: &str,
    now: OffsetDateTime,
) -> Result<Option<OnboardingData>, PersistenceError> {
    let updated: usize = diesel::update(onboarding_submissions::table)
        .filter(onboarding_submissions::client_id.eq(client_id))
        .set((
            onboarding_submissions::status.eq(OnboardingStatus::Approved.as_str()),
            onboarding_submissions::approved_at.eq(Some(timestamps::format(now)?)),
            onboarding_submissions::approved_by.eq(Some(approved_by)),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }

    info!(client_id, approved_by, "Onboarding approved");
    get_onboarding(conn, client_id)
}

/// Marks a client's submission as rejected, clearing any approval.
///
/// Returns `Ok(None)` if the client has not submitted.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn reject_onboarding(
    conn: &mut SqliteConnection,
    client_id: &str,
) -> Result<Option<OnboardingData>, PersistenceError> {
    let updated: usize = diesel::update(onboarding_submissions::table)
        .filter(onboarding_submissions::client_id.eq(client_id))
        .set((
            onboarding_submissions::status.eq(OnboardingStatus::Rejected.as_str()),
            onboarding_submissions::approved_at.eq(None::<String>),
            onboarding_submissions::approved_by.eq(None::<String>),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }

    info!(client_id, "Onboarding rejected");
    get_onboarding(conn, client_id)
}
