// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Onboarding submission queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::OnboardingData;
use crate::diesel_schema::onboarding_submissions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for onboarding rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = onboarding_submissions)]
pub struct OnboardingRow {
    id: String,
    client_id: String,
    responses: String,
    status: String,
    submitted_at: String,
    approved_at: Option<String>,
    approved_by: Option<String>,
}

impl OnboardingRow {
    pub fn into_data(self) -> Result<OnboardingData, PersistenceError> {
        Ok(OnboardingData {
            responses: serde_json::from_str(&self.responses)?,
            id: self.id,
            client_id: self.client_id,
            status: self.status,
            submitted_at: self.submitted_at,
            approved_at: self.approved_at,
            approved_by: self.approved_by,
        })
    }
}

/// Retrieves the onboarding submission for a client.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored answers
/// cannot be decoded.
pub fn get_onboarding(
    conn: &mut SqliteConnection,
    client_id: &str,
) -> Result<Option<OnboardingData>, PersistenceError> {
    onboarding_submissions::table
        .filter(onboarding_submissions::client_id.eq(client_id))
        .select(OnboardingRow::as_select())
        .first(conn)
        .optional()?
        .map(OnboardingRow::into_data)
        .transpose()
}
