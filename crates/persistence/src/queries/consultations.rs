// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consultation queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::ConsultationData;
use crate::diesel_schema::consultations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for consultation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = consultations)]
pub struct ConsultationRow {
    id: String,
    client_id: Option<String>,
    name: String,
    email: String,
    phone: Option<String>,
    reason: String,
    preferred_date: String,
    preferred_time: String,
    package_interest: String,
    current_situation: Option<String>,
    timeline: String,
    status: String,
    created_at: String,
}

impl From<ConsultationRow> for ConsultationData {
    fn from(row: ConsultationRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            reason: row.reason,
            preferred_date: row.preferred_date,
            preferred_time: row.preferred_time,
            package_interest: row.package_interest,
            current_situation: row.current_situation,
            timeline: row.timeline,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a consultation by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_consultation(
    conn: &mut SqliteConnection,
    consultation_id: &str,
) -> Result<Option<ConsultationData>, PersistenceError> {
    Ok(consultations::table
        .filter(consultations::id.eq(consultation_id))
        .select(ConsultationRow::as_select())
        .first(conn)
        .optional()?
        .map(ConsultationData::from))
}

/// Returns the package interest of the client's most recent consultation.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn latest_package_interest(
    conn: &mut SqliteConnection,
    client_id: &str,
) -> Result<Option<String>, PersistenceError> {
    debug!(client_id, "Looking up latest consultation package");

    Ok(consultations::table
        .filter(consultations::client_id.eq(client_id))
        .order((consultations::created_at.desc(), consultations::id.desc()))
        .select(consultations::package_interest)
        .first::<String>(conn)
        .optional()?)
}
