// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.

use apply_bureau_domain::{Application, ApplicationUpdate, NewApplication};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use crate::queries::applications::get_application;
use crate::timestamps;

/// Columns touched by a partial update. `None` fields are left untouched.
#[derive(AsChangeset)]
#[diesel(table_name = applications)]
struct ApplicationChangeset {
    status: Option<String>,
    interview_date: Option<String>,
    interview_type: Option<String>,
    interview_notes: Option<String>,
    offer_amount: Option<f64>,
    offer_benefits: Option<String>,
    offer_deadline: Option<String>,
    notes: Option<String>,
    admin_notes: Option<String>,
    updated_at: String,
}

/// Inserts a new application and returns the stored record.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_application(
    conn: &mut SqliteConnection,
    application: &NewApplication,
    now: OffsetDateTime,
) -> Result<Application, PersistenceError> {
    let id: String = super::new_id();
    let now_text: String = timestamps::format(now)?;

    diesel::insert_into(applications::table)
        .values((
            applications::id.eq(&id),
            applications::client_id.eq(&application.client_id),
            applications::company_name.eq(&application.company_name),
            applications::job_title.eq(&application.job_title),
            applications::job_url.eq(&application.job_url),
            applications::job_description.eq(&application.job_description),
            applications::location.eq(&application.location),
            applications::job_type.eq(&application.job_type),
            applications::salary_range.eq(&application.salary_range),
            applications::application_method.eq(&application.application_method),
            applications::application_strategy.eq(&application.application_strategy),
            applications::status.eq(application.status.as_str()),
            applications::date_applied.eq(timestamps::format(application.date_applied)?),
            applications::resume_url.eq(&application.resume_url),
            applications::cover_letter_url.eq(&application.cover_letter_url),
            applications::notes.eq(&application.notes),
            applications::admin_notes.eq(&application.admin_notes),
            applications::created_at.eq(&now_text),
            applications::updated_at.eq(&now_text),
        ))
        .execute(conn)?;

    info!(application_id = %id, client_id = %application.client_id, "Application created");

    get_application(conn, &id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("application {id} after insert")))
}

/// Applies a partial update to an application.
///
/// Returns `Ok(None)` if no application has the given ID.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_application(
    conn: &mut SqliteConnection,
    application_id: &str,
    update: &ApplicationUpdate,
    now: OffsetDateTime,
) -> Result<Option<Application>, PersistenceError> {
    let changeset = ApplicationChangeset {
        status: update.status.map(|s| s.as_str().to_string()),
        interview_date: timestamps::format_opt(update.interview_date)?,
        interview_type: update.interview_type.map(|t| t.as_str().to_string()),
        interview_notes: update.interview_notes.clone(),
        offer_amount: update.offer_amount,
        offer_benefits: update.offer_benefits.clone(),
        offer_deadline: timestamps::format_opt(update.offer_deadline)?,
        notes: update.notes.clone(),
        admin_notes: update.admin_notes.clone(),
        updated_at: timestamps::format(now)?,
    };

    let updated: usize = diesel::update(applications::table)
        .filter(applications::id.eq(application_id))
        .set(&changeset)
        .execute(conn)?;

    if updated == 0 {
        debug!(application_id, "No application to update");
        return Ok(None);
    }

    get_application(conn, application_id)
}
