// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application queries.

use apply_bureau_domain::Application;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use crate::timestamps;

/// Diesel Queryable struct for application rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = applications)]
pub struct ApplicationRow {
    id: String,
    client_id: String,
    company_name: String,
    job_title: String,
    job_url: Option<String>,
    job_description: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    salary_range: Option<String>,
    application_method: Option<String>,
    application_strategy: Option<String>,
    status: String,
    date_applied: String,
    interview_date: Option<String>,
    interview_type: Option<String>,
    interview_notes: Option<String>,
    offer_amount: Option<f64>,
    offer_benefits: Option<String>,
    offer_deadline: Option<String>,
    resume_url: Option<String>,
    cover_letter_url: Option<String>,
    notes: Option<String>,
    admin_notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ApplicationRow {
    pub fn into_application(self) -> Result<Application, PersistenceError> {
        Ok(Application {
            date_applied: timestamps::parse(&self.date_applied)?,
            interview_date: timestamps::parse_opt(self.interview_date.as_deref())?,
            offer_deadline: timestamps::parse_opt(self.offer_deadline.as_deref())?,
            created_at: timestamps::parse(&self.created_at)?,
            updated_at: timestamps::parse(&self.updated_at)?,
            id: self.id,
            client_id: self.client_id,
            company_name: self.company_name,
            job_title: self.job_title,
            job_url: self.job_url,
            job_description: self.job_description,
            location: self.location,
            job_type: self.job_type,
            salary_range: self.salary_range,
            application_method: self.application_method,
            application_strategy: self.application_strategy,
            status: self.status,
            interview_type: self.interview_type,
            interview_notes: self.interview_notes,
            offer_amount: self.offer_amount,
            offer_benefits: self.offer_benefits,
            resume_url: self.resume_url,
            cover_letter_url: self.cover_letter_url,
            notes: self.notes,
            admin_notes: self.admin_notes,
        })
    }
}

/// Retrieves an application by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the application is not found.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: &str,
) -> Result<Option<Application>, PersistenceError> {
    debug!(application_id, "Looking up application");

    applications::table
        .filter(applications::id.eq(application_id))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?
        .map(ApplicationRow::into_application)
        .transpose()
}

/// Retrieves every application owned by a client, newest first.
///
/// # Errors
///
/// Returns `PersistenceError::RelationMissing` if the table has not been
/// provisioned, or another error if the query fails.
pub fn list_applications_for_client(
    conn: &mut SqliteConnection,
    client_id: &str,
) -> Result<Vec<Application>, PersistenceError> {
    debug!(client_id, "Listing applications for client");

    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::client_id.eq(client_id))
        .order((applications::created_at.desc(), applications::id.desc()))
        .select(ApplicationRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(ApplicationRow::into_application)
        .collect()
}
