// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Apply Bureau backend.
//!
//! This crate stores applications, notifications, consultation bookings and
//! onboarding submissions. It is built on Diesel over `SQLite`.
//!
//! ## Provisioning
//!
//! Migrations are embedded and applied at startup by default. When the
//! schema is managed externally, [`Persistence::new_with_file`] can skip
//! them. Queries against a table that does not exist then fail with
//! [`PersistenceError::RelationMissing`], which callers may treat as
//! "no data yet".
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`]; every call gets its own
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use apply_bureau_domain::{
    Application, ApplicationUpdate, NewApplication, NotificationMessage,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod timestamps;

#[cfg(test)]
mod tests;

pub use backend::sqlite::EXPECTED_TABLES;
pub use data_models::{ConsultationData, NewConsultation, NotificationData, OnboardingData};
pub use error::PersistenceError;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    fn next_memory_url() -> String {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        format!("file:memdb_test_{db_id}?mode=memory&cache=shared")
    }

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&Self::next_memory_url(), true)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database without running migrations.
    ///
    /// Every collection is missing, as in an environment whose schema has
    /// not been provisioned yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened.
    pub fn new_in_memory_unprovisioned() -> Result<Self, PersistenceError> {
        let conn: SqliteConnection =
            backend::sqlite::initialize_database(&Self::next_memory_url(), false)?;
        Ok(Self { conn })
    }

    /// Reverts the most recently applied migration, returning its version.
    ///
    /// # Errors
    ///
    /// Returns an error if no migration is applied or reverting fails.
    pub fn revert_last_migration(&mut self) -> Result<String, PersistenceError> {
        backend::sqlite::revert_last_migration(&mut self.conn)
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    /// * `migrate` - Whether to apply pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P, migrate: bool) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str, migrate)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Lists the user tables present in the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn list_tables(&mut self) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_tables(&mut self.conn)
    }

    /// Lists a table's columns in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn list_columns(&mut self, table: &str) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_columns(&mut self.conn, table)
    }

    // ========================================================================
    // Applications
    // ========================================================================

    /// Inserts a new application.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_application(
        &mut self,
        application: &NewApplication,
        now: OffsetDateTime,
    ) -> Result<Application, PersistenceError> {
        mutations::applications::create_application(&mut self.conn, application, now)
    }

    /// Retrieves an application by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_application(
        &mut self,
        application_id: &str,
    ) -> Result<Option<Application>, PersistenceError> {
        queries::applications::get_application(&mut self.conn, application_id)
    }

    /// Retrieves every application owned by a client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RelationMissing` if the table is absent.
    pub fn list_applications_for_client(
        &mut self,
        client_id: &str,
    ) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::list_applications_for_client(&mut self.conn, client_id)
    }

    /// Applies a partial update. Returns `Ok(None)` for an unknown ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_application(
        &mut self,
        application_id: &str,
        update: &ApplicationUpdate,
        now: OffsetDateTime,
    ) -> Result<Option<Application>, PersistenceError> {
        mutations::applications::update_application(&mut self.conn, application_id, update, now)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Stores a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        &mut self,
        notification: &NotificationMessage,
        now: OffsetDateTime,
    ) -> Result<NotificationData, PersistenceError> {
        mutations::notifications::insert_notification(&mut self.conn, notification, now)
    }

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<NotificationData>, PersistenceError> {
        queries::notifications::list_notifications(&mut self.conn, user_id)
    }

    /// Counts a user's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_unread_notifications(&mut self, user_id: &str) -> Result<i64, PersistenceError> {
        queries::notifications::count_unread_notifications(&mut self.conn, user_id)
    }

    // ========================================================================
    // Consultations
    // ========================================================================

    /// Stores a consultation booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_consultation(
        &mut self,
        booking: &NewConsultation,
        now: OffsetDateTime,
    ) -> Result<ConsultationData, PersistenceError> {
        mutations::consultations::create_consultation(&mut self.conn, booking, now)
    }

    /// Retrieves a consultation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_consultation(
        &mut self,
        consultation_id: &str,
    ) -> Result<Option<ConsultationData>, PersistenceError> {
        queries::consultations::get_consultation(&mut self.conn, consultation_id)
    }

    /// Returns the package interest of the client's latest consultation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest_package_interest(
        &mut self,
        client_id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        queries::consultations::latest_package_interest(&mut self.conn, client_id)
    }

    // ========================================================================
    // Onboarding
    // ========================================================================

    /// Retrieves a client's onboarding submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_onboarding(
        &mut self,
        client_id: &str,
    ) -> Result<Option<OnboardingData>, PersistenceError> {
        queries::onboarding::get_onboarding(&mut self.conn, client_id)
    }

    /// Stores a questionnaire as pending approval, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_onboarding(
        &mut self,
        client_id: &str,
        responses: &serde_json::Value,
        now: OffsetDateTime,
    ) -> Result<OnboardingData, PersistenceError> {
        mutations::onboarding::save_onboarding(&mut self.conn, client_id, responses, now)
    }

    /// Approves a client's submission. Returns `Ok(None)` if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn approve_onboarding(
        &mut self,
        client_id: &str,
        approved_by: &str,
        now: OffsetDateTime,
    ) -> Result<Option<OnboardingData>, PersistenceError> {
        mutations::onboarding::approve_onboarding(&mut self.conn, client_id, approved_by, now)
    }

    /// Rejects a client's submission. Returns `Ok(None)` if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn reject_onboarding(
        &mut self,
        client_id: &str,
    ) -> Result<Option<OnboardingData>, PersistenceError> {
        mutations::onboarding::reject_onboarding(&mut self.conn, client_id)
    }
}
