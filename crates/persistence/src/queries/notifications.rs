// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NotificationData;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub struct NotificationRow {
    id: String,
    user_id: String,
    notification_type: String,
    title: String,
    message: String,
    is_read: i32,
    created_at: String,
}

impl From<NotificationRow> for NotificationData {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            notification_type: row.notification_type,
            title: row.title,
            message: row.message,
            is_read: row.is_read != 0,
            created_at: row.created_at,
        }
    }
}

/// Retrieves the notifications addressed to a user, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<NotificationData>, PersistenceError> {
    debug!(user_id, "Listing notifications");

    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .order((notifications::created_at.desc(), notifications::id.desc()))
        .select(NotificationRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(NotificationData::from).collect())
}

/// Counts the unread notifications addressed to a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_unread_notifications(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::user_id.eq(user_id))
        .filter(notifications::is_read.eq(0))
        .count()
        .get_result(conn)?)
}
