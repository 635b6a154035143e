// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutations.

use apply_bureau_domain::NotificationMessage;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::NotificationData;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use crate::timestamps;

/// Stores a notification and returns it.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &NotificationMessage,
    now: OffsetDateTime,
) -> Result<NotificationData, PersistenceError> {
    let data = NotificationData {
        id: super::new_id(),
        user_id: notification.user_id.clone(),
        notification_type: notification.kind.as_str().to_string(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        is_read: false,
        created_at: timestamps::format(now)?,
    };

    diesel::insert_into(notifications::table)
        .values((
            notifications::id.eq(&data.id),
            notifications::user_id.eq(&data.user_id),
            notifications::notification_type.eq(&data.notification_type),
            notifications::title.eq(&data.title),
            notifications::message.eq(&data.message),
            notifications::is_read.eq(0),
            notifications::created_at.eq(&data.created_at),
        ))
        .execute(conn)?;

    debug!(
        notification_id = %data.id,
        user_id = %data.user_id,
        kind = %data.notification_type,
        "Notification stored"
    );

    Ok(data)
}
