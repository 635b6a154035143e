// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consultation mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{ConsultationData, NewConsultation};
use crate::diesel_schema::consultations;
use crate::error::PersistenceError;
use crate::timestamps;

/// Status given to a new booking.
pub const PENDING: &str = "pending";

/// Stores a consultation booking and returns it.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_consultation(
    conn: &mut SqliteConnection,
    booking: &NewConsultation,
    now: OffsetDateTime,
) -> Result<ConsultationData, PersistenceError> {
    let data = ConsultationData {
        id: super::new_id(),
        client_id: booking.client_id.clone(),
        name: booking.name.clone(),
        email: booking.email.clone(),
        phone: booking.phone.clone(),
        reason: booking.reason.clone(),
        preferred_date: booking.preferred_date.clone(),
        preferred_time: booking.preferred_time.clone(),
        package_interest: booking.package_interest.clone(),
        current_situation: booking.current_situation.clone(),
        timeline: booking.timeline.clone(),
        status: PENDING.to_string(),
        created_at: timestamps::format(now)?,
    };

    diesel::insert_into(consultations::table)
        .values((
            consultations::id.eq(&data.id),
            consultations::client_id.eq(&data.client_id),
            consultations::name.eq(&data.name),
            consultations::email.eq(&data.email),
            consultations::phone.eq(&data.phone),
            consultations::reason.eq(&data.reason),
            consultations::preferred_date.eq(&data.preferred_date),
            consultations::preferred_time.eq(&data.preferred_time),
            consultations::package_interest.eq(&data.package_interest),
            consultations::current_situation.eq(&data.current_situation),
            consultations::timeline.eq(&data.timeline),
            consultations::status.eq(&data.status),
            consultations::created_at.eq(&data.created_at),
        ))
        .execute(conn)?;

    info!(
        consultation_id = %data.id,
        package = %data.package_interest,
        "Consultation booked"
    );

    Ok(data)
}
