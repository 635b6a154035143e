// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `applications`: Application inserts and partial updates
//! - `notifications`: Notification inserts
//! - `consultations`: Consultation bookings
//! - `onboarding`: Onboarding submission and approval
//!
//! Identifiers are generated here as v4 UUIDs.

pub mod applications;
pub mod consultations;
pub mod notifications;
pub mod onboarding;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
