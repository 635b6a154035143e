// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `applications`: Application lookups and per-client listing
//! - `notifications`: Notification listing and unread counts
//! - `consultations`: Consultation lookups used for tier resolution
//! - `onboarding`: Onboarding submission lookups

pub mod applications;
pub mod consultations;
pub mod notifications;
pub mod onboarding;
