// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{CLIENT_ID, NOW, create_test_new_application};
use crate::{EXPECTED_TABLES, Persistence, PersistenceError};

#[test]
fn test_migrations_create_expected_tables() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let tables: Vec<String> = persistence.list_tables().unwrap();
    assert_eq!(tables, EXPECTED_TABLES.map(String::from).to_vec());
}

#[test]
fn test_applications_table_columns() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let columns: Vec<String> = persistence.list_columns("applications").unwrap();

    for expected in [
        "id",
        "client_id",
        "company_name",
        "job_title",
        "job_url",
        "status",
        "date_applied",
        "interview_date",
        "interview_type",
        "offer_amount",
        "offer_deadline",
        "notes",
        "admin_notes",
        "created_at",
        "updated_at",
    ] {
        assert!(columns.iter().any(|c| c == expected), "missing {expected}");
    }
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    first
        .create_application(&create_test_new_application(CLIENT_ID, "Acme Corp"), NOW)
        .unwrap();

    assert_eq!(first.list_applications_for_client(CLIENT_ID).unwrap().len(), 1);
    assert!(second.list_applications_for_client(CLIENT_ID).unwrap().is_empty());
}

#[test]
fn test_unprovisioned_database_reports_relation_missing() {
    let mut persistence = Persistence::new_in_memory_unprovisioned().unwrap();
    assert!(persistence.list_tables().unwrap().is_empty());

    let err: PersistenceError = persistence
        .list_applications_for_client(CLIENT_ID)
        .unwrap_err();
    assert!(err.is_relation_missing(), "{err}");
}

#[test]
fn test_revert_last_migration_drops_client_record_tables() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence.revert_last_migration().unwrap();

    assert_eq!(
        persistence.list_tables().unwrap(),
        vec![String::from("applications"), String::from("notifications")]
    );
    let err: PersistenceError = persistence.latest_package_interest(CLIENT_ID).unwrap_err();
    assert!(err.is_relation_missing(), "{err}");

    let mut unprovisioned = Persistence::new_in_memory_unprovisioned().unwrap();
    assert!(unprovisioned.revert_last_migration().is_err());
}

#[test]
fn test_relation_missing_matches_postgres_message() {
    let err = PersistenceError::from(diesel::result::Error::DatabaseError(
        diesel::result::DatabaseErrorKind::Unknown,
        Box::new(String::from(
            "relation \"public.applications\" does not exist",
        )),
    ));
    assert!(err.is_relation_missing());

    let other = PersistenceError::from(diesel::result::Error::DatabaseError(
        diesel::result::DatabaseErrorKind::Unknown,
        Box::new(String::from("disk I/O error")),
    ));
    assert!(!other.is_relation_missing());
}
