mod common;

use common::{at, attrs, booking, insert_customer, insert_reservations, provisioned_db};
use lunchly_core::{
    parse_record_id, CustomerAttrs, EntityKind, LunchlyService, RecordValidationError, RepoError,
    SqliteCustomerRepository, SqliteReservationRepository,
};
use rusqlite::Connection;

fn service(
    conn: &Connection,
) -> LunchlyService<SqliteCustomerRepository<'_>, SqliteReservationRepository<'_>> {
    LunchlyService::new(
        SqliteCustomerRepository::try_new(conn).unwrap(),
        SqliteReservationRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn add_then_edit_customer_keeps_identity() {
    let conn = provisioned_db();
    let service = service(&conn);

    let created = service.add_customer(attrs("Ann", "Smith")).unwrap();
    let id = created.id().unwrap();

    let edited = service
        .edit_customer(
            id,
            CustomerAttrs {
                phone: Some("555-0100".to_string()),
                ..attrs("Ann", "Smith-Lee")
            },
        )
        .unwrap();
    assert_eq!(edited.id(), Some(id));

    let detail = service.customer_detail(id).unwrap();
    assert_eq!(detail.customer.full_name(), "Ann Smith-Lee");
    assert_eq!(detail.customer.phone(), Some("555-0100"));
}

#[test]
fn add_customer_rejects_blank_names_as_invalid_input() {
    let conn = provisioned_db();
    let service = service(&conn);

    let err = service.add_customer(attrs("", "Smith")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidInput(RecordValidationError::BlankField("first_name"))
    ));
    assert_eq!(err.status_hint(), 400);
    assert!(service.list_customers().unwrap().is_empty());
}

#[test]
fn customer_detail_includes_reservations() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    insert_reservations(&conn, ann, 3);

    let detail = service(&conn).customer_detail(ann).unwrap();
    assert_eq!(detail.customer.id(), Some(ann));
    assert_eq!(detail.reservations.len(), 3);
}

#[test]
fn add_reservation_requires_existing_customer() {
    let conn = provisioned_db();
    let service = service(&conn);

    let err = service
        .add_reservation(12, booking(at(3, 19), 2))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Customer,
            ..
        }
    ));
}

#[test]
fn add_and_edit_reservation() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    let service = service(&conn);

    let created = service.add_reservation(ann, booking(at(3, 19), 2)).unwrap();
    let id = created.id().unwrap();

    let edited = service
        .edit_reservation(id, booking(at(4, 20), 5))
        .unwrap();
    assert_eq!(edited.id(), Some(id));
    assert_eq!(edited.customer_id(), ann);
    assert_eq!(edited.num_guests(), 5);

    let err = service
        .edit_reservation(id, booking(at(4, 20), 0))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidInput(_)));
}

#[test]
fn top_customers_defaults_to_ten() {
    let conn = provisioned_db();
    for index in 0..12 {
        let id = insert_customer(&conn, "Guest", &format!("Number{index}"));
        insert_reservations(&conn, id, 1);
    }

    let service = service(&conn);
    assert_eq!(service.top_customers(None).unwrap().len(), 10);
    assert_eq!(service.top_customers(Some(3)).unwrap().len(), 3);
}

#[test]
fn search_customers_passes_through_not_found() {
    let conn = provisioned_db();
    insert_customer(&conn, "Ann", "Smith");

    let service = service(&conn);
    assert_eq!(service.search_customers("Ann", "").unwrap().len(), 1);
    assert!(service
        .search_customers("Bob", "Lee")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn caller_supplied_ids_are_validated() {
    assert_eq!(parse_record_id("17"), Ok(17));
    assert!(matches!(
        parse_record_id("seventeen"),
        Err(RecordValidationError::InvalidId(_))
    ));
}

#[test]
fn customer_detail_includes_stored_zero_guest_rows() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    conn.execute(
        "INSERT INTO reservations (customer_id, start_at, num_guests, notes)
         VALUES (?1, '2026-03-01 19:00:00', 0, '');",
        [ann],
    )
    .unwrap();

    let detail = service(&conn).customer_detail(ann).unwrap();
    assert_eq!(detail.reservations.len(), 1);
    assert_eq!(detail.reservations[0].num_guests(), 0);
}
