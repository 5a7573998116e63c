mod common;

use common::{at, booking, insert_customer, insert_reservations, provisioned_db};
use lunchly_core::{
    EntityKind, Record, RecordValidationError, RepoError, Reservation, ReservationRepository,
    SqliteReservationRepository,
};

#[test]
fn lists_exactly_the_reservations_of_one_customer() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    let bob = insert_customer(&conn, "Bob", "Lee");
    let inserted = insert_reservations(&conn, ann, 3);
    insert_reservations(&conn, bob, 2);

    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let found: Vec<_> = repo
        .get_reservations_for_customer(ann)
        .unwrap()
        .iter()
        .filter_map(|reservation| reservation.id())
        .collect();

    assert_eq!(found, inserted);
}

#[test]
fn reservations_are_ordered_by_start_time() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    for start_at in [at(20, 19), at(5, 12), at(12, 18)] {
        let mut reservation = Record::new(Reservation::new(ann, booking(start_at, 2)).unwrap());
        repo.save(&mut reservation).unwrap();
    }

    let starts: Vec<_> = repo
        .get_reservations_for_customer(ann)
        .unwrap()
        .iter()
        .map(|reservation| reservation.start_at())
        .collect();
    assert_eq!(starts, [at(5, 12), at(12, 18), at(20, 19)]);
}

#[test]
fn customer_without_reservations_gets_empty_list() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");

    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    assert!(repo.get_reservations_for_customer(ann).unwrap().is_empty());
}

#[test]
fn save_inserts_then_updates_same_row() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let mut reservation = Record::new(Reservation::new(ann, booking(at(3, 19), 2)).unwrap());
    let id = repo.save(&mut reservation).unwrap();
    assert_eq!(reservation.id(), Some(id));

    reservation.fields_mut().set_num_guests(6).unwrap();
    reservation.fields_mut().set_notes(Some("birthday"));
    assert_eq!(repo.save(&mut reservation).unwrap(), id);

    let reloaded = repo.get_by_id(id).unwrap();
    assert_eq!(reloaded.id(), Some(id));
    assert_eq!(reloaded.num_guests(), 6);
    assert_eq!(reloaded.notes(), "birthday");
    assert_eq!(reloaded.start_at(), at(3, 19));
    assert_eq!(reloaded.customer_id(), ann);
}

#[test]
fn get_by_id_missing_returns_not_found() {
    let conn = provisioned_db();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let err = repo.get_by_id(9).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Reservation,
            ..
        }
    ));
}

#[test]
fn unknown_customer_is_rejected_by_the_store() {
    let conn = provisioned_db();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let mut reservation = Record::new(Reservation::new(77, booking(at(3, 19), 2)).unwrap());
    let err = repo.save(&mut reservation).unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(reservation.id(), None);
}

#[test]
fn stored_rows_below_one_guest_are_still_returned() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    insert_reservations(&conn, ann, 1);
    conn.execute(
        "INSERT INTO reservations (customer_id, start_at, num_guests, notes)
         VALUES (?1, '2026-03-09 19:00:00', 0, NULL);",
        [ann],
    )
    .unwrap();
    let legacy = conn.last_insert_rowid();

    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let listed = repo.get_reservations_for_customer(ann).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].id(), Some(legacy));
    assert_eq!(listed[1].num_guests(), 0);
    assert_eq!(listed[1].notes(), "");

    let mut reloaded = repo.get_by_id(legacy).unwrap();
    assert_eq!(reloaded.num_guests(), 0);

    assert!(reloaded.fields_mut().set_num_guests(0).is_err());
    reloaded.fields_mut().set_num_guests(3).unwrap();
    repo.save(&mut reloaded).unwrap();
    assert_eq!(repo.get_by_id(legacy).unwrap().num_guests(), 3);
}

#[test]
fn invalid_guest_count_never_reaches_the_store() {
    let conn = provisioned_db();
    let ann = insert_customer(&conn, "Ann", "Smith");
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let err = Reservation::new(ann, booking(at(3, 19), 0)).unwrap_err();
    assert_eq!(err, RecordValidationError::NonPositiveGuests(0));

    let mut reservation = Record::new(Reservation::new(ann, booking(at(3, 19), 2)).unwrap());
    repo.save(&mut reservation).unwrap();
    assert!(reservation.fields_mut().set_num_guests(-1).is_err());
    assert_eq!(reservation.num_guests(), 2);

    let stored: i64 = conn
        .query_row("SELECT num_guests FROM reservations;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, 2);
}
