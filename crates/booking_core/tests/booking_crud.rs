use booking_core::{
    BlobStore, BookingRepository, BookingStatus, Entity, FixedClock, MemoryBlobStore, RepoError,
    StatusCounts, StoreBookingRepository, ValidationError,
};
use chrono::{NaiveDate, NaiveTime};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn repo(store: &MemoryBlobStore) -> StoreBookingRepository<'_, MemoryBlobStore, FixedClock> {
    StoreBookingRepository::with_clock(store, FixedClock(today()))
}

#[test]
fn create_starts_pending_with_sequential_ids() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);

    let first = repo.create_booking(3, date(2030, 6, 20), at(10, 0)).unwrap();
    let second = repo.create_booking(4, date(2030, 6, 21), at(14, 30)).unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.status, BookingStatus::Pending);
    assert_eq!(repo.find_booking(2).unwrap(), Some(second));
    assert!(repo.find_booking(9).unwrap().is_none());
}

#[test]
fn business_hours_boundaries() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);

    let err = repo.create_booking(3, today(), at(7, 59)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::OutOfHours(_))
    ));
    assert!(repo.create_booking(3, today(), at(8, 0)).is_ok());
    assert!(repo.create_booking(3, today(), at(20, 0)).is_ok());
    assert!(repo.create_booking(3, today(), at(21, 0)).is_err());
}

#[test]
fn today_is_accepted_and_yesterday_rejected() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);

    assert!(repo.create_booking(3, today(), at(9, 0)).is_ok());

    let yesterday = today().pred_opt().unwrap();
    let err = repo.create_booking(3, yesterday, at(9, 0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::PastDate(found)) if found == yesterday
    ));
    assert_eq!(repo.list_bookings().unwrap().len(), 1);
}

#[test]
fn rejected_create_performs_no_write() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);

    repo.create_booking(3, date(2030, 1, 1), at(9, 0)).unwrap_err();
    repo.create_booking(3, today(), at(6, 0)).unwrap_err();
    assert!(store.read("bookings").unwrap().is_none());
}

#[test]
fn unknown_owner_is_accepted_on_create() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);

    let booking = repo.create_booking(999, today(), at(12, 0)).unwrap();
    assert_eq!(booking.owner_id, 999);
}

#[test]
fn any_status_may_move_to_any_other() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let booking = repo.create_booking(3, today(), at(9, 0)).unwrap();

    let change = repo
        .update_booking_status(booking.id, BookingStatus::Cancelled)
        .unwrap();
    assert_eq!(change.previous, BookingStatus::Pending);
    assert_eq!(change.current, BookingStatus::Cancelled);

    let change = repo
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .unwrap();
    assert_eq!(change.previous, BookingStatus::Cancelled);
    assert_eq!(change.booking.status, BookingStatus::Confirmed);

    let err = repo
        .update_booking_status(77, BookingStatus::Pending)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: Entity::Booking,
            id: 77
        }
    ));
}

#[test]
fn reprogram_reactivates_cancelled_booking() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let booking = repo.create_booking(3, today(), at(9, 0)).unwrap();
    repo.update_booking_status(booking.id, BookingStatus::Cancelled)
        .unwrap();

    let outcome = repo
        .reprogram_booking(booking.id, Some(date(2030, 7, 1)), Some(at(11, 30)))
        .unwrap();

    assert_eq!(outcome.booking.status, BookingStatus::Pending);
    assert_eq!(outcome.previous_status, BookingStatus::Cancelled);
    assert!(outcome.reactivated());
    assert_eq!(outcome.previous_date, today());
    assert_eq!(outcome.previous_time, at(9, 0));
    assert_eq!(outcome.booking.date, date(2030, 7, 1));
    assert_eq!(outcome.booking.time, at(11, 30));
}

#[test]
fn reprogram_keeps_pending_and_confirmed_status() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let pending = repo.create_booking(3, today(), at(9, 0)).unwrap();
    let confirmed = repo.create_booking(4, today(), at(10, 0)).unwrap();
    repo.update_booking_status(confirmed.id, BookingStatus::Confirmed)
        .unwrap();

    let pending_outcome = repo
        .reprogram_booking(pending.id, None, Some(at(15, 0)))
        .unwrap();
    assert_eq!(pending_outcome.booking.status, BookingStatus::Pending);
    assert_eq!(pending_outcome.booking.date, today());

    let confirmed_outcome = repo
        .reprogram_booking(confirmed.id, Some(date(2030, 8, 1)), None)
        .unwrap();
    assert_eq!(confirmed_outcome.booking.status, BookingStatus::Confirmed);
    assert_eq!(confirmed_outcome.booking.time, at(10, 0));
    assert!(!confirmed_outcome.reactivated());
}

#[test]
fn reprogram_revalidates_only_given_fields_and_writes_nothing_on_failure() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let booking = repo.create_booking(3, today(), at(9, 0)).unwrap();
    repo.update_booking_status(booking.id, BookingStatus::Cancelled)
        .unwrap();
    let before = store.read("bookings").unwrap();

    let err = repo
        .reprogram_booking(booking.id, Some(date(2030, 6, 1)), Some(at(10, 0)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::PastDate(_))
    ));
    let err = repo
        .reprogram_booking(booking.id, Some(date(2030, 6, 16)), Some(at(22, 0)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::OutOfHours(_))
    ));
    assert_eq!(store.read("bookings").unwrap(), before);

    let err = repo.reprogram_booking(55, None, None).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn stored_records_are_not_revalidated_when_the_clock_moves() {
    let store = MemoryBlobStore::new();
    let early = StoreBookingRepository::with_clock(&store, FixedClock(date(2030, 1, 1)));
    let booking = early.create_booking(3, date(2030, 1, 2), at(9, 0)).unwrap();

    let later = repo(&store);
    let change = later
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .unwrap();
    assert_eq!(change.booking.date, date(2030, 1, 2));
    let outcome = later
        .reprogram_booking(booking.id, None, Some(at(10, 0)))
        .unwrap();
    assert_eq!(outcome.booking.date, date(2030, 1, 2));
}

#[test]
fn delete_removes_one_booking() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let first = repo.create_booking(3, today(), at(9, 0)).unwrap();
    let second = repo.create_booking(3, today(), at(10, 0)).unwrap();

    let removed = repo.delete_booking(first.id).unwrap();
    assert_eq!(removed, first);
    assert_eq!(repo.list_bookings().unwrap(), vec![second]);

    let err = repo.delete_booking(first.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn listings_filter_sort_and_count() {
    let store = MemoryBlobStore::new();
    let repo = repo(&store);
    let a = repo.create_booking(3, today(), at(15, 0)).unwrap();
    let b = repo.create_booking(4, date(2030, 6, 20), at(9, 0)).unwrap();
    let c = repo.create_booking(3, today(), at(8, 30)).unwrap();
    let d = repo.create_booking(3, date(2030, 6, 18), at(12, 0)).unwrap();
    repo.update_booking_status(b.id, BookingStatus::Confirmed)
        .unwrap();
    repo.update_booking_status(d.id, BookingStatus::Cancelled)
        .unwrap();

    let owner_ids: Vec<_> = repo
        .list_bookings_by_owner(3)
        .unwrap()
        .iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(owner_ids, vec![a.id, c.id, d.id]);

    let today_ids: Vec<_> = repo
        .list_today_bookings()
        .unwrap()
        .iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(today_ids, vec![c.id, a.id]);

    let history_ids: Vec<_> = repo
        .history_by_owner(3)
        .unwrap()
        .iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(history_ids, vec![d.id, a.id, c.id]);

    assert_eq!(
        repo.count_bookings_by_status().unwrap(),
        StatusCounts {
            total: 4,
            pending: 2,
            confirmed: 1,
            cancelled: 1
        }
    );
}

#[test]
fn corrupt_blob_surfaces_as_invalid_data() {
    let store = MemoryBlobStore::new();
    store
        .write(
            "bookings",
            r#"[{"id":1,"ownerId":3,"date":"2030-06-15","time":"9 o'clock","status":"pending"}]"#,
        )
        .unwrap();

    let err = repo(&store).list_bookings().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn create_fails_cleanly_when_stored_ids_reach_the_maximum() {
    let store = MemoryBlobStore::new();
    let stored = r#"[{"id":4294967295,"ownerId":3,"date":"2030-06-15","time":"09:00","status":"pending"}]"#;
    store.write("bookings", stored).unwrap();

    let err = repo(&store)
        .create_booking(3, today(), at(10, 0))
        .unwrap_err();

    assert!(matches!(err, RepoError::IdExhausted(Entity::Booking)));
    assert_eq!(repo(&store).list_bookings().unwrap().len(), 1);
}
