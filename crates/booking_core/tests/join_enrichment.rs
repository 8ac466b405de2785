use booking_core::{
    AccountRepository, BlobStore, BookingRepository, FixedClock, JoinService, MemoryBlobStore,
    NewAccount, Role, StoreAccountRepository, StoreBookingRepository, MISSING_OWNER_FIELD,
    MISSING_OWNER_NAME,
};
use chrono::{NaiveDate, NaiveTime};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn join(
    store: &MemoryBlobStore,
) -> JoinService<
    StoreAccountRepository<'_, MemoryBlobStore>,
    StoreBookingRepository<'_, MemoryBlobStore, FixedClock>,
> {
    JoinService::new(
        StoreAccountRepository::new(store),
        StoreBookingRepository::with_clock(store, FixedClock(today())),
    )
}

#[test]
fn enrich_all_attaches_live_owner_fields() {
    let store = MemoryBlobStore::new();
    let accounts = StoreAccountRepository::new(&store);
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    let ana = accounts
        .create_account(&NewAccount::new("Ana Ruiz", "ana@x.com", "secret1", Role::Client))
        .unwrap();
    bookings.create_booking(ana.id, today(), at(9, 0)).unwrap();

    let items = join(&store).enrich_all().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].owner_name, "Ana Ruiz");
    assert_eq!(items[0].owner_email, "ana@x.com");
    assert_eq!(items[0].owner_role, "client");
    assert!(!items[0].is_orphan());
}

#[test]
fn owner_changes_are_visible_on_next_call() {
    let store = MemoryBlobStore::new();
    let accounts = StoreAccountRepository::new(&store);
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    let ana = accounts
        .create_account(&NewAccount::new("Ana Ruiz", "ana@x.com", "secret1", Role::Client))
        .unwrap();
    bookings.create_booking(ana.id, today(), at(9, 0)).unwrap();
    let service = join(&store);
    assert_eq!(service.enrich_all().unwrap()[0].owner_name, "Ana Ruiz");

    let patch = booking_core::AccountPatch {
        name: Some("Ana María".to_string()),
        ..Default::default()
    };
    accounts.update_account(ana.id, &patch).unwrap();
    assert_eq!(service.enrich_all().unwrap()[0].owner_name, "Ana María");
}

#[test]
fn orphaned_booking_gets_placeholders_instead_of_failing() {
    let store = MemoryBlobStore::new();
    let accounts = StoreAccountRepository::new(&store);
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    let ana = accounts
        .create_account(&NewAccount::new("Ana Ruiz", "ana@x.com", "secret1", Role::Client))
        .unwrap();
    bookings.create_booking(ana.id, today(), at(9, 0)).unwrap();
    bookings.create_booking(404, today(), at(10, 0)).unwrap();

    // Drop the owner without cascading, as an interrupted delete would.
    store.write("accounts", "[]").unwrap();

    let items = join(&store).enrich_all().unwrap();
    assert_eq!(items.len(), 2);
    for item in &items {
        assert_eq!(item.owner_name, MISSING_OWNER_NAME);
        assert_eq!(item.owner_email, MISSING_OWNER_FIELD);
        assert_eq!(item.owner_role, MISSING_OWNER_FIELD);
        assert!(item.is_orphan());
    }
}

#[test]
fn enrich_by_owner_filters_after_join_and_keeps_order() {
    let store = MemoryBlobStore::new();
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    let first = bookings.create_booking(3, today(), at(12, 0)).unwrap();
    bookings.create_booking(4, today(), at(9, 0)).unwrap();
    let third = bookings.create_booking(3, today(), at(8, 0)).unwrap();

    let ids: Vec<_> = join(&store)
        .enrich_by_owner(3)
        .unwrap()
        .into_iter()
        .map(|item| item.booking.id)
        .collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[test]
fn today_and_recent_views_are_sorted() {
    let store = MemoryBlobStore::new();
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    let late = bookings.create_booking(3, today(), at(18, 0)).unwrap();
    let future = bookings
        .create_booking(3, NaiveDate::from_ymd_opt(2030, 7, 1).unwrap(), at(9, 0))
        .unwrap();
    let early = bookings.create_booking(3, today(), at(8, 0)).unwrap();
    let service = join(&store);

    let today_ids: Vec<_> = service
        .enrich_today()
        .unwrap()
        .into_iter()
        .map(|item| item.booking.id)
        .collect();
    assert_eq!(today_ids, vec![early.id, late.id]);

    let recent_ids: Vec<_> = service
        .list_all_recent()
        .unwrap()
        .into_iter()
        .map(|item| item.booking.id)
        .collect();
    assert_eq!(recent_ids, vec![future.id, late.id, early.id]);
}

#[test]
fn owner_helpers_use_the_same_placeholder() {
    let store = MemoryBlobStore::new();
    let accounts = StoreAccountRepository::new(&store);
    let ana = accounts
        .create_account(&NewAccount::new("Ana Ruiz", "ana@x.com", "secret1", Role::Client))
        .unwrap();
    let service = join(&store);

    assert_eq!(service.owner_name(ana.id).unwrap(), "Ana Ruiz");
    assert_eq!(service.owner_name(99).unwrap(), MISSING_OWNER_NAME);
    assert!(service.account_exists(ana.id).unwrap());
    assert!(!service.account_exists(99).unwrap());
}

#[test]
fn enrichment_never_writes() {
    let store = MemoryBlobStore::new();
    let bookings = StoreBookingRepository::with_clock(&store, FixedClock(today()));
    bookings.create_booking(8, today(), at(9, 0)).unwrap();
    let before = store.read("bookings").unwrap();

    join(&store).enrich_all().unwrap();
    assert_eq!(store.read("bookings").unwrap(), before);
    assert!(store.read("accounts").unwrap().is_none());
}
