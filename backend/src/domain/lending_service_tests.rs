//! Tests for the borrowing workflow service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::MockClock;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::item::{CostPerDay, Item, ItemId, ItemName, ItemStatus};
use crate::domain::loan::{BorrowId, OpenLoan};
use crate::domain::ports::{MockBorrowStore, MockItemStore, MockUserStore};
use crate::domain::user::{PersonName, PhoneNumber};

fn fixed_clock(now: DateTime<Utc>) -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(move || now);
    Arc::new(clock)
}

fn sample_user(id: UserId) -> User {
    User::new(
        id,
        PersonName::new("Ada").expect("valid name"),
        PhoneNumber::new("0404 000 000").expect("valid phone"),
    )
}

fn shelf_item(name: &str, cost: u64, status: ItemStatus) -> Item {
    Item::new(
        ItemId::random(),
        ItemName::new(name).expect("valid name"),
        CostPerDay::new(cost),
        status,
    )
}

fn open_loan(user_id: UserId, item: Item, borrowed_at: DateTime<Utc>) -> OpenLoan {
    let record = BorrowRecord::new(BorrowId::random(), user_id, *item.id(), borrowed_at);
    OpenLoan { record, item }
}

fn service(
    user_store: MockUserStore,
    item_store: MockItemStore,
    borrow_store: MockBorrowStore,
    clock: Arc<MockClock>,
) -> LendingService<MockUserStore, MockItemStore, MockBorrowStore> {
    let catalogue = Arc::new(CatalogueService::new(
        Arc::new(user_store),
        Arc::new(item_store),
    ));
    LendingService::new(catalogue, Arc::new(borrow_store), clock)
}

#[tokio::test]
async fn borrow_opens_a_loan_for_a_known_user() {
    let now = Utc::now();
    let user_id = UserId::random();
    let item = shelf_item("Ladder", 50, ItemStatus::Available);
    let item_id = *item.id();

    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(move |id| Ok(Some(sample_user(*id))));

    let mut item_store = MockItemStore::new();
    item_store
        .expect_list()
        .times(1)
        .return_once(move || Ok(vec![item]));

    let mut borrow_store = MockBorrowStore::new();
    borrow_store.expect_open_loan().times(1).return_once(
        move |user_id, item_id, borrowed_at| {
            Ok(BorrowRecord::new(
                BorrowId::random(),
                *user_id,
                *item_id,
                borrowed_at,
            ))
        },
    );

    let service = service(user_store, item_store, borrow_store, fixed_clock(now));
    let outcome = service
        .borrow_item(&user_id, "ladder", None)
        .await
        .expect("borrow succeeds");

    assert_eq!(outcome.user.id(), &user_id);
    assert_eq!(outcome.record.item_id(), &item_id);
    assert_eq!(outcome.record.borrowed_at(), now);
    assert_eq!(outcome.message, "Item 'Ladder' borrowed successfully.");
}

#[tokio::test]
async fn borrow_fails_user_not_found_without_details() {
    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let mut item_store = MockItemStore::new();
    item_store.expect_list().times(0);
    let mut borrow_store = MockBorrowStore::new();
    borrow_store.expect_open_loan().times(0);

    let service = service(user_store, item_store, borrow_store, fixed_clock(Utc::now()));
    let error = service
        .borrow_item(&UserId::random(), "ladder", None)
        .await
        .expect_err("unknown user fails");

    assert_eq!(error.code(), ErrorCode::UserNotFound);
}

#[tokio::test]
async fn borrow_registers_unknown_user_when_details_supplied() {
    let now = Utc::now();
    let item = shelf_item("Ladder", 50, ItemStatus::Available);
    let assigned_id = UserId::random();

    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    user_store
        .expect_insert()
        .times(1)
        .return_once(move |draft| Ok(User::from_draft(assigned_id, draft)));

    let mut item_store = MockItemStore::new();
    item_store
        .expect_list()
        .times(1)
        .return_once(move || Ok(vec![item]));

    let mut borrow_store = MockBorrowStore::new();
    borrow_store.expect_open_loan().times(1).return_once(
        move |user_id, item_id, borrowed_at| {
            Ok(BorrowRecord::new(
                BorrowId::random(),
                *user_id,
                *item_id,
                borrowed_at,
            ))
        },
    );

    let service = service(user_store, item_store, borrow_store, fixed_clock(now));
    let outcome = service
        .borrow_item(
            &UserId::random(),
            "Ladder",
            Some(BorrowerDetails {
                name: "Grace".to_owned(),
                phone_number: "0405 111 111".to_owned(),
            }),
        )
        .await
        .expect("borrow registers and succeeds");

    // The store assigns the id; the requested one is not reused.
    assert_eq!(outcome.user.id(), &assigned_id);
    assert_eq!(outcome.record.user_id(), &assigned_id);
}

#[tokio::test]
async fn borrow_with_blank_details_fails_validation_without_insert() {
    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    user_store.expect_insert().times(0);

    let service = service(
        user_store,
        MockItemStore::new(),
        MockBorrowStore::new(),
        fixed_clock(Utc::now()),
    );
    let error = service
        .borrow_item(
            &UserId::random(),
            "Ladder",
            Some(BorrowerDetails {
                name: "Grace".to_owned(),
                phone_number: "  ".to_owned(),
            }),
        )
        .await
        .expect_err("blank phone fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn borrow_fails_item_unavailable_when_nothing_matches() {
    let user_id = UserId::random();

    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(move |id| Ok(Some(sample_user(*id))));

    let mut item_store = MockItemStore::new();
    let shelf = vec![shelf_item("Ladder", 50, ItemStatus::Borrowed)];
    item_store
        .expect_list()
        .times(1)
        .return_once(move || Ok(shelf));

    let mut borrow_store = MockBorrowStore::new();
    borrow_store.expect_open_loan().times(0);

    let service = service(user_store, item_store, borrow_store, fixed_clock(Utc::now()));
    let error = service
        .borrow_item(&user_id, "Ladder", None)
        .await
        .expect_err("borrowed item never matches");

    assert_eq!(error.code(), ErrorCode::ItemUnavailable);
}

#[tokio::test]
async fn losing_the_claim_race_maps_to_item_unavailable() {
    let user_id = UserId::random();
    let item = shelf_item("Ladder", 50, ItemStatus::Available);
    let item_id = *item.id();

    let mut user_store = MockUserStore::new();
    user_store
        .expect_find_by_id()
        .times(1)
        .return_once(move |id| Ok(Some(sample_user(*id))));

    let mut item_store = MockItemStore::new();
    item_store
        .expect_list()
        .times(1)
        .return_once(move || Ok(vec![item]));

    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_open_loan()
        .times(1)
        .return_once(move |_, _, _| Err(BorrowStoreError::item_not_available(item_id)));

    let service = service(user_store, item_store, borrow_store, fixed_clock(Utc::now()));
    let error = service
        .borrow_item(&user_id, "Ladder", None)
        .await
        .expect_err("raced borrow fails");

    assert_eq!(error.code(), ErrorCode::ItemUnavailable);
}

#[tokio::test]
async fn return_with_no_open_loans_is_nothing_to_return() {
    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_close_all_for_user()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = service(
        MockUserStore::new(),
        MockItemStore::new(),
        borrow_store,
        fixed_clock(Utc::now()),
    );
    let outcome = service
        .return_items(&UserId::random())
        .await
        .expect("return succeeds");

    assert_eq!(outcome, ReturnOutcome::NothingToReturn);
}

#[tokio::test]
async fn return_bills_one_line_per_consumed_loan() {
    let now = Utc::now();
    let user_id = UserId::random();
    let loans = vec![
        open_loan(
            user_id,
            shelf_item("Ladder", 50, ItemStatus::Borrowed),
            now - Duration::days(2),
        ),
        open_loan(
            user_id,
            shelf_item("Drill", 30, ItemStatus::Borrowed),
            now - Duration::days(3),
        ),
    ];

    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_close_all_for_user()
        .times(1)
        .return_once(move |_| Ok(loans));

    let service = service(
        MockUserStore::new(),
        MockItemStore::new(),
        borrow_store,
        fixed_clock(now),
    );
    let outcome = service
        .return_items(&user_id)
        .await
        .expect("return succeeds");

    let ReturnOutcome::Settled(bill) = outcome else {
        panic!("expected a settled bill");
    };
    assert_eq!(bill.lines().len(), 2);
    assert_eq!(bill.lines()[0].item_name.as_ref(), "Ladder");
    assert_eq!(bill.lines()[0].line_total, 100);
    assert_eq!(bill.lines()[1].item_name.as_ref(), "Drill");
    assert_eq!(bill.lines()[1].line_total, 90);
    assert_eq!(bill.total(), 190);
}

#[tokio::test]
async fn same_day_return_bills_one_day_per_item() {
    let now = Utc::now();
    let user_id = UserId::random();
    let loans = vec![open_loan(
        user_id,
        shelf_item("Drill", 80, ItemStatus::Borrowed),
        now,
    )];

    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_close_all_for_user()
        .times(1)
        .return_once(move |_| Ok(loans));

    let service = service(
        MockUserStore::new(),
        MockItemStore::new(),
        borrow_store,
        fixed_clock(now),
    );
    let outcome = service
        .return_items(&user_id)
        .await
        .expect("return succeeds");

    let ReturnOutcome::Settled(bill) = outcome else {
        panic!("expected a settled bill");
    };
    assert_eq!(bill.lines()[0].days, 1);
    assert_eq!(bill.total(), 80);
}

#[tokio::test]
async fn open_loans_reads_without_consuming() {
    let now = Utc::now();
    let user_id = UserId::random();
    let loans = vec![open_loan(
        user_id,
        shelf_item("Ladder", 50, ItemStatus::Borrowed),
        now - Duration::days(1),
    )];

    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_list_open_for_user()
        .times(1)
        .return_once(move |_| Ok(loans));
    borrow_store.expect_close_all_for_user().times(0);

    let service = service(
        MockUserStore::new(),
        MockItemStore::new(),
        borrow_store,
        fixed_clock(now),
    );
    let open = service
        .open_loans(&user_id)
        .await
        .expect("listing succeeds");

    assert_eq!(open.len(), 1);
    assert_eq!(open[0].item.name().as_ref(), "Ladder");
}

#[rstest]
#[case::connection(
    BorrowStoreError::connection("pool unavailable"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(BorrowStoreError::query("broken filter"), ErrorCode::InternalError)]
#[tokio::test]
async fn return_propagates_store_failures(
    #[case] store_error: BorrowStoreError,
    #[case] expected: ErrorCode,
) {
    let mut borrow_store = MockBorrowStore::new();
    borrow_store
        .expect_close_all_for_user()
        .times(1)
        .return_once(move |_| Err(store_error));

    let service = service(
        MockUserStore::new(),
        MockItemStore::new(),
        borrow_store,
        fixed_clock(Utc::now()),
    );
    let error = service
        .return_items(&UserId::random())
        .await
        .expect_err("store failure propagates");

    assert_eq!(error.code(), expected);
}
