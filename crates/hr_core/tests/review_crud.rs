use hr_core::{
    DbOptions, RepoError, Review, ReviewRepository, Session, SqliteReviewRepository,
};
use std::cell::RefCell;
use std::rc::Rc;

fn session_with_table() -> Session {
    let session = Session::open_in_memory(&DbOptions::default()).unwrap();
    SqliteReviewRepository::new(&session).create_table().unwrap();
    session
}

fn row_count(session: &Session, id: i64) -> i64 {
    session
        .conn()
        .query_row("SELECT COUNT(*) FROM reviews WHERE id = ?1;", [id], |row| {
            row.get(0)
        })
        .unwrap()
}

#[test]
fn create_assigns_first_id_and_keeps_fields() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let review = repo.create(2023, "Good performance", 1).unwrap();

    let review = review.borrow();
    assert_eq!(review.id, Some(1));
    assert_eq!(review.year, 2023);
    assert_eq!(review.summary, "Good performance");
    assert_eq!(review.employee_id, 1);
    assert!(session.reviews().contains(1));
}

#[test]
fn create_then_find_roundtrip_in_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hr.sqlite3");

    let id = {
        let session = Session::open(&path, &DbOptions::default()).unwrap();
        let repo = SqliteReviewRepository::new(&session);
        repo.create_table().unwrap();
        let review = repo.create(2021, "Exceeded targets", 7).unwrap();
        let stored_id = review.borrow().id.unwrap();
        session.reviews().clear();
        stored_id
    };

    let session = Session::open(&path, &DbOptions::default()).unwrap();
    let repo = SqliteReviewRepository::new(&session);
    let loaded = repo.find_by_id(id).unwrap().expect("review should exist");
    assert_eq!(
        *loaded.borrow(),
        Review::with_id(id, 2021, "Exceeded targets", 7)
    );
}

#[test]
fn roundtrip_preserves_edge_values() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let cases = [
        (i64::MIN, "", i64::MAX),
        (i64::MAX, "Très bien — 優秀 👍", i64::MIN),
        (0, "line one\nline two\t'quoted'", 0),
    ];
    let ids: Vec<i64> = cases
        .iter()
        .map(|(year, summary, employee_id)| {
            let review = repo.create(*year, summary, *employee_id).unwrap();
            let id = review.borrow().id.unwrap();
            id
        })
        .collect();

    session.reviews().clear();
    for ((year, summary, employee_id), id) in cases.iter().zip(ids) {
        let loaded = repo.find_by_id(id).unwrap().expect("review should exist");
        assert_eq!(
            *loaded.borrow(),
            Review::with_id(id, *year, *summary, *employee_id)
        );
    }
}

#[test]
fn repeated_lookups_return_same_object() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let created = repo.create(2022, "Reliable", 2).unwrap();
    let id = created.borrow().id.unwrap();

    let by_id = repo.find_by_id(id).unwrap().unwrap();
    let again = repo.find_by_id(id).unwrap().unwrap();
    let from_list = repo.get_all().unwrap();

    assert!(Rc::ptr_eq(&created, &by_id));
    assert!(Rc::ptr_eq(&by_id, &again));
    assert_eq!(from_list.len(), 1);
    assert!(Rc::ptr_eq(&from_list[0], &created));
}

#[test]
fn lookups_after_cache_clear_hydrate_one_new_object() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let created = repo.create(2022, "Reliable", 2).unwrap();
    let id = created.borrow().id.unwrap();
    session.reviews().clear();

    let first = repo.find_by_id(id).unwrap().unwrap();
    let second = repo.get_all().unwrap().remove(0);

    assert!(!Rc::ptr_eq(&first, &created));
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(*first.borrow(), *created.borrow());
}

#[test]
fn save_on_persisted_review_updates_in_place() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let review = repo.create(2023, "Draft", 4).unwrap();
    let id = review.borrow().id.unwrap();

    review.borrow_mut().summary = "Final".to_string();
    let changed = repo.save(&review).unwrap();

    assert_eq!(changed, 1);
    assert_eq!(review.borrow().id, Some(id));
    assert_eq!(row_count(&session, id), 1);
    assert_eq!(repo.get_all().unwrap().len(), 1);

    session.reviews().clear();
    let reloaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(reloaded.borrow().summary, "Final");
}

#[test]
fn update_of_missing_row_reports_zero_rows() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let ghost = Rc::new(RefCell::new(Review::with_id(99, 2020, "Gone", 1)));
    assert_eq!(repo.update(&ghost).unwrap(), 0);
    assert_eq!(repo.save(&ghost).unwrap(), 0);
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn delete_clears_id_evicts_cache_and_allows_reinsert() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let review = repo.create(2023, "Only", 5).unwrap();
    let old_id = review.borrow().id.unwrap();

    assert_eq!(repo.delete(&review).unwrap(), 1);
    assert_eq!(review.borrow().id, None);
    assert!(!session.reviews().contains(old_id));
    assert!(repo.find_by_id(old_id).unwrap().is_none());

    assert_eq!(repo.save(&review).unwrap(), 1);
    let new_id = review.borrow().id.unwrap();
    assert_eq!(old_id, 1);
    assert_eq!(new_id, 2);
    assert!(Rc::ptr_eq(&repo.find_by_id(new_id).unwrap().unwrap(), &review));
}

#[test]
fn delete_is_a_noop_for_transient_and_stale_reviews() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let transient = Rc::new(RefCell::new(Review::new(2024, "Unsaved", 1)));
    assert_eq!(repo.delete(&transient).unwrap(), 0);
    assert_eq!(transient.borrow().id, None);

    let stale = Rc::new(RefCell::new(Review::with_id(42, 2024, "Stale", 1)));
    assert_eq!(repo.delete(&stale).unwrap(), 0);
    assert_eq!(stale.borrow().id, None);
}

#[test]
fn find_by_id_returns_none_for_unknown_id() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    assert!(repo.find_by_id(1).unwrap().is_none());
    assert!(session.reviews().is_empty());
}

#[test]
fn get_all_returns_rows_in_insertion_order() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    repo.create(2023, "Good performance", 1).unwrap();
    repo.create(2023, "Good performance", 1).unwrap();

    let all = repo.get_all().unwrap();
    let ids: Vec<_> = all.iter().map(|review| review.borrow().id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn constructing_a_review_does_not_touch_storage_or_cache() {
    let session = session_with_table();
    let repo = SqliteReviewRepository::new(&session);

    let _review = Review::with_id(1, 2023, "Detached", 1);

    assert!(session.reviews().is_empty());
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn null_columns_are_reported_as_invalid_data() {
    let session = session_with_table();
    session
        .conn()
        .execute(
            "INSERT INTO reviews (year, summary, employee_id) VALUES (2023, NULL, 1);",
            [],
        )
        .unwrap();

    let repo = SqliteReviewRepository::new(&session);
    let err = repo.find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("summary")));
}
