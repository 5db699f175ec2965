use super::{at, create_test_story, create_test_user};
use crate::traits::ReadingStore;
use crate::MemoryStorage;
use chrono::{FixedOffset, NaiveDate};
use readoku_core::{ReadingEventId, ReadingWindows, ReferenceClock};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn clock() -> ReferenceClock {
    ReferenceClock::new(tokyo())
}

#[tokio::test]
async fn latest_event_breaks_ties_by_id() {
    let storage = MemoryStorage::new();
    let user = create_test_user(&storage, "a@example.com").await;
    let story = create_test_story(&storage, user, "a b", "2024-06-01T00:00:00Z").await;
    let same = at("2024-06-01T03:00:00Z");

    let first = storage.append_reading_event(user, story.id, 2, same).await.unwrap();
    let second = storage.append_reading_event(user, story.id, 2, same).await.unwrap();
    assert!(second.id > first.id);

    let latest = storage.latest_reading_event(user, story.id).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
}

#[tokio::test]
async fn latest_event_prefers_later_read_at_over_higher_id() {
    let storage = MemoryStorage::new();
    let user = create_test_user(&storage, "a@example.com").await;
    let story = create_test_story(&storage, user, "a b", "2024-06-01T00:00:00Z").await;

    let later = storage
        .append_reading_event(user, story.id, 2, at("2024-06-02T00:00:00Z"))
        .await
        .unwrap();
    storage.append_reading_event(user, story.id, 2, at("2024-06-01T00:00:00Z")).await.unwrap();

    let latest = storage.latest_reading_event(user, story.id).await.unwrap().unwrap();
    assert_eq!(latest.id, later.id);
}

#[tokio::test]
async fn delete_requires_ownership() {
    let storage = MemoryStorage::new();
    let alice = create_test_user(&storage, "alice@example.com").await;
    let bob = create_test_user(&storage, "bob@example.com").await;
    let story = create_test_story(&storage, alice, "a b", "2024-06-01T00:00:00Z").await;
    let event = storage
        .append_reading_event(alice, story.id, 2, at("2024-06-01T01:00:00Z"))
        .await
        .unwrap();

    assert!(!storage.delete_reading_event(event.id, bob).await.unwrap());
    assert!(!storage.delete_reading_event(ReadingEventId(9999), alice).await.unwrap());
    assert!(storage.delete_reading_event(event.id, alice).await.unwrap());
    assert_eq!(storage.count_reading_events(alice, story.id).await.unwrap(), 0);
}

#[tokio::test]
async fn totals_respect_half_open_local_windows() {
    let storage = MemoryStorage::new();
    let user = create_test_user(&storage, "a@example.com").await;
    let other = create_test_user(&storage, "b@example.com").await;
    let story = create_test_story(&storage, user, "a b", "2024-06-01T00:00:00Z").await;
    let foreign = create_test_story(&storage, other, "a b", "2024-06-01T00:00:00Z").await;
    // Sat 2024-06-01 23:59:59 local, then Sun 00:00 local (same week), then last year.
    storage.append_reading_event(user, story.id, 50, at("2024-06-01T14:59:59Z")).await.unwrap();
    storage.append_reading_event(user, story.id, 70, at("2024-06-01T15:00:00Z")).await.unwrap();
    storage.append_reading_event(user, story.id, 5, at("2023-12-31T00:00:00Z")).await.unwrap();
    storage
        .append_reading_event(other, foreign.id, 900, at("2024-06-01T10:00:00Z"))
        .await
        .unwrap();

    let windows = ReadingWindows::at(&clock(), at("2024-06-01T10:00:00Z"), 7).unwrap();
    let totals = storage.ledger_totals(user, &windows, tokyo()).await.unwrap();

    assert_eq!(totals.today, 50);
    assert_eq!(totals.week, 120);
    assert_eq!(totals.month, 120);
    assert_eq!(totals.year, 120);
    assert_eq!(totals.total, 125);
}

#[tokio::test]
async fn daily_buckets_use_offset_dates() {
    let storage = MemoryStorage::new();
    let user = create_test_user(&storage, "a@example.com").await;
    let story = create_test_story(&storage, user, "a b", "2024-06-01T00:00:00Z").await;
    // 14:59Z is 23:59 on June 1 in +09:00; 15:00Z is already June 2.
    storage.append_reading_event(user, story.id, 10, at("2024-06-01T14:59:00Z")).await.unwrap();
    storage.append_reading_event(user, story.id, 20, at("2024-06-01T15:00:00Z")).await.unwrap();
    storage.append_reading_event(user, story.id, 5, at("2024-06-01T16:00:00Z")).await.unwrap();
    storage.append_reading_event(user, story.id, 7, at("2024-05-31T14:59:59Z")).await.unwrap();

    let windows = ReadingWindows::at(&clock(), at("2024-06-02T03:00:00Z"), 2).unwrap();
    let days = storage.ledger_totals(user, &windows, tokyo()).await.unwrap().daily;

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(days[0].word_count, 10);
    assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    assert_eq!(days[1].word_count, 25);
}
