use super::{at, create_test_story, create_test_user};
use crate::traits::StoryStore;
use crate::MemoryStorage;

#[tokio::test]
async fn owned_story_lookup_hides_foreign_stories() {
    let storage = MemoryStorage::new();
    let alice = create_test_user(&storage, "alice@example.com").await;
    let bob = create_test_user(&storage, "bob@example.com").await;
    let story = create_test_story(&storage, alice, "one two three", "2024-06-01T00:00:00Z").await;

    assert_eq!(story.word_count, 3);
    assert!(storage.get_owned_story(story.id, alice).await.unwrap().is_some());
    assert!(storage.get_owned_story(story.id, bob).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_newest_first_and_paged() {
    let storage = MemoryStorage::new();
    let user = create_test_user(&storage, "a@example.com").await;
    let other = create_test_user(&storage, "b@example.com").await;
    for day in 1..=5 {
        create_test_story(&storage, user, "w", &format!("2024-06-0{day}T00:00:00Z")).await;
    }
    create_test_story(&storage, other, "w", "2024-06-09T00:00:00Z").await;

    assert_eq!(storage.count_user_stories(user).await.unwrap(), 5);

    let first = storage.list_user_stories(user, 2, 0).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].created_at, at("2024-06-05T00:00:00Z"));
    assert_eq!(first[1].created_at, at("2024-06-04T00:00:00Z"));

    let last = storage.list_user_stories(user, 2, 4).await.unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].created_at, at("2024-06-01T00:00:00Z"));

    assert!(storage.list_user_stories(user, 2, 10).await.unwrap().is_empty());
}
