use async_trait::async_trait;

use braid::api;
use braid::core::errors::{EngineError, Fault};
use braid::core::memory::MemoryStore;
use braid::core::store::{DocumentStore, StoreError, UpdateFn};
use braid::follow;
use braid::posts;

#[tokio::test]
async fn test_full_follow_and_feed_flow() {
    let store = MemoryStore::new();
    let alice = uuid::Uuid::new_v4().to_string();
    let bob = uuid::Uuid::new_v4().to_string();
    let carol = uuid::Uuid::new_v4().to_string();

    // 1. Alice follows both authors
    let resp = api::follow(&store, &alice, &bob).await;
    assert!(resp.success);
    assert_eq!(resp.status, 201);
    assert_eq!(resp.message, "User followed successfully");
    let record = resp.data.unwrap();
    assert_eq!(record.user_id, alice);
    assert_eq!(record.following, vec![bob.clone()]);

    let resp = api::follow(&store, &alice, &carol).await;
    assert!(resp.success);
    assert_eq!(resp.data.unwrap().following, vec![bob.clone(), carol.clone()]);

    // 2. Authors publish; bob's second post is the newest overall
    let resp = api::create_post(&store, &bob, "first post from bob").await;
    assert!(resp.success);
    assert_eq!(resp.status, 201);
    assert_eq!(resp.message, "Post created successfully");
    assert_eq!(resp.data.unwrap().posts.len(), 1);

    let resp = api::create_post(&store, &carol, "carol checking in").await;
    assert!(resp.success);

    let resp = api::create_post(&store, &bob, "second post from bob").await;
    assert!(resp.success);
    assert_eq!(resp.data.unwrap().posts.len(), 2);

    // 3. Alice's feed is globally newest-first with authorship attached
    let resp = api::feed(&store, &alice).await;
    assert!(resp.success);
    assert_eq!(
        resp.message,
        "Latest posts from followed users retrieved successfully"
    );
    let entries = resp.data.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].content, "second post from bob");
    assert_eq!(entries[0].author, bob);
    assert_eq!(entries[1].content, "carol checking in");
    assert_eq!(entries[1].author, carol);
    assert_eq!(entries[2].content, "first post from bob");

    // 4. Bob's record was created by the target-side upsert, so his feed
    // succeeds and is empty rather than failing as unknown
    let resp = api::feed(&store, &bob).await;
    assert!(resp.success);
    assert!(resp.data.unwrap().is_empty());

    // 5. Followers and stats reflect the graph
    let resp = api::followers(&store, &bob).await;
    assert!(resp.success);
    assert_eq!(resp.data.unwrap(), vec![alice.clone()]);

    let resp = api::follow_stats(&store, &alice).await;
    assert!(resp.success);
    let stats = resp.data.unwrap();
    assert_eq!(stats.following_count, 2);
    assert_eq!(stats.followers_count, 0);

    // 6. Unfollow narrows the feed to the remaining followee
    let resp = api::unfollow(&store, &alice, &carol).await;
    assert!(resp.success);
    assert_eq!(resp.status, 200);
    assert_eq!(resp.message, "User unfollowed successfully");
    assert!(resp.data.is_none());

    let entries = api::feed(&store, &alice).await.data.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.author == bob));
}

#[tokio::test]
async fn test_post_lifecycle_through_api() {
    let store = MemoryStore::new();
    let author = uuid::Uuid::new_v4().to_string();

    for content in ["zero", "one", "two"] {
        assert!(api::create_post(&store, &author, content).await.success);
    }

    // Read by position
    let resp = api::get_post(&store, &author, 1).await;
    assert!(resp.success);
    assert_eq!(resp.message, "Post found successfully");
    assert_eq!(resp.data.unwrap().content, "one");

    // Edit in place
    let resp = api::update_post(&store, &author, 1, "one, edited").await;
    assert!(resp.success);
    assert_eq!(resp.message, "Post updated successfully");
    assert_eq!(resp.data.unwrap().content, "one, edited");

    // Delete shifts the tail down
    let resp = api::delete_post(&store, &author, 1).await;
    assert!(resp.success);
    let collection = resp.data.unwrap();
    assert_eq!(collection.posts.len(), 2);
    assert_eq!(collection.posts[1].content, "two");

    let resp = api::get_post(&store, &author, 1).await;
    assert_eq!(resp.data.unwrap().content, "two");

    let resp = api::list_posts(&store, &author).await;
    assert!(resp.success);
    assert_eq!(resp.message, "All posts fetched successfully");
    assert_eq!(resp.data.unwrap().posts.len(), 2);
}

#[tokio::test]
async fn test_error_envelopes_classify_faults() {
    let store = MemoryStore::new();
    let user = uuid::Uuid::new_v4().to_string();

    // Self-follow is a client fault
    let resp = api::follow(&store, &user, &user).await;
    assert!(!resp.success);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.fault, Some(Fault::Client));
    assert_eq!(resp.message, "Cannot follow or unfollow yourself");
    assert!(resp.data.is_none());

    // Unknown records are client faults too
    let resp = api::followers(&store, &user).await;
    assert!(!resp.success);
    assert_eq!(resp.status, 404);
    assert_eq!(resp.fault, Some(Fault::Client));
    assert_eq!(resp.message, "User not found");

    let resp = api::feed(&store, &user).await;
    assert_eq!(resp.status, 404);

    let resp = api::list_posts(&store, &user).await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.message, "No posts found for the user");

    // Negative positions: rejected outright for mutations, out of range for reads
    let resp = api::update_post(&store, &user, -1, "content").await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message, "Invalid post index");

    let resp = api::delete_post(&store, &user, -1).await;
    assert_eq!(resp.status, 400);

    let resp = api::get_post(&store, &user, -1).await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.message, "Post not found");
}

// Store double whose every operation fails, as an unreachable backend would.
struct OfflineStore;

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Backend("store offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Backend("store offline".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("store offline".to_string()))
    }

    async fn update(&self, _key: &str, _apply: UpdateFn<'_>) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Backend("store offline".to_string()))
    }
}

#[tokio::test]
async fn test_storage_failure_is_retryable_server_fault() {
    let store = OfflineStore;

    // Mutations surface the store failure, classified as a server fault
    let err = follow::follow_user(&store, "alice", "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::Storage(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.fault(), Fault::Server);
    assert!(err.is_retryable());

    let err = posts::create_post(&store, "alice", "hello").await.unwrap_err();
    assert!(matches!(err, EngineError::Storage(_)));
    assert!(err.is_retryable());

    // The envelope carries the same classification
    let resp = api::follow(&store, "alice", "bob").await;
    assert!(!resp.success);
    assert_eq!(resp.status, 500);
    assert_eq!(resp.fault, Some(Fault::Server));
    assert!(resp.data.is_none());
    assert!(resp.message.contains("store offline"));

    // Bad input still loses to validation before the store is reached
    let err = follow::follow_user(&store, "alice", "alice").await.unwrap_err();
    assert!(matches!(err, EngineError::SelfReference));
}

#[tokio::test]
async fn test_post_content_validation() {
    let store = MemoryStore::new();
    let author = uuid::Uuid::new_v4().to_string();

    // Empty content
    let resp = api::create_post(&store, &author, "").await;
    assert!(!resp.success);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message, "Content is required");

    // Content over the length limit
    let long_content = "a".repeat(5001);
    let resp = api::create_post(&store, &author, &long_content).await;
    assert!(!resp.success);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message, "Content too long");

    // Exactly at the limit is fine
    let max_content = "a".repeat(5000);
    let resp = api::create_post(&store, &author, &max_content).await;
    assert!(resp.success);

    // The same rules apply to edits
    let resp = api::update_post(&store, &author, 0, "").await;
    assert!(!resp.success);
    assert_eq!(resp.status, 400);
}
