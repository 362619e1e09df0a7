use std::collections::HashSet;

use futures::stream::{self, StreamExt};

use crate::config::{feed_fanout_limit, follow_key, posts_key, FEED_POSTS_PER_FOLLOWEE};
use crate::core::errors::EngineError;
use crate::core::store::{DocumentStore, DocumentStoreExt};
use crate::models::models::{FeedEntry, FollowRecord, PostCollection};

pub async fn get_latest_posts<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<FeedEntry>, EngineError> {
    let record: FollowRecord = store
        .get_json(&follow_key(user_id))
        .await?
        .ok_or_else(|| EngineError::NotFound("User not found".to_string()))?;

    // First-seen order doubles as the tie-break order for the final sort.
    let mut seen = HashSet::new();
    let followees: Vec<String> = record
        .following
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let mut buckets: Vec<(usize, Vec<FeedEntry>)> = stream::iter(followees.iter().enumerate())
        .map(|(position, followee_id)| async move {
            (position, fetch_recent_posts(store, followee_id).await)
        })
        .buffer_unordered(feed_fanout_limit())
        .collect()
        .await;

    // buffer_unordered yields in completion order; restore follow order
    // before the stable sort so equal timestamps resolve deterministically.
    buckets.sort_by_key(|(position, _)| *position);

    let mut entries: Vec<FeedEntry> = buckets
        .into_iter()
        .flat_map(|(_, contribution)| contribution)
        .collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    tracing::debug!(user_id, entries = entries.len(), "feed aggregated");

    Ok(entries)
}

// One followee's slice of the feed: its most recent posts, newest first.
// A missing collection contributes nothing; so does a failed read, which is
// logged and skipped rather than failing the whole aggregation.
async fn fetch_recent_posts<S: DocumentStore>(store: &S, followee_id: &str) -> Vec<FeedEntry> {
    let collection: Option<PostCollection> = match store.get_json(&posts_key(followee_id)).await {
        Ok(collection) => collection,
        Err(err) => {
            tracing::warn!(followee_id, error = %err, "skipping followee after fetch failure");
            return Vec::new();
        }
    };

    let collection = match collection {
        Some(c) => c,
        None => return Vec::new(),
    };

    let mut posts = collection.posts;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts.truncate(FEED_POSTS_PER_FOLLOWEE);

    posts
        .into_iter()
        .map(|post| FeedEntry {
            author: followee_id.to_string(),
            content: post.content,
            created_at: post.created_at,
        })
        .collect()
}
