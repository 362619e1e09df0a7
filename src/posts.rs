use chrono::Utc;

use crate::config::{posts_key, MAX_POST_LENGTH};
use crate::core::errors::EngineError;
use crate::core::store::{DocumentStore, DocumentStoreExt};
use crate::models::models::{Post, PostCollection};

// Posts are addressed by zero-based position. Removing one shifts every
// later index down, so positions must not be cached across mutations.

fn validate_content(content: &str) -> Result<(), EngineError> {
    if content.is_empty() {
        return Err(EngineError::Validation("Content is required".to_string()));
    }
    if content.len() > MAX_POST_LENGTH {
        return Err(EngineError::Validation("Content too long".to_string()));
    }
    Ok(())
}

pub async fn create_post<S: DocumentStore>(
    store: &S,
    user_id: &str,
    content: &str,
) -> Result<PostCollection, EngineError> {
    validate_content(content)?;

    let post = Post {
        content: content.to_string(),
        created_at: Utc::now(),
    };

    let collection = store
        .update_json(&posts_key(user_id), |collection: Option<PostCollection>| {
            let mut collection = collection.unwrap_or_else(|| PostCollection::new(user_id));
            collection.posts.push(post);
            collection
        })
        .await?;

    tracing::debug!(user_id, "post appended");

    Ok(collection)
}

pub async fn get_post<S: DocumentStore>(
    store: &S,
    user_id: &str,
    index: usize,
) -> Result<Post, EngineError> {
    let collection: Option<PostCollection> = store.get_json(&posts_key(user_id)).await?;

    collection
        .and_then(|c| c.posts.get(index).cloned())
        .ok_or_else(|| EngineError::NotFound("Post not found".to_string()))
}

pub async fn list_posts<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<PostCollection, EngineError> {
    let collection: Option<PostCollection> = store.get_json(&posts_key(user_id)).await?;

    match collection {
        Some(c) if !c.posts.is_empty() => Ok(c),
        _ => Err(EngineError::NotFound("No posts found for the user".to_string())),
    }
}

pub async fn update_post<S: DocumentStore>(
    store: &S,
    user_id: &str,
    index: usize,
    content: &str,
) -> Result<Post, EngineError> {
    validate_content(content)?;

    let key = posts_key(user_id);
    let mut collection: PostCollection = store
        .get_json(&key)
        .await?
        .filter(|c: &PostCollection| !c.posts.is_empty())
        .ok_or_else(|| EngineError::NotFound("Post not found".to_string()))?;

    if index >= collection.posts.len() {
        return Err(EngineError::Validation("Invalid post index".to_string()));
    }

    // Content only; created_at keeps the original append time.
    collection.posts[index].content = content.to_string();
    store.set_json(&key, &collection).await?;

    Ok(collection.posts[index].clone())
}

pub async fn delete_post<S: DocumentStore>(
    store: &S,
    user_id: &str,
    index: usize,
) -> Result<PostCollection, EngineError> {
    let key = posts_key(user_id);
    let mut collection: PostCollection = store
        .get_json(&key)
        .await?
        .filter(|c: &PostCollection| !c.posts.is_empty())
        .ok_or_else(|| EngineError::NotFound("Post not found".to_string()))?;

    if index >= collection.posts.len() {
        return Err(EngineError::Validation("Invalid post index".to_string()));
    }

    collection.posts.remove(index);
    store.set_json(&key, &collection).await?;

    tracing::debug!(user_id, index, "post removed");

    Ok(collection)
}
