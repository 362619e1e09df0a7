use crate::config::follow_key;
use crate::core::errors::EngineError;
use crate::core::store::{DocumentStore, DocumentStoreExt};
use crate::models::models::{FollowRecord, FollowStats};

// An edge lives on two documents: target in the actor's `following`, actor
// in the target's `follower`. The two upserts are not a transaction; a
// failure in between leaves the edge one-sided until the call is retried.

pub async fn follow_user<S: DocumentStore>(
    store: &S,
    actor_id: &str,
    target_id: &str,
) -> Result<FollowRecord, EngineError> {
    if actor_id == target_id {
        return Err(EngineError::SelfReference);
    }

    let actor = store
        .update_json(&follow_key(actor_id), |record: Option<FollowRecord>| {
            let mut record = record.unwrap_or_else(|| FollowRecord::new(actor_id));
            if !record.following.contains(&target_id.to_string()) {
                record.following.push(target_id.to_string());
            }
            record
        })
        .await?;

    store
        .update_json(&follow_key(target_id), |record: Option<FollowRecord>| {
            let mut record = record.unwrap_or_else(|| FollowRecord::new(target_id));
            if !record.follower.contains(&actor_id.to_string()) {
                record.follower.push(actor_id.to_string());
            }
            record
        })
        .await?;

    tracing::debug!(actor_id, target_id, "follow edge added");

    Ok(actor)
}

pub async fn unfollow_user<S: DocumentStore>(
    store: &S,
    actor_id: &str,
    target_id: &str,
) -> Result<(), EngineError> {
    if actor_id == target_id {
        return Err(EngineError::SelfReference);
    }

    store
        .update_json(&follow_key(actor_id), |record: Option<FollowRecord>| {
            let mut record = record.unwrap_or_else(|| FollowRecord::new(actor_id));
            record.following.retain(|id| id != target_id);
            record
        })
        .await?;

    store
        .update_json(&follow_key(target_id), |record: Option<FollowRecord>| {
            let mut record = record.unwrap_or_else(|| FollowRecord::new(target_id));
            record.follower.retain(|id| id != actor_id);
            record
        })
        .await?;

    tracing::debug!(actor_id, target_id, "follow edge removed");

    Ok(())
}

pub async fn get_followers<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<String>, EngineError> {
    let record: FollowRecord = store
        .get_json(&follow_key(user_id))
        .await?
        .ok_or_else(|| EngineError::NotFound("User not found".to_string()))?;

    Ok(record.follower)
}

pub async fn get_following<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<String>, EngineError> {
    let record: FollowRecord = store
        .get_json(&follow_key(user_id))
        .await?
        .ok_or_else(|| EngineError::NotFound("User not found".to_string()))?;

    Ok(record.following)
}

pub async fn is_following<S: DocumentStore>(
    store: &S,
    actor_id: &str,
    target_id: &str,
) -> Result<bool, EngineError> {
    let record: Option<FollowRecord> = store.get_json(&follow_key(actor_id)).await?;

    Ok(record
        .map(|r| r.following.contains(&target_id.to_string()))
        .unwrap_or(false))
}

pub async fn get_follow_stats<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<FollowStats, EngineError> {
    let record: FollowRecord = store
        .get_json(&follow_key(user_id))
        .await?
        .ok_or_else(|| EngineError::NotFound("User not found".to_string()))?;

    Ok(FollowStats {
        followers_count: record.follower.len(),
        following_count: record.following.len(),
    })
}
