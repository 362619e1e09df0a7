use serde::Serialize;

use crate::core::errors::{EngineError, Fault};
use crate::core::store::DocumentStore;
use crate::models::models::{FeedEntry, FollowRecord, FollowStats, Post, PostCollection};
use crate::{feed, follow, posts};

// Operation surface for a routing layer: the caller id is already resolved
// by whatever authenticates the request. Failures never surface as Err;
// every outcome is an envelope carrying the classification a transport
// needs to pick a status line.

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

impl<T> ApiResponse<T> {
    fn ok(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            status: 200,
            message: message.to_string(),
            data: Some(data),
            fault: None,
        }
    }

    fn created(message: &str, data: T) -> Self {
        ApiResponse {
            status: 201,
            ..ApiResponse::ok(message, data)
        }
    }

    fn failure(err: EngineError) -> Self {
        ApiResponse {
            success: false,
            status: err.status_code(),
            message: err.to_string(),
            data: None,
            fault: Some(err.fault()),
        }
    }
}

impl ApiResponse<()> {
    fn ok_empty(message: &str) -> Self {
        ApiResponse {
            success: true,
            status: 200,
            message: message.to_string(),
            data: None,
            fault: None,
        }
    }
}

fn from_result<T>(result: Result<T, EngineError>, message: &str) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(message, data),
        Err(err) => ApiResponse::failure(err),
    }
}

// === Follow graph ===

pub async fn follow<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    target_id: &str,
) -> ApiResponse<FollowRecord> {
    match follow::follow_user(store, caller_id, target_id).await {
        Ok(record) => ApiResponse::created("User followed successfully", record),
        Err(err) => ApiResponse::failure(err),
    }
}

pub async fn unfollow<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    target_id: &str,
) -> ApiResponse<()> {
    match follow::unfollow_user(store, caller_id, target_id).await {
        Ok(()) => ApiResponse::ok_empty("User unfollowed successfully"),
        Err(err) => ApiResponse::failure(err),
    }
}

pub async fn followers<S: DocumentStore>(store: &S, user_id: &str) -> ApiResponse<Vec<String>> {
    from_result(
        follow::get_followers(store, user_id).await,
        "Followers retrieved successfully",
    )
}

pub async fn following<S: DocumentStore>(store: &S, user_id: &str) -> ApiResponse<Vec<String>> {
    from_result(
        follow::get_following(store, user_id).await,
        "Following retrieved successfully",
    )
}

pub async fn follow_stats<S: DocumentStore>(store: &S, user_id: &str) -> ApiResponse<FollowStats> {
    from_result(
        follow::get_follow_stats(store, user_id).await,
        "Follow stats retrieved successfully",
    )
}

// === Posts ===

pub async fn create_post<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    content: &str,
) -> ApiResponse<PostCollection> {
    match posts::create_post(store, caller_id, content).await {
        Ok(collection) => ApiResponse::created("Post created successfully", collection),
        Err(err) => ApiResponse::failure(err),
    }
}

pub async fn get_post<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    index: i64,
) -> ApiResponse<Post> {
    // A negative position is just out of range for a read.
    let index = match usize::try_from(index) {
        Ok(index) => index,
        Err(_) => {
            return ApiResponse::failure(EngineError::NotFound("Post not found".to_string()))
        }
    };

    from_result(
        posts::get_post(store, caller_id, index).await,
        "Post found successfully",
    )
}

pub async fn list_posts<S: DocumentStore>(
    store: &S,
    caller_id: &str,
) -> ApiResponse<PostCollection> {
    from_result(
        posts::list_posts(store, caller_id).await,
        "All posts fetched successfully",
    )
}

pub async fn update_post<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    index: i64,
    content: &str,
) -> ApiResponse<Post> {
    let index = match checked_index(index) {
        Ok(index) => index,
        Err(err) => return ApiResponse::failure(err),
    };

    from_result(
        posts::update_post(store, caller_id, index, content).await,
        "Post updated successfully",
    )
}

pub async fn delete_post<S: DocumentStore>(
    store: &S,
    caller_id: &str,
    index: i64,
) -> ApiResponse<PostCollection> {
    let index = match checked_index(index) {
        Ok(index) => index,
        Err(err) => return ApiResponse::failure(err),
    };

    from_result(
        posts::delete_post(store, caller_id, index).await,
        "Post deleted successfully",
    )
}

// === Feed ===

pub async fn feed<S: DocumentStore>(store: &S, caller_id: &str) -> ApiResponse<Vec<FeedEntry>> {
    from_result(
        feed::get_latest_posts(store, caller_id).await,
        "Latest posts from followed users retrieved successfully",
    )
}

// Mutations reject a negative position outright instead of treating it as
// an absent one.
fn checked_index(index: i64) -> Result<usize, EngineError> {
    usize::try_from(index)
        .map_err(|_| EngineError::Validation("Invalid post index".to_string()))
}
