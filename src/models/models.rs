use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FollowRecord {
    pub user_id: String,
    pub following: Vec<String>,
    pub follower: Vec<String>,
}

impl FollowRecord {
    pub fn new(user_id: &str) -> Self {
        FollowRecord {
            user_id: user_id.to_string(),
            following: Vec::new(),
            follower: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Post {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostCollection {
    pub user_id: String,
    pub posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(user_id: &str) -> Self {
        PostCollection {
            user_id: user_id.to_string(),
            posts: Vec::new(),
        }
    }
}

// Read model produced by feed aggregation, never persisted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FeedEntry {
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FollowStats {
    pub followers_count: usize,
    pub following_count: usize,
}
