pub const MAX_POST_LENGTH: usize = 5000;
pub const FEED_POSTS_PER_FOLLOWEE: usize = 5;

pub fn feed_fanout_limit() -> usize {
    std::env::var("BRAID_FEED_FANOUT")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(8)
}

pub fn follow_key(user_id: &str) -> String {
    format!("follow:{}", user_id)
}

pub fn posts_key(user_id: &str) -> String {
    format!("posts:{}", user_id)
}
