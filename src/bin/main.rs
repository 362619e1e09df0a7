use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use braid::api;
use braid::core::memory::MemoryStore;

fn print_step<T: Serialize>(label: &str, response: &T) -> Result<()> {
    println!("--- {}", label);
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = MemoryStore::new();

    let alice = Uuid::new_v4().to_string();
    let bob = Uuid::new_v4().to_string();
    let carol = Uuid::new_v4().to_string();

    println!("alice={} bob={} carol={}", alice, bob, carol);

    // Build a small graph: alice follows both authors.
    print_step("follow alice -> bob", &api::follow(&store, &alice, &bob).await)?;
    print_step("follow alice -> carol", &api::follow(&store, &alice, &carol).await)?;
    print_step("follow alice -> alice (rejected)", &api::follow(&store, &alice, &alice).await)?;

    print_step("bob posts", &api::create_post(&store, &bob, "first post from bob").await)?;
    print_step("carol posts", &api::create_post(&store, &carol, "carol checking in").await)?;
    print_step("bob posts again", &api::create_post(&store, &bob, "second post from bob").await)?;

    print_step("alice's feed", &api::feed(&store, &alice).await)?;

    print_step("bob's followers", &api::followers(&store, &bob).await)?;
    print_step("alice's follow stats", &api::follow_stats(&store, &alice).await)?;

    print_step("bob edits post 0", &api::update_post(&store, &bob, 0, "first post, edited").await)?;
    print_step("bob deletes post 1", &api::delete_post(&store, &bob, 1).await)?;
    print_step("bob's posts", &api::list_posts(&store, &bob).await)?;

    print_step("unfollow alice -> carol", &api::unfollow(&store, &alice, &carol).await)?;
    print_step("alice's feed after unfollow", &api::feed(&store, &alice).await)?;

    Ok(())
}
