use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type UpdateFn<'a> = Box<dyn FnOnce(Option<&[u8]>) -> Result<Vec<u8>, StoreError> + Send + 'a>;

// JSON documents addressed by string keys. `update` is a single-key atomic
// read-modify-write: the closure sees the current document (if any) and
// returns the replacement, and no other write to that key lands in between.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    async fn update(&self, key: &str, apply: UpdateFn<'_>) -> Result<Vec<u8>, StoreError>;
}

#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, &bytes).await
    }

    // Upsert: the closure receives the decoded document (None when absent)
    // and returns the replacement, which is written and handed back decoded.
    async fn update_json<T, F>(&self, key: &str, apply: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce(Option<T>) -> T + Send,
    {
        let written = self
            .update(
                key,
                Box::new(move |current| {
                    let decoded = match current {
                        Some(raw) => Some(serde_json::from_slice(raw)?),
                        None => None,
                    };
                    Ok(serde_json::to_vec(&apply(decoded))?)
                }),
            )
            .await?;

        Ok(serde_json::from_slice(&written)?)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}
