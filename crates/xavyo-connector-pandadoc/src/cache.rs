//! One-shot collection cache owned by a builder.

use std::future::Future;
use tokio::sync::OnceCell;
use tracing::info;

use crate::PandaDocResult;

/// Collection fetched at most once per builder instance.
///
/// Concurrent first callers share a single fetch: the others wait for it
/// and then read the stored value. A failed fetch leaves the cache empty.
#[derive(Debug)]
pub(crate) struct CollectionCache<T> {
    name: &'static str,
    cell: OnceCell<Vec<T>>,
}

impl<T> CollectionCache<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached collection, running `fetch` if it is not populated.
    pub(crate) async fn get_or_fetch<F, Fut>(&self, fetch: F) -> PandaDocResult<&[T]>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PandaDocResult<Vec<T>>>,
    {
        let items = self
            .cell
            .get_or_try_init(|| async {
                let items = fetch().await?;
                info!(collection = self.name, count = items.len(), "Collection cached");
                Ok::<_, crate::PandaDocError>(items)
            })
            .await?;

        Ok(items.as_slice())
    }

    #[cfg(test)]
    pub(crate) fn is_populated(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PandaDocError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fetches_once() {
        let cache = CollectionCache::new("users");
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let items = cache
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(items, &[1, 2, 3]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_populated());
    }

    #[tokio::test]
    async fn test_concurrent_first_access_fetches_once() {
        let cache = CollectionCache::new("users");
        let calls = AtomicU32::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec!["a", "b"])
        };

        let (a, b) = tokio::join!(cache.get_or_fetch(fetch), cache.get_or_fetch(fetch));

        assert_eq!(a.unwrap().len(), 2);
        assert_eq!(b.unwrap().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let cache: CollectionCache<u8> = CollectionCache::new("workspaces");

        let err = cache
            .get_or_fetch(|| async { Err(PandaDocError::Config("down".into())) })
            .await;
        assert!(err.is_err());
        assert!(!cache.is_populated());

        let items = cache.get_or_fetch(|| async { Ok(vec![7]) }).await.unwrap();
        assert_eq!(items, &[7]);
    }
}
