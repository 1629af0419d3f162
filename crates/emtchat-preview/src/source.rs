//! In-memory synthesized sources
//!
//! When only inline text is available, the dispatcher materializes it as an
//! in-memory blob and hands out a locally-resolvable `memblob://` URL. The
//! returned [`BlobUrl`] is a scoped guard: dropping it revokes the entry, so
//! repeated open/close cycles do not leak memory-backed handles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

const SCHEME: &str = "memblob://";

/// Registry of in-memory blobs addressable by `memblob://` URLs.
///
/// Cloning is cheap and clones share the same registry, so the store can be
/// handed to the dispatcher and to whichever component resolves URLs for
/// mounted viewers.
#[derive(Clone, Default)]
pub struct BlobStore {
    inner: Arc<Mutex<HashMap<Uuid, Blob>>>,
}

/// A stored blob: mime type plus content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// MIME type the blob was tagged with at creation.
    pub mime: String,
    /// Content bytes, shared between the store and resolvers.
    pub bytes: Arc<Vec<u8>>,
}

impl BlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize `bytes` under a fresh `memblob://` URL.
    ///
    /// The entry lives until the returned [`BlobUrl`] is dropped.
    pub fn create(&self, bytes: Vec<u8>, mime: &str) -> BlobUrl {
        let id = Uuid::now_v7();
        let blob = Blob {
            mime: mime.to_string(),
            bytes: Arc::new(bytes),
        };
        self.inner.lock().expect("blob store lock poisoned").insert(id, blob);
        debug!(%id, mime, "Materialized in-memory blob");

        BlobUrl {
            store: self.clone(),
            id,
            url: format!("{}{}", SCHEME, id),
            mime: mime.to_string(),
        }
    }

    /// Resolve a live `memblob://` URL to its blob.
    ///
    /// Returns `None` for foreign URLs and for revoked entries.
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        let id: Uuid = url.strip_prefix(SCHEME)?.parse().ok()?;
        self.inner.lock().expect("blob store lock poisoned").get(&id).cloned()
    }

    /// Number of live blobs.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("blob store lock poisoned").len()
    }

    /// Whether the store holds no live blobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn revoke(&self, id: Uuid) {
        if self.inner.lock().expect("blob store lock poisoned").remove(&id).is_some() {
            debug!(%id, "Revoked in-memory blob");
        }
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore").field("len", &self.len()).finish()
    }
}

/// Owning handle to a synthesized blob URL.
///
/// Ownership passes from the dispatcher into the route and on to whoever
/// mounts the viewer; dropping the handle (viewer close) revokes the URL.
/// Intentionally not `Clone` — exactly one owner releases the resource.
pub struct BlobUrl {
    store: BlobStore,
    id: Uuid,
    url: String,
    mime: String,
}

impl BlobUrl {
    /// The locally-resolvable `memblob://` URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// MIME type the blob was tagged with.
    pub fn mime(&self) -> &str {
        &self.mime
    }
}

impl Drop for BlobUrl {
    fn drop(&mut self) {
        self.store.revoke(self.id);
    }
}

impl std::fmt::Debug for BlobUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobUrl")
            .field("url", &self.url)
            .field("mime", &self.mime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let store = BlobStore::new();
        let handle = store.create(b"a,b\n1,2".to_vec(), "text/csv");

        assert!(handle.url().starts_with("memblob://"));
        assert_eq!(handle.mime(), "text/csv");

        let blob = store.resolve(handle.url()).expect("blob resolves while handle lives");
        assert_eq!(blob.mime, "text/csv");
        assert_eq!(*blob.bytes, b"a,b\n1,2".to_vec());
    }

    #[test]
    fn test_drop_revokes() {
        let store = BlobStore::new();
        let url = {
            let handle = store.create(b"hello".to_vec(), "text/plain");
            assert_eq!(store.len(), 1);
            handle.url().to_string()
        };

        assert!(store.is_empty());
        assert!(store.resolve(&url).is_none());
    }

    #[test]
    fn test_repeated_open_close_leaves_store_empty() {
        let store = BlobStore::new();
        for _ in 0..100 {
            let handle = store.create(b"note".to_vec(), "text/plain");
            assert!(store.resolve(handle.url()).is_some());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_foreign_urls_do_not_resolve() {
        let store = BlobStore::new();
        let _handle = store.create(b"x".to_vec(), "text/plain");

        assert!(store.resolve("https://files.example.com/doc.pdf").is_none());
        assert!(store.resolve("memblob://not-a-uuid").is_none());
        assert!(store.resolve("").is_none());
    }
}
