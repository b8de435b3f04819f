use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const SCHEME_PREFIX: &str = "blob:result-viewer/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(u64);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME_PREFIX}{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct BlobStore {
    blobs: HashMap<u64, Arc<[u8]>>,
    next_id: u64,
}

impl BlobStore {
    pub fn create(&mut self, bytes: Vec<u8>) -> ObjectUrl {
        self.next_id += 1;
        let id = self.next_id;
        self.blobs.insert(id, Arc::from(bytes));
        ObjectUrl(id)
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<Arc<[u8]>> {
        self.blobs.get(&url.0).cloned()
    }

    pub fn revoke_all(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let released = self.len();
        self.blobs.clear();
        log::debug!("Revoked {released} object URL(s)");
        released
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
