use std::future::Future;
use std::sync::Arc;

use folio_animation::AnimationClip;
use folio_core::LoadError;
use rustc_hash::FxHashMap;

use crate::prefab::Prefab;

/// What a loader hands back for one model file.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub prefab: Arc<Prefab>,
    pub animations: Vec<Arc<AnimationClip>>,
}

impl LoadedAsset {
    #[must_use]
    pub fn new(prefab: Prefab, animations: Vec<AnimationClip>) -> Self {
        Self {
            prefab: Arc::new(prefab),
            animations: animations.into_iter().map(Arc::new).collect(),
        }
    }
}

/// External model source.
///
/// Implementations fetch and decode; the core never sees bytes. The returned
/// future is polled on the interaction thread, so it need not be `Send`.
pub trait Loader {
    fn load(&self, path: &str) -> impl Future<Output = Result<LoadedAsset, LoadError>>;
}

/// Loader serving pre-built assets from memory.
///
/// Paths that were never registered fail with [`LoadError::NotFound`];
/// registered failures are returned as-is.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    entries: FxHashMap<String, Result<LoadedAsset, LoadError>>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, asset: LoadedAsset) {
        self.entries.insert(path.into(), Ok(asset));
    }

    /// Makes `path` fail with `error`.
    pub fn insert_failure(&mut self, path: impl Into<String>, error: LoadError) {
        self.entries.insert(path.into(), Err(error));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Loader for MemoryLoader {
    async fn load(&self, path: &str) -> Result<LoadedAsset, LoadError> {
        self.entries
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(LoadError::NotFound(path.to_string())))
    }
}
