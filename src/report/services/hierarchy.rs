//! Cached resolution of list, folder and space names.

use lru::LruCache;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tracing::debug;

use crate::report::{
    domain::{FolderId, HierarchyNames, ListId, RawTask, SpaceId},
    ports::{TaskSource, TaskSourceResult},
};

/// Resolves container names, caching each level by identifier.
///
/// Repeats are served from the cache whether or not they are adjacent.
/// Lookup failures are never cached.
#[derive(Debug)]
pub struct HierarchyResolver {
    lists: LruCache<ListId, String>,
    folders: LruCache<FolderId, String>,
    spaces: LruCache<SpaceId, String>,
}

impl HierarchyResolver {
    /// Creates a resolver keeping up to `per_level` names per level; zero is
    /// treated as one.
    #[must_use]
    pub fn new(per_level: usize) -> Self {
        let capacity = NonZeroUsize::new(per_level).unwrap_or(NonZeroUsize::MIN);
        Self {
            lists: LruCache::new(capacity),
            folders: LruCache::new(capacity),
            spaces: LruCache::new(capacity),
        }
    }

    /// Resolves the list, folder and space names of `task`.
    ///
    /// # Errors
    ///
    /// Returns the source's lookup error for any unknown identifier.
    pub async fn resolve<S>(
        &mut self,
        source: &S,
        task: &RawTask,
    ) -> TaskSourceResult<HierarchyNames>
    where
        S: TaskSource + ?Sized,
    {
        let list = cached(&mut self.lists, "list", &task.list.id, || {
            source.resolve_list_name(&task.list.id)
        })
        .await?;
        let folder = cached(&mut self.folders, "folder", &task.folder.id, || {
            source.resolve_folder_name(&task.folder.id)
        })
        .await?;
        let space = cached(&mut self.spaces, "space", &task.space.id, || {
            source.resolve_space_name(&task.space.id)
        })
        .await?;
        Ok(HierarchyNames {
            list,
            folder,
            space,
        })
    }

    /// Number of cached names per level as `(lists, folders, spaces)`.
    #[must_use]
    pub fn cached_counts(&self) -> (usize, usize, usize) {
        (self.lists.len(), self.folders.len(), self.spaces.len())
    }
}

async fn cached<K, F, Fut>(
    cache: &mut LruCache<K, String>,
    level: &'static str,
    id: &K,
    lookup: F,
) -> TaskSourceResult<String>
where
    K: Hash + Eq + Clone + Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = TaskSourceResult<String>>,
{
    if let Some(name) = cache.get(id) {
        debug!(level, %id, "hierarchy cache hit");
        return Ok(name.clone());
    }
    debug!(level, %id, "hierarchy cache miss");
    let name = lookup().await?;
    cache.put(id.clone(), name.clone());
    Ok(name)
}
