//! Resource directory: the paginated list view over resource records.
//!
//! Page fetches replace the cache wholesale; deletes mutate it in place.
//! Create and update mutations arrive through the submission orchestrator
//! instead -- this service only owns the read side and the delete action.

use rosterly_types::error::StoreError;
use rosterly_types::resource::{Resource, ResourceId};

use crate::cache::{CacheAction, ListCache};
use crate::store::resource::ResourceStore;
use crate::store::ListQuery;

/// Service driving the resource list view.
pub struct ResourceDirectory<S: ResourceStore> {
    store: S,
}

impl<S: ResourceStore> ResourceDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a page of resources and replace the cache with it.
    pub async fn load_page(
        &self,
        query: &ListQuery,
        cache: &mut ListCache<Resource>,
    ) -> Result<(), StoreError> {
        let page = self.store.list_resources(query).await?;
        cache.replace_page(page);
        Ok(())
    }

    /// Fetch a single resource, e.g. to seed an edit draft.
    pub async fn get(&self, id: &ResourceId) -> Result<Resource, StoreError> {
        self.store.get_resource(id).await
    }

    /// Delete a resource and drop it from the cache.
    ///
    /// Returns the cache's follow-up hint: when the deletion drains the
    /// current page, the caller should fetch the previous one.
    pub async fn remove(
        &self,
        id: &ResourceId,
        cache: &mut ListCache<Resource>,
    ) -> Result<Option<CacheAction>, StoreError> {
        self.store.delete_resource(id).await?;
        tracing::debug!(resource = %id, "resource deleted");
        Ok(cache.apply_removed(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use rosterly_types::error::StoreError;
    use rosterly_types::file::{FileOwner, FileRecord, PendingFile, UploadMeta};
    use rosterly_types::page::{Page, PageMeta};
    use rosterly_types::resource::{
        Availability, Experience, Location, Rate, ResourcePayload,
    };
    use rosterly_types::skill::{CategoryId, SkillId};

    use crate::store::resource::AttachmentUpdate;

    #[derive(Clone, Default)]
    struct MockDirectoryStore {
        fail: bool,
        deleted: Arc<Mutex<Vec<ResourceId>>>,
    }

    fn sample_resource(id: &str) -> Resource {
        let now = Utc::now();
        Resource {
            id: ResourceId::new(id),
            name: format!("resource-{id}"),
            category: CategoryId::new("c1"),
            skills: vec![SkillId::new("s1")],
            experience: Experience::default(),
            location: Location::default(),
            availability: Availability::default(),
            rate: Rate::default(),
            description: String::new(),
            attachment: None,
            created_at: now,
            updated_at: now,
        }
    }

    impl ResourceStore for MockDirectoryStore {
        async fn create_resource(
            &self,
            _payload: &ResourcePayload,
        ) -> Result<Resource, StoreError> {
            unimplemented!("directory never creates")
        }

        async fn update_resource(
            &self,
            _id: &ResourceId,
            _payload: &ResourcePayload,
        ) -> Result<Resource, StoreError> {
            unimplemented!("directory never updates")
        }

        async fn patch_attachment(
            &self,
            _id: &ResourceId,
            _update: AttachmentUpdate,
        ) -> Result<Resource, StoreError> {
            unimplemented!("directory never patches")
        }

        async fn upload_file(
            &self,
            _file: &PendingFile,
            _owner: FileOwner,
            _meta: &UploadMeta,
        ) -> Result<FileRecord, StoreError> {
            unimplemented!("directory never uploads")
        }

        async fn get_resource(&self, id: &ResourceId) -> Result<Resource, StoreError> {
            if self.fail {
                return Err(StoreError::Rejected("no such resource".to_string()));
            }
            Ok(sample_resource(id.as_str()))
        }

        async fn list_resources(&self, query: &ListQuery) -> Result<Page<Resource>, StoreError> {
            if self.fail {
                return Err(StoreError::Transport("unreachable".to_string()));
            }
            let items = vec![sample_resource("r1"), sample_resource("r2")];
            let total = items.len() as u64;
            let mut meta = PageMeta {
                page: query.page,
                limit: query.limit,
                total,
                total_pages: 0,
            };
            meta.recompute_pages();
            Ok(Page { items, meta })
        }

        async fn delete_resource(&self, id: &ResourceId) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Transport("unreachable".to_string()));
            }
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_page_replaces_cache() {
        let directory = ResourceDirectory::new(MockDirectoryStore::default());
        let mut cache = ListCache::new();

        directory
            .load_page(&ListQuery::default(), &mut cache)
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.meta().total, 2);
    }

    #[tokio::test]
    async fn test_get_fetches_by_id() {
        let directory = ResourceDirectory::new(MockDirectoryStore::default());
        let resource = directory.get(&ResourceId::new("r7")).await.unwrap();
        assert_eq!(resource.id, ResourceId::new("r7"));
    }

    #[tokio::test]
    async fn test_remove_deletes_and_shrinks_cache() {
        let store = MockDirectoryStore::default();
        let directory = ResourceDirectory::new(store.clone());
        let mut cache = ListCache::new();
        directory
            .load_page(&ListQuery::default(), &mut cache)
            .await
            .unwrap();

        let action = directory
            .remove(&ResourceId::new("r1"), &mut cache)
            .await
            .unwrap();
        assert!(action.is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
        assert_eq!(store.deleted.lock().unwrap().as_slice(), &[ResourceId::new("r1")]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache() {
        let directory = ResourceDirectory::new(MockDirectoryStore {
            fail: true,
            ..MockDirectoryStore::default()
        });
        let mut cache = ListCache::new();
        cache.replace_page(Page {
            items: vec![sample_resource("r1")],
            meta: PageMeta {
                page: 1,
                limit: 10,
                total: 1,
                total_pages: 1,
            },
        });

        let err = directory
            .remove(&ResourceId::new("r1"), &mut cache)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert_eq!(cache.len(), 1);
    }
}
