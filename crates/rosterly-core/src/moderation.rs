//! Vendor-skill moderation.
//!
//! Approve, reject, and delete actions against the review queue, each
//! followed by the matching in-place cache mutation so the list view stays
//! consistent without a full reload. On store failure the cache is left
//! untouched.

use rosterly_types::error::StoreError;
use rosterly_types::skill::{ApprovalStatus, VendorSkill, VendorSkillId};

use crate::cache::{CacheAction, ListCache};
use crate::store::vendor_skill::VendorSkillStore;
use crate::store::ListQuery;

/// Service driving the vendor-skill review queue.
pub struct ModerationService<S: VendorSkillStore> {
    store: S,
}

impl<S: VendorSkillStore> ModerationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a page of the review queue and replace the cache with it.
    pub async fn load_page(
        &self,
        query: &ListQuery,
        cache: &mut ListCache<VendorSkill>,
    ) -> Result<(), StoreError> {
        let page = self.store.list_vendor_skills(query).await?;
        cache.replace_page(page);
        Ok(())
    }

    /// Approve a submission and splice the updated record into the cache.
    pub async fn approve(
        &self,
        id: &VendorSkillId,
        cache: &mut ListCache<VendorSkill>,
    ) -> Result<VendorSkill, StoreError> {
        self.set_status(id, ApprovalStatus::Approved, cache).await
    }

    /// Reject a submission and splice the updated record into the cache.
    pub async fn reject(
        &self,
        id: &VendorSkillId,
        cache: &mut ListCache<VendorSkill>,
    ) -> Result<VendorSkill, StoreError> {
        self.set_status(id, ApprovalStatus::Rejected, cache).await
    }

    async fn set_status(
        &self,
        id: &VendorSkillId,
        status: ApprovalStatus,
        cache: &mut ListCache<VendorSkill>,
    ) -> Result<VendorSkill, StoreError> {
        let updated = self.store.set_approval(id, status).await?;
        tracing::debug!(vendor_skill = %id, %status, "vendor skill reviewed");
        cache.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Delete a submission and drop it from the cache.
    ///
    /// Returns the cache's follow-up hint: when the deletion drains the
    /// current page, the caller should fetch the previous one.
    pub async fn remove(
        &self,
        id: &VendorSkillId,
        cache: &mut ListCache<VendorSkill>,
    ) -> Result<Option<CacheAction>, StoreError> {
        self.store.delete_vendor_skill(id).await?;
        tracing::debug!(vendor_skill = %id, "vendor skill deleted");
        Ok(cache.apply_removed(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use rosterly_types::page::{Page, PageMeta};

    #[derive(Clone, Default)]
    struct MockVendorSkillStore {
        fail: bool,
        deleted: Arc<Mutex<Vec<VendorSkillId>>>,
    }

    impl VendorSkillStore for MockVendorSkillStore {
        async fn list_vendor_skills(
            &self,
            query: &ListQuery,
        ) -> Result<Page<VendorSkill>, StoreError> {
            if self.fail {
                return Err(StoreError::Transport("unreachable".to_string()));
            }
            let items = vec![
                vendor_skill("a", ApprovalStatus::Pending),
                vendor_skill("b", ApprovalStatus::Pending),
            ];
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

        async fn set_approval(
            &self,
            id: &VendorSkillId,
            status: ApprovalStatus,
        ) -> Result<VendorSkill, StoreError> {
            if self.fail {
                return Err(StoreError::Rejected("review closed".to_string()));
            }
            Ok(vendor_skill(id.as_str(), status))
        }

        async fn delete_vendor_skill(&self, id: &VendorSkillId) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Transport("unreachable".to_string()));
            }
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }
    }

    fn vendor_skill(id: &str, status: ApprovalStatus) -> VendorSkill {
        VendorSkill {
            id: VendorSkillId::new(id),
            vendor_name: "Acme Staffing".to_string(),
            skill_name: format!("skill-{id}"),
            status,
            submitted_at: Utc::now(),
        }
    }

    fn loaded_cache() -> ListCache<VendorSkill> {
        let mut cache = ListCache::new();
        cache.replace_page(Page {
            items: vec![
                vendor_skill("a", ApprovalStatus::Pending),
                vendor_skill("b", ApprovalStatus::Pending),
            ],
            meta: PageMeta {
                page: 1,
                limit: 10,
                total: 2,
                total_pages: 1,
            },
        });
        cache
    }

    #[tokio::test]
    async fn test_load_page_replaces_cache() {
        let service = ModerationService::new(MockVendorSkillStore::default());
        let mut cache = ListCache::new();

        service
            .load_page(&ListQuery::default(), &mut cache)
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.meta().total, 2);
    }

    #[tokio::test]
    async fn test_approve_updates_cached_status() {
        let service = ModerationService::new(MockVendorSkillStore::default());
        let mut cache = loaded_cache();

        let updated = service
            .approve(&VendorSkillId::new("a"), &mut cache)
            .await
            .unwrap();
        assert_eq!(updated.status, ApprovalStatus::Approved);
        assert_eq!(cache.items()[0].status, ApprovalStatus::Approved);
        assert_eq!(cache.meta().total, 2, "approval must not change totals");
    }

    #[tokio::test]
    async fn test_reject_updates_cached_status() {
        let service = ModerationService::new(MockVendorSkillStore::default());
        let mut cache = loaded_cache();

        service
            .reject(&VendorSkillId::new("b"), &mut cache)
            .await
            .unwrap();
        assert_eq!(cache.items()[1].status, ApprovalStatus::Rejected);
    }

    #[tokio::test]
    async fn test_remove_deletes_and_decrements() {
        let store = MockVendorSkillStore::default();
        let service = ModerationService::new(store.clone());
        let mut cache = loaded_cache();

        let action = service
            .remove(&VendorSkillId::new("a"), &mut cache)
            .await
            .unwrap();
        assert!(action.is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
        assert_eq!(store.deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_draining_page_hints_previous() {
        let service = ModerationService::new(MockVendorSkillStore::default());
        let mut cache = ListCache::new();
        cache.replace_page(Page {
            items: vec![vendor_skill("only", ApprovalStatus::Pending)],
            meta: PageMeta {
                page: 2,
                limit: 10,
                total: 11,
                total_pages: 2,
            },
        });

        let action = service
            .remove(&VendorSkillId::new("only"), &mut cache)
            .await
            .unwrap();
        assert_eq!(action, Some(CacheAction::FetchPreviousPage));
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let service = ModerationService::new(MockVendorSkillStore {
            fail: true,
            ..MockVendorSkillStore::default()
        });
        let mut cache = loaded_cache();

        let err = service
            .approve(&VendorSkillId::new("a"), &mut cache)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(cache.items()[0].status, ApprovalStatus::Pending);

        let err = service
            .remove(&VendorSkillId::new("a"), &mut cache)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert_eq!(cache.len(), 2);
    }
}
