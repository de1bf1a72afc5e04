//! Paginated list cache kept consistent through explicit mutation methods.
//!
//! `ListCache` holds the last fetched page of a remote collection plus its
//! pagination metadata. After a local mutation succeeds against the backend
//! (a submission completing, an approval, a delete), the cache is updated
//! in place instead of refetching the whole page. The mutation methods are
//! the only write path; views render from `items()` and never hold a
//! second mutable copy that could drift.

use std::fmt;

use rosterly_types::page::{Page, PageMeta};
use rosterly_types::resource::{Resource, ResourceId};
use rosterly_types::skill::{
    ApprovalStatus, Category, CategoryId, Skill, SkillId, VendorSkill, VendorSkillId,
};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Entities that can live in a [`ListCache`], keyed by their id.
pub trait Identifiable {
    type Id: PartialEq + Clone + fmt::Debug;

    fn id(&self) -> &Self::Id;
}

impl Identifiable for Resource {
    type Id = ResourceId;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Identifiable for Skill {
    type Id = SkillId;

    fn id(&self) -> &SkillId {
        &self.id
    }
}

impl Identifiable for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

impl Identifiable for VendorSkill {
    type Id = VendorSkillId;

    fn id(&self) -> &VendorSkillId {
        &self.id
    }
}

/// Entities carrying a review status, for the status projection.
pub trait HasStatus {
    fn status(&self) -> ApprovalStatus;
}

impl HasStatus for VendorSkill {
    fn status(&self) -> ApprovalStatus {
        self.status
    }
}

// ---------------------------------------------------------------------------
// Policy and mutation hints
// ---------------------------------------------------------------------------

/// How the cache absorbs a newly created item.
///
/// `Prepend` splices the item onto the front of the current page; the page
/// may then hold one more item than `limit` until the next fetch, which is
/// visible and deliberate rather than a silent truncation. `Refetch` leaves
/// the page untouched and asks the caller to reload it, for views that need
/// strict page-size adherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPolicy {
    #[default]
    Prepend,
    Refetch,
}

/// Follow-up fetch the caller should consider after a mutation.
///
/// Always a hint: the cache never issues network calls itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    RefetchCurrentPage,
    FetchPreviousPage,
}

// ---------------------------------------------------------------------------
// ListCache
// ---------------------------------------------------------------------------

/// The client-held page of a remote collection plus pagination state.
#[derive(Debug)]
pub struct ListCache<T: Identifiable> {
    items: Vec<T>,
    meta: PageMeta,
    insert_policy: InsertPolicy,
}

impl<T: Identifiable> ListCache<T> {
    /// An empty cache with the default prepend insert policy.
    pub fn new() -> Self {
        Self::with_policy(InsertPolicy::default())
    }

    pub fn with_policy(insert_policy: InsertPolicy) -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
            insert_policy,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Wholesale replacement after a fresh fetch -- initial load and
    /// explicit page navigation.
    pub fn replace_page(&mut self, page: Page<T>) {
        self.items = page.items;
        self.meta = page.meta;
        tracing::debug!(
            page = self.meta.page,
            items = self.items.len(),
            total = self.meta.total,
            "list cache page replaced"
        );
    }

    /// Absorb a newly created item.
    ///
    /// Under [`InsertPolicy::Prepend`] the item lands at the front of the
    /// page and the totals grow by one. If the id is somehow already
    /// cached, the existing element is replaced instead, preserving id
    /// uniqueness. Under [`InsertPolicy::Refetch`] the cache is untouched
    /// and [`CacheAction::RefetchCurrentPage`] is returned.
    pub fn apply_created(&mut self, item: T) -> Option<CacheAction> {
        match self.insert_policy {
            InsertPolicy::Refetch => Some(CacheAction::RefetchCurrentPage),
            InsertPolicy::Prepend => {
                if let Some(existing) =
                    self.items.iter_mut().find(|e| e.id() == item.id())
                {
                    *existing = item;
                    return None;
                }
                tracing::debug!(id = ?item.id(), "list cache item created");
                self.items.insert(0, item);
                self.meta.total += 1;
                self.meta.recompute_pages();
                None
            }
        }
    }

    /// Replace the cached element with a matching id.
    ///
    /// A no-op (not an error) when the id is absent from the current page;
    /// the entity may live on another page. Returns whether a replacement
    /// happened.
    pub fn apply_updated(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|e| e.id() == item.id()) {
            Some(existing) => {
                tracing::debug!(id = ?item.id(), "list cache item updated");
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Remove the cached element with a matching id.
    ///
    /// Removes at most one element; a second call with the same id is a
    /// no-op. When the page drains empty and a previous page exists, the
    /// caller gets [`CacheAction::FetchPreviousPage`] -- a policy hint,
    /// never an automatic fetch.
    pub fn apply_removed(&mut self, id: &T::Id) -> Option<CacheAction> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        self.items.remove(index);
        self.meta.total = self.meta.total.saturating_sub(1);
        self.meta.recompute_pages();
        tracing::debug!(id = ?id, remaining = self.items.len(), "list cache item removed");

        if self.items.is_empty() && self.meta.has_previous_page() {
            Some(CacheAction::FetchPreviousPage)
        } else {
            None
        }
    }

    /// Pure projection over the current page. Never mutates the cache.
    pub fn filtered_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }
}

impl<T: Identifiable + HasStatus> ListCache<T> {
    /// Projection of the current page onto one review status.
    pub fn filtered_by_status(&self, status: ApprovalStatus) -> Vec<&T> {
        self.filtered_by(|item| item.status() == status)
    }
}

impl<T: Identifiable> Default for ListCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vendor_skill(id: &str, status: ApprovalStatus) -> VendorSkill {
        VendorSkill {
            id: VendorSkillId::new(id),
            vendor_name: "Acme Staffing".to_string(),
            skill_name: format!("skill-{id}"),
            status,
            submitted_at: Utc::now(),
        }
    }

    fn page(items: Vec<VendorSkill>, page_no: u32, limit: u32, total: u64) -> Page<VendorSkill> {
        let mut meta = PageMeta {
            page: page_no,
            limit,
            total,
            total_pages: 0,
        };
        meta.recompute_pages();
        Page { items, meta }
    }

    #[test]
    fn test_replace_page_takes_items_and_meta() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
        assert_eq!(cache.meta().total_pages, 1);
    }

    #[test]
    fn test_apply_created_prepends_and_bumps_total() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));

        let action = cache.apply_created(vendor_skill("b", ApprovalStatus::Pending));
        assert!(action.is_none());
        assert_eq!(cache.items()[0].id, VendorSkillId::new("b"));
        assert_eq!(cache.meta().total, 2);
    }

    #[test]
    fn test_apply_created_duplicate_id_replaces_in_place() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));

        cache.apply_created(vendor_skill("a", ApprovalStatus::Approved));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1, "duplicate must not inflate total");
        assert_eq!(cache.items()[0].status, ApprovalStatus::Approved);
    }

    #[test]
    fn test_apply_created_refetch_policy_leaves_cache_untouched() {
        let mut cache = ListCache::with_policy(InsertPolicy::Refetch);
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));

        let action = cache.apply_created(vendor_skill("b", ApprovalStatus::Pending));
        assert_eq!(action, Some(CacheAction::RefetchCurrentPage));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
    }

    #[test]
    fn test_apply_created_recomputes_total_pages() {
        let mut cache = ListCache::new();
        // Page exactly full: 10 of 10.
        let items: Vec<_> = (0..10)
            .map(|i| vendor_skill(&format!("s{i}"), ApprovalStatus::Pending))
            .collect();
        cache.replace_page(page(items, 1, 10, 10));
        assert_eq!(cache.meta().total_pages, 1);
        assert!(!cache.meta().has_next_page());

        cache.apply_created(vendor_skill("new", ApprovalStatus::Pending));
        assert_eq!(cache.meta().total, 11);
        assert_eq!(cache.meta().total_pages, 2);
        assert!(cache.meta().has_next_page());
    }

    #[test]
    fn test_apply_updated_replaces_matching_id() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![
                vendor_skill("a", ApprovalStatus::Pending),
                vendor_skill("b", ApprovalStatus::Pending),
            ],
            1,
            10,
            2,
        ));

        let replaced = cache.apply_updated(vendor_skill("b", ApprovalStatus::Approved));
        assert!(replaced);
        assert_eq!(cache.items()[1].status, ApprovalStatus::Approved);
        assert_eq!(cache.meta().total, 2);
    }

    #[test]
    fn test_apply_updated_absent_id_is_noop() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));

        let replaced = cache.apply_updated(vendor_skill("zz", ApprovalStatus::Approved));
        assert!(!replaced);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
        assert_eq!(cache.items()[0].id, VendorSkillId::new("a"));
    }

    #[test]
    fn test_apply_removed_decrements_once() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![
                vendor_skill("a", ApprovalStatus::Pending),
                vendor_skill("b", ApprovalStatus::Pending),
            ],
            1,
            10,
            2,
        ));

        let action = cache.apply_removed(&VendorSkillId::new("a"));
        assert!(action.is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);

        // Second removal with the same id: no-op.
        let action = cache.apply_removed(&VendorSkillId::new("a"));
        assert!(action.is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meta().total, 1);
    }

    #[test]
    fn test_apply_removed_drained_page_hints_previous() {
        let mut cache = ListCache::new();
        // Page 2 of 2, one item left on it.
        cache.replace_page(page(
            vec![vendor_skill("last", ApprovalStatus::Pending)],
            2,
            10,
            11,
        ));

        let action = cache.apply_removed(&VendorSkillId::new("last"));
        assert_eq!(action, Some(CacheAction::FetchPreviousPage));
        assert!(cache.is_empty());
        assert_eq!(cache.meta().total, 10);
        assert_eq!(cache.meta().total_pages, 1);
    }

    #[test]
    fn test_apply_removed_drained_first_page_no_hint() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("only", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));

        let action = cache.apply_removed(&VendorSkillId::new("only"));
        assert!(action.is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.meta().total, 0);
    }

    #[test]
    fn test_filtered_by_status_is_pure() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![
                vendor_skill("a", ApprovalStatus::Pending),
                vendor_skill("b", ApprovalStatus::Approved),
                vendor_skill("c", ApprovalStatus::Pending),
            ],
            1,
            10,
            3,
        ));

        let pending = cache.filtered_by_status(ApprovalStatus::Pending);
        assert_eq!(pending.len(), 2);
        assert_eq!(cache.len(), 3, "projection must not mutate the cache");

        let rejected = cache.filtered_by_status(ApprovalStatus::Rejected);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_contains() {
        let mut cache = ListCache::new();
        cache.replace_page(page(
            vec![vendor_skill("a", ApprovalStatus::Pending)],
            1,
            10,
            1,
        ));
        assert!(cache.contains(&VendorSkillId::new("a")));
        assert!(!cache.contains(&VendorSkillId::new("b")));
    }
}
