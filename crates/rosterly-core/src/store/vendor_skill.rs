//! Vendor-skill store trait definition.

use rosterly_types::error::StoreError;
use rosterly_types::page::Page;
use rosterly_types::skill::{ApprovalStatus, VendorSkill, VendorSkillId};

use super::ListQuery;

/// Store trait for vendor-submitted skills under review.
pub trait VendorSkillStore: Send + Sync {
    /// List vendor skills with pagination and optional status filtering.
    fn list_vendor_skills(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = Result<Page<VendorSkill>, StoreError>> + Send;

    /// Set the review status of a vendor skill. Returns the updated record.
    fn set_approval(
        &self,
        id: &VendorSkillId,
        status: ApprovalStatus,
    ) -> impl std::future::Future<Output = Result<VendorSkill, StoreError>> + Send;

    /// Permanently delete a vendor skill submission.
    fn delete_vendor_skill(
        &self,
        id: &VendorSkillId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
