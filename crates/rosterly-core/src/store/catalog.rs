//! Catalog store trait definition.

use rosterly_types::error::StoreError;
use rosterly_types::skill::{Category, Skill};

/// Store trait for the skill and category reference lists.
///
/// Both lists are small and unpaginated; the console fetches them once per
/// view to populate selection widgets and to gate edit-draft population.
pub trait CatalogStore: Send + Sync {
    fn list_skills(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, StoreError>> + Send;

    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Category>, StoreError>> + Send;
}
