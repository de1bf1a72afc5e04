//! Join barrier for edit-draft population.
//!
//! An edit modal needs three asynchronous inputs before its form can be
//! filled: the skills list, the categories list, and the resource being
//! edited. They complete in no particular order. `DraftPrefill` records
//! each arrival and populates the draft exactly once, when all three are
//! present -- the "populate exactly once" invariant is carried by a single
//! flag instead of ad-hoc re-checks in every completion handler.

use rosterly_types::resource::{Resource, ResourceDraft};
use rosterly_types::skill::{Category, Skill};

/// Barrier that builds an edit draft once both reference lists and the
/// resource to edit have arrived.
#[derive(Debug, Default)]
pub struct DraftPrefill {
    skills: Option<Vec<Skill>>,
    categories: Option<Vec<Category>>,
    pending: Option<Resource>,
    populated: bool,
}

impl DraftPrefill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both reference lists have completed their initial fetch.
    pub fn is_ready(&self) -> bool {
        self.skills.is_some() && self.categories.is_some()
    }

    /// Whether population has already happened for this prefill.
    pub fn has_populated(&self) -> bool {
        self.populated
    }

    pub fn skills(&self) -> Option<&[Skill]> {
        self.skills.as_deref()
    }

    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref()
    }

    /// Record the skills fetch completing.
    pub fn skills_loaded(&mut self, skills: Vec<Skill>) -> Option<ResourceDraft> {
        self.skills = Some(skills);
        self.try_populate()
    }

    /// Record the categories fetch completing.
    pub fn categories_loaded(&mut self, categories: Vec<Category>) -> Option<ResourceDraft> {
        self.categories = Some(categories);
        self.try_populate()
    }

    /// Record the user opening an edit modal for `resource`.
    ///
    /// If the reference lists are still loading, population is deferred
    /// until they complete.
    pub fn edit_requested(&mut self, resource: Resource) -> Option<ResourceDraft> {
        self.pending = Some(resource);
        self.try_populate()
    }

    /// The single population point: runs when all inputs are present and
    /// only ever once per prefill instance.
    fn try_populate(&mut self) -> Option<ResourceDraft> {
        if self.populated || !self.is_ready() {
            return None;
        }
        let resource = self.pending.take()?;
        self.populated = true;
        tracing::debug!(resource = %resource.id, "edit draft populated");
        Some(ResourceDraft::from_resource(&resource))
    }
}
