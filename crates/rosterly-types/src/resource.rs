//! Staffing resource types: the persisted entity, the in-memory draft a
//! form edits, and the payload shape sent to the backend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::file::{AttachmentRef, PendingFile};
use crate::skill::{CategoryId, SkillId};

/// Maximum years of experience accepted on a profile.
pub const MAX_EXPERIENCE_YEARS: u8 = 50;

/// Maximum weekly availability in hours.
pub const MAX_HOURS_PER_WEEK: u8 = 168;

/// Inclusive hourly rate bounds.
pub const MIN_HOURLY_RATE: f64 = 1.0;
pub const MAX_HOURLY_RATE: f64 = 500.0;

/// Unique identifier for a resource, wrapping the server-assigned string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seniority bands for a resource profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Expert,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "junior"),
            ExperienceLevel::Mid => write!(f, "mid"),
            ExperienceLevel::Senior => write!(f, "senior"),
            ExperienceLevel::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(ExperienceLevel::Junior),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "expert" => Ok(ExperienceLevel::Expert),
            other => Err(format!("invalid experience level: '{other}'")),
        }
    }
}

impl Default for ExperienceLevel {
    fn default() -> Self {
        ExperienceLevel::Mid
    }
}

/// Engagement states for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Busy,
    Unavailable,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Busy => write!(f, "busy"),
            AvailabilityStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "busy" => Ok(AvailabilityStatus::Busy),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            other => Err(format!("invalid availability status: '{other}'")),
        }
    }
}

impl Default for AvailabilityStatus {
    fn default() -> Self {
        AvailabilityStatus::Available
    }
}

/// Experience summary on a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub years: u8,
    pub level: ExperienceLevel,
}

/// Work location on a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
    pub remote: bool,
}

/// Availability window on a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub status: AvailabilityStatus,
    pub hours_per_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Billing rate on a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub hourly: f64,
    pub currency: String,
}

impl Default for Rate {
    fn default() -> Self {
        Self {
            hourly: MIN_HOURLY_RATE,
            currency: "USD".to_string(),
        }
    }
}

/// A staffing resource as persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub name: String,
    pub category: CategoryId,
    pub skills: Vec<SkillId>,
    pub experience: Experience,
    pub location: Location,
    pub availability: Availability,
    pub rate: Rate,
    #[serde(default)]
    pub description: String,
    /// Pointer to the uploaded resume, if one is linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body sent to the backend when creating or updating a resource.
///
/// Produced from a validated draft via [`ResourceDraft::payload`]; the
/// attachment pointer is never part of this body -- it is written by a
/// separate patch once the file record exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePayload {
    pub name: String,
    pub category: CategoryId,
    pub skills: Vec<SkillId>,
    pub experience: Experience,
    pub location: Location,
    pub availability: Availability,
    pub rate: Rate,
    pub description: String,
}

/// In-memory form state for one resource being created or edited.
///
/// Created empty when a create modal opens, or populated from a fetched
/// [`Resource`] for editing. Discarded when the modal closes, regardless
/// of outcome.
#[derive(Debug, Clone)]
pub struct ResourceDraft {
    /// Client-side identity for logging; never sent to the backend.
    pub draft_id: Uuid,
    pub name: String,
    pub category: Option<CategoryId>,
    pub skills: Vec<SkillId>,
    pub experience: Experience,
    pub location: Location,
    pub availability: Availability,
    pub rate: Rate,
    pub description: String,
    /// Locally selected file awaiting upload, if any.
    pub pending_file: Option<PendingFile>,
    /// The attachment currently shown in the form. `None` on an edit draft
    /// whose original resource had one means the user removed it.
    pub existing_attachment: Option<AttachmentRef>,
}

impl ResourceDraft {
    /// An empty draft for the create flow.
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::now_v7(),
            name: String::new(),
            category: None,
            skills: Vec::new(),
            experience: Experience::default(),
            location: Location::default(),
            availability: Availability::default(),
            rate: Rate::default(),
            description: String::new(),
            pending_file: None,
            existing_attachment: None,
        }
    }

    /// A draft pre-populated from a fetched resource, for the edit flow.
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            draft_id: Uuid::now_v7(),
            name: resource.name.clone(),
            category: Some(resource.category.clone()),
            skills: resource.skills.clone(),
            experience: resource.experience.clone(),
            location: resource.location.clone(),
            availability: resource.availability.clone(),
            rate: resource.rate.clone(),
            description: resource.description.clone(),
            pending_file: None,
            existing_attachment: resource.attachment.clone(),
        }
    }

    /// Check the required-field and range invariants.
    ///
    /// Failing here is a local, synchronous rejection -- no network call
    /// is ever issued for an invalid draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        match &self.category {
            None => return Err(ValidationError::MissingCategory),
            Some(category) if category.as_str().trim().is_empty() => {
                return Err(ValidationError::MissingCategory);
            }
            Some(_) => {}
        }
        if self.skills.is_empty() {
            return Err(ValidationError::NoSkills);
        }
        if self.skills.iter().any(|s| s.as_str().trim().is_empty()) {
            return Err(ValidationError::EmptySkill);
        }
        if self.experience.years > MAX_EXPERIENCE_YEARS {
            return Err(ValidationError::YearsOutOfRange {
                actual: self.experience.years,
                max: MAX_EXPERIENCE_YEARS,
            });
        }
        if self.availability.hours_per_week > MAX_HOURS_PER_WEEK {
            return Err(ValidationError::HoursOutOfRange {
                actual: self.availability.hours_per_week,
                max: MAX_HOURS_PER_WEEK,
            });
        }
        if self.rate.hourly < MIN_HOURLY_RATE || self.rate.hourly > MAX_HOURLY_RATE {
            return Err(ValidationError::RateOutOfRange {
                actual: self.rate.hourly,
            });
        }
        Ok(())
    }

    /// Validate the draft and build the write payload.
    pub fn payload(&self) -> Result<ResourcePayload, ValidationError> {
        self.validate()?;
        let category = self
            .category
            .clone()
            .ok_or(ValidationError::MissingCategory)?;
        Ok(ResourcePayload {
            name: self.name.trim().to_string(),
            category,
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            location: self.location.clone(),
            availability: self.availability.clone(),
            rate: self.rate.clone(),
            description: self.description.clone(),
        })
    }
}

impl Default for ResourceDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal success of a resource submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Created(ResourceId),
    Updated(ResourceId),
}

impl SubmissionOutcome {
    pub fn resource_id(&self) -> &ResourceId {
        match self {
            SubmissionOutcome::Created(id) | SubmissionOutcome::Updated(id) => id,
        }
    }
}
