//! Client-held mirrors of paginated remote collections.

pub mod list;

pub use list::{CacheAction, HasStatus, Identifiable, InsertPolicy, ListCache};
