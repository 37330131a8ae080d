//! School class model.

use serde::{Deserialize, Serialize};

use super::ClassId;

/// A class (group of students) that attends lessons together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Arena identifier (assigned by the registry).
    pub id: ClassId,
    /// Display name (e.g. "5-A").
    pub name: String,
}

impl SchoolClass {
    /// Creates a class with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClassId(0),
            name: name.into(),
        }
    }
}
