use common::CategoryId;
use serde::{Deserialize, Serialize};

/// Product category.
///
/// Categories are referenced by products through their id; a category keeps
/// no collection of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    code: i32,
}

impl Category {
    /// Creates a category with a freshly generated id.
    pub fn new(name: impl Into<String>, code: i32) -> Self {
        Self::with_id(name, code, CategoryId::new())
    }

    /// Creates a category with a known id.
    pub fn with_id(name: impl Into<String>, code: i32, id: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            code,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Business code used by external callers for lookups.
    pub fn code(&self) -> i32 {
        self.code
    }
}
