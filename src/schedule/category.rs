use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;

/// Bucket name assigned to occurrences whose category reference does not
/// resolve against the known set.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categorises rules and recorded transactions for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
            icon: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Flat lookup set of uniquely-named categories. No hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category, rejecting names already present (case-insensitive).
    pub fn insert(&mut self, category: Category) -> Result<Uuid, ScheduleError> {
        if self
            .categories
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&category.name))
        {
            return Err(ScheduleError::DuplicateCategory(category.name));
        }
        let id = category.id;
        self.categories.push(category);
        Ok(id)
    }

    pub fn by_id(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }

    /// Reporting bucket for a category reference, falling back to
    /// [`UNCATEGORIZED`] when the reference is absent or unknown.
    pub fn bucket_name(&self, id: Option<Uuid>) -> String {
        id.and_then(|id| self.by_id(id))
            .map(|category| category.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
