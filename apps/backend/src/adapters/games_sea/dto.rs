//! DTOs for games_sea adapter.

use uuid::Uuid;

/// A row to insert. The id comes from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCreate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl GameCreate {
    pub fn new(id: Uuid, user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of one owned game.
///
/// `description` is three-state: `None` = no change, `Some(Some(s))` = set,
/// `Some(None)` = clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameUpdate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl GameUpdate {
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self {
            id,
            user_id,
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// True when only `updated_at` would change.
    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
