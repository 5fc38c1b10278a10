use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the editable games list.
///
/// The payload fields travel in request bodies unchanged, flags included; the
/// server ignores fields it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `None` leaves the description alone, `Some(None)` clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    /// Create this game.
    #[serde(default)]
    pub new: bool,
    /// Delete this game.
    #[serde(default)]
    pub drop: bool,
    /// Update this game.
    #[serde(default)]
    pub set: bool,
}

impl Game {
    /// A row with no payload and no intent.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            description: None,
            new: false,
            drop: false,
            set: false,
        }
    }

    /// A freshly added row with a generated id.
    pub fn created(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4()).named(name).creating()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn creating(mut self) -> Self {
        self.new = true;
        self
    }

    pub fn updating(mut self) -> Self {
        self.set = true;
        self
    }

    pub fn dropping(mut self) -> Self {
        self.drop = true;
        self
    }

    /// Goes into the POST batch.
    pub fn wants_create(&self) -> bool {
        self.new && !self.drop
    }

    /// Goes into the PUT batch, whatever the other flags say.
    pub fn wants_update(&self) -> bool {
        self.set
    }

    /// Goes into the DELETE batch. A row added and dropped before submitting
    /// never existed on the server, so it is not deleted either.
    pub fn wants_remove(&self) -> bool {
        self.drop && !self.new
    }
}
