//! Partitioning a games list into the three outbound batches.

use uuid::Uuid;

use crate::game::Game;

/// The create / update / remove batches for one submit.
///
/// Groups keep input order. A row can sit in `create` and `update`, or in
/// `update` and `remove`, and is then sent in both requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitPlan<'a> {
    create: Vec<&'a Game>,
    update: Vec<&'a Game>,
    remove: Vec<Uuid>,
}

impl<'a> SubmitPlan<'a> {
    pub fn from_games(games: &'a [Game]) -> Self {
        let mut plan = Self::default();
        for game in games {
            if game.wants_create() {
                plan.create.push(game);
            }
            if game.wants_update() {
                plan.update.push(game);
            }
            if game.wants_remove() {
                plan.remove.push(game.id);
            }
        }
        plan
    }

    /// Body of the POST request.
    pub fn create(&self) -> &[&'a Game] {
        &self.create
    }

    /// Body of the PUT request.
    pub fn update(&self) -> &[&'a Game] {
        &self.update
    }

    /// Ids for the DELETE query string.
    pub fn remove(&self) -> &[Uuid] {
        &self.remove
    }

    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.remove.is_empty()
    }

    /// How many requests a submit will issue (0 to 3).
    pub fn request_count(&self) -> usize {
        [
            !self.create.is_empty(),
            !self.update.is_empty(),
            !self.remove.is_empty(),
        ]
        .into_iter()
        .filter(|&non_empty| non_empty)
        .count()
    }
}
