pub mod current_user;
pub mod game_ids;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use game_ids::GameIds;
pub use validated_json::ValidatedJson;
