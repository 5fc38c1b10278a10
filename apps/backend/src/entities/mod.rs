pub mod games;
pub mod users;

pub use games::Entity as Games;
pub use games::Model as Game;
pub use users::Entity as Users;
pub use users::Model as User;
