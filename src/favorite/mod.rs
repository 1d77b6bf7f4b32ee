pub mod actions;
pub mod model;

pub use actions::{FavoriteList, FavoriteToggle};
pub use model::Favorite;
