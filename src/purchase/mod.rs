pub mod actions;
pub mod model;

pub use actions::PurchaseAction;
pub use model::{Purchase, PurchaseRequest, PurchaseStatus};
