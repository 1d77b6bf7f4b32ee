pub mod model;
pub mod rounds;

pub use model::{Goods, HistoryNo};
