pub mod controller;
pub mod view;

pub use controller::{ActiveSource, ListingController, SourceKind};
pub use view::{parse_date_bound, FilterCriteria, SortDirection, SortKey, SortState, ViewPage};
