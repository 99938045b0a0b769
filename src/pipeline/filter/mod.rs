pub mod denylist;
pub mod density;
pub mod prefilter;
pub mod types;

pub use denylist::*;
pub use density::*;
pub use prefilter::*;
pub use types::*;
