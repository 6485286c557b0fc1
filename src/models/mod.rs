pub mod collection;
pub mod search;

pub use collection::Collection;
pub use search::{Hit, ResultPage};
