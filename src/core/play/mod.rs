pub mod google_play;
pub mod payload;
pub mod source;

pub use google_play::{GooglePlaySource, DEFAULT_BASE_URL};
pub use payload::{ReviewPage, MAX_COUNT_EACH_FETCH};
pub use source::{FetchRequest, ReviewSource};
