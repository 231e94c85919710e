pub mod category;
pub mod item;
pub mod state;

pub use category::{Category, Glyph};
pub use item::{ItemId, NewsItem};
pub use state::{FeedEvent, FeedState};
