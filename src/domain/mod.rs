pub mod feed;
pub mod category;
pub mod catalog;
pub mod item;

pub use feed::Feed;
pub use category::Category;
pub use catalog::Catalog;
pub use item::{parse_items, FeedItem, Person};
