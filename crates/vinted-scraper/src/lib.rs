pub mod client;
pub mod error;
pub mod locator;
pub mod normalize;
pub mod pace;
pub mod retrieve;
pub mod types;

pub use client::{parse_item_url, ItemUrl, VintedClient};
pub use error::ScraperError;
pub use locator::locate_item_record;
pub use normalize::ItemDetails;
pub use pace::Pacer;
pub use retrieve::{retrieve, Asset, PageSource, Retrieval, RetrieveOptions};
