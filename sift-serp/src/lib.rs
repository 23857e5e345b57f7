//! Search results page extraction.
//!
//! - [`extract`]: turns a saved results page into [`SearchResult`] records
//! - [`time`]: guesses publication times from result text
//! - [`domain`]: host lookup for result URLs
//! - [`search_url`]: builds query URLs with freshness/site/market filters
//! - [`click`]: pulls the destination out of click-tracking pages
//! - [`filter`]: keyword and domain filtering of extracted records
//!
//! Nothing here touches the network, the filesystem or the clock. Callers
//! capture "now" once and pass it to every extraction.

pub mod click;
pub mod domain;
pub mod error;
pub mod extract;
pub mod filter;
pub mod search_url;
pub mod time;
pub mod types;

pub use click::ClickTargetExtractor;
pub use error::{Result, SerpError};
pub use extract::{ResultExtractor, ResultShape, SelectorSet};
pub use search_url::{Freshness, SearchOptions, build_search_url};
pub use types::SearchResult;
