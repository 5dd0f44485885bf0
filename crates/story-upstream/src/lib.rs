//! # story-upstream
//!
//! Paginated content API client for the stories gallery.
//!
//! - [`Fetcher`] walks a collection page by page and returns a
//!   [`story_core::DatasetSnapshot`]
//! - [`PageSource`] is the transport seam; [`DirectusSource`] implements it
//!   over reqwest for `GET /items/{collection}`
//! - [`asset_url`] resolves image references to display URLs

pub mod assets;
pub mod fetcher;
pub mod page;
pub mod source;

mod error;
mod http;

pub use assets::asset_url;
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use page::{Page, PageMeta};
pub use source::{DirectusSource, PageRequest, PageSource};
