//! Client for the paginated `/artworks` REST endpoint
//!
//! The rest of the application only sees [`ArtworkSource`]; the HTTP
//! implementation lives in [`client`].

pub mod client;
pub mod errors;
pub mod pages;
pub mod source;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::HttpArtworkSource;
pub use errors::ApiResult;
pub use pages::page_stream;
pub use source::{ArtworkSource, ClientOptions};
pub use types::{Artwork, ArtworkId, ArtworkPage, COLUMN_HEADERS};
