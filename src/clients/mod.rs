/// Data entities for catalog records and keyword filters
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// iTunes Search API client
pub mod itunes;

pub use itunes::ItunesClient;
