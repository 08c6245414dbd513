//! Tunegrep - keyword-filtered lookups against the iTunes catalog
//!
//! This library wraps the iTunes Search API behind a single reusable
//! lookup component: search by free-text term or numeric id, then filter
//! the returned tracks by keyword over artist and track names.

/// Client modules for the remote catalog service
pub mod clients;
/// The catalog lookup component built on the clients
pub mod lookup;
