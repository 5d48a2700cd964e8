//! Storage abstractions for the service layer
//!
//! Contains the file-backed map used by the timer store. The whole map is
//! rewritten on every mutation; there is no journal.

pub mod json_map_store;
