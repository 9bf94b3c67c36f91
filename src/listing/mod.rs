//! Reading source files and writing token listings.

pub mod listing;
