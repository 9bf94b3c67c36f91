//! Error types and error handling for the lexer.
//!
//! This module defines the errors a scan request can end with:
//!
//! - Error structures with source position information
//! - Specific variants for missing sources and illegal characters
//! - Error formatting and suggestion tips

pub mod errors;
