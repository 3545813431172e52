//! Domain rules for the community resource catalogue.
//!
//! Everything in this crate is storage-agnostic: status enums and their
//! transition guards, typed patches, filter predicates, input validators and
//! CSV formatting. The `hearth-db` crate renders these into SQL and the
//! `hearth-api` crate maps them onto HTTP.

pub mod error;
pub mod export;
pub mod filter;
pub mod patch;
pub mod provider;
pub mod resource;
pub mod signal;
pub mod types;
pub mod update_request;
pub mod validation;
pub mod verification;
pub mod vocabulary;
