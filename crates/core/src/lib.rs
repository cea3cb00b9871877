//! Functional core for the findings service.
//!
//! Pure data types and functions: the `Finding` record, create-request
//! validation, identifier and attachment-name generation, and the storage
//! abstraction implemented by the server crate. No I/O happens here.

pub mod finding;
pub mod serde;
pub mod storage;
