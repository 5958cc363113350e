//! Functional core for userbase.
//!
//! Pure types and functions shared by the service and the tooling: the user
//! record, email validation, the partial-update expression builder, the
//! store-item codec and the key-value store capability trait. Nothing in
//! this crate performs I/O.

pub mod storage;
pub mod users;
