//! Student business logic for Campus.
//!
//! The provider implements the four record operations on top of a
//! [`store::StudentStore`]; the handler bridges them to the HTTP layer.
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handler;
pub mod provider;
pub mod store;
pub mod validation;
