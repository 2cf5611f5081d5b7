//! Student record model types for Campus.
//!
//! This crate holds everything the HTTP layer and the business logic share:
//! the [`Student`] record and its exact-decimal [`Gpa`], the four
//! [`StudentOperation`]s, the error taxonomy ([`StudentError`]), and the
//! structured request/response shapes exchanged with the gateway.
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod gateway;
pub mod operations;
pub mod student;

pub use error::{StudentError, StudentErrorCode};
pub use gateway::{GatewayRequest, GatewayResponse};
pub use operations::StudentOperation;
pub use student::{Gpa, GpaError, Student, StudentFields};
