//! # API Module
//!
//! Business logic of the application, independent from the web layer.
//!
//! ## Modules
//!
//! - [`payment`] - Card validation, tokenization and audit of payments

pub mod payment;
