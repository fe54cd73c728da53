//! Recipient parsing and validation.
//!
//! Each sub-module owns one recipient shape and reports its own error type;
//! the back-end's validator library maps those errors onto field errors.

pub mod email_address;
pub mod insensitive;
pub mod phone_number;
pub mod postal_address;
