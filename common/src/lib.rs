//! Shared model and parsing code for the NotifyNL admin back-end.
//!
//! - `model`: templates, services and the per-flow `Draft`.
//! - `recipients`: phone numbers, email addresses and Dutch postal addresses.
//! - `formatters`: Dutch list and sentence formatting used in error messages.
//! - `sms`: the SMS (GSM-7) character set.

pub mod formatters;
pub mod model;
pub mod recipients;
pub mod sms;
