//! Core building blocks for cellname.
//!
//! This crate holds the I/O-free logic that turns diagram labels into
//! identifiers:
//!
//! - [`slug`] normalizes free text into an identifier-safe token.
//! - [`identifier`] keeps track of identifiers already claimed in a document
//!   and hands out unique ones.

pub mod identifier;
pub mod slug;
