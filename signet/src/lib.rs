//! Cryptographic core of the Signet offline document-signing system.
//!
//! A 4096-bit RSA signing key is generated once at enrollment. Its public
//! half is exported in the clear; its private half only ever leaves process
//! memory wrapped under a key derived from a short numeric PIN, stored on a
//! removable medium. Possession of the medium and knowledge of the PIN are
//! together required to sign; verification needs only the exported public
//! key.
//!
//! This crate contains no interactive surface. Front-ends (such as the
//! `signet-cli` binary) call the operations in [`api`] and render their
//! results.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod document;
pub mod error;
pub mod medium;
pub mod storage;

pub use error::SignetError;
