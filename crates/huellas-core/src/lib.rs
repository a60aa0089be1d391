//! Core types and client-side logic for the huellas pet-adoption client.
//!
//! This crate is deliberately free of HTTP and terminal dependencies. The
//! backend is reached through the [`backend::AdoptionBackend`] trait; the
//! terminal client (`huellas-cli`) supplies the HTTP implementation.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod adoption;
pub mod backend;
pub mod cache;
pub mod card;
pub mod error;
pub mod filter;
pub mod form;
pub mod memory;
pub mod mutation;
pub mod notify;
pub mod pet;
pub mod user;
pub mod validate;
pub mod wire;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
