//! Core components for talking to a Para server.
//!
//! This crate provides the foundational types and traits shared by the Para
//! signer and client crates.
//!
//! ## Overview
//!
//! - **Context**: holds the implementations for http sending, environment access
//!   and preference persistence. Everything with a side effect goes through it.
//! - **Traits**: [`SignRequest`] and [`SigningCredential`] describe a request signer
//!   and the credential it signs with.
//! - **SigningRequest**: the part of an outgoing request that is covered by a
//!   signature.
//!
//! ## Example
//!
//! ```
//! use para_core::{Context, MemoryPreferenceStore, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new()
//!     .with_env(StaticEnv {
//!         envs: HashMap::from([("PARA_ACCESS_KEY".to_string(), "app:para".to_string())]),
//!     })
//!     .with_preference_store(MemoryPreferenceStore::default());
//!
//! assert_eq!(ctx.env_var("PARA_ACCESS_KEY").as_deref(), Some("app:para"));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: hashing and encoding helpers
//! - [`time`]: time formatting helpers
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Context, Env, HttpSend, MemoryPreferenceStore, NoopEnv, NoopHttpSend, NoopPreferenceStore,
    OsEnv, PreferenceStore, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::SigningRequest;
