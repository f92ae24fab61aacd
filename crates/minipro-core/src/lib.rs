//! minipro-core - Device database library for minipro-query-db
//!
//! This crate holds the compiled-in catalog of chips supported by the
//! programmer, the decoders for its bit-packed fields, a small predicate
//! based query engine, and the text and JSON renderers.
//!
//! # Example
//!
//! ```ignore
//! use minipro_core::device::Catalog;
//! use minipro_core::query::{query, Predicate};
//! use minipro_core::render;
//!
//! let catalog = Catalog::builtin();
//! let matches = query(&catalog, Predicate::NameContains, "24C0");
//! print!("{}", render::text::render_devices(&matches)?);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod device;
pub mod error;
pub mod query;
pub mod render;

pub use error::{Error, Result};
