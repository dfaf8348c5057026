//! A sorted, singly-linked map for Rust.
//!
//! This crate provides [`ChainMap`], a key-unique map that keeps its entries in ascending
//! key order at all times. Entries are stored as a chain of nodes, each linked from exactly
//! one predecessor, so iteration and rendering always yield keys in order without a sort.
//!
//! # Example
//!
//! ```
//! use chain_map::{ChainMap, Error};
//!
//! let mut items = ChainMap::new();
//! items.insert("b", 1);
//! items.insert("a", 2);
//! items.insert("c", 3);
//!
//! // Keys come back in ascending order, independent of insertion order
//! assert_eq!(items.display().to_string(), "a:2\nb:1\nc:3\n");
//!
//! // Copies are deep and independent
//! let mut copy = items.clone();
//! copy.update("a", 9)?;
//! assert_eq!(items.value_at("a"), Ok(&2));
//!
//! // Absence is an error value, not a default
//! assert_eq!(items.value_at("missing"), Err(Error::NotFound));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **`BTreeMap`-like API** - `get`, `insert`, `iter`, `Index`, `FromIterator`, ...
//! - **Checked access** - `at`, `value_at` and `update` return [`Error::NotFound`] for absent keys
//! - **No `unsafe`** - nodes live in an index-based arena with single-owner links
//!
//! # Implementation
//!
//! Every operation walks the chain from its smallest key, so lookups and insertions are
//! O(n). A new key is spliced in between the last smaller key and the first greater one;
//! an equal key has its value overwritten in place. The chain has no removal operation:
//! nodes are released only by [`ChainMap::clear`], by dropping the map, or by consuming
//! it with [`IntoIterator`].

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod chain_map;

pub use chain_map::ChainMap;
pub use error::{Error, Result};
pub use raw::Node;
