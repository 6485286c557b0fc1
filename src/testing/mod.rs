//! Test doubles for the builder's collaborators
//!
//! This module provides:
//! - `RecordingTransport`: captures request bodies, replays canned results
//! - `MemoryRecordStore`: `Vec`-backed record store that returns records
//!   out of hit order, with an optional cache path
//!
//! # Quick Start
//!
//! ```rust
//! use squidex_builder::testing::{MemoryRecordStore, RecordingTransport};
//! use squidex_builder::{Hit, IndexTarget, ResultPage, SearchBuilder};
//!
//! let transport = RecordingTransport::new()
//!     .with_page(ResultPage::new(vec![Hit::new("2"), Hit::new("1")], 2));
//! let store = MemoryRecordStore::new(|n: &u32| n.to_string()).with_records(vec![1, 2]);
//!
//! let records = SearchBuilder::new(IndexTarget::new("numbers"))
//!     .where_eq("odd", false)
//!     .get_records(&transport, &store, &[])?;
//!
//! assert_eq!(records.into_items(), vec![2, 1]);
//! # Ok::<(), squidex_builder::BuilderError>(())
//! ```

pub mod store;
pub mod transport;

pub use store::MemoryRecordStore;
pub use transport::{RecordedRequest, RecordingTransport, RequestKind};
