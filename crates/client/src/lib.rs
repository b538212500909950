//! `stockfront-client` — the stock service contract and its implementations.
//!
//! The [`StockService`] trait is the capability set every transport must
//! satisfy: entity CRUD for categories and products, movement recording, and
//! report generation. [`RemoteStockClient`] speaks JSON over HTTP to the
//! remote stock service; [`InMemoryStockService`] is an in-process fake with
//! the same contract, for tests and UI development.
//!
//! Failures are always typed ([`ClientError`]); no operation ever converts a
//! failure into an empty list, a placeholder entity, or an unconditional
//! `true`.

pub mod error;
pub mod memory;
pub mod remote;
pub mod service;

pub use error::{ClientError, ClientResult};
pub use memory::InMemoryStockService;
pub use remote::{ClientConfig, DeletePolicy, RemoteStockClient};
pub use service::{precheck_movement, with_cancellation, StockService};
