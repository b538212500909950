//! `stockfront-model` — inventory-control entity model and movement evaluator.
//!
//! Entities are immutable value records: validated constructors, getters, and
//! explicit `with_*` operations that produce a new value. The remote stock
//! service owns the authoritative state; everything here is a transient,
//! disposable client-side snapshot.

pub mod category;
pub mod evaluate;
pub mod movement;
pub mod product;

pub use category::{Category, Packaging, Size};
pub use evaluate::{evaluate, Evaluation, ThresholdState};
pub use movement::{Movement, MovementType};
pub use product::Product;
