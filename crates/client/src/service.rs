//! The stock service contract.

use std::future::Future;

use async_trait::async_trait;

use stockfront_core::{CategoryId, DomainError, Entity, ProductId};
use stockfront_model::{evaluate, Category, Evaluation, Movement, Product};

use crate::error::{ClientError, ClientResult};

/// Capability set every stock service transport must satisfy.
///
/// Mutating operations return the server's canonical entity on success (id
/// assigned, derived fields computed) and a typed error on failure.
/// Implementations are stateless per call; issuing operations concurrently
/// is safe and no cross-call lock is held. Retry policy belongs to the
/// caller — create operations are not guaranteed to be idempotent.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    async fn get_category(&self, id: CategoryId) -> ClientResult<Category>;
    async fn create_category(&self, category: &Category) -> ClientResult<Category>;
    async fn update_category(&self, id: CategoryId, category: &Category)
        -> ClientResult<Category>;
    async fn delete_category(&self, id: CategoryId) -> ClientResult<bool>;

    async fn list_products(&self) -> ClientResult<Vec<Product>>;
    async fn get_product(&self, id: ProductId) -> ClientResult<Product>;
    async fn create_product(&self, product: &Product) -> ClientResult<Product>;
    async fn update_product(&self, id: ProductId, product: &Product) -> ClientResult<Product>;
    async fn delete_product(&self, id: ProductId) -> ClientResult<bool>;

    async fn list_movements(&self) -> ClientResult<Vec<Movement>>;

    /// Record a movement. Implementations must run [`precheck_movement`]
    /// first and surface `InsufficientStock` without touching the network;
    /// the remote service stays the authority and may still reject.
    async fn create_movement(&self, movement: &Movement) -> ClientResult<Movement>;

    /// Opaque, server-rendered stock summary. Never parsed client-side.
    async fn generate_report(&self) -> ClientResult<String>;
}

/// Evaluate a movement against its product snapshot before submission.
///
/// Shared by every [`StockService`] implementation: rejects movements whose
/// product was never persisted, and propagates evaluator failures
/// (`InsufficientStock`, zero quantity) before any request is constructed.
pub fn precheck_movement(movement: &Movement) -> ClientResult<Evaluation> {
    if movement.product().id().is_none() {
        return Err(ClientError::Domain(DomainError::validation(
            "movement references a product that was never persisted",
        )));
    }
    let evaluation = evaluate(
        movement.product(),
        movement.movement_type(),
        movement.quantity(),
    )?;
    Ok(evaluation)
}

/// Race an operation against a cancellation signal.
///
/// If `cancel` resolves first the in-flight request future is dropped, which
/// aborts the exchange and returns the underlying connection to the pool.
/// The caller observes [`ClientError::Canceled`], distinct from a transport
/// failure.
pub async fn with_cancellation<T>(
    operation: impl Future<Output = ClientResult<T>> + Send,
    cancel: impl Future<Output = ()> + Send,
) -> ClientResult<T> {
    tokio::select! {
        result = operation => result,
        _ = cancel => Err(ClientError::Canceled),
    }
}
