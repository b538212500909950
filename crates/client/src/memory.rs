//! In-memory [`StockService`] fake for tests and UI development.
//!
//! Mirrors the remote contract, including the failure surface: missing ids
//! yield `NotFound`, referential-integrity violations yield `Remote { 409 }`
//! and stock rejections by the "server" yield `Remote { 422 }`, exactly as a
//! caller would observe them against the real service.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stockfront_core::{CategoryId, Entity, MovementId, ProductId};
use stockfront_model::{evaluate, Category, Movement, Product};

use crate::error::{ClientError, ClientResult};
use crate::remote::DeletePolicy;
use crate::service::{precheck_movement, StockService};

#[derive(Default)]
struct State {
    next_category_id: u64,
    next_product_id: u64,
    next_movement_id: u64,
    categories: BTreeMap<u64, Category>,
    products: BTreeMap<u64, Product>,
    movements: BTreeMap<u64, Movement>,
}

impl State {
    fn category_is_known(&self, category: &Category) -> bool {
        category
            .id()
            .is_some_and(|id| self.categories.contains_key(&id.as_u64()))
    }
}

/// In-process stock service with server-like semantics.
pub struct InMemoryStockService {
    state: Mutex<State>,
    delete_policy: DeletePolicy,
}

impl InMemoryStockService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            delete_policy: DeletePolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    fn absent(&self, entity: &'static str, id: u64) -> ClientResult<bool> {
        match self.delete_policy {
            DeletePolicy::IdempotentAbsent => Ok(true),
            DeletePolicy::StrictExistence => Err(ClientError::not_found(entity, id)),
        }
    }
}

impl Default for InMemoryStockService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StockService for InMemoryStockService {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> ClientResult<Category> {
        let state = self.state.lock().await;
        state
            .categories
            .get(&id.as_u64())
            .cloned()
            .ok_or_else(|| ClientError::not_found("category", id.as_u64()))
    }

    async fn create_category(&self, category: &Category) -> ClientResult<Category> {
        let mut state = self.state.lock().await;
        state.next_category_id += 1;
        let id = CategoryId::new(state.next_category_id);
        let stored = category.clone().with_id(id);
        state.categories.insert(id.as_u64(), stored.clone());
        Ok(stored)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        category: &Category,
    ) -> ClientResult<Category> {
        let mut state = self.state.lock().await;
        if !state.categories.contains_key(&id.as_u64()) {
            return Err(ClientError::not_found("category", id.as_u64()));
        }
        // Full-replace semantics; the path id is authoritative.
        let stored = category.clone().with_id(id);
        state.categories.insert(id.as_u64(), stored.clone());
        Ok(stored)
    }

    async fn delete_category(&self, id: CategoryId) -> ClientResult<bool> {
        let mut state = self.state.lock().await;
        if !state.categories.contains_key(&id.as_u64()) {
            return self.absent("category", id.as_u64());
        }
        let referenced = state
            .products
            .values()
            .any(|p| p.category().id() == Some(id));
        if referenced {
            return Err(ClientError::remote(
                409,
                format!("category {id} is referenced by existing products"),
            ));
        }
        state.categories.remove(&id.as_u64());
        Ok(true)
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let state = self.state.lock().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> ClientResult<Product> {
        let state = self.state.lock().await;
        state
            .products
            .get(&id.as_u64())
            .cloned()
            .ok_or_else(|| ClientError::not_found("product", id.as_u64()))
    }

    async fn create_product(&self, product: &Product) -> ClientResult<Product> {
        let mut state = self.state.lock().await;
        if !state.category_is_known(product.category()) {
            return Err(ClientError::remote(
                422,
                "product references an unknown category",
            ));
        }
        state.next_product_id += 1;
        let id = ProductId::new(state.next_product_id);
        let stored = product.clone().with_id(id);
        state.products.insert(id.as_u64(), stored.clone());
        Ok(stored)
    }

    async fn update_product(&self, id: ProductId, product: &Product) -> ClientResult<Product> {
        let mut state = self.state.lock().await;
        if !state.products.contains_key(&id.as_u64()) {
            return Err(ClientError::not_found("product", id.as_u64()));
        }
        if !state.category_is_known(product.category()) {
            return Err(ClientError::remote(
                422,
                "product references an unknown category",
            ));
        }
        let stored = product.clone().with_id(id);
        state.products.insert(id.as_u64(), stored.clone());
        Ok(stored)
    }

    async fn delete_product(&self, id: ProductId) -> ClientResult<bool> {
        let mut state = self.state.lock().await;
        if state.products.remove(&id.as_u64()).is_none() {
            return self.absent("product", id.as_u64());
        }
        Ok(true)
    }

    async fn list_movements(&self) -> ClientResult<Vec<Movement>> {
        let state = self.state.lock().await;
        Ok(state.movements.values().cloned().collect())
    }

    async fn create_movement(&self, movement: &Movement) -> ClientResult<Movement> {
        // Client-side precheck against the caller's snapshot, as every
        // implementation must do.
        precheck_movement(movement)?;

        let mut state = self.state.lock().await;
        let product_id = movement
            .product()
            .id()
            .ok_or_else(|| ClientError::remote(422, "movement product has no id"))?;
        let stored = state
            .products
            .get(&product_id.as_u64())
            .cloned()
            .ok_or_else(|| ClientError::not_found("product", product_id.as_u64()))?;

        // Authoritative re-evaluation against the stored product: the caller's
        // snapshot may be stale.
        let evaluation = evaluate(&stored, movement.movement_type(), movement.quantity())
            .map_err(|e| ClientError::remote(422, e.to_string()))?;

        let updated = stored.with_stock_quantity(evaluation.resulting_quantity);
        state.products.insert(product_id.as_u64(), updated);

        state.next_movement_id += 1;
        let id = MovementId::new(state.next_movement_id);
        let recorded = movement.clone().with_id(id);
        state.movements.insert(id.as_u64(), recorded.clone());
        Ok(recorded)
    }

    async fn generate_report(&self) -> ClientResult<String> {
        let state = self.state.lock().await;
        let mut report = String::new();
        let _ = writeln!(
            report,
            "stock report: {} categories, {} products, {} movements",
            state.categories.len(),
            state.products.len(),
            state.movements.len()
        );
        for product in state.products.values() {
            let flag = if product.stock_quantity() < product.min_quantity() {
                " [below min]"
            } else if product.stock_quantity() > product.max_quantity() {
                " [above max]"
            } else {
                ""
            };
            let _ = writeln!(
                report,
                "- {}: {} {}{}",
                product.name(),
                product.stock_quantity(),
                product.unit(),
                flag
            );
        }
        Ok(report)
    }
}
