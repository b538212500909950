//! Remote stock client: the reqwest-backed [`StockService`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use stockfront_core::{CategoryId, DomainError, Entity, ProductId};
use stockfront_model::{Category, Movement, MovementType, Product};

use crate::error::{ClientError, ClientResult};
use crate::service::{precheck_movement, StockService};

/// How a DELETE treats an entity that is already absent server-side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// A 404 counts as success: the entity is gone either way.
    #[default]
    IdempotentAbsent,
    /// A 404 is surfaced as `NotFound`.
    StrictExistence,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base endpoint, e.g. `http://host:port/api`.
    pub base_url: String,
    pub timeout: Duration,
    pub delete_policy: DeletePolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            delete_policy: DeletePolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }
}

/// Movement write body. The product travels as an id reference on writes;
/// read responses embed the full product snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MovementRequest {
    product: ProductId,
    date: DateTime<Utc>,
    quantity: u32,
    #[serde(rename = "type")]
    movement_type: MovementType,
}

/// JSON-over-HTTP implementation of the stock service contract.
///
/// Holds no mutable state beyond the configured endpoint and reqwest's
/// connection pool; concurrent calls are safe and independent. No automatic
/// retries.
pub struct RemoteStockClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RemoteStockClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a collection path. Order is the server's; never re-sorted.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        debug!(path, "GET collection");
        let response = self.http.get(self.url(path)).send().await?;
        Self::read_json(response, None).await
    }

    async fn fetch_item<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: &'static str,
        id: u64,
    ) -> ClientResult<T> {
        debug!(path, "GET item");
        let response = self.http.get(self.url(path)).send().await?;
        Self::read_json(response, Some((entity, id))).await
    }

    /// POST/PUT with a full JSON entity body; the response deserializes into
    /// the server's canonical entity.
    async fn send_entity<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        not_found: Option<(&'static str, u64)>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!(%method, path, "submit entity");
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Self::read_json(response, not_found).await
    }

    async fn delete_item(&self, path: &str, entity: &'static str, id: u64) -> ClientResult<bool> {
        debug!(path, "DELETE item");
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return match self.config.delete_policy {
                DeletePolicy::IdempotentAbsent => Ok(true),
                DeletePolicy::StrictExistence => Err(ClientError::not_found(entity, id)),
            };
        }
        Err(Self::remote_error(status, response).await)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        not_found: Option<(&'static str, u64)>,
    ) -> ClientResult<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some((entity, id)) = not_found {
                return Err(ClientError::not_found(entity, id));
            }
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Transport(format!("malformed response body: {e}")))
    }

    async fn remote_error(status: StatusCode, response: reqwest::Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "remote service rejected request");
        ClientError::remote(status.as_u16(), body)
    }
}

#[async_trait]
impl StockService for RemoteStockClient {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.fetch_list("/categories").await
    }

    async fn get_category(&self, id: CategoryId) -> ClientResult<Category> {
        self.fetch_item(&format!("/categories/{id}"), "category", id.as_u64())
            .await
    }

    async fn create_category(&self, category: &Category) -> ClientResult<Category> {
        self.send_entity(Method::POST, "/categories", category, None)
            .await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        category: &Category,
    ) -> ClientResult<Category> {
        self.send_entity(
            Method::PUT,
            &format!("/categories/{id}"),
            category,
            Some(("category", id.as_u64())),
        )
        .await
    }

    async fn delete_category(&self, id: CategoryId) -> ClientResult<bool> {
        self.delete_item(&format!("/categories/{id}"), "category", id.as_u64())
            .await
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.fetch_list("/products").await
    }

    async fn get_product(&self, id: ProductId) -> ClientResult<Product> {
        self.fetch_item(&format!("/products/{id}"), "product", id.as_u64())
            .await
    }

    async fn create_product(&self, product: &Product) -> ClientResult<Product> {
        self.send_entity(Method::POST, "/products", product, None)
            .await
    }

    async fn update_product(&self, id: ProductId, product: &Product) -> ClientResult<Product> {
        self.send_entity(
            Method::PUT,
            &format!("/products/{id}"),
            product,
            Some(("product", id.as_u64())),
        )
        .await
    }

    async fn delete_product(&self, id: ProductId) -> ClientResult<bool> {
        self.delete_item(&format!("/products/{id}"), "product", id.as_u64())
            .await
    }

    async fn list_movements(&self) -> ClientResult<Vec<Movement>> {
        self.fetch_list("/movements").await
    }

    async fn create_movement(&self, movement: &Movement) -> ClientResult<Movement> {
        let evaluation = precheck_movement(movement)?;
        debug!(
            resulting_quantity = evaluation.resulting_quantity,
            threshold = ?evaluation.threshold,
            "movement pre-validated"
        );

        // Guaranteed by the precheck; kept as an error path rather than a panic.
        let product_id = movement.product().id().ok_or_else(|| {
            DomainError::validation("movement references a product that was never persisted")
        })?;
        let request = MovementRequest {
            product: product_id,
            date: movement.date(),
            quantity: movement.quantity(),
            movement_type: movement.movement_type(),
        };
        self.send_entity(Method::POST, "/movements", &request, None)
            .await
    }

    async fn generate_report(&self) -> ClientResult<String> {
        debug!("GET report");
        let response = self.http.get(self.url("/report")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::remote_error(status, response).await);
        }
        response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubled_slashes() {
        let client =
            RemoteStockClient::new(ClientConfig::new("http://localhost:8080/api/")).unwrap();
        assert_eq!(
            client.url("/categories"),
            "http://localhost:8080/api/categories"
        );
    }

    #[test]
    fn default_delete_policy_is_idempotent() {
        let config = ClientConfig::new("http://localhost:8080/api");
        assert_eq!(config.delete_policy, DeletePolicy::IdempotentAbsent);
    }

    #[test]
    fn movement_request_serializes_product_as_id_reference() {
        let request = MovementRequest {
            product: ProductId::new(42),
            date: Utc::now(),
            quantity: 3,
            movement_type: MovementType::Exit,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["product"], serde_json::json!(42));
        assert_eq!(json["quantity"], serde_json::json!(3));
        assert_eq!(json["type"], serde_json::json!("EXIT"));
        assert!(json["date"].is_string());
    }
}
