//! # Inventory Client
//!
//! Fetches product and stock records from the inventory endpoint.
//!
//! ## Resources
//! ```text
//! GET {base_url}products/{id}  →  { "id": 1, "title": "...", "price": 179.9, "image": "..." }
//! GET {base_url}stock/{id}     →  { "id": 1, "amount": 3 }
//! ```
//!
//! The store only ever sees the [`InventoryClient`] trait, so tests and
//! alternative back ends plug in without touching cart logic.

use async_trait::async_trait;
use reqwest::StatusCode;
use rocket_core::{Product, ProductId, StockRecord};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::InventoryConfig;
use crate::error::{ConfigError, InventoryError};

const PRODUCTS: &str = "products";
const STOCK: &str = "stock";

/// Source of product metadata and stock levels.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetches the product record for `id`.
    async fn fetch_product(&self, id: ProductId) -> Result<Product, InventoryError>;

    /// Fetches the current stock record for `id`.
    async fn fetch_stock(&self, id: ProductId) -> Result<StockRecord, InventoryError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// `InventoryClient` backed by a JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: &InventoryConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Endpoint that resources are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T, InventoryError> {
        let url = self.base_url.join(&format!("{resource}/{id}"))?;
        debug!(%url, "Inventory request");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound { resource, id });
        }

        if !status.is_success() {
            return Err(InventoryError::Status {
                resource,
                id,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| InventoryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn fetch_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.get_json(PRODUCTS, id).await
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<StockRecord, InventoryError> {
        self.get_json(STOCK, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn product(Path(id): Path<u64>) -> Result<Json<Value>, AxumStatus> {
        match id {
            1 => Ok(Json(json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://cdn.example.com/tenis1.jpg"
            }))),
            13 => Ok(Json(json!({ "unexpected": true }))),
            500 => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn stock(Path(id): Path<u64>) -> Result<Json<Value>, AxumStatus> {
        match id {
            1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    /// Serves the inventory API under `/api` on an ephemeral port.
    async fn spawn_inventory() -> String {
        let api = Router::new()
            .route("/products/{id}", get(product))
            .route("/stock/{id}", get(stock));
        let app = Router::new().nest("/api", api);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/api")
    }

    async fn client() -> HttpInventoryClient {
        let config = InventoryConfig {
            base_url: spawn_inventory().await,
            timeout_secs: 5,
        };
        let client = HttpInventoryClient::new(&config).unwrap();
        assert!(client.base_url().path().ends_with("/api/"));
        client
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let client = client().await;
        let product = client.fetch_product(ProductId::new(1)).await.unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.to_string(), "179.9");
        assert_eq!(product.price.to_money().cents(), 17990);
        assert_eq!(product.image, "https://cdn.example.com/tenis1.jpg");
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let client = client().await;
        let stock = client.fetch_stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 3);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let client = client().await;

        let err = client.fetch_stock(ProductId::new(2)).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::NotFound { resource: "stock", id } if id == ProductId::new(2)
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let client = client().await;

        let err = client.fetch_product(ProductId::new(500)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let client = client().await;

        let err = client.fetch_product(ProductId::new(13)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpInventoryClient::new(&InventoryConfig {
            base_url: format!("http://{addr}/"),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.fetch_stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Transport(_)));
    }
}
