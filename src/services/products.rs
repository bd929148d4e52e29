//! Product lookups against the Admin GraphQL API

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::ShopifyConfig,
    error::{AppError, AppResult},
    models::ProductSummary,
};

const SUPPLEMENT_QUERY: &str = r#"
query supplementQrCode($id: ID!) {
  product(id: $id) {
    title
    media(first: 1) {
      nodes {
        preview {
          image {
            altText
            url
          }
        }
      }
    }
  }
}
"#;

/// Source of live product data for a shop
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// `None` when the product no longer exists
    async fn product(&self, shop: &str, product_id: &str) -> AppResult<Option<ProductSummary>>;
}

#[derive(Clone)]
pub struct ShopifyCatalog {
    http: Client,
    access_token: String,
    api_version: String,
    scheme: &'static str,
}

impl std::fmt::Debug for ShopifyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyCatalog")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl ShopifyCatalog {
    pub fn new(config: &ShopifyConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("qr-codes-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            access_token: config.access_token.clone(),
            api_version: config.api_version.clone(),
            scheme: "https",
        })
    }

    /// Talk plain HTTP to a local stand-in for the shop
    #[cfg(test)]
    fn insecure(mut self) -> Self {
        self.scheme = "http";
        self
    }

    pub fn endpoint(&self, shop: &str) -> AppResult<Url> {
        Url::parse(&format!(
            "{}://{}/admin/api/{}/graphql.json",
            self.scheme, shop, self.api_version
        ))
        .map_err(|e| AppError::BadRequest(format!("Invalid shop domain {}: {}", shop, e)))
    }
}

#[async_trait]
impl ProductCatalog for ShopifyCatalog {
    async fn product(&self, shop: &str, product_id: &str) -> AppResult<Option<ProductSummary>> {
        let endpoint = self.endpoint(shop)?;
        tracing::debug!("Product lookup {} on {}", product_id, shop);

        let response = self
            .http
            .post(endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({
                "query": SUPPLEMENT_QUERY,
                "variables": { "id": product_id },
            }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Product lookup request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Product lookup returned HTTP {}",
                status
            )));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid product lookup response: {}", e)))?;

        body.into_product()
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ProductData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    title: Option<String>,
    media: Option<MediaConnection>,
}

#[derive(Debug, Deserialize)]
struct MediaConnection {
    #[serde(default)]
    nodes: Vec<MediaNode>,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    preview: Option<MediaPreview>,
}

#[derive(Debug, Deserialize)]
struct MediaPreview {
    image: Option<PreviewImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewImage {
    alt_text: Option<String>,
    url: Option<String>,
}

impl GraphQlResponse {
    fn into_product(self) -> AppResult<Option<ProductSummary>> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::Upstream(messages.join("; ")));
        }

        // A product without a title is treated as gone
        let Some(product) = self.data.and_then(|d| d.product) else {
            return Ok(None);
        };
        let Some(title) = product.title.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let image = product
            .media
            .and_then(|m| m.nodes.into_iter().next())
            .and_then(|n| n.preview)
            .and_then(|p| p.image);

        Ok(Some(ProductSummary {
            title,
            image_url: image.as_ref().and_then(|i| i.url.clone()),
            image_alt: image.and_then(|i| i.alt_text),
        }))
    }
}
