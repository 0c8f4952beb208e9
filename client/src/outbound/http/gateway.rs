//! REST gateway implementing the domain ports over `/api/v1`.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::address::{Address, AddressId, NewAddress};
use crate::domain::district::District;
use crate::domain::order::{NewOrder, Order, OrderUpdate};
use crate::domain::ports::{
    AddressGateway, CatalogueGateway, GatewayError, OrderGateway, UserGateway,
};
use crate::domain::user::{NewUser, TelegramId, User};

use super::config::RestGatewayConfig;
use super::dto::{CreateAddressDto, ErrorBodyDto, OrderListDto};

/// Errors raised while constructing a [`RestGateway`].
#[derive(Debug, Error)]
pub enum RestGatewayBuildError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The configured base URL cannot host the API prefix.
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Adapter performing HTTP requests against the backend API.
///
/// One instance serves all four ports; it is cheap to clone and safe to
/// share behind an [`std::sync::Arc`].
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    api_root: Url,
}

impl RestGateway {
    /// Build an adapter from configuration, applying the configured timeout
    /// and user agent to every request.
    ///
    /// # Errors
    ///
    /// Returns a [`RestGatewayBuildError`] when the HTTP client cannot be
    /// constructed or the base URL cannot carry the `/api/v1` prefix.
    pub fn new(config: &RestGatewayConfig) -> Result<Self, RestGatewayBuildError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        // Url::join drops the last path segment of a slash-less base, so a
        // base like `https://host/water` must be normalised first.
        let mut base = config.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let api_root = base.join("api/v1/")?;
        Ok(Self { client, api_root })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.api_root
            .join(path)
            .map_err(|error| GatewayError::transport(format!("invalid endpoint {path}: {error}")))
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body)
            .map_err(|error| GatewayError::decode(format!("invalid response body: {error}")))
    }

    /// Like [`Self::fetch`], but decodes a JSON `null` body as `None`.
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        self.fetch(request).await
    }

    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<(), GatewayError> {
        self.execute(request).await.map(|_| ())
    }
}

#[async_trait]
impl UserGateway for RestGateway {
    async fn fetch_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> Result<Option<User>, GatewayError> {
        let url = self.endpoint(&format!("users/tg/{telegram_id}"))?;
        match self.fetch::<User>(self.client.get(url)).await {
            Ok(user) => Ok(Some(user)),
            Err(GatewayError::NotFound { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn register(&self, user: &NewUser) -> Result<User, GatewayError> {
        let url = self.endpoint("users/")?;
        tracing::debug!(telegram_id = %user.telegram_id(), "registering user");
        self.fetch(self.client.post(url).json(user)).await
    }
}

#[async_trait]
impl AddressGateway for RestGateway {
    async fn list(&self, telegram_id: TelegramId) -> Result<Vec<Address>, GatewayError> {
        let url = self.endpoint(&format!("addresses/user/{telegram_id}"))?;
        self.fetch(self.client.get(url)).await
    }

    async fn create(
        &self,
        telegram_id: TelegramId,
        address: &NewAddress,
        is_default: bool,
    ) -> Result<Address, GatewayError> {
        let url = self.endpoint(&format!("addresses/user/{telegram_id}"))?;
        let body = CreateAddressDto::from_form(address, is_default);
        tracing::debug!(%telegram_id, is_default, "creating address");
        self.fetch(self.client.post(url).json(&body)).await
    }

    async fn delete(&self, address_id: AddressId) -> Result<(), GatewayError> {
        let url = self.endpoint(&format!("addresses/{address_id}"))?;
        self.execute_unit(self.client.delete(url)).await
    }
}

#[async_trait]
impl CatalogueGateway for RestGateway {
    async fn districts(&self) -> Result<Vec<District>, GatewayError> {
        let url = self.endpoint("districts/")?;
        self.fetch(self.client.get(url)).await
    }
}

#[async_trait]
impl OrderGateway for RestGateway {
    async fn create(
        &self,
        telegram_id: TelegramId,
        order: &NewOrder,
    ) -> Result<Order, GatewayError> {
        let url = self.endpoint(&format!("orders/user/{telegram_id}"))?;
        tracing::debug!(%telegram_id, jv_qty = order.jv_qty(), lv_qty = order.lv_qty(), "submitting order");
        self.fetch(self.client.post(url).json(order)).await
    }

    async fn history(
        &self,
        telegram_id: TelegramId,
        page: PageRequest,
    ) -> Result<Page<Order>, GatewayError> {
        let mut url = self.endpoint(&format!("orders/user/{telegram_id}"))?;
        url.query_pairs_mut()
            .append_pair("limit", &page.limit().to_string())
            .append_pair("offset", &page.offset().to_string());
        let envelope: OrderListDto = self.fetch(self.client.get(url)).await?;
        Ok(envelope.into_page())
    }

    async fn active(&self, telegram_id: TelegramId) -> Result<Option<Order>, GatewayError> {
        let url = self.endpoint(&format!("orders/user/{telegram_id}/active"))?;
        self.fetch_optional(self.client.get(url)).await
    }

    async fn last_completed(
        &self,
        telegram_id: TelegramId,
    ) -> Result<Option<Order>, GatewayError> {
        let url = self.endpoint(&format!("orders/user/{telegram_id}/last-completed"))?;
        self.fetch_optional(self.client.get(url)).await
    }

    async fn update(&self, order_id: i64, update: &OrderUpdate) -> Result<Order, GatewayError> {
        let url = self.endpoint(&format!("orders/{order_id}"))?;
        self.fetch(self.client.patch(url).json(update)).await
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let detail = extract_detail(body);
    let fallback = || format!("status {}", status.as_u16());

    match status {
        StatusCode::NOT_FOUND => GatewayError::not_found(detail.unwrap_or_else(fallback)),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GatewayError::timeout(detail.unwrap_or_else(fallback))
        }
        _ if status.is_client_error() => GatewayError::rejected(detail.unwrap_or_else(fallback)),
        _ => {
            let preview = body_preview(body);
            let message = if preview.is_empty() {
                fallback()
            } else {
                format!("status {}: {preview}", status.as_u16())
            };
            GatewayError::transport(message)
        }
    }
}

fn extract_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .map(ErrorBodyDto::message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn gateway() -> RestGateway {
        let config = RestGatewayConfig::new(
            Url::parse("https://water.example").expect("valid base URL"),
        );
        RestGateway::new(&config).expect("gateway builds")
    }

    #[test]
    fn endpoints_sit_under_the_api_prefix() {
        let gateway = gateway();
        let url = gateway
            .endpoint("orders/user/42/active")
            .expect("endpoint joins");
        assert_eq!(
            url.as_str(),
            "https://water.example/api/v1/orders/user/42/active"
        );
    }

    #[rstest]
    #[case::no_trailing_slash("https://water.example/water")]
    #[case::trailing_slash("https://water.example/water/")]
    fn base_url_path_survives_prefix_joining(#[case] base: &str) {
        let config = RestGatewayConfig::new(Url::parse(base).expect("valid base URL"));
        let gateway = RestGateway::new(&config).expect("gateway builds");
        let url = gateway.endpoint("districts/").expect("endpoint joins");
        assert_eq!(url.as_str(), "https://water.example/water/api/v1/districts/");
    }

    #[rstest]
    #[case::capacity(
        StatusCode::BAD_REQUEST,
        r#"{"detail": "Лимит района исчерпан"}"#,
        GatewayError::Rejected { message: "Лимит района исчерпан".to_owned() }
    )]
    #[case::missing_user(
        StatusCode::NOT_FOUND,
        r#"{"detail": "Пользователь не найден"}"#,
        GatewayError::NotFound { message: "Пользователь не найден".to_owned() }
    )]
    #[case::gateway_timeout(
        StatusCode::GATEWAY_TIMEOUT,
        "",
        GatewayError::Timeout { message: "status 504".to_owned() }
    )]
    #[case::bare_client_error(
        StatusCode::CONFLICT,
        "not json",
        GatewayError::Rejected { message: "status 409".to_owned() }
    )]
    fn maps_http_statuses_to_gateway_errors(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: GatewayError,
    ) {
        assert_eq!(map_status_error(status, body.as_bytes()), expected);
    }

    #[test]
    fn server_errors_map_to_transport_with_a_body_preview() {
        let error = map_status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"<html>\n  backend unavailable\n</html>",
        );
        match error {
            GatewayError::Transport { message } => {
                assert!(message.starts_with("status 500:"));
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }

    #[test]
    fn validation_detail_lists_are_stringified() {
        let error = map_status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail": [{"loc": ["body", "jv_qty"], "msg": "ge=0"}]}"#,
        );
        match error {
            GatewayError::Rejected { message } => assert!(message.contains("jv_qty")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
