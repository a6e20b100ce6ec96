use std::time::Duration;

use api_types::{
    ErrorResponse,
    movement::{MovementPage, MovementPageRequest},
};
use engine::{Movement, MovementSource, SourceError};
use reqwest::Url;

use crate::error::{AppError, Result};

/// Upper bound on pages walked in one listing, in case a server never sets
/// `last`.
const MAX_PAGES: u32 = 10_000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => SourceError::Unauthorized,
            ClientError::Forbidden => SourceError::Forbidden,
            ClientError::NotFound => SourceError::NotFound,
            ClientError::Validation(message) => SourceError::Validation(message),
            ClientError::Server(message) => SourceError::Server(message),
            ClientError::Transport(err) if err.is_decode() => SourceError::Decode(err.to_string()),
            ClientError::Transport(err) => SourceError::Transport(err.to_string()),
        }
    }
}

/// HTTP client for the movement service.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    page_size: u32,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, page_size: u32) -> Result<Self> {
        // `Url::join` replaces the last segment unless the base ends in `/`.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            page_size,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn movements_page(
        &self,
        request: MovementPageRequest,
    ) -> std::result::Result<MovementPage, ClientError> {
        let endpoint = self
            .base_url
            .join("movements")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .query(&request)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<MovementPage>().await.map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        let err = match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }
}

impl MovementSource for Client {
    /// Walks pages from the first one until the server reports the last page.
    async fn list_movements(&self) -> std::result::Result<Vec<Movement>, SourceError> {
        let mut movements = Vec::new();
        for page in 0..MAX_PAGES {
            let request = MovementPageRequest {
                page,
                size: self.page_size,
            };
            let response = self.movements_page(request).await?;
            tracing::debug!(
                page,
                items = response.content.len(),
                total = response.total_elements,
                "fetched movement page"
            );

            let done = response.last || response.content.is_empty();
            movements.extend(response.content.into_iter().map(Movement::from));
            if done {
                return Ok(movements);
            }
        }

        tracing::warn!("stopped listing movements after {MAX_PAGES} pages");
        Ok(movements)
    }
}

#[cfg(test)]
mod tests {
    use api_types::movement::{MovementCategory, MovementView};
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use chrono::NaiveDate;
    use engine::Category;

    use super::*;

    fn view(id: u64, category: MovementCategory, amount_minor: i64) -> MovementView {
        MovementView {
            id: Some(id),
            description: format!("movement {id}"),
            amount_minor,
            category,
            tag: None,
            date: NaiveDate::from_ymd_opt(2025, 11, id as u32).unwrap(),
            notes: None,
        }
    }

    async fn pages(Query(request): Query<MovementPageRequest>) -> Json<MovementPage> {
        let all = vec![
            view(1, MovementCategory::Income, 1_000),
            view(2, MovementCategory::Expense, 400),
            view(3, MovementCategory::Other("TRANSFER".to_string()), 50),
        ];
        let start = (request.page * request.size) as usize;
        let content: Vec<MovementView> = all
            .iter()
            .skip(start)
            .take(request.size as usize)
            .cloned()
            .collect();
        let total_pages = all.len().div_ceil(request.size as usize) as u32;
        Json(MovementPage {
            content,
            page_number: request.page,
            page_size: request.size,
            total_elements: all.len() as u64,
            total_pages,
            last: request.page + 1 >= total_pages,
        })
    }

    async fn unauthorized() -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "no session".to_string(),
            }),
        )
            .into_response()
    }

    async fn broken() -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "database down".to_string(),
            }),
        )
            .into_response()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn lists_every_page_in_server_order() {
        let base = serve(Router::new().route("/movements", get(pages))).await;
        let client = Client::new(&base, 2).unwrap();

        let movements = client.list_movements().await.unwrap();

        let ids: Vec<Option<u64>> = movements.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(movements[2].category, Category::Other("TRANSFER".to_string()));
    }

    #[tokio::test]
    async fn maps_status_codes_to_source_errors() {
        let base = serve(
            Router::new()
                .route("/movements", get(unauthorized))
                .route("/broken/movements", get(broken)),
        )
        .await;

        let err = Client::new(&base, 10)
            .unwrap()
            .list_movements()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unauthorized));

        let err = Client::new(&format!("{base}broken/"), 10)
            .unwrap()
            .list_movements()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Server(ref message) if message == "database down"));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = Client::new("http://127.0.0.1:9/", 10).unwrap();
        let err = client.list_movements().await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }

    #[test]
    fn base_url_keeps_its_path_prefix() {
        let client = Client::new("http://127.0.0.1:8080/api", 10).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/api/");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Client::new("not a url", 10).is_err());
    }
}
