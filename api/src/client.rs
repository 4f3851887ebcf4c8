//! REST client implementation
//!
//! One [`ApiClient`] instance serves the whole process. The underlying
//! `reqwest` client keeps a cookie store so the session cookie set by
//! `/api/login` travels with every subsequent request.

use crate::{
    error::ApiError,
    types::{
        LeaderboardRow, NumberOwnership, Page, Prices, Purchase, PurchaseFilter, PurchaseStatus,
        Registration, SubmitPurchaseRequest, User,
    },
};
use reqwest::{Client, Response, StatusCode, multipart};
use serde::Deserialize;

/// Name of the response header carrying the total row count for paginated
/// listings
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

#[derive(Deserialize)]
struct TakenTickets {
    tickets: Vec<String>,
}

#[derive(Deserialize)]
struct SoldPercentage {
    vendidos: f64,
}

#[derive(Deserialize)]
struct OwnedTicketCount {
    quantity: u32,
}

/// Typed client for the rifa backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client against the given base URL
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a response's status, translating 401 into the distinguished
    /// unauthorized failure and any other non-2xx into `Api` with the body
    /// text as detail.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    /// Read `X-Total-Count`; listings without the header fall back to the
    /// page length so page math stays sane.
    fn total_count(response: &Response, fallback: u64) -> u64 {
        response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(fallback)
    }

    // ───────────────────────── tickets ─────────────────────────

    /// Ask which of the given numbers are already taken
    ///
    /// Returns the unavailable subset of `numbers`.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing
    /// failures.
    pub async fn check_tickets(&self, numbers: &[String]) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/tickets"))
            .query(&[("numbers", numbers.join(","))])
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let taken: TakenTickets = Self::json(response).await?;
        Ok(taken.tickets)
    }

    /// Percentage of tickets sold, for the landing progress bar
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing
    /// failures.
    pub async fn sold_percentage(&self) -> Result<f64, ApiError> {
        let response = self
            .client
            .get(self.url("/api/tickets/percentage"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let sold: SoldPercentage = Self::json(response).await?;
        Ok(sold.vendidos)
    }

    // ──────────────────────── purchases ────────────────────────

    /// Submit a purchase as a multipart form
    ///
    /// Sent exactly once; retrying is a user decision, never automatic.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-2xx statuses; the response
    /// body text becomes the error detail.
    pub async fn submit_purchase(&self, request: SubmitPurchaseRequest) -> Result<(), ApiError> {
        let screenshot = multipart::Part::bytes(request.payment_screenshot.bytes)
            .file_name(request.payment_screenshot.file_name)
            .mime_str(&request.payment_screenshot.content_type)
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let form = multipart::Form::new()
            .text("quantity", request.quantity.to_string())
            .text("montoBs", request.monto_bs)
            .text("montoUSD", request.monto_usd)
            .text("paymentMethod", request.payment_method.as_str())
            .text("transactionDigits", request.transaction_digits)
            .text("selectedNumbers", request.selected_numbers.join(","))
            .part("paymentScreenshot", screenshot);

        let response = self
            .client
            .post(self.url("/api/purchases"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }

    /// List purchases for review, newest first
    ///
    /// `page` starts at 1. The total row count comes from `X-Total-Count`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network/parse failures.
    pub async fn list_purchases(
        &self,
        filter: PurchaseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Purchase>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/purchases"))
            .query(&[
                ("status", filter.as_query_value().to_string()),
                ("page", page.to_string()),
                ("perPage", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let total_fallback = 0;
        let total = Self::total_count(&response, total_fallback);
        let items: Vec<Purchase> = Self::json(response).await?;
        let total = if total == 0 { items.len() as u64 } else { total };
        Ok(Page { items, total })
    }

    /// Update the review status of one purchase
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network failures.
    pub async fn update_purchase_status(
        &self,
        id: i64,
        status: PurchaseStatus,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url("/api/purchases"))
            .query(&[("id", id.to_string())])
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }

    /// Paginated "most tickets bought" ranking
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network/parse failures.
    pub async fn leaderboard(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<LeaderboardRow>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/purchases/leaderboard"))
            .query(&[("page", page.to_string()), ("perPage", per_page.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let total = Self::total_count(&response, 0);
        let items: Vec<LeaderboardRow> = Self::json(response).await?;
        let total = if total == 0 { items.len() as u64 } else { total };
        Ok(Page { items, total })
    }

    /// Look up the owner of one ticket number
    ///
    /// Returns `None` when the number has no owner yet.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network/parse failures.
    pub async fn search_by_number(
        &self,
        number: &str,
    ) -> Result<Option<NumberOwnership>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/purchases/search"))
            .query(&[("number", number)])
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        Self::json(response).await
    }

    /// How many tickets the current user holds
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network/parse failures.
    pub async fn user_ticket_count(&self) -> Result<u32, ApiError> {
        let response = self
            .client
            .get(self.url("/api/purchases/tickets"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let count: OwnedTicketCount = Self::json(response).await?;
        Ok(count.quantity)
    }

    // ───────────────────────── prices ──────────────────────────

    /// Current unit prices
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing
    /// failures.
    pub async fn prices(&self) -> Result<Prices, ApiError> {
        let response = self
            .client
            .get(self.url("/api/prices"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        Self::json(response).await
    }

    /// Replace the unit prices
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the session is gone, plus the
    /// usual network failures.
    pub async fn update_prices(&self, prices: Prices) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url("/api/prices"))
            .json(&prices)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }

    // ────────────────────────── auth ───────────────────────────

    /// Log in with email and password
    ///
    /// On success the backend sets the session cookie; the cookie store keeps
    /// it for every later call.
    ///
    /// # Errors
    ///
    /// Returns errors for bad credentials (as `Api`), network failures, or
    /// parsing failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        Self::json(response).await
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns errors for rejected registrations (as `Api`), network
    /// failures, or parsing failures.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(registration)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        Self::json(response).await
    }

    /// Who is logged in right now
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for an anonymous session, plus the
    /// usual network/parse failures.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.url("/api/me"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        Self::json(response).await
    }

    /// End the session
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-2xx statuses.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/logout"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
