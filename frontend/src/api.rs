//! API client.
//!
//! Every endpoint goes through one send path: base-URL joining, bearer
//! injection from the session store, JSON decoding, error normalization
//! into [`ApiError`], and the global 401 invalidation. Typed endpoint
//! methods sit on top so screens never build paths or params by hand.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use starboard_shared::{
    BEARER_PREFIX, ChangePasswordRequest, CreateUserRequest, ErrorEnvelope, ForgotPasswordRequest,
    HEADER_AUTHORIZATION, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    RolesResponse, SetPasswordRequest, UpdateProfileRequest, UpdateUserRequest, User, UserPage,
};

use crate::error::{ApiError, ApiResult, REQUEST_FAILED};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::list::ListQuery;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;

// =========================================================
// Client core
// =========================================================

/// Cloning is cheap (the transport and storage are zero-sized in the
/// browser build) and keeps the client free to travel into callbacks.
#[derive(Clone)]
pub struct ApiClient<C: HttpClient, S: KeyValueStore> {
    http: C,
    base_url: String,
    session: SessionStore<S>,
    /// Invoked after a 401 has cleared the stored session; the browser
    /// wiring resets the reactive state and returns to the login screen.
    on_unauthorized: Arc<dyn Fn() + Send + Sync>,
}

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub fn new(
        http: C,
        base_url: &str,
        session: SessionStore<S>,
        on_unauthorized: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            on_unauthorized,
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// The one send path. A 401 on an authenticated request clears the
    /// stored session and fires the unauthorized hook before the error is
    /// returned; an anonymous 401 (failed login) is an ordinary failure.
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let token = self.session.token();

        let mut req = HttpRequest::new(&self.url(path), method).with_query(query);
        if let Some(token) = &token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
        }
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let response = self
            .http
            .send(req)
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if response.status == 401 && token.is_some() {
            self.session.clear();
            (self.on_unauthorized)();
        }

        if response.ok() {
            Ok(response)
        } else {
            Err(normalize_failure(&response))
        }
    }

    fn encode<B: Serialize>(body: &B) -> ApiResult<String> {
        // our DTOs cannot fail to encode, but the path stays honest
        serde_json::to_string(body)
            .map_err(|e| ApiError::network(format!("request encoding failed: {}", e)))
    }

    fn decode<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<T> {
        response
            .json()
            .map_err(|_| ApiError::http(response.status, REQUEST_FAILED))
    }

    // --- Verbs ---

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(HttpMethod::Get, path, Vec::new(), None).await?;
        Self::decode(response)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        let response = self.send(HttpMethod::Get, path, query, None).await?;
        Self::decode(response)
    }

    /// Raw transfer for binary payloads; the caller reads bytes and
    /// headers itself.
    pub async fn get_raw(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<HttpResponse> {
        self.send(HttpMethod::Get, path, query, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = Self::encode(body)?;
        let response = self
            .send(HttpMethod::Post, path, Vec::new(), Some(body))
            .await?;
        Self::decode(response)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = Self::encode(body)?;
        let response = self
            .send(HttpMethod::Put, path, Vec::new(), Some(body))
            .await?;
        Self::decode(response)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = Self::encode(body)?;
        let response = self
            .send(HttpMethod::Patch, path, Vec::new(), Some(body))
            .await?;
        Self::decode(response)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(HttpMethod::Delete, path, Vec::new(), None).await?;
        Self::decode(response)
    }

    // =========================================================
    // Auth endpoints
    // =========================================================

    /// Exchange credentials for a token + user pair.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.post::<_, Value>("/auth/register", request)
            .await
            .map(|_| ())
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiResult<()> {
        self.post::<_, Value>("/auth/forgot-password", request)
            .await
            .map(|_| ())
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()> {
        self.post::<_, Value>("/auth/reset-password", request)
            .await
            .map(|_| ())
    }

    // =========================================================
    // User management endpoints
    // =========================================================

    /// One page of the users collection for the given query.
    pub async fn list_users(&self, query: &ListQuery) -> ApiResult<UserPage> {
        self.get_with_query("/users", query.to_params()).await
    }

    pub async fn get_user(&self, id: u64) -> ApiResult<User> {
        self.get(&format!("/users/{}", id)).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<()> {
        self.post::<_, Value>("/users", request).await.map(|_| ())
    }

    pub async fn update_user(&self, id: u64, request: &UpdateUserRequest) -> ApiResult<()> {
        self.put::<_, Value>(&format!("/users/{}", id), request)
            .await
            .map(|_| ())
    }

    pub async fn delete_user(&self, id: u64) -> ApiResult<()> {
        self.delete::<Value>(&format!("/users/{}", id))
            .await
            .map(|_| ())
    }

    /// Admin password override for another account.
    pub async fn set_user_password(&self, id: u64, request: &SetPasswordRequest) -> ApiResult<()> {
        self.patch::<_, Value>(&format!("/users/{}/password", id), request)
            .await
            .map(|_| ())
    }

    pub async fn list_roles(&self) -> ApiResult<RolesResponse> {
        self.get("/roles").await
    }

    /// Spreadsheet export of the current query. List state is untouched;
    /// the server streams the same filtered/sorted collection as a file.
    pub async fn export_users(&self, query: &ListQuery, format: &str) -> ApiResult<FileDownload> {
        let mut params = query.to_params();
        params.push(("export".to_string(), "true".to_string()));
        params.push(("format".to_string(), format.to_string()));

        let response = self.get_raw("/users", params).await?;
        Ok(FileDownload::from_response(response, format))
    }

    // =========================================================
    // Profile endpoints
    // =========================================================

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<()> {
        self.post::<_, Value>("/profile", request).await.map(|_| ())
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()> {
        self.post::<_, Value>("/profile/change-password", request)
            .await
            .map(|_| ())
    }
}

/// Failure responses share one envelope; anything undecodable falls back
/// to the generic message.
fn normalize_failure(response: &HttpResponse) -> ApiError {
    let message = response
        .json::<ErrorEnvelope>()
        .map(|envelope| envelope.errors.message)
        .unwrap_or_else(|_| REQUEST_FAILED.to_string());
    ApiError::http(response.status, message)
}

// =========================================================
// Export download
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FileDownload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileDownload {
    fn from_response(response: HttpResponse, format: &str) -> Self {
        let filename = response
            .header("content-disposition")
            .and_then(parse_filename)
            .unwrap_or_else(|| format!("users.{}", format));
        let content_type = response
            .header("content-type")
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            filename,
            content_type,
            bytes: response.body,
        }
    }
}

// =========================================================
// Browser wiring
// =========================================================

pub type Api = ApiClient<crate::http::FetchHttpClient, crate::storage::BrowserStorage>;

/// Builds the client a screen uses: fetch transport, localStorage-backed
/// session, and a 401 hook that resets the reactive session state and
/// returns to the login screen.
pub fn use_api() -> Api {
    use crate::http::FetchHttpClient;
    use crate::session::{SessionStore, clear_session, use_session};
    use crate::storage::BrowserStorage;
    use crate::web::router::use_router;

    let session_ctx = use_session();
    let router = use_router();

    let on_unauthorized = Arc::new(move || {
        // storage is already cleared by the send path; this syncs the
        // reactive state and leaves the protected area
        clear_session(&session_ctx, &SessionStore::new(BrowserStorage));
        router.navigate("/");
    });

    ApiClient::new(
        FetchHttpClient,
        crate::config::backend_url(),
        SessionStore::new(BrowserStorage),
        on_unauthorized,
    )
}

/// Pulls the plain `filename=` parameter out of a Content-Disposition
/// value. The RFC 5987 `filename*=` form is not in this API's repertoire.
fn parse_filename(value: &str) -> Option<String> {
    let start = value.find("filename=")? + "filename=".len();
    let rest = &value[start..];
    let name = rest.split(';').next().unwrap_or(rest).trim();
    let name = name.trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests;
