use crate::models::{ChecklistItem, Folder, Note, Role, Tag, User};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// 401 from any endpoint. Callers treat it as "session expired".
    Unauthorized,
    Network,
    Http { status: u16 },
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// Raw response body for non-2xx answers.
    pub body: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
            body: None,
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
            body: None,
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
            body: None,
        }
    }

    pub(crate) fn http(status: u16, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http { status },
            message: format!("{ctx} ({status}): {body}"),
            body: Some(body),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// FastAPI puts human-readable errors under `detail`. Validation errors
    /// use a list there instead, which we don't try to render.
    pub fn detail(&self) -> Option<String> {
        let body = self.body.as_deref()?;
        let v: serde_json::Value = serde_json::from_str(body).ok()?;
        v.get("detail")
            .and_then(|d| d.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";

    pub fn new() -> Self {
        // Both `window.ENV.API_URL` and `window.ENV.api_url` are accepted.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                if !url_str.trim().is_empty() {
                                    return Self { api_url: url_str };
                                }
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Request payload. Login is the only form-encoded endpoint.
#[derive(Clone, Debug)]
pub(crate) enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

pub(crate) fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Omitted entirely unless a child names a numeric parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_checklist: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist_items: Vec<ChecklistItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CreateFolderRequest {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn from_env(token: Option<String>) -> Self {
        Self {
            base_url: EnvConfig::new().api_url,
            token,
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Single entry point for every endpoint. No retries: a failure is final
    /// for this call.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        headers: &[(&str, &str)],
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let mut req = client.request(method, self.url(path));

        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        for (k, v) in headers {
            req = req.header(*k, *v);
        }

        req = match body {
            Some(RequestBody::Json(v)) => req.json(&v),
            Some(RequestBody::Form(pairs)) => req
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encode_form(&pairs)),
            None => req,
        };

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            // 204 and other empty answers decode as JSON `null`.
            let text = res.text().await.map_err(ApiError::network)?;
            let text = if text.trim().is_empty() { "null" } else { text.as_str() };
            serde_json::from_str(text).map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    fn json_body(value: &impl Serialize) -> ApiResult<Option<RequestBody>> {
        serde_json::to_value(value)
            .map(|v| Some(RequestBody::Json(v)))
            .map_err(ApiError::parse)
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        self.request(Method::POST, "/auth/login", Some(RequestBody::Form(form)), &[])
            .await
    }

    pub async fn signup(&self, req_body: &SignupRequest) -> ApiResult<User> {
        self.request(Method::POST, "/auth/signup", Self::json_body(req_body)?, &[])
            .await
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.request(Method::GET, "/users/me", None, &[]).await
    }

    pub async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.request(Method::GET, "/notes/", None, &[]).await
    }

    pub async fn create_note(&self, req_body: &CreateNoteRequest) -> ApiResult<Note> {
        self.request(Method::POST, "/notes/", Self::json_body(req_body)?, &[])
            .await
    }

    /// Replaces the whole items array; the server has no per-item endpoint.
    pub async fn update_checklist(
        &self,
        note_id: i64,
        items: &[ChecklistItem],
    ) -> ApiResult<Note> {
        self.request(
            Method::PATCH,
            &format!("/notes/{note_id}/checklist"),
            Self::json_body(&items)?,
            &[],
        )
        .await
    }

    pub async fn delete_note(&self, note_id: i64) -> ApiResult<()> {
        let _: serde_json::Value = self
            .request(Method::DELETE, &format!("/notes/{note_id}"), None, &[])
            .await?;
        Ok(())
    }

    pub async fn list_folders(&self) -> ApiResult<Vec<Folder>> {
        self.request(Method::GET, "/folders/", None, &[]).await
    }

    pub async fn create_folder(&self, name: &str) -> ApiResult<Folder> {
        let req_body = CreateFolderRequest {
            name: name.to_string(),
        };
        self.request(Method::POST, "/folders/", Self::json_body(&req_body)?, &[])
            .await
    }

    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.request(Method::GET, "/tags/", None, &[]).await
    }
}
