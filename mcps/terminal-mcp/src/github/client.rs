//! Async client for the GitHub REST API
//!
//! One method per tool operation, each issuing a single request (delete
//! issues two). Nothing is retried, cached or paginated.
//!
//! # Example
//!
//! ```rust,ignore
//! use terminal_mcp::config::GitHubConfig;
//! use terminal_mcp::github::GitHubClient;
//!
//! let client = GitHubClient::new(&GitHubConfig::default())?;
//! let repo = client.get_repository("octocat", "hello-world").await?;
//! ```

use base64::Engine;
use reqwest::{header::ACCEPT, Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::{GitHubError, GitHubResult};
use crate::config::GitHubConfig;

const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Status and parsed body of a pass-through call
///
/// Error statuses are still values here: callers get GitHub's own error body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Payload of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Serialize)]
pub struct ContentUpload {
    pub message: String,
    /// Base64 of the file content
    pub content: String,
    pub branch: String,
    /// Blob SHA of the file being replaced. Absent means "create".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl ContentUpload {
    pub fn new(message: &str, text: &str, branch: &str, sha: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(text.as_bytes()),
            branch: branch.to_string(),
            sha,
        }
    }
}

/// GitHub REST client authenticated with a bearer token
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> GitHubResult<Self> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| GitHubError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl(config.api_url.clone()));
        }

        let http = Client::builder()
            .user_agent(concat!("terminal-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            token: config.token.clone(),
        })
    }

    /// Create a repository for the authenticated user
    #[instrument(skip(self))]
    pub async fn create_repository(
        &self,
        name: &str,
        private: bool,
        description: Option<&str>,
    ) -> GitHubResult<ApiResponse> {
        let mut payload = json!({ "name": name, "private": private });
        if let Some(description) = description {
            payload["description"] = Value::String(description.to_string());
        }

        let url = self.endpoint(["user", "repos"])?;
        self.send(self.request(Method::POST, url)?.json(&payload))
            .await
    }

    /// Invite `username` to a repository. A 204 (already a collaborator)
    /// is reported with a fixed success message.
    #[instrument(skip(self))]
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> GitHubResult<ApiResponse> {
        let url = self.endpoint(["repos", owner, repo, "collaborators", username])?;
        let mut response = self
            .send(
                self.request(Method::PUT, url)?
                    .json(&json!({ "permission": permission })),
            )
            .await?;

        if response.status == StatusCode::NO_CONTENT.as_u16() {
            response.body = json!({ "message": "Collaborator added successfully" });
        }
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn get_repository(&self, owner: &str, repo: &str) -> GitHubResult<ApiResponse> {
        let url = self.endpoint(["repos", owner, repo])?;
        self.send(self.request(Method::GET, url)?).await
    }

    /// First page of open pull requests
    #[instrument(skip(self))]
    pub async fn get_pull_requests(&self, owner: &str, repo: &str) -> GitHubResult<ApiResponse> {
        let url = self.endpoint(["repos", owner, repo, "pulls"])?;
        self.send(self.request(Method::GET, url)?).await
    }

    /// Delete a repository after checking that it is visible to the token
    #[instrument(skip(self))]
    pub async fn delete_repository(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        let url = self.endpoint(["repos", owner, repo])?;

        let check = self.send(self.request(Method::GET, url.clone())?).await?;
        if !check.is_success() {
            return Err(GitHubError::from_body(check.status, check.body));
        }

        let deleted = self.send(self.request(Method::DELETE, url)?).await?;
        match deleted.status {
            204 => Ok(json!({
                "status": "success",
                "message": format!("Repository {}/{} deleted successfully", owner, repo),
            })),
            status if status >= 400 => Err(GitHubError::from_body(status, deleted.body)),
            status => Err(GitHubError::DeleteFailed {
                status,
                details: deleted.body,
            }),
        }
    }

    /// Merge a pull request with the repository's default merge method
    #[instrument(skip(self))]
    pub async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> GitHubResult<ApiResponse> {
        let number = pr_number.to_string();
        let url = self.endpoint(["repos", owner, repo, "pulls", number.as_str(), "merge"])?;
        self.send(self.request(Method::PUT, url)?).await
    }

    /// SHA of the file at `path` on `branch`
    ///
    /// Any status other than 200 is treated as "no such file". That also
    /// covers rate limiting and auth failures, which then surface on the
    /// following PUT instead.
    #[instrument(skip(self))]
    pub async fn content_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> GitHubResult<Option<String>> {
        let url = self.content_url(owner, repo, path)?;
        let response = self
            .request(Method::GET, url)?
            .query(&[("ref", branch)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            debug!(status = response.status().as_u16(), "no existing content");
            return Ok(None);
        }

        let body: Value = response.json().await?;
        Ok(body.get("sha").and_then(Value::as_str).map(str::to_owned))
    }

    /// Create or update the file at `path`; non-2xx answers are errors
    /// carrying GitHub's response body
    #[instrument(skip(self, upload), fields(update = upload.sha.is_some()))]
    pub async fn put_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        upload: &ContentUpload,
    ) -> GitHubResult<Value> {
        let url = self.content_url(owner, repo, path)?;
        let response = self.request(Method::PUT, url)?.json(upload).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "content upload rejected");
            return Err(GitHubError::from_response(status.as_u16(), &text));
        }
        parse_body(status, &text)
    }

    fn content_url(&self, owner: &str, repo: &str, path: &str) -> GitHubResult<Url> {
        let mut url = self.endpoint(["repos", owner, repo, "contents"])?;
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.base.to_string()))?
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn endpoint<I>(&self, segments: I) -> GitHubResult<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> GitHubResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(GitHubError::MissingToken)?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON))
    }

    async fn send(&self, request: RequestBuilder) -> GitHubResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "GitHub response");

        Ok(ApiResponse {
            status: status.as_u16(),
            body: parse_body(status, &text)?,
        })
    }
}

/// Empty bodies (204 and friends) become `{"status": <code>}`
///
/// Error statuses never fail here: a body that is not JSON (a proxy's HTML
/// page, say) is kept as a JSON string so the status still reaches the caller.
fn parse_body(status: StatusCode, text: &str) -> GitHubResult<Value> {
    if text.trim().is_empty() {
        return Ok(json!({ "status": status.as_u16() }));
    }
    match serde_json::from_str(text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Ok(Value::String(text.to_string())),
        Err(source) => Err(GitHubError::InvalidBody {
            status: status.as_u16(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_url: api_url.to_string(),
            token: Some("test-token".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = client("https://api.github.com")
            .endpoint(["repos", "octo", "hello"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/octo/hello");
    }

    #[test]
    fn test_endpoint_keeps_enterprise_prefix() {
        let url = client("https://ghe.example.com/api/v3/")
            .endpoint(["user", "repos"])
            .unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/user/repos");
    }

    #[test]
    fn test_content_url_encodes_each_segment() {
        let url = client("https://api.github.com")
            .content_url("octo", "hello", "docs/my notes.md")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/hello/contents/docs/my%20notes.md"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GitHubClient::new(&GitHubConfig {
            api_url: "not a url".to_string(),
            token: None,
        });
        assert!(matches!(result, Err(GitHubError::InvalidUrl(_))));
    }

    #[test]
    fn test_request_without_token() {
        let client = GitHubClient::new(&GitHubConfig::default()).unwrap();
        let url = client.endpoint(["user", "repos"]).unwrap();
        assert!(matches!(
            client.request(Method::GET, url),
            Err(GitHubError::MissingToken)
        ));
    }

    #[test]
    fn test_upload_omits_missing_sha() {
        let upload = ContentUpload::new("init", "hello", "main", None);
        let value = serde_json::to_value(&upload).unwrap();
        assert_eq!(value["content"], "aGVsbG8=");
        assert!(value.get("sha").is_none());

        let upload = ContentUpload::new("update", "hello", "main", Some("abc123".into()));
        let value = serde_json::to_value(&upload).unwrap();
        assert_eq!(value["sha"], "abc123");
    }

    #[test]
    fn test_parse_empty_body() {
        let value = parse_body(StatusCode::NO_CONTENT, "").unwrap();
        assert_eq!(value["status"], 204);
    }

    #[test]
    fn test_parse_error_status_keeps_plain_text() {
        let value = parse_body(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").unwrap();
        assert_eq!(value, Value::String("<html>Bad Gateway</html>".into()));
    }

    #[test]
    fn test_parse_success_status_rejects_plain_text() {
        let err = parse_body(StatusCode::OK, "<html>ok</html>").unwrap_err();
        assert!(matches!(err, GitHubError::InvalidBody { status: 200, .. }));
    }
}
