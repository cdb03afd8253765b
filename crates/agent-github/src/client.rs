//! GitHub contents API client

use crate::config::GitHubConfig;
use crate::error::{GitHubError, Result};
use crate::store::{ContentStore, PutFileRequest, RemoteFile};
use crate::types::{FileTarget, WriteOutcome};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const API_VERSION: &str = "2022-11-28";

/// Client for the repository contents endpoints
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    #[serde(default)]
    content: Option<PutContent>,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    #[serde(default)]
    sha: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Create a new client from configuration
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        let api_base = Url::parse(&config.api_base)
            .map_err(|e| GitHubError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_base,
            token: config.token.clone(),
        })
    }

    /// Build `{api_base}/repos/{owner}/{repo}/contents/{path}`
    fn contents_url(&self, target: &FileTarget) -> Result<Url> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                GitHubError::Config(format!("API base URL cannot be a base: {}", self.api_base))
            })?;
            segments.pop_if_empty().extend([
                "repos",
                target.owner.as_str(),
                target.repo.as_str(),
                "contents",
            ]);
            segments.extend(target.path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ContentStore for GitHubClient {
    async fn get_file(&self, target: &FileTarget) -> Result<RemoteFile> {
        let url = self.contents_url(target)?;
        debug!(%url, "Fetching file contents");

        let response = self.authorize(self.client.get(url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(target.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        if body.is_array() {
            return Err(GitHubError::InvalidContent(format!(
                "{target} is a directory"
            )));
        }

        let file: ContentsResponse = serde_json::from_value(body)?;
        if file.encoding.as_deref() == Some("none") {
            return Err(GitHubError::InvalidContent(format!(
                "{target} is too large to be returned inline"
            )));
        }

        let content = decode_content(file.content.as_deref().unwrap_or_default())?;
        Ok(RemoteFile {
            content,
            sha: file.sha,
        })
    }

    async fn put_file(&self, target: &FileTarget, request: PutFileRequest) -> Result<WriteOutcome> {
        let url = self.contents_url(target)?;
        debug!(
            %url,
            bytes = request.content.len(),
            update = request.sha.is_some(),
            "Writing file contents"
        );

        let body = PutBody {
            message: &request.message,
            content: STANDARD.encode(request.content.as_bytes()),
            sha: request.sha.as_deref(),
        };

        let response = self.authorize(self.client.put(url)).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(match api_error(response).await {
                GitHubError::Api { status, message } if is_conflict(status, &message) => {
                    GitHubError::Conflict {
                        path: target.path.clone(),
                        reason: message,
                    }
                }
                other => other,
            });
        }

        let body: PutResponse = response.json().await?;
        let content = body.content.unwrap_or(PutContent {
            sha: None,
            html_url: None,
        });

        Ok(WriteOutcome {
            url: content.html_url,
            revision_token: content.sha,
            created: status == StatusCode::CREATED,
        })
    }
}

/// Decode a base64 contents payload; GitHub wraps it at 60 columns
fn decode_content(encoded: &str) -> Result<String> {
    let cleaned: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|e| GitHubError::InvalidContent(format!("Invalid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GitHubError::InvalidContent(format!("File is not UTF-8: {e}")))
}

/// A stale or missing SHA comes back as 409, or as 422 naming the sha
fn is_conflict(status: u16, message: &str) -> bool {
    status == StatusCode::CONFLICT.as_u16()
        || (status == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
            && message.to_lowercase().contains("sha"))
}

async fn api_error(response: Response) -> GitHubError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    GitHubError::Api {
        status: status.as_u16(),
        message,
    }
}
