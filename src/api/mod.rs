//! HTTP client for the optimization service.
//!
//! No retries are performed here; retry policy belongs to the caller.

mod wire;

use crate::model::{Parameters, Preset, RunResult};
use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;
use time::OffsetDateTime;

#[cfg(test)]
pub(crate) use wire::tests::sample_body;

/// Failure of a single service call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Unreachable service or non-success status. For `/generate` the message
    /// is the response body verbatim.
    #[error("{message}")]
    Transport { message: String },
    /// Response did not match the expected schema.
    #[error("unexpected response shape: {0}")]
    Encoding(String),
}

impl ApiError {
    fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = cfg.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).with_context(|| format!("invalid base URL {base}"))?;
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .build()
            .context("build http client")?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::transport(format!("invalid endpoint {path}: {e}")))
    }

    /// `GET /health`; any 2xx counts as reachable.
    pub async fn health(&self) -> Result<(), ApiError> {
        let url = self.endpoint("health")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ApiError::transport(format!(
                "Health check failed: HTTP {}",
                resp.status()
            )));
        }
        Ok(())
    }

    pub async fn list_presets(&self) -> Result<Vec<Preset>, ApiError> {
        let url = self.endpoint("presets")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ApiError::transport(format!(
                "Failed to fetch presets: HTTP {}",
                resp.status()
            )));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Encoding(e.to_string()))
    }

    /// `POST /generate` with `params` as the JSON body.
    pub async fn request_run(&self, params: &Parameters) -> Result<RunResult, ApiError> {
        let url = self.endpoint("generate")?;
        tracing::debug!(?params, "requesting run");
        let resp = self
            .http
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "generate request failed");
                ApiError::transport(e.to_string())
            })?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(%status, "generate returned non-success status");
            return Err(ApiError::transport(body));
        }

        let wire: wire::GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Encoding(e.to_string()))?;
        let result = wire
            .into_run_result(OffsetDateTime::now_utc())
            .map_err(|e| {
                tracing::warn!(error = %e, "generate response failed validation");
                ApiError::Encoding(e)
            })?;
        tracing::debug!(
            assignments = result.assignments.len(),
            fitness = result.evaluation.fitness,
            "run completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            user_agent: "schedule-cli-test".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn lists_presets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/presets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"G": 200, "N": 60, "p_m": 0.2, "k": 3},
                {"G": 500, "N": 120, "p_m": 0.1, "k": 4}
            ])))
            .mount(&server)
            .await;

        let presets = client_for(&server).list_presets().await.unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[1].population_size, 120);
        assert_eq!(presets[1].mutation_rate, 0.1);
    }

    #[tokio::test]
    async fn presets_non_success_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/presets"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).list_presets().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let client = ApiClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            user_agent: "schedule-cli-test".into(),
        })
        .unwrap();
        let err = client.request_run(&Parameters::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn posts_parameters_and_decodes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_json(json!({
                "max_generations": 300,
                "population_size": 80,
                "mutation_rate": 0.25,
                "tournament_size": 4
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let params = Parameters {
            max_generations: 300,
            population_size: 80,
            mutation_rate: 0.25,
            tournament_size: 4,
        };
        let result = client_for(&server).request_run(&params).await.unwrap();
        assert_eq!(result.assignments.len(), 2);
        assert_eq!(result.fitness_history, vec![10.0, 25.0, 25.0, 40.0]);
        assert_eq!(result.assignments[0].labels.class, "TI-1A");
    }

    #[tokio::test]
    async fn non_success_body_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid population_size"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_run(&Parameters::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid population_size");
    }

    #[tokio::test]
    async fn malformed_body_is_encoding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"params": {}})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_run(&Parameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ApiClient::new(&ClientConfig {
            base_url: format!("{}/api", server.uri()),
            timeout: Duration::from_secs(5),
            user_agent: "schedule-cli-test".into(),
        })
        .unwrap();
        assert!(client.health().await.is_ok());
    }
}
