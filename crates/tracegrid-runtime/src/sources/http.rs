use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use tracegrid_engine::{FetchError, RelatedRunsSource};
use tracegrid_types::{Run, parse_runs};

use crate::config::ApiConfig;
use crate::{Error, Result};

/// Related runs from the runs API
///
/// `GET {base}/v1/runs/{id}/related`, or
/// `GET {base}/v1/projects/{project}/runs/{id}/related` when scoped to a
/// project. Ids are percent-encoded as single path segments. The body is a
/// run list, bare or wrapped in `{"data": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpRunsSource {
    client: Client,
    base_url: Url,
    project_id: Option<String>,
    api_key: Option<String>,
}

impl HttpRunsSource {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("api.base_url `{base_url}`: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "api.base_url `{base_url}` cannot carry a path"
            )));
        }

        let timeout = if timeout.is_zero() {
            Duration::from_secs(10)
        } else {
            timeout
        };
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: parsed,
            project_id: None,
            api_key,
        })
    }

    /// Build from `[api]`, reading the key from the configured variable
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let base_url = api
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Config("api.base_url is not set".to_string()))?;
        let api_key = std::env::var(&api.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            tracing::debug!(var = %api.api_key_env, "no API key in environment");
        }

        let mut source = Self::new(base_url, api_key, Duration::from_secs(api.timeout_secs))?;
        source.project_id = api.project_id.clone();
        Ok(source)
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn related_url(&self, run_id: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Bases are checked in `new`, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("v1");
            if let Some(project) = &self.project_id {
                segments.push("projects").push(project);
            }
            segments.push("runs").push(run_id).push("related");
        }
        url
    }
}

impl RelatedRunsSource for HttpRunsSource {
    fn fetch_related(&self, run_id: &str) -> std::result::Result<Vec<Run>, FetchError> {
        let url = self.related_url(run_id);
        tracing::debug!(%url, "fetching related runs");

        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(run_id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        parse_runs(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_url_shapes() -> Result<()> {
        let source = HttpRunsSource::new("https://api.example.test/", None, Duration::ZERO)?;
        assert_eq!(
            source.related_url("r1").as_str(),
            "https://api.example.test/v1/runs/r1/related"
        );

        let scoped = source.with_project("p9");
        assert_eq!(
            scoped.related_url("r1").as_str(),
            "https://api.example.test/v1/projects/p9/runs/r1/related"
        );

        let prefixed = HttpRunsSource::new("https://example.test/api", None, Duration::ZERO)?;
        assert_eq!(
            prefixed.related_url("r1").as_str(),
            "https://example.test/api/v1/runs/r1/related"
        );
        Ok(())
    }

    #[test]
    fn test_reserved_characters_stay_in_one_segment() -> Result<()> {
        let source = HttpRunsSource::new("https://api.example.test", None, Duration::ZERO)?
            .with_project("team/a");
        let url = source.related_url("a/b?x=1#f");

        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(
            url.path(),
            "/v1/projects/team%2Fa/runs/a%2Fb%3Fx=1%23f/related"
        );
        assert_eq!(url.path_segments().map(|s| s.count()), Some(6));
        Ok(())
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpRunsSource::new("not a url", None, Duration::ZERO),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_config_requires_base_url() {
        assert!(matches!(
            HttpRunsSource::from_config(&ApiConfig::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_connection_failure_is_transport_error() -> Result<()> {
        // Port 9 (discard) on localhost is closed in test environments
        let source =
            HttpRunsSource::new("http://127.0.0.1:9", None, Duration::from_millis(500))?;
        assert!(matches!(
            source.fetch_related("r1"),
            Err(FetchError::Transport(_))
        ));
        Ok(())
    }
}
