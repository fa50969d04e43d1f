//! HTTP client for the congruence service

use async_trait::async_trait;
use cripto_config::RemoteSettings;
use cripto_core::candidate::preview;
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::{CongruenceScorer, Error, Result};

/// How much of a response body is kept in diagnostics.
const BODY_SNIPPET_CHARS: usize = 80;

#[derive(Serialize)]
struct CongruenceRequest<'a> {
    texto: &'a str,
}

pub struct HttpCongruenceScorer {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpCongruenceScorer {
    /// Build a client for `settings.endpoint()`.
    ///
    /// Fails when the endpoint is not an http(s) URL or the HTTP client
    /// cannot be created.
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let raw = settings.endpoint();
        let endpoint = Url::parse(&raw).map_err(|e| Error::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.host_str().is_none() {
            return Err(Error::InvalidEndpoint {
                url: raw,
                reason: "expected an http(s) URL with a host".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn connection_error(&self, e: reqwest::Error) -> Error {
        let local = matches!(self.endpoint.host_str(), Some("localhost") | Some("127.0.0.1"));
        if e.is_connect() && local {
            Error::Connection(format!("{} (is the scorer running at {}?)", e, self.endpoint))
        } else {
            Error::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl CongruenceScorer for HttpCongruenceScorer {
    async fn score(&self, text: &str) -> Result<f64> {
        let response = self.http
            .post(self.endpoint.clone())
            .json(&CongruenceRequest { texto: text })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body, BODY_SNIPPET_CHARS),
            });
        }

        parse_score(&body)
    }
}

/// Extract `puntuacion_congruencia` from a response body.
pub fn parse_score(body: &str) -> Result<f64> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("{}: {}", e, preview(body, BODY_SNIPPET_CHARS))))?;

    value.get("puntuacion_congruencia")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| Error::MissingScore(preview(body, BODY_SNIPPET_CHARS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = "/evaluar_congruencia/";

    fn settings_for(base_url: String) -> RemoteSettings {
        RemoteSettings { base_url, ..RemoteSettings::default() }
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(r#"{"puntuacion_congruencia": 7.5}"#), Ok(7.5));
        assert_eq!(parse_score(r#"{"puntuacion_congruencia": 3, "perplejidad_calculada": 80.1}"#), Ok(3.0));
        assert!(matches!(parse_score(r#"{"puntuacion": 7.5}"#), Err(Error::MissingScore(_))));
        assert!(matches!(parse_score(r#"{"puntuacion_congruencia": "alta"}"#), Err(Error::MissingScore(_))));
        assert!(matches!(parse_score("<html>oops</html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        assert!(matches!(
            HttpCongruenceScorer::new(&settings_for("not a url".into())),
            Err(Error::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            HttpCongruenceScorer::new(&settings_for("ftp://scorer.local".into())),
            Err(Error::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let scorer = HttpCongruenceScorer::new(&settings_for("http://localhost:8000/".into())).unwrap();
        assert_eq!(scorer.endpoint().as_str(), "http://localhost:8000/evaluar_congruencia/");
    }

    #[tokio::test]
    async fn test_score_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"texto": "pero eso esperaba"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"texto_evaluado": "pero eso esperaba", "puntuacion_congruencia": 8.25, "perplejidad_calculada": 41.2}"#)
            .create_async()
            .await;

        let scorer = HttpCongruenceScorer::new(&settings_for(server.url())).unwrap();
        let score = scorer.score("pero eso esperaba").await.unwrap();

        assert_eq!(score, 8.25);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(503)
            .with_body(r#"{"detail": "El modelo de IA no está disponible"}"#)
            .create_async()
            .await;

        let scorer = HttpCongruenceScorer::new(&settings_for(server.url())).unwrap();
        match scorer.score("texto").await {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("detail"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_success_codes_are_failures() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(201)
            .with_body(r#"{"puntuacion_congruencia": 9.0}"#)
            .create_async()
            .await;

        let scorer = HttpCongruenceScorer::new(&settings_for(server.url())).unwrap();
        assert!(matches!(scorer.score("texto").await, Err(Error::Status { status: 201, .. })));
    }

    #[tokio::test]
    async fn test_schema_mismatch() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"score": 9.0}"#)
            .create_async()
            .await;

        let scorer = HttpCongruenceScorer::new(&settings_for(server.url())).unwrap();
        assert!(matches!(scorer.score("texto").await, Err(Error::MissingScore(_))));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Port 1 is reserved and nothing listens there
        let scorer = HttpCongruenceScorer::new(&settings_for("http://127.0.0.1:1".into())).unwrap();
        assert!(matches!(scorer.score("texto").await, Err(Error::Connection(_))));
    }
}
