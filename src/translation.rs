use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

/// Public endpoint of the keyless Google Translate API
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// A translation request. Doubles as the response cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRequest {
    pub source_lang: String,
    pub target_lang: String,
    pub query: String,
}

impl TranslationRequest {
    pub fn new(source_lang: &str, target_lang: &str, query: &str) -> Self {
        Self {
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            query: query.to_string(),
        }
    }
}

/// Response body of `translate_a/single` with `dj=1`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslateResponse {
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub trans: String,
    #[serde(default)]
    pub orig: String,
    #[serde(default)]
    pub backend: Option<i64>,
}

impl TranslateResponse {
    /// The translated text: every sentence's `trans`, in order.
    pub fn text(&self) -> String {
        self.sentences.iter().map(|s| s.trans.as_str()).collect()
    }
}

/// Failure talking to the translation backend.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Failed to send translation request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse translation response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Translation task did not finish: {0}")]
    Task(String),
}

/// Something that can translate a request.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslateResponse, TranslateError>;
}

/// Client for the Google `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslateClient {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Default for GoogleTranslateClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), GOOGLE_TRANSLATE_URL)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslateResponse, TranslateError> {
        info!(
            "Querying translation API ({} -> {})",
            request.source_lang, request.target_lang
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("dj", "1"),
                ("sl", request.source_lang.as_str()),
                ("tl", request.target_lang.as_str()),
                ("q", request.query.as_str()),
            ])
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Status { status, body });
        }

        // Read as text first so a malformed body surfaces as a decode error
        let body = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&body)?;
        debug!("Translation API returned {} sentences", parsed.sentences.len());

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_google_response(parts: &[&str]) -> serde_json::Value {
        let sentences: Vec<_> = parts
            .iter()
            .map(|trans| {
                serde_json::json!({
                    "trans": trans,
                    "orig": "original",
                    "backend": 10
                })
            })
            .collect();
        serde_json::json!({ "sentences": sentences, "src": "en" })
    }

    fn client_for(server: &MockServer) -> GoogleTranslateClient {
        GoogleTranslateClient::new(
            reqwest::Client::new(),
            format!("{}/translate_a/single", server.uri()),
        )
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_response_text_concatenates_sentences() {
        let response: TranslateResponse =
            serde_json::from_value(create_google_response(&["Bonjour. ", "Comment ça va ?"]))
                .unwrap();
        assert_eq!(response.text(), "Bonjour. Comment ça va ?");
    }

    #[test]
    fn test_response_tolerates_sentences_without_trans() {
        let response: TranslateResponse = serde_json::from_value(serde_json::json!({
            "sentences": [{"trans": "Hallo", "orig": "Hello"}, {"src_translit": "x"}]
        }))
        .unwrap();
        assert_eq!(response.text(), "Hallo");
        assert_eq!(response.sentences[0].backend, None);
    }

    #[test]
    fn test_response_empty_sentences() {
        let response: TranslateResponse =
            serde_json::from_value(serde_json::json!({ "sentences": [] })).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_default_client_points_at_google() {
        assert_eq!(GoogleTranslateClient::default().api_url(), GOOGLE_TRANSLATE_URL);
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_sends_expected_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("dt", "t"))
            .and(query_param("dj", "1"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "fr"))
            .and(query_param("q", "good morning & more"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_google_response(&["bonjour"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = TranslationRequest::new("en", "fr", "good morning & more");
        let response = client_for(&mock_server)
            .translate(&request)
            .await
            .expect("Should succeed");

        assert_eq!(response.text(), "bonjour");
    }

    #[tokio::test]
    async fn test_translate_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = TranslationRequest::new("auto", "de", "hello");
        let err = client_for(&mock_server)
            .translate(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Status { .. }));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_translate_unexpected_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
            )
            .mount(&mock_server)
            .await;

        let request = TranslationRequest::new("auto", "de", "hello");
        let err = client_for(&mock_server)
            .translate(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Decode(_)));
    }

    #[tokio::test]
    async fn test_translate_connection_refused() {
        // Grab a free port, then close it so the connection is refused
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            GoogleTranslateClient::new(reqwest::Client::new(), format!("http://{}/x", addr));
        let request = TranslationRequest::new("auto", "de", "hello");

        let err = client.translate(&request).await.unwrap_err();
        assert!(matches!(err, TranslateError::Http(_)));
    }
}
