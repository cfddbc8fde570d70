use std::borrow::Cow;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use vocable_config::gateway::GatewayConfig;
use vocable_core::types::TranslationTriple;

/// Appended to oversized input after truncation so the reader can see
/// the text was cut. Deliberate lossy degrade, not an error.
pub const TRUNCATION_MARKER: &str = " ... INPUT TRUNCATED - STOP HERE";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("gateway error: HTTP {status} {reason}")]
    Api { status: StatusCode, reason: String },
}

/// Client for the three text-in/text-or-binary-out gateway endpoints.
/// Stateless; every operation is a single `text/plain` POST.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Extract readable article text from a URL.
    pub async fn extract_text(&self, url: &str) -> Result<String, GatewayError> {
        let response = self
            .post_text(&self.config.extract_url, url.to_string())
            .await?;
        Ok(response.text().await?)
    }

    /// Translate and annotate `text`, returning the raw response body
    /// together with the decoded sentence triples. Input longer than the
    /// translation ceiling is truncated with a visible marker before
    /// sending; a malformed triple payload degrades to an empty sequence.
    pub async fn translate_annotated(
        &self,
        text: &str,
    ) -> Result<(String, Vec<TranslationTriple>), GatewayError> {
        let payload = truncate_with_marker(text, self.config.max_text_length);
        tracing::debug!("translating {} chars", payload.chars().count());

        let response = self
            .post_text(&self.config.translate_url, payload.into_owned())
            .await?;
        let raw = response.text().await?;

        let triples = match decode_triples(&raw) {
            Ok(triples) => triples,
            Err(e) => {
                tracing::error!("failed to decode translation triples: {e}");
                Vec::new()
            }
        };

        Ok((raw, triples))
    }

    /// Synthesize speech for `text`, returning the raw audio payload.
    /// Input is truncated to the audio ceiling the same way as above.
    pub async fn synthesize_audio(&self, text: &str) -> Result<Vec<u8>, GatewayError> {
        let payload = truncate_with_marker(text, self.config.max_audio_text_length);
        let response = self
            .post_text(&self.config.audio_url, payload.into_owned())
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_text(
        &self,
        url: &str,
        body: String,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status,
                reason: reason.trim().to_string(),
            });
        }

        Ok(response)
    }
}

/// Decode the annotate response into an ordered sequence of triples.
pub fn decode_triples(raw: &str) -> Result<Vec<TranslationTriple>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Cap `text` at `max` chars; oversized input is cut so that the result
/// is exactly `max` chars and ends with [`TRUNCATION_MARKER`].
pub fn truncate_with_marker(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }

    let keep = max.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    Cow::Owned(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_passes_through_untouched() {
        let text = "Bonjour tout le monde";
        assert!(matches!(
            truncate_with_marker(text, 4000),
            Cow::Borrowed(t) if t == text
        ));
    }

    #[test]
    fn oversized_input_is_cut_to_the_ceiling_with_marker() {
        let text = "x".repeat(5000);
        let truncated = truncate_with_marker(&text, 4000);

        assert_eq!(truncated.chars().count(), 4000);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text = "é".repeat(200);
        let truncated = truncate_with_marker(&text, 100);

        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn malformed_triple_payload_is_a_decode_error() {
        assert!(decode_triples("not json at all").is_err());
        assert!(decode_triples("{\"ORG\": \"object, not array\"}").is_err());
    }

    #[test]
    fn triples_decode_with_and_without_vocabulary() {
        let raw = r#"[
            {"ORG": "Bonjour.", "TRANSLATED": "Guten Tag.",
             "VOCABULARY": [["bonjour", "guten Tag"]]},
            {"ORG": "Merci.", "TRANSLATED": "Danke."}
        ]"#;

        let triples = decode_triples(raw).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].original, "Bonjour.");
        assert_eq!(
            triples[0].vocabulary,
            vec![("bonjour".to_string(), "guten Tag".to_string())]
        );
        assert!(triples[1].vocabulary.is_empty());
    }
}
