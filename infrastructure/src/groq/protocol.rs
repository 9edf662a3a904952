//! Wire types for the OpenAI-compatible chat completions API.
//!
//! - **Request**: `{model, messages: [{role, content}], max_tokens}`
//! - **Response**: `{choices: [{message: {content}}], ...}`; only the first
//!   choice's content is read, everything else is ignored.
//!
//! Parsing is strict about the one path it needs: a response that does not
//! carry a string at `choices[0].message.content` is rejected instead of
//! being turned into an empty answer.

use askline_application::CompletionError;
use askline_domain::util::truncate_str;
use serde::{Deserialize, Serialize};

/// Longest body excerpt quoted in error messages
const MAX_EXCERPT: usize = 200;

/// Chat completions request body
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 1],
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// A request carrying one user message
    pub fn single_user_message(model: &'a str, content: &'a str, max_tokens: u32) -> Self {
        Self {
            model,
            messages: [ChatMessage {
                role: "user",
                content,
            }],
            max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Chat completions response body (only the fields that are read)
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Error envelope some providers return alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the first choice's message text from a response body.
pub fn parse_completion_response(body: &str) -> Result<String, CompletionError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        CompletionError::MalformedResponse(format!(
            "{} (body: {})",
            e,
            truncate_str(body, MAX_EXCERPT)
        ))
    })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".to_string()))?;

    choice.message.content.ok_or_else(|| {
        CompletionError::MalformedResponse("first choice has no message content".to_string())
    })
}

/// Human-readable detail for a non-success response body.
///
/// Prefers the provider's `error.message`, falls back to a raw excerpt.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => truncate_str(body.trim(), MAX_EXCERPT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest::single_user_message("llama", "2+2=", 1024);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama",
                "messages": [{"role": "user", "content": "2+2="}],
                "max_tokens": 1024
            })
        );
    }

    #[test]
    fn test_parse_text_response() {
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "model": "llama-3.3-70b-versatile",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "4" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 1 }
        })
        .to_string();
        assert_eq!(parse_completion_response(&body).unwrap(), "4");
    }

    #[test]
    fn test_parse_uses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"a"}},{"message":{"content":"b"}}]}"#;
        assert_eq!(parse_completion_response(body).unwrap(), "a");
    }

    #[test]
    fn test_parse_empty_choices() {
        let err = parse_completion_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(matches!(
            parse_completion_response(body),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_missing_choices_field() {
        assert!(matches!(
            parse_completion_response(r#"{"object": "chat.completion"}"#),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(
            parse_completion_response("<html>Bad Gateway</html>"),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_error_detail_prefers_provider_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(error_detail(body), "Invalid API Key");
        assert_eq!(error_detail("  upstream down \n"), "upstream down");
    }
}
