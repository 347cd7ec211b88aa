//! Assistant chat: wire types and the local transcript.
//!
//! The assistant runs on the listing backend; this side only keeps the
//! transcript and builds requests with a bounded history window.

use serde::{Deserialize, Serialize};

/// Messages of prior turns sent with each request (3 exchanges).
pub const HISTORY_WINDOW: usize = 6;

/// Reply shown when the chat request fails.
pub const CONNECTION_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

const DEFAULTS_JSON: &str = include_str!("../../config/suggested-questions.json");

#[derive(Deserialize)]
struct ChatDefaults {
    greeting: String,
    questions: Vec<String>,
}

fn defaults() -> ChatDefaults {
    // Validated by build.rs.
    serde_json::from_str(DEFAULTS_JSON).unwrap_or_else(|e| {
        log::error!("Bundled chat defaults are invalid: {}", e);
        ChatDefaults {
            greeting: String::new(),
            questions: vec![],
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Unix time in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One transcript message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(now_millis()),
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: Option<i64>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(timestamp.unwrap_or_else(now_millis)),
        }
    }

    /// Local time "HH:MM" for display, when the message has a timestamp.
    pub fn time_label(&self) -> Option<String> {
        use chrono::{Local, TimeZone};
        let ms = self.timestamp?;
        Local
            .timestamp_millis_opt(ms)
            .single()
            .map(|d| d.format("%H:%M").to_string())
    }
}

/// Body of `POST /api/chatbot/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
    pub conversation_history: Vec<ChatMessage>,
    pub include_property_context: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub suggested_questions: Option<Vec<String>>,
    #[serde(default)]
    pub related_property_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub context_used: Option<String>,
}

/// Client-side transcript and suggestion state for the chat panel.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    suggestions: Vec<String>,
    in_flight: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Transcript seeded with the greeting and default suggested questions.
    pub fn new() -> Self {
        let d = defaults();
        let messages = if d.greeting.is_empty() {
            vec![]
        } else {
            vec![ChatMessage::assistant(d.greeting, None)]
        };
        Self {
            messages,
            suggestions: d.questions,
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight
    }

    /// Record the user's message and build the request for it.
    ///
    /// Returns `None` for blank input or while a previous request is pending.
    /// History holds the last [`HISTORY_WINDOW`] messages *before* this one.
    pub fn begin_send(&mut self, input: &str, property_ids: &[i64]) -> Option<ChatRequest> {
        let content = input.trim();
        if content.is_empty() || self.in_flight {
            return None;
        }
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        let conversation_history = self.messages[start..].to_vec();
        let msg = ChatMessage::user(content);
        let request = ChatRequest {
            role: Role::User,
            content: msg.content.clone(),
            timestamp: msg.timestamp.unwrap_or_else(now_millis),
            conversation_history,
            include_property_context: true,
            property_ids: if property_ids.is_empty() {
                None
            } else {
                Some(property_ids.to_vec())
            },
        };
        self.messages.push(msg);
        self.in_flight = true;
        Some(request)
    }

    /// Apply the outcome of the pending request.
    pub fn finish(&mut self, result: Result<ChatResponse, String>) {
        self.in_flight = false;
        match result {
            Ok(resp) => {
                self.messages
                    .push(ChatMessage::assistant(resp.message, resp.timestamp));
                if let Some(qs) = resp.suggested_questions
                    && !qs.is_empty()
                {
                    self.suggestions = qs;
                }
            }
            Err(e) => {
                log::warn!("Chat request failed: {}", e);
                self.messages
                    .push(ChatMessage::assistant(CONNECTION_APOLOGY, None));
            }
        }
    }

    /// Drop the pending flag after a user cancel, noting it in the transcript.
    pub fn cancel(&mut self) {
        if self.in_flight {
            self.in_flight = false;
            self.messages
                .push(ChatMessage::assistant("(Request cancelled)", None));
        }
    }
}
