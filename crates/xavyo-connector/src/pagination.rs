//! Host pagination protocol
//!
//! The host hands every list call a [`PageToken`] and expects an opaque
//! continuation string back. Connectors keep their own position inside a
//! [`Bag`], a stack of page states serialized as base64-encoded JSON.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, ConnectorResult};

/// Page request issued by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    /// Requested page size, zero when the host has no preference.
    #[serde(default)]
    pub size: u32,

    /// Continuation returned by the previous call, empty on the first call.
    #[serde(default)]
    pub token: String,
}

impl PageToken {
    /// Create a first-page token with the given size.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            token: String::new(),
        }
    }

    /// Set the continuation.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }
}

/// Position of one traversal inside a [`Bag`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_type_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SerializedBag {
    #[serde(default)]
    states: Vec<PageState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_state: Option<PageState>,
}

/// Stack of page states carried inside an opaque token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bag {
    states: Vec<PageState>,
    current: Option<PageState>,
}

impl Bag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a token produced by [`Bag::marshal`]. An empty token yields an
    /// empty bag.
    pub fn unmarshal(token: &str) -> ConnectorResult<Self> {
        if token.is_empty() {
            return Ok(Self::new());
        }

        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| ConnectorError::invalid_page_token(format!("not base64: {e}")))?;
        let serialized: SerializedBag = serde_json::from_slice(&raw)
            .map_err(|e| ConnectorError::invalid_page_token(format!("malformed state: {e}")))?;

        Ok(Self {
            states: serialized.states,
            current: serialized.current_state,
        })
    }

    /// Encode the bag. Returns an empty string when there is nothing left to
    /// page through.
    pub fn marshal(&self) -> ConnectorResult<String> {
        match &self.current {
            None => return Ok(String::new()),
            Some(current) if current.token.is_empty() && self.states.is_empty() => {
                return Ok(String::new());
            }
            Some(_) => {}
        }

        let serialized = SerializedBag {
            states: self.states.clone(),
            current_state: self.current.clone(),
        };
        let raw = serde_json::to_vec(&serialized).map_err(|e| ConnectorError::Serialization {
            message: e.to_string(),
        })?;

        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Push a new traversal, suspending the current one.
    pub fn push(&mut self, state: PageState) {
        if let Some(current) = self.current.take() {
            self.states.push(current);
        }
        self.current = Some(state);
    }

    /// Drop the current traversal and resume the previous one.
    pub fn pop(&mut self) -> Option<PageState> {
        let popped = self.current.take();
        self.current = self.states.pop();
        popped
    }

    /// Replace the current page token. An empty token finishes the current
    /// traversal.
    pub fn next(&mut self, token: impl Into<String>) -> ConnectorResult<()> {
        let token = token.into();
        if self.current.is_none() {
            return Err(ConnectorError::invalid_page_token(
                "no traversal in progress",
            ));
        }

        if token.is_empty() {
            self.pop();
        } else if let Some(current) = self.current.as_mut() {
            current.token = token;
        }
        Ok(())
    }

    /// The current traversal, if any.
    pub fn current(&self) -> Option<&PageState> {
        self.current.as_ref()
    }

    /// Page token of the current traversal, empty when none.
    pub fn page_token(&self) -> &str {
        self.current.as_ref().map_or("", |s| s.token.as_str())
    }
}

/// One page of results returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,

    /// Continuation for the next call, empty when done.
    #[serde(default)]
    pub next_token: String,
}

impl<T> ListPage<T> {
    /// A final page.
    pub fn done(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: String::new(),
        }
    }

    /// A page followed by `next_token`.
    pub fn with_next(items: Vec<T>, next_token: String) -> Self {
        Self { items, next_token }
    }

    /// An empty final page.
    pub fn empty() -> Self {
        Self::done(Vec::new())
    }

    /// Whether the host should call again.
    pub fn has_more(&self) -> bool {
        !self.next_token.is_empty()
    }
}
