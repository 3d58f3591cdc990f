use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::{Address, AoToken};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Application-originated message.
///
/// Only `to` is required by the client; the server applies its own routing
/// and validation rules to the rest.
pub struct AoMessage {
    pub from: Option<Address>,
    pub to: Address,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub token: Option<AoToken>,
    /// Custom message attributes forwarded as extra fields.
    pub custom: BTreeMap<String, String>,
}

impl AoMessage {
    pub fn new(to: Address) -> Self {
        Self {
            from: None,
            to,
            subject: None,
            body: None,
            token: None,
            custom: BTreeMap::new(),
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn token(mut self, token: AoToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn custom(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
/// Payload for `send_ao`: a single message (form-encoded) or a batch (JSON array).
pub enum SendAo {
    One(AoMessage),
    Many(AoBatch),
}

#[derive(Debug, Clone)]
/// Non-empty list of AO messages. Built through [`SendAo::many`].
pub struct AoBatch {
    messages: Vec<AoMessage>,
}

impl SendAo {
    pub fn one(message: AoMessage) -> Self {
        Self::One(message)
    }

    /// Create a batch. Rejects an empty list.
    pub fn many(messages: Vec<AoMessage>) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        Ok(Self::Many(AoBatch { messages }))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(batch) => batch.messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AoBatch {
    pub fn messages(&self) -> &[AoMessage] {
        &self.messages
    }
}
