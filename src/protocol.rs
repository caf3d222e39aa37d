//! Messages exchanged between the editing surface and its host.
//!
//! On the wire a message is a JSON object
//! `{"version": .., "type": .., "content": .., "metadata": ..}`. Inside the
//! crate it is an [`EditorMessage`] whose [`MessageBody`] is keyed on the
//! type. Raw payloads only become typed messages through
//! [`EditorMessage::from_value`], which applies the same checks as
//! [`validate`].

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ProtocolError;

/// The closed set of message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Load,
    Save,
    Update,
    Error,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Load => "load",
            MessageType::Save => "save",
            MessageType::Update => "update",
            MessageType::Error => "error",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(MessageType::Load),
            "save" => Ok(MessageType::Save),
            "update" => Ok(MessageType::Update),
            "error" => Ok(MessageType::Error),
            other => Err(ProtocolError::UnknownType(other.to_string())),
        }
    }
}

/// Payload of a message, one variant per type.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// Host to surface: full source text to parse and show.
    Load { source: String },
    /// Surface to host: serialized text to persist.
    Save { markdown: String },
    /// Surface to host: snapshot of the in-memory state, not persisted.
    Update { snapshot: String },
    /// Either direction: human readable diagnostic.
    Error { diagnostic: String },
}

impl MessageBody {
    pub fn message_type(&self) -> MessageType {
        match self {
            MessageBody::Load { .. } => MessageType::Load,
            MessageBody::Save { .. } => MessageType::Save,
            MessageBody::Update { .. } => MessageType::Update,
            MessageBody::Error { .. } => MessageType::Error,
        }
    }

    /// The `content` string carried on the wire.
    pub fn content(&self) -> &str {
        match self {
            MessageBody::Load { source } => source,
            MessageBody::Save { markdown } => markdown,
            MessageBody::Update { snapshot } => snapshot,
            MessageBody::Error { diagnostic } => diagnostic,
        }
    }

    fn from_parts(message_type: MessageType, content: String) -> Self {
        match message_type {
            MessageType::Load => MessageBody::Load { source: content },
            MessageType::Save => MessageBody::Save { markdown: content },
            MessageType::Update => MessageBody::Update { snapshot: content },
            MessageType::Error => MessageBody::Error {
                diagnostic: content,
            },
        }
    }
}

/// A message that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorMessage {
    pub version: String,
    pub body: MessageBody,
    /// Opaque, never inspected.
    pub metadata: Option<Value>,
}

impl EditorMessage {
    pub fn new(version: impl Into<String>, body: MessageBody) -> Self {
        Self {
            version: version.into(),
            body,
            metadata: None,
        }
    }

    pub fn load(version: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(version, MessageBody::Load { source: source.into() })
    }

    pub fn save(version: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self::new(version, MessageBody::Save { markdown: markdown.into() })
    }

    pub fn update(version: impl Into<String>, snapshot: impl Into<String>) -> Self {
        Self::new(version, MessageBody::Update { snapshot: snapshot.into() })
    }

    pub fn error(version: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::new(
            version,
            MessageBody::Error {
                diagnostic: diagnostic.into(),
            },
        )
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn message_type(&self) -> MessageType {
        self.body.message_type()
    }

    /// Check a raw payload and promote it to a typed message.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut fields) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let version = take_string(&mut fields, "version")?;
        let message_type = match fields.get("type") {
            None => return Err(ProtocolError::MissingField("type")),
            Some(Value::String(name)) => name.parse::<MessageType>()?,
            Some(other) => return Err(ProtocolError::UnknownType(other.to_string())),
        };
        let content = take_string(&mut fields, "content")?;
        let metadata = fields.remove("metadata");

        Ok(Self {
            version,
            body: MessageBody::from_parts(message_type, content),
            metadata,
        })
    }

    /// Wire form of the message.
    pub fn to_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), Value::String(self.version.clone()));
        fields.insert(
            "type".into(),
            Value::String(self.message_type().as_str().into()),
        );
        fields.insert(
            "content".into(),
            Value::String(self.body.content().to_string()),
        );
        if let Some(metadata) = &self.metadata {
            fields.insert("metadata".into(), metadata.clone());
        }
        Value::Object(fields)
    }

    /// JSON text of the wire form.
    pub fn encode(&self) -> String {
        self.to_value().to_string()
    }
}

impl TryFrom<Value> for EditorMessage {
    type Error = ProtocolError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        EditorMessage::from_value(value)
    }
}

fn take_string(
    fields: &mut Map<String, Value>,
    key: &'static str,
) -> Result<String, ProtocolError> {
    match fields.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ProtocolError::NotAString(key)),
        None => Err(ProtocolError::MissingField(key)),
    }
}

/// Whether a raw payload is a well-formed message. Never fails.
pub fn validate(candidate: &Value) -> bool {
    check(candidate).is_ok()
}

/// Like [`validate`], but says what was wrong.
pub fn check(candidate: &Value) -> Result<MessageType, ProtocolError> {
    let Value::Object(fields) = candidate else {
        return Err(ProtocolError::NotAnObject);
    };

    match fields.get("version") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(ProtocolError::NotAString("version")),
        None => return Err(ProtocolError::MissingField("version")),
    }
    let message_type = match fields.get("type") {
        Some(Value::String(name)) => name.parse::<MessageType>()?,
        Some(other) => return Err(ProtocolError::UnknownType(other.to_string())),
        None => return Err(ProtocolError::MissingField("type")),
    };
    match fields.get("content") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(ProtocolError::NotAString("content")),
        None => return Err(ProtocolError::MissingField("content")),
    }

    Ok(message_type)
}

/// Parse JSON text and promote it to a typed message.
pub fn decode(text: &str) -> Result<EditorMessage, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;
    EditorMessage::from_value(value)
}
