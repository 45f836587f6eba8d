use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// An exported chat transcript.
///
/// Decoding is lenient below the top level: a `messages` entry that is not an
/// object is dropped, and a message field with an unexpected shape decodes as
/// absent. Only a missing or non-array `messages` key fails the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Chat or group name, when the export carries one.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Messages in export order.
    #[serde(deserialize_with = "lenient_messages")]
    pub messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript from an ordered list of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            name: None,
            messages,
        }
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A single chat message.
///
/// Each field is decoded on its own. `author` falls back to `from`, and
/// `reply_to_id` falls back to `reply_to_message_id`, when the primary key is
/// missing or unusable; exports carrying both keys keep the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    /// Message id, unique within the transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name of the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<MessageText>,

    /// Id of the message this one replies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<i64>,
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(fields) => Ok(Message {
                id: first_field(&fields, &["id"]),
                author: first_field(&fields, &["author", "from"]),
                text: first_field(&fields, &["text"]),
                reply_to_id: first_field(&fields, &["reply_to_id", "reply_to_message_id"]),
            }),
            other => Err(D::Error::custom(format!(
                "expected message object, got {}",
                value_kind(&other)
            ))),
        }
    }
}

impl Message {
    /// Create a plain-text message.
    pub fn new(id: i64, author: impl Into<String>, text: impl Into<MessageText>) -> Self {
        Self {
            id: Some(id),
            author: Some(author.into()),
            text: Some(text.into()),
            reply_to_id: None,
        }
    }

    /// Mark this message as a reply to `target`.
    pub fn replying_to(mut self, target: i64) -> Self {
        self.reply_to_id = Some(target);
        self
    }
}

/// Message body as exported: either a plain string or an ordered list of
/// fragments mixing plain strings and annotated entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageText {
    /// Plain string body.
    Plain(String),

    /// Rich body made of ordered fragments.
    Fragments(Vec<Fragment>),
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        MessageText::Plain(text.to_string())
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        MessageText::Plain(text)
    }
}

impl From<Vec<Fragment>> for MessageText {
    fn from(fragments: Vec<Fragment>) -> Self {
        MessageText::Fragments(fragments)
    }
}

impl<'de> Deserialize<'de> for MessageText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(MessageText::Plain(text)),
            // A fragment of unknown shape is dropped, the rest of the body survives.
            Value::Array(items) => Ok(MessageText::Fragments(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            )),
            other => Err(D::Error::custom(format!(
                "unsupported message text: {}",
                value_kind(&other)
            ))),
        }
    }
}

/// One unit of a rich message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    /// Unannotated text.
    Plain(String),

    /// Annotated text such as a link, mention, or formatting run.
    Entity(EntityFragment),
}

impl Fragment {
    /// Create an annotated fragment.
    pub fn entity(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Fragment::Entity(EntityFragment {
            kind: Some(kind.into()),
            text: Some(text.into()),
        })
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Plain(text.to_string())
    }
}

/// Annotated fragment record. The annotation kind is carried but never used
/// for text reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFragment {
    /// Annotation kind (`link`, `bold`, `mention`, ...).
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// Annotated text, if present.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// First of `keys` whose value decodes as `T`.
fn first_field<T: DeserializeOwned>(fields: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|value| T::deserialize(value).ok())
}

fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    let total = raw.len();
    let messages: Vec<Message> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("skipping malformed message at position {}: {}", position, e);
                None
            }
        })
        .collect();
    if messages.len() < total {
        debug!("dropped {} of {} messages", total - messages.len(), total);
    }
    Ok(messages)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
