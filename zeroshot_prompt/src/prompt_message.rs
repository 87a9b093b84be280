use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
///
/// Serialized in lowercase so a message maps directly onto the OpenAI chat format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMessageType {
    /// Instructions that frame the task. Always the first message.
    System,

    /// The task input.
    User,
}

impl PromptMessageType {
    pub fn as_str(&self) -> &str {
        match self {
            PromptMessageType::System => "system",
            PromptMessageType::User => "user",
        }
    }
}

/// An individual message within a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    #[serde(rename = "role")]
    pub message_type: PromptMessageType,
    pub content: String,
}

impl PromptMessage {
    pub fn new<T: Into<String>>(message_type: PromptMessageType, content: T) -> Self {
        Self {
            message_type,
            content: content.into(),
        }
    }

    pub fn system<T: Into<String>>(content: T) -> Self {
        Self::new(PromptMessageType::System, content)
    }

    pub fn user<T: Into<String>>(content: T) -> Self {
        Self::new(PromptMessageType::User, content)
    }
}

impl std::fmt::Display for PromptMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.message_type.as_str())?;
        write!(f, "{}", self.content)
    }
}

/// The exact two-turn exchange sent to the completion service: a system message, then a user
/// message.
///
/// The ordering is fixed by construction. Serializes as the `messages` array of a chat
/// completion request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: [PromptMessage; 2],
}

impl Conversation {
    pub fn new<S: Into<String>, U: Into<String>>(system: S, user: U) -> Self {
        Self {
            messages: [PromptMessage::system(system), PromptMessage::user(user)],
        }
    }

    pub fn system(&self) -> &PromptMessage {
        &self.messages[0]
    }

    pub fn user(&self) -> &PromptMessage {
        &self.messages[1]
    }

    pub fn system_content(&self) -> &str {
        &self.messages[0].content
    }

    pub fn user_content(&self) -> &str {
        &self.messages[1].content
    }

    pub fn messages(&self) -> &[PromptMessage] {
        &self.messages
    }
}

impl std::fmt::Display for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for message in &self.messages {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}
