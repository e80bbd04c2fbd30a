use std::fmt::{self, Display};

/// A short message telling the user how something went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// How to present the message
    pub level: Level,

    /// What to say
    pub message: String,
}

impl Notification {
    /// Something worked
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Something failed
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Neither good nor bad, just worth knowing
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A success
    Success,

    /// A failure
    Error,

    /// Anything else
    Info,
}
