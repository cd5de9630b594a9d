use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One transcript entry. Immutable once appended; the widget owns the only
/// copy and nothing is persisted client-side.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Local time-of-day label captured at creation, e.g. "02:35 PM".
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        ChatMessage {
            role,
            text: text.into(),
            timestamp: clock_label(),
        }
    }
}

fn clock_label() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = match time::format_description::parse("[hour repr:12 padding:zero]:[minute] [period]") {
        Ok(f) => f,
        Err(e) => {
            log::warn!("Invalid clock format description: {:?}", e);
            return String::new();
        }
    };
    now.format(&format).unwrap_or_else(|e| {
        log::warn!("Clock format failed: {:?}", e);
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_a_twelve_hour_clock_label() {
        let m = ChatMessage::new(Role::User, "hi");
        // "hh:mm AM" / "hh:mm PM"
        assert_eq!(m.timestamp.len(), 8);
        assert_eq!(&m.timestamp[2..3], ":");
        assert!(m.timestamp.ends_with("AM") || m.timestamp.ends_with("PM"));
    }
}
