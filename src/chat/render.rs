use super::dto::{ChatMessage, Role};

/// Entity-encodes `& < > " '` so message text can never smuggle markup into
/// the view.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Bot replies keep their author-intended line structure: newlines become
/// `<br>` only after escaping, so injected tags stay inert text.
pub fn render_message_html(msg: &ChatMessage) -> String {
    match msg.role {
        Role::User => escape_html(&msg.text),
        Role::Bot => escape_html(&msg.text).replace('\n', "<br>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_neutralized() {
        let rendered = escape_html("<b>hi</b>");
        assert!(!rendered.contains('<'));
        assert!(!rendered.contains('>'));
        assert_eq!(rendered, "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn script_payload_is_inert() {
        let rendered = escape_html("<script>alert('x')</script>");
        assert!(!rendered.contains("<script"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn plain_text_is_untouched_and_stable() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html(&escape_html("hello world")), "hello world");
    }

    #[test]
    fn bot_newlines_become_breaks_after_escaping() {
        let msg = ChatMessage::new(Role::Bot, "Hi there\n<b>bye</b>");
        let rendered = render_message_html(&msg);
        assert_eq!(rendered, "Hi there<br>&lt;b&gt;bye&lt;/b&gt;");
    }

    #[test]
    fn user_newlines_are_not_converted() {
        let msg = ChatMessage::new(Role::User, "a\nb");
        assert_eq!(render_message_html(&msg), "a\nb");
    }
}
