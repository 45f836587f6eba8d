//! Reconstruction of plain message text from the exported representation.

use chatstat_core::{Fragment, Message, MessageText};

/// Flatten a message body into a single string.
///
/// Plain bodies are returned unchanged. Fragment bodies are concatenated in
/// order; an annotated fragment without text contributes nothing. A missing
/// body resolves to the empty string, which callers skip.
pub fn resolve_text(text: Option<&MessageText>) -> String {
    match text {
        None => String::new(),
        Some(MessageText::Plain(text)) => text.clone(),
        Some(MessageText::Fragments(fragments)) => fragments.iter().map(fragment_text).collect(),
    }
}

fn fragment_text(fragment: &Fragment) -> &str {
    match fragment {
        Fragment::Plain(text) => text,
        Fragment::Entity(entity) => entity.text.as_deref().unwrap_or(""),
    }
}

/// A message paired with its resolved text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMessage<'a> {
    /// The source message.
    pub message: &'a Message,
    /// Resolved body, possibly empty.
    pub text: &'a str,
}

/// Resolve every message of a transcript, keeping export order.
pub fn resolve_all(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .map(|message| resolve_text(message.text.as_ref()))
        .collect()
}

/// Pair messages with their resolved text, skipping empty bodies.
pub fn non_empty<'a>(
    messages: &'a [Message],
    resolved: &'a [String],
) -> impl Iterator<Item = ResolvedMessage<'a>> + 'a {
    messages
        .iter()
        .zip(resolved.iter())
        .filter(|(_, text)| !text.is_empty())
        .map(|(message, text)| ResolvedMessage {
            message,
            text: text.as_str(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatstat_core::EntityFragment;

    #[test]
    fn plain_text_is_returned_unchanged() {
        for text in ["Are you coming?", "", "  spaced  ", "سلام؟"] {
            let body = MessageText::from(text);
            assert_eq!(resolve_text(Some(&body)), text);
        }
    }

    #[test]
    fn fragments_concatenate_in_order() {
        let body = MessageText::Fragments(vec![
            Fragment::from("Read "),
            Fragment::entity("link", "https://example.org"),
            Fragment::from(" and "),
            Fragment::entity("bold", "reply"),
        ]);
        assert_eq!(
            resolve_text(Some(&body)),
            "Read https://example.org and reply"
        );
    }

    #[test]
    fn entity_without_text_contributes_nothing() {
        let body = MessageText::Fragments(vec![
            Fragment::from("a"),
            Fragment::Entity(EntityFragment {
                kind: Some("custom_emoji".to_string()),
                text: None,
            }),
            Fragment::from("b"),
        ]);
        assert_eq!(resolve_text(Some(&body)), "ab");
    }

    #[test]
    fn missing_body_resolves_empty() {
        assert_eq!(resolve_text(None), "");
        assert_eq!(resolve_text(Some(&MessageText::Fragments(vec![]))), "");
    }

    #[test]
    fn resolving_is_idempotent() {
        let body = MessageText::Fragments(vec![Fragment::from("x"), Fragment::entity("code", "y")]);
        let once = resolve_text(Some(&body));
        let twice = resolve_text(Some(&MessageText::Plain(once.clone())));
        assert_eq!(once, twice);
    }

    #[test]
    fn non_empty_skips_blank_bodies() {
        let messages = vec![
            Message::new(1, "A", "hi"),
            Message {
                id: Some(2),
                author: Some("B".to_string()),
                text: None,
                reply_to_id: None,
            },
            Message::new(3, "C", ""),
        ];
        let resolved = resolve_all(&messages);
        let ids: Vec<Option<i64>> = non_empty(&messages, &resolved)
            .map(|resolved| resolved.message.id)
            .collect();
        assert_eq!(ids, vec![Some(1)]);
    }
}
