//! Interprets raw completion text into structured artifacts.
//!
//! Two grammar-light parsers live here: the spec-stage reply (delimited
//! conversation block + delimited JSON block) and the bare-JSON replies of
//! the later stages. No match means `StageError::Parse`; the pipeline turns
//! that into a fallback substitution.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::StageError;
use crate::prompt::{CONVERSATION_CLOSE, CONVERSATION_OPEN, SPEC_CLOSE, SPEC_OPEN};
use crate::wire::{BusinessSpec, Message, Role};

/// Milliseconds between synthetic message timestamps.
const MESSAGE_SPACING_MS: i64 = 1500;

/// Parsed spec-stage reply. A usable conversation is mandatory; the embedded
/// spec JSON falls back on its own when absent or malformed, so the real
/// conversation is never discarded over a bad spec object.
#[derive(Debug)]
pub struct SpecReply {
    pub conversation: Vec<Message>,
    pub spec: Option<BusinessSpec>,
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `**[Role]**:` message headers. The regex crate has no lookahead, so
    // message bodies are sliced between consecutive header positions instead.
    RE.get_or_init(|| Regex::new(r"\*\*\[([^\]]*)\]\*\*:").expect("invalid header pattern"))
}

fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = start + text[start..].find(close)?;
    Some(&text[start..end])
}

/// Scan a conversation block for `**[Role]**: content` entries. Headers with
/// a role outside the closed speaker set are not messages. Timestamps start
/// at `started_ms` and advance by a fixed spacing per message.
pub fn parse_conversation(block: &str, started_ms: i64) -> Vec<Message> {
    let headers: Vec<_> = header_regex().captures_iter(block).collect();
    let spans: Vec<_> = header_regex().find_iter(block).collect();

    let mut messages = Vec::new();
    for (i, caps) in headers.iter().enumerate() {
        let role = match Role::from_str(&caps[1]) {
            Ok(r) => r,
            Err(()) => continue,
        };
        let body_start = spans[i].end();
        let body_end = spans.get(i + 1).map(|m| m.start()).unwrap_or(block.len());
        messages.push(Message {
            role,
            content: block[body_start..body_end].trim().to_string(),
            timestamp: started_ms + (messages.len() as i64) * MESSAGE_SPACING_MS,
        });
    }
    messages
}

/// Parse the full spec-stage reply. Zero conversation messages fails the
/// stage; a bad or missing spec block only fails the spec object.
pub fn parse_spec_reply(text: &str, started_ms: i64) -> Result<SpecReply, StageError> {
    let block = between(text, CONVERSATION_OPEN, CONVERSATION_CLOSE)
        .ok_or_else(|| StageError::Parse("no conversation block found".to_string()))?;

    let conversation = parse_conversation(block, started_ms);
    if conversation.is_empty() {
        return Err(StageError::Parse(
            "conversation block contained no messages".to_string(),
        ));
    }

    let spec = between(text, SPEC_OPEN, SPEC_CLOSE)
        .and_then(|raw| serde_json::from_str::<BusinessSpec>(raw.trim()).ok());

    Ok(SpecReply { conversation, spec })
}

/// The substring from the first `{` to the last `}` in the text, if any.
/// Greedy on purpose: later-stage replies contain exactly one object, and
/// prose around it must not break extraction.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse a later-stage reply (landing / pitch / marketing) as its artifact
/// type. Absence of any `{...}` substring or a syntax error fails the stage.
pub fn parse_stage_json<T: DeserializeOwned>(text: &str) -> Result<T, StageError> {
    let raw = extract_json_object(text)
        .ok_or_else(|| StageError::Parse("no JSON object found in response".to_string()))?;
    serde_json::from_str(raw).map_err(|e| StageError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::LandingPage;

    #[test]
    fn parses_three_messages_with_spaced_timestamps() {
        let block = "\n**[CEO]**: First take. \n**[Engineer]**:   Second take.\n**[CFO]**: Third take.\n";
        let msgs = parse_conversation(block, 10_000);
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0].content, "First take.");
        assert_eq!(msgs[1].content, "Second take.");
        assert_eq!(msgs[2].content, "Third take.");
        assert_eq!(msgs[0].timestamp, 10_000);
        assert_eq!(msgs[1].timestamp, 11_500);
        assert_eq!(msgs[2].timestamp, 13_000);
    }

    #[test]
    fn unknown_roles_are_skipped() {
        let block = "**[Intern]**: not a speaker\n**[CEO]**: real message";
        let msgs = parse_conversation(block, 0);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, Role::Ceo);
        assert_eq!(msgs[0].timestamp, 0);
    }

    #[test]
    fn reply_without_messages_is_a_stage_failure() {
        let text = "<conversation>\njust prose, no headers\n</conversation>";
        assert!(matches!(
            parse_spec_reply(text, 0),
            Err(StageError::Parse(_))
        ));
    }

    #[test]
    fn reply_without_conversation_block_is_a_stage_failure() {
        assert!(parse_spec_reply("no markers here", 0).is_err());
    }

    #[test]
    fn bad_spec_json_keeps_the_conversation() {
        let text = "<conversation>**[CEO]**: hello</conversation>\n<master_spec>{not json}</master_spec>";
        let reply = parse_spec_reply(text, 0).unwrap();
        assert_eq!(reply.conversation.len(), 1);
        assert!(reply.spec.is_none());
    }

    #[test]
    fn valid_spec_json_is_parsed() {
        let spec_json = serde_json::to_string(&crate::fallback::business_spec("test idea")).unwrap();
        let text = format!(
            "<conversation>**[CEO]**: hi</conversation>\n<master_spec>\n{spec_json}\n</master_spec>"
        );
        let reply = parse_spec_reply(&text, 0).unwrap();
        assert!(reply.spec.is_some());
    }

    #[test]
    fn json_extraction_ignores_surrounding_prose() {
        let page = crate::fallback::landing_page("test idea");
        let body = serde_json::to_string(&page).unwrap();
        let text = format!("Here is the landing page you asked for:\n\n{body}\n\nLet me know!");
        let parsed: LandingPage = parse_stage_json(&text).unwrap();
        assert_eq!(parsed.hero.headline, page.hero.headline);
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let text = "Sure! {\"hero\": {\"headline\": }";
        assert!(parse_stage_json::<LandingPage>(text).is_err());
    }

    #[test]
    fn no_braces_is_a_parse_failure() {
        assert!(extract_json_object("no json here").is_none());
        assert!(parse_stage_json::<LandingPage>("no json here").is_err());
    }
}
