//! # Request Parsing
//!
//! Splits a raw message into keyword, action and detail, then applies the arity rules of the
//! matched responder:
//! - simple responders accept the bare keyword only;
//! - complex responders need `keyword action detail...` with a declared action.

use std::fmt;
use std::sync::Arc;

use crate::application::registry::ResponderRegistry;
use crate::domain::traits::Responder;
use crate::domain::types::ParsedRequest;

/// Why a message did not reach any responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// Nothing but whitespace.
    Empty,
    /// First token is not a registered keyword.
    UnknownKeyword,
    /// Simple responder given more than the keyword.
    SimpleArity,
    /// Complex responder given fewer than three tokens.
    ComplexArity,
    /// Action token not in the responder's declared set.
    UnknownAction,
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NoMatchReason::Empty => "empty message",
            NoMatchReason::UnknownKeyword => "unknown keyword",
            NoMatchReason::SimpleArity => "simple keyword followed by extra tokens",
            NoMatchReason::ComplexArity => "missing action or detail",
            NoMatchReason::UnknownAction => "unknown action",
        };
        f.write_str(text)
    }
}

/// Tokenizes `text` and resolves it against the registry.
pub fn parse_request(
    registry: &ResponderRegistry,
    text: &str,
) -> Result<(Arc<dyn Responder>, ParsedRequest), NoMatchReason> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(keyword) = tokens.first() else {
        return Err(NoMatchReason::Empty);
    };

    let responder = registry
        .lookup(keyword)
        .ok_or(NoMatchReason::UnknownKeyword)?;

    if !responder.is_complex() {
        if tokens.len() != 1 {
            return Err(NoMatchReason::SimpleArity);
        }
        return Ok((responder.clone(), ParsedRequest::simple(*keyword)));
    }

    // `keyword action` alone is ambiguous and never dispatched.
    if tokens.len() < 3 {
        return Err(NoMatchReason::ComplexArity);
    }

    let action = tokens[1];
    if !responder.actions().iter().any(|a| *a == action) {
        return Err(NoMatchReason::UnknownAction);
    }

    let detail = tokens[2..].join(" ");
    Ok((
        responder.clone(),
        ParsedRequest::complex(*keyword, action, detail),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RequestContext;
    use anyhow::Result;
    use async_trait::async_trait;

    struct Fixed {
        key: &'static str,
        actions: &'static [&'static str],
    }

    #[async_trait]
    impl Responder for Fixed {
        fn key(&self) -> &str {
            self.key
        }
        fn is_complex(&self) -> bool {
            !self.actions.is_empty()
        }
        fn actions(&self) -> &[&str] {
            self.actions
        }
        async fn respond(&self, _ctx: &RequestContext) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn registry() -> ResponderRegistry {
        ResponderRegistry::from_responders([
            Arc::new(Fixed {
                key: "weather",
                actions: &[],
            }) as Arc<dyn Responder>,
            Arc::new(Fixed {
                key: "note",
                actions: &["add", "show", "del", "update"],
            }) as Arc<dyn Responder>,
        ])
        .unwrap()
    }

    fn parse(text: &str) -> Result<ParsedRequest, NoMatchReason> {
        parse_request(&registry(), text).map(|(_, parsed)| parsed)
    }

    #[test]
    fn test_simple_keyword() {
        assert_eq!(parse("weather"), Ok(ParsedRequest::simple("weather")));
        assert_eq!(parse("  weather \n"), Ok(ParsedRequest::simple("weather")));
    }

    #[test]
    fn test_simple_keyword_with_extra_tokens() {
        assert_eq!(parse("weather extra tokens"), Err(NoMatchReason::SimpleArity));
    }

    #[test]
    fn test_complex_request_rejoins_detail() {
        assert_eq!(
            parse("note add buy   milk\tand eggs"),
            Ok(ParsedRequest::complex("note", "add", "buy milk and eggs"))
        );
        assert_eq!(
            parse("note update 1 new text"),
            Ok(ParsedRequest::complex("note", "update", "1 new text"))
        );
    }

    #[test]
    fn test_complex_arity() {
        assert_eq!(parse("note"), Err(NoMatchReason::ComplexArity));
        assert_eq!(parse("note add"), Err(NoMatchReason::ComplexArity));
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(parse("note remove 1"), Err(NoMatchReason::UnknownAction));
    }

    #[test]
    fn test_unknown_keyword_and_empty() {
        assert_eq!(parse("unknownword foo bar"), Err(NoMatchReason::UnknownKeyword));
        assert_eq!(parse("Weather"), Err(NoMatchReason::UnknownKeyword));
        assert_eq!(parse("   "), Err(NoMatchReason::Empty));
    }
}
