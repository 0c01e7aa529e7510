//! # Help Responder
//!
//! Handles the `help` keyword.
//! Displays the main help text to the user.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::traits::Responder;
use crate::domain::types::RequestContext;

pub struct HelpResponder;

#[async_trait]
impl Responder for HelpResponder {
    fn key(&self) -> &str {
        "help"
    }

    fn is_complex(&self) -> bool {
        false
    }

    async fn respond(&self, _ctx: &RequestContext) -> Result<Option<String>> {
        Ok(Some(crate::strings::help::MAIN.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ParsedRequest;

    #[tokio::test]
    async fn test_help_returns_static_text() {
        let ctx = RequestContext::new("@alice", ParsedRequest::simple("help"));
        let reply = HelpResponder.respond(&ctx).await.unwrap().unwrap();
        assert!(reply.contains("'weather'"));
        assert!(reply.contains("'note add [your note]'"));
        assert!(reply.contains("'translate [lang code] [sentence]'"));
    }
}
