use thiserror::Error;

use crate::lexer::Token;

/// The single error kind raised by the front end.
///
/// `token` is the offending token when one exists; `context` is the text of the
/// enclosing statement, attached by the statement splitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error: {message}{}", context_suffix(.context))]
pub struct SyntaxError {
    pub message: String,
    pub token: Option<Token>,
    pub context: Option<String>,
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" in statement [{}]", context),
        None => String::new(),
    }
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, token: Option<&Token>) -> Self {
        Self {
            message: message.into(),
            token: token.cloned(),
            context: None,
        }
    }

    pub(crate) fn unexpected_token(expected: &str, found: &Token) -> Self {
        Self::new(
            format!("Expected {} but found [{}].", expected, found),
            Some(found),
        )
    }

    pub(crate) fn invalid_config_value(found: &Token) -> Self {
        Self::new(
            format!(
                "Expected an identifier or literal as the value of a config property, but found [{}].",
                found
            ),
            Some(found),
        )
    }

    /// Index overrun: a required token lies past the end of the statement
    pub(crate) fn missing_tokens(last: Option<&Token>) -> Self {
        let last_text = last.map(|t| t.text.as_str()).unwrap_or("");
        Self::new(
            format!("Expected more tokens after [{}] but found none.", last_text),
            last,
        )
    }

    /// Resource limit violation, not tied to a token
    pub(crate) fn limit(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    /// Attach the statement's token text, keeping any context already present
    pub(crate) fn with_context(mut self, statement: &[Token]) -> Self {
        if self.context.is_none() {
            let text: Vec<&str> = statement.iter().map(|t| t.text.as_str()).collect();
            self.context = Some(text.join(" "));
        }
        self
    }
}
