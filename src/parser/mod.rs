// Parser module - splits parser into logical components
mod config;
mod error;
mod flow;
mod helpers;
mod map;
mod module;
mod statements;
mod types;

// Public exports
pub use error::SyntaxError;

use tracing::debug;

use crate::ast::Statement;
use crate::lexer::Token;
use crate::limits::ParserLimits;

// Parser structure
//
// The cursor never leaves the current statement run `[start, end)`; every
// lookup past `end` reports a missing token instead of reading the next
// statement.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    start: usize,
    end: usize,
    limits: &'a ParserLimits,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], limits: &'a ParserLimits) -> Self {
        Self {
            tokens,
            current: 0,
            start: 0,
            end: 0,
            limits,
        }
    }

    // Main parsing entry point
    pub fn parse(mut self) -> Result<Vec<Statement>, SyntaxError> {
        let statements = self.parse_statements()?;
        debug!(
            tokens = self.tokens.len(),
            statements = statements.len(),
            "parsed statements"
        );
        Ok(statements)
    }
}

// Public API function
pub fn parse_statements(
    tokens: &[Token],
    limits: &ParserLimits,
) -> Result<Vec<Statement>, SyntaxError> {
    Parser::new(tokens, limits).parse()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ast::render;
    use crate::lexer::tokenize;

    pub(crate) fn to_ast(source: &str) -> Result<Vec<Statement>, SyntaxError> {
        let limits = ParserLimits::default();
        parse_statements(&tokenize(source), &limits)
    }

    pub(crate) fn to_ast_string(source: &str) -> Result<String, SyntaxError> {
        Ok(render(&to_ast(source)?))
    }

    pub(crate) fn parse_error(source: &str) -> SyntaxError {
        match to_ast(source) {
            Ok(statements) => panic!("expected a syntax error, parsed {:?}", statements),
            Err(err) => err,
        }
    }
}
