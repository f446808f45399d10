use super::error::SyntaxError;
use crate::ast::{Expression, Identifier, Literal};
use crate::lexer::Token;

/// Helper: An identifier or literal token as a single-token expression
pub(super) fn operand(token: &Token) -> Option<Expression> {
    if token.is_identifier() {
        Some(Identifier::new(token.text.as_str()).into())
    } else if token.is_literal() {
        Some(Literal::new(token.text.as_str()).into())
    } else {
        None
    }
}

// Parser helper methods
impl<'a> super::Parser<'a> {
    // Helper: Check recursion depth limit
    pub(super) fn check_depth(&self, depth: usize) -> Result<(), SyntaxError> {
        if depth >= self.limits.max_nesting_depth {
            return Err(SyntaxError::new(
                format!(
                    "Parsing nesting too deep: {} levels (max {}). Consider simplifying.",
                    depth, self.limits.max_nesting_depth
                ),
                self.current_token().or(self.last_token()),
            ));
        }
        Ok(())
    }

    /// Helper: Advance to the next token, never past the statement end
    pub(super) fn advance(&mut self) {
        self.current = (self.current + 1).min(self.end);
    }

    /// Helper: Current token, or `None` at the end of the statement
    pub(super) fn current_token(&self) -> Option<&'a Token> {
        self.peek_token(0)
    }

    /// Helper: Token `n` positions ahead, bounded by the statement end
    pub(super) fn peek_token(&self, n: usize) -> Option<&'a Token> {
        let index = self.current + n;
        if index < self.end {
            self.tokens.get(index)
        } else {
            None
        }
    }

    /// Helper: Last token of the current statement
    pub(super) fn last_token(&self) -> Option<&'a Token> {
        if self.end > self.start {
            self.tokens.get(self.end - 1)
        } else {
            None
        }
    }

    pub(super) fn current_is_symbol(&self, symbol: &str) -> bool {
        self.current_token().is_some_and(|t| t.is_symbol(symbol))
    }

    pub(super) fn current_is_operator(&self, operator: &str) -> bool {
        self.current_token().is_some_and(|t| t.is_operator(operator))
    }

    /// Helper: Require a current token, failing with a missing-token error
    pub(super) fn expect_token(&self) -> Result<&'a Token, SyntaxError> {
        self.current_token()
            .ok_or_else(|| SyntaxError::missing_tokens(self.last_token()))
    }

    /// Helper: Consume a specific symbol or error
    pub(super) fn consume_symbol(&mut self, symbol: &str, expected: &str) -> Result<(), SyntaxError> {
        let token = self.expect_token()?;
        if !token.is_symbol(symbol) {
            return Err(SyntaxError::unexpected_token(expected, token));
        }
        self.advance();
        Ok(())
    }

    /// Helper: Consume a specific operator or error
    pub(super) fn consume_operator(
        &mut self,
        operator: &str,
        expected: &str,
    ) -> Result<(), SyntaxError> {
        let token = self.expect_token()?;
        if !token.is_operator(operator) {
            return Err(SyntaxError::unexpected_token(expected, token));
        }
        self.advance();
        Ok(())
    }

    /// Helper: Consume an identifier token or error
    pub(super) fn consume_identifier(&mut self, expected: &str) -> Result<Identifier, SyntaxError> {
        let token = self.expect_token()?;
        if !token.is_identifier() {
            return Err(SyntaxError::unexpected_token(expected, token));
        }
        self.advance();
        Ok(Identifier::new(token.text.as_str()))
    }
}
