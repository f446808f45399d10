use indexmap::IndexMap;

use super::helpers::operand;
use super::{Parser, SyntaxError};
use crate::ast::{ConfigExpression, Expression, Identifier};
use crate::lexer::Token;

impl<'a> Parser<'a> {
    /// Try to parse a config expression: name ( key = value , ... )
    ///
    /// Returns `None` without consuming anything when the current token is not an
    /// identifier followed by '('; the caller then treats it as a plain identifier.
    pub(super) fn maybe_parse_config_expression(
        &mut self,
    ) -> Result<Option<ConfigExpression>, SyntaxError> {
        let Some(name_token) = self.current_token() else {
            return Ok(None);
        };
        if !name_token.is_identifier() || !self.peek_token(1).is_some_and(|t| t.is_symbol("(")) {
            return Ok(None);
        }

        self.advance(); // Consume name
        self.advance(); // Consume '('

        let name = Identifier::new(name_token.text.as_str());
        let mut properties = IndexMap::new();

        // Empty property list
        if self.current_is_symbol(")") {
            self.advance();
            return Ok(Some(ConfigExpression { name, properties }));
        }

        loop {
            // 1. Property name
            let key = self.next_config_token("identifier for config property")?;
            if !key.is_identifier() {
                return Err(SyntaxError::unexpected_token(
                    "identifier for config property",
                    key,
                ));
            }

            // 2. '='
            let equals = self.next_config_token("assignment operator [=]")?;
            if !equals.is_operator("=") {
                return Err(SyntaxError::unexpected_token(
                    "assignment operator [=] for assigning to config property",
                    equals,
                ));
            }

            // 3. Value
            let token = self.next_config_token("a config property value")?;
            let Some(value) = operand(token).as_ref().and_then(Expression::as_simple) else {
                return Err(SyntaxError::invalid_config_value(token));
            };

            // Repeated keys keep their first position
            properties.insert(Identifier::new(key.text.as_str()), value);

            // 4. ',' continues, ')' ends
            let separator = self.next_config_token("a property separator [,] or terminator [)]")?;
            if separator.is_symbol(")") {
                break;
            }
            if !separator.is_symbol(",") {
                return Err(SyntaxError::unexpected_token(
                    "a property separator [,] or terminator [)]",
                    separator,
                ));
            }
        }

        Ok(Some(ConfigExpression { name, properties }))
    }

    // Helper: Take the next token of a config expression, reporting exhaustion
    fn next_config_token(&mut self, expected: &str) -> Result<&'a Token, SyntaxError> {
        match self.current_token() {
            Some(token) => {
                self.advance();
                Ok(token)
            }
            None => {
                let last = self.last_token();
                Err(SyntaxError::new(
                    format!(
                        "Expected {} but the config expression ran out of tokens after [{}].",
                        expected,
                        last.map(|t| t.text.as_str()).unwrap_or("")
                    ),
                    last,
                ))
            }
        }
    }
}
