use super::helpers::operand;
use super::{Parser, SyntaxError};
use crate::ast::{Expression, MapExpression, MatchableExpression};

// Map expression and pattern key parsing
impl<'a> Parser<'a> {
    /// Parse map expression: { key : flow , key : flow , ... }
    pub(super) fn parse_map_expression(&mut self, depth: usize) -> Result<MapExpression, SyntaxError> {
        self.check_depth(depth)?;

        self.consume_symbol("{", "the start of a map expression [{]")?;

        let mut entries = Vec::new();

        // Empty map
        if self.current_is_symbol("}") {
            self.advance();
            return Ok(MapExpression { entries });
        }

        loop {
            // 1. Pattern key
            let key = self.parse_map_expression_key(depth + 1)?;

            // 2. Consume ':'
            self.consume_symbol(":", "[:] after a map key")?;

            // 3. Value flow ends at ',' or '}'
            let value = self.parse_flow_expression(depth + 1, |t| {
                t.is_symbol(",") || t.is_symbol("}")
            })?;
            entries.push((key, value));

            // 4. Separator or end of map
            let separator = self.expect_token()?;
            self.advance();
            if separator.is_symbol("}") {
                break;
            }
        }

        Ok(MapExpression { entries })
    }

    /// Parse a map key pattern: literal, identifier, or Name ( pattern , ... )
    ///
    /// The token after a bare identifier is only peeked, never consumed.
    pub(super) fn parse_map_expression_key(
        &mut self,
        depth: usize,
    ) -> Result<MatchableExpression, SyntaxError> {
        self.check_depth(depth)?;

        let first = self.expect_token()?;

        let Some(key) = operand(first).as_ref().and_then(Expression::as_matchable) else {
            return Err(SyntaxError::unexpected_token(
                "a literal or identifier to start a pattern-matching expression",
                first,
            ));
        };
        self.advance();

        let MatchableExpression::Identifier(name) = key else {
            return Ok(key);
        };

        if !self.current_is_symbol("(") {
            return Ok(MatchableExpression::Identifier(name));
        }

        // Constructor pattern
        self.advance(); // Consume '('
        let mut args = Vec::new();

        if self.current_is_symbol(")") {
            self.advance();
            return Ok(MatchableExpression::ConstructorPattern { name, args });
        }

        loop {
            args.push(self.parse_map_expression_key(depth + 1)?);

            let separator = self.expect_token()?;
            if separator.is_symbol(",") {
                self.advance();
            } else if separator.is_symbol(")") {
                self.advance();
                break;
            } else {
                return Err(SyntaxError::unexpected_token(
                    "a pattern separator [,] or terminator [)]",
                    separator,
                ));
            }
        }

        Ok(MatchableExpression::ConstructorPattern { name, args })
    }
}
