use tracing::trace;

use super::helpers::operand;
use super::{Parser, SyntaxError};
use crate::ast::{Expression, FlowExpression};
use crate::lexer::Token;

// Flow expression parsing
impl<'a> Parser<'a> {
    /// Parse a flow expression: step [-> step]*
    ///
    /// Stops at the end of the statement or at the first token satisfying `stop`,
    /// which is left unconsumed. `->` only separates steps and never appears in
    /// the result. A single step is returned as itself.
    pub(super) fn parse_flow_expression<F>(
        &mut self,
        depth: usize,
        stop: F,
    ) -> Result<Expression, SyntaxError>
    where
        F: Fn(&Token) -> bool,
    {
        self.check_depth(depth)?;

        let mut parts: Vec<Expression> = Vec::new();

        while let Some(token) = self.current_token() {
            if stop(token) {
                break;
            }

            if token.is_operator("->") {
                self.advance(); // Consume '->'
                match self.current_token() {
                    Some(next) if !stop(next) => {}
                    _ => {
                        return Err(SyntaxError::new(
                            "The [->] operator must be followed by a flow expression, but none was found.",
                            Some(token),
                        ));
                    }
                }
            } else if token.is_symbol("{") {
                let map = self.parse_map_expression(depth + 1)?;
                trace!(entries = map.entries.len(), "flow part: map");
                parts.push(Expression::Map(map));
            } else if let Some(config) = self.maybe_parse_config_expression()? {
                trace!(name = %config.name.name, "flow part: config");
                parts.push(Expression::Config(config));
            } else if let Some(part) = operand(token) {
                self.advance();
                trace!(text = %token.text, "flow part: operand");
                parts.push(part);
            } else {
                return Err(SyntaxError::unexpected_token(
                    "[->] or a flow expression",
                    token,
                ));
            }
        }

        match parts.len() {
            0 => Err(match self.current_token() {
                Some(token) => SyntaxError::unexpected_token("a flow expression", token),
                None => SyntaxError::missing_tokens(self.last_token()),
            }),
            1 => Ok(parts.remove(0)),
            _ => Ok(Expression::Flow(FlowExpression { parts })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{parse_error, to_ast, to_ast_string};
    use crate::ast::{Expression, FlowExpression, Identifier, Statement};

    fn value_of(source: &str) -> Expression {
        match to_ast(source).unwrap().remove(0) {
            Statement::Assignment(assignment) => assignment.value,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_flow_chain_order() {
        assert_eq!(
            value_of("x = a -> b -> c ;"),
            Expression::Flow(FlowExpression {
                parts: vec![
                    Identifier::new("a").into(),
                    Identifier::new("b").into(),
                    Identifier::new("c").into(),
                ],
            })
        );
    }

    #[test]
    fn test_single_literal_is_not_wrapped() {
        let ast = to_ast_string("x = 3.5 ;").unwrap();
        let expected = "\
Program
  Assignment
    Identifier 'x'
    Literal '3.5'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_mixed_parts() {
        let ast = to_ast_string("x = read -> 10 -> { 1 : a } -> write ( mode = fast ) ;").unwrap();
        let expected = "\
Program
  Assignment
    Identifier 'x'
    FlowExpression
      Identifier 'read'
      Literal '10'
      MapExpression
        MapEntry
          Literal '1'
          Identifier 'a'
      ConfigExpression
        Identifier 'write'
        Property
          Identifier 'mode'
          Identifier 'fast'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_adjacent_steps_without_arrow() {
        // '->' is a pure separator, so juxtaposed steps still sequence
        let ast = to_ast_string("x = a b ;").unwrap();
        let expected = "\
Program
  Assignment
    Identifier 'x'
    FlowExpression
      Identifier 'a'
      Identifier 'b'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_dangling_arrow() {
        let err = parse_error("x = a -> ;");
        assert_eq!(
            err.message,
            "The [->] operator must be followed by a flow expression, but none was found."
        );

        let err = parse_error("x = { 1 : a -> } ;");
        assert_eq!(
            err.message,
            "The [->] operator must be followed by a flow expression, but none was found."
        );
    }

    #[test]
    fn test_unexpected_token_in_flow() {
        let err = parse_error("x = a -> true ;");
        assert_eq!(
            err.message,
            "Expected [->] or a flow expression but found [true]."
        );

        let err = parse_error("x = a } ;");
        assert_eq!(err.message, "Expected [->] or a flow expression but found [}].");
    }

    #[test]
    fn test_mistokenized_punctuation_becomes_identifier() {
        let ast = to_ast_string("x = f(x=1) ;").unwrap();
        let expected = "\
Program
  Assignment
    Identifier 'x'
    Identifier 'f(x=1)'
";
        assert_eq!(ast, expected);
    }
}
