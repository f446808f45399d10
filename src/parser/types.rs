use super::{Parser, SyntaxError};
use crate::ast::Type;

// Type annotation parsing
impl<'a> Parser<'a> {
    /// Parse the type after ':' : Name or Input -> Output
    pub(super) fn parse_type_annotation(&mut self) -> Result<Type, SyntaxError> {
        let base = self.consume_identifier("identifier for a type after [:]")?;

        if self.current_is_operator("->") {
            self.advance(); // Consume '->'
            let output =
                self.consume_identifier("an identifier for an output type after [->]")?;
            return Ok(Type::Flow {
                input: base,
                output,
            });
        }

        Ok(Type::Simple(base))
    }
}
