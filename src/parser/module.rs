use super::{Parser, SyntaxError};
use crate::ast::Statement;

impl<'a> Parser<'a> {
    /// Parse import statement: import name : Type  or  import name : Input -> Output
    pub(super) fn parse_import_stmt(&mut self, depth: usize) -> Result<Statement, SyntaxError> {
        self.check_depth(depth)?;

        let len = self.end - self.current;
        if len != 4 && len != 6 {
            return Err(SyntaxError::new(
                format!(
                    "Expected [import <name> : <Type>] or [import <name> : <Input> -> <Output>] but found {} tokens.",
                    len
                ),
                self.current_token(),
            ));
        }

        // Consume 'import' keyword
        self.advance();

        let name = self.consume_identifier("identifier for the imported flow")?;
        self.consume_symbol(":", "[:] after the imported name")?;
        let ty = self.parse_type_annotation()?;

        // Six tokens with no '->' leave a trailing token behind
        if let Some(token) = self.current_token() {
            return Err(SyntaxError::unexpected_token(
                "[->] between input and output types",
                token,
            ));
        }

        Ok(Statement::ImportIdentifier { name, ty })
    }

    /// Parse export statement: export assignment
    pub(super) fn parse_export_flow_stmt(
        &mut self,
        depth: usize,
    ) -> Result<Statement, SyntaxError> {
        self.check_depth(depth)?;

        // Consume 'export' keyword
        self.advance();
        self.expect_token()?;

        let assignment = self.parse_assignment(depth + 1)?;
        Ok(Statement::ExportFlow(assignment))
    }
}
