use tracing::trace;

use super::{Parser, SyntaxError};
use crate::ast::{Assignment, Statement};

// Recursive statement parsing methods
impl<'a> Parser<'a> {
    /// Parse all statements; each is the run of tokens before the next `;`
    pub(super) fn parse_statements(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();

        while self.current < self.tokens.len() {
            let start = self.current;
            let end = self.tokens[start..]
                .iter()
                .position(|t| t.is_symbol(";"))
                .map(|offset| start + offset);

            let Some(end) = end else {
                let run = &self.tokens[start..];
                let last = run.last();
                return Err(SyntaxError::new(
                    format!(
                        "Expected [;] to terminate statement but ran out of tokens after [{}].",
                        last.map(|t| t.text.as_str()).unwrap_or("")
                    ),
                    last,
                )
                .with_context(run));
            };

            self.start = start;
            self.end = end;

            let statement = self
                .parse_statement(0)
                .map_err(|err| err.with_context(&self.tokens[start..end]))?;
            trace!(kind = statement.kind(), tokens = end - start, "parsed statement");
            statements.push(statement);

            // Skip past the ';'
            self.current = end + 1;
        }

        Ok(statements)
    }

    /// Parse a single statement run, classified by its first token
    pub(super) fn parse_statement(&mut self, depth: usize) -> Result<Statement, SyntaxError> {
        self.check_depth(depth)?;

        let Some(first) = self.current_token() else {
            return Ok(Statement::Empty);
        };

        if first.is_keyword("import") {
            self.parse_import_stmt(depth + 1)
        } else if first.is_keyword("export") {
            self.parse_export_flow_stmt(depth + 1)
        } else if first.is_identifier() {
            Ok(Statement::Assignment(self.parse_assignment(depth + 1)?))
        } else {
            Err(SyntaxError::unexpected_token(
                "identifier for assignment",
                first,
            ))
        }
    }

    /// Parse an assignment: name [: Type [-> Type]] = flow
    pub(super) fn parse_assignment(&mut self, depth: usize) -> Result<Assignment, SyntaxError> {
        self.check_depth(depth)?;

        // 1. Assigned name
        let name = self.consume_identifier("identifier for assignment")?;

        // 2. Optional declared type
        let token = self.expect_token()?;
        let declared_type = if token.is_symbol(":") {
            self.advance();
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        // 3. Expect '='
        self.consume_operator("=", "assignment operator [=]")?;

        // 4. Value runs to the end of the statement
        self.expect_token()?;
        let value = self.parse_flow_expression(depth + 1, |_| false)?;

        Ok(Assignment {
            name,
            declared_type,
            value,
        })
    }
}
