//! Source-to-AST front end for the flow language: named data-flow pipelines
//! joined by `->`, typed imports and exports, map-based pattern dispatch and
//! inline configuration calls.
//!
//! ```
//! use flow_lang::ast::{Expression, Identifier, Statement};
//!
//! let statements = flow_lang::parse("import f : Foo ; export x = f -> g ;").unwrap();
//! assert_eq!(statements.len(), 2);
//! match &statements[1] {
//!     Statement::ExportFlow(assignment) => {
//!         assert_eq!(assignment.name, Identifier::new("x"));
//!         assert!(matches!(assignment.value, Expression::Flow(_)));
//!     }
//!     other => panic!("unexpected statement {:?}", other),
//! }
//! ```

pub mod ast;
pub mod lexer;
pub mod limits;
pub mod parser;

pub use ast::Statement;
pub use limits::ParserLimits;
pub use parser::SyntaxError;

/// Parse flow language source into its statements, with default limits.
pub fn parse(source: &str) -> Result<Vec<Statement>, SyntaxError> {
    parse_with_limits(source, &ParserLimits::default())
}

/// Parse flow language source into its statements.
pub fn parse_with_limits(
    source: &str,
    limits: &ParserLimits,
) -> Result<Vec<Statement>, SyntaxError> {
    let tokens = lexer::lex(source, limits)?;
    parser::parse_statements(&tokens, limits)
}
