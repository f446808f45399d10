use indexmap::IndexMap;
use serde::Serialize;

// Leaf nodes

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Numeric literal, kept as its source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Literal {
    pub text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// Statements

/// Top-level statement, one per `;`-terminated run of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Empty,
    ImportIdentifier { name: Identifier, ty: Type },
    ExportFlow(Assignment),
    Assignment(Assignment),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Empty => "Empty",
            Statement::ImportIdentifier { .. } => "ImportIdentifier",
            Statement::ExportFlow(_) => "ExportFlow",
            Statement::Assignment(_) => "Assignment",
        }
    }
}

/// `name [: Type] = value`. The declared type is syntactic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub name: Identifier,
    pub declared_type: Option<Type>,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    Simple(Identifier),
    Flow { input: Identifier, output: Identifier },
}

// Expressions

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    Flow(FlowExpression),
    Map(MapExpression),
    Config(ConfigExpression),
}

/// Pipeline steps in execution order. Always holds two or more parts; a single
/// step is never wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowExpression {
    pub parts: Vec<Expression>,
}

/// Pattern dispatch block. Entries keep source order and duplicate keys are
/// kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapExpression {
    pub entries: Vec<(MatchableExpression, Expression)>,
}

/// Configured component reference: `name ( key = value , ... )`.
/// A repeated key keeps its first position and takes the latest value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigExpression {
    pub name: Identifier,
    pub properties: IndexMap<Identifier, SimpleExpression>,
}

/// Map-key pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatchableExpression {
    Literal(Literal),
    Identifier(Identifier),
    ConstructorPattern {
        name: Identifier,
        args: Vec<MatchableExpression>,
    },
}

/// Config property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimpleExpression {
    Identifier(Identifier),
    Literal(Literal),
}

// Role conversions: every matchable and simple expression is also an expression

impl From<Identifier> for Expression {
    fn from(id: Identifier) -> Self {
        Expression::Identifier(id)
    }
}

impl From<Literal> for Expression {
    fn from(lit: Literal) -> Self {
        Expression::Literal(lit)
    }
}

impl From<SimpleExpression> for Expression {
    fn from(expr: SimpleExpression) -> Self {
        match expr {
            SimpleExpression::Identifier(id) => Expression::Identifier(id),
            SimpleExpression::Literal(lit) => Expression::Literal(lit),
        }
    }
}

impl Expression {
    /// The expression as a map-key pattern, if it can play that role
    pub fn as_matchable(&self) -> Option<MatchableExpression> {
        match self {
            Expression::Identifier(id) => Some(MatchableExpression::Identifier(id.clone())),
            Expression::Literal(lit) => Some(MatchableExpression::Literal(lit.clone())),
            _ => None,
        }
    }

    /// The expression as a config property value, if it can play that role
    pub fn as_simple(&self) -> Option<SimpleExpression> {
        match self {
            Expression::Identifier(id) => Some(SimpleExpression::Identifier(id.clone())),
            Expression::Literal(lit) => Some(SimpleExpression::Literal(lit.clone())),
            _ => None,
        }
    }
}

// Tree rendering

/// Render statements as an indented tree, one node per line, under a
/// `Program` root.
pub fn render(statements: &[Statement]) -> String {
    let mut out = String::from("Program\n");
    for statement in statements {
        write_statement(&mut out, statement, 1);
    }
    out
}

fn write_line(out: &mut String, depth: usize, label: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(label);
    out.push('\n');
}

fn write_statement(out: &mut String, statement: &Statement, depth: usize) {
    match statement {
        Statement::Empty => write_line(out, depth, statement.kind()),
        Statement::ImportIdentifier { name, ty } => {
            write_line(out, depth, statement.kind());
            write_identifier(out, name, depth + 1);
            write_type(out, ty, depth + 1);
        }
        Statement::ExportFlow(assignment) => {
            write_line(out, depth, statement.kind());
            write_assignment(out, assignment, depth + 1);
        }
        Statement::Assignment(assignment) => write_assignment(out, assignment, depth),
    }
}

fn write_assignment(out: &mut String, assignment: &Assignment, depth: usize) {
    write_line(out, depth, "Assignment");
    write_identifier(out, &assignment.name, depth + 1);
    if let Some(ty) = &assignment.declared_type {
        write_type(out, ty, depth + 1);
    }
    write_expression(out, &assignment.value, depth + 1);
}

fn write_type(out: &mut String, ty: &Type, depth: usize) {
    match ty {
        Type::Simple(name) => {
            write_line(out, depth, "SimpleType");
            write_identifier(out, name, depth + 1);
        }
        Type::Flow { input, output } => {
            write_line(out, depth, "FlowType");
            write_identifier(out, input, depth + 1);
            write_identifier(out, output, depth + 1);
        }
    }
}

fn write_identifier(out: &mut String, id: &Identifier, depth: usize) {
    write_line(out, depth, &format!("Identifier '{}'", id.name));
}

fn write_literal(out: &mut String, lit: &Literal, depth: usize) {
    write_line(out, depth, &format!("Literal '{}'", lit.text));
}

fn write_expression(out: &mut String, expr: &Expression, depth: usize) {
    match expr {
        Expression::Identifier(id) => write_identifier(out, id, depth),
        Expression::Literal(lit) => write_literal(out, lit, depth),
        Expression::Flow(flow) => {
            write_line(out, depth, "FlowExpression");
            for part in &flow.parts {
                write_expression(out, part, depth + 1);
            }
        }
        Expression::Map(map) => {
            write_line(out, depth, "MapExpression");
            for (key, value) in &map.entries {
                write_line(out, depth + 1, "MapEntry");
                write_matchable(out, key, depth + 2);
                write_expression(out, value, depth + 2);
            }
        }
        Expression::Config(config) => {
            write_line(out, depth, "ConfigExpression");
            write_identifier(out, &config.name, depth + 1);
            for (key, value) in &config.properties {
                write_line(out, depth + 1, "Property");
                write_identifier(out, key, depth + 2);
                write_simple(out, value, depth + 2);
            }
        }
    }
}

fn write_simple(out: &mut String, expr: &SimpleExpression, depth: usize) {
    match expr {
        SimpleExpression::Identifier(id) => write_identifier(out, id, depth),
        SimpleExpression::Literal(lit) => write_literal(out, lit, depth),
    }
}

fn write_matchable(out: &mut String, pattern: &MatchableExpression, depth: usize) {
    match pattern {
        MatchableExpression::Literal(lit) => write_literal(out, lit, depth),
        MatchableExpression::Identifier(id) => write_identifier(out, id, depth),
        MatchableExpression::ConstructorPattern { name, args } => {
            write_line(out, depth, "ConstructorPattern");
            write_identifier(out, name, depth + 1);
            for arg in args {
                write_matchable(out, arg, depth + 1);
            }
        }
    }
}
