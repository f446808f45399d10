use std::fmt;
use std::iter::Filter;
use std::str::Split;

use serde::Serialize;
use tracing::debug;

use crate::limits::ParserLimits;
use crate::parser::SyntaxError;

// Token vocabulary

const KEYWORDS: [&str; 7] = ["export", "import", "as", "type", "true", "false", "default"];
const SYMBOLS: [&str; 9] = [";", ",", ":", "{", "}", "(", ")", "<", ">"];
const OPERATORS: [&str; 2] = ["->", "="];

// First code point of each block of ten Unicode decimal digits (general category Nd)
const DIGIT_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

type Fragments<'a> = Filter<Split<'a, fn(char) -> bool>, fn(&&str) -> bool>;

// Token types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Operator,
    Identifier,
    NumericLiteral,
}

/// A classified lexeme carrying its exact source text.
///
/// Tokens compare by kind and text. Identifiers and literals are never interned,
/// every occurrence in the source yields its own value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == text
    }

    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == text
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_literal(&self) -> bool {
        self.kind == TokenKind::NumericLiteral
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Lexer

/// Splits source on runs of whitespace and classifies each fragment.
///
/// Whitespace is the ASCII set: space, `\t`, `\n`, `\x0B`, `\x0C` and `\r`.
/// Other Unicode spaces such as U+00A0 belong to the fragment they sit in.
/// Punctuation is only recognized when surrounded by whitespace: `a:Foo` is a
/// single identifier token, not three tokens.
pub struct Lexer<'a> {
    fragments: Fragments<'a>,
    limits: &'a ParserLimits,
    token_count: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, limits: &'a ParserLimits) -> Result<Self, SyntaxError> {
        // Check input size limit
        if source.len() > limits.max_input_size {
            return Err(SyntaxError::limit(format!(
                "Input too large: {} bytes (max: {} bytes).",
                source.len(),
                limits.max_input_size
            )));
        }

        Ok(Self {
            fragments: fragments(source),
            limits,
            token_count: 0,
        })
    }

    /// Returns the next token, or `None` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        let Some(fragment) = self.fragments.next() else {
            return Ok(None);
        };

        if self.token_count >= self.limits.max_token_count {
            return Err(SyntaxError::limit(format!(
                "Token limit exceeded: more than {} tokens. File is too complex.",
                self.limits.max_token_count
            )));
        }

        self.token_count += 1;
        Ok(Some(classify(fragment)))
    }
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

fn is_fragment(fragment: &&str) -> bool {
    !fragment.is_empty()
}

fn fragments(source: &str) -> Fragments<'_> {
    source
        .split(is_separator as fn(char) -> bool)
        .filter(is_fragment as fn(&&str) -> bool)
}

/// Classify a whitespace-free fragment.
/// Priority: keyword, symbol, operator, numeric literal, identifier.
fn classify(fragment: &str) -> Token {
    let kind = if KEYWORDS.contains(&fragment) {
        TokenKind::Keyword
    } else if SYMBOLS.contains(&fragment) {
        TokenKind::Symbol
    } else if OPERATORS.contains(&fragment) {
        TokenKind::Operator
    } else if is_number_literal(fragment) {
        TokenKind::NumericLiteral
    } else {
        TokenKind::Identifier
    };
    Token::new(kind, fragment)
}

// Any Unicode decimal digit, not only ASCII '0'..='9'
fn is_decimal_digit(c: char) -> bool {
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .any(|&zero| (zero..zero + 10).contains(&code))
}

// Decimal digits with at most one '.'
fn is_number_literal(fragment: &str) -> bool {
    let mut seen_dot = false;
    for c in fragment.chars() {
        if c == '.' {
            if seen_dot {
                return false;
            }
            seen_dot = true;
        } else if !is_decimal_digit(c) {
            return false;
        }
    }
    true
}

// Public API

/// Tokenize source without resource limits.
pub fn tokenize(source: &str) -> Vec<Token> {
    fragments(source).map(classify).collect()
}

/// Tokenize source, enforcing input size and token count limits.
pub fn lex(source: &str, limits: &ParserLimits) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(source, limits)?;
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    debug!(bytes = source.len(), tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

// Tests
