//! Lexer (tokenizer) for the toy language
//!
//! Converts raw source text into classified [`Token`]s on demand. The parser
//! pulls one token at a time with [`Lexer::fetch`] and may hand the most recent
//! one back with [`Lexer::push_back`]; there is a single pushback slot.
//!
//! Unrecognized characters are not lexer failures: they come out as
//! [`TokenKind::Error`] tokens and the parser rejects them like any other
//! unexpected token.

use crate::constants::MAX_TOKEN_LENGTH;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Closed set of token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,

    // Keywords
    Var,
    While,
    Int,
    Real,
    String,
    Boolean,
    Type,
    Long,
    Do,
    Case,
    Switch,

    // Operators
    Plus,
    Minus,
    Div,
    Mult,
    Equal,

    // Punctuation
    Colon,
    Comma,
    Semicolon,
    LBrac,
    RBrac,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Relational operators
    NotEqual,
    Greater,
    Less,
    LtEq,
    GtEq,

    Dot,

    Id,
    Num,
    RealNum,

    Error,
}

/// Reserved words, matched case-sensitively against the whole lexeme.
const KEYWORDS: [(&str, TokenKind); 11] = [
    ("VAR", TokenKind::Var),
    ("WHILE", TokenKind::While),
    ("INT", TokenKind::Int),
    ("REAL", TokenKind::Real),
    ("STRING", TokenKind::String),
    ("BOOLEAN", TokenKind::Boolean),
    ("TYPE", TokenKind::Type),
    ("LONG", TokenKind::Long),
    ("DO", TokenKind::Do),
    ("CASE", TokenKind::Case),
    ("SWITCH", TokenKind::Switch),
];

impl TokenKind {
    /// Look up a reserved word; `None` means the lexeme is an identifier.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lexeme)
            .map(|(_, kind)| *kind)
    }

    pub fn is_relop(self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::Less
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::NotEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Int => "INT",
            TokenKind::Real => "REAL",
            TokenKind::String => "STRING",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Type => "TYPE",
            TokenKind::Long => "LONG",
            TokenKind::Do => "DO",
            TokenKind::Case => "CASE",
            TokenKind::Switch => "SWITCH",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Div => "/",
            TokenKind::Mult => "*",
            TokenKind::Equal => "=",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LBrac => "[",
            TokenKind::RBrac => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::NotEqual => "<>",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Dot => ".",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
            TokenKind::RealNum => "REALNUM",
            TokenKind::Error => "ERROR",
        };
        f.write_str(text)
    }
}

/// A classified lexeme together with the line it was scanned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.line, self.kind, self.lexeme)
    }
}

/// Misuse of the pushback slot. These are logic errors in the caller, not
/// problems with the source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("token pushed back twice without an intervening fetch (line {line})")]
    DoublePushBack { line: usize },

    #[error("push back requested before any token was fetched")]
    NothingToPushBack,
}

/// On-demand lexer with one token of pushback
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    /// Token re-delivered by the next `fetch`
    lookahead: Option<Token>,
    /// Most recently delivered token, eligible for pushback
    last: Option<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            lookahead: None,
            last: None,
        }
    }

    /// Current line of the scan position (1-based).
    ///
    /// This includes newlines skipped while looking for the most recently
    /// scanned token, and is not rewound by [`Lexer::push_back`].
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the next token, or the pushed-back one if the slot is full.
    pub fn fetch(&mut self) -> Token {
        if let Some(token) = self.lookahead.take() {
            self.last = Some(token.clone());
            return token;
        }

        self.skip_whitespace();
        let token = self.next_token();
        trace!(line = token.line, kind = %token.kind, lexeme = %token.lexeme, "token");
        self.last = Some(token.clone());
        token
    }

    /// Make the next [`Lexer::fetch`] return the token just fetched.
    pub fn push_back(&mut self) -> Result<(), LexError> {
        if self.lookahead.is_some() {
            return Err(LexError::DoublePushBack { line: self.line });
        }
        let token = self.last.take().ok_or(LexError::NothingToPushBack)?;
        self.lookahead = Some(token);
        Ok(())
    }

    /// Drain the stream, end-of-file token included.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.fetch();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn next_token(&mut self) -> Token {
        let line = self.line;
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, "", line);
        };

        let kind = match ch {
            '0'..='9' => return self.number_literal(ch, line),
            c if c.is_ascii_alphabetic() => return self.identifier_or_keyword(ch, line),

            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Div,
            '*' => TokenKind::Mult,
            '=' => TokenKind::Equal,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::LBrac,
            ']' => TokenKind::RBrac,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    return Token::new(TokenKind::LtEq, "<=", line);
                }
                Some('>') => {
                    self.advance();
                    return Token::new(TokenKind::NotEqual, "<>", line);
                }
                _ => TokenKind::Less,
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    return Token::new(TokenKind::GtEq, ">=", line);
                }
                TokenKind::Greater
            }
            _ => TokenKind::Error,
        };

        Token::new(kind, ch, line)
    }

    /// Scan an integer or real literal.
    ///
    /// A leading `0` is a whole literal on its own. The fractional part is
    /// taken only when the `.` is followed by a digit; otherwise the `.` is
    /// left for the next token.
    fn number_literal(&mut self, first_digit: char, line: usize) -> Token {
        let mut text = String::new();
        text.push(first_digit);

        if first_digit != '0' {
            self.take_digits(&mut text);
        }

        let fraction_follows = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());
        if fraction_follows {
            self.advance();
            text.push('.');
            self.take_digits(&mut text);
            return bounded(TokenKind::RealNum, text, line);
        }

        bounded(TokenKind::Num, text, line)
    }

    fn identifier_or_keyword(&mut self, first_char: char, line: usize) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match TokenKind::keyword(&ident) {
            Some(kind) => Token::new(kind, ident, line),
            None => bounded(TokenKind::Id, ident, line),
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    /// Skip whitespace, counting newlines
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_space(ch) {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }
}

/// C `isspace` in the default locale: includes vertical tab and form feed.
fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Lexemes that do not fit the token buffer come out as error tokens,
/// truncated to the buffer size.
fn bounded(kind: TokenKind, text: String, line: usize) -> Token {
    if text.chars().count() < MAX_TOKEN_LENGTH {
        return Token::new(kind, text, line);
    }
    let truncated: String = text.chars().take(MAX_TOKEN_LENGTH - 1).collect();
    Token::new(TokenKind::Error, truncated, line)
}
