use logos::Logos;
use std::fmt;

/// Token type for the ledger command grammar.
///
/// Keywords (`gives`, `takes`, `from`, `buys`, `sells`, `Set`, `Value`) are
/// plain `Token::Word`s; the parser recognises them by position. That keeps
/// account and item names free to contain words like `from`.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Colon `:` separating a name from an amount.
    Colon,
    /// Comma `,` separating payload entries.
    Comma,
    /// Numeric literal. Stores the parsed value and the source text so that
    /// numbers inside item names (`Ring 3`) keep their spelling.
    Number(f64, String),
    /// Any other run of non-space characters.
    Word(String),
}

impl Token {
    /// The token as it appeared in the source.
    pub fn text(&self) -> &str {
        match self {
            Token::Colon => ":",
            Token::Comma => ",",
            Token::Number(_, raw) => raw,
            Token::Word(w) => w,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Internal logos token, converted to an owned `Token` after lexing.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t]+")]
enum RawToken {
    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,

    #[regex(r"[^\s,:]+")]
    Word,
}

/// A lexer error with source location.
#[derive(Debug, Clone)]
pub struct LexError {
    /// Byte range of the offending input.
    pub span: std::ops::Range<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Lex a command line into `(Token, Span)` pairs.
///
/// Lexing continues past errors so every bad character is reported.
/// Newlines are not whitespace here: a command is exactly one line.
pub fn lex(source: &str) -> (Vec<(Token, std::ops::Range<usize>)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                let token = match raw {
                    RawToken::Colon => Token::Colon,
                    RawToken::Comma => Token::Comma,
                    RawToken::Number => {
                        let raw = lexer.slice().to_string();
                        match raw.parse::<f64>() {
                            Ok(n) => Token::Number(n, raw),
                            Err(_) => {
                                errors.push(LexError {
                                    span: span.clone(),
                                    message: format!("invalid number: {raw}"),
                                });
                                continue;
                            }
                        }
                    }
                    RawToken::Word => Token::Word(lexer.slice().to_string()),
                };
                tokens.push((token, span));
            }
            Err(()) => {
                errors.push(LexError {
                    span: span.clone(),
                    message: format!("unexpected character: {:?}", &source[span.clone()]),
                });
            }
        }
    }

    (tokens, errors)
}

/// Whether `name` lexes to exactly one word, i.e. can appear as an actor
/// or counterpart in a command.
pub fn is_single_word(name: &str) -> bool {
    let (tokens, errors) = lex(name);
    errors.is_empty()
        && matches!(tokens.as_slice(), [(Token::Word(w), _)] if w == name)
}
