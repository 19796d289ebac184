//! The Hoard command grammar.
//!
//! One line of text becomes one [`Command`]:
//!
//! ```text
//! ACTOR gives TO: [VALUE][, ITEM:QTY]...
//! ACTOR takes from FROM: [VALUE][, ITEM:QTY]...
//! ACTOR buys ITEM:QTY[, ITEM:QTY]...
//! ACTOR sells ITEM:QTY[, ITEM:QTY]...
//! Set Value ITEM: VALUE
//! ```

/// Typed commands and payloads.
pub mod ast;
pub mod diagnostics;
pub mod error;
/// Tokenizer.
pub mod lexer;
mod lower;
/// chumsky grammar producing raw command structure.
pub mod parser;

pub use ast::{Action, Command, Payload, STORE};
pub use diagnostics::{Diagnostic, render_diagnostics};
pub use error::{CommandError, CommandResult};
pub use lexer::is_single_word;

/// Parse one command line.
///
/// Payload amounts are only checked for shape here. Signs, balances and
/// authority are the ledger's business.
pub fn parse_command(source: &str) -> CommandResult<Command> {
    let (tokens, lex_errors) = lexer::lex(source);

    if let Some(e) = lex_errors.into_iter().next() {
        return Err(CommandError::Lex {
            text: source.get(e.span.clone()).unwrap_or_default().to_string(),
            span: e.span,
        });
    }

    let syntax = parser::parse(&tokens).map_err(|errors| CommandError::NotRecognized {
        span: errors
            .into_iter()
            .next()
            .map_or(0..source.len(), |e| e.span),
    })?;

    lower::lower(syntax)
}
