//! Error types for command parsing.

use crate::ast::Span;

/// Alias for `Result<T, CommandError>`.
pub type CommandResult<T> = Result<T, CommandError>;

/// Why a command line could not be turned into a [`Command`](crate::Command).
///
/// Every variant carries the span of the offending input so front ends can
/// point at it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A character that cannot start any token (including newlines).
    #[error("Unexpected character {text:?} in command.")]
    Lex {
        /// The offending text.
        text: String,
        /// Where it is.
        span: Span,
    },

    /// The words do not form any known command shape.
    #[error("Command not recognized.")]
    NotRecognized {
        /// Where parsing gave up.
        span: Span,
    },

    /// The leading payload entry is not a number.
    #[error("Value must be a number.")]
    BadAmount {
        /// The entry.
        span: Span,
    },

    /// A later payload entry lacks the `Item:Amount` shape.
    #[error("Item must be in [Item]:[Amount].")]
    ItemSyntax {
        /// The entry.
        span: Span,
    },

    /// An item quantity is not a whole number.
    #[error("Quantity of {item} must be a whole number.")]
    BadQuantity {
        /// The item named in the entry.
        item: String,
        /// The entry.
        span: Span,
    },

    /// A negative item value in `Set Value`.
    #[error("Value cannot be negative.")]
    NegativeValue {
        /// The value.
        span: Span,
    },
}

impl CommandError {
    /// Byte range of the input the error refers to.
    pub fn span(&self) -> Span {
        match self {
            Self::Lex { span, .. }
            | Self::NotRecognized { span }
            | Self::BadAmount { span }
            | Self::ItemSyntax { span }
            | Self::BadQuantity { span, .. }
            | Self::NegativeValue { span } => span.clone(),
        }
    }
}
