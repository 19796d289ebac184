/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by account primitives and record decoding.
///
/// The display strings are the user-facing messages shown at the command
/// boundary, so they are phrased for players rather than developers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A credit carried neither currency nor items.
    #[error("Nothing given.")]
    NothingGiven,

    /// A debit carried neither currency nor items.
    #[error("Nothing Passed. Try again.")]
    NothingPassed,

    /// A credit of a negative currency amount.
    #[error("Value cannot be negative.")]
    NegativeCredit,

    /// A debit of a negative currency amount.
    #[error("You cannot remove a negative number!")]
    NegativeDebit,

    /// A NaN or infinite currency amount.
    #[error("Value must be a finite number.")]
    NonFinite,

    /// A debit larger than the current balance.
    #[error("You don't have enough money.")]
    InsufficientFunds,

    /// A credit of fewer than one unit of an item.
    #[error("Cannot add a negative number of {0} to inventory.")]
    NegativeItemCredit(String),

    /// A credit that would push a held quantity past the largest count.
    #[error("Too many {0}.")]
    TooManyItems(String),

    /// A debit of fewer than one unit of an item.
    #[error("You cannot remove less than 1 item from an Inventory.")]
    ItemQuantityTooSmall,

    /// A debit of an item the account does not hold.
    #[error("You don't have any {0}(s).")]
    MissingItem(String),

    /// A debit of more units than the account holds.
    #[error("You don't have enough {0}(s).")]
    InsufficientItem(String),

    /// The supplied key does not open the account.
    #[error("Invalid Key, you are not {0}.")]
    InvalidKey(String),

    /// A saved account record could not be decoded.
    #[error("malformed account record: {0:?}")]
    MalformedRecord(String),
}

impl CoreError {
    /// Whether this error is an authorization failure rather than a
    /// validation failure.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }
}
