use std::fmt;

use hoard_core::{Inventory, ItemValue};

/// Source span as a byte range.
pub type Span = std::ops::Range<usize>;

/// Name of the pseudo-account that buys and sells go through.
pub const STORE: &str = "Store";

/// The direction of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `gives`: the actor is debited, the counterpart credited.
    Give,
    /// `takes from`: the counterpart is debited, the actor credited.
    Take,
    /// `buys`: currency to the Store, items to the actor.
    Buy,
    /// `sells`: items to the Store, currency to the actor.
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Give => write!(f, "gives"),
            Action::Take => write!(f, "takes from"),
            Action::Buy => write!(f, "buys"),
            Action::Sell => write!(f, "sells"),
        }
    }
}

/// What moves in a transfer: a currency amount and item quantities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    /// Currency amount. Zero when the command lists only items.
    pub value: f64,
    /// Item quantities, summed when an item is listed twice.
    pub items: Inventory,
}

impl Payload {
    /// Whether nothing at all is being moved.
    pub fn is_empty(&self) -> bool {
        self.value == 0.0 && self.items.is_empty()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.value != 0.0 {
            parts.push(self.value.to_string());
        }
        parts.extend(self.items.iter().map(|(item, qty)| format!("{item}:{qty}")));
        write!(f, "{}", parts.join(", "))
    }
}

/// A fully parsed ledger command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `ACTOR gives TO: payload`
    Give {
        /// Account being debited.
        actor: String,
        /// Account being credited.
        to: String,
        /// What moves.
        payload: Payload,
    },
    /// `ACTOR takes from FROM: payload`
    Take {
        /// Account being credited.
        actor: String,
        /// Account being debited.
        from: String,
        /// What moves.
        payload: Payload,
    },
    /// `ACTOR buys items`
    Buy {
        /// Account trading with the Store.
        actor: String,
        /// Items bought (and any stray currency amount, which is rejected).
        payload: Payload,
    },
    /// `ACTOR sells items`
    Sell {
        /// Account trading with the Store.
        actor: String,
        /// Items sold.
        payload: Payload,
    },
    /// `Set Value ITEM: VALUE`
    SetValue {
        /// Item being priced.
        item: String,
        /// New value.
        value: ItemValue,
    },
}

impl Command {
    /// The account issuing the command, if it is a transfer.
    pub fn actor(&self) -> Option<&str> {
        match self {
            Command::Give { actor, .. }
            | Command::Take { actor, .. }
            | Command::Buy { actor, .. }
            | Command::Sell { actor, .. } => Some(actor),
            Command::SetValue { .. } => None,
        }
    }

    /// The other side of a transfer. Buys and sells always go to the Store.
    pub fn counterpart(&self) -> Option<&str> {
        match self {
            Command::Give { to, .. } => Some(to),
            Command::Take { from, .. } => Some(from),
            Command::Buy { .. } | Command::Sell { .. } => Some(STORE),
            Command::SetValue { .. } => None,
        }
    }

    /// The transfer direction, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Command::Give { .. } => Some(Action::Give),
            Command::Take { .. } => Some(Action::Take),
            Command::Buy { .. } => Some(Action::Buy),
            Command::Sell { .. } => Some(Action::Sell),
            Command::SetValue { .. } => None,
        }
    }

    /// The transfer payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Command::Give { payload, .. }
            | Command::Take { payload, .. }
            | Command::Buy { payload, .. }
            | Command::Sell { payload, .. } => Some(payload),
            Command::SetValue { .. } => None,
        }
    }
}

/// Canonical rendering. The output parses back to an equal command.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Give { actor, to, payload } => write!(f, "{actor} gives {to}: {payload}"),
            Command::Take {
                actor,
                from,
                payload,
            } => write!(f, "{actor} takes from {from}: {payload}"),
            Command::Buy { actor, payload } => write!(f, "{actor} buys {payload}"),
            Command::Sell { actor, payload } => write!(f, "{actor} sells {payload}"),
            Command::SetValue { item, value } => write!(f, "Set Value {item}: {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: f64, items: &[(&str, i64)]) -> Payload {
        Payload {
            value,
            items: items.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn buy_counterpart_is_store() {
        let cmd = Command::Buy {
            actor: "Alice".into(),
            payload: payload(0.0, &[("Rope", 1)]),
        };
        assert_eq!(cmd.actor(), Some("Alice"));
        assert_eq!(cmd.counterpart(), Some("Store"));
        assert_eq!(cmd.action(), Some(Action::Buy));
    }

    #[test]
    fn display_give() {
        let cmd = Command::Give {
            actor: "Alice".into(),
            to: "Bob".into(),
            payload: payload(50.0, &[("Sword", 1), ("Long Bow", 2)]),
        };
        assert_eq!(cmd.to_string(), "Alice gives Bob: 50, Long Bow:2, Sword:1");
    }

    #[test]
    fn display_items_only() {
        let cmd = Command::Take {
            actor: "Bob".into(),
            from: "Pot".into(),
            payload: payload(0.0, &[("Gem", 3)]),
        };
        assert_eq!(cmd.to_string(), "Bob takes from Pot: Gem:3");
    }

    #[test]
    fn display_set_value() {
        let cmd = Command::SetValue {
            item: "Gem".into(),
            value: ItemValue::Priceless,
        };
        assert_eq!(cmd.to_string(), "Set Value Gem: Priceless");
        assert_eq!(cmd.actor(), None);
        assert_eq!(cmd.payload(), None);
    }

    #[test]
    fn empty_payload() {
        assert!(Payload::default().is_empty());
        assert!(!payload(0.5, &[]).is_empty());
    }
}
