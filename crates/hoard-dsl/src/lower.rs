//! Lowering: turn parsed command structure into a typed [`Command`].
//!
//! Payload rules: a leading entry without a colon is the currency amount,
//! entries with a colon are `name:quantity`, empty entries are ignored, and
//! any later entry without a colon is a syntax error.

use hoard_core::ItemValue;

use crate::ast::{Command, Payload};
use crate::error::{CommandError, CommandResult};
use crate::lexer::Token;
use crate::parser::{RawEntry, Shape, Syntax};

pub(crate) fn lower(syntax: Syntax) -> CommandResult<Command> {
    match syntax {
        Syntax::SetValue { item, value } => Ok(Command::SetValue {
            item,
            value: lower_item_value(&value)?,
        }),
        Syntax::Transfer {
            actor,
            shape,
            entries,
        } => {
            let payload = lower_payload(&entries)?;
            Ok(match shape {
                Shape::Give(to) => Command::Give { actor, to, payload },
                Shape::Take(from) => Command::Take {
                    actor,
                    from,
                    payload,
                },
                Shape::Buy => Command::Buy { actor, payload },
                Shape::Sell => Command::Sell { actor, payload },
            })
        }
    }
}

fn lower_payload(entries: &[RawEntry]) -> CommandResult<Payload> {
    let mut payload = Payload::default();

    for (index, entry) in entries.iter().enumerate() {
        if entry.tokens.is_empty() {
            continue;
        }
        match entry.tokens.iter().position(|(t, _)| *t == Token::Colon) {
            Some(colon) => {
                let (item, qty) = lower_item(entry, colon)?;
                let slot = payload.items.entry(item.clone()).or_insert(0);
                *slot = slot.checked_add(qty).ok_or(CommandError::BadQuantity {
                    item,
                    span: entry.span.clone(),
                })?;
            }
            None if index == 0 => payload.value = lower_amount(entry)?,
            None => {
                return Err(CommandError::ItemSyntax {
                    span: entry.span.clone(),
                });
            }
        }
    }

    Ok(payload)
}

fn lower_item(entry: &RawEntry, colon: usize) -> CommandResult<(String, i64)> {
    let (name_tokens, rest) = entry.tokens.split_at(colon);
    if name_tokens.is_empty() {
        return Err(CommandError::ItemSyntax {
            span: entry.span.clone(),
        });
    }
    let item = name_tokens
        .iter()
        .map(|(t, _)| t.text())
        .collect::<Vec<_>>()
        .join(" ");

    let qty = match &rest[1..] {
        [(Token::Number(_, raw), _)] => raw.parse::<i64>().ok(),
        _ => None,
    };
    match qty {
        Some(qty) => Ok((item, qty)),
        None => Err(CommandError::BadQuantity {
            item,
            span: entry.span.clone(),
        }),
    }
}

fn lower_amount(entry: &RawEntry) -> CommandResult<f64> {
    match entry.tokens.as_slice() {
        [(Token::Number(n, _), _)] if n.is_finite() => Ok(*n),
        _ => Err(CommandError::BadAmount {
            span: entry.span.clone(),
        }),
    }
}

fn lower_item_value(entry: &RawEntry) -> CommandResult<ItemValue> {
    match entry.tokens.as_slice() {
        [(Token::Word(w), _)] if w == "Unvalued" => Ok(ItemValue::Unvalued),
        [(Token::Word(w), _)] if w == "Priceless" => Ok(ItemValue::Priceless),
        [(Token::Number(n, _), span)] if *n < 0.0 => Err(CommandError::NegativeValue {
            span: span.clone(),
        }),
        [(Token::Number(n, _), _)] if n.is_finite() => Ok(ItemValue::Valued(*n)),
        _ => Err(CommandError::BadAmount {
            span: entry.span.clone(),
        }),
    }
}
