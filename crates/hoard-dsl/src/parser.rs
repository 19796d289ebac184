use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::lexer::Token;

type Span = SimpleSpan;

/// Parse error with source span.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Where the parser gave up.
    pub span: std::ops::Range<usize>,
    /// chumsky's description of what was expected.
    pub message: String,
}

/// One comma-separated payload entry, not yet interpreted.
#[derive(Debug, Clone)]
pub(crate) struct RawEntry {
    pub tokens: Vec<(Token, std::ops::Range<usize>)>,
    pub span: std::ops::Range<usize>,
}

/// The transfer verb and, for `gives`/`takes from`, the named counterpart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    Give(String),
    Take(String),
    Buy,
    Sell,
}

/// Command structure before payload interpretation.
#[derive(Debug, Clone)]
pub(crate) enum Syntax {
    Transfer {
        actor: String,
        shape: Shape,
        entries: Vec<RawEntry>,
    },
    SetValue {
        item: String,
        value: RawEntry,
    },
}

fn to_range(s: Span) -> std::ops::Range<usize> {
    s.into_range()
}

/// Build the command-line parser.
///
/// Payload entries are collected as raw token runs; deciding which entry
/// is currency and which are items happens during lowering, where the
/// error messages can be specific.
fn command_parser<'a, I>() -> impl Parser<'a, I, Syntax, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    let kw = |k: &'static str| select! { Token::Word(ref w) if w.as_str() == k => () }.labelled(k);
    let word = select! { Token::Word(w) => w }.labelled("account name");
    let name_part = select! {
        Token::Word(w) => w,
        Token::Number(_, raw) => raw,
    }
    .labelled("item name");

    // Anything but a comma belongs to the current entry.
    let entry_token = select! {
        Token::Word(w) => Token::Word(w),
        Token::Number(n, raw) => Token::Number(n, raw),
        Token::Colon => Token::Colon,
    }
    .map_with(|tok, e| (tok, to_range(e.span())));

    let entry = entry_token
        .repeated()
        .collect::<Vec<(Token, std::ops::Range<usize>)>>()
        .map_with(|tokens, e| RawEntry {
            tokens,
            span: to_range(e.span()),
        });

    let payload = entry
        .clone()
        .separated_by(just(Token::Comma))
        .collect::<Vec<RawEntry>>();

    // -- Transfers --

    let gives = kw("gives")
        .ignore_then(word.clone())
        .then_ignore(just(Token::Colon))
        .then(payload.clone())
        .map(|(to, entries)| (Shape::Give(to), entries));

    let takes = kw("takes")
        .ignore_then(kw("from"))
        .ignore_then(word.clone())
        .then_ignore(just(Token::Colon))
        .then(payload.clone())
        .map(|(from, entries)| (Shape::Take(from), entries));

    let buys = kw("buys")
        .ignore_then(payload.clone())
        .map(|entries| (Shape::Buy, entries));

    let sells = kw("sells")
        .ignore_then(payload)
        .map(|entries| (Shape::Sell, entries));

    let transfer = word
        .then(choice((gives, takes, buys, sells)))
        .map(|(actor, (shape, entries))| Syntax::Transfer {
            actor,
            shape,
            entries,
        });

    // -- Set Value --

    let set_value = kw("Set")
        .ignore_then(kw("Value"))
        .ignore_then(name_part.repeated().at_least(1).collect::<Vec<String>>())
        .then_ignore(just(Token::Colon))
        .then(entry)
        .map(|(words, value)| Syntax::SetValue {
            item: words.join(" "),
            value,
        });

    choice((set_value, transfer)).then_ignore(end())
}

/// Parse a token stream into command structure.
pub(crate) fn parse(tokens: &[(Token, std::ops::Range<usize>)]) -> Result<Syntax, Vec<ParseError>> {
    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), Span::from(span.clone())));

    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: Span = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = command_parser().parse(stream).into_output_errors();

    if let Some(syntax) = output
        && errors.is_empty()
    {
        return Ok(syntax);
    }

    Err(errors
        .into_iter()
        .map(|e| {
            let span = e.span();
            ParseError {
                span: span.into_range(),
                message: e.to_string(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_source(source: &str) -> Result<Syntax, Vec<ParseError>> {
        let (tokens, lex_errors) = lexer::lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        parse(&tokens)
    }

    fn entry_texts(entries: &[RawEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| {
                e.tokens
                    .iter()
                    .map(|(t, _)| t.text())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn parse_gives() {
        match parse_source("Alice gives Bob: 50, Sword:1").unwrap() {
            Syntax::Transfer {
                actor,
                shape,
                entries,
            } => {
                assert_eq!(actor, "Alice");
                assert_eq!(shape, Shape::Give("Bob".into()));
                assert_eq!(entry_texts(&entries), vec!["50", "Sword : 1"]);
            }
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn parse_takes_from() {
        match parse_source("Bob takes from Pot: Gem:2").unwrap() {
            Syntax::Transfer { shape, .. } => assert_eq!(shape, Shape::Take("Pot".into())),
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn parse_buys_without_colon() {
        match parse_source("Bob buys Rope:1, Torch:3").unwrap() {
            Syntax::Transfer { shape, entries, .. } => {
                assert_eq!(shape, Shape::Buy);
                assert_eq!(entries.len(), 2);
            }
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn parse_keeps_empty_entries() {
        match parse_source("Bank gives Bob: 100, Item1:1,, Item2: 4,").unwrap() {
            Syntax::Transfer { entries, .. } => {
                assert_eq!(
                    entry_texts(&entries),
                    vec!["100", "Item1 : 1", "", "Item2 : 4", ""]
                );
            }
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn parse_entry_spans() {
        match parse_source("Bob sells Gem:2").unwrap() {
            Syntax::Transfer { entries, .. } => assert_eq!(entries[0].span, 10..15),
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn parse_set_value() {
        match parse_source("Set Value Potion of Healing: 25").unwrap() {
            Syntax::SetValue { item, value } => {
                assert_eq!(item, "Potion of Healing");
                assert_eq!(value.tokens.len(), 1);
            }
            other => panic!("expected set value, got {other:?}"),
        }
    }

    #[test]
    fn user_named_set_can_still_give() {
        assert!(matches!(
            parse_source("Set gives Bob: 1").unwrap(),
            Syntax::Transfer { ref actor, .. } if actor == "Set"
        ));
    }

    #[test]
    fn unknown_verb_fails() {
        let errors = parse_source("Alice dances with Bob").unwrap_err();
        assert!(errors.iter().any(|e| e.span == (6..12)), "errors: {errors:?}");
    }

    #[test]
    fn gives_needs_colon() {
        assert!(parse_source("Alice gives Bob 50").is_err());
    }

    #[test]
    fn takes_needs_from() {
        assert!(parse_source("Alice takes Pot: 5").is_err());
    }

    #[test]
    fn empty_input_fails() {
        assert!(parse(&[]).is_err());
    }
}
