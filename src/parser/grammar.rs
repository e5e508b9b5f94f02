//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::{decode_entities, Token};
use crate::ParseError;

/// Deepest element nesting the parser accepts
pub const MAX_NESTING_DEPTH: usize = 512;

/// Parse a markup fragment into an AST
pub fn parse(input: &str) -> Result<Fragment, Vec<ParseError>> {
    let len = input.len();

    let tokens: Vec<(Token, Span)> = crate::parser::lexer::lex(input).collect();
    check_nesting(&tokens).map_err(|e| vec![e])?;

    // Convert to chumsky spans
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    fragment_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Reject input nested deeper than [`MAX_NESTING_DEPTH`]
///
/// The grammar is recursive, so this runs on the raw tokens before parsing.
fn check_nesting(tokens: &[(Token, Span)]) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut iter = tokens.iter().peekable();
    while let Some((token, span)) = iter.next() {
        match token {
            Token::TagOpen => {
                let void = matches!(
                    iter.peek(),
                    Some((Token::Name(name), _)) if is_void_element(&name.to_ascii_lowercase())
                );
                let closed = iter.by_ref().find_map(|(t, _)| match t {
                    Token::TagClose => Some(true),
                    Token::SelfClose => Some(false),
                    _ => None,
                });
                if closed == Some(true) && !void {
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(ParseError::Syntax {
                            span: span.clone(),
                            message: format!(
                                "elements nested deeper than {} levels",
                                MAX_NESTING_DEPTH
                            ),
                            expected: Vec::new(),
                        });
                    }
                }
            }
            Token::EndTagOpen => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn fragment_parser<'a, I>() -> impl Parser<'a, I, Fragment, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Tag and attribute names are case-insensitive; normalize once here
    let name = name.map(|n| Spanned::new(n.node.to_ascii_lowercase(), n.span));

    let attribute_value = select! {
        Token::Quoted(s) => s,
        Token::Name(s) => decode_entities(&s).into_owned(),
    };

    let attribute = name
        .clone()
        .then(just(Token::Equals).ignore_then(attribute_value).or_not())
        .map_with(|(name, value), e| {
            Spanned::new(
                Attribute {
                    name,
                    value: value.unwrap_or_default(),
                },
                span_range(&e.span()),
            )
        });

    let start_tag = just(Token::TagOpen)
        .ignore_then(name.clone())
        .then(attribute.repeated().collect::<Vec<_>>());

    let end_tag = just(Token::EndTagOpen)
        .ignore_then(name)
        .then_ignore(just(Token::TagClose));

    let node = recursive(|node| {
        // A bare `<` splits text into several tokens; rejoin them
        let text = select! {
            Token::Text(s) => s,
        }
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|parts| MarkupNode::Text(parts.concat()));

        let comment = select! {
            Token::Comment(s) => MarkupNode::Comment(s),
        };

        // `<br>`: void elements have neither children nor an end tag
        let void_element = start_tag
            .clone()
            .then_ignore(just(Token::TagClose))
            .try_map(|(name, attributes), span: SimpleSpan| {
                if is_void_element(&name.node) {
                    Ok(ElementNode {
                        name,
                        attributes,
                        children: Vec::new(),
                    })
                } else {
                    Err(Rich::custom(span, format!("'{}' is not a void element", name.node)))
                }
            });

        // `<x/>`
        let self_closed = start_tag
            .clone()
            .then_ignore(just(Token::SelfClose))
            .map(|(name, attributes)| ElementNode {
                name,
                attributes,
                children: Vec::new(),
            });

        // `<x ...> children </x>`
        let container = start_tag
            .clone()
            .then_ignore(just(Token::TagClose))
            .then(node.repeated().collect::<Vec<_>>())
            .then(end_tag.clone())
            .try_map(|(((name, attributes), children), end), _span| {
                if end.node == name.node {
                    Ok(ElementNode {
                        name,
                        attributes,
                        children,
                    })
                } else {
                    Err(Rich::custom(
                        SimpleSpan::from(end.span.clone()),
                        format!(
                            "closing tag </{}> does not match opening tag <{}>",
                            end.node, name.node
                        ),
                    ))
                }
            });

        // Note: void_element must come before container, since both accept `<x ...>`
        choice((
            text,
            comment,
            void_element.map(MarkupNode::Element),
            self_closed.map(MarkupNode::Element),
            container.map(MarkupNode::Element),
        ))
        .map_with(|n, e| Spanned::new(n, span_range(&e.span())))
        .boxed()
    });

    // A doctype is accepted (and dropped) at the top level only
    let top_level = choice((just(Token::Doctype).to(None), node.map(Some)));

    top_level
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|nodes| Fragment {
            nodes: nodes.into_iter().flatten().collect(),
        })
}
