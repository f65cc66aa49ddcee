//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Either a nested element or a run of character data inside an element
#[derive(Debug, Clone)]
enum Content {
    Element(Element),
    Text(String),
}

/// Parse descriptor XML into an element tree
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input)
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(n) => n,
    };

    let attribute = name
        .clone()
        .then_ignore(just(Token::Equals))
        .then(select! { Token::Value(v) => v })
        .map_with(|(name, value), e| {
            let span: SimpleSpan = e.span();
            Attribute {
                name,
                value,
                span: span.into_range(),
            }
        });

    let element = recursive(|element| {
        let content = choice((
            element.map(Content::Element),
            select! { Token::Text(t) => Content::Text(t) },
        ));

        let body = choice((
            just(Token::EmptyEnd).to(None),
            just(Token::TagEnd)
                .ignore_then(content.repeated().collect::<Vec<_>>())
                .then_ignore(just(Token::CloseOpen))
                .then(name.clone())
                .then_ignore(just(Token::TagEnd))
                .map(Some),
        ));

        just(Token::Open)
            .ignore_then(name.clone())
            .then(attribute.clone().repeated().collect::<Vec<_>>())
            .then(body)
            .try_map(|((name, attributes), body), span: SimpleSpan| {
                let mut element = Element {
                    name,
                    attributes,
                    children: vec![],
                    text: None,
                    span: span.into_range(),
                };

                if let Some((contents, closing)) = body {
                    if closing != element.name {
                        return Err(Rich::custom(
                            span,
                            format!(
                                "closing tag </{}> does not match <{}>",
                                closing, element.name
                            ),
                        ));
                    }
                    let mut text = String::new();
                    for content in contents {
                        match content {
                            Content::Element(child) => element.children.push(child),
                            Content::Text(t) => {
                                if !text.is_empty() {
                                    text.push(' ');
                                }
                                text.push_str(&t);
                            }
                        }
                    }
                    if !text.is_empty() {
                        element.text = Some(text);
                    }
                }

                Ok(element)
            })
            .boxed()
    });

    element
        .then_ignore(end())
        .map(|root| Document { root })
}
