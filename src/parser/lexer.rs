//! Lexer for Interface Builder XML using logos
//!
//! XML needs two lexical modes: outside a tag everything up to the next `<`
//! is text, inside a tag we see names, `=` and quoted values. Each mode is its
//! own logos lexer and the driver morphs between them on `<` and `>`.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Tokens seen by the grammar
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<`
    Open,
    /// `</`
    CloseOpen,
    /// `>`
    TagEnd,
    /// `/>`
    EmptyEnd,
    /// `=`
    Equals,
    /// Tag or attribute name
    Name(String),
    /// Quoted attribute value, entities decoded
    Value(String),
    /// Non-whitespace character data, entities decoded
    Text(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
enum ContentToken {
    #[token("<")]
    Open,
    #[token("</")]
    CloseOpen,

    // XML declaration and processing instructions
    #[regex(r"<\?([^?]|\?[^>])*\?>", logos::skip)]
    Declaration,

    #[regex(r"<!--([^-]|-[^-])*-->", logos::skip)]
    Comment,

    #[regex(r"<![A-Z][^>]*>", logos::skip)]
    Doctype,

    #[regex(r"[^<]+", |lex| decode_entities(lex.slice()))]
    Text(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum MarkupToken {
    #[token(">")]
    TagEnd,
    #[token("/>")]
    EmptyEnd,
    #[token("=")]
    Equals,

    #[regex(r"[A-Za-z_:][A-Za-z0-9_:.-]*", |lex| lex.slice().to_string())]
    Name(String),

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        decode_entities(&s[1..s.len()-1])
    })]
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        decode_entities(&s[1..s.len()-1])
    })]
    Value(String),
}

enum Mode<'s> {
    Content(logos::Lexer<'s, ContentToken>),
    Markup(logos::Lexer<'s, MarkupToken>),
}

/// Lex input string into tokens with spans
///
/// Unrecognized input is dropped; the grammar reports the resulting
/// structural error.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut mode = Mode::Content(ContentToken::lexer(input));

    loop {
        mode = match mode {
            Mode::Content(mut lexer) => {
                let mut entered_tag = false;
                while let Some(result) = lexer.next() {
                    let span = lexer.span();
                    match result {
                        Ok(ContentToken::Open) => {
                            tokens.push((Token::Open, span));
                            entered_tag = true;
                            break;
                        }
                        Ok(ContentToken::CloseOpen) => {
                            tokens.push((Token::CloseOpen, span));
                            entered_tag = true;
                            break;
                        }
                        Ok(ContentToken::Text(text)) => {
                            if !text.trim().is_empty() {
                                tokens.push((Token::Text(text.trim().to_string()), span));
                            }
                        }
                        Ok(_) | Err(_) => {}
                    }
                }
                if !entered_tag {
                    break;
                }
                Mode::Markup(lexer.morph())
            }
            Mode::Markup(mut lexer) => {
                let mut left_tag = false;
                while let Some(result) = lexer.next() {
                    let span = lexer.span();
                    match result {
                        Ok(MarkupToken::TagEnd) => {
                            tokens.push((Token::TagEnd, span));
                            left_tag = true;
                            break;
                        }
                        Ok(MarkupToken::EmptyEnd) => {
                            tokens.push((Token::EmptyEnd, span));
                            left_tag = true;
                            break;
                        }
                        Ok(MarkupToken::Equals) => tokens.push((Token::Equals, span)),
                        Ok(MarkupToken::Name(name)) => tokens.push((Token::Name(name), span)),
                        Ok(MarkupToken::Value(value)) => tokens.push((Token::Value(value), span)),
                        Err(_) => {}
                    }
                }
                if !left_tag {
                    break;
                }
                Mode::Content(lexer.morph())
            }
        };
    }

    tokens
}

/// Decode the predefined XML entities and numeric character references
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let Some(semi) = after.find(';') else {
            out.push_str(after);
            return out;
        };
        let entity = &after[1..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => out.push(c),
            None => out.push_str(&after[..=semi]),
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    out
}
