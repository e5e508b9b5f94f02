//! Lexer for template markup using logos
//!
//! Markup is context sensitive: between tags everything up to the next `<` is
//! text, while inside a tag whitespace separates names and values. The lexer
//! therefore runs three logos token sets and morphs between them at `<`/`</`,
//! after `=` and at `>`/`/>`, yielding one flat [`Token`] stream for the
//! grammar. A `<` that cannot start a tag stays part of the text.

use std::borrow::Cow;

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Tokens between tags
#[derive(Logos, Debug, Clone, PartialEq)]
enum ContentToken {
    #[token("<!--", comment_body)]
    Comment(String),

    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>")]
    Doctype,

    #[token("</")]
    EndTagOpen,

    #[token("<")]
    TagOpen,

    #[regex(r"([^<]|<[^A-Za-z/!<])+")]
    Text,
}

/// Tokens inside a start or end tag
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum TagToken {
    #[token("/>")]
    SelfClose,

    #[token(">")]
    TagClose,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Quoted(String),

    #[regex(r#"[^ \t\n\r\f"'<>/=]+"#, |lex| lex.slice().to_string())]
    Name(String),
}

/// Tokens for an attribute value, right after `=`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum ValueToken {
    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Quoted(String),

    #[regex(r#"[^ \t\n\r\f"'<>=`]+"#, |lex| lex.slice().to_string())]
    Unquoted(String),
}

fn comment_body(lex: &mut logos::Lexer<ContentToken>) -> Option<String> {
    let rest = lex.remainder();
    let end = rest.find("-->")?;
    let body = rest[..end].to_string();
    lex.bump(end + 3);
    Some(body)
}

fn unquote(s: &str) -> String {
    decode_entities(&s[1..s.len() - 1]).into_owned()
}

/// Token stream consumed by the grammar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `<` opening a start tag
    TagOpen,
    /// `</` opening an end tag
    EndTagOpen,
    /// `>`
    TagClose,
    /// `/>`
    SelfClose,
    /// `=` between an attribute name and its value
    Equals,
    /// Tag name, attribute name or unquoted attribute value
    Name(String),
    /// Quoted attribute value with entities decoded
    Quoted(String),
    /// Character data with entities decoded
    Text(String),
    /// Comment body
    Comment(String),
    /// `<!DOCTYPE ...>`
    Doctype,
    /// Input the lexer could not make sense of
    Error(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::TagOpen => write!(f, "'<'"),
            Token::EndTagOpen => write!(f, "'</'"),
            Token::TagClose => write!(f, "'>'"),
            Token::SelfClose => write!(f, "'/>'"),
            Token::Equals => write!(f, "'='"),
            Token::Name(s) => write!(f, "name '{}'", s),
            Token::Quoted(s) => write!(f, "string \"{}\"", s),
            Token::Text(_) => write!(f, "text"),
            Token::Comment(_) => write!(f, "comment"),
            Token::Doctype => write!(f, "doctype"),
            Token::Error(s) => write!(f, "'{}'", s),
        }
    }
}

enum Mode<'a> {
    Content(logos::Lexer<'a, ContentToken>),
    Tag(logos::Lexer<'a, TagToken>),
    Value(logos::Lexer<'a, ValueToken>),
    Done,
}

/// Mode-switching lexer over template markup
pub struct Lexer<'a> {
    mode: Mode<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            mode: Mode::Content(ContentToken::lexer(input)),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (Token, Span);

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.mode, Mode::Done) {
            Mode::Content(mut lex) => {
                let tok = lex.next()?;
                let span = lex.span();
                let token = match tok {
                    Ok(ContentToken::TagOpen) if starts_tag_name(lex.remainder()) => {
                        self.mode = Mode::Tag(lex.morph());
                        return Some((Token::TagOpen, span));
                    }
                    Ok(ContentToken::EndTagOpen) if starts_tag_name(lex.remainder()) => {
                        self.mode = Mode::Tag(lex.morph());
                        return Some((Token::EndTagOpen, span));
                    }
                    // `a <`, `<<p>` or `</ x`: literal text
                    Ok(ContentToken::TagOpen | ContentToken::EndTagOpen) => {
                        Token::Text(lex.slice().to_string())
                    }
                    Ok(ContentToken::Text) => Token::Text(decode_entities(lex.slice()).into_owned()),
                    Ok(ContentToken::Comment(body)) => Token::Comment(body),
                    Ok(ContentToken::Doctype) => Token::Doctype,
                    Err(()) => Token::Error(lex.slice().to_string()),
                };
                self.mode = Mode::Content(lex);
                Some((token, span))
            }
            Mode::Tag(mut lex) => {
                let tok = lex.next()?;
                let span = lex.span();
                let token = match tok {
                    Ok(TagToken::TagClose) => {
                        self.mode = Mode::Content(lex.morph());
                        return Some((Token::TagClose, span));
                    }
                    Ok(TagToken::SelfClose) => {
                        self.mode = Mode::Content(lex.morph());
                        return Some((Token::SelfClose, span));
                    }
                    Ok(TagToken::Equals) => {
                        self.mode = Mode::Value(lex.morph());
                        return Some((Token::Equals, span));
                    }
                    Ok(TagToken::Quoted(s)) => Token::Quoted(s),
                    Ok(TagToken::Name(s)) => Token::Name(s),
                    Err(()) => Token::Error(lex.slice().to_string()),
                };
                self.mode = Mode::Tag(lex);
                Some((token, span))
            }
            Mode::Value(mut lex) => {
                let tok = lex.next()?;
                let span = lex.span();
                let token = match tok {
                    Ok(ValueToken::Quoted(s)) => Token::Quoted(s),
                    Ok(ValueToken::Unquoted(s)) => Token::Name(s),
                    Err(()) => Token::Error(lex.slice().to_string()),
                };
                self.mode = Mode::Tag(lex.morph());
                Some((token, span))
            }
            Mode::Done => None,
        }
    }
}

fn starts_tag_name(rest: &str) -> bool {
    rest.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Lexer::new(input)
}

/// Decode character references in text or attribute values
///
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| {
            resolve_reference(&tail[1..semi]).map(|c| (c, semi))
        }) {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
