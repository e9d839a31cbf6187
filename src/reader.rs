use crate::tokens::{tokenize, Token};
use crate::types::{Expression, Int};
use std::fmt;
use std::slice;

type Reader<'a> = slice::Iter<'a, Token<'a>>;

pub type Result<T = Vec<Expression>> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnmatchedOpenParen,
    UnmatchedCloseParen,
    IntegerTooLarge(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnmatchedOpenParen => write!(f, "unmatched open paren"),
            Error::UnmatchedCloseParen => write!(f, "unmatched close paren"),
            Error::IntegerTooLarge(digits) => {
                write!(f, "integer literal {} does not fit in {} bits", digits, Int::BITS)
            }
        }
    }
}

/// Reads every top-level form in `input`. Either the whole input parses, or nothing is
/// returned.
pub fn parse(input: &str) -> Result {
    let tokens = tokenize(input);
    let mut reader = tokens.iter();
    let mut forms = Vec::new();
    while let Some(token) = reader.next() {
        match token {
            Token::CloseParen => return Err(Error::UnmatchedCloseParen),
            token => forms.push(read_form(token, &mut reader)?),
        }
    }
    log::trace!("read {} form(s) from {:?}", forms.len(), input);
    Ok(forms)
}

fn read_form(token: &Token, reader: &mut Reader) -> Result<Expression> {
    match token {
        Token::OpenParen => read_list(reader),
        Token::Atom(chars) => read_atom(chars),
        Token::CloseParen => Err(Error::UnmatchedCloseParen),
    }
}

fn read_list(reader: &mut Reader) -> Result<Expression> {
    let mut elements = Vec::new();
    loop {
        match reader.next() {
            Some(Token::CloseParen) => break,
            Some(token) => elements.push(read_form(token, reader)?),
            None => return Err(Error::UnmatchedOpenParen),
        }
    }
    Ok(Expression::wrap_list(elements))
}

// Only a run of plain digits is a number. "-5" is a symbol.
fn read_atom(chars: &str) -> Result<Expression> {
    if chars.bytes().all(|b| b.is_ascii_digit()) {
        chars
            .parse::<Int>()
            .map(Expression::Number)
            .map_err(|_| Error::IntegerTooLarge(String::from(chars)))
    } else {
        Ok(Expression::new_symbol(chars))
    }
}
