use regex::Regex;

#[derive(Debug, Eq, PartialEq)]
pub enum Token<'a> {
    OpenParen,
    CloseParen,
    Atom(&'a str),
}

fn create_token(captured: &str) -> Token {
    match captured {
        "(" => Token::OpenParen,
        ")" => Token::CloseParen,
        _ => Token::Atom(captured),
    }
}

/// Splits `input` into delimiters and atoms. Whitespace only separates tokens; every input
/// tokenizes, even one with unbalanced parentheses.
pub fn tokenize(input: &str) -> Vec<Token> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                  # ignore whitespace in this pattern & allow comments
                [()]                 # a single delimiter
                |[^\s()]+            # or a maximal run of anything else that isn't whitespace
            "#
        )
        .unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    #[test]
    fn delimiters_split_atoms() {
        assert_eq!(
            tokenize("(+ 1 (f x))"),
            vec![
                OpenParen,
                Atom("+"),
                Atom("1"),
                OpenParen,
                Atom("f"),
                Atom("x"),
                CloseParen,
                CloseParen
            ]
        );
    }

    #[test]
    fn no_whitespace_needed_around_parens() {
        assert_eq!(
            tokenize("(a)(b)"),
            vec![OpenParen, Atom("a"), CloseParen, OpenParen, Atom("b"), CloseParen]
        );
    }

    #[test]
    fn any_whitespace_is_a_boundary() {
        assert_eq!(
            tokenize("  define\tx\n\n42  "),
            vec![Atom("define"), Atom("x"), Atom("42")]
        );
    }

    #[test]
    fn atoms_are_not_validated() {
        assert_eq!(tokenize("-5 a.b #t"), vec![Atom("-5"), Atom("a.b"), Atom("#t")]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn unbalanced_input_still_tokenizes() {
        assert_eq!(tokenize(")("), vec![CloseParen, OpenParen]);
    }
}
