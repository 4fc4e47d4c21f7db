use logos::Logos;

/// Tokens of the statement language.
///
/// String literals are not matched by the lexer. The scanner recognizes
/// them itself so that a chunk boundary inside `"""` is never mistaken for
/// an empty string followed by a stray quote.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("print")]
    Print,

    #[token("let")]
    Let,

    #[token("=")]
    Eq,

    #[token(";")]
    Semi,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// `"..."` on a single line.
    Str(String),

    /// `"""..."""`, may span lines.
    LongStr(String),
}

impl Token {
    /// Human-readable name used in syntax errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Print => "`print`",
            Token::Let => "`let`",
            Token::Eq => "`=`",
            Token::Semi => "`;`",
            Token::Number(_) => "number",
            Token::Ident(_) => "identifier",
            Token::Str(_) => "string",
            Token::LongStr(_) => "long string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> Vec<Token> {
        Token::lexer(src).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            lex_all("let printer = print"),
            vec![
                Token::Let,
                Token::Ident("printer".into()),
                Token::Eq,
                Token::Print,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex_all("42 -7;"),
            vec![Token::Number(42), Token::Number(-7), Token::Semi]
        );
    }

    #[test]
    fn test_number_overflow_is_error() {
        let mut lexer = Token::lexer("99999999999999999999");
        assert!(matches!(lexer.next(), Some(Err(_))));
    }
}
