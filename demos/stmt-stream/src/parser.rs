//! Push parser for the statement language.
//!
//! ```text
//! program   := statement*
//! statement := "print" value ";"
//!            | "let" IDENT "=" value ";"
//! value     := NUMBER | IDENT | STRING | LONG_STRING
//! ```

use feedkit::{PushParser, PushStatus};

use crate::{
    ast::{Statement, Value},
    tokens::Token,
};

#[derive(Debug, Clone, PartialEq)]
enum State {
    Start,
    Print,
    PrintValue(Value),
    Let,
    LetName(String),
    LetEq(String),
    LetValue(String, Value),
    Aborted,
}

/// Collects statements from pushed tokens.
#[derive(Debug)]
pub struct StmtParser {
    state: State,
    statements: Vec<Statement>,
    error: Option<String>,
}

impl Default for StmtParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StmtParser {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            statements: Vec::new(),
            error: None,
        }
    }

    /// Statements completed so far.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Why the parser aborted, if it did.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true between statements.
    pub fn at_boundary(&self) -> bool {
        self.state == State::Start
    }

    fn reject(&mut self, expected: &str, found: &Token) -> PushStatus {
        self.error = Some(format!("expected {expected}, found {}", found.describe()));
        self.state = State::Aborted;
        PushStatus::Aborted
    }
}

impl PushParser<Token> for StmtParser {
    fn push(&mut self, token: Token) -> PushStatus {
        self.state = match (std::mem::replace(&mut self.state, State::Aborted), token) {
            (State::Aborted, _) => return PushStatus::Aborted,

            (State::Start, Token::Print) => State::Print,
            (State::Start, Token::Let) => State::Let,
            (State::Start, other) => return self.reject("`print` or `let`", &other),

            (State::Print, token) => match Value::from_token(token) {
                Ok(value) => State::PrintValue(value),
                Err(other) => return self.reject("a value", &other),
            },
            (State::PrintValue(value), Token::Semi) => {
                self.statements.push(Statement::Print(value));
                State::Start
            }

            (State::Let, Token::Ident(name)) => State::LetName(name),
            (State::Let, other) => return self.reject("identifier", &other),
            (State::LetName(name), Token::Eq) => State::LetEq(name),
            (State::LetName(_), other) => return self.reject("`=`", &other),
            (State::LetEq(name), token) => match Value::from_token(token) {
                Ok(value) => State::LetValue(name, value),
                Err(other) => return self.reject("a value", &other),
            },
            (State::LetValue(name, value), Token::Semi) => {
                self.statements.push(Statement::Let { name, value });
                State::Start
            }

            (State::PrintValue(_) | State::LetValue(..), other) => {
                return self.reject("`;`", &other);
            }
        };
        PushStatus::NeedMoreTokens
    }

    fn finish(&mut self) -> PushStatus {
        match self.state {
            State::Start => PushStatus::Accepted,
            State::Aborted => PushStatus::Aborted,
            _ => PushStatus::NeedMoreTokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(tokens: Vec<Token>) -> (StmtParser, PushStatus) {
        let mut parser = StmtParser::new();
        for token in tokens {
            let status = parser.push(token);
            if status.is_final() {
                return (parser, status);
            }
        }
        let status = parser.finish();
        (parser, status)
    }

    #[test]
    fn test_accepts_statements() {
        let (parser, status) = push_all(vec![
            Token::Print,
            Token::Str("hello".into()),
            Token::Semi,
            Token::Let,
            Token::Ident("x".into()),
            Token::Eq,
            Token::Number(42),
            Token::Semi,
        ]);

        assert_eq!(status, PushStatus::Accepted);
        assert_eq!(
            parser.statements(),
            &[
                Statement::Print(Value::Str("hello".into())),
                Statement::Let {
                    name: "x".into(),
                    value: Value::Number(42)
                },
            ]
        );
    }

    #[test]
    fn test_empty_program_accepted() {
        let (parser, status) = push_all(Vec::new());
        assert_eq!(status, PushStatus::Accepted);
        assert!(parser.statements().is_empty());
    }

    #[test]
    fn test_missing_semicolon_aborts() {
        let (parser, status) = push_all(vec![Token::Print, Token::Number(1), Token::Print]);
        assert_eq!(status, PushStatus::Aborted);
        assert_eq!(parser.error(), Some("expected `;`, found `print`"));
    }

    #[test]
    fn test_let_requires_identifier() {
        let (parser, status) = push_all(vec![Token::Let, Token::Number(3)]);
        assert_eq!(status, PushStatus::Aborted);
        assert_eq!(parser.error(), Some("expected identifier, found number"));
    }

    #[test]
    fn test_aborted_parser_stays_aborted() {
        let mut parser = StmtParser::new();
        assert_eq!(parser.push(Token::Semi), PushStatus::Aborted);
        assert_eq!(parser.push(Token::Print), PushStatus::Aborted);
        assert_eq!(parser.finish(), PushStatus::Aborted);
    }

    #[test]
    fn test_finish_mid_statement_wants_more() {
        let mut parser = StmtParser::new();
        parser.push(Token::Let);
        assert!(!parser.at_boundary());
        assert_eq!(parser.finish(), PushStatus::NeedMoreTokens);
    }
}
