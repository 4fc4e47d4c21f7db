use crate::tokens::Token;

/// A literal or variable reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Ident(String),
    Str(String),
}

impl Value {
    /// Convert a value token, handing other tokens back unchanged.
    pub fn from_token(token: Token) -> Result<Self, Token> {
        match token {
            Token::Number(n) => Ok(Value::Number(n)),
            Token::Ident(name) => Ok(Value::Ident(name)),
            Token::Str(s) | Token::LongStr(s) => Ok(Value::Str(s)),
            other => Err(other),
        }
    }
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `print <value>;`
    Print(Value),
    /// `let <ident> = <value>;`
    Let { name: String, value: Value },
}
