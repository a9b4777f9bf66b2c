use thiserror::Error;

use crate::types::row::Row;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse '{0}'")]
    Syntax(String),

    #[error("String is too long")]
    StringTooLong,

    #[error("ID must be positive")]
    NegativeId,

    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),
}

/// Tokenizes one input line into a statement. The grammar is
/// `insert <id> <username> <email>` or `select`; tokens are separated by
/// whitespace and keywords are case-insensitive.
pub fn prepare_statement(input: &str) -> Result<Statement, PrepareError> {
    let input = input.trim();
    let mut tokens = input.split_whitespace();
    match tokens.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case("insert") => prepare_insert(input, tokens),
        Some(keyword) if keyword.eq_ignore_ascii_case("select") => Ok(Statement::Select),
        _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
    }
}

fn prepare_insert<'a, I>(input: &str, mut tokens: I) -> Result<Statement, PrepareError>
where
    I: Iterator<Item = &'a str>,
{
    let (Some(id), Some(username), Some(email)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(PrepareError::Syntax(input.to_string()));
    };

    let id: i64 = id
        .parse()
        .map_err(|_| PrepareError::Syntax(input.to_string()))?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::Syntax(input.to_string()))?;

    let row = Row::new(id, username, email).map_err(|_| PrepareError::StringTooLong)?;
    Ok(Statement::Insert(row))
}
