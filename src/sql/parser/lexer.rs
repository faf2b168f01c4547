//! SQL Lexer - Tokenizes SQL input text into a stream of tokens

use std::{fmt::Display, iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Represents a single lexical token in the SQL input
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// SQL keyword
    Keyword(Keyword),
    /// Identifier such as table name or column name
    Ident(String),
    /// String literal
    String(String),
    /// Numeric literal (integer or decimal)
    Number(String),
    /// Positional parameter `$n`
    Param(usize),
    /// Operators and punctuation
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Asterisk,
    Plus,
    Minus,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => f.write_str(keyword.to_str()),
            Token::Ident(ident) => f.write_str(ident),
            Token::String(v) => write!(f, "'{}'", v),
            Token::Number(n) => f.write_str(n),
            Token::Param(n) => write!(f, "${}", n),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::Asterisk => f.write_str("*"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Equal => f.write_str("="),
            Token::NotEqual => f.write_str("<>"),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
        }
    }
}

/// SQL keywords
///
/// Reserved keywords can never be identifiers; the rest are only keywords
/// where the grammar expects them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    // DDL keywords
    Create,
    Table,
    Drop,
    Alter,
    Rename,
    To,
    Add,
    Column,
    Type,
    Data,
    If,
    Exists,
    // Data type keywords
    Bigint,
    Int8,
    Varchar,
    Date,
    Timestamp,
    // DML keywords
    Select,
    From,
    Where,
    Insert,
    Into,
    Values,
    Returning,
    Update,
    Set,
    Delete,
    // Transaction control
    Commit,
    Rollback,
    // Literal keywords
    True,
    False,
    Not,
    Null,
    // Constraint keywords
    Primary,
    Key,
    // Recognized but unsupported
    All,
    And,
    As,
    By,
    Group,
    Having,
    Limit,
    Or,
    Order,
    Union,
    User,
}

/// PostgreSQL's fully reserved key words, sorted
///
/// These can never name a table or column, whether or not the grammar
/// here uses them.
const RESERVED_WORDS: [&str; 78] = [
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "both",
    "case", "cast", "check", "collate", "column", "constraint", "create", "current_catalog",
    "current_date", "current_role", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false",
    "fetch", "for", "foreign", "from", "grant", "group", "having", "in", "initially",
    "intersect", "into", "lateral", "leading", "limit", "localtime", "localtimestamp", "not",
    "null", "offset", "on", "only", "or", "order", "placing", "primary", "references",
    "returning", "select", "session_user", "some", "symmetric", "system_user", "table",
    "then", "to", "trailing", "true", "union", "unique", "user", "using", "variadic", "when",
    "where", "window", "with",
];

/// Whether `word` is reserved in PostgreSQL (ASCII case-insensitive)
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS
        .binary_search(&word.to_ascii_lowercase().as_str())
        .is_ok()
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_ascii_uppercase().as_ref() {
            "CREATE" => Keyword::Create,
            "TABLE" => Keyword::Table,
            "DROP" => Keyword::Drop,
            "ALTER" => Keyword::Alter,
            "RENAME" => Keyword::Rename,
            "TO" => Keyword::To,
            "ADD" => Keyword::Add,
            "COLUMN" => Keyword::Column,
            "TYPE" => Keyword::Type,
            "DATA" => Keyword::Data,
            "IF" => Keyword::If,
            "EXISTS" => Keyword::Exists,
            "BIGINT" => Keyword::Bigint,
            "INT8" => Keyword::Int8,
            "VARCHAR" => Keyword::Varchar,
            "DATE" => Keyword::Date,
            "TIMESTAMP" => Keyword::Timestamp,
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "RETURNING" => Keyword::Returning,
            "UPDATE" => Keyword::Update,
            "SET" => Keyword::Set,
            "DELETE" => Keyword::Delete,
            "COMMIT" => Keyword::Commit,
            "ROLLBACK" => Keyword::Rollback,
            "TRUE" => Keyword::True,
            "FALSE" => Keyword::False,
            "NOT" => Keyword::Not,
            "NULL" => Keyword::Null,
            "PRIMARY" => Keyword::Primary,
            "KEY" => Keyword::Key,
            "ALL" => Keyword::All,
            "AND" => Keyword::And,
            "AS" => Keyword::As,
            "BY" => Keyword::By,
            "GROUP" => Keyword::Group,
            "HAVING" => Keyword::Having,
            "LIMIT" => Keyword::Limit,
            "OR" => Keyword::Or,
            "ORDER" => Keyword::Order,
            "UNION" => Keyword::Union,
            "USER" => Keyword::User,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &'static str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Drop => "DROP",
            Keyword::Alter => "ALTER",
            Keyword::Rename => "RENAME",
            Keyword::To => "TO",
            Keyword::Add => "ADD",
            Keyword::Column => "COLUMN",
            Keyword::Type => "TYPE",
            Keyword::Data => "DATA",
            Keyword::If => "IF",
            Keyword::Exists => "EXISTS",
            Keyword::Bigint => "BIGINT",
            Keyword::Int8 => "INT8",
            Keyword::Varchar => "VARCHAR",
            Keyword::Date => "DATE",
            Keyword::Timestamp => "TIMESTAMP",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Returning => "RETURNING",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Delete => "DELETE",
            Keyword::Commit => "COMMIT",
            Keyword::Rollback => "ROLLBACK",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Not => "NOT",
            Keyword::Null => "NULL",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
            Keyword::All => "ALL",
            Keyword::And => "AND",
            Keyword::As => "AS",
            Keyword::By => "BY",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::Limit => "LIMIT",
            Keyword::Or => "OR",
            Keyword::Order => "ORDER",
            Keyword::Union => "UNION",
            Keyword::User => "USER",
        }
    }

    /// Whether the keyword is reserved in PostgreSQL
    pub fn is_reserved(&self) -> bool {
        is_reserved_word(self.to_str())
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// SQL lexical analyzer (lexer/tokenizer)
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self.iter.peek().map(|c| {
                Err(Error::SyntaxError(format!(
                    "[Lexer] Unexpected character {}",
                    c
                )))
            }),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given SQL text
    pub fn new(sql_text: &'a str) -> Self {
        Self {
            iter: sql_text.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Peeks and consumes if the character maps to a token (for single-char tokens)
    fn next_if_token<F: Fn(char) -> Option<Token>>(&mut self, predicate: F) -> Option<Token> {
        let token = self.iter.peek().and_then(|c| predicate(*c))?;
        self.iter.next();
        Some(token)
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some('\'') => self.scan_string(),
            Some('"') => self.scan_quoted_ident(),
            Some('$') => self.scan_param(),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some(c) if c.is_alphabetic() || *c == '_' => Ok(self.scan_ident()),
            Some('!') => {
                self.iter.next();
                match self.next_if(|c| c == '=') {
                    Some(_) => Ok(Some(Token::NotEqual)),
                    None => Err(Error::SyntaxError("[Lexer] Unexpected character !".into())),
                }
            }
            Some(_) => Ok(self.scan_symbol()),
            None => Ok(None),
        }
    }

    /// Scans a string literal; `''` inside the quotes is an escaped quote
    fn scan_string(&mut self) -> Result<Option<Token>> {
        self.iter.next();
        let mut val = String::new();

        loop {
            match self.iter.next() {
                Some('\'') if self.next_if(|c| c == '\'').is_some() => val.push('\''),
                Some('\'') => break,
                Some(c) => val.push(c),
                None => {
                    return Err(Error::SyntaxError(
                        "[Lexer] Unterminated quoted string".into(),
                    ));
                }
            }
        }
        Ok(Some(Token::String(val)))
    }

    /// Scans a double-quoted identifier, which keeps its case
    fn scan_quoted_ident(&mut self) -> Result<Option<Token>> {
        self.iter.next();
        let mut val = String::new();

        loop {
            match self.iter.next() {
                Some('"') if self.next_if(|c| c == '"').is_some() => val.push('"'),
                Some('"') => break,
                Some(c) => val.push(c),
                None => {
                    return Err(Error::SyntaxError(
                        "[Lexer] Unterminated quoted identifier".into(),
                    ));
                }
            }
        }
        if val.is_empty() {
            return Err(Error::SyntaxError("[Lexer] Zero-length delimited identifier".into()));
        }
        Ok(Some(Token::Ident(val)))
    }

    /// Scans a positional parameter such as `$1`
    fn scan_param(&mut self) -> Result<Option<Token>> {
        self.iter.next();
        let digits = self
            .next_while(|c| c.is_ascii_digit())
            .ok_or_else(|| Error::SyntaxError("[Lexer] Expected parameter number after $".into()))?;
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(Token::Param(n))),
            _ => Err(Error::SyntaxError(format!("[Lexer] Invalid parameter ${}", digits))),
        }
    }

    /// Scans a numeric literal (integer or decimal)
    fn scan_number(&mut self) -> Option<Token> {
        let mut val = self.next_while(|c| c.is_ascii_digit())?;
        if let Some(sep) = self.next_if(|c| c == '.') {
            val.push(sep);
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                val.push(c);
            }
        }
        Some(Token::Number(val))
    }

    /// Scans an identifier or keyword; unquoted identifiers fold ASCII letters to lower case
    fn scan_ident(&mut self) -> Option<Token> {
        let mut val = self.next_if(|c| c.is_alphabetic() || c == '_')?.to_string();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            val.push(c);
        }
        // Returns Keyword if matched, otherwise returns as a regular Ident
        Some(Keyword::from_str(&val).map_or(Token::Ident(val.to_ascii_lowercase()), Token::Keyword))
    }

    /// Scans a one- or two-character symbol token
    fn scan_symbol(&mut self) -> Option<Token> {
        if let Some(token) = self.next_if_token(|c| match c {
            '<' => Some(Token::LessThan),
            '>' => Some(Token::GreaterThan),
            _ => None,
        }) {
            return Some(match token {
                Token::LessThan if self.next_if(|c| c == '=').is_some() => Token::LessThanOrEqual,
                Token::LessThan if self.next_if(|c| c == '>').is_some() => Token::NotEqual,
                Token::GreaterThan if self.next_if(|c| c == '=').is_some() => {
                    Token::GreaterThanOrEqual
                }
                token => token,
            });
        }
        self.next_if_token(|c| match c {
            '*' => Some(Token::Asterisk),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '=' => Some(Token::Equal),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, RESERVED_WORDS, is_reserved_word};
    use crate::{
        error::{ErrorKind, Result},
        sql::parser::lexer::{Keyword, Token},
    };

    fn tokens(sql: &str) -> Result<Vec<Token>> {
        Lexer::new(sql).collect::<Result<Vec<_>>>()
    }

    #[test]
    fn test_lexer_create_table() -> Result<()> {
        let tokens1 = tokens(
            "CREATE TABLE IF NOT EXISTS people (index BIGINT NOT NULL PRIMARY KEY,
             name VARCHAR(50) NOT NULL, dateofbirth DATE NOT NULL);",
        )?;

        assert_eq!(
            tokens1[..12],
            [
                Token::Keyword(Keyword::Create),
                Token::Keyword(Keyword::Table),
                Token::Keyword(Keyword::If),
                Token::Keyword(Keyword::Not),
                Token::Keyword(Keyword::Exists),
                Token::Ident("people".to_string()),
                Token::OpenParen,
                Token::Ident("index".to_string()),
                Token::Keyword(Keyword::Bigint),
                Token::Keyword(Keyword::Not),
                Token::Keyword(Keyword::Null),
                Token::Keyword(Keyword::Primary),
            ]
        );
        assert_eq!(tokens1.last(), Some(&Token::Semicolon));
        Ok(())
    }

    #[test]
    fn test_lexer_insert_into() -> Result<()> {
        let tokens1 = tokens("insert into People values ($1, 'Павел''da', 4.55, -3) returning index;")?;

        assert_eq!(
            tokens1,
            vec![
                Token::Keyword(Keyword::Insert),
                Token::Keyword(Keyword::Into),
                Token::Ident("people".to_string()),
                Token::Keyword(Keyword::Values),
                Token::OpenParen,
                Token::Param(1),
                Token::Comma,
                Token::String("Павел'da".to_string()),
                Token::Comma,
                Token::Number("4.55".to_string()),
                Token::Comma,
                Token::Minus,
                Token::Number("3".to_string()),
                Token::CloseParen,
                Token::Keyword(Keyword::Returning),
                Token::Ident("index".to_string()),
                Token::Semicolon,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_identifiers() -> Result<()> {
        assert_eq!(
            tokens("Персона Persons_3$ \"MixedCase\" _x")?,
            vec![
                Token::Ident("Персона".to_string()),
                Token::Ident("persons_3$".to_string()),
                Token::Ident("MixedCase".to_string()),
                Token::Ident("_x".to_string()),
            ]
        );
        assert_eq!(tokens("GROUP")?, vec![Token::Keyword(Keyword::Group)]);
        // only ASCII letters fold
        assert_eq!(
            tokens("ÉCOLE Straße")?,
            vec![Token::Ident("École".to_string()), Token::Ident("straße".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_reserved_words() {
        assert!(RESERVED_WORDS.windows(2).all(|w| w[0] < w[1]));
        for word in ["distinct", "DEFAULT", "Check", "unique", "with", "only", "group"] {
            assert!(is_reserved_word(word), "{}", word);
        }
        for word in ["by", "key", "type", "index", "name", "distinctive", "ſelect"] {
            assert!(!is_reserved_word(word), "{}", word);
        }
        assert!(!Keyword::By.is_reserved());
        assert!(Keyword::Returning.is_reserved());
    }

    #[test]
    fn test_lexer_operators() -> Result<()> {
        assert_eq!(
            tokens("= <> != < <= > >=")?,
            vec![
                Token::Equal,
                Token::NotEqual,
                Token::NotEqual,
                Token::LessThan,
                Token::LessThanOrEqual,
                Token::GreaterThan,
                Token::GreaterThanOrEqual,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_errors() {
        for sql in ["'unterminated", "select #", "$x", "$0", "a ! b", "\"\""] {
            let err = tokens(sql).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SyntaxError, "{}", sql);
        }
    }
}
