use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{AlterOperation, Comparison, Predicate, Projection};
use crate::sql::parser::lexer::{Keyword, Lexer, Token, is_reserved_word};
use crate::sql::schema::Column;
use crate::sql::types::{DataType, coerce::Literal};

pub mod ast;
mod lexer;

/// Whether `ident` is a reserved word and so can never name a table or column
pub fn is_reserved_keyword(ident: &str) -> bool {
    is_reserved_word(ident)
}

/// SQL Parser - Converts tokens into Abstract Syntax Tree (AST)
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
    /// Values bound to `$1`, `$2`, ...
    params: &'a [Literal],
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given SQL input
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input).peekable(),
            params: &[],
        }
    }

    /// Binds positional parameters
    pub fn with_params(mut self, params: &'a [Literal]) -> Self {
        self.params = params;
        self
    }

    /// Parses the input SQL statement into an AST
    pub fn parse(&mut self) -> Result<ast::Statement> {
        let stmt = self.parse_statement()?;
        self.next_if_token(Token::Semicolon);
        // No tokens allowed after the statement
        if let Some(token) = self.peek()? {
            return Err(unexpected(&token));
        }
        Ok(stmt)
    }

    /// Parses a statement based on the first token
    fn parse_statement(&mut self) -> Result<ast::Statement> {
        match self.peek()? {
            Some(Token::Keyword(Keyword::Create)) => self.parse_ddl_create_table(),
            Some(Token::Keyword(Keyword::Drop)) => self.parse_ddl_drop_table(),
            Some(Token::Keyword(Keyword::Alter)) => self.parse_ddl_alter_table(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Update)) => self.parse_update(),
            Some(Token::Keyword(Keyword::Delete)) => self.parse_delete(),
            Some(Token::Keyword(Keyword::Commit)) => {
                self.next()?;
                Ok(ast::Statement::Commit)
            }
            Some(Token::Keyword(Keyword::Rollback)) => {
                self.next()?;
                Ok(ast::Statement::Rollback)
            }
            Some(t) => Err(unexpected(&t)),
            None => Err(Error::SyntaxError("[Parser] Unexpected end of input".into())),
        }
    }

    /// Parses CREATE TABLE statement
    fn parse_ddl_create_table(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Create))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let if_not_exists = self.next_if_token(Token::Keyword(Keyword::If)).is_some();
        if if_not_exists {
            self.next_expect(Token::Keyword(Keyword::Not))?;
            self.next_expect(Token::Keyword(Keyword::Exists))?;
        }
        let name = self.next_ident()?;
        self.next_expect(Token::OpenParen)?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_ddl_column()?);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;
        Ok(ast::Statement::CreateTable {
            name,
            columns,
            if_not_exists,
        })
    }

    /// Parses DROP TABLE statement
    fn parse_ddl_drop_table(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Drop))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let if_exists = self.next_if_token(Token::Keyword(Keyword::If)).is_some();
        if if_exists {
            self.next_expect(Token::Keyword(Keyword::Exists))?;
        }
        Ok(ast::Statement::DropTable {
            name: self.next_ident()?,
            if_exists,
        })
    }

    /// Parses ALTER TABLE statement
    fn parse_ddl_alter_table(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Alter))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let table = self.next_ident()?;

        let operation = match self.next()? {
            Token::Keyword(Keyword::Rename) => {
                if self.next_if_token(Token::Keyword(Keyword::To)).is_some() {
                    AlterOperation::RenameTable {
                        new_name: self.next_ident()?,
                    }
                } else {
                    self.next_if_token(Token::Keyword(Keyword::Column));
                    let old_name = self.next_ident()?;
                    self.next_expect(Token::Keyword(Keyword::To))?;
                    AlterOperation::RenameColumn {
                        old_name,
                        new_name: self.next_ident()?,
                    }
                }
            }
            Token::Keyword(Keyword::Add) => {
                self.next_if_token(Token::Keyword(Keyword::Column));
                AlterOperation::AddColumn {
                    column: self.parse_ddl_column()?,
                }
            }
            Token::Keyword(Keyword::Drop) => {
                self.next_if_token(Token::Keyword(Keyword::Column));
                AlterOperation::DropColumn {
                    name: self.next_ident()?,
                }
            }
            Token::Keyword(Keyword::Alter) => {
                self.next_if_token(Token::Keyword(Keyword::Column));
                let name = self.next_ident()?;
                if self.next_if_token(Token::Keyword(Keyword::Set)).is_some() {
                    self.next_expect(Token::Keyword(Keyword::Data))?;
                }
                self.next_expect(Token::Keyword(Keyword::Type))?;
                AlterOperation::AlterColumnType {
                    name,
                    datatype: self.parse_datatype()?,
                }
            }
            token => return Err(unexpected(&token)),
        };
        Ok(ast::Statement::AlterTable { table, operation })
    }

    /// Parses column definition in CREATE TABLE / ADD COLUMN
    fn parse_ddl_column(&mut self) -> Result<Column> {
        let name = self.next_ident()?;
        let mut column = Column::new(name, self.parse_datatype()?);

        // Parse column constraints (NULL, NOT NULL, PRIMARY KEY)
        while let Some(Token::Keyword(keyword)) = self.next_if_keyword() {
            match keyword {
                Keyword::Null => column.nullable = true,
                Keyword::Not => {
                    self.next_expect(Token::Keyword(Keyword::Null))?;
                    column.nullable = false;
                }
                Keyword::Primary => {
                    self.next_expect(Token::Keyword(Keyword::Key))?;
                    column = column.primary_key();
                }
                k => return Err(unexpected(&Token::Keyword(k))),
            }
        }
        if column.primary_key && column.nullable {
            return Err(Error::SyntaxError(format!(
                "conflicting NULL/NOT NULL declarations for column \"{}\"",
                column.name
            )));
        }

        Ok(column)
    }

    fn parse_datatype(&mut self) -> Result<DataType> {
        Ok(match self.next()? {
            Token::Keyword(Keyword::Bigint) | Token::Keyword(Keyword::Int8) => DataType::BigInt,
            Token::Keyword(Keyword::Date) => DataType::Date,
            Token::Keyword(Keyword::Timestamp) => DataType::Timestamp,
            Token::Keyword(Keyword::Varchar) => {
                self.next_expect(Token::OpenParen)?;
                let length = match self.next()? {
                    Token::Number(n) => n.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                        Error::SyntaxError(format!("length for type varchar must be positive, got {}", n))
                    })?,
                    token => return Err(unexpected(&token)),
                };
                self.next_expect(Token::CloseParen)?;
                DataType::VarChar(length)
            }
            token => return Err(unexpected(&token)),
        })
    }

    /// Parses SELECT statement
    fn parse_select(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Select))?;
        let columns = self.parse_projection()?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        Ok(ast::Statement::Select {
            table: self.next_ident()?,
            columns,
            predicate: self.parse_where_clause()?,
        })
    }

    /// Parses INSERT statement
    fn parse_insert(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        self.next_expect(Token::Keyword(Keyword::Into))?;

        let table = self.next_ident()?;

        // Check if specific columns are specified
        let columns = if self.next_if_token(Token::OpenParen).is_some() {
            let mut cols = Vec::new();
            loop {
                cols.push(self.next_ident()?);
                match self.next()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => return Err(unexpected(&token)),
                }
            }
            Some(cols)
        } else {
            None
        };

        self.next_expect(Token::Keyword(Keyword::Values))?;
        // Parse multiple value rows: INSERT INTO tbl VALUES (1,2),(3,4);
        let mut values = Vec::new();
        loop {
            self.next_expect(Token::OpenParen)?;
            let mut row = Vec::new();
            loop {
                row.push(self.parse_literal()?);
                match self.next()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => return Err(unexpected(&token)),
                }
            }
            if let Some(cols) = &columns {
                if row.len() > cols.len() {
                    return Err(Error::SyntaxError(
                        "INSERT has more expressions than target columns".into(),
                    ));
                }
                if row.len() < cols.len() {
                    return Err(Error::SyntaxError(
                        "INSERT has more target columns than expressions".into(),
                    ));
                }
            }
            values.push(row);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(ast::Statement::Insert {
            table,
            columns,
            values,
            returning: self.parse_returning()?,
        })
    }

    /// Parses UPDATE statement
    fn parse_update(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Update))?;
        let table = self.next_ident()?;
        self.next_expect(Token::Keyword(Keyword::Set))?;

        let mut set: Vec<(String, Literal)> = Vec::new();
        loop {
            let col = self.next_ident()?;
            self.next_expect(Token::Equal)?;
            let value = self.parse_literal()?;
            // a=1 and a=2 in the same statement
            if set.iter().any(|(c, _)| *c == col) {
                return Err(Error::SyntaxError(format!(
                    "multiple assignments to same column \"{}\"",
                    col
                )));
            }
            set.push((col, value));
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(ast::Statement::Update {
            table,
            set,
            predicate: self.parse_where_clause()?,
            returning: self.parse_returning()?,
        })
    }

    /// Parses DELETE statement
    fn parse_delete(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Delete))?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        Ok(ast::Statement::Delete {
            table: self.next_ident()?,
            predicate: self.parse_where_clause()?,
            returning: self.parse_returning()?,
        })
    }

    /// Parses `*` or a comma separated column list
    fn parse_projection(&mut self) -> Result<Projection> {
        if self.next_if_token(Token::Asterisk).is_some() {
            return Ok(Projection::All);
        }
        let mut columns = vec![self.next_ident()?];
        while self.next_if_token(Token::Comma).is_some() {
            columns.push(self.next_ident()?);
        }
        Ok(Projection::Columns(columns))
    }

    fn parse_returning(&mut self) -> Result<Option<Projection>> {
        if self.next_if_token(Token::Keyword(Keyword::Returning)).is_none() {
            return Ok(None);
        }
        Ok(Some(self.parse_projection()?))
    }

    /// Parses the WHERE clause: `column op literal`
    fn parse_where_clause(&mut self) -> Result<Option<Predicate>> {
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Ok(None);
        }
        let column = self.next_ident()?;
        let op = match self.next()? {
            Token::Equal => Comparison::Equal,
            Token::NotEqual => Comparison::NotEqual,
            Token::LessThan => Comparison::LessThan,
            Token::LessThanOrEqual => Comparison::LessThanOrEqual,
            Token::GreaterThan => Comparison::GreaterThan,
            Token::GreaterThanOrEqual => Comparison::GreaterThanOrEqual,
            token => return Err(unexpected(&token)),
        };
        Ok(Some(Predicate {
            column,
            op,
            value: self.parse_literal()?,
        }))
    }

    /// Parses a constant or a bound parameter
    fn parse_literal(&mut self) -> Result<Literal> {
        Ok(match self.next()? {
            Token::Number(n) => {
                // Lexer scans both 123 and 123.45 as Token::Number(String)
                if n.chars().all(|c| c.is_ascii_digit()) {
                    // too wide even for i128: keep it numeric so coercion reports the range error
                    match n.parse::<i128>() {
                        Ok(i) => Literal::Integer(i),
                        Err(_) => Literal::Float(parse_float(&n)?),
                    }
                } else {
                    Literal::Float(parse_float(&n)?)
                }
            }
            Token::String(s) => Literal::Text(s),
            Token::Param(n) => self.params.get(n - 1).cloned().ok_or_else(|| {
                Error::SyntaxError(format!("there is no parameter ${}", n))
            })?,
            Token::Keyword(Keyword::True) => Literal::Boolean(true),
            Token::Keyword(Keyword::False) => Literal::Boolean(false),
            Token::Keyword(Keyword::Null) => Literal::Null,
            Token::Plus => match self.parse_literal()? {
                literal @ (Literal::Integer(_) | Literal::Float(_)) => literal,
                literal => return Err(non_numeric_sign(&literal)),
            },
            Token::Minus => match self.parse_literal()? {
                // -i128::MIN does not fit; widen like an oversized integer literal
                Literal::Integer(i) => i
                    .checked_neg()
                    .map_or(Literal::Float(-(i as f64)), Literal::Integer),
                Literal::Float(f) => Literal::Float(-f),
                literal => return Err(non_numeric_sign(&literal)),
            },
            t => {
                return Err(Error::SyntaxError(format!(
                    "[Parser] Unexpected expression token {}",
                    t
                )));
            }
        })
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .unwrap_or_else(|| Err(Error::SyntaxError("[Parser] Unexpected end of input".into())))
    }

    /// Expects and consumes an identifier; non-reserved keywords qualify
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            Token::Keyword(keyword) if !keyword.is_reserved() => {
                Ok(keyword.to_str().to_ascii_lowercase())
            }
            token => Err(unexpected(&token)),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::SyntaxError(format!(
                "[Parser] Expected token {}, got {}",
                expect, token
            )));
        }
        Ok(())
    }

    /// Consumes next token if it satisfies the predicate
    fn next_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> Option<Token> {
        self.peek().unwrap_or(None).filter(|t| predicate(t))?;
        self.next().ok()
    }

    /// Consumes next token if it's a keyword
    fn next_if_keyword(&mut self) -> Option<Token> {
        self.next_if(|t| matches!(t, Token::Keyword(_)))
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.next_if(|t| t == &token)
    }
}

fn unexpected(token: &Token) -> Error {
    Error::SyntaxError(format!("syntax error at or near \"{}\"", token))
}

fn parse_float(n: &str) -> Result<f64> {
    n.parse()
        .map_err(|_| Error::SyntaxError(format!("invalid numeric literal {}", n)))
}

fn non_numeric_sign(literal: &Literal) -> Error {
    Error::SyntaxError(format!("sign applied to non-numeric literal {:?}", literal))
}

#[cfg(test)]
mod tests {
    use super::{Parser, is_reserved_keyword};
    use crate::{
        error::{ErrorKind, Result},
        sql::{
            parser::ast::{AlterOperation, Comparison, Predicate, Projection, Statement},
            schema::Column,
            types::{DataType, coerce::Literal},
        },
    };

    fn syntax_error(sql: &str) -> ErrorKind {
        Parser::new(sql).parse().unwrap_err().kind()
    }

    #[test]
    fn test_parser_create_table() -> Result<()> {
        let sql1 = "
            CREATE TABLE IF NOT EXISTS people (
                index BIGINT NOT NULL PRIMARY KEY,
                name VARCHAR(50) NOT NULL,
                dateofbirth DATE NOT NULL
            );
        ";
        let stmt1 = Parser::new(sql1).parse()?;
        assert_eq!(
            stmt1,
            Statement::CreateTable {
                name: "people".to_string(),
                columns: vec![
                    Column::new("index", DataType::BigInt).primary_key(),
                    Column::new("name", DataType::VarChar(50)).not_null(),
                    Column::new("dateofbirth", DataType::Date).not_null(),
                ],
                if_not_exists: true,
            }
        );

        let sql2 = "
        create            table if not exists people (
            index bigint not null    primary key,
            name   varchar( 50 ) not null     ,
            dateofbirth date not null )
        ";
        let stmt2 = Parser::new(sql2).parse()?;
        assert_eq!(stmt1, stmt2);

        let stmt3 = Parser::new("create table t (a int8 primary key, b timestamp null)").parse()?;
        assert_eq!(
            stmt3,
            Statement::CreateTable {
                name: "t".to_string(),
                columns: vec![
                    Column::new("a", DataType::BigInt).primary_key(),
                    Column::new("b", DataType::Timestamp),
                ],
                if_not_exists: false,
            }
        );

        for sql in [
            "create table t (a bigint primary key",
            "create table t (a bigint primary key);;",
            "create table t (a varchar primary key)",
            "create table t (a varchar(0) primary key)",
            "create table t (a bigint primary key null)",
            "create table group (a bigint primary key)",
            "create table t (order bigint primary key)",
        ] {
            assert_eq!(syntax_error(sql), ErrorKind::SyntaxError, "{}", sql);
        }
        Ok(())
    }

    #[test]
    fn test_parser_drop_table() -> Result<()> {
        assert_eq!(
            Parser::new("DROP TABLE IF EXISTS people;").parse()?,
            Statement::DropTable {
                name: "people".to_string(),
                if_exists: true,
            }
        );
        assert_eq!(
            Parser::new("drop table People").parse()?,
            Statement::DropTable {
                name: "people".to_string(),
                if_exists: false,
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_alter_table() -> Result<()> {
        let cases = [
            (
                "ALTER TABLE people RENAME TO Персона",
                AlterOperation::RenameTable {
                    new_name: "Персона".to_string(),
                },
            ),
            (
                "alter table people rename column name to \"Имя\"",
                AlterOperation::RenameColumn {
                    old_name: "name".to_string(),
                    new_name: "Имя".to_string(),
                },
            ),
            (
                "alter table people rename name to key",
                AlterOperation::RenameColumn {
                    old_name: "name".to_string(),
                    new_name: "key".to_string(),
                },
            ),
            (
                "alter table people add column price$ bigint not null",
                AlterOperation::AddColumn {
                    column: Column::new("price$", DataType::BigInt).not_null(),
                },
            ),
            (
                "alter table people add date date",
                AlterOperation::AddColumn {
                    column: Column::new("date", DataType::Date),
                },
            ),
            (
                "alter table people drop column name",
                AlterOperation::DropColumn {
                    name: "name".to_string(),
                },
            ),
            (
                "alter table people alter column dateofbirth type timestamp",
                AlterOperation::AlterColumnType {
                    name: "dateofbirth".to_string(),
                    datatype: DataType::Timestamp,
                },
            ),
            (
                "alter table people alter dateofbirth set data type varchar(10);",
                AlterOperation::AlterColumnType {
                    name: "dateofbirth".to_string(),
                    datatype: DataType::VarChar(10),
                },
            ),
        ];
        for (sql, operation) in cases {
            assert_eq!(
                Parser::new(sql).parse()?,
                Statement::AlterTable {
                    table: "people".to_string(),
                    operation,
                },
                "{}",
                sql
            );
        }

        for sql in [
            "alter table people rename to group",
            "ALTER TABLE people RENAME TO GROUP",
            "alter table people rename column name to order",
            "alter table people add column select bigint",
            "alter table people alter column name type text",
            "alter table people truncate",
        ] {
            assert_eq!(syntax_error(sql), ErrorKind::SyntaxError, "{}", sql);
        }
        Ok(())
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let stmt1 = Parser::new("insert into people values (1, 'Павел', '2000-01-01') returning index;")
            .parse()?;
        assert_eq!(
            stmt1,
            Statement::Insert {
                table: "people".to_string(),
                columns: None,
                values: vec![vec![1.into(), "Павел".into(), "2000-01-01".into()]],
                returning: Some(Projection::Columns(vec!["index".to_string()])),
            }
        );

        let stmt2 =
            Parser::new("insert into people (index, name) values (-3, null), (4.5, true)").parse()?;
        assert_eq!(
            stmt2,
            Statement::Insert {
                table: "people".to_string(),
                columns: Some(vec!["index".to_string(), "name".to_string()]),
                values: vec![
                    vec![(-3).into(), Literal::Null],
                    vec![4.5.into(), true.into()],
                ],
                returning: None,
            }
        );

        // wider than bigint, still a literal
        let stmt3 = Parser::new("insert into t values (9223372036854775808)").parse()?;
        assert_eq!(
            stmt3,
            Statement::Insert {
                table: "t".to_string(),
                columns: None,
                values: vec![vec![Literal::Integer(9223372036854775808)]],
                returning: None,
            }
        );

        for sql in [
            "insert into t (a) values (1, 2)",
            "insert into t (a, b) values (1)",
            "insert into t values (1",
            "insert into t values (-'a')",
        ] {
            assert_eq!(syntax_error(sql), ErrorKind::SyntaxError, "{}", sql);
        }
        Ok(())
    }

    #[test]
    fn test_parser_params() -> Result<()> {
        let params = [Literal::from(7), Literal::from("Имя"), Literal::Null];
        let stmt = Parser::new("INSERT INTO people VALUES ($1, $2, $3)")
            .with_params(&params)
            .parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "people".to_string(),
                columns: None,
                values: vec![params.to_vec()],
                returning: None,
            }
        );

        let err = Parser::new("select * from t where index = $2")
            .with_params(&params[..1])
            .parse()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);

        // negating the smallest integer parameter widens instead of overflowing
        let params = [Literal::Integer(i128::MIN), Literal::Integer(-4)];
        let stmt = Parser::new("SELECT * FROM people WHERE index = -$1")
            .with_params(&params)
            .parse()?;
        let Statement::Select { predicate: Some(predicate), .. } = stmt else {
            panic!("expected a filtered select");
        };
        assert_eq!(predicate.value, Literal::Float(-(i128::MIN as f64)));
        let stmt = Parser::new("SELECT * FROM people WHERE index = -$2")
            .with_params(&params)
            .parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "people".to_string(),
                columns: Projection::All,
                predicate: Some(Predicate::new("index", Comparison::Equal, 4)),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_update() -> Result<()> {
        let stmt = Parser::new("UPDATE people SET name = 'x', index = 5 WHERE index = 2 RETURNING *")
            .parse()?;
        assert_eq!(
            stmt,
            Statement::Update {
                table: "people".to_string(),
                set: vec![
                    ("name".to_string(), "x".into()),
                    ("index".to_string(), 5.into()),
                ],
                predicate: Some(Predicate::new("index", Comparison::Equal, 2)),
                returning: Some(Projection::All),
            }
        );

        assert_eq!(
            syntax_error("update people set name = 'a', name = 'b'"),
            ErrorKind::SyntaxError
        );
        Ok(())
    }

    #[test]
    fn test_parser_select_delete() -> Result<()> {
        let cases = [
            ("=", Comparison::Equal),
            ("<>", Comparison::NotEqual),
            ("!=", Comparison::NotEqual),
            ("<", Comparison::LessThan),
            ("<=", Comparison::LessThanOrEqual),
            (">", Comparison::GreaterThan),
            (">=", Comparison::GreaterThanOrEqual),
        ];
        for (op, comparison) in cases {
            let sql = format!("delete from people where dateofbirth {} '2000-01-01'", op);
            assert_eq!(
                Parser::new(&sql).parse()?,
                Statement::Delete {
                    table: "people".to_string(),
                    predicate: Some(Predicate::new("dateofbirth", comparison, "2000-01-01")),
                    returning: None,
                }
            );
        }

        assert_eq!(
            Parser::new("select index, name from people").parse()?,
            Statement::Select {
                table: "people".to_string(),
                columns: Projection::Columns(vec!["index".to_string(), "name".to_string()]),
                predicate: None,
            }
        );
        assert_eq!(
            Parser::new("SELECT * FROM people WHERE index = 1;").parse()?,
            Statement::Select {
                table: "people".to_string(),
                columns: Projection::All,
                predicate: Some(Predicate::new("index", Comparison::Equal, 1)),
            }
        );
        assert_eq!(syntax_error("select from people"), ErrorKind::SyntaxError);
        assert_eq!(syntax_error("select * from people group"), ErrorKind::SyntaxError);
        Ok(())
    }

    #[test]
    fn test_parser_transaction_control() -> Result<()> {
        assert_eq!(Parser::new("COMMIT;").parse()?, Statement::Commit);
        assert_eq!(Parser::new("rollback").parse()?, Statement::Rollback);
        assert_eq!(syntax_error(""), ErrorKind::SyntaxError);
        Ok(())
    }

    #[test]
    fn test_reserved_keywords() {
        for word in ["group", "GROUP", "order", "select", "table", "where", "distinct", "default"] {
            assert!(is_reserved_keyword(word), "{}", word);
        }
        for word in ["index", "name", "key", "date", "people", "type", "by"] {
            assert!(!is_reserved_keyword(word), "{}", word);
        }
    }
}
