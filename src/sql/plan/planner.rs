use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{self, Projection},
        plan::{Node, Plan},
        schema::Table,
    },
};

/// Query planner - converts AST into execution plan nodes
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self {}
    }

    /// Builds an execution plan from an AST statement
    pub fn build(&mut self, stmt: ast::Statement) -> Result<Plan> {
        Ok(Plan(self.build_statement(stmt)?))
    }

    pub fn build_statement(&self, stmt: ast::Statement) -> Result<Node> {
        Ok(match stmt {
            ast::Statement::CreateTable {
                name,
                columns,
                if_not_exists,
            } => Node::CreateTable {
                schema: Table::new(name, columns),
                if_not_exists,
            },
            ast::Statement::DropTable { name, if_exists } => Node::DropTable { name, if_exists },
            ast::Statement::AlterTable { table, operation } => Node::AlterTable {
                table_name: table,
                operation,
            },
            ast::Statement::Insert {
                table,
                columns,
                values,
                returning,
            } => Node::Insert {
                table_name: table,
                columns,
                values,
                returning,
            },
            ast::Statement::Select {
                table,
                columns,
                predicate,
            } => {
                let node = Node::Scan {
                    table_name: table,
                    filter: predicate,
                };
                match columns {
                    Projection::All => node,
                    columns => Node::Projection {
                        source: Box::new(node),
                        columns,
                    },
                }
            }
            ast::Statement::Update {
                table,
                set,
                predicate,
                returning,
            } => Node::Update {
                table_name: table.clone(),
                source: Box::new(Node::Scan {
                    table_name: table,
                    filter: predicate,
                }),
                columns: set,
                returning,
            },
            ast::Statement::Delete {
                table,
                predicate,
                returning,
            } => Node::Delete {
                table_name: table.clone(),
                source: Box::new(Node::Scan {
                    table_name: table,
                    filter: predicate,
                }),
                returning,
            },
            // transaction control is handled by the session, never planned
            ast::Statement::Commit | ast::Statement::Rollback => {
                return Err(Error::Internal(
                    "transaction control statements cannot be planned".into(),
                ));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{ErrorKind, Result},
        sql::{
            parser::{Parser, ast::Projection},
            plan::{Node, Plan},
        },
    };

    fn plan(sql: &str) -> Result<Node> {
        Ok(Plan::build(Parser::new(sql).parse()?)?.0)
    }

    #[test]
    fn test_plan_select() -> Result<()> {
        assert!(matches!(
            plan("select * from people")?,
            Node::Scan { filter: None, .. }
        ));
        match plan("select name from people where index = 1")? {
            Node::Projection { source, columns } => {
                assert_eq!(columns, Projection::Columns(vec!["name".to_string()]));
                assert!(matches!(*source, Node::Scan { filter: Some(_), .. }));
            }
            node => panic!("unexpected plan {:?}", node),
        }
        Ok(())
    }

    #[test]
    fn test_plan_mutations() -> Result<()> {
        match plan("update people set name = 'x' where index = 1 returning index")? {
            Node::Update {
                table_name,
                source,
                returning,
                ..
            } => {
                assert_eq!(table_name, "people");
                assert!(matches!(*source, Node::Scan { filter: Some(_), .. }));
                assert!(returning.is_some());
            }
            node => panic!("unexpected plan {:?}", node),
        }
        assert!(matches!(
            plan("delete from people")?,
            Node::Delete { returning: None, .. }
        ));
        assert_eq!(plan("commit").unwrap_err().kind(), ErrorKind::Internal);
        Ok(())
    }
}
