use docstore_core::api::Database;
use docstore_core::error::Error;
use docstore_core::types::{FieldDefinition, Record};
use serde_json::Value;

use crate::commands::Command;

/// Structured result from executing a command.
#[derive(Debug)]
pub enum CommandResult {
    /// Mutation succeeded (CREATE, DROP, INSERT).
    Ok(String),
    /// Number of rows touched (UPDATE, DELETE).
    Affected { verb: &'static str, count: usize },
    /// Records returned (SELECT, SCAN).
    Records(Vec<Record>),
    /// Table list (LIST TABLES).
    TableList(Vec<String>),
    /// Declared fields of a table (DESCRIBE TABLE).
    Fields {
        table: String,
        fields: Vec<FieldDefinition>,
    },
    /// Help text.
    Help,
    /// Exit signal.
    Exit,
}

/// Execute a parsed command against the database.
pub fn execute(db: &Database, cmd: Command) -> Result<CommandResult, Error> {
    match cmd {
        Command::CreateDatabase => {
            db.create_database()?;
            Ok(CommandResult::Ok(format!("Database '{}' created.", db.name())))
        }
        Command::DropDatabase => {
            db.drop_database()?;
            Ok(CommandResult::Ok(format!("Database '{}' dropped.", db.name())))
        }
        Command::CreateTable { name } => {
            db.create_table(&name)?;
            Ok(CommandResult::Ok(format!("Table '{name}' created.")))
        }
        Command::DropTable { name } => {
            db.drop_table(&name)?;
            Ok(CommandResult::Ok(format!("Table '{name}' dropped.")))
        }
        Command::ListTables => Ok(CommandResult::TableList(db.list_tables()?)),
        Command::DescribeTable { name } => {
            let fields = db.describe_table(&name)?;
            Ok(CommandResult::Fields {
                table: name,
                fields,
            })
        }
        Command::CreateField {
            table,
            name,
            field_type,
            nullable,
            default,
            primary_key,
        } => exec_create_field(db, &table, &name, field_type, nullable, default, primary_key),
        Command::DropField { table, name } => {
            db.drop_field(&table, &name)?;
            Ok(CommandResult::Ok(format!(
                "Field '{name}' dropped from '{table}'."
            )))
        }
        Command::Insert { table, record } => {
            db.insert(&table, record)?;
            Ok(CommandResult::Ok("OK".to_string()))
        }
        Command::Select { table, fields } => {
            Ok(CommandResult::Records(db.select(&table, fields.as_slice())?))
        }
        Command::Scan { table } => Ok(CommandResult::Records(db.scan(&table)?)),
        Command::Update {
            table,
            set,
            condition,
        } => {
            let count = db.update(&table, condition, set)?;
            Ok(CommandResult::Affected {
                verb: "Updated",
                count,
            })
        }
        Command::Delete { table, condition } => {
            let count = db.delete(&table, condition)?;
            Ok(CommandResult::Affected {
                verb: "Deleted",
                count,
            })
        }
        Command::Help => Ok(CommandResult::Help),
        Command::Exit => Ok(CommandResult::Exit),
    }
}

fn exec_create_field(
    db: &Database,
    table: &str,
    name: &str,
    field_type: Option<String>,
    nullable: bool,
    default: Option<Value>,
    primary_key: bool,
) -> Result<CommandResult, Error> {
    let mut builder = db
        .create_field(table, name)
        .nullable(nullable)
        .primary_key(primary_key);
    if let Some(field_type) = field_type {
        builder = builder.field_type(&field_type);
    }
    if let Some(default) = default {
        builder = builder.default_value(default);
    }
    builder.execute()?;
    Ok(CommandResult::Ok(format!(
        "Field '{name}' added to '{table}'."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use docstore_core::error::ErrorKind;
    use serde_json::json;

    fn run(db: &Database, line: &str) -> Result<CommandResult, Error> {
        execute(db, parse(line).unwrap())
    }

    fn setup() -> Database {
        let db = Database::in_memory("shop").unwrap();
        run(&db, "CREATE DATABASE").unwrap();
        run(&db, "CREATE TABLE users").unwrap();
        run(&db, "CREATE FIELD users id TYPE number PRIMARY KEY").unwrap();
        run(&db, "CREATE FIELD users name TYPE string").unwrap();
        db
    }

    #[test]
    fn test_schema_commands() {
        let db = setup();
        match run(&db, "LIST TABLES").unwrap() {
            CommandResult::TableList(tables) => assert_eq!(tables, vec!["users"]),
            other => panic!("unexpected result: {other:?}"),
        }
        match run(&db, "DESCRIBE TABLE users").unwrap() {
            CommandResult::Fields { table, fields } => {
                assert_eq!(table, "users");
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field_type, "number");
                assert!(fields[0].primary_key);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_row_commands() {
        let db = setup();
        run(&db, r#"INSERT users {"id": 1, "name": "Alice"}"#).unwrap();
        run(&db, r#"INSERT users {"id": 2, "name": "Bob"}"#).unwrap();

        match run(&db, r#"UPDATE users SET {"name": "Bo"} WHERE {"id": 2}"#).unwrap() {
            CommandResult::Affected { count, .. } => assert_eq!(count, 1),
            other => panic!("unexpected result: {other:?}"),
        }
        match run(&db, "SELECT name FROM users").unwrap() {
            CommandResult::Records(rows) => {
                let rows: Vec<Value> = rows.into_iter().map(Value::Object).collect();
                assert_eq!(rows, vec![json!({"name": "Alice"}), json!({"name": "Bo"})]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        match run(&db, r#"DELETE FROM users WHERE {"id": 1}"#).unwrap() {
            CommandResult::Affected { count, .. } => assert_eq!(count, 1),
            other => panic!("unexpected result: {other:?}"),
        }
        match run(&db, "SCAN users").unwrap() {
            CommandResult::Records(rows) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_errors_propagate() {
        let db = setup();
        let err = run(&db, "SCAN orders").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = run(&db, r#"INSERT users {"id": 1}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = run(&db, "CREATE DATABASE").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_drop_field_and_database() {
        let db = setup();
        run(&db, r#"INSERT users {"id": 1, "name": "Alice"}"#).unwrap();
        run(&db, "DROP FIELD users name").unwrap();
        match run(&db, "SCAN users").unwrap() {
            CommandResult::Records(rows) => {
                assert_eq!(Value::Object(rows[0].clone()), json!({"id": 1}))
            }
            other => panic!("unexpected result: {other:?}"),
        }
        run(&db, "DROP DATABASE").unwrap();
        assert!(!db.database_exists().unwrap());
    }

    #[test]
    fn test_help_and_exit() {
        let db = Database::in_memory("shop").unwrap();
        assert!(matches!(run(&db, "HELP").unwrap(), CommandResult::Help));
        assert!(matches!(run(&db, "EXIT").unwrap(), CommandResult::Exit));
    }
}
