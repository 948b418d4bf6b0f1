use docstore_core::types::{FieldDefinition, Record};
use serde_json::{Value, json};

use crate::executor::CommandResult;

/// Output mode for rendering command results.
pub enum OutputMode {
    /// Human-readable pretty-printed output.
    Pretty,
    /// Machine-parseable JSON (one JSON object per result on stdout).
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

/// Render a command result to stdout in the given mode.
///
/// Returns `true` to continue execution, `false` to signal exit.
pub fn render(result: &CommandResult, mode: &OutputMode) -> bool {
    match result {
        CommandResult::Ok(msg) => match mode {
            OutputMode::Pretty => print_ok(msg),
            OutputMode::Json => println!("{}", json!({"ok": true, "message": msg})),
        },
        CommandResult::Affected { verb, count } => match mode {
            OutputMode::Pretty => println!("{verb} {count} record(s)."),
            OutputMode::Json => println!("{}", json!({"ok": true, "count": count})),
        },
        CommandResult::Records(records) => match mode {
            OutputMode::Pretty => print_records(records),
            OutputMode::Json => println!(
                "{}",
                json!({"records": records, "count": records.len()})
            ),
        },
        CommandResult::TableList(tables) => match mode {
            OutputMode::Pretty => print_table_list(tables),
            OutputMode::Json => println!("{}", json!({"tables": tables})),
        },
        CommandResult::Fields { table, fields } => match mode {
            OutputMode::Pretty => print_fields(table, fields),
            OutputMode::Json => println!("{}", json!({"name": table, "fields": fields})),
        },
        CommandResult::Help => match mode {
            OutputMode::Pretty => print_help(),
            OutputMode::Json => println!("{}", json!({"help": HELP_TEXT})),
        },
        CommandResult::Exit => return false,
    }
    true
}

/// Render an error in the given mode (always to stderr).
pub fn render_error(err: &dyn std::fmt::Display, mode: &OutputMode) {
    match mode {
        OutputMode::Pretty => print_error(err),
        OutputMode::Json => {
            eprintln!("{}", json!({"error": err.to_string()}));
        }
    }
}

/// Pretty-print records, one compact JSON object per line.
pub fn print_records(records: &[Record]) {
    for record in records {
        println!("{}", Value::Object(record.clone()));
    }
    println!("Returned {} record(s).", records.len());
}

/// Print a list of table names.
pub fn print_table_list(tables: &[String]) {
    if tables.is_empty() {
        println!("No tables.");
    } else {
        for name in tables {
            println!("{name}");
        }
    }
}

/// Print the declared fields of a table.
pub fn print_fields(table: &str, fields: &[FieldDefinition]) {
    println!("Table: {table}");
    if fields.is_empty() {
        println!("  (no fields)");
        return;
    }
    for field in fields {
        let mut line = format!("  {}", field.name);
        if !field.field_type.is_empty() {
            line.push_str(&format!(" {}", field.field_type));
        }
        if !field.nullable {
            line.push_str(" NOT NULL");
        }
        if let Some(default) = &field.default {
            line.push_str(&format!(" DEFAULT {default}"));
        }
        if field.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        println!("{line}");
    }
}

/// Print a success message.
pub fn print_ok(msg: &str) {
    println!("{msg}");
}

/// Print an error message to stderr.
pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("Error: {err}");
}

const HELP_TEXT: &str = "\
docstore Console - Command Reference
====================================

Database:
  CREATE DATABASE
  DROP DATABASE

Tables and Fields:
  CREATE TABLE <name>
  DROP TABLE <name>
  LIST TABLES
  DESCRIBE TABLE <name>
  CREATE FIELD <table> <field> [TYPE <type>] [NOT NULL] [DEFAULT <value>] [PRIMARY KEY]
  DROP FIELD <table> <field>

Records:
  INSERT <table> {json}             every declared field, nothing else
  SELECT <field>[, <field>...] FROM <table>
  SCAN <table>
  UPDATE <table> SET {json} [WHERE {json}]   rows matching every WHERE key
  DELETE FROM <table> WHERE {json}           rows matching any WHERE key

Other:
  HELP                    Show this help
  EXIT / QUIT             Exit the console

Values:
  Numbers:   42, 3.14
  Strings:   alice, \"hello world\"  (use quotes for spaces)
  JSON:      {\"key\": \"value\", \"num\": 42}";

/// Print the full command reference.
pub fn print_help() {
    println!("{HELP_TEXT}");
}
