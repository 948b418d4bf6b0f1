use serde_json::Value;

use crate::commands::Command;

/// Tokenize an input line into a vector of string tokens.
///
/// Handles:
/// - Whitespace-separated words; commas also separate words (`a,b` is two tokens)
/// - Quoted strings: `"hello world"` becomes a single token (quotes preserved)
/// - JSON bodies: `{...}` and `[...]` are scanned to the matching close
///   (tracking nesting and string literals) and returned as one token
fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if chars[i].is_whitespace() || chars[i] == ',' {
            i += 1;
            continue;
        }

        // JSON object or array.
        if chars[i] == '{' || chars[i] == '[' {
            let end = scan_json(&chars, i)?;
            tokens.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }

        // Quoted string.
        if chars[i] == '"' {
            let start = i;
            i += 1;
            while i < len && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= len {
                return Err("Unterminated quoted string".to_string());
            }
            i += 1;
            tokens.push(chars[start..i].iter().collect());
            continue;
        }

        let start = i;
        while i < len
            && !chars[i].is_whitespace()
            && chars[i] != ','
            && chars[i] != '"'
            && chars[i] != '{'
            && chars[i] != '['
        {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    Ok(tokens)
}

/// Return the index one past the bracket closing the JSON body at `start`.
fn scan_json(chars: &[char], start: usize) -> Result<usize, String> {
    let (open, close, what) = if chars[start] == '{' {
        ('{', '}', "object")
    } else {
        ('[', ']', "array")
    };
    let mut depth = 0;
    let mut in_string = false;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if in_string {
            if c == '\\' {
                i += 1;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i + 1);
            }
        }
        i += 1;
    }
    Err(format!("Unterminated JSON {what}"))
}

/// Parse a raw token into a JSON value.
///
/// - JSON bodies and quoted strings are parsed as JSON.
/// - `true`, `false`, `null` and numbers become the matching JSON value.
/// - Anything else is a bare-word string.
fn parse_value(s: &str) -> Result<Value, String> {
    if s.starts_with('{') || s.starts_with('[') || s.starts_with('"') {
        return serde_json::from_str(s).map_err(|e| format!("Invalid JSON value {s}: {e}"));
    }
    match s {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Value::from(n));
    }
    if let Ok(f) = s.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Ok(Value::Number(n));
    }
    Ok(Value::String(s.to_string()))
}

/// Parse a token that must be a JSON object.
fn parse_object(token: Option<&String>, what: &str) -> Result<Value, String> {
    let token = token.ok_or_else(|| format!("Expected JSON object for {what}"))?;
    if !token.starts_with('{') {
        return Err(format!("Expected JSON object for {what}, got '{token}'"));
    }
    serde_json::from_str(token).map_err(|e| format!("Invalid JSON for {what}: {e}"))
}

/// Strip surrounding double quotes from an identifier token.
fn ident(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        token[1..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

fn keyword(tokens: &[String], idx: usize) -> Option<String> {
    tokens.get(idx).map(|t| t.to_uppercase())
}

fn expect_keyword(tokens: &[String], idx: usize, kw: &str) -> Result<(), String> {
    match keyword(tokens, idx) {
        Some(k) if k == kw => Ok(()),
        _ => Err(format!("Expected {kw}")),
    }
}

fn required_ident(tokens: &[String], idx: usize, what: &str) -> Result<String, String> {
    tokens
        .get(idx)
        .map(|t| ident(t))
        .ok_or_else(|| format!("Expected {what}"))
}

fn no_trailing(tokens: &[String], used: usize) -> Result<(), String> {
    match tokens.get(used) {
        Some(extra) => Err(format!("Unexpected token '{extra}'")),
        None => Ok(()),
    }
}

/// Parse a console command line.
pub fn parse(input: &str) -> Result<Command, String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err("Empty command".to_string());
    }

    let first = tokens[0].to_uppercase();
    match first.as_str() {
        "CREATE" => match keyword(&tokens, 1).as_deref() {
            Some("DATABASE") => no_trailing(&tokens, 2).map(|_| Command::CreateDatabase),
            Some("TABLE") => parse_create_table(&tokens),
            Some("FIELD") => parse_create_field(&tokens),
            _ => Err("Expected DATABASE, TABLE, or FIELD after CREATE".to_string()),
        },
        "DROP" => match keyword(&tokens, 1).as_deref() {
            Some("DATABASE") => no_trailing(&tokens, 2).map(|_| Command::DropDatabase),
            Some("TABLE") => parse_drop_table(&tokens),
            Some("FIELD") => parse_drop_field(&tokens),
            _ => Err("Expected DATABASE, TABLE, or FIELD after DROP".to_string()),
        },
        "LIST" => match keyword(&tokens, 1).as_deref() {
            Some("TABLES") => no_trailing(&tokens, 2).map(|_| Command::ListTables),
            _ => Err("Expected TABLES after LIST".to_string()),
        },
        "DESCRIBE" => {
            expect_keyword(&tokens, 1, "TABLE")?;
            let name = required_ident(&tokens, 2, "table name")?;
            no_trailing(&tokens, 3)?;
            Ok(Command::DescribeTable { name })
        }
        "INSERT" => parse_insert(&tokens),
        "SELECT" => parse_select(&tokens),
        "SCAN" => {
            let table = required_ident(&tokens, 1, "table name")?;
            no_trailing(&tokens, 2)?;
            Ok(Command::Scan { table })
        }
        "UPDATE" => parse_update(&tokens),
        "DELETE" => parse_delete(&tokens),
        "HELP" => Ok(Command::Help),
        "EXIT" | "QUIT" => Ok(Command::Exit),
        _ => Err(format!("Unknown command '{}'", tokens[0])),
    }
}

/// CREATE TABLE <name>
fn parse_create_table(tokens: &[String]) -> Result<Command, String> {
    let name = required_ident(tokens, 2, "table name after CREATE TABLE")?;
    no_trailing(tokens, 3)?;
    Ok(Command::CreateTable { name })
}

/// DROP TABLE <name>
fn parse_drop_table(tokens: &[String]) -> Result<Command, String> {
    let name = required_ident(tokens, 2, "table name after DROP TABLE")?;
    no_trailing(tokens, 3)?;
    Ok(Command::DropTable { name })
}

/// CREATE FIELD <table> <name> [TYPE <type>] [NOT NULL | NULL] [DEFAULT <value>] [PRIMARY KEY]
fn parse_create_field(tokens: &[String]) -> Result<Command, String> {
    let table = required_ident(tokens, 2, "table name after CREATE FIELD")?;
    let name = required_ident(tokens, 3, "field name")?;

    let mut field_type = None;
    let mut nullable = true;
    let mut default = None;
    let mut primary_key = false;

    let mut i = 4;
    while i < tokens.len() {
        match tokens[i].to_uppercase().as_str() {
            "TYPE" => {
                field_type = Some(required_ident(tokens, i + 1, "type after TYPE")?);
                i += 2;
            }
            "NOT" => {
                expect_keyword(tokens, i + 1, "NULL")?;
                nullable = false;
                i += 2;
            }
            "NULL" => {
                nullable = true;
                i += 1;
            }
            "DEFAULT" => {
                let raw = tokens
                    .get(i + 1)
                    .ok_or_else(|| "Expected value after DEFAULT".to_string())?;
                default = Some(parse_value(raw)?);
                i += 2;
            }
            "PRIMARY" => {
                expect_keyword(tokens, i + 1, "KEY")?;
                primary_key = true;
                i += 2;
            }
            _ => return Err(format!("Unexpected token '{}'", tokens[i])),
        }
    }

    Ok(Command::CreateField {
        table,
        name,
        field_type,
        nullable,
        default,
        primary_key,
    })
}

/// DROP FIELD <table> <name>
fn parse_drop_field(tokens: &[String]) -> Result<Command, String> {
    let table = required_ident(tokens, 2, "table name after DROP FIELD")?;
    let name = required_ident(tokens, 3, "field name")?;
    no_trailing(tokens, 4)?;
    Ok(Command::DropField { table, name })
}

/// INSERT [INTO] <table> {json}
fn parse_insert(tokens: &[String]) -> Result<Command, String> {
    let mut i = 1;
    if keyword(tokens, i).as_deref() == Some("INTO") {
        i += 1;
    }
    let table = required_ident(tokens, i, "table name after INSERT")?;
    let record = parse_object(tokens.get(i + 1), "INSERT")?;
    no_trailing(tokens, i + 2)?;
    Ok(Command::Insert { table, record })
}

/// SELECT <field>[, <field>...] FROM <table>
fn parse_select(tokens: &[String]) -> Result<Command, String> {
    let from = tokens
        .iter()
        .position(|t| t.eq_ignore_ascii_case("FROM"))
        .ok_or_else(|| "Expected FROM in SELECT".to_string())?;
    if from < 2 {
        return Err("Expected at least one field name before FROM".to_string());
    }
    let fields = tokens[1..from].iter().map(|t| ident(t)).collect();
    let table = required_ident(tokens, from + 1, "table name after FROM")?;
    no_trailing(tokens, from + 2)?;
    Ok(Command::Select { table, fields })
}

/// UPDATE <table> SET {json} [WHERE {json}]
///
/// Without WHERE the condition is empty and every row matches.
fn parse_update(tokens: &[String]) -> Result<Command, String> {
    let table = required_ident(tokens, 1, "table name after UPDATE")?;
    expect_keyword(tokens, 2, "SET")?;
    let set = parse_object(tokens.get(3), "SET")?;

    let condition = match keyword(tokens, 4).as_deref() {
        None => Value::Object(serde_json::Map::new()),
        Some("WHERE") => {
            let condition = parse_object(tokens.get(5), "WHERE")?;
            no_trailing(tokens, 6)?;
            condition
        }
        Some(_) => return Err(format!("Unexpected token '{}'", tokens[4])),
    };

    Ok(Command::Update {
        table,
        set,
        condition,
    })
}

/// DELETE FROM <table> WHERE {json}
fn parse_delete(tokens: &[String]) -> Result<Command, String> {
    expect_keyword(tokens, 1, "FROM")?;
    let table = required_ident(tokens, 2, "table name after DELETE FROM")?;
    expect_keyword(tokens, 3, "WHERE")?;
    let condition = parse_object(tokens.get(4), "WHERE")?;
    no_trailing(tokens, 5)?;
    Ok(Command::Delete { table, condition })
}
