use serde_json::Value;

/// A parsed console command.
#[derive(Debug, PartialEq)]
pub enum Command {
    CreateDatabase,
    DropDatabase,
    CreateTable {
        name: String,
    },
    DropTable {
        name: String,
    },
    ListTables,
    DescribeTable {
        name: String,
    },
    CreateField {
        table: String,
        name: String,
        field_type: Option<String>,
        nullable: bool,
        default: Option<Value>,
        primary_key: bool,
    },
    DropField {
        table: String,
        name: String,
    },
    Insert {
        table: String,
        record: Value,
    },
    Select {
        table: String,
        fields: Vec<String>,
    },
    Scan {
        table: String,
    },
    Update {
        table: String,
        set: Value,
        condition: Value,
    },
    Delete {
        table: String,
        condition: Value,
    },
    Help,
    Exit,
}
