//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

const CLI_SCHEMA_VERSION: &str = "booth.cli.v1";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Print rows as a table. JSON output goes through [`print_single`].
pub fn print_table<T: Tabled>(data: &[T]) {
    println!("{}", render_table(data));
}

fn render_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        "No items found.".dimmed().to_string()
    } else {
        Table::new(data).to_string()
    }
}

/// Print a single item as JSON (wrapped with the schema version).
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

/// Print an inline warning banner (stderr) for degraded views.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    let value = serde_json::to_value(data).unwrap_or_else(|_| serde_json::json!({}));
    let wrapped = wrap_with_schema(value);
    let sorted = sort_json_value(wrapped);
    serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| fallback.to_string())
}

fn wrap_with_schema(value: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "schemaVersion": CLI_SCHEMA_VERSION,
        "data": value
    })
}

fn sort_json_value(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(sort_json_value).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut pairs: Vec<_> = entries.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut mapped = serde_json::Map::new();
            for (key, value) in pairs {
                mapped.insert(key, sort_json_value(value));
            }
            serde_json::Value::Object(mapped)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_is_wrapped_with_schema_version() {
        let value: serde_json::Value =
            serde_json::from_str(&format_json(&serde_json::json!({ "b": 1, "a": [2] }), "{}"))
                .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "schemaVersion": "booth.cli.v1",
                "data": { "a": [2], "b": 1 }
            })
        );
    }

    #[test]
    fn json_keys_are_sorted() {
        let text = format_json(&serde_json::json!({ "zeta": 1, "alpha": { "y": 1, "x": 2 } }), "{}");
        let alpha = text.find("\"alpha\"").unwrap();
        let zeta = text.find("\"zeta\"").unwrap();
        assert!(alpha < zeta);
        assert!(text.find("\"x\"").unwrap() < text.find("\"y\"").unwrap());
    }

    #[test]
    fn unknown_format_falls_back_to_table() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Table);
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "No")]
        no: u8,
    }

    #[test]
    fn table_lists_rows_under_renamed_header() {
        let text = render_table(&[Row { no: 4 }, Row { no: 11 }]);
        assert!(text.contains("No"));
        assert!(text.contains("11"));
    }

    #[test]
    fn empty_table_says_so() {
        assert!(render_table::<Row>(&[]).contains("No items found."));
    }
}
