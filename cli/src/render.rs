//! Result rendering: tables, key/value records, info and error messages.

use std::io::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::config::OutputFormat;
use crate::service::Response;

/// Output sink for command results.
pub trait Renderer {
    fn table(&mut self, columns: &[String], rows: &[Vec<String>]);
    fn record(&mut self, fields: &[(String, String)]);
    fn info(&mut self, text: &str);
    fn error(&mut self, context: &str, err: &dyn std::error::Error);

    fn response(&mut self, response: &Response) {
        match response {
            Response::Table { columns, rows } => self.table(columns, rows),
            Response::Record(fields) => self.record(fields),
            Response::Info(text) => self.info(text),
        }
    }
}

/// Builds the renderer for a configured output format.
pub fn renderer_for<W: Write + 'static>(format: OutputFormat, out: W) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Table => Box::new(TableRenderer::new(out)),
        OutputFormat::Json => Box::new(JsonRenderer::new(out)),
    }
}

fn write_line(out: &mut impl Write, text: &str) {
    if let Err(err) = writeln!(out, "{text}") {
        debug!(error = %err, "Failed to write output");
    }
}

/// Human-oriented renderer using bordered tables.
pub struct TableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn table(&mut self, columns: &[String], rows: &[Vec<String>]) {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(columns);
        for row in rows {
            table.add_row(row);
        }
        write_line(&mut self.out, &table.to_string());
    }

    fn record(&mut self, fields: &[(String, String)]) {
        write_line(&mut self.out, "");
        for (key, value) in fields {
            write_line(&mut self.out, &format!("{key}: {value}"));
        }
        write_line(&mut self.out, "");
    }

    fn info(&mut self, text: &str) {
        write_line(&mut self.out, text);
    }

    fn error(&mut self, context: &str, err: &dyn std::error::Error) {
        write_line(&mut self.out, &format!("{context}: {err}"));
    }
}

/// Machine-oriented renderer writing one JSON document per result.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => write_line(&mut self.out, &text),
            Err(err) => debug!(error = %err, "JSON serialization failed"),
        }
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn table(&mut self, columns: &[String], rows: &[Vec<String>]) {
        let objects: Vec<Value> = rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.to_lowercase(), Value::from(cell.as_str())))
                    .collect();
                Value::Object(object)
            })
            .collect();
        self.emit(&Value::Array(objects));
    }

    fn record(&mut self, fields: &[(String, String)]) {
        let object: Map<String, Value> = fields
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.as_str())))
            .collect();
        self.emit(&Value::Object(object));
    }

    fn info(&mut self, text: &str) {
        self.emit(&json!({ "info": text }));
    }

    fn error(&mut self, context: &str, err: &dyn std::error::Error) {
        self.emit(&json!({ "error": err.to_string(), "context": context }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_renderer_writes_header_and_rows() {
        let mut renderer = TableRenderer::new(Vec::new());
        renderer.table(
            &strings(&["NAME", "ID"]),
            &[strings(&["project-a", "p1"]), strings(&["project-b", "p2"])],
        );
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("NAME"));
        assert!(out.contains("project-a"));
        assert!(out.contains("p2"));
    }

    #[test]
    fn test_table_renderer_record_lines() {
        let mut renderer = TableRenderer::new(Vec::new());
        renderer.response(&Response::Record(vec![(
            "path".to_string(),
            "/tts/projects/p1".to_string(),
        )]));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "\npath: /tts/projects/p1\n\n");
    }

    #[test]
    fn test_table_renderer_error_has_context() {
        let mut renderer = TableRenderer::new(Vec::new());
        renderer.error("describe", &CliError::MissingCredentials);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("describe: missing credentials"));
    }

    #[test]
    fn test_json_renderer_table_is_array_of_objects() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.table(&strings(&["METHOD", "PATH"]), &[strings(&["GET", "/flip/videos"])]);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!([{ "method": "GET", "path": "/flip/videos" }]));
    }

    #[test]
    fn test_json_renderer_info() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.info("Credentials saved");
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["info"], "Credentials saved");
    }
}
