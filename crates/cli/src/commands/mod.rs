pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod project;

use crate::OutputFormat;
use maquette_core::CompileError;

/// Print accumulated errors, each carrying kind, file, and line.
pub(crate) fn report_errors(errors: &[CompileError], output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let values: Vec<_> = errors.iter().map(|e| e.to_json_value()).collect();
            let body = serde_json::to_string_pretty(&serde_json::Value::Array(values))
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            eprintln!("{}", body);
        }
        OutputFormat::Text => {
            for e in errors {
                eprintln!("{}", e);
            }
        }
    }
}
