use std::path::Path;
use std::process;

use crate::commands::report_errors;
use crate::OutputFormat;
use maquette_core::{compile_source, BuildSetting};

pub(crate) fn cmd_project(file: &Path, output: OutputFormat) {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot read {}: {}", file.display(), e);
            process::exit(1);
        }
    };
    let name = file.display().to_string();
    match compile_source(&name, &text, &BuildSetting::default()) {
        Ok(context) => {
            let pretty = serde_json::to_string_pretty(&context)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => {
            report_errors(&[e], output);
            process::exit(1);
        }
    }
}
