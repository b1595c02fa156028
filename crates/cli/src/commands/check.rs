use std::path::Path;
use std::process;

use crate::commands::report_errors;
use crate::OutputFormat;
use maquette_core::{lexer, parser};

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot read {}: {}", file.display(), e);
            process::exit(1);
        }
    };
    let name = file.display().to_string();
    let result =
        lexer::tokenize(&text, &name).and_then(|tokens| parser::parse_file(&tokens, &name));
    match result {
        Ok(_) => {
            if !quiet {
                println!("ok");
            }
        }
        Err(e) => {
            report_errors(&[e], output);
            process::exit(1);
        }
    }
}
