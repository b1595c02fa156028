use std::path::Path;
use std::process;

use crate::commands::report_errors;
use crate::config;
use crate::discover;
use crate::render::{ContextJsonRenderer, Renderer};
use crate::OutputFormat;
use maquette_core::{compile_all, CompileError};

/// Run every build setting in the project file. Every discovered source
/// file is attempted; failures accumulate across files and targets, and
/// any failure makes the whole run exit non-zero after all errors have
/// been printed.
pub(crate) fn cmd_build(config_path: &Path, output: OutputFormat, quiet: bool) {
    let project = match config::load_project(config_path) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(1);
        }
    };

    let renderer = ContextJsonRenderer;
    let mut all_errors: Vec<CompileError> = Vec::new();
    let mut rendered = 0usize;

    for (target, settings) in &project.targets {
        let files = match discover::discover_sources(&settings.source) {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "target '{}': cannot discover sources under {}: {}",
                    target,
                    settings.source.display(),
                    e
                );
                process::exit(1);
            }
        };

        let report = compile_all(&files, settings);
        for out in &report.outputs {
            let text = match renderer.render(&out.context, &settings.template) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("target '{}': render failed for {}: {}", target, out.name, e);
                    process::exit(1);
                }
            };
            let stem = Path::new(&out.name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("out");
            let dest = settings
                .output
                .join(format!("{}.{}", stem, settings.extension));
            let write = std::fs::create_dir_all(&settings.output)
                .and_then(|_| std::fs::write(&dest, &text));
            if let Err(e) = write {
                eprintln!("target '{}': cannot write {}: {}", target, dest.display(), e);
                process::exit(1);
            }
            rendered += 1;
        }
        all_errors.extend(report.errors);
    }

    if !all_errors.is_empty() {
        report_errors(&all_errors, output);
        process::exit(1);
    }
    if !quiet {
        println!("rendered {} file(s)", rendered);
    }
}
