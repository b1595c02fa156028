//! Per-build compilation driver.
//!
//! Compiling one file is fail-fast: tokenize, parse, project, and the
//! first error aborts that file with no partial result. Across the files
//! of one build setting the policy is collect-don't-abort: every file is
//! attempted independently, successes and failures are both reported, and
//! any failure marks the whole run as failed.

use crate::config::BuildSetting;
use crate::error::CompileError;
use crate::lexer;
use crate::parser;
use crate::project::{ContextValue, Projector};

/// One discovered source file: an identifier (used in diagnostics) and
/// its raw text. The core never touches the filesystem itself.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A successfully projected file.
#[derive(Debug, Clone)]
pub struct FileContext {
    pub name: String,
    pub context: ContextValue,
}

/// Outcome of one build setting's run over all its files.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outputs: Vec<FileContext>,
    pub errors: Vec<CompileError>,
}

impl BuildReport {
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Compile one file's text to its projected context value.
pub fn compile_source(
    name: &str,
    text: &str,
    settings: &BuildSetting,
) -> Result<ContextValue, CompileError> {
    let tokens = lexer::tokenize(text, name)?;
    let ast = parser::parse_file(&tokens, name)?;
    Ok(Projector::new(settings).project_block(&ast))
}

/// Compile every file of a build setting, accumulating errors instead of
/// short-circuiting.
pub fn compile_all(files: &[SourceFile], settings: &BuildSetting) -> BuildReport {
    let mut report = BuildReport::default();
    for file in files {
        match compile_source(&file.name, &file.text, settings) {
            Ok(context) => report.outputs.push(FileContext {
                name: file.name.clone(),
                context,
            }),
            Err(e) => report.errors.push(e),
        }
    }
    report
}
