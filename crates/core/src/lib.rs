//! maquette-core: compiler frontend for the Maquette modeling language.
//!
//! Turns `.mqt` source text into a generic, order-preserving context tree
//! that an external template engine renders into target-language source.
//! The pipeline per file is tokenize -> parse -> project; the frontend
//! performs no type checking, no semantic analysis, and no operator
//! precedence resolution (precedence is left to the target language).
//!
//! # Public API
//!
//! Key entry points, re-exported at the crate root:
//!
//! - [`compile_source()`] -- one file's text to its projected context
//! - [`compile_all()`] -- a build setting's files, collect-don't-abort
//! - [`CompileError`] / [`ErrorKind`] -- the error taxonomy
//! - [`ContextValue`] / [`Projector`] -- the projection target and pass
//! - AST types: [`Block`], [`Stmt`], [`Member`], [`Expr`]

/// File extension of Maquette source files, without the dot.
pub const SOURCE_EXTENSION: &str = "mqt";

pub mod ast;
pub mod compile;
pub mod config;
pub mod diag;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod project;
pub mod scope;

pub use ast::{Block, Expr, Member, Modifiers, Param, Stmt, TemplatePart};
pub use compile::{compile_all, compile_source, BuildReport, FileContext, SourceFile};
pub use config::BuildSetting;
pub use diag::ParseContext;
pub use error::{CompileError, ErrorKind};
pub use project::{ContextValue, Projector};
