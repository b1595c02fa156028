//! Build setting: the external configuration for one source-to-target
//! compilation pass. The core only reads these fields to parameterize
//! projection and output naming; loading and validation live in the CLI.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_BLOCK_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSetting {
    /// Directory searched (recursively) for source files.
    pub source: PathBuf,
    /// Template source location handed to the renderer.
    pub template: PathBuf,
    /// Directory the rendered output is written into.
    pub output: PathBuf,
    /// File extension of rendered output files, without the dot.
    pub extension: String,
    /// Named separator strings read by the projector. At minimum the
    /// `"block"` separator joins sibling statements inside a block.
    #[serde(default)]
    pub separators: BTreeMap<String, String>,
}

impl BuildSetting {
    pub fn separator(&self, name: &str) -> Option<&str> {
        self.separators.get(name).map(String::as_str)
    }

    pub fn block_separator(&self) -> &str {
        self.separator("block").unwrap_or(DEFAULT_BLOCK_SEPARATOR)
    }
}

impl Default for BuildSetting {
    fn default() -> Self {
        BuildSetting {
            source: PathBuf::from("src"),
            template: PathBuf::from("template"),
            output: PathBuf::from("out"),
            extension: "txt".to_owned(),
            separators: BTreeMap::new(),
        }
    }
}
