//! Project file loading: a `maquette.toml` holds one or more named build
//! settings, each describing one source-to-target compilation pass.

use maquette_core::BuildSetting;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectFile {
    pub targets: BTreeMap<String, BuildSetting>,
}

pub(crate) fn load_project(path: &Path) -> Result<ProjectFile, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    toml::from_str(&text).map_err(|e| format!("invalid project file {}: {}", path.display(), e))
}
