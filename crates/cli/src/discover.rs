//! Source file discovery for a build setting. The core receives an
//! ordered list of (identifier, text) pairs and never walks the
//! filesystem itself.

use maquette_core::{SourceFile, SOURCE_EXTENSION};
use std::io;
use std::path::{Path, PathBuf};

/// Recursively find every `.mqt` file under `dir`, sorted by path, and
/// read each one's text.
pub(crate) fn discover_sources(dir: &Path) -> io::Result<Vec<SourceFile>> {
    let mut paths = Vec::new();
    collect(dir, &mut paths)?;
    paths.sort();
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path)?;
        files.push(SourceFile::new(path.display().to_string(), text));
    }
    Ok(files)
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION) {
            out.push(path);
        }
    }
    Ok(())
}
