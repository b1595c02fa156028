//! Renderer seam. The template engine that turns a context tree into
//! target-language text is an external collaborator; anything consuming a
//! per-file context value plus a template location can plug in here. The
//! shipped implementation passes the context through as pretty JSON.

use maquette_core::ContextValue;
use std::io;
use std::path::Path;

pub(crate) trait Renderer {
    fn render(&self, context: &ContextValue, template: &Path) -> io::Result<String>;
}

pub(crate) struct ContextJsonRenderer;

impl Renderer for ContextJsonRenderer {
    fn render(&self, context: &ContextValue, _template: &Path) -> io::Result<String> {
        serde_json::to_string_pretty(context).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
