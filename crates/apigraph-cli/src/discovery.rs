//! Locating the call graph file.

use std::path::{Path, PathBuf};

use tracing::debug;

use apigraph_core::{Error, Result};

/// Resolve `graph` against `dir` unless it is already absolute, and check that
/// it names a regular file.
pub fn resolve_graph_path(dir: &Path, graph: &Path) -> Result<PathBuf> {
    let path = if graph.is_absolute() {
        graph.to_path_buf()
    } else {
        dir.join(graph)
    };

    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string())
            .with_operation("discovery::resolve_graph_path"));
    }
    if !path.is_file() {
        return Err(
            Error::invalid_argument(format!("'{}' is not a file", path.display()))
                .with_operation("discovery::resolve_graph_path"),
        );
    }

    debug!(path = %path.display(), "graph file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigraph_core::ErrorKind;

    #[test]
    fn test_relative_path_is_joined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("callgraph.json"), "{}").unwrap();

        let path = resolve_graph_path(dir.path(), Path::new("callgraph.json")).unwrap();
        assert_eq!(path, dir.path().join("callgraph.json"));
    }

    #[test]
    fn test_absolute_path_ignores_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("g.json");
        std::fs::write(&file, "{}").unwrap();

        let path = resolve_graph_path(Path::new("/nonexistent"), &file).unwrap();
        assert_eq!(path, file);
    }

    #[test]
    fn test_missing_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_graph_path(dir.path(), Path::new("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);

        let err = resolve_graph_path(dir.path(), Path::new(".")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
