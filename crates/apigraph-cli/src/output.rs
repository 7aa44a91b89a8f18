//! Output writing (DOT graphs).

use std::io::Write;
use std::path::Path;

use tracing::info;

use apigraph_core::Result;

/// Write `dot` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, dot: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, dot).map_err(|e| {
                apigraph_core::Error::from(e)
                    .with_operation("output::write_output")
                    .with_context("path", path.display().to_string())
            })?;
            info!(path = %path.display(), bytes = dot.len(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(dot.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigraph_core::ErrorKind;

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.dot");
        write_output(Some(&path), "digraph G {\n}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("api.dot");
        let err = write_output(Some(&path), "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "output::write_output");
    }
}
