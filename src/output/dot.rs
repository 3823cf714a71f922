//! DOT flow chart output writer.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a DOT description to a file
///
/// **Public** - main entry point for DOT output
///
/// The file handle is only held for the duration of this call.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let dot = generate_dot(&graph, &stacks, &timestamps, None);
/// write_dot(&dot, "flowchart_source.dot")?;
/// ```
pub fn write_dot(dot_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing flow chart to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    if output_path.extension().is_some_and(|ext| ext != "dot" && ext != "gv") {
        debug!("File does not have a .dot extension: {}", output_path.display());
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(dot_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Flow chart written successfully ({} bytes)", dot_content.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const DOT: &str = "digraph sim {\n1 [label=\"Timestamp=0.000000s, Shared Stack=\"];\n\n}\n";

    #[test]
    fn test_write_dot() {
        let temp_file = NamedTempFile::new().unwrap();
        write_dot(DOT, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, DOT);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/flowchart.dot");

        write_dot(DOT, &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_dot(DOT, temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }
}
