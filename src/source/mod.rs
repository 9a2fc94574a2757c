//! Tree document input sources.
//!
//! A tree document is a JSON array of nodes, read once from a file or from
//! piped stdin:
//!
//! ```json
//! [{ "name": "Projects", "children": [{ "id": "p1", "name": "project-1.docx" }] }]
//! ```

use crate::model::error::InputError;
use crate::model::SourceNode;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Where the tree document comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read the whole file.
    File(PathBuf),
    /// Read piped stdin to EOF.
    Stdin,
}

impl InputSource {
    /// Name used in error messages and logs.
    pub fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read and decode the document.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist,
    /// `InputError::Io` for read failures and `InputError::Json` if the
    /// content is not an array of nodes.
    pub fn read_nodes(&self) -> Result<Vec<SourceNode>, InputError> {
        let nodes = match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                let file = std::fs::File::open(path)?;
                parse_nodes(std::io::BufReader::new(file), &self.name())?
            }
            InputSource::Stdin => parse_nodes(std::io::stdin().lock(), &self.name())?,
        };
        info!(source = %self.name(), roots = nodes.len(), "tree document loaded");
        Ok(nodes)
    }
}

/// Detect the input source.
///
/// # Logic:
/// 1. If file path is provided: read the file
/// 2. If stdin is piped: read stdin
/// 3. Else: return InputError::NoInput
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}

/// Decode a JSON array of nodes from `reader`.
pub fn parse_nodes<R: Read>(reader: R, source_name: &str) -> Result<Vec<SourceNode>, InputError> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            InputError::Io(e.into())
        } else {
            InputError::Json {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_nested_array() {
        let json = br#"[{"name":"A","id":"a","children":[{"name":"B"}]},{"name":"C","size":3}]"#;
        let nodes = parse_nodes(&json[..], "test").unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id.as_deref(), Some("a"));
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[1].fields.get("size"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_nodes(&b"[]"[..], "test").unwrap().is_empty());
    }

    #[test]
    fn object_root_is_rejected() {
        let err = parse_nodes(&br#"{"name":"A"}"#[..], "tree.json").unwrap_err();
        match err {
            InputError::Json { source_name, .. } => assert_eq!(source_name, "tree.json"),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn numeric_id_is_rejected() {
        let err = parse_nodes(&br#"[{"id":7}]"#[..], "test").unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let source = detect_input_source(Some(PathBuf::from("/nonexistent/tree.json"))).unwrap();
        assert!(matches!(
            source.read_nodes(),
            Err(InputError::FileNotFound { .. })
        ));
    }

    #[test]
    fn reads_fixture_file() {
        let path = std::env::temp_dir().join(format!("rovetree_source_{}.json", std::process::id()));
        fs::write(&path, include_str!("../../tests/fixtures/sample-directory.json")).unwrap();

        let nodes = InputSource::File(path.clone()).read_nodes().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(nodes.len(), 3);
        assert_eq!(crate::flatten::count_nodes(&nodes), 42);
    }

    #[test]
    fn stdin_name() {
        assert_eq!(InputSource::Stdin.name(), "<stdin>");
    }
}
