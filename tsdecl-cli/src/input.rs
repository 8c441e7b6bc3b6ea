//! IR document input.
//!
//! Documents are JSON, read from a file or from stdin. Decode errors name
//! the JSON path of the value that failed.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;
use tsdecl::ir::Document;

use crate::error::{CliResult, InputError};

/// Where the IR document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_path_buf())
        }
    }

    /// Name used in messages.
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the raw document text.
    pub fn read_to_string(&self) -> CliResult<String> {
        let result = match self {
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text).map(|_| text)
            }
            InputSource::File(path) => std::fs::read_to_string(path),
        };
        result.map_err(|source| {
            InputError::Io {
                source_name: self.name(),
                source,
            }
            .into()
        })
    }
}

/// Read and decode the document from `source`.
pub fn read_document(source: &InputSource) -> CliResult<Document> {
    let text = source.read_to_string()?;
    let document = parse_document(&text, &source.name())?;
    debug!(
        source = %source.name(),
        declarations = document.declarations.len(),
        "read IR document"
    );
    Ok(document)
}

/// Decode a JSON IR document.
pub fn parse_document(text: &str, source_name: &str) -> Result<Document, InputError> {
    let de = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        InputError::decode(source_name, path, err.into_inner().to_string())
    })
}
