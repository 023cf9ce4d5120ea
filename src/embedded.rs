use include_dir::{include_dir, Dir, File};
use serde::de::DeserializeOwned;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

/// Failure to read one of the data files bundled into the binary
#[derive(Debug, thiserror::Error)]
pub enum EmbeddedError {
    #[error("embedded file '{0}' not found")]
    Missing(String),
    #[error("embedded file '{0}' is not valid UTF-8")]
    Encoding(String),
    #[error("unable to deserialize embedded file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, EmbeddedError> {
    let file = DATA_DIR
        .get_file(path)
        .ok_or_else(|| EmbeddedError::Missing(path.to_string()))?;
    parse_file(file)
}

/// Every JSON file directly under `dir`, ordered by path
pub(crate) fn read_json_dir<T: DeserializeOwned>(dir: &str) -> Result<Vec<T>, EmbeddedError> {
    let dir = DATA_DIR
        .get_dir(dir)
        .ok_or_else(|| EmbeddedError::Missing(dir.to_string()))?;
    let mut files: Vec<&File> = dir
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort_by_key(|f| f.path());
    files.into_iter().map(parse_file).collect()
}

fn parse_file<T: DeserializeOwned>(file: &File) -> Result<T, EmbeddedError> {
    let path = file.path().display().to_string();
    let contents = file
        .contents_utf8()
        .ok_or_else(|| EmbeddedError::Encoding(path.clone()))?;
    serde_json::from_str(contents).map_err(|source| EmbeddedError::Parse { path, source })
}
