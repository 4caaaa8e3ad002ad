#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read corpus file at {path:?}.")]
	ReadCorpus { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse corpus file at {path:?}.")]
	ParseCorpus { path: std::path::PathBuf, source: serde_json::Error },
	#[error("Conflict: {0}")]
	Conflict(String),
	#[error("Store unavailable: {0}")]
	Unavailable(String),
}
