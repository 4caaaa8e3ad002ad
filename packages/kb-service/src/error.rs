pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Rejected before the store is consulted.
	#[error("Invalid query: {message}")]
	InvalidQuery { message: String },
	/// A scoring channel or a single item could not be scored. Never fatal to a query.
	#[error("Scoring degraded: {message}")]
	ScoringDegraded { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
}
impl Error {
	pub(crate) fn invalid_query(message: impl Into<String>) -> Self {
		Self::InvalidQuery { message: message.into() }
	}

	pub(crate) fn degraded(message: impl Into<String>) -> Self {
		Self::ScoringDegraded { message: message.into() }
	}
}

impl From<kb_storage::Error> for Error {
	fn from(err: kb_storage::Error) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}
