mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EmbeddingProviderConfig, Providers, Search, Service, Snippet, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.corpus_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "storage.corpus_path must be non-empty.".to_string(),
		});
	}

	if let Some(embedding) = cfg.providers.embedding.as_ref() {
		if embedding.dimensions == 0 {
			return Err(Error::Validation {
				message: "providers.embedding.dimensions must be greater than zero.".to_string(),
			});
		}
		if embedding.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if embedding.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.embedding.api_key must be non-empty.".to_string(),
			});
		}
		if embedding.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.embedding.api_base must be non-empty.".to_string(),
			});
		}
	}

	let search = &cfg.search;

	if search.max_limit == 0 {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than zero.".to_string(),
		});
	}
	if search.default_limit == 0 || search.default_limit > search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must be between 1 and search.max_limit.".to_string(),
		});
	}
	if !search.default_min_relevance.is_finite() {
		return Err(Error::Validation {
			message: "search.default_min_relevance must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&search.default_min_relevance) {
		return Err(Error::Validation {
			message: "search.default_min_relevance must be in the range 0.0-1.0.".to_string(),
		});
	}
	if search.embed_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.embed_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if search.candidate_factor == 0 {
		return Err(Error::Validation {
			message: "search.candidate_factor must be greater than zero.".to_string(),
		});
	}
	if search.length_norm_chars == 0 {
		return Err(Error::Validation {
			message: "search.length_norm_chars must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("snippet.document_max_chars", cfg.snippet.document_max_chars),
		("snippet.note_max_chars", cfg.snippet.note_max_chars),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
	if let Some(embedding) = cfg.providers.embedding.as_mut() {
		let trimmed = embedding.api_base.trim_end_matches('/').len();

		embedding.api_base.truncate(trimmed);
	}
}
