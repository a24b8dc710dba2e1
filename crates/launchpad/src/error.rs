use std::io;

use crate::appconfig;
use crate::json;
use crate::manifest;
use crate::properties;
use crate::template;

/// A catch-all error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	// An aggregation error.
	#[error(transparent)]
	Appconfig(#[from] appconfig::Error),

	// A manifest error.
	#[error(transparent)]
	Manifest(#[from] manifest::Error),

	// A localization bundle error.
	#[error(transparent)]
	Properties(#[from] properties::Error),

	// A page template error.
	#[error(transparent)]
	Template(#[from] template::Error),

	// An IO error.
	#[error(transparent)]
	Io(#[from] io::Error),

	// A JSON error.
	#[error(transparent)]
	Json(#[from] json::Error),
}

/// A catch-all result.
pub type Result<T> = std::result::Result<T, Error>;
