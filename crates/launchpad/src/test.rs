use std::path;
use std::sync;

use crate::options::Options;

/// Returns the path to the test data directory.
pub fn testdir() -> &'static path::Path {
	static TESTDIR: sync::OnceLock<path::PathBuf> = sync::OnceLock::new();

	TESTDIR.get_or_init(|| path::PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata")))
}

/// Returns options rooted at the test project.
pub fn options() -> Options {
	Options {
		root: Some(testdir().join("project").to_str().unwrap().to_owned()),
		..Default::default()
	}
}
