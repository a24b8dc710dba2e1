use std::fs;
use std::io;
use std::path::PathBuf;

use crate::options::Options;

/// The page template's file name.
pub const PAGE_TEMPLATE: &str = "launchpad.html";

/// The placeholder token replaced with the library URL.
const LIB_URL_TOKEN: &str = "LIB_URL";

/// The placeholder token replaced with the theme.
const THEME_TOKEN: &str = "THEME";

/// A page template error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The page template does not exist.
	#[error("Page template not found at {0}")]
	NotFound(PathBuf),

	/// An IO error occurred.
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// A page template result.
pub type Result<T> = std::result::Result<T, Error>;

/// Assembles the launchpad page by substituting the library URL and theme
/// into the page template.
///
/// Every occurrence of the `LIB_URL` and `THEME` tokens is replaced.
///
/// # Arguments
///
/// * `options` - The launchpad options.
///
/// # Errors
///
/// If the page template does not exist, [`Error::NotFound`] is returned.
pub fn render_page(options: &Options) -> Result<String> {
	let path = options.template_path(PAGE_TEMPLATE);

	let html = fs::read_to_string(&path).map_err(|err| match err.kind() {
		io::ErrorKind::NotFound => Error::NotFound(path.clone()),
		_ => err.into(),
	})?;

	Ok(html
		.replace(LIB_URL_TOKEN, &options.library_url())
		.replace(THEME_TOKEN, options.theme()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render() {
		let options = Options::default();

		let html = render_page(&options).unwrap();

		assert!(html.contains("https://sapui5.hana.ondemand.com/resources/sap-ui-core.js"));
		assert!(html.contains("sap_fiori_3"));
		assert!(!html.contains(LIB_URL_TOKEN));
		assert!(!html.contains(THEME_TOKEN));
	}

	#[test]
	fn render_versioned() {
		let options = Options {
			version: Some("1.120.4".to_owned()),
			theme: Some("sap_horizon".to_owned()),
			..Default::default()
		};

		let html = render_page(&options).unwrap();

		assert!(html.contains("https://sapui5.hana.ondemand.com/1.120.4/resources/sap-ui-core.js"));
		assert!(html.contains("sap_horizon"));
		assert!(!html.contains(THEME_TOKEN));
	}

	#[test]
	fn render_missing_template() {
		let dir = tempfile::tempdir().unwrap();

		let options = Options {
			templates_dir: Some(dir.path().to_str().unwrap().to_owned()),
			..Default::default()
		};

		let result = render_page(&options);

		assert!(matches!(result, Err(Error::NotFound(_))));
	}
}
