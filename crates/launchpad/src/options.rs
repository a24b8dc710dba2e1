use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::json::json_struct;

/// The host all library URLs are derived from.
const LIBRARY_HOST: &str = "https://sapui5.hana.ondemand.com";

/// The fallback theme.
pub const DEFAULT_THEME: &str = "sap_fiori_3";

/// The default mount path for the launchpad page.
pub const DEFAULT_BASE_PATH: &str = "/$launchpad";

/// The default apps root folder, stripped from application mount URLs.
const DEFAULT_APPS_FOLDER: &str = "app/";

/// Returns the default directory holding the template assets, bundled with the crate.
#[must_use]
pub fn default_templates_dir() -> &'static Path {
	static TEMPLATES_DIR: OnceLock<PathBuf> = OnceLock::new();

	TEMPLATES_DIR.get_or_init(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")))
}

json_struct! {
	/// A set of launchpad options.
	/// All fields are optional; use `Default::default` for the defaults.
	#[derive(Clone)]
	pub struct Options {
		/// The UI5 library version segment. When unset or empty, the library URL is unversioned.
		pub version: Option<String>,

		/// The visual theme identifier.
		pub theme: Option<String>,

		/// The mount path for the launchpad page.
		pub base_path: Option<String>,

		/// The path to an external JSON document shallow-merged over the configuration template.
		pub app_config_path: Option<String>,

		/// The locale suffix used to resolve localization bundles.
		pub locale: Option<String>,

		/// The host project root, where `package.json` lives.
		pub root: Option<String>,

		/// The apps root folder, stripped from application mount URLs.
		pub apps_folder: Option<String>,

		/// The directory holding the `launchpad.html` and `appconfig.json` templates.
		pub templates_dir: Option<String>,
	}
}

impl Options {
	/// Returns the theme.
	#[must_use]
	pub fn theme(&self) -> &str {
		self.theme.as_deref().unwrap_or(DEFAULT_THEME)
	}

	/// Returns the mount path for the launchpad page.
	#[must_use]
	pub fn base_path(&self) -> &str {
		self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
	}

	/// Returns the locale suffix, if any.
	#[must_use]
	pub fn locale(&self) -> Option<&str> {
		self.locale.as_deref()
	}

	/// Returns the path to the external override document, if any.
	#[must_use]
	pub fn app_config_path(&self) -> Option<&Path> {
		self.app_config_path.as_deref().map(Path::new)
	}

	/// Returns the apps root folder.
	#[must_use]
	pub fn apps_folder(&self) -> &str {
		self.apps_folder.as_deref().unwrap_or(DEFAULT_APPS_FOLDER)
	}

	/// Returns the UI5 library URL, with a version segment when one is set and non-empty.
	#[must_use]
	pub fn library_url(&self) -> String {
		match self.version.as_deref() {
			Some(version) if !version.is_empty() => format!("{LIBRARY_HOST}/{version}"),
			_ => LIBRARY_HOST.to_owned(),
		}
	}

	/// Returns the host project root as a path.
	#[must_use]
	pub fn root(&self) -> &Path {
		Path::new(self.root.as_deref().unwrap_or("."))
	}

	/// Returns the path to the host project's package descriptor.
	#[must_use]
	pub fn package_path(&self) -> PathBuf {
		self.root().join("package.json")
	}

	/// Returns the path to an application's webapp directory.
	///
	/// # Arguments
	///
	/// * `dir` - The application directory, relative to the project root.
	#[must_use]
	pub fn webapp_dir(&self, dir: &str) -> PathBuf {
		self.root().join(dir).join("webapp")
	}

	/// Returns the path to a template asset.
	///
	/// # Arguments
	///
	/// * `name` - The template's file name.
	#[must_use]
	pub fn template_path(&self, name: &str) -> PathBuf {
		let dir = self
			.templates_dir
			.as_deref()
			.map_or_else(|| default_templates_dir().to_owned(), PathBuf::from);

		dir.join(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let options = Options::default();

		assert_eq!(options.theme(), DEFAULT_THEME);
		assert_eq!(options.base_path(), DEFAULT_BASE_PATH);
		assert_eq!(options.apps_folder(), DEFAULT_APPS_FOLDER);
		assert_eq!(options.locale(), None);
		assert_eq!(options.library_url(), LIBRARY_HOST);
	}

	#[test]
	fn library_url_versioned() {
		let options = Options {
			version: Some("1.120.4".to_owned()),
			..Default::default()
		};

		assert_eq!(
			options.library_url(),
			"https://sapui5.hana.ondemand.com/1.120.4"
		);
	}

	#[test]
	fn library_url_empty_version() {
		let options = Options {
			version: Some(String::new()),
			..Default::default()
		};

		// An empty version segment means the unversioned URL.
		assert_eq!(options.library_url(), LIBRARY_HOST);
	}

	#[test]
	fn package_path() {
		let options = Options {
			root: Some("/srv/project".to_owned()),
			..Default::default()
		};

		assert_eq!(
			options.package_path(),
			PathBuf::from("/srv/project/package.json")
		);
		assert_eq!(
			options.webapp_dir("app/travel"),
			PathBuf::from("/srv/project/app/travel/webapp")
		);
	}
}
