use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::json;
use crate::json::json_enum;
use crate::json::json_struct;
use crate::json::json_struct_nodefault;
use crate::properties::Bundle;

/// The minimum manifest version allowing the i18n setting to be an object.
const MIN_I18N_OBJECT_VERSION: &str = "1.21.0";

/// The `sap.flp` type marking an application as a shell plugin.
const PLUGIN_TYPE: &str = "plugin";

/// A manifest error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A manifest does not exist.
	#[error("Manifest not found at {0}")]
	NotFound(PathBuf),

	/// A tile application has no i18n setting to resolve its texts with.
	#[error("Manifest for {id} has no i18n setting")]
	MissingI18n { id: String },

	/// An indicator references a data source the manifest does not declare.
	#[error("Data source {name} not declared in manifest for {id}")]
	DataSourceNotFound { id: String, name: String },

	/// An IO error occurred.
	#[error(transparent)]
	Io(#[from] io::Error),

	/// A JSON (de)serialization error occurred.
	#[error(transparent)]
	Json(#[from] json::Error),
}

/// A manifest result.
pub type Result<T> = std::result::Result<T, Error>;

json_struct_nodefault! {
	/// A per-application descriptor declaring identity, navigation targets,
	/// and localization settings.
	pub struct Manifest {
		/// The manifest format version.
		#[serde(rename = "_version")]
		pub version: Option<String>,

		/// The application namespace.
		#[serde(rename = "sap.app")]
		pub app: App,

		/// The shell namespace.
		#[serde(rename = "sap.flp")]
		pub flp: Option<Flp>,
	}
}

json_struct_nodefault! {
	/// The application namespace of a manifest.
	#[serde(rename_all = "camelCase")]
	pub struct App {
		/// The application id.
		pub id: String,

		/// The localization setting.
		pub i18n: Option<I18n>,

		/// The navigation targets exposed by the application.
		pub cross_navigation: Option<CrossNavigation>,

		/// Data sources by name, referenced by dynamic tile indicators.
		pub data_sources: Option<Map<String, Value>>,
	}
}

json_enum! {
	/// A localization setting: either a bundle path, or an object with a bundle path.
	/// The object form requires a minimum manifest version.
	pub enum I18n {
		/// A bundle path relative to the webapp directory.
		Path(String),

		/// An extended setting with a bundle path.
		Bundle {
			/// The bundle path relative to the webapp directory.
			#[serde(rename = "bundleUrl")]
			bundle_url: String,
		},
	}
}

json_struct! {
	/// The navigation targets exposed by an application.
	pub struct CrossNavigation {
		/// Navigation-tile descriptors keyed by inbound id, in declaration order.
		pub inbounds: Map<String, Value>,
	}
}

json_struct! {
	/// The shell namespace of a manifest.
	pub struct Flp {
		/// The application type. `plugin` registers the application as a shell
		/// extension instead of a navigable tile.
		#[serde(rename = "type")]
		pub kind: Option<String>,
	}
}

json_struct_nodefault! {
	/// A navigation target exposed by an application.
	///
	/// Fields other than the ones below are passed through to the composed
	/// configuration untouched.
	#[derive(Clone)]
	#[serde(rename_all = "camelCase")]
	pub struct Inbound {
		/// The semantic object of the target.
		pub semantic_object: String,

		/// The action performed on the semantic object.
		pub action: String,

		/// The tile title, possibly a `{{...}}` localization key.
		pub title: Option<String>,

		/// The tile subtitle, possibly a `{{...}}` localization key.
		pub sub_title: Option<String>,

		/// The tile info text, possibly a `{{...}}` localization key.
		pub info: Option<String>,

		/// The tile icon.
		pub icon: Option<String>,

		/// The data source driving a dynamic tile.
		pub indicator_data_source: Option<IndicatorDataSource>,

		/// Any remaining fields, passed through verbatim.
		#[serde(flatten)]
		pub extra: Map<String, Value>,
	}
}

json_struct_nodefault! {
	/// A reference to a data source refreshing a dynamic tile.
	#[derive(Clone)]
	#[serde(rename_all = "camelCase")]
	pub struct IndicatorDataSource {
		/// The name of a data source declared by the manifest.
		pub data_source: String,

		/// The path appended to the data source's URI.
		pub path: String,

		/// The refresh interval in seconds.
		pub refresh: Option<u64>,
	}
}

impl Manifest {
	/// Parses and returns an application's manifest.
	///
	/// # Arguments
	///
	/// * `path` - The path to the manifest file.
	///
	/// # Errors
	///
	/// If the manifest file does not exist, [`Error::NotFound`] is returned.
	///
	/// If the manifest is malformed or missing required fields, [`Error::Json`] is returned.
	pub fn from_file<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();

		let file = fs::File::open(path).map_err(|err| match err.kind() {
			io::ErrorKind::NotFound => Error::NotFound(path.to_owned()),
			_ => err.into(),
		})?;

		let manifest = json::from_reader(file)?;

		Ok(manifest)
	}

	/// Returns the application id.
	#[must_use]
	pub fn id(&self) -> &str {
		&self.app.id
	}

	/// Returns the last dot-segment of the application id.
	#[must_use]
	pub fn component_name(&self) -> &str {
		self.app.id.rsplit('.').next().unwrap_or(&self.app.id)
	}

	/// Checks if the application is registered as a shell plugin rather than a tile.
	#[must_use]
	pub fn is_plugin(&self) -> bool {
		self.flp
			.as_ref()
			.and_then(|flp| flp.kind.as_deref())
			.is_some_and(|kind| kind == PLUGIN_TYPE)
	}

	/// Resolves the i18n setting to a bundle path relative to the webapp directory.
	///
	/// The object form requires manifest version 1.21.0. Older manifests are
	/// warned about and proceed anyway.
	///
	/// # Errors
	///
	/// If the manifest has no i18n setting, [`Error::MissingI18n`] is returned.
	pub fn bundle_path(&self) -> Result<&str> {
		let i18n = self.app.i18n.as_ref().ok_or_else(|| Error::MissingI18n {
			id: self.app.id.clone(),
		})?;

		match i18n {
			I18n::Path(path) => Ok(path),
			I18n::Bundle { bundle_url } => {
				// The comparison is lexicographic, matching the manifest format's own scheme.
				if self
					.version
					.as_deref()
					.is_some_and(|version| version < MIN_I18N_OBJECT_VERSION)
				{
					tracing::warn!(
						id = %self.app.id,
						"manifest version does not allow i18n to be an object, minimum is {}",
						MIN_I18N_OBJECT_VERSION,
					);
				}

				Ok(bundle_url)
			}
		}
	}

	/// Returns the URI of a data source declared by the manifest.
	///
	/// # Arguments
	///
	/// * `name` - The data source's name.
	///
	/// # Errors
	///
	/// If the manifest does not declare the data source or the data source has
	/// no URI, [`Error::DataSourceNotFound`] is returned.
	pub fn data_source_uri(&self, name: &str) -> Result<&str> {
		self.app
			.data_sources
			.as_ref()
			.and_then(|sources| sources.get(name)?.get("uri")?.as_str())
			.ok_or_else(|| Error::DataSourceNotFound {
				id: self.app.id.clone(),
				name: name.to_owned(),
			})
	}
}

impl Inbound {
	/// Replaces the title, subtitle, and info texts with localized strings.
	///
	/// Values wrapped in `{{...}}` markers are stripped and looked up in the
	/// bundle; values whose key is absent keep the stripped value.
	///
	/// # Arguments
	///
	/// * `bundle` - The localization bundle to resolve texts against.
	pub fn localize(&mut self, bundle: &Bundle) {
		for text in [&mut self.title, &mut self.sub_title, &mut self.info] {
			if let Some(raw) = text.take() {
				*text = Some(bundle.resolve(&raw));
			}
		}
	}
}
