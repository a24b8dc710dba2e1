use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::json;
use crate::json::json_struct_nodefault;
use crate::manifest;
use crate::manifest::Inbound;
use crate::manifest::Manifest;
use crate::merge;
use crate::options::Options;
use crate::properties;
use crate::properties::Bundle;

/// The configuration template's file name.
pub const CONFIG_TEMPLATE: &str = "appconfig.json";

/// The refresh interval for tiles without a declared one, in seconds.
const DEFAULT_REFRESH: u64 = 10;

/// The tile type of a plain navigation tile.
const TILE_TYPE_STATIC: &str = "sap.ushell.ui.tile.StaticTile";

/// The tile type of a tile polling an indicator data source.
const TILE_TYPE_DYNAMIC: &str = "sap.ushell.ui.tile.DynamicTile";

/// The application type every inbound resolves to.
const APPLICATION_TYPE: &str = "SAPUI5";

/// The plugin type bootstrap plugins are registered as.
const RENDERER_EXTENSIONS: &str = "RendererExtensions";

/// The section bootstrap plugins are registered in.
const PLUGINS_SECTION: &str = "/bootstrapPlugins";

/// The section tiles are appended to.
const TILES_SECTION: &str = "/services/LaunchPage/adapter/config/groups/0/tiles";

/// The section inbounds are registered in.
const INBOUNDS_SECTION: &str = "/services/ClientSideTargetResolution/adapter/config/inbounds";

/// An aggregation error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The configuration template does not exist.
	#[error("Configuration template not found at {0}")]
	TemplateNotFound(PathBuf),

	/// The external override document does not exist.
	#[error("Override document not found at {0}")]
	OverrideNotFound(PathBuf),

	/// The host project's package descriptor does not exist.
	#[error("Package descriptor not found at {0}")]
	PackageNotFound(PathBuf),

	/// A registered application directory is not a string.
	#[error("Registered application {0} is not a directory path")]
	InvalidAppEntry(usize),

	/// A section expected of the configuration template is missing or not the
	/// expected shape. Overrides replacing top-level keys wholesale can cause
	/// this.
	#[error("Configuration section {0} is missing or malformed")]
	MissingSection(&'static str),

	/// A manifest error occurred.
	#[error(transparent)]
	Manifest(#[from] manifest::Error),

	/// A localization bundle error occurred.
	#[error(transparent)]
	Properties(#[from] properties::Error),

	/// An IO error occurred.
	#[error(transparent)]
	Io(#[from] io::Error),

	/// A JSON (de)serialization error occurred.
	#[error(transparent)]
	Json(#[from] json::Error),
}

/// An aggregation result.
pub type Result<T> = std::result::Result<T, Error>;

json_struct_nodefault! {
	/// A tile appended to the launch page's preset group.
	#[derive(Clone)]
	#[serde(rename_all = "camelCase")]
	pub struct Tile {
		/// The tile id, `<appId>-<inboundId>`.
		pub id: String,

		/// The visual and navigation properties.
		pub properties: TileProperties,

		/// The tile type, static or dynamic.
		pub tile_type: String,

		/// The indicator poll interval in milliseconds.
		pub service_refresh_interval: u64,
	}
}

json_struct_nodefault! {
	/// The visual and navigation properties of a tile.
	#[derive(Clone)]
	pub struct TileProperties {
		/// The intent the tile navigates to, `#<semanticObject>-<action>`.
		#[serde(rename = "targetURL")]
		pub target_url: String,

		/// The tile title, localized.
		pub title: Option<String>,

		/// The tile info text, localized.
		pub info: Option<String>,

		/// The tile subtitle, localized.
		pub subtitle: Option<String>,

		/// The tile icon.
		pub icon: Option<String>,

		/// The URL polled for a dynamic tile's indicator number.
		#[serde(rename = "serviceUrl")]
		pub service_url: Option<String>,
	}
}

json_struct_nodefault! {
	/// The resolution entry attached to each registered inbound.
	#[derive(Clone)]
	#[serde(rename_all = "camelCase")]
	pub struct ResolutionResult {
		/// The application type.
		pub application_type: String,

		/// The component loaded for the application, `SAPUI5.Component=<appId>`.
		pub additional_information: String,

		/// The URL the application's webapp directory is mounted at.
		pub url: String,
	}
}

json_struct_nodefault! {
	/// A shell extension registered instead of a tile.
	#[derive(Clone)]
	pub struct BootstrapPlugin {
		/// The component, the full application id.
		pub component: String,

		/// The URL the plugin is loaded from.
		pub url: String,

		/// The kind of shell extension.
		#[serde(rename = "sap-ushell-plugin-type")]
		pub plugin_type: String,

		/// Whether the plugin is enabled.
		pub enabled: bool,
	}
}

/// Assembles the sandbox configuration for a project.
///
/// The configuration template is merged with the external override document
/// (when one is configured), then each application registered in the
/// project's `sapux` list contributes its tiles and inbounds, or its
/// bootstrap plugin entry, strictly in declaration order.
///
/// Every input is re-read on each call; nothing is cached between requests.
///
/// # Arguments
///
/// * `options` - The launchpad options.
///
/// # Errors
///
/// Any missing or malformed input file fails the whole assembly; no partial
/// configuration is returned. See [`Error`] for the kinds reported.
pub fn assemble(options: &Options) -> Result<Value> {
	let mut config = read_template(options)?;

	if let Some(path) = options.app_config_path() {
		let overrides = read_overrides(path)?;

		// Top-level keys only; nested sections are replaced wholesale.
		merge::merge(&mut config, overrides, merge::Depth::Shallow);
	}

	let package = read_package(options)?;

	let Some(apps) = package.get("sapux").and_then(Value::as_array) else {
		// No registered UI applications, the merged template stands alone.
		return Ok(config);
	};

	// Applications are processed one at a time, in declaration order. Tile
	// and inbound ordering in the output depend on it.
	for (index, dir) in apps.iter().enumerate() {
		let dir = dir.as_str().ok_or(Error::InvalidAppEntry(index))?;

		register_app(options, &mut config, dir)?;
	}

	Ok(config)
}

/// Assembles and serializes the sandbox configuration for a project.
/// This is a convenience function over [`assemble`].
///
/// # Errors
///
/// Errors from [`assemble`] are returned verbatim.
pub fn render_config(options: &Options) -> Result<String> {
	let config = assemble(options)?;

	Ok(json::to_string(&config)?)
}

/// Registers one application's contribution into the configuration.
fn register_app(options: &Options, config: &mut Value, dir: &str) -> Result<()> {
	let manifest = Manifest::from_file(options.webapp_dir(dir).join("manifest.json"))?;

	tracing::debug!(app = %manifest.id(), dir, "registering application");

	if manifest.is_plugin() {
		return register_plugin(config, &manifest);
	}

	// The bundle is resolved before any inbound is looked at; a missing
	// bundle fails the request even for applications without inbounds.
	let bundle = read_bundle(options, dir, &manifest)?;
	let url = mount_url(options, dir);

	let Some(nav) = &manifest.app.cross_navigation else {
		return Ok(());
	};

	for (inbound_id, raw) in &nav.inbounds {
		let mut inbound: Inbound = json::from_value(raw.clone())?;
		inbound.localize(&bundle);

		let tile_id = format!("{}-{inbound_id}", manifest.id());

		let tile = tile(&tile_id, &inbound, &manifest)?;
		section_array(config, TILES_SECTION)?.push(json::to_value(&tile)?);

		let entry = inbound_entry(&inbound, &manifest, &url)?;
		section_object(config, INBOUNDS_SECTION)?.insert(tile_id, entry);
	}

	Ok(())
}

/// Registers an application as a bootstrap plugin, keyed by the last
/// dot-segment of its id.
fn register_plugin(config: &mut Value, manifest: &Manifest) -> Result<()> {
	let name = manifest.component_name().to_owned();

	let plugin = BootstrapPlugin {
		component: manifest.id().to_owned(),
		url: format!("{name}/webapp"),
		plugin_type: RENDERER_EXTENSIONS.to_owned(),
		enabled: true,
	};

	section_object(config, PLUGINS_SECTION)?.insert(name, json::to_value(&plugin)?);

	Ok(())
}

/// Builds the tile descriptor for an inbound.
fn tile(tile_id: &str, inbound: &Inbound, manifest: &Manifest) -> Result<Tile> {
	let indicator = inbound.indicator_data_source.as_ref();

	let service_url = indicator
		.map(|indicator| {
			let uri = manifest.data_source_uri(&indicator.data_source)?;

			Ok::<_, manifest::Error>(format!("{uri}{}", indicator.path))
		})
		.transpose()?;

	let refresh = indicator
		.and_then(|indicator| indicator.refresh)
		.unwrap_or(DEFAULT_REFRESH);

	let tile_type = match indicator {
		Some(_) => TILE_TYPE_DYNAMIC,
		None => TILE_TYPE_STATIC,
	};

	Ok(Tile {
		id: tile_id.to_owned(),
		properties: TileProperties {
			target_url: format!("#{}-{}", inbound.semantic_object, inbound.action),
			title: inbound.title.clone(),
			info: inbound.info.clone(),
			subtitle: inbound.sub_title.clone(),
			icon: inbound.icon.clone(),
			service_url,
		},
		tile_type: tile_type.to_owned(),
		// Seconds to milliseconds.
		service_refresh_interval: refresh * 1000,
	})
}

/// Builds the inbound entry: the localized inbound descriptor plus its
/// resolution result.
fn inbound_entry(inbound: &Inbound, manifest: &Manifest, url: &str) -> Result<Value> {
	let resolution = ResolutionResult {
		application_type: APPLICATION_TYPE.to_owned(),
		additional_information: format!("SAPUI5.Component={}", manifest.id()),
		url: url.to_owned(),
	};

	let mut entry = json::to_value(inbound)?;

	if let Some(entry) = entry.as_object_mut() {
		entry.insert("resolutionResult".to_owned(), json::to_value(&resolution)?);
	}

	Ok(entry)
}

/// Computes the URL an application's webapp directory is mounted at.
fn mount_url(options: &Options, dir: &str) -> String {
	// The apps root folder is dropped from the mount path.
	format!("/{}/webapp", dir.replacen(options.apps_folder(), "", 1))
}

/// Reads an application's localization bundle, honoring the locale option.
fn read_bundle(options: &Options, dir: &str, manifest: &Manifest) -> Result<Bundle> {
	let mut path = manifest.bundle_path()?.to_owned();

	if let Some(locale) = options.locale() {
		path = properties::localized_path(&path, locale);
	}

	Ok(Bundle::from_file(options.webapp_dir(dir).join(path))?)
}

fn read_template(options: &Options) -> Result<Value> {
	read_json(&options.template_path(CONFIG_TEMPLATE), Error::TemplateNotFound)
}

fn read_overrides(path: &Path) -> Result<Value> {
	read_json(path, Error::OverrideNotFound)
}

fn read_package(options: &Options) -> Result<Value> {
	read_json(&options.package_path(), Error::PackageNotFound)
}

fn read_json(path: &Path, not_found: fn(PathBuf) -> Error) -> Result<Value> {
	let file = fs::File::open(path).map_err(|err| match err.kind() {
		io::ErrorKind::NotFound => not_found(path.to_owned()),
		_ => Error::Io(err),
	})?;

	Ok(json::from_reader(file)?)
}

/// Returns a mutable object section of the configuration.
fn section_object<'c>(
	config: &'c mut Value,
	section: &'static str,
) -> Result<&'c mut Map<String, Value>> {
	config
		.pointer_mut(section)
		.and_then(Value::as_object_mut)
		.ok_or(Error::MissingSection(section))
}

/// Returns a mutable array section of the configuration.
fn section_array<'c>(config: &'c mut Value, section: &'static str) -> Result<&'c mut Vec<Value>> {
	config
		.pointer_mut(section)
		.and_then(Value::as_array_mut)
		.ok_or(Error::MissingSection(section))
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;
	use crate::test;

	fn tiles(config: &Value) -> &Vec<Value> {
		config
			.pointer(TILES_SECTION)
			.and_then(Value::as_array)
			.unwrap()
	}

	fn inbounds(config: &Value) -> &Map<String, Value> {
		config
			.pointer(INBOUNDS_SECTION)
			.and_then(Value::as_object)
			.unwrap()
	}

	#[test]
	fn assemble_project() {
		let config = assemble(&test::options()).unwrap();

		let tiles = tiles(&config);

		// Two tile applications, three inbounds, in declaration order.
		// The plugin application contributes no tile.
		assert_eq!(tiles.len(), 3);

		assert_eq!(tiles[0]["id"], "sandbox.travel-display");
		assert_eq!(tiles[0]["tileType"], TILE_TYPE_STATIC);
		assert_eq!(tiles[0]["serviceRefreshInterval"], 10_000);
		assert_eq!(tiles[0]["properties"]["targetURL"], "#Travel-display");
		assert_eq!(tiles[0]["properties"]["title"], "Manage Travels");
		assert_eq!(tiles[0]["properties"]["subtitle"], "All bookings");
		assert_eq!(tiles[0]["properties"]["icon"], "sap-icon://flight");
		assert_eq!(tiles[0]["properties"].get("serviceUrl"), None);

		assert_eq!(tiles[1]["id"], "sandbox.travel-monitor");
		assert_eq!(tiles[1]["tileType"], TILE_TYPE_DYNAMIC);
		assert_eq!(tiles[1]["serviceRefreshInterval"], 5000);
		assert_eq!(
			tiles[1]["properties"]["serviceUrl"],
			"/odata/v4/travel/Bookings/$count"
		);

		// The key is absent from the bundle, the stripped value stands.
		assert_eq!(tiles[2]["id"], "sandbox.admin-overview");
		assert_eq!(tiles[2]["properties"]["title"], "adminTitle");
		assert_eq!(tiles[2]["properties"]["subtitle"], "Administration");

		let inbounds = inbounds(&config);

		assert_eq!(
			inbounds.keys().collect::<Vec<_>>(),
			[
				"sandbox.travel-display",
				"sandbox.travel-monitor",
				"sandbox.admin-overview"
			]
		);

		let display = &inbounds["sandbox.travel-display"];

		assert_eq!(display["semanticObject"], "Travel");
		assert_eq!(display["title"], "Manage Travels");
		assert_eq!(
			display["resolutionResult"]["additionalInformation"],
			"SAPUI5.Component=sandbox.travel"
		);
		assert_eq!(display["resolutionResult"]["applicationType"], "SAPUI5");
		assert_eq!(display["resolutionResult"]["url"], "/travel/webapp");

		// Unknown inbound fields are passed through verbatim.
		assert_eq!(inbounds["sandbox.admin-overview"]["hideLauncher"], false);
	}

	#[test]
	fn assemble_plugin() {
		let config = assemble(&test::options()).unwrap();

		let plugins = config
			.pointer(PLUGINS_SECTION)
			.and_then(Value::as_object)
			.unwrap();

		// Keyed by the last dot-segment of the application id.
		assert_eq!(plugins.keys().collect::<Vec<_>>(), ["notifier"]);

		let plugin = &plugins["notifier"];

		assert_eq!(plugin["component"], "sandbox.notifier");
		assert_eq!(plugin["url"], "notifier/webapp");
		assert_eq!(plugin["sap-ushell-plugin-type"], "RendererExtensions");
		assert_eq!(plugin["enabled"], true);

		// Plugin applications are never tiled, even with declared inbounds.
		assert!(!inbounds(&config).contains_key("sandbox.notifier-overview"));
	}

	#[test]
	fn assemble_localized() {
		let options = Options {
			locale: Some("de".to_owned()),
			..test::options()
		};

		let config = assemble(&options).unwrap();

		assert_eq!(
			tiles(&config)[0]["properties"]["title"],
			"Reisen verwalten"
		);
	}

	#[test]
	fn assemble_overrides() {
		let options = Options {
			app_config_path: Some(
				test::testdir()
					.join("appconfig-override.json")
					.to_str()
					.unwrap()
					.to_owned(),
			),
			..test::options()
		};

		let config = assemble(&options).unwrap();

		// The colliding top-level key is replaced wholesale.
		assert_eq!(
			config["applications"],
			serde_json::json!({ "custom": { "additionalInformation": "SAPUI5.Component=custom" } })
		);
		assert_eq!(config["search"], serde_json::json!({ "enabled": false }));

		// Nested sections the override does not name are still aggregated into.
		assert_eq!(tiles(&config).len(), 3);
	}

	#[test]
	fn assemble_without_sapux() {
		let options = Options {
			root: Some(test::testdir().join("bare").to_str().unwrap().to_owned()),
			..Default::default()
		};

		let config = assemble(&options).unwrap();

		// Template and overrides stand alone.
		assert!(tiles(&config).is_empty());
		assert!(inbounds(&config).is_empty());
	}

	#[test]
	fn assemble_missing_package() {
		let options = Options {
			root: Some(
				test::testdir()
					.join("no-such-project")
					.to_str()
					.unwrap()
					.to_owned(),
			),
			..Default::default()
		};

		let result = assemble(&options);

		assert!(matches!(result, Err(Error::PackageNotFound(_))));
	}

	#[test]
	fn assemble_unknown_data_source() {
		let dir = write_project(
			r#"{
				"_version": "1.12.0",
				"sap.app": {
					"id": "sandbox.bad",
					"i18n": "i18n/i18n.properties",
					"crossNavigation": {
						"inbounds": {
							"display": {
								"semanticObject": "Bad",
								"action": "display",
								"indicatorDataSource": {
									"dataSource": "missing",
									"path": "Things/$count"
								}
							}
						}
					}
				}
			}"#,
		);

		let options = Options {
			root: Some(dir.path().to_str().unwrap().to_owned()),
			..Default::default()
		};

		let result = assemble(&options);

		assert!(matches!(
			result,
			Err(Error::Manifest(manifest::Error::DataSourceNotFound { .. }))
		));
	}

	#[test]
	fn assemble_missing_bundle() {
		let dir = write_project(
			r#"{
				"_version": "1.12.0",
				"sap.app": {
					"id": "sandbox.bad",
					"i18n": "i18n/missing.properties"
				}
			}"#,
		);

		let options = Options {
			root: Some(dir.path().to_str().unwrap().to_owned()),
			..Default::default()
		};

		let result = assemble(&options);

		// No fallback to another bundle is attempted.
		assert!(matches!(
			result,
			Err(Error::Properties(properties::Error::NotFound(_)))
		));
	}

	#[test]
	fn assemble_clobbered_template() {
		let dir = tempfile::tempdir().unwrap();
		let override_path = dir.path().join("override.json");

		// The override replaces the whole services section.
		fs::write(&override_path, r#"{ "services": {} }"#).unwrap();

		let options = Options {
			app_config_path: Some(override_path.to_str().unwrap().to_owned()),
			..test::options()
		};

		let result = assemble(&options);

		assert!(matches!(result, Err(Error::MissingSection(_))));
	}

	#[test]
	fn render() {
		let text = render_config(&test::options()).unwrap();

		let config: Value = json::from_reader(text.as_bytes()).unwrap();

		assert_eq!(tiles(&config).len(), 3);
	}

	/// Writes a project with one registered application and a default bundle
	/// to a temporary directory.
	fn write_project(manifest: &str) -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();

		let webapp = dir.path().join("app/bad/webapp");

		fs::create_dir_all(webapp.join("i18n")).unwrap();
		fs::write(
			dir.path().join("package.json"),
			r#"{ "name": "bad", "sapux": ["app/bad"] }"#,
		)
		.unwrap();
		fs::write(webapp.join("manifest.json"), manifest).unwrap();
		fs::write(webapp.join("i18n/i18n.properties"), "title=Bad\n").unwrap();

		dir
	}
}
