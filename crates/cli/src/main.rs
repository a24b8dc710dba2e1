mod commands;
mod run;

use std::fs;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Commands;
use run::Run;

#[derive(clap::Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
struct Args {
	#[command(subcommand)]
	commands: Commands,

	/// Specify an options file
	#[arg(short, long, global = true)]
	config: Option<String>,

	/// Override the UI5 library version
	#[arg(long, global = true, value_name = "VERSION")]
	ui5_version: Option<String>,

	/// Override the theme
	#[arg(long, global = true)]
	theme: Option<String>,

	/// Override the launchpad mount path
	#[arg(long, global = true)]
	base_path: Option<String>,

	/// Override the path to the external configuration override document
	#[arg(long, global = true, value_name = "PATH")]
	app_config: Option<String>,

	/// Override the locale used to resolve localization bundles
	#[arg(long, global = true)]
	locale: Option<String>,

	/// Override the host project root
	#[arg(long, global = true)]
	root: Option<String>,
}

impl Args {
	/// Builds the launchpad options from the options file and flag overrides.
	fn options(&self) -> eyre::Result<launchpad::Options> {
		let mut options: launchpad::Options = match &self.config {
			Some(path) => {
				let file = fs::File::open(path)
					.wrap_err_with(|| format!("Failed to open options file {path}"))?;

				launchpad::json::from_reader(file)
					.wrap_err_with(|| format!("Failed to parse options file {path}"))?
			}
			None => Default::default(),
		};

		// Flags win over the options file.
		options.version = self.ui5_version.clone().or(options.version);
		options.theme = self.theme.clone().or(options.theme);
		options.base_path = self.base_path.clone().or(options.base_path);
		options.app_config_path = self.app_config.clone().or(options.app_config_path);
		options.locale = self.locale.clone().or(options.locale);
		options.root = self.root.clone().or(options.root);

		Ok(options)
	}
}

fn main() -> eyre::Result<()> {
	color_eyre::install()?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let args = Args::parse();
	let options = args.options()?;

	// Delegate to sub-commands.
	args.commands.run(&options)
}
