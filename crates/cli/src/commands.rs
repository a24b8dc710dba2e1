mod config;
mod html;
mod serve;

use clap;
use eyre;

use crate::run::Run;

#[derive(clap::Subcommand)]
pub enum Commands {
	/// Print the assembled sandbox configuration
	Config(config::ConfigCommand),

	/// Print the assembled launchpad page
	Html(html::HtmlCommand),

	/// Serve the launchpad over HTTP
	Serve(serve::ServeCommand),
}

impl Run for Commands {
	fn run(&self, options: &launchpad::Options) -> eyre::Result<()> {
		match self {
			Self::Config(cmd) => cmd.run(options),
			Self::Html(cmd) => cmd.run(options),
			Self::Serve(cmd) => cmd.run(options),
		}
	}
}
