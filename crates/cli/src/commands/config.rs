use clap;
use eyre;
use serde_json;

use crate::run::Run;

#[derive(clap::Args)]
pub struct ConfigCommand {
	/// Pretty-print the configuration
	#[arg(short, long)]
	pretty: bool,
}

impl Run for ConfigCommand {
	fn run(&self, options: &launchpad::Options) -> eyre::Result<()> {
		let config = launchpad::assemble(options)?;

		let text = if self.pretty {
			serde_json::to_string_pretty(&config)?
		} else {
			launchpad::json::to_string(&config)?
		};

		println!("{text}");

		Ok(())
	}
}
