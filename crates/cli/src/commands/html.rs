use clap;
use eyre;

use crate::run::Run;

#[derive(clap::Args)]
pub struct HtmlCommand {}

impl Run for HtmlCommand {
	fn run(&self, options: &launchpad::Options) -> eyre::Result<()> {
		print!("{}", launchpad::render_page(options)?);

		Ok(())
	}
}
