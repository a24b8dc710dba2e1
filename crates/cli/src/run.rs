use eyre;

use launchpad::Options;

/// A runnable subcommand.
pub trait Run {
	/// Runs the subcommand using the given options.
	fn run(&self, options: &Options) -> eyre::Result<()>;
}
