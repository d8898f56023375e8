use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the crustadf binary.
///
/// The name returned by [`name`](Command::name) must match the one of the clap subcommand;
/// it is used to dispatch the parsed arguments to [`execute`](Command::execute).
pub trait Command<'a> {
    /// The subcommand name, e.g. `solve`.
    fn name(&self) -> &str;

    /// The clap description of the subcommand and its arguments.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Runs the subcommand on its parsed arguments.
    ///
    /// An error makes the binary print the error chain and exit with status 1.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
