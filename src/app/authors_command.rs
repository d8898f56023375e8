use super::{cli_manager::logging_level_cli_arg, command::Command};
use anyhow::{Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use std::io::Write;

const CMD_NAME: &str = "authors";

pub(crate) struct AuthorsCommand<'a> {
    app_name: &'a str,
    app_version: &'a str,
    authors: &'a str,
}

impl<'a> AuthorsCommand<'a> {
    pub(crate) fn new(app_name: &'a str, app_version: &'a str, authors: &'a str) -> Self {
        AuthorsCommand {
            app_name,
            app_version,
            authors,
        }
    }

    // Cargo joins the package authors with colons.
    fn write_authors(&self, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing the authors";
        writeln!(writer, "{} {}", self.app_name, self.app_version).context(context)?;
        for author in self.authors.split(':').filter(|a| !a.is_empty()) {
            writeln!(writer, "{}", author).context(context)?;
        }
        writer.flush().context(context)
    }
}

impl<'a> Command<'a> for AuthorsCommand<'a> {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays the version and the authors of crustadf")
            .setting(AppSettings::DisableVersion)
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.write_authors(&mut std::io::stdout())
    }
}
