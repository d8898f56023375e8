use super::{
    app_helper::AppHelper, command::Command, AuthorsCommand, CheckCommand, ProblemsCommand,
    SolveCommand,
};
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use crustadf::{
    adf::{AbstractDialecticalFramework, LabelType},
    io::InstanceReader,
    sat::{
        DefaultSatSolverFactory, IpasirSatSolverFactory, SatSolver, SatSolverFactory,
        SolvingListener, SolvingResult,
    },
};
use log::{info, trace, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Crustadf, a SAT-based reasoner for Abstract Dialectical Frameworks.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ProblemsCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the ADF (KPP format)")
        .required(true)
}

pub(crate) fn read_file_path<T>(
    file_path: &str,
    reader: &mut dyn InstanceReader<T>,
) -> Result<AbstractDialecticalFramework<T>>
where
    T: LabelType,
{
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(File::open(canonicalized)?);
    let adf = reader.read(&mut file_reader as &mut dyn Read)?;
    info!(
        "the ADF has {} argument(s) and {} link(s)",
        adf.n_arguments(),
        adf.n_links(),
    );
    Ok(adf)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

const ARG_IPASIR_LIBRARY: &str = "ARG_IPASIR_LIBRARY";

pub(crate) fn sat_solver_args() -> Vec<Arg<'static, 'static>> {
    vec![Arg::with_name(ARG_IPASIR_LIBRARY)
        .long("ipasir-library")
        .empty_values(false)
        .multiple(false)
        .help("a path to a shared library containing an IPASIR compatible SAT solver")
        .required(false)]
}

pub(crate) fn create_sat_solver_factory(
    arg_matches: &ArgMatches<'_>,
) -> Result<Box<dyn SatSolverFactory>> {
    let inner: Box<dyn SatSolverFactory> = match arg_matches.value_of(ARG_IPASIR_LIBRARY) {
        Some(s) => {
            let path = canonicalize_file_path(s)?;
            info!("using {path:?} IPASIR library for problems requiring a SAT solver");
            let str_path = path
                .to_str()
                .ok_or_else(|| anyhow!("invalid library path {:?}", path))?;
            let factory = IpasirSatSolverFactory::new(str_path)?;
            info!("IPASIR signature is {}", factory.ipasir_signature()?);
            Box::new(factory)
        }
        None => {
            info!("using the default SAT solver for problems requiring a SAT solver");
            Box::new(DefaultSatSolverFactory)
        }
    };
    Ok(Box::new(LoggingSatSolverFactory { inner }))
}

// Adds a logging listener to the solvers built by another factory.
struct LoggingSatSolverFactory {
    inner: Box<dyn SatSolverFactory>,
}

impl SatSolverFactory for LoggingSatSolverFactory {
    fn new_solver(&self) -> Result<Box<dyn SatSolver>> {
        let mut solver = self.inner.new_solver()?;
        solver.add_listener(Box::<SatSolvingLogger>::default());
        Ok(solver)
    }
}

#[derive(Default)]
struct SatSolvingLogger;

impl SolvingListener for SatSolvingLogger {
    fn solving_start(&self, n_vars: usize, n_clauses: usize) {
        trace!(
            "launching SAT solver on an instance with {} variables and {} clauses",
            n_vars,
            n_clauses
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        let r = match result {
            SolvingResult::Satisfiable(_) => "SAT",
            SolvingResult::Unsatisfiable => "UNSAT",
            SolvingResult::Unknown => "UNKNOWN",
        };
        trace!("SAT solver ended with result {}", r);
    }
}
