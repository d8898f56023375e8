use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crustadf::{
    adf::{AbstractDialecticalFramework, Interpretation},
    io::{InterpretationWriter, KppReader},
    sat::SatSolverFactory,
    solvers::{AdfReasoner, Decomposer, Semantics},
};
use log::info;
use std::str::FromStr;

const CMD_NAME: &str = "solve";

const ARG_SEMANTICS: &str = "SEMANTICS";
const ARG_FIRST: &str = "FIRST";
const ARG_COUNT: &str = "COUNT";
const ARG_DECOMPOSER: &str = "DECOMPOSER";
const ARG_SEED: &str = "SEED";
const ARG_PARALLELISM: &str = "PARALLELISM";
const ARG_DESIRED_PREFIXES: &str = "DESIRED_PREFIXES";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Computes the models of an ADF under a semantics")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(
                Arg::with_name(ARG_SEMANTICS)
                    .short("s")
                    .long("semantics")
                    .empty_values(false)
                    .multiple(false)
                    .help("the semantics (see the problems command)")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_FIRST)
                    .long("first")
                    .takes_value(false)
                    .help("stop after the first model"),
            )
            .arg(
                Arg::with_name(ARG_COUNT)
                    .long("count")
                    .takes_value(false)
                    .help("only print the number of models"),
            )
            .arg(
                Arg::with_name(ARG_DECOMPOSER)
                    .long("decomposer")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&[
                        "most-bipolar-parents",
                        "most-complex-acceptance-condition",
                        "random",
                    ])
                    .help("the strategy used to split the search among the workers"),
            )
            .arg(
                Arg::with_name(ARG_SEED)
                    .long("seed")
                    .empty_values(false)
                    .multiple(false)
                    .requires(ARG_DECOMPOSER)
                    .help("the seed of the random decomposer"),
            )
            .arg(
                Arg::with_name(ARG_PARALLELISM)
                    .long("parallelism")
                    .empty_values(false)
                    .multiple(false)
                    .default_value("1")
                    .help("the number of worker threads"),
            )
            .arg(
                Arg::with_name(ARG_DESIRED_PREFIXES)
                    .long("desired-prefixes")
                    .empty_values(false)
                    .multiple(false)
                    .help("the number of prefixes the search is split into (defaults to the parallelism)"),
            )
            .args(&common::sat_solver_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .ok_or_else(|| anyhow!("missing input file"))?;
        let semantics = read_semantics(arg_matches)?;
        let adf = common::read_file_path(file, &mut KppReader::default())?;
        let factory = common::create_sat_solver_factory(arg_matches)?;
        let options = SolveOptions::read(arg_matches)?;
        let models = match options.decomposer {
            Some(decomposer) => {
                solve_parallel(&adf, factory.as_ref(), semantics, decomposer, &options)?
            }
            None => solve_sequential(&adf, factory.as_ref(), semantics, &options)?,
        };
        let writer = InterpretationWriter::default();
        let mut out = std::io::stdout();
        if options.count {
            writer.write_model_count(&mut out, models)
        } else if models == 0 {
            writer.write_no_model(&mut out)
        } else {
            Ok(())
        }
    }
}

struct SolveOptions {
    first: bool,
    count: bool,
    decomposer: Option<Decomposer>,
    parallelism: usize,
    desired_prefixes: usize,
}

impl SolveOptions {
    fn read(arg_matches: &ArgMatches<'_>) -> Result<Self> {
        let parse_usize = |arg: &str| {
            arg_matches
                .value_of(arg)
                .map(usize::from_str)
                .transpose()
                .with_context(|| format!("while parsing the value of {}", arg))
        };
        let parallelism = parse_usize(ARG_PARALLELISM)?.unwrap_or(1).max(1);
        let desired_prefixes = parse_usize(ARG_DESIRED_PREFIXES)?.unwrap_or(parallelism);
        let seed = arg_matches
            .value_of(ARG_SEED)
            .map(u64::from_str)
            .transpose()
            .context("while parsing the seed")?
            .unwrap_or_default();
        let mut decomposer = arg_matches
            .value_of(ARG_DECOMPOSER)
            .map(Decomposer::from_str)
            .transpose()
            .context("while parsing the decomposer")?;
        if let Some(Decomposer::Random(_)) = decomposer {
            decomposer = Some(Decomposer::Random(seed));
        }
        if decomposer.is_none() && parallelism > 1 {
            decomposer = Some(Decomposer::MostBipolarParents);
        }
        Ok(SolveOptions {
            first: arg_matches.is_present(ARG_FIRST),
            count: arg_matches.is_present(ARG_COUNT),
            decomposer,
            parallelism,
            desired_prefixes,
        })
    }
}

fn read_semantics(arg_matches: &ArgMatches<'_>) -> Result<Semantics> {
    let str_semantics = arg_matches
        .value_of(ARG_SEMANTICS)
        .ok_or_else(|| anyhow!("missing semantics"))?;
    let semantics = Semantics::from_str(str_semantics)
        .with_context(|| format!(r#"unknown semantics "{}""#, str_semantics))?;
    info!("computing models for the {} semantics", semantics.as_ref());
    Ok(semantics)
}

fn solve_sequential(
    adf: &AbstractDialecticalFramework<String>,
    factory: &dyn SatSolverFactory,
    semantics: Semantics,
    options: &SolveOptions,
) -> Result<usize> {
    let reasoner = AdfReasoner::new(adf, factory);
    let writer = InterpretationWriter::default();
    let mut out = std::io::stdout();
    let mut n_models = 0;
    for model in reasoner.models(semantics)? {
        let model = model?;
        n_models += 1;
        if !options.count {
            writer.write_interpretation(adf, &model, &mut out)?;
        }
        if options.first {
            break;
        }
    }
    Ok(n_models)
}

fn solve_parallel(
    adf: &AbstractDialecticalFramework<String>,
    factory: &dyn SatSolverFactory,
    semantics: Semantics,
    decomposer: Decomposer,
    options: &SolveOptions,
) -> Result<usize> {
    info!(
        "using the {} decomposer with {} desired prefixes",
        decomposer.as_ref(),
        options.desired_prefixes
    );
    let reasoner = AdfReasoner::new(adf, factory);
    let writer = InterpretationWriter::default();
    let mut out = std::io::stdout();
    let mut write_error = None;
    let mut on_model = |model: &Interpretation| {
        if !options.count {
            if let Err(e) = writer.write_interpretation(adf, model, &mut out) {
                write_error = Some(e);
                return false;
            }
        }
        !options.first
    };
    let models = reasoner.models_parallel(
        semantics,
        decomposer,
        options.parallelism,
        options.desired_prefixes,
        &mut on_model,
    )?;
    match write_error {
        Some(e) => Err(e),
        None => Ok(models.len()),
    }
}
