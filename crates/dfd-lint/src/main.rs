//! `dfd-lint` command-line entry point

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use dfd_lint::project::load_catalog;
use dfd_lint::{check, rename_input, rename_labels, render_json, render_text, LintConfig, Project};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let project = || {
        Arg::new("project")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Project file (JSON)")
    };

    Command::new("dfd-lint")
        .version(dfd_lint::VERSION)
        .about("Validate and refactor DFD port behavior")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Validate the behavior of every port")
                .arg(project())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Linter configuration (TOML)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output diagnostics as JSON"),
                ),
        )
        .subcommand(
            Command::new("rename-input")
                .about("Rename an input and rewrite the behavior referencing it")
                .arg(project())
                .arg(Arg::new("from").long("from").required(true).help("Current input name"))
                .arg(Arg::new("to").long("to").required(true).help("New input name")),
        )
        .subcommand(
            Command::new("rename-labels")
                .about("Rewrite behavior after label types or values were renamed")
                .arg(project())
                .arg(
                    Arg::new("previous")
                        .long("previous")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Catalog snapshot before the renames (JSON array of label types)"),
                ),
        )
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli().get_matches()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("check", args)) => {
            let project = Project::load(path(args, "project")?)?;
            let config = match args.get_one::<PathBuf>("config") {
                Some(path) => LintConfig::load(path)?,
                None => LintConfig::default(),
            };

            let outcome = check(&project, &config);
            if args.get_flag("json") {
                println!("{}", render_json(&outcome.reports)?);
            } else {
                let behaviors: Vec<&str> = project.ports.iter().map(|p| p.behavior.as_str()).collect();
                print!("{}", render_text(&outcome.reports, &behaviors));
                eprintln!(
                    "{} diagnostics in {} of {} ports",
                    outcome.diagnostic_count(),
                    outcome.failing().count(),
                    outcome.reports.len()
                );
            }
            Ok(if outcome.fails(&config) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Some(("rename-input", args)) => {
            let project = Project::load(path(args, "project")?)?;
            let from = string(args, "from")?;
            let to = string(args, "to")?;

            let outcome = rename_input(&project, from, to);
            println!("{}", outcome.project.to_json()?);
            eprintln!("{} ports changed", outcome.changed.len());
            Ok(ExitCode::SUCCESS)
        }
        Some(("rename-labels", args)) => {
            let project = Project::load(path(args, "project")?)?;
            let previous = load_catalog(path(args, "previous")?)?;

            let outcome = rename_labels(&project, &previous);
            println!("{}", outcome.project.to_json()?);
            eprintln!("{} ports changed", outcome.changed.len());
            Ok(ExitCode::SUCCESS)
        }
        _ => unreachable!("subcommand_required"),
    }
}

fn path<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(id).with_context(|| format!("missing <{id}>"))
}

fn string<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a str> {
    args.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}
