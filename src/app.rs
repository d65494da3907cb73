use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::catalog::DataSource;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::filter::Action;
use crate::session::command::{self, Command};
use crate::session::{Session, UserSelector};
use crate::view::{self, ViewFormat};

fn init_logging(verbose: u8) -> Result<(), String> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("failed to initialise logging: {e}"))
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: DataSource,
    format: ViewFormat,
    output: Option<String>,
    no_color: bool,
    user: Option<UserSelector>,
    search: Option<String>,
    interactive: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let users = args.users.or(cfg.users);
    let categories = args.categories.or(cfg.categories);
    let products = args.products.or(cfg.products);
    let source = match (users, categories, products) {
        (None, None, None) => DataSource::Builtin,
        (Some(users), Some(categories), Some(products)) => DataSource::Files {
            users: config::expand_tilde(&users),
            categories: config::expand_tilde(&categories),
            products: config::expand_tilde(&products),
        },
        _ => {
            return Err(
                "users, categories and products data files must be configured together"
                    .to_string(),
            )
        }
    };

    let output = args.output.or(cfg.output);
    let format = match args.format.or(cfg.format) {
        Some(raw) => ViewFormat::parse(&raw)
            .ok_or_else(|| format!("invalid format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(view::infer_format_from_path)
            .unwrap_or(ViewFormat::Text),
    };

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let user = match args.user.or(cfg.user) {
        Some(raw) => Some(
            raw.parse::<UserSelector>()
                .map_err(|e| format!("invalid user '{raw}': {e}"))?,
        ),
        None => None,
    };
    let search = args.search.or(cfg.search);

    Ok(RunConfig {
        source,
        format,
        output,
        no_color,
        user,
        search,
        interactive: args.interactive,
    })
}

fn apply_initial_filters(session: &mut Session, run: &RunConfig) -> Result<(), String> {
    if let Some(selector) = run.user.as_ref() {
        session.select_user(selector).map_err(|e| e.to_string())?;
    }
    if let Some(text) = run.search.as_ref() {
        session.dispatch(Action::SetFilterText(text.clone()));
    }
    Ok(())
}

fn write_output(path: &str, bytes: &[u8]) -> Result<(), String> {
    let path = config::expand_tilde(path);
    std::fs::write(&path, bytes)
        .map_err(|e| format!("failed to write output '{}': {e}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote view");
    Ok(())
}

fn report<W: Write>(out: &mut W, color: bool, message: &str) -> std::io::Result<()> {
    if color {
        writeln!(
            out,
            "{}{}{} {}",
            "[".bold().white(),
            "ERR".bold().red(),
            "]".bold().white(),
            message
        )
    } else {
        writeln!(out, "[ERR] {}", message)
    }
}

fn render_frame(session: &Session, format: ViewFormat, color: bool) -> std::io::Result<Vec<u8>> {
    session
        .render(format, color)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Drives an interactive session: one command per line, re-rendering the
/// view after every state change. Ends on `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    format: ViewFormat,
    color: bool,
) -> std::io::Result<()> {
    out.write_all(&render_frame(session, format, color)?)?;
    for line in input.lines() {
        let line = line?;
        let command = match command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                report(out, color, &e.to_string())?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", command::HELP)?;
                continue;
            }
            Command::Show => {}
            Command::SelectUser(selector) => {
                if let Err(e) = session.select_user(&selector) {
                    report(out, color, &e.to_string())?;
                    continue;
                }
            }
            Command::Search(text) => {
                session.dispatch(Action::SetFilterText(text));
            }
            Command::Clear => {
                session.dispatch(Action::ClearFilterText);
            }
            Command::Reset => {
                session.dispatch(Action::ResetAll);
            }
        }
        out.write_all(&render_frame(session, format, color)?)?;
        out.flush()?;
    }
    Ok(())
}

fn run(run: RunConfig) -> Result<(), String> {
    let mut session = Session::load(&run.source).map_err(|e| e.to_string())?;
    apply_initial_filters(&mut session, &run)?;

    let color = !run.no_color && run.format == ViewFormat::Text && run.output.is_none();

    if run.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        run_session(&mut session, stdin.lock(), &mut out, run.format, !run.no_color)
            .map_err(|e| format!("interactive session failed: {e}"))?;
        if let Some(path) = run.output.as_deref() {
            let bytes = session
                .render(run.format, false)
                .map_err(|e| e.to_string())?;
            write_output(path, &bytes)?;
        }
        return Ok(());
    }

    let bytes = session
        .render(run.format, color)
        .map_err(|e| e.to_string())?;
    match run.output.as_deref() {
        Some(path) => write_output(path, &bytes),
        None => std::io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("failed to write to stdout: {e}")),
    }
}

fn init_config() -> Result<(), String> {
    let path = config::default_config_path()
        .ok_or_else(|| "could not determine home directory".to_string())?;
    if config::ensure_default_config_file(&path)? {
        println!(":: {:<10}: {}", "Config", path.display());
    } else {
        println!(":: {:<10}: {} (already exists)", "Config", path.display());
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", CliArgs::command().render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                print!("{}", CliArgs::command().render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose)?;

    if args.init_config {
        return init_config();
    }

    let user_config_path: Option<PathBuf> = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => ConfigFile::default(),
    };

    run(build_run_config(args, cfg)?)
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn second_logging_init_reports_error() {
        let _first = init_logging(0);
        assert!(init_logging(1).unwrap_err().contains("logging"));
    }

    #[test]
    fn defaults_to_builtin_text_view() {
        let args = CliArgs::parse_from(["catalogview"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert!(matches!(run.source, DataSource::Builtin));
        assert_eq!(run.format, ViewFormat::Text);
        assert!(run.user.is_none());
        assert!(!run.interactive);
    }

    #[test]
    fn format_is_inferred_from_output() {
        let args = CliArgs::parse_from(["catalogview", "-o", "page.html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.format, ViewFormat::Html);
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = ConfigFile {
            format: Some("json".to_string()),
            user: Some("Anna".to_string()),
            search: Some("mi".to_string()),
            no_color: Some(true),
            ..ConfigFile::default()
        };
        let args = CliArgs::parse_from(["catalogview", "--format", "html", "--user", "all"]);
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.format, ViewFormat::Html);
        assert_eq!(run.user, Some(UserSelector::All));
        assert_eq!(run.search.as_deref(), Some("mi"));
        assert!(run.no_color);
    }

    #[test]
    fn config_data_files_must_be_complete() {
        let cfg = ConfigFile {
            users: Some("users.json".to_string()),
            ..ConfigFile::default()
        };
        let args = CliArgs::parse_from(["catalogview"]);
        assert!(build_run_config(args, cfg).is_err());
    }

    #[test]
    fn invalid_config_format_is_rejected() {
        let cfg = ConfigFile {
            format: Some("pdf".to_string()),
            ..ConfigFile::default()
        };
        let args = CliArgs::parse_from(["catalogview"]);
        assert!(build_run_config(args, cfg).unwrap_err().contains("pdf"));
    }

    #[test]
    fn initial_filters_apply_to_session() {
        let args = CliArgs::parse_from(["catalogview", "-u", "anna", "-s", "BR"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        let mut session = Session::load(&run.source).unwrap();
        apply_initial_filters(&mut session, &run).unwrap();
        let names: Vec<_> = session.visible().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bread"]);
    }

    #[test]
    fn unknown_initial_user_is_an_error() {
        let args = CliArgs::parse_from(["catalogview", "-u", "42"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        let mut session = Session::load(&run.source).unwrap();
        assert_eq!(
            apply_initial_filters(&mut session, &run).unwrap_err(),
            "unknown user: 42"
        );
    }
}
