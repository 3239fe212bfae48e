// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use civic_app::{AppCommand, AppState, Role, Screen, ThemeStore, parse_path};
use civic_db::{Store, ThemeFile, hydrate_theme};
use civic_tui::UiOptions;
use config::Config;
use logging::LogConfig;
use runtime::DbRuntime;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `civic --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let state_dir = config
        .state_dir()
        .context("resolve state directory -- set [storage].state_dir or CIVIC_STATE_DIR")?;
    if options.print_state_dir {
        println!("{}", state_dir.display());
        return Ok(());
    }

    logging::init_logging(&LogConfig {
        level: config.log_level()?,
        log_file: Some(config.log_file(&state_dir)),
    })?;

    let theme_file = ThemeFile::in_dir(&state_dir);
    let mut theme = ThemeStore::new(config.default_theme());
    hydrate_theme(&mut theme, &theme_file);

    let (role, screen) = options
        .start
        .unwrap_or_else(|| (config.role(), Screen::Dashboard));
    let store = Store::with_demo_data(OffsetDateTime::now_utc().date());
    info!(
        state_dir = %state_dir.display(),
        role = role.label(),
        screen = screen.slug(),
        theme = theme.mode().as_str(),
        "starting"
    );
    if options.check_only {
        return Ok(());
    }

    let mut state = AppState::for_role(role);
    if screen != Screen::Dashboard {
        state.dispatch(AppCommand::GoTo(screen));
    }

    let mut runtime = DbRuntime::new(store, theme_file);
    civic_tui::run_app(
        &mut state,
        &mut runtime,
        theme,
        UiOptions {
            page_size: config.page_size(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    /// Starting role and screen from `--role` or `--open`.
    start: Option<(Role, Screen)>,
    print_config_path: bool,
    print_state_dir: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        start: None,
        print_config_path: false,
        print_state_dir: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };
    let mut role = None;
    let mut open = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--role" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--role requires one of admin, mla, staff, citizen")
                })?;
                let value = value.as_ref();
                role = Some(Role::parse(value).ok_or_else(|| {
                    anyhow!("unknown role {value:?}; expected admin, mla, staff, or citizen")
                })?);
            }
            "--open" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--open requires a path such as /mla/grievances"))?;
                let value = value.as_ref();
                open = Some(parse_path(value).ok_or_else(|| {
                    anyhow!(
                        "cannot open {value:?}; use /<role>/<screen> with a screen that role can view"
                    )
                })?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-state-dir" => {
                options.print_state_dir = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    options.start = open.or_else(|| role.map(|role| (role, Screen::Dashboard)));
    Ok(options)
}

fn print_help() {
    println!("civic");
    println!("  --config <path>          Use a specific config path");
    println!("  --role <role>            Start as admin, mla, staff, or citizen");
    println!("  --open </role/screen>    Start on a screen, for example /mla/grievances");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-state-dir        Print resolved state directory");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config, state dir, and logging, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use civic_app::{Role, Screen};
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/civic-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                start: None,
                print_config_path: false,
                print_state_dir: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--role"], default_options_path())
            .expect_err("missing role value should fail");
        assert!(error.to_string().contains("--role requires"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn role_flag_starts_on_that_roles_dashboard() -> Result<()> {
        let options = parse_cli_args(vec!["--role", "staff"], default_options_path())?;
        assert_eq!(options.start, Some((Role::Staff, Screen::Dashboard)));

        let error = parse_cli_args(vec!["--role", "mayor"], default_options_path())
            .expect_err("unknown role should fail");
        assert!(error.to_string().contains("unknown role \"mayor\""));
        Ok(())
    }

    #[test]
    fn open_flag_wins_over_role() -> Result<()> {
        let options = parse_cli_args(
            vec!["--open", "/mla/grievances", "--role", "citizen"],
            default_options_path(),
        )?;
        assert_eq!(options.start, Some((Role::Mla, Screen::Grievances)));
        Ok(())
    }

    #[test]
    fn open_flag_rejects_screens_outside_the_role() {
        let error = parse_cli_args(vec!["--open", "/citizen/users"], default_options_path())
            .expect_err("citizen cannot view users");
        assert!(error.to_string().contains("cannot open \"/citizen/users\""));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(!options.print_state_dir);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_supports_short_help() -> Result<()> {
        let options = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(options.show_help);
        Ok(())
    }
}
