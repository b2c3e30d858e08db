use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use swatch::cli::{CliArgs, LogLevel};
use swatch::config::{
    build_watch_config, command_from_args, load_and_validate, load_from_path, CommandSpec,
    DEFAULT_CONFIG_FILE,
};
use swatch::errors::SwatchError;
use swatch::logging::resolve_level;

type TestResult = Result<(), Box<dyn Error>>;

fn parse(argv: &[&str]) -> CliArgs {
    let mut full = vec!["swatch"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("valid command line")
}

fn excludes(args: &CliArgs) -> Result<Vec<String>, SwatchError> {
    let cfg = build_watch_config(args, None)?;
    Ok(cfg.exclusions.iter().map(str::to_string).collect())
}

// ---- command line -------------------------------------------------------

#[test]
fn defaults_watch_current_dir() {
    let args = parse(&["ls"]);
    assert_eq!(args.directory, PathBuf::from("."));
    assert!(args.exclude.is_empty());
    assert_eq!(args.command, vec!["ls"]);
    assert!(!args.dry_run);
}

#[test]
fn short_and_long_directory_flags() {
    assert_eq!(parse(&["-d", "foo", "ls"]).directory, PathBuf::from("foo"));
    assert_eq!(
        parse(&["--directory", "foo", "ls"]).directory,
        PathBuf::from("foo")
    );
}

#[test]
fn exclude_lists_merge_with_defaults() -> TestResult {
    let short = parse(&["-e", "a,.b,./c", "ls"]);
    let long = parse(&["--exclude", "a,.b,./c", "ls"]);

    let want = vec![".b", ".git", "a", "c", "node_modules"];
    assert_eq!(excludes(&short)?, want);
    assert_eq!(excludes(&long)?, want);
    Ok(())
}

#[test]
fn repeated_exclude_flags_accumulate() -> TestResult {
    let args = parse(&["-e", "a", "-e", "b,c", "ls"]);
    assert_eq!(
        excludes(&args)?,
        vec![".git", "a", "b", "c", "node_modules"]
    );
    Ok(())
}

#[test]
fn command_args_after_command_are_not_options() {
    let args = parse(&["-d", "foo", "-e", "a,.b,./c", "ls", "-l", "-h"]);
    assert_eq!(args.directory, PathBuf::from("foo"));
    assert_eq!(args.exclude, vec!["a,.b,./c"]);
    assert_eq!(args.command, vec!["ls", "-l", "-h"]);
}

#[test]
fn swatch_flags_after_command_belong_to_the_command() {
    let args = parse(&["echo", "-d", "{}"]);
    assert_eq!(args.directory, PathBuf::from("."));
    assert_eq!(args.command, vec!["echo", "-d", "{}"]);
}

#[test]
fn missing_command_is_rejected() {
    assert!(CliArgs::try_parse_from(["swatch"]).is_err());
    assert!(CliArgs::try_parse_from(["swatch", "-d", "foo"]).is_err());
}

#[test]
fn option_without_value_is_rejected() {
    assert!(CliArgs::try_parse_from(["swatch", "-d"]).is_err());
}

#[test]
fn log_level_and_dry_run_flags() {
    let args = parse(&["--log-level", "debug", "--dry-run", "--debounce-ms", "50", "make"]);
    assert_eq!(args.log_level, Some(LogLevel::Debug));
    assert!(args.dry_run);
    assert_eq!(args.debounce_ms, Some(50));
}

// ---- validation ---------------------------------------------------------

#[test]
fn command_is_split_into_program_and_template() -> TestResult {
    let cmd = command_from_args(&["echo".into(), "{}".into(), "2".into()])?;
    assert_eq!(cmd, CommandSpec::new("echo", ["{}", "2"]));
    Ok(())
}

#[test]
fn empty_or_blank_command_is_no_command() {
    assert!(matches!(command_from_args(&[]), Err(SwatchError::NoCommand)));
    assert!(matches!(
        command_from_args(&["  ".into()]),
        Err(SwatchError::NoCommand)
    ));
    assert_eq!(
        SwatchError::NoCommand.to_string(),
        "You must specify a command"
    );
}

#[test]
fn zero_debounce_is_rejected() {
    let args = parse(&["--debounce-ms", "0", "ls"]);
    assert!(matches!(
        build_watch_config(&args, None),
        Err(SwatchError::ConfigError(_))
    ));
}

#[test]
fn debounce_defaults_to_200ms() -> TestResult {
    let cfg = build_watch_config(&parse(&["ls"]), None)?;
    assert_eq!(cfg.debounce, Duration::from_millis(200));
    Ok(())
}

#[test]
fn absolute_and_parent_exclusions_are_rejected() {
    for bad in ["/etc", "../sibling", "a/../b"] {
        let args = parse(&["-e", bad, "ls"]);
        let res = build_watch_config(&args, None);
        assert!(
            matches!(res, Err(SwatchError::ConfigError(_))),
            "{bad} should be rejected"
        );
    }
}

// ---- config file ----------------------------------------------------------

#[test]
fn config_file_in_watched_dir_is_merged() -> TestResult {
    let tmp = tempfile::tempdir()?;
    fs::write(
        tmp.path().join(DEFAULT_CONFIG_FILE),
        "[watch]\nexclude = [\"target\", \"./dist/\"]\ndebounce_ms = 300\n",
    )?;
    let dir = tmp.path().to_string_lossy().to_string();

    let cfg = load_and_validate(&parse(&["-d", &dir, "-e", "tmp", "make"]))?;

    let got: Vec<&str> = cfg.exclusions.iter().collect();
    assert_eq!(got, vec![".git", "dist", "node_modules", "target", "tmp"]);
    assert_eq!(cfg.debounce, Duration::from_millis(300));
    assert_eq!(cfg.command, CommandSpec::new("make", Vec::<String>::new()));
    Ok(())
}

#[test]
fn cli_debounce_overrides_file() -> TestResult {
    let tmp = tempfile::tempdir()?;
    fs::write(
        tmp.path().join(DEFAULT_CONFIG_FILE),
        "[watch]\ndebounce_ms = 300\n",
    )?;
    let dir = tmp.path().to_string_lossy().to_string();

    let cfg = load_and_validate(&parse(&["-d", &dir, "--debounce-ms", "75", "make"]))?;
    assert_eq!(cfg.debounce, Duration::from_millis(75));
    Ok(())
}

#[test]
fn missing_default_config_file_is_fine() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let dir = tmp.path().to_string_lossy().to_string();

    let cfg = load_and_validate(&parse(&["-d", &dir, "ls"]))?;
    assert_eq!(cfg.exclusions.len(), 2);
    Ok(())
}

#[test]
fn explicit_missing_config_is_an_error() {
    let args = parse(&["--config", "/definitely/not/here/Swatch.toml", "ls"]);
    assert!(matches!(
        load_and_validate(&args),
        Err(SwatchError::IoError(_))
    ));
}

#[test]
fn unknown_config_keys_are_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("custom.toml");
    fs::write(&path, "[watch]\nexcludes = [\"typo\"]\n")?;

    assert!(matches!(
        load_from_path(&path),
        Err(SwatchError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn empty_config_file_is_valid() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("empty.toml");
    fs::write(&path, "")?;

    let raw = load_from_path(&path)?;
    assert!(raw.watch.exclude.is_empty());
    assert_eq!(raw.watch.debounce_ms, None);
    Ok(())
}

#[test]
fn bad_exclusion_in_file_is_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    fs::write(
        tmp.path().join(DEFAULT_CONFIG_FILE),
        "[watch]\nexclude = [\"../outside\"]\n",
    )?;
    let dir = tmp.path().to_string_lossy().to_string();

    let res = load_and_validate(&parse(&["-d", &dir, "ls"]));
    assert!(matches!(res, Err(SwatchError::ConfigError(_))));
    Ok(())
}

// ---- logging --------------------------------------------------------------

#[test]
fn log_level_priority() {
    use tracing::Level;

    assert_eq!(resolve_level(Some(LogLevel::Trace), Some("error")), Level::TRACE);
    assert_eq!(resolve_level(None, Some("debug")), Level::DEBUG);
    assert_eq!(resolve_level(None, Some(" WARNING ")), Level::WARN);
    assert_eq!(resolve_level(None, Some("bogus")), Level::INFO);
    assert_eq!(resolve_level(None, None), Level::INFO);
}
