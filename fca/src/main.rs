//! # fca
//!
//! Command-line front end for the File Content Analyzer, built on fcalib.
//!
//! ## Usage
//!
//! ```bash
//! # Count occurrences of strings (case-insensitive by default)
//! fca search ./project --term TODO --term FIXME
//!
//! # Read search strings from a file (one per line, // comments allowed)
//! fca search ./project --terms-file search-strings.txt --case-sensitive
//!
//! # Line, word and character statistics per extension
//! fca stats ./project --include rs,toml
//!
//! # Find files by exact name or glob
//! fca names ./project --pattern "*.md" --pattern Cargo.toml
//!
//! # Show the effective configuration
//! fca config
//! ```
//!
//! Every mode writes a timestamped text report to `analysis-results/`
//! beside the executable unless `--no-report` is given.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use fcalib::{
    dedupe_preserving_order, load_list_file, render_names_report, render_search_report,
    render_stats_report, AnalyzerConfig, ContentReader, NameMatcher, ReportKind, ReportWriter,
    StatsAggregator, StringSearchAggregator, Walker, CONFIG_FILENAME, FILE_NAMES_FILENAME,
    PROGRAM_NAME, RESULTS_DIRNAME, SEARCH_STRINGS_FILENAME,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Where the running executable lives, and the defaults derived from it.
struct ToolLocation {
    exe: Option<PathBuf>,
    dir: PathBuf,
}

impl ToolLocation {
    fn detect() -> Self {
        let exe = std::env::current_exe().ok();
        let dir = exe
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { exe, dir }
    }
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .help("Directory to analyze (defaults to current directory)")
            .default_value("."),
    )
    .arg(
        Arg::new("include")
            .short('i')
            .long("include")
            .help("Include only these extensions (comma-separated, no dots)"),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .help("Exclude these extensions (comma-separated, no dots)"),
    )
    .arg(
        Arg::new("exclude-dir")
            .long("exclude-dir")
            .action(ArgAction::Append)
            .help("Skip directories with this name (replaces configured list; repeatable)"),
    )
    .arg(
        Arg::new("output-dir")
            .short('o')
            .long("output-dir")
            .help("Directory for the text report"),
    )
    .arg(
        Arg::new("no-report")
            .long("no-report")
            .action(ArgAction::SetTrue)
            .help("Do not write a report file"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print results as JSON"),
    )
}

fn case_arg() -> Arg {
    Arg::new("case-sensitive")
        .short('c')
        .long("case-sensitive")
        .action(ArgAction::SetTrue)
        .help("Match case exactly")
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("fca")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search strings, count lines/words/characters and match file names in a directory tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config-path")
                .long("config")
                .global(true)
                .help("Path to config.json (defaults to the executable's directory)"),
        )
        .arg(
            Arg::new("no-config")
                .long("no-config")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Ignore config.json and do not write it"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log skipped files and directories"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(filter_args(
            Command::new("search")
                .about("Count occurrences of search strings in file contents")
                .arg(
                    Arg::new("term")
                        .short('t')
                        .long("term")
                        .action(ArgAction::Append)
                        .help("Search string (can be specified multiple times)"),
                )
                .arg(
                    Arg::new("terms-file")
                        .long("terms-file")
                        .help("File with one search string per line"),
                )
                .arg(case_arg()),
        ))
        .subcommand(filter_args(
            Command::new("stats").about("Count lines, words, and characters in files"),
        ))
        .subcommand(filter_args(
            Command::new("names")
                .about("Find files by exact name or glob pattern")
                .arg(
                    Arg::new("pattern")
                        .short('p')
                        .long("pattern")
                        .action(ArgAction::Append)
                        .help("File name or glob such as *.md (can be specified multiple times)"),
                )
                .arg(
                    Arg::new("patterns-file")
                        .long("patterns-file")
                        .help("File with one name pattern per line"),
                )
                .arg(case_arg()),
        ))
        .subcommand(Command::new("config").about("Show the effective configuration"))
}

fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_path(matches: &ArgMatches, tool: &ToolLocation) -> Option<PathBuf> {
    if matches.get_flag("no-config") {
        return None;
    }
    Some(
        matches
            .get_one::<String>("config-path")
            .map(PathBuf::from)
            .unwrap_or_else(|| tool.dir.join(CONFIG_FILENAME)),
    )
}

fn split_list(value: &str) -> Vec<&str> {
    value.split(',').collect()
}

/// Load the configuration, apply one-run overrides, and persist them.
fn resolve_config(matches: &ArgMatches, path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match path {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };

    let mut overridden = false;
    if let Some(include) = matches.get_one::<String>("include") {
        config = config.with_included_extensions(split_list(include));
        overridden = true;
    }
    if let Some(exclude) = matches.get_one::<String>("exclude") {
        config = config.with_excluded_extensions(split_list(exclude));
        overridden = true;
    }
    if let Some(dirs) = matches.get_many::<String>("exclude-dir") {
        config = config.with_excluded_dirs(dirs.cloned());
        overridden = true;
    }

    if overridden {
        if let Some(path) = path {
            config
                .save(path)
                .with_context(|| format!("saving config to {}", path.display()))?;
        }
    }

    Ok(config)
}

/// Combine a batch file (explicit, or the default beside the executable) with
/// values given on the command line.
fn collect_inputs(
    matches: &ArgMatches,
    values_arg: &str,
    file_arg: &str,
    default_file: &Path,
) -> anyhow::Result<Vec<String>> {
    let mut inputs = Vec::new();

    match matches.get_one::<String>(file_arg) {
        Some(file) => inputs.extend(load_list_file(file)?),
        None if default_file.is_file() => {
            let from_file = load_list_file(default_file)?;
            tracing::info!(
                path = %default_file.display(),
                count = from_file.len(),
                "loaded batch file"
            );
            inputs.extend(from_file);
        }
        None => {}
    }

    if let Some(values) = matches.get_many::<String>(values_arg) {
        inputs.extend(values.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()));
    }

    Ok(dedupe_preserving_order(inputs))
}

/// Shared per-mode settings.
struct RunContext {
    root: PathBuf,
    walker: Walker,
    case_sensitive: bool,
    json: bool,
    report: Option<ReportWriter>,
}

impl RunContext {
    fn new(matches: &ArgMatches, config: &AnalyzerConfig, tool: &ToolLocation) -> anyhow::Result<Self> {
        let path = matches
            .get_one::<String>("path")
            .map(|s| s.as_str())
            .unwrap_or(".");
        let root = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

        let walker = Walker::new(config.filter_config(tool.exe.as_deref()));
        let case_sensitive = matches
            .try_get_one::<bool>("case-sensitive")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);

        let report = if matches.get_flag("no-report") {
            None
        } else {
            let dir = matches
                .get_one::<String>("output-dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| tool.dir.join(RESULTS_DIRNAME));
            Some(ReportWriter::new(dir))
        };

        Ok(Self {
            root,
            walker,
            case_sensitive,
            json: matches.get_flag("json"),
            report,
        })
    }

    fn emit<T: Serialize>(&self, result: &T, summary: String, kind: ReportKind, report: String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{summary}");
        }

        if let Some(writer) = &self.report {
            let path = writer.write(kind, &report)?;
            if !self.json {
                println!();
                println!("Results saved to: {}", path.display());
            }
        }
        Ok(())
    }
}

/// Handler for search command
fn search_handler(matches: &ArgMatches, ctx: &RunContext, tool: &ToolLocation) -> anyhow::Result<()> {
    let terms = collect_inputs(
        matches,
        "term",
        "terms-file",
        &tool.dir.join(SEARCH_STRINGS_FILENAME),
    )?;
    if terms.is_empty() {
        return Err(anyhow!("no search strings provided"));
    }

    let walk = ctx.walker.walk(&ctx.root)?;
    let result = StringSearchAggregator::new(ContentReader::new()).process(walk, &terms, ctx.case_sensitive);

    ctx.emit(
        &result,
        render::search_summary(&ctx.root, &result),
        ReportKind::StringSearch,
        render_search_report(&ctx.root, &result),
    )
}

/// Handler for stats command
fn stats_handler(ctx: &RunContext) -> anyhow::Result<()> {
    let walk = ctx.walker.walk(&ctx.root)?;
    let result = StatsAggregator::new(ContentReader::new()).process(walk);

    ctx.emit(
        &result,
        render::stats_summary(&result),
        ReportKind::FileStats,
        render_stats_report(&ctx.root, &result),
    )
}

/// Handler for names command
fn names_handler(matches: &ArgMatches, ctx: &RunContext, tool: &ToolLocation) -> anyhow::Result<()> {
    let patterns = collect_inputs(
        matches,
        "pattern",
        "patterns-file",
        &tool.dir.join(FILE_NAMES_FILENAME),
    )?;
    if patterns.is_empty() {
        return Err(anyhow!("no filename patterns provided"));
    }

    let walk = ctx.walker.walk(&ctx.root)?;
    let result = NameMatcher::new().process(walk, &patterns, ctx.case_sensitive);

    ctx.emit(
        &result,
        render::names_summary(&ctx.root, &result),
        ReportKind::NameSearch,
        render_names_report(&ctx.root, &result),
    )
}

/// Handler for config command
fn config_handler(path: Option<&Path>, config: &AnalyzerConfig) -> anyhow::Result<()> {
    match path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (disabled)"),
    }
    let effective = AnalyzerConfig {
        excluded_dirs: Some(config.effective_excluded_dirs()),
        ..config.clone()
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let tool = ToolLocation::detect();
    let path = config_path(matches, &tool);

    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("no command given"));
    };

    if name == "config" {
        let config = match &path {
            Some(p) => AnalyzerConfig::load(p)?,
            None => AnalyzerConfig::default(),
        };
        return config_handler(path.as_deref(), &config);
    }

    let config = resolve_config(sub, path.as_deref())?;
    let ctx = RunContext::new(sub, &config, &tool)?;
    tracing::debug!(root = %ctx.root.display(), mode = name, "starting {PROGRAM_NAME}");

    match name {
        "search" => search_handler(sub, &ctx, &tool),
        "stats" => stats_handler(&ctx),
        "names" => names_handler(sub, &ctx, &tool),
        other => Err(anyhow!("unknown command: {other}")),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_overrides_are_normalized() {
        let matches = build_command()
            .try_get_matches_from(["fca", "--no-config", "stats", "--include", ".PY, txt", "--exclude-dir", "target"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let config = resolve_config(sub, None).unwrap();

        assert_eq!(config.included_extensions, vec!["py", "txt"]);
        assert_eq!(config.effective_excluded_dirs(), vec!["target"]);
    }

    #[test]
    fn test_overrides_persisted() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        let matches = build_command()
            .try_get_matches_from(["fca", "stats", "--exclude", "log"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        resolve_config(sub, Some(&path)).unwrap();

        let saved = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(saved.excluded_extensions, vec!["log"]);
    }
}
