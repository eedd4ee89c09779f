use anyhow::{Context, Result, bail};
use clap::Parser;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use stylint_lib::config::{Config, normalize_key};
use stylint_lib::exit_codes::ExitStatus;
use stylint_lib::fix_coordinator::{DEFAULT_MAX_PASSES, FixCoordinator};
use stylint_lib::output::{OutputFormat, OutputWriter, format_all_warnings_as_json};
use stylint_lib::rule::{LintWarning, Rule};
use stylint_lib::rules::{all_rules, filter_rules};
use stylint_lib::utils::warn_once::WarnOnce;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to lint
    paths: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fix issues automatically where possible
    #[arg(short, long)]
    fix: bool,

    /// List all available rules
    #[arg(short, long)]
    list_rules: bool,

    /// Print the default options of every rule as a TOML configuration file
    #[arg(long)]
    default_config: bool,

    /// Enable only specific rules (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    enable: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Exclude files or directories (comma-separated glob patterns)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,

    /// Do not color the text output
    #[arg(long)]
    no_color: bool,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Only print diagnostics, no summary
    #[arg(short, long)]
    quiet: bool,
}

/// Outcome of linting (and possibly fixing) one file
struct FileReport {
    path: String,
    warnings: Vec<LintWarning>,
    fixed: usize,
}

fn init_logging(verbose: bool) {
    #[cfg(feature = "env_logger")]
    {
        let default_level = if verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp(None)
            .init();
    }
    #[cfg(not(feature = "env_logger"))]
    let _ = verbose;
}

/// Fold the command line rule selection into the loaded configuration
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if !cli.enable.is_empty() {
        config.global.enable = cli.enable.iter().map(|name| normalize_key(name.trim())).collect();
    }
    config
        .global
        .disable
        .extend(cli.disable.iter().map(|name| normalize_key(name.trim())));
    config.global.exclude.extend(cli.exclude.iter().cloned());
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid exclude pattern '{pattern}'"))?);
        // a bare directory name also excludes everything below it
        if !pattern.contains('*') {
            let nested = format!("{}/**", pattern.trim_end_matches('/'));
            builder.add(Glob::new(&nested).with_context(|| format!("Invalid exclude pattern '{pattern}'"))?);
        }
    }
    Ok(builder.build()?)
}

/// Render the default section of every configurable rule as one TOML document
fn default_config_toml(rules: &[Box<dyn Rule>]) -> Result<String> {
    let mut document = toml::Table::new();
    document.insert(
        "global".to_string(),
        toml::Value::try_from(stylint_lib::config::GlobalConfig::default())?,
    );
    for (name, section) in rules.iter().filter_map(|rule| rule.default_config_section()) {
        document.insert(name, section);
    }
    Ok(toml::to_string(&document)?)
}

fn clean_path(path: &Path) -> String {
    let display = path.to_string_lossy();
    display.strip_prefix("./").unwrap_or(&display).to_string()
}

/// Collect the files to lint: explicit files as given, directories walked for known extensions
fn find_source_files(paths: &[PathBuf], config: &Config) -> Result<Vec<String>> {
    let excludes = build_exclude_set(&config.global.exclude)?;
    let has_extension = |path: &Path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| config.global.extensions.iter().any(|known| known == ext))
    };

    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            bail!("Path not found: {}", path.display());
        }
        if path.is_file() {
            let cleaned = clean_path(path);
            if !excludes.is_match(&cleaned) {
                files.push(cleaned);
            }
            continue;
        }

        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(config.global.respect_gitignore)
            .git_global(config.global.respect_gitignore)
            .git_exclude(config.global.respect_gitignore)
            .require_git(false)
            .build();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let entry_path = entry.path();
                    if !entry_path.is_file() || !has_extension(entry_path) {
                        continue;
                    }
                    let cleaned = clean_path(entry_path);
                    if !excludes.is_match(&cleaned) {
                        files.push(cleaned);
                    }
                }
                Err(err) => log::warn!("Error walking directory: {err}"),
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn process_file(path: &str, rules: &[Box<dyn Rule>], fix: bool) -> Result<FileReport> {
    let start = Instant::now();
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;

    let report = if fix {
        let outcome = FixCoordinator::new()
            .fix_until_stable(&content, rules, DEFAULT_MAX_PASSES)
            .with_context(|| format!("Failed to fix {path}"))?;
        if outcome.content != content {
            fs::write(path, &outcome.content).with_context(|| format!("Failed to write {path}"))?;
        }
        FileReport {
            path: path.to_string(),
            warnings: outcome.remaining,
            fixed: outcome.fixes_applied,
        }
    } else {
        let warnings = stylint_lib::lint(&content, rules).with_context(|| format!("Failed to lint {path}"))?;
        FileReport {
            path: path.to_string(),
            warnings,
            fixed: 0,
        }
    };

    log::debug!("Processed {path} in {:?}", start.elapsed());
    Ok(report)
}

fn run(cli: &Cli) -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let mut config = Config::load(cli.config.as_deref(), &cwd).context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, cli);

    let warn_once = WarnOnce::new();
    let registry = all_rules(&config, &warn_once);
    config.validate_rule_names(registry.iter().map(|rule| rule.name()))?;

    let writer = OutputWriter::new(false, false);

    if cli.list_rules {
        for rule in &registry {
            writer.writeln(&format!("{:24} {}", rule.name(), rule.description()))?;
        }
        return Ok(ExitStatus::Clean);
    }

    if cli.default_config {
        writer.write(&default_config_toml(&registry)?)?;
        return Ok(ExitStatus::Clean);
    }

    if cli.paths.is_empty() {
        bail!("No paths provided. Pass files or directories to lint.");
    }

    let rules = filter_rules(&registry, &config.global);
    if rules.is_empty() {
        log::warn!("No rules are enabled");
    }

    let files = find_source_files(&cli.paths, &config)?;
    let start = Instant::now();

    #[cfg(feature = "parallel")]
    let results: Vec<(String, Result<FileReport>)> = files
        .par_iter()
        .map(|path| (path.clone(), process_file(path, &rules, cli.fix)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<(String, Result<FileReport>)> = files
        .iter()
        .map(|path| (path.clone(), process_file(path, &rules, cli.fix)))
        .collect();

    let error_writer = OutputWriter::new(true, false);
    let mut reports = Vec::new();
    let mut tool_errors = 0;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                tool_errors += 1;
                error_writer.write_error(&format!("{path}: {err:#}"))?;
            }
        }
    }

    let total_warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
    let total_fixed: usize = reports.iter().map(|r| r.fixed).sum();

    match cli.output_format {
        OutputFormat::Json => {
            let all: Vec<(String, Vec<LintWarning>)> =
                reports.into_iter().map(|report| (report.path, report.warnings)).collect();
            writer.writeln(&format_all_warnings_as_json(&all))?;
        }
        OutputFormat::Text => {
            let formatter = OutputFormat::Text.create_formatter(!cli.no_color);
            for report in reports.iter().filter(|r| !r.warnings.is_empty()) {
                writer.writeln(&formatter.format_warnings(&report.warnings, &report.path))?;
            }
            if !cli.quiet {
                if cli.fix && total_fixed > 0 {
                    writer.writeln(&format!("Fixed {total_fixed} issue(s)"))?;
                }
                if let Some(summary) =
                    formatter.format_summary(files.len(), total_warnings, start.elapsed().as_millis() as u64)
                {
                    writer.writeln(&summary)?;
                }
            }
        }
    }

    Ok(ExitStatus::from_run(tool_errors, total_warnings))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitStatus::ToolError.into()
        }
    }
}
