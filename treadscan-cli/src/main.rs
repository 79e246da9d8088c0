//! treadscan CLI: tread-depth assessment from CCD capture logs.

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use treadscan_core::{
    dispatch, profile_lines, EdgeRule, HighEdgeAction, LogInput, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "treadscan")]
#[command(about = "Estimate tire tread depth from CCD reflectance capture logs")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a capture log and print the report as JSON.
    Assess(AssessArgs),

    /// Print the active calibration models and thresholds.
    Info(ConfigArgs),

    /// Print per-sensor signal statistics for a capture log.
    Profile(ProfileArgs),
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// JSON file with configuration overrides; missing keys keep defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report the fixed override depths when both edges are bright.
    #[arg(long)]
    override_mode: bool,

    /// Use the strict edge rule (> 2801 mV, more than two samples).
    #[arg(long)]
    legacy_edge_rule: bool,
}

#[derive(Debug, Clone, Args)]
struct AssessArgs {
    /// Capture log to read; stdin when omitted or "-".
    input: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,

    /// Exit with status 2 when the assessment fails.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Args)]
struct ProfileArgs {
    /// Capture log to read; stdin when omitted or "-".
    input: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Assess(args) => run_assess(&args),
        Commands::Info(args) => run_info(&args),
        Commands::Profile(args) => run_profile(&args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn run_assess(args: &AssessArgs) -> Result<()> {
    let config = build_config(&args.config)?;
    let input = read_input(args.input.as_deref())?;

    let report = treadscan_core::predict(input, &config);
    tracing::info!(success = report.success, "{}", report.message);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    if args.strict && !report.success {
        std::process::exit(2);
    }
    Ok(())
}

fn run_info(args: &ConfigArgs) -> Result<()> {
    let config = build_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config.model_info())?);
    Ok(())
}

fn run_profile(args: &ProfileArgs) -> Result<()> {
    let config = build_config(&args.config)?;
    let lines = read_input(args.input.as_deref())?.into_lines();

    let profile = profile_lines(&lines, &config);
    tracing::info!(
        "{}/{} sensors usable, {} pixels",
        profile.usable_sensors(),
        profile.sensors.len(),
        profile.total_pixels
    );
    println!("{}", serde_json::to_string_pretty(&profile)?);

    // Handy when aligning a head: also show what the dispatcher would say.
    let report = dispatch(&lines, &config);
    eprintln!("{}", report.message);
    Ok(())
}

fn build_config(args: &ConfigArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if args.override_mode {
        config = config.with_high_edge_action(HighEdgeAction::Override);
    }
    if args.legacy_edge_rule {
        config = config.with_edge_rule(EdgeRule::legacy_strict());
    }
    config
        .validate()
        .with_context(|| "configuration rejected")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<LogInput> {
    match path {
        Some(p) if p != Path::new("-") => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading capture {}", p.display()))?;
            Ok(LogInput::Text(text))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading capture from stdin")?;
            Ok(LogInput::Text(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use clap::CommandFactory;
    use tempfile::NamedTempFile;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_adjust_config() {
        let cli = Cli::parse_from(["treadscan", "assess", "log.txt", "--override-mode", "--legacy-edge-rule"]);
        let Commands::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        let config = build_config(&args.config).unwrap();
        assert_eq!(config.high_edge_action, HighEdgeAction::Override);
        assert_eq!(config.edge_rule, EdgeRule::legacy_strict());
        assert_eq!(args.input, Some(PathBuf::from("log.txt")));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_valley_samples": 80 }}"#).unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            override_mode: false,
            legacy_edge_rule: false,
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.min_valley_samples, 80);
        assert_eq!(config.filter, PipelineConfig::default().filter);
    }

    #[test]
    fn invalid_config_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pixel_window": {{ "min": 900, "max": 300 }} }}"#).unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            override_mode: false,
            legacy_edge_rule: false,
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn capture_file_is_read_as_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "--- SENSOR 1 ---\nPixel[300]: 2000.00 mV").unwrap();

        let lines = read_input(Some(file.path())).unwrap().into_lines();
        assert_eq!(lines, vec!["--- SENSOR 1 ---", "Pixel[300]: 2000.00 mV"]);
    }
}
