use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gclog_graph::{run, GcLogError, HeapMode, RunOptions, Settings};

#[derive(Parser, Debug)]
#[command(name = "java-gclog-graph")]
#[command(about = "Render heap usage and collection events from a Java GC log as a PNG chart")]
#[command(disable_version_flag = true)]
struct Args {
    /// Path to the GC log file
    #[arg(short = 'f', long)]
    logfile: Option<PathBuf>,

    /// Path of the PNG to write [default: ./java-gclog-graph.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// chrono format of the log timestamps; write the fraction as `%.f` (a
    /// Python-style `.%f` is accepted) [default: %Y-%m-%dT%H:%M:%S%.f%z]
    #[arg(short = 'd', long)]
    datetime_format: Option<String>,

    /// Only graph this much time before the last collection (e.g., "30m", "6h", "2d", "1w")
    #[arg(short, long)]
    tail_time: Option<String>,

    /// Which heap value to plot for each collection [default: change]
    #[arg(short = 'm', long, value_enum)]
    heap_mode: Option<HeapMode>,

    /// Settings file (TOML, YAML or JSON); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop lines whose timestamp does not parse instead of aborting
    #[arg(long)]
    skip_bad_timestamps: bool,

    /// Export parsed series to a JSON file instead of drawing a PNG
    #[arg(long)]
    export: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Log parsing details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print version and homepage, then exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    ExitCode::from(cli(&args))
}

/// Run the command line and return the process exit status.
fn cli(args: &Args) -> u8 {
    if args.version {
        println!("{}", version_line());
        return 1;
    }

    match execute(args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            exit_code(&err)
        }
    }
}

fn version_line() -> String {
    format!(
        "java-gclog-graph Version: {} Homepage: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_HOMEPAGE")
    )
}

fn execute(args: &Args) -> Result<()> {
    let logfile = args
        .logfile
        .clone()
        .ok_or_else(|| anyhow!("The following argument is required: logfile"))?;
    let settings = settings(args)?;
    run(&RunOptions {
        logfile,
        settings,
        export: args.export.clone(),
    })?;
    Ok(())
}

/// Exit status for a failed run, looking through any added context.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GcLogError>()
        .map(GcLogError::exit_code)
        .unwrap_or(1)
}

/// Defaults, then the settings file, then flags.
fn settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load_or_default(args.config.as_deref())?;

    if let Some(output) = &args.output {
        settings.output = output.clone();
    }
    if let Some(format) = &args.datetime_format {
        settings.datetime_format = format.clone();
    }
    if let Some(tail) = &args.tail_time {
        settings.tail_time = Some(tail.clone());
    }
    if let Some(mode) = args.heap_mode {
        settings.heap_mode = mode;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    settings.skip_bad_timestamps |= args.skip_bad_timestamps;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("java-gclog-graph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_version_flag_exits_1() {
        let args = parse(&["-V"]);
        assert_eq!(cli(&args), 1);
        assert_eq!(
            version_line(),
            "java-gclog-graph Version: 1.1.0 Homepage: https://github.com/pes-soft/java-gclog-graph"
        );
    }

    #[test]
    fn test_missing_logfile_exits_1() {
        let args = parse(&[]);
        let err = execute(&args).unwrap_err();
        assert_eq!(err.to_string(), "The following argument is required: logfile");
        assert_eq!(cli(&args), 1);
    }

    #[test]
    fn test_exit_code_sees_through_context() {
        let empty = anyhow::Error::new(GcLogError::EmptyDataset).context("Failed to draw chart");
        assert_eq!(exit_code(&empty), 2);

        let malformed = anyhow::Error::new(GcLogError::MalformedQuantity {
            input: "3y".to_string(),
        });
        assert_eq!(exit_code(&malformed), 1);
        assert_eq!(exit_code(&anyhow!("disk full")), 1);
    }

    #[test]
    fn test_log_without_events_exits_2() {
        let mut log = Builder::new().suffix(".log").tempfile().unwrap();
        writeln!(log, "Java HotSpot(TM) 64-Bit Server VM\nHeap").unwrap();
        let out = tempfile::tempdir().unwrap();
        let png = out.path().join("gc.png");

        let args = parse(&[
            "-f",
            log.path().to_str().unwrap(),
            "-o",
            png.to_str().unwrap(),
        ]);

        assert_eq!(cli(&args), 2);
        assert!(!png.exists());
    }

    #[test]
    fn test_flags_override_settings_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "output = \"/srv/gc/from-file.png\"\ntail_time = \"2h\"\nheap_mode = \"before\"\nwidth = 2400"
        )
        .unwrap();

        let args = parse(&[
            "-c",
            file.path().to_str().unwrap(),
            "-m",
            "after",
            "--width",
            "800",
            "--skip-bad-timestamps",
        ]);
        let settings = settings(&args).unwrap();

        assert_eq!(settings.heap_mode, HeapMode::After);
        assert_eq!(settings.width, 800);
        assert!(settings.skip_bad_timestamps);
        // Values without a flag come from the file, then the defaults.
        assert_eq!(settings.output, PathBuf::from("/srv/gc/from-file.png"));
        assert_eq!(settings.tail_time.as_deref(), Some("2h"));
        assert_eq!(settings.height, Settings::default().height);
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let settings = settings(&parse(&["-f", "gc.log"])).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
