use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use hxpreset_core::{
    PRESET_FILE_EXTENSION, Preset, PresetBuilder, PresetComparison, compare_presets, parse_preset,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HXPRESET_BUILD_COMMIT"),
    " ",
    env!("HXPRESET_BUILD_DATE"),
    ")"
);

const LOG_ENV: &str = "HXPRESET_LOG";

#[derive(Parser, Debug)]
#[command(name = "hxpreset")]
#[command(version = VERSION)]
#[command(
    about = "Inspect, compare and create HX One preset files (.hx1p).",
    long_about = None,
    after_help = "Examples:\n  hxpreset inspect chorus.hx1p\n  hxpreset compare a.hx1p b.hx1p --json\n  hxpreset create preset.json -o custom.hx1p"
)]
struct Cli {
    /// Enable debug logging on stderr (overridden by HXPRESET_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a preset file and print its header and parameters.
    Inspect {
        /// Path to a .hx1p file
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compare two preset files parameter by parameter.
    #[command(alias = "diff")]
    Compare {
        /// First .hx1p file
        first: PathBuf,

        /// Second .hx1p file
        second: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a preset file from a JSON description or an existing preset.
    #[command(
        after_help = "Description format:\n  {\"effect_id\": 500, \"name\": \"My Chorus\", \"parameters\": [{\"type\": 3, \"value\": 0.5}]}\n\nParameter types: 0=Flag, 1=BoolOrIndex, 2=Integer, 3=Float"
    )]
    Create {
        /// JSON preset description
        #[arg(required_unless_present = "from", conflicts_with = "from")]
        description: Option<PathBuf>,

        /// Start from an existing .hx1p file instead of a description
        #[arg(long)]
        from: Option<PathBuf>,

        /// Override the preset name
        #[arg(long)]
        name: Option<String>,

        /// Override the effect ID
        #[arg(long)]
        effect_id: Option<i64>,

        /// Output preset path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the preset bytes to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { input, output } => cmd_inspect(&input, &output),
        Commands::Compare {
            first,
            second,
            output,
        } => cmd_compare(&first, &second, &output),
        Commands::Create {
            description,
            from,
            name,
            effect_id,
            output,
            stdout,
            force,
            quiet,
        } => cmd_create(CreateArgs {
            description,
            from,
            name,
            effect_id,
            output,
            stdout,
            force,
            quiet,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

#[derive(Serialize)]
struct InspectReport<'a> {
    path: String,
    preset: &'a Preset,
}

#[derive(Serialize)]
struct CompareReport<'a> {
    first: String,
    second: String,
    comparison: &'a PresetComparison<'a>,
    summary: hxpreset_core::ComparisonSummary,
}

fn cmd_inspect(input: &Path, output: &OutputArgs) -> Result<(), CliError> {
    let path = resolve_input_path(input)?;
    let preset = load_preset(&path)?;

    if output.json {
        let report = InspectReport {
            path: path.display().to_string(),
            preset: &preset,
        };
        println!("{}", serialize_json(&report, output.pretty)?);
    } else {
        print!("{}", render::render_inspect(&path.display().to_string(), &preset));
    }
    Ok(())
}

fn cmd_compare(first: &Path, second: &Path, output: &OutputArgs) -> Result<(), CliError> {
    let first = resolve_input_path(first)?;
    let second = resolve_input_path(second)?;
    let preset_a = load_preset(&first)?;
    let preset_b = load_preset(&second)?;

    let comparison = compare_presets(&preset_a, &preset_b);
    debug!(
        different = comparison.different_parameters.len(),
        same = comparison.same_parameters.len(),
        "compared presets"
    );

    if output.json {
        let report = CompareReport {
            first: first.display().to_string(),
            second: second.display().to_string(),
            comparison: &comparison,
            summary: comparison.summary(),
        };
        println!("{}", serialize_json(&report, output.pretty)?);
    } else {
        print!(
            "{}",
            render::render_comparison(
                &first.display().to_string(),
                &second.display().to_string(),
                &comparison
            )
        );
    }
    Ok(())
}

struct CreateArgs {
    description: Option<PathBuf>,
    from: Option<PathBuf>,
    name: Option<String>,
    effect_id: Option<i64>,
    output: Option<PathBuf>,
    stdout: bool,
    force: bool,
    quiet: bool,
}

fn cmd_create(args: CreateArgs) -> Result<(), CliError> {
    let (mut builder, source) = match (&args.description, &args.from) {
        (Some(description), _) => (load_description(description)?, description.clone()),
        (None, Some(from)) => {
            let from = resolve_input_path(from)?;
            (PresetBuilder::from_preset(&load_preset(&from)?), from)
        }
        (None, None) => {
            return Err(CliError::new(
                "missing preset source",
                Some("pass a JSON description or --from <file.hx1p>".to_string()),
            ));
        }
    };
    if let Some(name) = args.name {
        builder.name = name;
    }
    if let Some(effect_id) = args.effect_id {
        builder.effect_id = effect_id;
    }

    let bytes = builder
        .build()
        .context("Failed to build preset")
        .map_err(|err| {
            CliError::new(
                format!("{err:#}"),
                Some("names must be 1-32 bytes and parameter types 0-3".to_string()),
            )
        })?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .context("Failed to write preset to stdout")?;
        return Ok(());
    }

    let output = args.output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    if same_file(&source, &output) {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    if output.exists() && !args.force {
        return Err(CliError::new(
            format!("output file already exists: {}", output.display()),
            Some("use --force to overwrite".to_string()),
        ));
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write preset: {}", output.display()))?;
    info!(path = %output.display(), "preset written");

    if !args.quiet {
        eprintln!("OK: preset written -> {}", output.display());
    }
    Ok(())
}

fn load_preset(path: &Path) -> Result<Preset, CliError> {
    validate_preset_file(path)?;
    let data =
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), "read preset file");
    parse_preset(&data).map_err(|err| {
        CliError::new(
            format!("invalid preset {}: {}", path.display(), err),
            Some("preset files are exactly 1440 bytes".to_string()),
        )
    })
}

fn load_description(path: &Path) -> Result<PresetBuilder, CliError> {
    if !path.is_file() {
        return Err(CliError::new(
            format!("description file not found: {}", path.display()),
            Some("pass a JSON preset description".to_string()),
        ));
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read description: {}", path.display()))?;
    serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid description {}: {}", path.display(), err),
            Some("expected {\"effect_id\", \"name\", \"parameters\"}".to_string()),
        )
    })
}

fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn validate_preset_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some(format!("use a .{PRESET_FILE_EXTENSION} file")),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(format!("use a .{PRESET_FILE_EXTENSION} file")),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != PRESET_FILE_EXTENSION {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some(format!("expected a .{PRESET_FILE_EXTENSION} file")),
        ));
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some(format!(
                "check the path or quote the pattern; expected .{PRESET_FILE_EXTENSION}"
            )),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut message = format!("multiple files match pattern '{}' ({} matches)", pattern, count);
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str("; matches: ");
            message.push_str(&listed);
            if count > 3 {
                message.push_str(", ...");
            }
            Err(CliError::new(
                message,
                Some("pass a single preset file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
