// crates/winxml-cli/src/main.rs
// ============================================================================
// Module: win-xml CLI Entry Point
// Description: Command dispatcher for win_xml descriptor tooling.
// Purpose: Describe the module, publish its schema, and validate caller input.
// Dependencies: clap, serde_json, thiserror, winxml-cli, winxml-config, winxml-descriptor
// ============================================================================

//! ## Overview
//! `win-xml` exposes the `win_xml` module descriptor to operators and host
//! tooling. `validate` exits 0 for accepted input, 2 when the input violates
//! the descriptor, and 1 for any other failure. Security posture: inputs are
//! untrusted; reads are size limited and unknown keys are rejected unless
//! configured otherwise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use winxml_cli::InputFormat;
use winxml_cli::ValidationReport;
use winxml_cli::audit_malformed_input;
use winxml_cli::audit_sink_from_config;
use winxml_cli::parse_input;
use winxml_cli::validate_and_audit;
use winxml_config::WinXmlConfig;
use winxml_descriptor::Descriptor;
use winxml_descriptor::ValidationOptions;
use winxml_descriptor::descriptor_docs_markdown;
use winxml_descriptor::descriptor_documentation_yaml;
use winxml_descriptor::descriptor_schema;
use winxml_descriptor::win_xml_descriptor;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code for input that violates the descriptor.
const EXIT_INVALID_INPUT: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "win-xml", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the module reference.
    Describe(DescribeCommand),
    /// Print the JSON schema for module input.
    Schema,
    /// Validate module input against the descriptor.
    Validate(ValidateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Reference output formats.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum DescribeFormatArg {
    /// Markdown reference.
    Markdown,
    /// Automation-style `DOCUMENTATION` YAML block.
    Yaml,
    /// Full descriptor as JSON.
    Json,
}

/// Arguments for the `describe` command.
#[derive(Args, Debug)]
struct DescribeCommand {
    /// Output format.
    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        default_value_t = DescribeFormatArg::Markdown
    )]
    format: DescribeFormatArg,
}

/// Caller input formats.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum InputFormatArg {
    /// JSON object.
    Json,
    /// YAML mapping.
    Yaml,
    /// TOML table.
    Toml,
}

impl From<InputFormatArg> for InputFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Json => Self::Json,
            InputFormatArg::Yaml => Self::Yaml,
            InputFormatArg::Toml => Self::Toml,
        }
    }
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Path to the module input file.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Explicit input format (defaults to the file extension, then JSON).
    #[arg(long, value_enum, value_name = "FORMAT")]
    input_format: Option<InputFormatArg>,
    /// Optional config file path (defaults to win-xml.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Ignore keys that match no parameter instead of rejecting them.
    #[arg(long)]
    allow_unknown_keys: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a win-xml configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to win-xml.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Describe(command) => command_describe(&command),
        Commands::Schema => command_schema(),
        Commands::Validate(command) => command_validate(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Descriptor Commands
// ============================================================================

/// Loads the shared descriptor.
fn descriptor() -> CliResult<&'static Descriptor> {
    win_xml_descriptor()
        .map_err(|err| CliError::new(format!("module descriptor is invalid: {err}")))
}

/// Executes the describe command.
fn command_describe(command: &DescribeCommand) -> CliResult<ExitCode> {
    let descriptor = descriptor()?;
    let rendered = match command.format {
        DescribeFormatArg::Markdown => descriptor_docs_markdown(descriptor),
        DescribeFormatArg::Yaml => descriptor_documentation_yaml(descriptor)
            .map_err(|err| CliError::new(err.to_string()))?,
        DescribeFormatArg::Json => format!("{}\n", pretty_json(descriptor)?),
    };
    write_stdout_bytes(rendered.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the schema command.
fn command_schema() -> CliResult<ExitCode> {
    let schema = descriptor_schema(descriptor()?);
    write_stdout_line(&pretty_json(&schema)?)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the validate command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let config = WinXmlConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let options = if command.allow_unknown_keys {
        ValidationOptions::lenient()
    } else {
        config.validation_options()
    };
    let format = command
        .input_format
        .map(InputFormat::from)
        .or_else(|| InputFormat::from_path(&command.input))
        .unwrap_or(InputFormat::Json);

    let sink = audit_sink_from_config(&config.audit)
        .map_err(|err| CliError::new(format!("failed to open audit sink: {err}")))?;
    let descriptor = descriptor()?;

    let bytes = match read_bytes_with_limit(&command.input, config.validation.max_input_bytes) {
        Ok(bytes) => bytes,
        Err(err) => {
            audit_malformed_input(descriptor, err.size(), sink.as_ref());
            return Err(CliError::new(read_error(&command.input, err)));
        }
    };
    let input = match parse_input(&bytes, format) {
        Ok(input) => input,
        Err(err) => {
            audit_malformed_input(descriptor, bytes.len(), sink.as_ref());
            return Err(CliError::new(err.to_string()));
        }
    };

    match validate_and_audit(descriptor, &input, options, bytes.len(), sink.as_ref()) {
        Ok(validated) => {
            let report = ValidationReport::new(descriptor, &validated);
            write_stdout_line(&pretty_json(&report)?)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            write_stdout_line(&pretty_json(&error)?)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = WinXmlConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("Config valid").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

impl ReadLimitError {
    /// Input size known at the point of failure, zero when unreadable.
    fn size(&self) -> usize {
        match self {
            Self::Io(_) => 0,
            Self::TooLarge {
                size, ..
            } => usize::try_from(*size).unwrap_or(usize::MAX),
        }
    }
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Formats a bounded read failure.
fn read_error(path: &Path, error: ReadLimitError) -> String {
    match error {
        ReadLimitError::Io(err) => format!("failed to read {}: {err}", path.display()),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => format!("input {} exceeds size limit ({size} > {limit} bytes)", path.display()),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Renders a value as pretty JSON.
fn pretty_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to render json: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
