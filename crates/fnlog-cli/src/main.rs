use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fnlog_cli::logging::LoggingOverrides;
use fnlog_cli::output::OutputFormat;
use fnlog_lib::demo::{
    DEFAULT_GREETING_NAME, DEFAULT_ITERATIONS, DEFAULT_LOG_FREQUENCY, DEFAULT_SAMPLING_COUNT,
    SAMPLING_CAP,
};
use fnlog_lib::{Level, SinkSpec};

mod commands;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run fnlog logging demonstrations locally",
    allow_negative_numbers = true
)]
struct Cli {
    /// Logger identity rendered into every record.
    #[arg(long, global = true)]
    logger_name: Option<String>,

    /// Minimum level of the named logger.
    #[arg(long, global = true)]
    log_level: Option<Level>,

    /// Level for loggers without an explicit setting.
    #[arg(long, global = true)]
    root_level: Option<Level>,

    /// Where records go: stderr, stdout or file:<path>.
    #[arg(long, global = true)]
    sink: Option<SinkSpec>,

    /// Record template, for example "[{loggerName}] {message}".
    #[arg(long, global = true)]
    template: Option<String>,

    /// Do not raise the level of the default noisy sources.
    #[arg(long, global = true)]
    no_suppress: bool,

    /// JSON rendering for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit the three-record preamble plus one record at the requested level.
    Levels {
        #[arg(long, default_value = DEFAULT_GREETING_NAME)]
        name: String,
        /// trace, debug, info, warning or error; anything else logs at info.
        #[arg(long)]
        level: Option<String>,
    },
    /// Emit one record per level from debug to critical.
    AllLevels,
    /// Emit a capped number of sampling entries.
    Sample {
        #[arg(long, default_value_t = DEFAULT_SAMPLING_COUNT)]
        count: i64,
        #[arg(long, default_value_t = SAMPLING_CAP)]
        cap: i64,
    },
    /// Run a work loop that logs progress every N iterations.
    Perf {
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: i64,
        #[arg(long = "every", default_value_t = DEFAULT_LOG_FREQUENCY)]
        log_frequency: i64,
    },
    /// Log a submission, optionally failing on purpose.
    Submit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        generate_logs: Option<i64>,
        #[arg(long)]
        simulate_error: bool,
        /// Read the submission from a JSON file instead of flags.
        #[arg(long, conflicts_with_all = ["name", "generate_logs", "simulate_error"])]
        from_file: Option<PathBuf>,
    },
    /// Emit the health probe record.
    Health,
    /// Print a host logging profile as host.json.
    Profile {
        /// minimal, balanced, debug, disabled or per-function.
        name: String,
        /// Print the profile flattened into app-setting overrides instead.
        #[arg(long)]
        app_settings: bool,
    },
    /// List the known host logging profiles.
    Profiles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = LoggingOverrides {
        logger_name: cli.logger_name,
        log_level: cli.log_level,
        root_level: cli.root_level,
        sink: cli.sink,
        template: cli.template,
        no_suppress: cli.no_suppress,
    };
    let format = cli.format;

    match cli.command {
        Command::Levels { name, level } => {
            commands::demo::handle_levels(&overrides, &name, level.as_deref())
        }
        Command::AllLevels => commands::demo::handle_all_levels(&overrides, format),
        Command::Sample { count, cap } => {
            commands::demo::handle_sample(&overrides, count, cap, format)
        }
        Command::Perf {
            iterations,
            log_frequency,
        } => commands::demo::handle_perf(&overrides, iterations, log_frequency, format),
        Command::Submit {
            name,
            generate_logs,
            simulate_error,
            from_file,
        } => {
            let submission = commands::submit::resolve_submission(
                name,
                generate_logs,
                simulate_error,
                from_file.as_deref(),
            )?;
            commands::submit::handle_submit(&overrides, &submission, format)
        }
        Command::Health => commands::demo::handle_health(&overrides, format),
        Command::Profile { name, app_settings } => {
            commands::profile::handle_profile(&name, app_settings, format)
        }
        Command::Profiles => commands::profile::handle_list_profiles(),
    }
}
