//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, init, validate, health, tunnel), and their
//! associated argument structs. Running without a subcommand starts the
//! bridge with the top-level [`RunArgs`]. Every run flag has an
//! environment variable equivalent.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "xcms-bridge",
    version,
    about = "Local HTTP bridge to a fixed XCMS backend",
    propagate_version = true,
    args_conflicts_with_subcommands = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        xcms-bridge                          Serve on 0.0.0.0:5000, forward to localhost:9001\n  \
        xcms-bridge --backend-port 9101      Forward to a different backend port\n  \
        xcms-bridge tunnel localtunnel       Expose port 5000 publicly"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the bridge (default when no subcommand is given)
    #[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
            xcms-bridge run                                   Auto-detect config\n  \
            xcms-bridge run -c bridge.yaml                    Specific config file\n  \
            xcms-bridge run --backend-host 192.168.1.184      Remote XCMS host\n  \
            xcms-bridge run -p 8080 --pretty                  Local dev mode")]
    Run(Box<RunArgs>),

    /// Generate a starter config file
    Init(InitArgs),

    /// Validate a config file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),

    /// Expose the bridge port through ngrok or localtunnel
    Tunnel(TunnelArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "XCMS_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address [default: 0.0.0.0]
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Listen port [default: 5000]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    // -- Backend --
    /// Backend host [default: localhost]
    #[arg(long, env = "XCMS_HOST", help_heading = "Backend")]
    pub backend_host: Option<String>,

    /// Backend port [default: 9001]
    #[arg(long, env = "XCMS_PORT", help_heading = "Backend")]
    pub backend_port: Option<u16>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    /// Do not print the tunnel options banner
    #[arg(long)]
    pub no_banner: bool,

    // -- Tuning --
    /// Backend timeout in milliseconds [default: 5000]
    #[arg(long, env = "REQUEST_TIMEOUT_MS", help_heading = "Tuning")]
    pub timeout: Option<u64>,

    /// Max request body size in bytes [default: 1048576]
    #[arg(long, env = "MAX_BODY_SIZE", help_heading = "Tuning")]
    pub max_body: Option<usize>,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        xcms-bridge init                          Minimal config (yaml)\n  \
        xcms-bridge init --full                   Every option, documented\n  \
        xcms-bridge init -f toml -o bridge.toml   TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include every option as documented comments
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "xcms-bridge.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:5000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TunnelArgs {
    /// Tunnel tool to launch
    pub tool: TunnelTool,

    /// Config file to read `listen.port` and `tunnel.subdomain` from
    #[arg(short, long, env = "XCMS_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Local port to expose [default: listen.port]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Requested subdomain, localtunnel only [default: tunnel.subdomain]
    #[arg(long)]
    pub subdomain: Option<String>,
}

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TunnelTool {
    /// ngrok (account required, more stable)
    Ngrok,
    /// localtunnel (free, no account)
    Localtunnel,
}

impl TunnelTool {
    /// Executable name looked up on `PATH`.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Ngrok => "ngrok",
            Self::Localtunnel => "lt",
        }
    }

    #[must_use]
    pub fn args(self, port: u16, subdomain: &str) -> Vec<String> {
        match self {
            Self::Ngrok => vec!["http".into(), port.to_string()],
            Self::Localtunnel => vec![
                "--port".into(),
                port.to_string(),
                "--subdomain".into(),
                subdomain.to_string(),
            ],
        }
    }

    #[must_use]
    pub const fn install_hint(self) -> &'static str {
        match self {
            Self::Ngrok => "Install ngrok from https://ngrok.com/download and run 'ngrok config add-authtoken <token>'.",
            Self::Localtunnel => "Install localtunnel with 'npm install -g localtunnel'.",
        }
    }
}
