//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], [`health`] or
//! [`tunnel`]. Without a subcommand the bridge is started with the
//! top-level run flags.

pub mod health;
pub mod init;
pub mod run;
pub mod tunnel;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::BridgeError;

pub async fn dispatch(cli: Cli) -> Result<(), BridgeError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        Some(Commands::Tunnel(ref args)) => tunnel::execute(args).await,
        None => run::execute(cli.run).await,
    }
}
