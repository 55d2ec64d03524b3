//! `xcms-bridge tunnel` — expose the bridge port through a tunnel tool.
//!
//! Runs `ngrok` or `lt` as a child process with inherited stdio and waits
//! for it to exit. The port and subdomain come from the flags, falling back
//! to `listen.port` and `tunnel.subdomain` of the resolved config. The
//! bridge itself is not started here; run it separately.

use crate::cli::TunnelArgs;
use crate::config;
use crate::config::model::Config;
use crate::config::validation::validate_subdomain;
use crate::error::{BridgeError, ValidationError};

pub async fn execute(args: &TunnelArgs) -> Result<(), BridgeError> {
    let (config, origin) = config::load(args.config.as_deref()).await?;
    let (port, subdomain) = resolve_target(args, &config);
    check_target(port, &subdomain)?;

    let program = args.tool.program();
    let argv = args.tool.args(port, &subdomain);
    println!("Starting {program} {} (config: {origin}) ...", argv.join(" "));

    run_program(program, &argv, args.tool.install_hint()).await
}

/// Flags win; otherwise the config's listen port and tunnel subdomain.
#[must_use]
pub fn resolve_target(args: &TunnelArgs, config: &Config) -> (u16, String) {
    let port = args.port.unwrap_or(config.listen.port);
    let subdomain = args
        .subdomain
        .clone()
        .unwrap_or_else(|| config.tunnel.subdomain.clone());
    (port, subdomain)
}

fn check_target(port: u16, subdomain: &str) -> Result<(), BridgeError> {
    let mut errors = Vec::new();
    if port == 0 {
        errors.push(ValidationError {
            section: "listen".into(),
            field: "port".into(),
            message: "port must be non-zero".into(),
            suggestion: None,
        });
    }
    if let Err(message) = validate_subdomain(subdomain) {
        errors.push(ValidationError {
            section: "tunnel".into(),
            field: "subdomain".into(),
            message,
            suggestion: None,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BridgeError::ConfigValidation { errors })
    }
}

/// Run `program` to completion. A program missing from `PATH` maps to
/// [`BridgeError::TunnelToolMissing`], a failed exit to
/// [`BridgeError::TunnelExited`].
pub async fn run_program(
    program: &'static str,
    argv: &[String],
    hint: &'static str,
) -> Result<(), BridgeError> {
    let status = tokio::process::Command::new(program)
        .args(argv)
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BridgeError::TunnelToolMissing { program, hint }
            } else {
                BridgeError::Io(e)
            }
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(BridgeError::TunnelExited {
            program,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TunnelTool;

    fn args(port: Option<u16>, subdomain: Option<&str>) -> TunnelArgs {
        TunnelArgs {
            tool: TunnelTool::Localtunnel,
            config: None,
            port,
            subdomain: subdomain.map(String::from),
        }
    }

    #[test]
    fn config_supplies_port_and_subdomain() {
        let mut config = Config::default();
        config.listen.port = 5100;
        config.tunnel.subdomain = "lobby-cams".into();

        assert_eq!(
            resolve_target(&args(None, None), &config),
            (5100, "lobby-cams".to_string())
        );
    }

    #[test]
    fn flags_win_over_config() {
        let mut config = Config::default();
        config.listen.port = 5100;
        config.tunnel.subdomain = "lobby-cams".into();

        assert_eq!(
            resolve_target(&args(Some(8080), Some("yard")), &config),
            (8080, "yard".to_string())
        );
    }

    #[test]
    fn bad_target_lists_every_problem() {
        let err = check_target(0, "no spaces").unwrap_err();
        match err {
            BridgeError::ConfigValidation { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[1].section, "tunnel");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_reports_install_hint() {
        let err = run_program("xcms-bridge-no-such-tunnel-tool", &[], "install it")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::TunnelToolMissing {
                program: "xcms-bridge-no-such-tunnel-tool",
                hint: "install it"
            }
        ));
        assert!(err.to_string().contains("install it"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_reports_exit_code() {
        let argv = ["-c".to_string(), "exit 3".to_string()];
        let err = run_program("sh", &argv, "unused").await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::TunnelExited {
                program: "sh",
                code: Some(3)
            }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_program_is_ok() {
        assert!(run_program("true", &[], "unused").await.is_ok());
    }
}
