// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Office MCP CLI entrypoint.
//!
//! By default this serves MCP over stdio (intended for tool integrations). Use
//! `--http-port <port>` to serve streamable HTTP at `http://127.0.0.1:<port>/mcp` instead.
//! Logs always go to stderr; set `RUST_LOG` to change the level.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use office_mcp::config::ServerConfig;
use office_mcp::mcp::OfficeMcp;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--themes <file>] [--diagram-endpoint <url>] [--session-ttl-secs <n>]\n  {program} --http-port <port> [--themes <file>] [--diagram-endpoint <url>] [--session-ttl-secs <n>]\n\nWithout --http-port, MCP is served over stdio.\n--http-port serves streamable HTTP at `http://127.0.0.1:<port>/mcp` (0 = ephemeral).\n--themes loads the theme catalogue from a JSON file instead of the built-in one.\n--diagram-endpoint overrides the Mermaid rendering endpoint (default https://kroki.io/mermaid/png).\n--session-ttl-secs sets how long unsaved sessions live (default 1800).\n\nEnvironment: OFFICE_MCP_THEMES, OFFICE_MCP_DIAGRAM_ENDPOINT, OFFICE_MCP_SESSION_TTL_SECS; flags win."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    http_port: Option<u16>,
    themes: Option<String>,
    diagram_endpoint: Option<String>,
    session_ttl_secs: Option<u64>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.http_port = Some(port);
            }
            "--themes" => {
                if options.themes.is_some() {
                    return Err(());
                }
                options.themes = Some(args.next().ok_or(())?);
            }
            "--diagram-endpoint" => {
                if options.diagram_endpoint.is_some() {
                    return Err(());
                }
                options.diagram_endpoint = Some(args.next().ok_or(())?);
            }
            "--session-ttl-secs" => {
                if options.session_ttl_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                if secs == 0 {
                    return Err(());
                }
                options.session_ttl_secs = Some(secs);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn apply_options(mut config: ServerConfig, options: &CliOptions) -> ServerConfig {
    if let Some(path) = &options.themes {
        config.themes_path = Some(PathBuf::from(path));
    }
    if let Some(endpoint) = &options.diagram_endpoint {
        config.diagram.endpoint = endpoint.clone();
    }
    if let Some(secs) = options.session_ttl_secs {
        config.session_ttl = Duration::from_secs(secs);
    }
    config
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "office-mcp".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();
        let config = apply_options(ServerConfig::from_env()?, &options);
        let mcp = OfficeMcp::new(config.build_office()?);
        tracing::info!(
            session_ttl_secs = config.session_ttl.as_secs(),
            diagram_endpoint = %config.diagram.endpoint,
            themes = mcp.office().themes().names().count(),
            "office-mcp starting"
        );

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        let Some(port) = options.http_port else {
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        };

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
            tracing::info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    tracing::error!(error = %err, "MCP HTTP server error");
                }
            });

            tokio::signal::ctrl_c().await?;
            tracing::info!("shutting down");
            shutdown_token.cancel();
            let _ = server_handle.await;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("office-mcp: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use office_mcp::config::ServerConfig;

    use super::{apply_options, parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_http_port() {
        let options = parse(&["--http-port", "1234"]).expect("parse options");
        assert_eq!(options.http_port, Some(1234));
        assert_eq!(options.themes, None);
    }

    #[test]
    fn parses_every_flag_in_any_order() {
        let options = parse(&[
            "--session-ttl-secs",
            "60",
            "--themes",
            "themes.json",
            "--diagram-endpoint",
            "http://localhost:8000/mermaid/png",
            "--http-port",
            "0",
        ])
        .expect("parse options");

        assert_eq!(
            options,
            CliOptions {
                http_port: Some(0),
                themes: Some("themes.json".to_owned()),
                diagram_endpoint: Some("http://localhost:8000/mermaid/png".to_owned()),
                session_ttl_secs: Some(60),
            }
        );
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse(&["--http-port", "1", "--http-port", "2"]).unwrap_err();
        parse(&["--themes", "a.json", "--themes", "b.json"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_or_malformed_values() {
        parse(&["--http-port"]).unwrap_err();
        parse(&["--http-port", "70000"]).unwrap_err();
        parse(&["--session-ttl-secs", "0"]).unwrap_err();
        parse(&["--session-ttl-secs", "soon"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_arguments() {
        parse(&["--mcp"]).unwrap_err();
        parse(&["positional"]).unwrap_err();
    }

    #[test]
    fn flags_override_the_resolved_config() {
        let options = parse(&["--session-ttl-secs", "90", "--themes", "t.json"]).expect("parse options");
        let config = apply_options(ServerConfig::default(), &options);

        assert_eq!(config.session_ttl, Duration::from_secs(90));
        assert_eq!(config.themes_path.as_deref(), Some(std::path::Path::new("t.json")));
        assert_eq!(config.diagram, ServerConfig::default().diagram);
    }
}
