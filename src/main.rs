//! zoekt-mcp: MCP server for Zoekt code search
//!
//! Usage:
//!   zoekt-mcp serve               Start the MCP server (stdio transport)
//!   zoekt-mcp serve --port 8080   Start the MCP server (HTTP transport)
//!   zoekt-mcp search <query>      Search code
//!   zoekt-mcp repos [filter]      List indexed repositories
//!   zoekt-mcp stats               Show index statistics
//!   zoekt-mcp health              Check the backend

mod server;

use std::env;
use std::process;

use anyhow::{Context, Result};

use zoekt_mcp::cli::{health_command, repos_command, search_command, stats_command, SearchArgs};
use zoekt_mcp::config::Config;
use zoekt_mcp::logging::setup_logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config = Config::from_env().context("invalid environment configuration")?;
    let raw: Vec<String> = env::args().skip(1).collect();
    let mut args = config.apply_args(&raw).context("invalid command-line option")?;

    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    let command = args.remove(0);
    match command.as_str() {
        "serve" => {
            setup_logging(config.debug);
            match config.http_port {
                Some(port) => server::start_http(&config, port)?,
                None => server::start_stdio(&config)?,
            }
        }
        "search" => {
            setup_logging(config.debug);
            let limit = take_flag(&mut args, "--limit")?
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("--limit must be a number")?;
            let search = SearchArgs {
                repo: take_flag(&mut args, "--repo")?,
                lang: take_flag(&mut args, "--lang")?,
                cursor: take_flag(&mut args, "--cursor")?,
                limit,
                query: args.join(" "),
            };
            if search.query.trim().is_empty() {
                eprintln!("Usage: zoekt-mcp search <query> [--repo R] [--lang L] [--limit N] [--cursor C]");
                return Ok(());
            }
            search_command(&config, search)?;
        }
        "repos" => {
            setup_logging(config.debug);
            let cursor = take_flag(&mut args, "--cursor")?;
            let filter = args.first().cloned();
            repos_command(&config, filter, cursor)?;
        }
        "stats" => {
            setup_logging(config.debug);
            stats_command(&config)?;
        }
        "health" => {
            setup_logging(config.debug);
            health_command(&config)?;
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "--version" | "-V" | "version" => {
            print_version();
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
        }
    }

    Ok(())
}

/// Remove `flag <value>` from `args`, returning the value
fn take_flag(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("missing value for {}", flag);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn print_usage() {
    println!(
        r#"zoekt-mcp: MCP server for Zoekt code search

USAGE:
    zoekt-mcp <COMMAND> [OPTIONS]

COMMANDS:
    serve                  Start the MCP server (stdio transport)
    serve --port <PORT>    Start the MCP server (HTTP transport)
    search <query>         Search code (--repo, --lang, --limit, --cursor)
    repos [filter]         List indexed repositories (--cursor)
    stats                  Show index statistics
    health                 Check that the backend is reachable
    help                   Show this help message

OPTIONS:
    --url <URL>            Zoekt webserver URL (env: ZOEKT_URL, default: http://localhost:6070)
    --timeout-ms <MS>      Backend request timeout (env: ZOEKT_TIMEOUT_MS, default: 30000)
    --port <PORT>          Serve MCP over HTTP (env: ZOEKT_MCP_PORT)
    --debug                Debug logging (env: ZOEKT_MCP_DEBUG=1)

EXAMPLES:
    zoekt-mcp serve                          # Start MCP server (stdio)
    zoekt-mcp serve --port 8080              # Start MCP server (HTTP on port 8080)
    zoekt-mcp search "func main" --lang go   # Search Go code
    zoekt-mcp repos acme                     # Repositories matching "acme"
"#
    );
}

fn print_version() {
    println!("zoekt-mcp {}", env!("CARGO_PKG_VERSION"));
}
