//! Core registry command line interface
//!
//! Resolves registry names to contract addresses on a Core node.

mod settings;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use settings::{Overrides, ResolverConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xcb_contracts::{CallOpts, RequestContext};
use xcb_crypto::derive_key;
use xcb_registry_resolution::{get_core_token, RegistryResolver};
use xcb_sdk::XcbClient;
use xcb_types::{decode_address, is_valid_address};

#[derive(Parser)]
#[command(name = "xcb-registry")]
#[command(about = "Resolve Core registry names to contract addresses", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of a Core node
    #[arg(long, global = true, env = "WEB3_PROVIDER")]
    provider: Option<String>,

    /// Registry contract address
    #[arg(long = "registry", global = true, env = "REGISTRY_ADDRESS")]
    registry_address: Option<String>,

    /// Address the lookup is made as
    #[arg(long, global = true)]
    caller: Option<String>,

    /// Lookup timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a registry name to a contract address
    Resolve {
        /// Registry name, e.g. CTN
        name: String,
        /// Print the full resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the Core Token and show its symbol and decimals
    CoreToken,
    /// Print the registry key derived from a name
    Key {
        name: String,
    },
    /// Check whether a string is a valid Core address
    ValidateAddress {
        address: String,
        /// Require the canonical lowercase form
        #[arg(long)]
        checksummed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ResolverConfig::load(cli.global.config.as_deref())?;
    config.apply(Overrides {
        provider: cli.global.provider,
        registry_address: cli.global.registry_address,
        caller: cli.global.caller,
        timeout_secs: cli.global.timeout,
        log_level: cli.global.log_level,
    });
    init_logging(&config);

    match cli.command {
        Commands::Resolve { name, json } => resolve_name(&config, &name, json).await,
        Commands::CoreToken => show_core_token(&config).await,
        Commands::Key { name } => {
            println!("{}", derive_key(&name));
            Ok(())
        }
        Commands::ValidateAddress {
            address,
            checksummed,
        } => validate_address(&address, checksummed),
    }
}

fn init_logging(config: &ResolverConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Request context bounded by the configured timeout and cancelled on Ctrl-C.
fn request_context(config: &ResolverConfig) -> RequestContext {
    let ctx = RequestContext::with_timeout(config.timeout());
    let on_interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling lookup");
            on_interrupt.cancel();
        }
    });
    ctx
}

async fn connect(config: &ResolverConfig) -> Result<Arc<XcbClient>> {
    let client = XcbClient::dial(&config.provider)
        .await
        .with_context(|| format!("cannot connect to provider {}", config.provider))?;
    Ok(Arc::new(client))
}

async fn resolve_name(config: &ResolverConfig, name: &str, json: bool) -> Result<()> {
    let registry = config.registry_address()?;
    let caller = config.caller()?;
    let backend = connect(config).await?;
    let ctx = request_context(config);

    let resolver = RegistryResolver::new(registry, backend);
    let resolution = resolver
        .resolve_address(&ctx, caller, name)
        .await
        .with_context(|| format!("cannot resolve {name}"))?;
    info!(name, address = %resolution.address, "resolved registry name");

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.address);
    }
    Ok(())
}

async fn show_core_token(config: &ResolverConfig) -> Result<()> {
    let registry = config.registry_address()?;
    let owner = config.caller()?;
    let backend = connect(config).await?;
    let ctx = request_context(config);

    let token = get_core_token(&ctx, registry, backend, owner)
        .await
        .context("cannot create core token instance")?;

    let opts = CallOpts::new(ctx).with_caller(owner);
    let symbol = token.symbol(&opts).await?;
    let decimals = token.decimals(&opts).await?;
    let balance = token.balance_of(&opts, owner).await?;

    println!("address:  {}", token.contract().address());
    println!("symbol:   {symbol}");
    println!("decimals: {decimals}");
    println!("balance:  {balance}");
    Ok(())
}

fn validate_address(address: &str, checksummed: bool) -> Result<()> {
    let decoded = decode_address(address).with_context(|| format!("invalid address {address}"))?;
    if checksummed && !is_valid_address(address, true) {
        anyhow::bail!("{address} is not in canonical form, expected {decoded}");
    }
    println!("{decoded} ({})", decoded.network());
    Ok(())
}
