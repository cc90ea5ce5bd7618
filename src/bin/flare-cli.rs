use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use flare_scope::codec::split_identifier;
use flare_scope::config::{load_config, FlareConfig};
use flare_scope::observability::init_logging;
use flare_scope::routing::hash;
use flare_scope::{Codec, Generator};

#[derive(Parser)]
#[command(name = "flare-cli")]
#[command(about = "Offline inspection of flare-scope identifiers", long_about = None)]
struct Cli {
    /// TOML config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route ID for a route path and parameter count, plus an identifier
    /// when arguments are given
    Id {
        /// Full route path, e.g. /page/open
        route_path: String,
        params: usize,
        /// JSON array of arguments
        args: Option<String>,
    },
    /// Encode a JSON array of arguments into a payload
    Encode { args: String },
    /// Decode a payload back into its JSON array
    Decode { payload: String },
    /// Split an identifier into route ID and decoded arguments
    Inspect { identifier: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FlareConfig::default(),
    };
    init_logging(&config.observability.log_level);

    let codec = Codec::from_config(&config);
    let output = match cli.command {
        Commands::Id {
            route_path,
            params,
            args,
        } => {
            let generator = Generator::new(route_path, params, &config);
            let identifier = match args {
                Some(args) => {
                    let args: Value = serde_json::from_str(&args)?;
                    Some(generator.id(&args)?)
                }
                None => None,
            };
            json!({
                "route_path": generator.route_path(),
                "params": generator.params(),
                "route_id": generator.route_id().as_str(),
                "identifier": identifier,
            })
        }
        Commands::Encode { args } => {
            let args: Value = serde_json::from_str(&args)?;
            let payload = codec.encode_within(&args, config.payload_limit())?;
            json!({
                "payload": payload,
                "chars": payload.chars().count(),
                "compressed": !payload.is_empty() && !payload.starts_with('['),
            })
        }
        Commands::Decode { payload } => Value::Array(codec.decode(&payload)?),
        Commands::Inspect { identifier } => {
            let (route_id, payload) = split_identifier(&identifier, config.routing.id_width);
            let args = match codec.decode(payload) {
                Ok(values) => Value::Array(values),
                Err(err) => json!({ "error": err.to_string() }),
            };
            json!({
                "route_id": route_id,
                "well_formed": route_id.chars().count() == config.routing.id_width
                    && route_id.chars().all(|c| c == hash::PAD || c.is_ascii_alphanumeric()),
                "payload": payload,
                "args": args,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
