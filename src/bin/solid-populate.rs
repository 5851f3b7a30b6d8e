//! solid-populate CLI: resolve population schemas against a graph file.
//!
//! Usage:
//!   solid-populate populate --graph graph.yaml --schema schema.yaml [--principal IRI]
//!   solid-populate type-index --graph graph.yaml --subject IRI --class CLASS
//!   solid-populate check-schema --schema schema.yaml

use clap::{Parser, Subcommand};
use futures_util::TryStreamExt;
use solid_populate::{
    default_config_path, Config, GraphAccessor, MemoryGraph, NodeRef, Populator, Schema, TypeIndex,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "solid-populate",
    version,
    about = "Populate application data trees from linked-data graphs"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a schema and print the resolved tree as JSON
    Populate {
        /// Graph document (YAML or JSON)
        #[arg(long)]
        graph: PathBuf,
        /// Schema document (YAML or JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Principal to bind the session alias to, overriding the graph's
        #[arg(long)]
        principal: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Look up where a subject keeps instances of a class
    TypeIndex {
        #[arg(long)]
        graph: PathBuf,
        /// Subject whose type index to read
        #[arg(long)]
        subject: String,
        /// Class to look for
        #[arg(long)]
        class: String,
    },
    /// Normalize a schema and report problems
    CheckSchema {
        #[arg(long)]
        schema: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config, String> {
    let path = path.unwrap_or_else(default_config_path);
    Config::load(&path).map_err(|e| format!("Failed to load config {}: {}", path.display(), e))
}

fn load_graph(path: &Path, config: &Config) -> Result<MemoryGraph, String> {
    MemoryGraph::load(path, &config.effective_prefixes())
        .map(|graph| graph.with_principal_alias(config.principal_alias.clone()))
        .map_err(|e| format!("Failed to load graph {}: {}", path.display(), e))
}

fn load_schema(path: &Path, config: &Config) -> Result<Schema, String> {
    let (schema, diagnostics) = Schema::load(path, &config.principal_alias)
        .map_err(|e| format!("Failed to load schema {}: {}", path.display(), e))?;
    for diagnostic in &diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    Ok(schema)
}

fn populator(graph: MemoryGraph, config: &Config) -> Populator {
    Populator::new(Arc::new(graph))
        .with_vocabulary(config.effective_vocabulary())
        .with_prefixes(config.effective_prefixes())
}

async fn cmd_populate(
    config: &Config,
    graph: &Path,
    schema: &Path,
    principal: Option<String>,
    pretty: bool,
) -> Result<(), String> {
    let graph = load_graph(graph, config)?;
    if let Some(principal) = principal {
        graph.set_principal(Some(NodeRef::new(config.effective_prefixes().expand(&principal))));
    }
    let schema = load_schema(schema, config)?;

    let tree = populator(graph, config).populate_schema(&schema).await;
    let output = if pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    };
    println!("{}", output.map_err(|e| format!("Failed to encode tree: {}", e))?);
    Ok(())
}

async fn cmd_type_index(config: &Config, graph: &Path, subject: &str, class: &str) -> Result<(), String> {
    let prefixes = config.effective_prefixes();
    let graph = load_graph(graph, config)?;
    let subject = NodeRef::new(prefixes.expand(subject));
    let class = prefixes.expand(class);
    let vocabulary = config.effective_vocabulary();
    let index = TypeIndex::new(&graph, subject, &vocabulary);

    let location = index
        .location(&class)
        .await
        .map_err(|e| format!("Type index lookup failed: {}", e))?;
    let Some(location) = location else {
        println!("No location registered for {}", class);
        return Ok(());
    };
    println!("location: {}", location);

    let instances: Vec<NodeRef> = graph
        .subjects(&location)
        .try_collect()
        .await
        .map_err(|e| format!("Enumerating instances failed: {}", e))?;
    for instance in instances {
        println!("  {}", instance);
    }
    Ok(())
}

fn cmd_check_schema(config: &Config, schema: &Path) -> Result<(), String> {
    let (schema, diagnostics) = Schema::load(schema, &config.principal_alias)
        .map_err(|e| format!("Failed to load schema {}: {}", schema.display(), e))?;
    let normalized = serde_json::to_string_pretty(&schema.to_value())
        .map_err(|e| format!("Failed to encode schema: {}", e))?;
    println!("{}", normalized);
    if diagnostics.is_empty() {
        eprintln!("{} field(s), no problems", schema.len());
    } else {
        for diagnostic in &diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Populate {
            graph,
            schema,
            principal,
            pretty,
        } => cmd_populate(&config, &graph, &schema, principal, pretty).await,
        Commands::TypeIndex {
            graph,
            subject,
            class,
        } => cmd_type_index(&config, &graph, &subject, &class).await,
        Commands::CheckSchema { schema } => cmd_check_schema(&config, &schema),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
