//! ChEBI curation CLI.
//!
//! Provides the `chebi` binary with subcommands over an OBO ontology file:
//! `prepare` prunes the graph and exports the attribute table, `subgraph`
//! emits a viewer payload for a neighborhood, and `resolve` picks the
//! canonical member of a group of ids.
//!
//! The pruning pipeline can be overridden with a JSON config passed via
//! `--config` or the `CHEBI_CONFIG` environment variable. `subgraph` and
//! `resolve` only prune (and so only read a config) with `--prepare`.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use chebi_core::render::DEFAULT_MAX_NODES;
use chebi_core::{
    build_attribute_table, neighborhood, resolve_representative, OntologyGraph, PruneConfig,
    PruningEngine, RenderPayload, Traversal, DEFAULT_KEYS,
};
use chebi_source::{load_obo_file, SourceError};

/// ChEBI ontology curation tools.
#[derive(Parser)]
#[command(name = "chebi", about = "ChEBI ontology curation tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Prune the ontology and export the attribute table as JSON.
    Prepare {
        /// Path to the OBO file.
        #[arg(long)]
        obo: PathBuf,

        /// Pruning config (JSON). Falls back to CHEBI_CONFIG.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Property keys to export (default: mass, charge, formula, inchikey, smiles).
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,

        /// Write the table here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the viewer payload for the neighborhood of a node.
    Subgraph {
        #[arg(long)]
        obo: PathBuf,

        /// Root node id, e.g. CHEBI:15377.
        #[arg(short, long)]
        root: String,

        #[arg(short, long, default_value_t = 1)]
        depth: usize,

        /// Follow edges in both directions.
        #[arg(long)]
        undirected: bool,

        /// Walk edges backwards (nodes from which the root is reachable).
        #[arg(long)]
        reversed: bool,

        /// Node ceiling; larger neighborhoods produce no payload.
        #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
        max_nodes: usize,

        /// Prune the graph before extracting.
        #[arg(long)]
        prepare: bool,

        /// Pruning config (JSON), only read with `--prepare`. Falls back to
        /// CHEBI_CONFIG.
        #[arg(short, long, requires = "prepare")]
        config: Option<PathBuf>,
    },

    /// Pick the canonical representative of a group of ids.
    Resolve {
        #[arg(long)]
        obo: PathBuf,

        /// Comma-separated ids of the group.
        #[arg(short, long, value_delimiter = ',', required = true)]
        ids: Vec<String>,

        /// Prune the graph before resolving.
        #[arg(long)]
        prepare: bool,

        /// Pruning config (JSON), only read with `--prepare`. Falls back to
        /// CHEBI_CONFIG.
        #[arg(short, long, requires = "prepare")]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Prepare {
            obo,
            config,
            keys,
            output,
        } => run_prepare(&obo, config, keys, output),
        Commands::Subgraph {
            obo,
            root,
            depth,
            undirected,
            reversed,
            max_nodes,
            prepare,
            config,
        } => run_subgraph(
            &obo,
            &root,
            depth,
            Traversal::from_flags(undirected, reversed),
            max_nodes,
            prepare.then_some(config),
        ),
        Commands::Resolve {
            obo,
            ids,
            prepare,
            config,
        } => run_resolve(&obo, &ids, prepare.then_some(config)),
    };
    process::exit(exit_code);
}

/// Resolves the pruning config from the flag, then `CHEBI_CONFIG`, then
/// the built-in pipeline.
fn load_config(flag: Option<PathBuf>) -> Result<PruneConfig, i32> {
    let path = flag.or_else(|| std::env::var_os("CHEBI_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => PruneConfig::from_path(&path).map_err(|e| {
            eprintln!("Error: {}", e);
            1
        }),
        None => Ok(PruneConfig::default()),
    }
}

/// Loads the graph and optionally prunes it.
///
/// Exit codes: 1 = config error, 2 = malformed ontology, 3 = I/O error.
fn load(obo: &Path, prune_with: Option<Option<PathBuf>>) -> Result<OntologyGraph, i32> {
    let engine = match prune_with {
        Some(config) => Some(PruningEngine::new(load_config(config)?)),
        None => None,
    };

    let mut graph = match load_obo_file(obo) {
        Ok(g) => g,
        Err(SourceError::Io(e)) => {
            eprintln!("Error: failed to read '{}': {}", obo.display(), e);
            return Err(3);
        }
        Err(e) => {
            eprintln!("Error: malformed ontology '{}': {}", obo.display(), e);
            return Err(2);
        }
    };

    if let Some(engine) = engine {
        let report = engine.prepare(&mut graph);
        let json = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize report: {}\"}}", e));
        eprintln!("{}", json);
    }
    Ok(graph)
}

fn run_prepare(obo: &Path, config: Option<PathBuf>, keys: Vec<String>, output: Option<PathBuf>) -> i32 {
    let graph = match load(obo, Some(config)) {
        Ok(g) => g,
        Err(code) => return code,
    };

    let keys: Vec<String> = if keys.is_empty() {
        DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
    } else {
        keys
    };

    let table = match build_attribute_table(&graph, &keys) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };
    let json = match table.to_json_pretty() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error: failed to serialize table: {}", e);
            return 1;
        }
    };

    match output {
        Some(path) => match std::fs::write(&path, json) {
            Ok(()) => {
                tracing::info!("wrote {} rows to {}", table.len(), path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: failed to write '{}': {}", path.display(), e);
                3
            }
        },
        None => {
            println!("{}", json);
            0
        }
    }
}

fn run_subgraph(
    obo: &Path,
    root: &str,
    depth: usize,
    traversal: Traversal,
    max_nodes: usize,
    prune_with: Option<Option<PathBuf>>,
) -> i32 {
    let graph = match load(obo, prune_with) {
        Ok(g) => g,
        Err(code) => return code,
    };

    let sub = match neighborhood(&graph, root, depth, traversal) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match RenderPayload::build(&sub, root, max_nodes) {
        Some(payload) => {
            let json = serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize payload: {}\"}}", e)
            });
            println!("{}", json);
            0
        }
        None => {
            eprintln!(
                "Neighborhood of {} has {} nodes, above the limit of {}",
                root,
                sub.node_count(),
                max_nodes
            );
            1
        }
    }
}

fn run_resolve(obo: &Path, ids: &[String], prune_with: Option<Option<PathBuf>>) -> i32 {
    let graph = match load(obo, prune_with) {
        Ok(g) => g,
        Err(code) => return code,
    };

    let table = match build_attribute_table(&graph, &DEFAULT_KEYS) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    match resolve_representative(&table, ids) {
        Some(rep) => {
            let json = serde_json::to_string_pretty(&rep).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize result: {}\"}}", e)
            });
            println!("{}", json);
            0
        }
        None => {
            eprintln!("No representative: none of the ids has a charge in the table");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subgraph_flags() {
        let cli = Cli::try_parse_from([
            "chebi", "subgraph", "--obo", "chebi.obo", "--root", "CHEBI:15377", "--depth", "2",
            "--reversed",
        ])
        .unwrap();
        match cli.command {
            Commands::Subgraph {
                root,
                depth,
                undirected,
                reversed,
                max_nodes,
                ..
            } => {
                assert_eq!(root, "CHEBI:15377");
                assert_eq!(depth, 2);
                assert!(!undirected);
                assert!(reversed);
                assert_eq!(max_nodes, DEFAULT_MAX_NODES);
            }
            _ => panic!("expected subgraph command"),
        }
    }

    #[test]
    fn cli_splits_resolve_ids() {
        let cli = Cli::try_parse_from([
            "chebi", "resolve", "--obo", "chebi.obo", "--ids", "CHEBI:1,CHEBI:2",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve { ids, prepare, .. } => {
                assert_eq!(ids, vec!["CHEBI:1", "CHEBI:2"]);
                assert!(!prepare);
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn resolve_requires_ids() {
        assert!(Cli::try_parse_from(["chebi", "resolve", "--obo", "chebi.obo"]).is_err());
    }

    #[test]
    fn config_without_prepare_is_rejected() {
        assert!(Cli::try_parse_from([
            "chebi", "subgraph", "--obo", "chebi.obo", "--root", "CHEBI:1", "--config", "x.json",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "chebi", "resolve", "--obo", "chebi.obo", "--ids", "CHEBI:1", "--config", "x.json",
        ])
        .is_err());
    }

    #[test]
    fn config_with_prepare_is_accepted() {
        let cli = Cli::try_parse_from([
            "chebi", "subgraph", "--obo", "chebi.obo", "--root", "CHEBI:1", "--prepare",
            "--config", "x.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Subgraph { prepare, config, .. } => {
                assert!(prepare);
                assert_eq!(config, Some(PathBuf::from("x.json")));
            }
            _ => panic!("expected subgraph command"),
        }
    }
}
