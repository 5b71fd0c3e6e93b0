//! docshelf CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use docshelf::{
    commands::{
        cmd_delete_document, cmd_ingest, cmd_init, cmd_list_documents, cmd_query, cmd_status,
        print_answer, print_documents, print_ingest_report, print_status, FailedFile, IngestInput,
    },
    config::Config,
    embed::HttpEmbedder,
    error::{Error, Result},
    extract::Format,
    generate::HttpGenerator,
    rerank::HttpReranker,
    store::QdrantStore,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docshelf")]
#[command(version, about = "Document question answering over a vector store", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize docshelf configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Ingest documents into the index
    Ingest {
        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Description for each file, paired in order (repeatable)
        #[arg(short, long = "description")]
        descriptions: Vec<String>,
    },

    /// Ask a question over the indexed documents
    Query {
        /// The question
        query: String,

        /// Restrict retrieval to these filenames (repeatable)
        #[arg(long = "file")]
        files: Option<Vec<String>>,
    },

    /// List indexed documents
    List,

    /// Delete a document and all its chunks
    Delete {
        /// Filename of the document to delete
        filename: String,
    },

    /// Show connection and collection status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "docshelf=debug" } else { "docshelf=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p),
        None => Config::load_from(None),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Init { force } => {
            let base_dir = cli
                .config
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf);
            cmd_init(base_dir, force).await
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "docshelf", &mut io::stdout());
            Ok(())
        }

        Commands::Ingest {
            files,
            descriptions,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let store = QdrantStore::connect(&config).await?;
            let embedder = HttpEmbedder::new(&config.embedding)?;

            // The boundary layer pairs each file with its description and
            // format tag before anything reaches the pipeline
            let descriptions = pair_descriptions(files.len(), descriptions)?;

            let mut inputs = Vec::new();
            let mut unreadable = Vec::new();
            for (path, description) in files.iter().zip(descriptions) {
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();

                match prepare_input(path, filename.clone(), description) {
                    Ok(input) => inputs.push(input),
                    Err(e) => unreadable.push(FailedFile {
                        filename,
                        error: e.to_string(),
                    }),
                }
            }

            let mut report = cmd_ingest(&config, &store, &embedder, inputs).await?;
            report.failed.extend(unreadable);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_ingest_report(&report);
            }
            Ok(())
        }

        Commands::Query { query, files } => {
            let config = load_config(cli.config.as_deref())?;
            let store = QdrantStore::connect(&config).await?;
            let embedder = HttpEmbedder::new(&config.embedding)?;
            let reranker = HttpReranker::new(&config.reranker)?;
            let generator = HttpGenerator::new(&config.generation)?;

            match cmd_query(
                &config, &store, &embedder, &reranker, &generator, &query, files,
            )
            .await
            {
                Ok(answer) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&answer)?);
                    } else {
                        print_answer(&answer);
                    }
                    Ok(())
                }
                Err(Error::NoResults) => {
                    if json {
                        println!("{}", serde_json::json!({ "no_results": true }));
                    } else {
                        println!("No results found.");
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::List => {
            let config = load_config(cli.config.as_deref())?;
            let store = QdrantStore::connect(&config).await?;

            let documents = cmd_list_documents(&store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&documents)?);
            } else {
                print_documents(&documents);
            }
            Ok(())
        }

        Commands::Delete { filename } => {
            let config = load_config(cli.config.as_deref())?;
            let store = QdrantStore::connect(&config).await?;

            cmd_delete_document(&store, &filename).await?;
            if json {
                println!("{}", serde_json::json!({ "deleted": filename }));
            } else {
                println!("✓ Deleted {}", filename);
            }
            Ok(())
        }

        Commands::Status => {
            let config = load_config(cli.config.as_deref())?;
            let store = QdrantStore::connect(&config).await?;

            let status = cmd_status(&config, &store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
            Ok(())
        }
    }
}

/// Match descriptions to files positionally. Giving no descriptions is fine
/// (they default to empty), but a partial list is rejected as a mispairing.
fn pair_descriptions(file_count: usize, descriptions: Vec<String>) -> Result<Vec<String>> {
    if descriptions.is_empty() {
        return Ok(vec![String::new(); file_count]);
    }
    if descriptions.len() != file_count {
        return Err(Error::Config(format!(
            "Got {} file(s) but {} description(s); pass one -d per file, or none",
            file_count,
            descriptions.len()
        )));
    }
    Ok(descriptions)
}

fn prepare_input(path: &Path, filename: String, description: String) -> Result<IngestInput> {
    let format = Format::detect(&filename)?;
    let bytes = std::fs::read(path)?;
    Ok(IngestInput {
        filename,
        format,
        description,
        bytes,
    })
}
