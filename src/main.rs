//! object2vec command line.
//!
//! Loads the configuration, installs logging and runs one orchestrator. The
//! response JSON goes to stdout; diagnostics go to the log.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use object2vec::{
    infer_query, logging, Field, InferRequest, Object2VecConfig, QueryDocument, VectorPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "object2vec", version, about = "Infer content vectors with doc2vec / LDA models")]
struct Cli {
    /// Configuration file (.properties/.ini/.cfg, .yaml, .toml or .json).
    #[arg(short, long, env = "OBJECT2VEC_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `file_path.model_path`.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infer vectors for every item folder of a corpus.
    Batch {
        /// Corpus root; defaults to `file_path.corpus_path`.
        corpus: Option<PathBuf>,
    },
    /// Infer vectors for one query document.
    Query {
        /// Document JSON inline, e.g. '{"contentId":"do_1","document":{"en":"..."}}'.
        #[arg(long, conflicts_with = "file")]
        json: Option<String>,
        /// Read the document from a file. Without --json or --file, stdin is read.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Read the vectors stored in the models for every corpus field file.
    Precomputed {
        /// Corpus root; defaults to `file_path.corpus_path`.
        corpus: Option<PathBuf>,
    },
    /// Print the vector dimension probed from the model directory.
    Dimension {},
    /// Find the stored document closest to some text.
    Nearest {
        /// Field key as in a query document (`en`, `hi`, `tags`).
        field: String,
        /// Query text, split on whitespace.
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Object2VecConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Object2VecConfig::from_env().context("loading config from environment")?,
    };
    if let Some(dir) = cli.model_dir {
        cfg.file_path.model_path = Some(dir);
    }

    logging::init(&cfg.logging, cfg.file_path.log_path.as_deref())?;

    let model_dir = cfg.model_dir()?.to_path_buf();
    match cli.command {
        Commands::Batch { corpus } => {
            let root = corpus_root(corpus, &cfg)?;
            println!("{}", infer_query(InferRequest::Corpus(root), &model_dir, &cfg)?);
        }
        Commands::Query { json, file } => {
            let doc = read_document(json, file.as_deref())?;
            println!("{}", infer_query(InferRequest::Document(doc), &model_dir, &cfg)?);
        }
        Commands::Precomputed { corpus } => {
            let root = corpus_root(corpus, &cfg)?;
            let pipeline = VectorPipeline::from_config(&cfg)?;
            println!("{}", pipeline.precomputed_corpus(&root)?.to_json()?);
        }
        Commands::Dimension {} => {
            let pipeline = VectorPipeline::from_config(&cfg)?;
            println!("{}", pipeline.n_dim());
        }
        Commands::Nearest { field, text } => {
            let pipeline = VectorPipeline::from_config(&cfg)?;
            match pipeline.nearest_doctag(&Field::from_document_key(&field), &text)? {
                Some(hit) => println!("{}\t{:.6}", hit.tag, hit.similarity),
                None => println!("no stored documents"),
            }
        }
    }
    Ok(())
}

fn corpus_root(arg: Option<PathBuf>, cfg: &Object2VecConfig) -> Result<PathBuf> {
    match arg {
        Some(root) => Ok(root),
        None => Ok(cfg.corpus_dir()?.to_path_buf()),
    }
}

fn read_document(json: Option<String>, file: Option<&Path>) -> Result<QueryDocument> {
    let raw = match (json, file) {
        (Some(json), _) => json,
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading query document from stdin")?;
            buf
        }
    };
    Ok(QueryDocument::from_json(&raw)?)
}
