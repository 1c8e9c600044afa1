use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use search_cli::{build_server, load_documents};
use search_core::{
    log_duration, paginate, process_queries, process_queries_joined, remove_duplicates, DocumentStatus,
    ExecutionPolicy, RequestQueue, SearchConfig,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Index documents in memory and run TF-IDF queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Input path (file or directory of .json/.jsonl documents)
    #[arg(long)]
    input: PathBuf,
    /// Space separated stop words
    #[arg(long, env = "SEARCH_STOP_WORDS", default_value = "")]
    stop_words: String,
    /// Maximum number of results per query
    #[arg(long, default_value_t = search_core::config::MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Shards used by parallel scoring
    #[arg(long, default_value_t = search_core::config::DEFAULT_SHARD_COUNT)]
    shards: usize,
}

impl IndexArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig::default().with_max_results(self.max_results).with_shard_count(self.shards)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Status {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<Status> for DocumentStatus {
    fn from(s: Status) -> Self {
        match s {
            Status::Actual => DocumentStatus::Actual,
            Status::Irrelevant => DocumentStatus::Irrelevant,
            Status::Banned => DocumentStatus::Banned,
            Status::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries and print ranked results page by page
    Search {
        #[command(flatten)]
        index: IndexArgs,
        /// Query text; repeat for several queries
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only return documents with this status
        #[arg(long, value_enum, default_value_t = Status::Actual)]
        status: Status,
        /// Score each query in parallel
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Results printed per page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
    /// Remove documents whose word sets repeat an earlier document
    Dedup {
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Evaluate many queries concurrently
    Batch {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Print all results as one list
        #[arg(long, default_value_t = false)]
        joined: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { index, queries, status, parallel, page_size } => {
            search(&index, &queries, status.into(), parallel, page_size)
        }
        Commands::Dedup { index } => dedup(&index),
        Commands::Batch { index, queries, joined } => batch(&index, &queries, joined),
    }
}

fn search(args: &IndexArgs, queries: &[String], status: DocumentStatus, parallel: bool, page_size: usize) -> Result<()> {
    let docs = load_documents(&args.input)?;
    let server = build_server(args.config(), &args.stop_words, &docs)?;
    let policy = if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };

    let mut requests = RequestQueue::new(&server);
    for query in queries {
        log_duration!(format!("query {query:?}"));
        let found = requests.add_find_request_with(policy, query, |_, s, _| s == status)?;
        println!("Results for {query:?}:");
        for (n, page) in paginate(&found, page_size).iter().enumerate() {
            println!("page {}: {}", n + 1, page);
        }
    }
    println!("Empty results: {}", requests.no_result_requests());
    Ok(())
}

fn dedup(args: &IndexArgs) -> Result<()> {
    let docs = load_documents(&args.input)?;
    let mut server = build_server(args.config(), &args.stop_words, &docs)?;
    log_duration!("remove duplicates");
    for id in remove_duplicates(&mut server) {
        println!("Found duplicate document id {id}");
    }
    println!("Documents left: {}", server.document_count());
    Ok(())
}

fn batch(args: &IndexArgs, queries: &[String], joined: bool) -> Result<()> {
    let docs = load_documents(&args.input)?;
    let server = build_server(args.config(), &args.stop_words, &docs)?;
    log_duration!("process queries");
    if joined {
        for doc in process_queries_joined(&server, queries)? {
            println!("{doc}");
        }
    } else {
        for (query, found) in queries.iter().zip(process_queries(&server, queries)?) {
            println!("{} documents for query [{query}]", found.len());
        }
    }
    Ok(())
}
