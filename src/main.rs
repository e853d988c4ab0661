use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use semsearch::connector::api::{run_server, Container, ContainerConfig, ServerConfig};
use semsearch::{QueryResponse, DEFAULT_TOP_K};

#[derive(Parser)]
#[command(name = "semsearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use the deterministic mock embedding provider (no network access)
    #[arg(long, global = true)]
    mock_embeddings: bool,

    /// Embedding model identifier on the Hugging Face hub
    #[arg(long, global = true)]
    model: Option<String>,

    /// Corpus file used for seeding instead of the built-in samples
    #[arg(long, global = true)]
    documents: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single query and print the response
    Search {
        query: String,

        #[arg(long, default_value = "3")]
        num: usize,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Read queries from stdin until "q"
    Interactive,

    /// Serve the query API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock_embeddings: cli.mock_embeddings,
        model: cli.model,
        documents: cli.documents,
    });
    container.seed().await?;

    match cli.command {
        Commands::Search { query, num, format } => {
            let result = container.answer_use_case().execute(&query, num).await?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&result)?),
                _ => print_response(&result),
            }
        }

        Commands::Interactive => run_interactive(container).await?,

        Commands::Serve { host, port } => {
            run_server(ServerConfig { host, port }, container).await?;
        }
    }

    Ok(())
}

fn print_response(result: &QueryResponse) {
    println!("Response: {}", result.response());
    println!("Results:");
    for (i, item) in result.results().iter().enumerate() {
        println!("  {}", item.display_line(i + 1));
    }
}

async fn run_interactive(container: Container) -> Result<()> {
    let use_case = container.answer_use_case();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!();
    println!("======== Interactive Search ========");
    println!("Type a query to search or \"q\" to quit");

    loop {
        print!("\nEnter a search query: (type \"q\" to quit) ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if query.eq_ignore_ascii_case("q") {
            println!("Exiting application...");
            break;
        }

        match use_case.execute(query, DEFAULT_TOP_K).await {
            Ok(result) => print_response(&result),
            Err(e) => eprintln!("Error during search: {e}"),
        }
    }

    Ok(())
}
