use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use bookstore::store::Book;

#[derive(Parser)]
#[command(name = "bookstore-cli")]
#[command(about = "Command-line client for the bookstore service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a new book
    Create {
        id: String,
        #[arg(short, long)]
        name: String,
        /// May be repeated
        #[arg(short, long)]
        author: Vec<String>,
        #[arg(short, long, default_value = "")]
        press: String,
    },
    /// Replace an existing book
    Update {
        id: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        author: Vec<String>,
        #[arg(short, long, default_value = "")]
        press: String,
    },
    /// Show one book
    Get { id: String },
    /// List all books
    List,
    /// Remove a book
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Create { id, name, author, press } => {
            let book = Book { id, name, authors: author, press };
            client
                .post(format!("{}/book", base))
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&book)?)
                .send()
                .await?
        }
        Commands::Update { id, name, author, press } => {
            let book = Book { id: id.clone(), name, authors: author, press };
            client
                .post(format!("{}/book/{}", base, id))
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&book)?)
                .send()
                .await?
        }
        Commands::Get { id } => client.get(format!("{}/book/{}", base, id)).send().await?,
        Commands::List => client.get(format!("{}/book", base)).send().await?,
        Commands::Delete { id } => client.delete(format!("{}/book/{}", base, id)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: bookstore returned status {}", status);
        eprintln!("Response: {}", text.trim_end());
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
