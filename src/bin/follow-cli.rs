use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "follow-cli")]
#[command(about = "Command-line client for the follow-graph service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// API token returned by `register`.
    #[arg(short, long, env = "FOLLOW_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user and print its token
    Register {
        username: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Follow or unfollow a user
    Follow { username: String },
    /// Show your own profile
    Profile,
    /// Show a user's public profile
    User { username: String },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Token {}", token))?);
    }

    let res = match cli.command {
        Commands::Register { username, bio } => {
            client
                .post(format!("{}/register", cli.url))
                .json(&json!({ "username": username, "bio": bio }))
                .send()
                .await?
        }
        Commands::Follow { username } => {
            client
                .post(format!("{}/follow/{}", cli.url, username))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Profile => {
            client
                .get(format!("{}/profile", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::User { username } => {
            client
                .get(format!("{}/users/{}", cli.url, username))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
