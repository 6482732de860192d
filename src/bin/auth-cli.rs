use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "auth-cli")]
#[command(about = "Management CLI for the auth API server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8090")]
    url: String,

    /// Access token sent in the X-Auth-Token header.
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether authentication is enforced
    Status,
    /// List users
    Users {
        /// Filter by user name
        #[arg(long)]
        name: Option<String>,
    },
    /// List user groups
    Groups {
        /// Filter by group name
        #[arg(long)]
        name: Option<String>,
    },
    /// List authorization strategies
    Strategies {
        /// Filter by strategy name
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert("X-Auth-Token", HeaderValue::from_str(token)?);
    }

    let (path, name) = match &cli.command {
        Commands::Status => ("/auth/status", None),
        Commands::Users { name } => ("/users", name.as_ref()),
        Commands::Groups { name } => ("/usergroups", name.as_ref()),
        Commands::Strategies { name } => ("/auth/strategies", name.as_ref()),
    };

    let mut request = client.get(format!("{}{}", cli.url, path)).headers(headers);
    if let Some(name) = name {
        request = request.query(&[("name", name)]);
    }

    let res = request.send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
