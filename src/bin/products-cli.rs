use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "products-cli")]
#[command(about = "Command-line client for the products service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,
    /// Show one product
    Get { id: i64 },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: i64,
    },
    /// Replace a product's fields
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: i64,
    },
    /// Delete a product
    Delete { id: i64 },
    /// Check service readiness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let products = format!("{}/products", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::List => client.get(&products).send().await?,
        Commands::Get { id } => client.get(format!("{products}/{id}")).send().await?,
        Commands::Create { name, price, stock } => {
            client
                .post(&products)
                .json(&payload(name, price, stock))
                .send()
                .await?
        }
        Commands::Update {
            id,
            name,
            price,
            stock,
        } => {
            client
                .put(format!("{products}/{id}"))
                .json(&payload(name, price, stock))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{products}/{id}")).send().await?,
        Commands::Health => {
            client
                .get(format!("{}/health", cli.url.trim_end_matches('/')))
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn payload(name: String, price: f64, stock: i64) -> Value {
    json!({
        "productname": name,
        "price": price,
        "stock": stock,
    })
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
