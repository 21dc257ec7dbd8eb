use anyhow::Context as _;
use apple_music_api::{Body, Client, ResponseType};
use clap::Parser;

mod config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Service path appended to the API base URL, e.g. "catalog/us/songs/203709340"
    service: String,

    /// HTTP method to use
    #[arg(long, default_value = "GET")]
    method: String,

    /// Decode the response as a top-level mapping instead of a value tree
    #[arg(long)]
    assoc: bool,

    /// Request body to send
    #[arg(long)]
    body: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Load and save config at startup
    let config = config::Config::load();
    config.save();

    let mut client = Client::new();
    client.set_developer_token(config.developer_token);
    client.set_music_user_token(config.music_user_token);
    if args.assoc {
        client.set_response_type(ResponseType::Assoc);
    }

    let body = args.body.map(Body::from);
    let response = client
        .api_request(&args.method, &args.service, &[], body)
        .await
        .context("API request failed")?;

    tracing::info!("request completed with status {}", client.last_http_status_code());
    println!("{}", serde_json::to_string_pretty(&response.into_value())?);

    Ok(())
}
