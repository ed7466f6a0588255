use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(about = "Command-line client for the Trip Planner API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "PLANNER_URL", default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stored spa selections
    Spa,
    /// Show the schedule override
    Schedule,
    /// Show the schedule changelog
    Changelog,
    /// Manage proposals
    Proposals {
        #[command(subcommand)]
        action: Option<ListAction>,
    },
    /// Manage notes
    Notes {
        #[command(subcommand)]
        action: Option<ListAction>,
    },
    /// Ask the AI editor to change the current schedule
    Edit {
        /// What to change, in plain words
        instruction: String,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List entries (default)
    List,
    /// Add an entry
    Add { text: String },
    /// Delete an entry by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Spa => {
            let res = client.get(format!("{base}/api/spa")).send().await?;
            print_response(res).await?;
        }
        Commands::Schedule => {
            let res = client.get(format!("{base}/api/schedule")).send().await?;
            print_response(res).await?;
        }
        Commands::Changelog => {
            let res = client.get(format!("{base}/api/changelog")).send().await?;
            print_response(res).await?;
        }
        Commands::Proposals { action } => {
            run_list_action(&client, &format!("{base}/api/proposals"), action).await?;
        }
        Commands::Notes { action } => {
            run_list_action(&client, &format!("{base}/api/notes"), action).await?;
        }
        Commands::Edit { instruction } => {
            let schedule: Value = client
                .get(format!("{base}/api/schedule"))
                .send()
                .await?
                .json()
                .await?;
            let current_html = schedule["html"].as_str().unwrap_or_default();
            if current_html.is_empty() {
                eprintln!("Error: no stored schedule to edit");
                return Ok(());
            }

            let res = client
                .post(format!("{base}/api/ai-edit"))
                .json(&json!({ "instruction": instruction, "currentHtml": current_html }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn run_list_action(
    client: &reqwest::Client,
    url: &str,
    action: Option<ListAction>,
) -> Result<(), Box<dyn std::error::Error>> {
    let res = match action.unwrap_or(ListAction::List) {
        ListAction::List => client.get(url).send().await?,
        ListAction::Add { text } => client.post(url).json(&json!({ "text": text })).send().await?,
        ListAction::Delete { id } => client.delete(format!("{url}/{id}")).send().await?,
    };
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
