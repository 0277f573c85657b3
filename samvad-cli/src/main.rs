use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use samvad_core::{
    CoreError, FlaggedPost, RegionalThreat, ResolutionAction, ResolvedItem, ReviewItem,
    ReviewItemId, Severity, Stats, TimeSeriesPoint, TriageRecord,
};

const DEFAULT_SERVER: &str = "http://localhost:5001";

/// SAMVAD: command-line client for the misinformation monitoring engine
#[derive(Parser, Debug)]
#[command(name = "samvad")]
#[command(about = "Query and moderate a running SAMVAD engine", long_about = None)]
struct Cli {
    /// Base URL of the SAMVAD server
    #[arg(long, global = true, env = "SAMVAD_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// Print raw JSON responses instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the aggregate counters
    Stats,
    /// List items awaiting review
    Queue,
    /// List resolved items, most recent first
    Resolved,
    /// Approve or reject a pending item
    Resolve(ResolveArgs),
    /// Return a resolved item to the queue
    Revert(RevertArgs),
    /// Fact-check a piece of text
    Verify(VerifyArgs),
    /// Show the threat time series
    Timeseries(TimeseriesArgs),
    /// Show threat counts by state
    Regional,
    /// Show flagged social media posts
    Feed(FeedArgs),
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Review item ID
    id: ReviewItemId,

    /// Decision to record
    #[arg(long, value_parser = parse_action)]
    action: ResolutionAction,

    /// Reviewer name (the server's admin actor is used if omitted)
    #[arg(long)]
    by: Option<String>,
}

#[derive(Parser, Debug)]
struct RevertArgs {
    /// Review item ID
    id: ReviewItemId,
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Text to check; multiple words are joined with spaces
    #[arg(num_args = 0..)]
    text: Vec<String>,
}

#[derive(Parser, Debug)]
struct TimeseriesArgs {
    /// Bucket size
    #[arg(long, default_value = "daily", value_parser = ["hourly", "daily", "monthly"])]
    scale: String,
}

#[derive(Parser, Debug)]
struct FeedArgs {
    /// Only show posts of this severity
    #[arg(long, value_parser = parse_severity)]
    severity: Option<Severity>,
}

fn parse_action(s: &str) -> Result<ResolutionAction, CoreError> {
    s.parse()
}

fn parse_severity(s: &str) -> Result<Severity, CoreError> {
    s.parse()
}

/// Thin wrapper over the server's JSON API
struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        Self::read_body(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            bail!("Server returned {}: {}", status, error_message(&text));
        }

        serde_json::from_str(&text).context("Server returned invalid JSON")
    }
}

/// Pull the message out of a `{"error": ...}` body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| anyhow!("Unexpected response shape: {}", e))
}

fn format_stats(stats: &Stats) -> String {
    format!(
        "Queries answered: {}\nThreats blocked:  {}\nPending review:   {}",
        stats.queries, stats.blocked, stats.pending
    )
}

fn format_review_item(item: &ReviewItem) -> String {
    format!(
        "#{} [{}] {}\n    {} | {} related narratives | {}",
        item.id, item.severity, item.text, item.narrative_type, item.narrative_count, item.time
    )
}

fn format_resolved_item(item: &ResolvedItem) -> String {
    format!(
        "#{} {} by {} at {}\n    {}",
        item.item.id,
        item.resolution.resolved_action,
        item.resolution.resolved_by,
        item.resolution.resolved_at.format("%Y-%m-%d %H:%M:%S UTC"),
        item.item.text
    )
}

fn format_verdict(record: &TriageRecord) -> String {
    let verdict = if record.is_misinfo {
        "MISINFORMATION"
    } else {
        "INFO"
    };
    format!(
        "{}: {}\n{}\nSource: {}",
        verdict, record.title, record.fact, record.source
    )
}

fn format_point(point: &TimeSeriesPoint) -> String {
    format!(
        "{:>10}  threats {:>4}  blocked {:>4}",
        point.label, point.threats, point.blocked
    )
}

fn format_region(region: &RegionalThreat) -> String {
    format!(
        "{:<16} {:>4} [{}]",
        region.state, region.threats, region.severity
    )
}

fn format_post(post: &FlaggedPost) -> String {
    let mut line = format!(
        "{} [{}] {} ({})\n    {}\n    Issue: {}",
        post.id, post.severity, post.author, post.timestamp, post.content, post.detected_issue
    );
    let response = &post.samvad_response;
    if response.replied {
        line.push_str(&format!(
            "\n    Replied by {} {}",
            response.official_account, response.replied_at
        ));
    }
    line
}

fn print_list<T, F>(value: Value, format: F) -> Result<()>
where
    T: DeserializeOwned,
    F: Fn(&T) -> String,
{
    let items: Vec<T> = decode(value)?;
    if items.is_empty() {
        println!("(none)");
    }
    for item in &items {
        println!("{}", format(item));
    }
    Ok(())
}

fn print_mutation(value: Value, what: &str) -> Result<()> {
    let stats: Stats = decode(value.get("stats").cloned().unwrap_or(Value::Null))?;
    println!("{}", what);
    println!("{}", format_stats(&stats));
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = Client::new(&cli.server);

    let response = match &cli.command {
        Commands::Stats => client.get("/api/stats").await?,
        Commands::Queue => client.get("/api/queue").await?,
        Commands::Resolved => client.get("/api/resolved").await?,
        Commands::Resolve(args) => {
            let mut body = json!({ "action": args.action });
            if let Some(by) = &args.by {
                body["resolvedBy"] = json!(by);
            }
            client
                .post(&format!("/api/queue/{}/resolve", args.id), &body)
                .await?
        }
        Commands::Revert(args) => {
            client
                .post(&format!("/api/resolved/{}/revert", args.id), &json!({}))
                .await?
        }
        Commands::Verify(args) => {
            client
                .post("/api/verify", &json!({ "query": args.text.join(" ") }))
                .await?
        }
        Commands::Timeseries(args) => {
            client
                .get(&format!("/api/stats/timeseries?scale={}", args.scale))
                .await?
        }
        Commands::Regional => client.get("/api/stats/regional").await?,
        Commands::Feed(args) => match args.severity {
            Some(severity) => client.get(&format!("/api/tweets?severity={}", severity)).await?,
            None => client.get("/api/tweets").await?,
        },
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match &cli.command {
        Commands::Stats => println!("{}", format_stats(&decode(response)?)),
        Commands::Queue => print_list(response, format_review_item)?,
        Commands::Resolved => print_list(response, format_resolved_item)?,
        Commands::Resolve(args) => {
            print_mutation(response, &format!("Item #{} marked {}", args.id, args.action))?
        }
        Commands::Revert(args) => {
            print_mutation(response, &format!("Item #{} returned to the queue", args.id))?
        }
        Commands::Verify(_) => println!("{}", format_verdict(&decode(response)?)),
        Commands::Timeseries(_) => print_list(response, format_point)?,
        Commands::Regional => print_list(response, format_region)?,
        Commands::Feed(_) => print_list(response, format_post)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
