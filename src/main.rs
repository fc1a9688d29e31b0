use chrono::Local;
use clap::{Parser, Subcommand};
use fiew_bot::{config, daily, graph, logging, posts, render};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fiew-bot")]
#[command(about = "Posts queued markdown or daily messages to the Fiew page")]
#[command(long_about = "\
Posts queued markdown or daily messages to the Fiew page

Your filesystem is the queue. Each run consumes at most one markdown file
from the posts directory (first by name) and moves it aside; when the queue
is empty a daily message is generated from the calendar instead.

Content structure:

  posts/
  ├── 001-launch.md                # next up (first by name)
  ├── 002-roadmap.md
  └── archive/                     # consumed posts land here, timestamped
      └── 000-hello_20260801_090000.md

Credentials come from the environment (FB_PAGE_ID, FB_ACCESS_TOKEN), layered
over config/config.toml. Set TEST_MODE=true or pass --dry-run to rehearse a
run without touching the network or the queue.

Run 'fiew-bot gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "config/config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick content, format it, and publish it to the page
    Post(PostArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args, Clone)]
struct PostArgs {
    /// Log what would happen without calling the API or archiving
    #[arg(long)]
    dry_run: bool,

    /// Attach a link to the post
    #[arg(long)]
    link: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            ExitCode::SUCCESS
        }
        Command::Post(args) => match run_post(&cli.config, args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                // The subscriber may not be up yet (config errors), so the
                // failure also goes to stderr for the scheduler console.
                error!(error = %e, "posting failed");
                eprintln!("fiew-bot: error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// The full pipeline: config → logging → auth → content → render → publish.
async fn run_post(config_path: &Path, args: PostArgs) -> Result<(), Box<dyn std::error::Error>> {
    let env = |key: &str| std::env::var(key).ok();
    let config = config::load_config(config_path, &env)?;
    let dry_run = args.dry_run || config::test_mode(&env);

    let log_path = logging::init(Path::new(&config.paths.logs_dir))?;
    info!(log = %log_path.display(), dry_run, "fiew bot starting");

    let session = if dry_run {
        info!("dry run: skipping authentication");
        None
    } else {
        let (page_id, access_token) = config.require_credentials()?;
        let client = graph::PageClient::new(access_token, &config.facebook.api_version)?;
        let account = client.verify_token().await?;
        info!(
            id = %account.id,
            name = account.name.as_deref().unwrap_or("<unnamed>"),
            "authenticated"
        );
        Some((client, page_id.to_string()))
    };

    let posts_dir = Path::new(&config.paths.posts_dir);
    let (message, source) = match posts::next_post(posts_dir)? {
        Some(post) => {
            if dry_run {
                info!(file = %post.source.display(), "dry run: would archive post");
            } else {
                let archived = posts::archive_post(posts_dir, &post.source)?;
                info!(
                    from = %post.source.display(),
                    to = %archived.display(),
                    "archived post"
                );
            }
            let rendered = render::render_post(&post.content, &config.content.hashtags);
            (rendered, "markdown file")
        }
        None => {
            let generated = daily::daily_message(Local::now().date_naive(), &config.content);
            (generated, "generated message")
        }
    };

    info!(
        chars = message.chars().count(),
        source,
        preview = %preview(&message),
        "composed post"
    );

    match session {
        Some((client, page_id)) => {
            let post_id = client
                .publish(&page_id, &message, args.link.as_deref())
                .await?;
            info!(post_id = %post_id, page_id = %page_id, "posted to page");
        }
        None => info!("dry run: would post to page"),
    }

    Ok(())
}

/// First 500 characters of the message, for the run log.
fn preview(message: &str) -> String {
    const PREVIEW_CHARS: usize = 500;
    if message.chars().count() <= PREVIEW_CHARS {
        message.to_string()
    } else {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}
