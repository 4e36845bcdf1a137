//! MyCircle - A terminal client for the MyCircle social feed
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mycircle::auth::LoginOutcome;
use mycircle::{CircleClient, Config};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments. The TUI owns its own runtime; headless
    // commands get one here.
    match parse_args()? {
        Command::Run => run_tui(),
        Command::Demo => run_demo(),
        Command::Login { email, password } => {
            Runtime::new()?.block_on(login_cli(&email, &password))
        }
        Command::Posts => Runtime::new()?.block_on(posts_cli()),
        Command::Post { image, caption } => Runtime::new()?.block_on(post_cli(&image, &caption)),
        Command::Comments { post_id } => Runtime::new()?.block_on(comments_cli(post_id)),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Demo,
    Login { email: String, password: String },
    Posts,
    Post { image: String, caption: String },
    Comments { post_id: u64 },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "--demo" | "demo" => Ok(Command::Demo),

        "login" => {
            let email = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing email"))?
                .clone();
            let password = args
                .get(3)
                .ok_or_else(|| anyhow::anyhow!("Missing password"))?
                .clone();
            Ok(Command::Login { email, password })
        }

        "posts" => Ok(Command::Posts),

        "post" => {
            let image = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing image file path"))?
                .clone();
            let caption = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
            Ok(Command::Post { image, caption })
        }

        "comments" => {
            let post_id = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing post id"))?
                .parse()
                .map_err(|_| anyhow::anyhow!("Post id must be a number"))?;
            Ok(Command::Comments { post_id })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'mycircle --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = mycircle::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r"{}
📷 MyCircle - A terminal client for the MyCircle social feed

USAGE:
    mycircle                           Launch TUI
    mycircle [COMMAND]

COMMANDS:
    login <email> <password>           Check credentials against the service
      Example:
        mycircle login you@example.com hunter2

    posts                              List the feed's posts

    post <image> [caption]             Upload an image post
      Example:
        mycircle post ./sunset.jpg Golden hour at the pier

    comments <post-id>                 List a post's comments

    demo                               Launch TUI with canned demo data

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Navigation
      j/↓           Move down
      k/↑           Move up
      g/G           Jump to top/bottom

    Actions
      n             New post (compose)
      c             Comment on post
      l             Like post
      s             Share post
      d             Delete post
      r             Refresh feed

    View
      t             Change theme
      ?             Help

CONFIG:
    {}
",
        mycircle::LOGO,
        config_path
    );
}

fn print_version() {
    println!("mycircle {}", mycircle::VERSION);
}

fn run_tui() -> Result<()> {
    mycircle::app::run()
}

fn run_demo() -> Result<()> {
    mycircle::app::run_demo()
}

async fn login_cli(email: &str, password: &str) -> Result<()> {
    let config = Config::load()?;
    let api = CircleClient::new(&config.base_url, config.user_id);

    println!("📷 Signing in to {}...", config.base_url);

    match mycircle::auth::attempt_login(&api, email, password).await {
        LoginOutcome::Success => {
            println!("✓ Signed in as {}", email);
        }
        outcome => {
            println!("✗ {}", outcome.message().unwrap_or("Login failed"));
        }
    }

    Ok(())
}

async fn posts_cli() -> Result<()> {
    let config = Config::load()?;
    let api = CircleClient::new(&config.base_url, config.user_id);

    let posts = api.list_posts().await?;

    if posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    println!("Feed ({} posts)", posts.len());
    println!("{}", "─".repeat(60));

    for post in posts {
        let image_marker = if post.has_image() { " 🖼" } else { "" };
        println!("\n#{} @{}{}", post.id, post.author(), image_marker);
        if !post.title.is_empty() {
            println!("{}", post.title);
        }
    }

    Ok(())
}

async fn post_cli(image: &str, caption: &str) -> Result<()> {
    let config = Config::load()?;
    let api = CircleClient::new(&config.base_url, config.user_id);

    let payload = mycircle::media::encode_image_file(std::path::Path::new(image))?;

    println!("📷 Uploading {}...", image);
    let post = api.create_post(caption, &payload).await?;

    println!("✓ Posted #{}", post.id);

    Ok(())
}

async fn comments_cli(post_id: u64) -> Result<()> {
    let config = Config::load()?;
    let api = CircleClient::new(&config.base_url, config.user_id);

    let comments = api.list_comments(post_id).await?;

    if comments.is_empty() {
        println!("No comments on post #{}.", post_id);
        return Ok(());
    }

    println!("Comments on post #{}", post_id);
    println!("{}", "─".repeat(60));

    for comment in comments {
        println!("· {}", comment.text);
    }

    Ok(())
}
