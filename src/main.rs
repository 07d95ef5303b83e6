use std::fs::OpenOptions;
use std::path::PathBuf;

use clap::Parser;
use env_logger::{Env, Target};

use microcred::{AppError, Config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Root URL of the platform's backend
    #[arg(long, env = "MICROCRED_SERVER_URL")]
    server_url: Option<String>,

    /// Fallback for --server-url
    #[arg(long, env = "SERVER_URL_ROOT", hide = true)]
    server_url_root: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// File receiving the log output
    #[arg(long, default_value = "microcred.log")]
    log_file: PathBuf,

    /// Request timeout in seconds; unset leaves it to the network stack
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Args {
    fn server_url(&self) -> Option<&str> {
        self.server_url
            .as_deref()
            .or(self.server_url_root.as_deref())
    }
}

fn init_logging(args: &Args) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)?;

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(&args)?;

    let config = Config::new(args.server_url(), args.timeout_secs)?;
    microcred::client::run(config).await
}
