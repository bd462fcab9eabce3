use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "launchbox",
    version,
    about = "Turns a one-sentence startup idea into a spec, landing page, pitch deck, and marketing assets"
)]
pub struct Args {
    /// The startup idea. Stored in the session; later runs may omit it.
    #[arg(long)]
    pub idea: Option<String>,

    /// Model identifier for the completion endpoint.
    #[arg(long)]
    pub model: Option<String>,

    /// State directory for session and run artifacts.
    #[arg(long)]
    pub out_dir: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pause between printed conversation messages, in milliseconds.
    #[arg(long)]
    pub message_delay_ms: Option<u64>,

    /// Save generated artifacts to the run directory.
    #[arg(long, default_value_t = true)]
    pub save_artifacts: bool,

    /// Save the per-stage prompt sent to the completion endpoint.
    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    /// Save the per-stage raw completion text.
    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    /// Drop the stored session idea after the run.
    #[arg(long, default_value_t = false)]
    pub clear_session: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Optional TOML config file.
    #[arg(long)]
    pub config: Option<String>,
}
