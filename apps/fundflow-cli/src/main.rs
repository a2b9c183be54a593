use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::ProtocolConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "fundflow")]
#[command(about = "Fundflow CLI - crowdfunding campaigns with escrow, proof and donor voting")]
#[command(version)]
struct Cli {
    /// Protocol configuration file (YAML); built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RPC endpoint, overriding the configuration file
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum VoteChoice {
    /// The creator is using funds properly
    Approve,
    /// The proof does not hold up
    Reject,
}

#[derive(Subcommand)]
enum Commands {
    /// List every campaign with its current lifecycle state
    List,

    /// Show one campaign in detail
    Show {
        /// Campaign address
        campaign: String,

        /// Keypair used to evaluate creator/donor permissions
        #[arg(short, long)]
        keypair: Option<PathBuf>,
    },

    /// Create a new campaign
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Listing category (tech, art, gaming, fashion, education, ...)
        #[arg(long, default_value = "all")]
        category: String,

        /// URL of an already-uploaded campaign image
        #[arg(long, default_value = "")]
        image_url: String,

        /// Funding goal in SOL
        #[arg(long)]
        goal: f64,

        /// Funding period length in days
        #[arg(long)]
        duration_days: u64,

        /// Creator keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        /// Simulate only, do not send
        #[arg(long)]
        dry_run: bool,
    },

    /// Donate to a campaign
    Donate {
        /// Campaign address
        campaign: String,

        /// Donation amount in SOL
        amount: f64,

        /// Donor keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Submit proof of progress (campaign creator only)
    SubmitProof {
        /// Campaign address
        campaign: String,

        /// URL of the published proof
        proof_url: String,

        /// Creator keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Vote on a campaign's proof with one of your donation receipts
    Vote {
        /// Campaign address
        campaign: String,

        /// Whether to approve or reject the proof
        choice: VoteChoice,

        /// Donor keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Withdraw escrowed funds (campaign creator only)
    Withdraw {
        /// Campaign address
        campaign: String,

        /// Creator keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Claim refunds for every donation you made to a failed campaign
    Refund {
        /// Campaign address
        campaign: String,

        /// Donor keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Show campaigns awaiting your proof vote
    Notifications {
        /// Donor keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        /// Keep polling instead of scanning once
        #[arg(long)]
        watch: bool,

        /// Poll interval in seconds
        #[arg(long, default_value = "30")]
        interval_secs: u64,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = ProtocolConfig::load(cli.config.as_deref())?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }

    match cli.command {
        Commands::List => commands::list::execute(&config),
        Commands::Show { campaign, keypair } => commands::show::execute(&config, campaign, keypair),
        Commands::Create {
            title,
            description,
            category,
            image_url,
            goal,
            duration_days,
            keypair,
            dry_run,
        } => commands::create::execute(
            &config,
            title,
            description,
            category,
            image_url,
            goal,
            duration_days,
            keypair,
            dry_run,
        ),
        Commands::Donate {
            campaign,
            amount,
            keypair,
            dry_run,
        } => commands::donate::execute(&config, campaign, amount, keypair, dry_run),
        Commands::SubmitProof {
            campaign,
            proof_url,
            keypair,
            dry_run,
        } => commands::submit_proof::execute(&config, campaign, proof_url, keypair, dry_run),
        Commands::Vote {
            campaign,
            choice,
            keypair,
            dry_run,
        } => commands::vote::execute(
            &config,
            campaign,
            matches!(choice, VoteChoice::Approve),
            keypair,
            dry_run,
        ),
        Commands::Withdraw {
            campaign,
            keypair,
            dry_run,
        } => commands::withdraw::execute(&config, campaign, keypair, dry_run),
        Commands::Refund {
            campaign,
            keypair,
            dry_run,
        } => commands::refund::execute(&config, campaign, keypair, dry_run),
        Commands::Notifications {
            keypair,
            watch,
            interval_secs,
        } => commands::notifications::execute(&config, keypair, watch, interval_secs),
    }
}
