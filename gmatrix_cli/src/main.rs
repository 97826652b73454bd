use clap::{Parser, Subcommand};

use crate::get_matrix::GetMatrixArgs;

mod get_matrix;
mod output;
mod parsers;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a distance matrix, splitting oversized requests
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: GetMatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Matrix { args } => get_matrix::run(args).await?,
    }

    Ok(())
}
