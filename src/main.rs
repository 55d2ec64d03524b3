use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = xcms_bridge::cli::Cli::parse();
    if let Err(e) = xcms_bridge::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
