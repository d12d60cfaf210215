use clap::Parser;
use tb_laundry_lib::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = tb_laundry_lib::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
