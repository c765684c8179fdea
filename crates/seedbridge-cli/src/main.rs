//! Thin entrypoint for the `seedbridge` binary.

#[tokio::main]
async fn main() {
    let exit_code = seedbridge_cli::run().await;
    std::process::exit(exit_code);
}
