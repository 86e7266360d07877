use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = banklink::args::parse();
    banklink::cli::main(args).await
}
