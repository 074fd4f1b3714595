#[tokio::main]
async fn main() {
    if let Err(e) = travelcore::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
