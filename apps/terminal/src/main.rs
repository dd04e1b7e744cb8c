#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_quest::run().await
}
