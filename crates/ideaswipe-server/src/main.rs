#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ideaswipe_server::start_server().await
}
