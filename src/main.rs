#[tokio::main]
async fn main() -> anyhow::Result<()> {
    visit_novelty::telemetry::init();
    let cfg = visit_novelty::Config::load()?;

    let (app, port) = visit_novelty::build_app(cfg);

    use tracing::info;
    let addr = std::net::SocketAddr::from(([0,0,0,0], port));
    info!(%addr, "server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
