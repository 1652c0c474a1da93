use bpmn_rest::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let state = AppState::builder().config(config.clone()).build().await?;

    let result = ServiceBuilder::new()
        .with_config(config)
        .with_state(state)
        .build()
        .serve()
        .await;

    shutdown_tracing();
    result
}
