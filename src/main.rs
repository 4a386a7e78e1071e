use std::sync::Arc;

use news_veracity::classifier::ScriptClassifier;
use news_veracity::crawlers::naver::NaverNewsCrawler;
use news_veracity::db::establish_connection_pool;
use news_veracity::models::config::ServerConfig;
use news_veracity::processing::{NewsMessage, NewsPipeline};
use news_veracity::repository::DieselRepository;
use news_veracity::scheduler::spawn_periodic;
use news_veracity::server::create_router;

/// Receives JSON [`NewsMessage`]s on a ZMQ PULL socket and hands them to the
/// async runtime. Runs on a blocking thread because `zmq` sockets block.
fn listen_for_messages(
    zmq_address: String,
    pipeline: NewsPipeline<DieselRepository>,
    runtime: tokio::runtime::Handle,
) -> Result<(), zmq::Error> {
    let context = zmq::Context::new();
    let responder = context.socket(zmq::PULL)?;
    responder.bind(&zmq_address)?;
    log::info!("Listening for jobs on {zmq_address}");

    loop {
        let msg = responder.recv_bytes(0)?;
        match serde_json::from_slice::<NewsMessage>(&msg) {
            Ok(parsed) => {
                let pipeline = pipeline.clone();
                runtime.spawn(async move { pipeline.process_message(parsed).await });
            }
            Err(e) => log::error!("Failed to parse JSON: {e}"),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let window = match config.similar.window() {
        Ok(window) => window,
        Err(e) => {
            log::error!("Invalid similar-article window: {e}");
            std::process::exit(1);
        }
    };

    let (refresh_interval, recent_window_minutes) = match config
        .headlines
        .interval()
        .and_then(|interval| Ok((interval, config.headlines.recent_window()?)))
    {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid headline settings: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let crawler = match NaverNewsCrawler::new(&config.scraper, &config.headlines) {
        Ok(crawler) => Arc::new(crawler),
        Err(e) => {
            log::error!("Failed to build crawler: {e}");
            std::process::exit(1);
        }
    };

    let pipeline = NewsPipeline::new(
        DieselRepository::new(pool),
        crawler.clone(),
        crawler,
        Arc::new(ScriptClassifier::new(&config.classifier)),
    )
    .with_window(window)
    .with_recent_window_minutes(recent_window_minutes);

    let scheduled = pipeline.clone();
    spawn_periodic(
        "headline refresh",
        refresh_interval,
        move || {
            let pipeline = scheduled.clone();
            async move {
                pipeline.refresh_headlines().await;
            }
        },
    );

    let zmq_pipeline = pipeline.clone();
    let zmq_address = config.zmq_address.clone();
    let runtime = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || {
        if let Err(e) = listen_for_messages(zmq_address, zmq_pipeline, runtime) {
            log::error!("ZMQ listener stopped: {e}");
        }
    });

    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {e}", config.bind_address);
            std::process::exit(1);
        }
    };
    log::info!("Serving HTTP on {}", config.bind_address);

    if let Err(e) = axum::serve(listener, create_router(pipeline)).await {
        log::error!("HTTP server error: {e}");
        std::process::exit(1);
    }
}
