use std::env;
use uniformgen::server::{AppState, NonceStore};
use uniformgen::{Config, GeneratorClient, MediaLibrary};

const NONCE_TTL_SECS: i64 = 15 * 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    uniformgen::logger::init_with_config(
        uniformgen::logger::LoggerConfig::development()
            .with_level(uniformgen::logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking required environment variables...");
    let required_vars = ["GEMINI_API_KEY", "ADMIN_TOKEN"];

    let mut missing_vars = Vec::new();
    for var in &required_vars {
        match env::var(var) {
            Ok(_) => continue,
            Err(_) => missing_vars.push(*var),
        }
    }

    if missing_vars.is_empty() {
        log::info!("✅ All required variables are configured");
    } else {
        for var in &missing_vars {
            log::error!("❌ Missing required variable: {}", var);
        }
        return Err("Missing required environment variables".into());
    }

    let config = Config::from_env();
    let port = config.port.unwrap_or(8080);

    uniformgen::logger::log_startup_info("uniformgen", env!("CARGO_PKG_VERSION"), port);
    uniformgen::logger::log_config_info(&config);

    let generator = match GeneratorClient::new(&config) {
        Ok(client) => {
            log::info!("✅ Generator client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize generator client: {}", e);
            return Err(e.into());
        }
    };

    let media = MediaLibrary::new(&config.media.clone().unwrap_or_default());

    let admin_token = config.secret_key.clone().ok_or("ADMIN_TOKEN is not set")?;

    let state = AppState {
        generator,
        media,
        nonces: NonceStore::new(NONCE_TTL_SECS),
        admin_token,
    };

    log::info!("🌐 Listening on http://127.0.0.1:{}", port);
    uniformgen::server::run(state, port).await?;

    Ok(())
}
