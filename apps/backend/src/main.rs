use actix_web::{web, App, HttpServer};
use tankard_backend::config::db::redact_url;
use tankard_backend::config::ServerConfig;
use tankard_backend::infra::state::build_state;
use tankard_backend::middleware::cors::cors_middleware;
use tankard_backend::middleware::request_trace::RequestTrace;
use tankard_backend::middleware::structured_logger::StructuredLogger;
use tankard_backend::middleware::trace_span::TraceSpan;
use tankard_backend::routes;
use tankard_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment is provided by the runtime (docker env_file, shell export, ...).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        db = %redact_url(&config.database_url),
        "starting Tankard backend"
    );

    let app_state = match build_state()
        .with_db_url(config.database_url.clone())
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
