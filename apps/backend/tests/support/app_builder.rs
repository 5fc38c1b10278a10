use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use tankard_backend::middleware::request_trace::RequestTrace;
use tankard_backend::middleware::structured_logger::StructuredLogger;
use tankard_backend::middleware::trace_span::TraceSpan;
use tankard_backend::routes;
use tankard_backend::state::app_state::AppState;

/// Build a test service with the production routes and the same tracing
/// middleware stack as `main.rs` (CORS aside).
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await
}
