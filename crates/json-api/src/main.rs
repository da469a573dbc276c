//! Countdown JSON API Server

use std::process::ExitCode;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use countdown_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

mod auth;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod timers;

/// Storefront app proxy paths; Shopify may forward with or without the prefix.
const PROXY_PATHS: [&str; 3] = [
    "api/proxy/timer",
    "apps/countdown/api/proxy/timer",
    "countdown/api/proxy/timer",
];

fn router(app: AppContext) -> Router {
    let mut router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler));

    for path in PROXY_PATHS {
        router = router.push(Router::with_path(path).get(timers::proxy::handler));
    }

    router.push(
        Router::with_path("api/timers")
            .hoop(auth::middleware::handler)
            .get(timers::index::handler)
            .post(timers::create::handler)
            .push(
                Router::with_path("{timer}")
                    .get(timers::get::handler)
                    .put(timers::update::handler),
            ),
    )
}

fn service(router: Router) -> Service {
    Service::new(router).catcher(errors::catcher())
}

/// Countdown JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging failed to initialise, must use eprintln"
            )]
            {
                eprintln!("Observability error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    info!(log_format = ?observability.log_format(), "observability initialised");

    let app = match AppContext::from_database_url(&config.database.database_url).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = router(app);

    let doc = OpenApi::new("Countdown API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(service(router)).await;

    ExitCode::SUCCESS
}
