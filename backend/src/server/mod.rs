//! HTTP server assembly: sessions, tracing, routes and the docs UI.

mod config;
mod session;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{ServerSettings, load_session_key};

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bitslow::Trace;
use bitslow::inbound::http::health::HealthState;
use bitslow::inbound::http::router;
use bitslow::inbound::http::state::HttpState;

use session::session_middleware;
use state_builders::build_http_state;

/// Everything a worker needs to build its own `App`.
#[derive(Clone)]
struct Workers {
    health: web::Data<HealthState>,
    http: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

impl Workers {
    fn app(self) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let app = App::new()
            .app_data(self.health)
            .app_data(self.http)
            .wrap(session_middleware(self.key, self.cookie_secure, self.same_site))
            .wrap(Trace)
            .configure(router::configure);
        with_docs(app)
    }
}

#[cfg(debug_assertions)]
fn with_docs<T>(app: App<T>) -> App<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
{
    use bitslow::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(not(debug_assertions))]
fn with_docs<T>(app: App<T>) -> App<T> {
    app
}

/// Bind the marketplace API and return the running server.
///
/// `health` flips to ready as soon as the listener is bound.
///
/// # Errors
/// Returns the [`std::io::Error`] raised while binding the socket.
pub fn create_server(
    health: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http = build_http_state(&config);
    let bind_addr = config.bind_addr();
    let workers = Workers {
        health: health.clone(),
        http,
        key: config.key,
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    };

    let server = HttpServer::new(move || workers.clone().app())
        .bind(bind_addr)?
        .run();
    health.mark_ready();
    Ok(server)
}
