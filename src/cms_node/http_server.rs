use super::config::CmsConfig;
use super::routes::{configure_admin, configure_public, system_routes};
use crate::constants::MAX_JSON_BODY_SIZE;
use crate::db_operations::DbOperations;
use crate::error::{CmsError, CmsResult};
use crate::services::CmsServices;
use crate::webhook::{WebhookDispatcher, WebhookNotifier};
use crate::{log_http_error, log_http_info, log_http_warn};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, ErrorHandlerResponse, ErrorHandlers, Logger};
use actix_web::{error, web, App, HttpRequest, HttpServer as ActixHttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Shared application state for the HTTP server.
pub struct AppState {
    pub services: CmsServices,
    /// Expose server error details in error envelopes
    pub development: bool,
    pub started_at: Instant,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(services: CmsServices, config: &CmsConfig) -> Self {
        Self {
            services,
            development: config.environment.is_development(),
            started_at: Instant::now(),
            upload_dir: config.upload_dir.clone(),
        }
    }
}

/// Rebuild every error response as the standard envelope, now that the
/// request path is known.
fn attach_error_path<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let rebuilt = res.response().error().map(|err| {
        let request = res.request();
        let development = request
            .app_data::<web::Data<AppState>>()
            .map_or(false, |state| state.development);
        let path = request.path();

        match err.as_error::<CmsError>() {
            Some(cms_error) => cms_error.to_response(path, development),
            None => {
                let status = res.status();
                CmsError::App {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string(),
                }
                .to_response(path, development)
            }
        }
    });

    match rebuilt {
        Some(mut response) => {
            // Headers set by inner middleware (no-store on /api) survive the rebuild
            for (name, value) in res.headers() {
                if *name != header::CONTENT_TYPE
                    && *name != header::CONTENT_LENGTH
                    && !response.headers().contains_key(name)
                {
                    response.headers_mut().append(name.clone(), value.clone());
                }
            }
            if response.status().is_server_error() {
                log_http_error!("{} {} failed", res.request().method(), res.request().path());
            }
            let (request, _) = res.into_parts();
            Ok(ErrorHandlerResponse::Response(
                ServiceResponse::new(request, response).map_into_right_body(),
            ))
        }
        None => Ok(ErrorHandlerResponse::Response(res.map_into_left_body())),
    }
}

fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_http_warn!("JSON payload error for {} {}: {}", req.method(), req.path(), err);
    CmsError::Validation(format!("Invalid JSON payload: {}", err)).into()
}

fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_http_warn!("Query string error for {}: {}", req.path(), err);
    CmsError::Validation(format!("Invalid query string: {}", err)).into()
}

fn path_error_handler(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    log_http_warn!("Path error for {}: {}", req.path(), err);
    CmsError::Validation(format!("Invalid path parameter: {}", err)).into()
}

fn no_store_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, private",
        ))
        .add((header::PRAGMA, "no-cache"))
        .add((header::EXPIRES, "0"))
}

/// Build the application: API scopes, uploads, error envelope and CORS.
///
/// Used by the server and, in-process, by tests.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let upload_dir = state.upload_dir.clone();
    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(MAX_JSON_BODY_SIZE)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(ErrorHandlers::new().default_handler(attach_error_path))
        .wrap(cors)
        .wrap(Logger::default())
        .route("/", web::get().to(system_routes::service_root))
        .service(
            web::scope("/api")
                .wrap(no_store_headers())
                .service(web::scope("/admin").configure(configure_admin))
                .configure(configure_public),
        )
        .service(
            web::scope("/uploads")
                .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, "public, max-age=3600")))
                .route("", web::get().to(system_routes::uploads_index))
                .service(Files::new("/", upload_dir)),
        )
        .default_service(web::to(system_routes::not_found))
}

/// HTTP server for the CMS.
///
/// Owns the store and the webhook dispatcher task. When the server stops,
/// the dispatcher drains its queue and the store is flushed.
pub struct CmsHttpServer {
    config: CmsConfig,
    state: web::Data<AppState>,
    db_ops: Arc<DbOperations>,
    dispatcher: JoinHandle<()>,
}

impl CmsHttpServer {
    /// Open the store and start the webhook dispatcher.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: CmsConfig) -> CmsResult<Self> {
        let db = sled::open(&config.storage_path)?;
        let db_ops = Arc::new(DbOperations::new(db)?);

        let store = crate::assets::UploadStore::new(config.upload_dir.clone());
        store.ensure_dir()?;

        let dispatcher = WebhookDispatcher::new(&config.webhook)?;
        let (notifier, dispatcher) = WebhookNotifier::spawn(dispatcher);

        let services = CmsServices::new(Arc::clone(&db_ops), Arc::new(notifier), &config);
        let state = web::Data::new(AppState::new(services, &config));

        Ok(Self {
            config,
            state,
            db_ops,
            dispatcher,
        })
    }

    /// Serve until the process receives SIGINT or SIGTERM.
    pub async fn run(self) -> CmsResult<()> {
        let Self {
            config,
            state,
            db_ops,
            dispatcher,
        } = self;

        log_http_info!(
            "HTTP server running on {} ({:?})",
            config.bind_address,
            config.environment
        );

        let app_state = state.clone();
        let server = ActixHttpServer::new(move || create_app(app_state.clone()))
            .bind(&config.bind_address)
            .map_err(|e| CmsError::Config(format!("Failed to bind HTTP server: {}", e)))?
            .run();

        let served = server
            .await
            .map_err(|e| CmsError::Config(format!("HTTP server error: {}", e)));

        log_http_info!("HTTP server stopped; draining webhook queue");
        drop(state);
        let grace = Duration::from_secs(config.webhook.timeout_seconds + 1);
        match tokio::time::timeout(grace, dispatcher).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log_http_error!("Webhook dispatcher task failed: {}", e),
            Err(_) => log_http_warn!("Webhook queue not drained within {:?}", grace),
        }

        db_ops.flush()?;
        served
    }
}
