mod api;
mod middleware;
mod span;

use std::{net::SocketAddr, str::FromStr};

use axum::{
    Router,
    extract::FromRef,
    middleware::from_fn,
    routing::get,
};
use data_access::DataAccess;
use error::{Context, InternalError};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

#[derive(Debug)]
pub struct ServerOpts {
    pub database_url: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    pub data_access: DataAccess,
}

pub fn server(data_access: DataAccess) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms))
        .layer(from_fn(middleware::mw_handle_leaked_5xx));

    Router::new()
        .route(api::username::list::PATH, get(api::username::list::handler))
        .route(
            api::username::check_availability::PATH,
            get(api::username::check_availability::handler)
                .post(api::username::check_availability::json_handler),
        )
        .route(api::health::PATH, get(api::health::handler))
        .with_state(AppState { data_access })
        .layer(middleware)
}

pub async fn serve(opts: ServerOpts) -> Result<(), InternalError> {
    tracing::info!("{:?}", opts);

    let connect_options = SqliteConnectOptions::from_str(&opts.database_url)
        .with_context(|| format!("parse database url :: {}", opts.database_url))?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(connect_options)
        .await
        .with_context(|| format!("connect database :: {}", opts.database_url))?;

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .context("run migrations")?;

    let app = server(DataAccess::new(pool)).into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([127, 0, 0, 1], opts.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("local_addr")?
    );

    axum::serve(listener, app).await.context("axum::serve")
}

impl FromRef<AppState> for DataAccess {
    fn from_ref(input: &AppState) -> Self {
        input.data_access.clone()
    }
}
