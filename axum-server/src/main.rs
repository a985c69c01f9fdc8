use axum::{extract::Query, http::StatusCode, response::{IntoResponse, Response}, routing::get, Extension, Json, Router};
use rates_core::{http_client, usd_rates, BanxicoClient, Config, RateError};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = app(http_client()?);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(client: reqwest::Client) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/rates", get(get_rates_handler))
        .layer(cors)
        .layer(Extension(client))
}

#[derive(Deserialize, Debug)]
struct RatesParams {
    #[serde(rename = "inputDate")]
    input_date: Option<String>,
}

pub struct ApiError(pub RateError);

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        ApiError(err)
    }
}


impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "rates request failed");

        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.0.to_string())).into_response()
    }
}

async fn get_rates_handler(
    Extension(client): Extension<reqwest::Client>,
    Query(params): Query<RatesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = usd_rates(params.input_date.as_deref(), || {
        Config::from_env().map(|config| BanxicoClient::new_w_client(client, config))
    })
    .await?;

    Ok(Json(rates))
}
