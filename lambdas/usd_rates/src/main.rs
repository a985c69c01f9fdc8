use lambda_http::{run, service_fn, tracing};
use lambda_http::{Body, Error, Request, RequestExt, Response};
use rates_core::{http_client, usd_rates, BanxicoClient, Config, RatesResponse, INPUT_DATE_PARAM};

async fn function_handler(client: &reqwest::Client, event: Request) -> Result<Response<Body>, Error> {
    let input_date = event
        .query_string_parameters_ref()
        .and_then(|params| params.first(INPUT_DATE_PARAM));

    // config is read per invocation; a missing value is a 500, never a failed cold start
    let outcome = usd_rates(input_date, || {
        Config::from_env().map(|config| BanxicoClient::new_w_client(client.clone(), config))
    })
    .await;

    let response = RatesResponse::from(outcome);

    Ok(Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(response.body.into())?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let client = http_client()?;
    let client = &client;

    run(service_fn(move |event: Request| async move {
        function_handler(client, event).await
    }))
    .await
}
