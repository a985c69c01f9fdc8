use crate::{
    dates::resolve_range,
    error::RateError,
    fetcher::RateSource,
    payload::{shape_rates, RateMap},
};

pub const INPUT_DATE_PARAM: &str = "inputDate";

/// Month-to-date USD/MXN rates for `input_date` (`DD/MM/YYYY`).
///
/// `connect` is only called once the input is known to be valid, so a
/// missing configuration never leads to a network call and never hides a
/// bad request.
pub async fn usd_rates<S, F>(input_date: Option<&str>, connect: F) -> Result<RateMap, RateError>
where
    S: RateSource,
    F: FnOnce() -> Result<S, RateError>,
{
    let input_date = input_date
        .filter(|date| !date.trim().is_empty())
        .ok_or(RateError::MissingParameter(INPUT_DATE_PARAM))?;

    let range = resolve_range(input_date)?;
    let source = connect()?;
    let body = source.fetch_rates(&range).await?;

    shape_rates(&body)
}

/// Status code plus JSON body, ready to hand to whatever HTTP layer is in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesResponse {
    pub status: u16,
    pub body: String,
}

impl RatesResponse {
    pub fn error(err: &RateError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::Value::String(err.to_string()).to_string(),
        }
    }

    pub fn ok(rates: &RateMap) -> Self {
        match serde_json::to_string(rates) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(&RateError::MalformedPayload(e.to_string())),
        }
    }
}

impl From<Result<RateMap, RateError>> for RatesResponse {
    fn from(outcome: Result<RateMap, RateError>) -> Self {
        match outcome {
            Ok(rates) => Self::ok(&rates),
            Err(err) => {
                tracing::error!(error = %err, "rates request failed");
                Self::error(&err)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateRange;
    use std::sync::Mutex;

    /// Returns a canned body and remembers the range it was asked for.
    struct Canned {
        body: Result<String, RateError>,
        seen: Mutex<Option<DateRange>>,
    }

    impl Canned {
        fn body(body: &str) -> Self {
            Self { body: Ok(body.to_string()), seen: Mutex::new(None) }
        }

        fn failing(err: RateError) -> Self {
            Self { body: Err(err), seen: Mutex::new(None) }
        }
    }

    impl RateSource for &Canned {
        async fn fetch_rates(&self, range: &DateRange) -> Result<String, RateError> {
            *self.seen.lock().unwrap() = Some(range.clone());
            self.body.clone()
        }
    }

    const ONE_RECORD: &str = r#"{"bmx":{"series":[{"datos":[{"fecha":"2024-01-05","dato":"17.1"}]}]}}"#;

    #[tokio::test]
    async fn happy_path() {
        let source = Canned::body(ONE_RECORD);

        let response: RatesResponse = usd_rates(Some("05/01/2024"), || Ok(&source)).await.into();

        assert_eq!(response, RatesResponse { status: 200, body: r#"{"2024-01-05":"17.10"}"#.to_string() });
        assert_eq!(
            source.seen.lock().unwrap().clone(),
            Some(DateRange { start: "2024-01-01".to_string(), end: "2024-01-05".to_string() })
        );
    }

    #[tokio::test]
    async fn missing_input_date() {
        let source = Canned::body(ONE_RECORD);

        let response: RatesResponse = usd_rates(None, || Ok(&source)).await.into();

        assert_eq!(response.status, 400);
        assert_eq!(response.body, r#""Missing query parameter: inputDate""#);
        assert!(source.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_input_date_counts_as_missing() {
        let source = Canned::body(ONE_RECORD);

        let response: RatesResponse = usd_rates(Some(""), || Ok(&source)).await.into();

        assert_eq!(response.status, 400);
        assert_eq!(response.body, r#""Missing query parameter: inputDate""#);
    }

    #[tokio::test]
    async fn malformed_date_is_a_bad_request() {
        let source = Canned::body(ONE_RECORD);

        let response: RatesResponse = usd_rates(Some("2024-01-05"), || Ok(&source)).await.into();

        assert_eq!(response.status, 400);
        assert!(response.body.contains("Invalid date format"));
        assert!(source.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_configuration_skips_the_fetch() {
        let outcome = usd_rates(Some("05/01/2024"), || {
            Err::<&Canned, _>(RateError::MissingConfiguration("BASE_URL"))
        })
        .await;

        let response = RatesResponse::from(outcome);
        assert_eq!(response.status, 500);
        assert!(response.body.contains("Missing configuration"));
        assert!(response.body.contains("BASE_URL"));
    }

    #[tokio::test]
    async fn upstream_failure_carries_status_code() {
        let source = Canned::failing(RateError::UpstreamRequestFailed("status 503 Service Unavailable".into()));

        let response: RatesResponse = usd_rates(Some("05/01/2024"), || Ok(&source)).await.into();

        assert_eq!(response.status, 500);
        assert!(response.body.contains("503"));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_server_error() {
        let source = Canned::body("not json");

        let response: RatesResponse = usd_rates(Some("05/01/2024"), || Ok(&source)).await.into();

        assert_eq!(response.status, 500);
        assert!(response.body.contains("Error parsing upstream payload"));
    }

    #[test]
    fn error_bodies_are_json_strings() {
        let response = RatesResponse::error(&RateError::MalformedPayload("bad \"quote\"".into()));
        let decoded: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(decoded, "Error parsing upstream payload: bad \"quote\"");
    }
}
