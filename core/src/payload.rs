use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::RateError;

/// `date -> rate` with the rate rendered to two decimals.
pub type RateMap = BTreeMap<String, String>;

#[derive(Deserialize, Debug)]
struct SieResponse {
    bmx: Bmx,
}

#[derive(Deserialize, Debug)]
struct Bmx {
    series: Vec<Series>,
}

#[derive(Deserialize, Debug)]
struct Series {
    datos: Vec<Observation>,
}

#[derive(Deserialize, Debug)]
struct Observation {
    fecha: String,
    dato: Dato,
}

// SIE sends figures as strings, but a plain number is accepted too.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Dato {
    Text(String),
    Number(f64),
}

impl Dato {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Dato::Text(text) => text.trim().parse::<f64>().ok()?,
            Dato::Number(number) => *number,
        };
        value.is_finite().then_some(value)
    }
}

/// Reduces a raw SIE payload to the observations of its first series.
pub fn shape_rates(body: &str) -> Result<RateMap, RateError> {
    let response: SieResponse =
        serde_json::from_str(body).map_err(|e| RateError::MalformedPayload(e.to_string()))?;

    let series = response
        .bmx
        .series
        .first()
        .ok_or_else(|| RateError::MalformedPayload("series list is empty".to_string()))?;

    series
        .datos
        .iter()
        .map(|obs| -> Result<(String, String), RateError> {
            let value = obs.dato.value().ok_or_else(|| {
                RateError::MalformedPayload(format!("invalid value {:?} for {}", obs.dato, obs.fecha))
            })?;
            Ok((obs.fecha.clone(), format!("{value:.2}")))
        })
        .collect()
}
