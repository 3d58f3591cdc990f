use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Carrier, Country};
use crate::transport::TransportError;
use crate::transport::lenient::{LenientString, optional};

#[derive(Debug, Clone, Deserialize)]
struct CountryJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    iso2: Option<String>,
    #[serde(default)]
    iso3: Option<String>,
    #[serde(default)]
    phone_prefix: Option<LenientString>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl From<CountryJson> for Country {
    fn from(value: CountryJson) -> Self {
        Country {
            name: value.name,
            iso2: value.iso2,
            iso3: value.iso3,
            phone_prefix: optional(value.phone_prefix),
            attributes: value.attributes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CarrierJson {
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country_iso2: Option<String>,
    #[serde(default)]
    prefixes: Option<LenientString>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl From<CarrierJson> for Carrier {
    fn from(value: CarrierJson) -> Self {
        Carrier {
            guid: value.guid,
            name: value.name,
            country_iso2: value.country_iso2,
            prefixes: optional(value.prefixes),
            attributes: value.attributes,
        }
    }
}

pub fn decode_countries(json: &str) -> Result<Vec<Country>, TransportError> {
    let parsed: Vec<CountryJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(Country::from).collect())
}

pub fn decode_country(value: Value) -> Result<Country, TransportError> {
    let parsed: CountryJson = serde_json::from_value(value)?;
    Ok(parsed.into())
}

pub fn decode_carriers(json: &str) -> Result<Vec<Carrier>, TransportError> {
    let parsed: Vec<CarrierJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(Carrier::from).collect())
}

pub fn decode_carrier(value: Value) -> Result<Carrier, TransportError> {
    let parsed: CarrierJson = serde_json::from_value(value)?;
    Ok(parsed.into())
}
