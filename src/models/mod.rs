use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Map;

use crate::error::ValidationError;

pub mod builder;

/// Kind of estate an offer is for. Closed set; feel free to add more, but
/// remember to extend the site vocabulary maps as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstateType {
    Flat,
    House,
}

/// Primary (developer sells a new estate) vs aftermarket (resale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Primary,
    Aftermarket,
}

/// Who listed the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerType {
    Private,
    Agency,
    Developer,
}

impl EstateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstateType::Flat => "flat",
            EstateType::House => "house",
        }
    }
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Primary => "primary",
            MarketType::Aftermarket => "aftermarket",
        }
    }
}

impl SellerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SellerType::Private => "private",
            SellerType::Agency => "agency",
            SellerType::Developer => "developer",
        }
    }
}

impl fmt::Display for EstateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstateType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(EstateType::Flat),
            "house" => Ok(EstateType::House),
            other => Err(ValidationError::InvalidEnum {
                field: "estate type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for MarketType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(MarketType::Primary),
            "aftermarket" => Ok(MarketType::Aftermarket),
            other => Err(ValidationError::InvalidEnum {
                field: "market type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SellerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(SellerType::Private),
            "agency" => Ok(SellerType::Agency),
            "developer" => Ok(SellerType::Developer),
            other => Err(ValidationError::InvalidEnum {
                field: "seller type",
                value: other.to_string(),
            }),
        }
    }
}

/// Normalized, validated representation of a single offer.
///
/// Construct it through [`builder::RecordBuilder`]; a `Record` that exists
/// always satisfies every presence and enum constraint, and is immutable
/// afterwards. Serializes with camelCase keys so golden fixtures can be kept
/// as plain JSON. Deliberately not `Deserialize` — that would bypass the
/// builder's validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique offer id on the source website. Usually found in the URI.
    source_offer_id: String,
    /// URI where the offer can be found.
    uri: String,
    /// Source website id. Unique per parser.
    source: String,
    /// Price in PLN. None means "price on request".
    price: Option<f64>,
    estate_type: EstateType,
    market_type: MarketType,
    /// Free-text condition, site-specific vocabulary.
    condition: String,
    /// Only for investments where the estate is not ready yet.
    availability_year: Option<i32>,
    /// Only for investments where the estate is not ready yet.
    availability_quarter: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    area_m2: Option<f64>,
    number_of_rooms: Option<i32>,
    voivodeship: Option<String>,
    city: Option<String>,
    street: Option<String>,
    zip: Option<String>,
    seller_type: SellerType,
    district: Option<String>,
    seller_name: Option<String>,
    /// Digits only, validated at construction.
    seller_phone: Option<String>,
    description_text: Option<String>,
    description_html: Option<String>,
    /// Raw source-specific key/value pairs that do not map onto a
    /// normalized field (image lists, detail table rows, ...).
    other_details: Map<String, serde_json::Value>,
}

impl Record {
    pub fn source_offer_id(&self) -> &str {
        &self.source_offer_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn estate_type(&self) -> EstateType {
        self.estate_type
    }

    pub fn market_type(&self) -> MarketType {
        self.market_type
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn availability_year(&self) -> Option<i32> {
        self.availability_year
    }

    pub fn availability_quarter(&self) -> Option<i32> {
        self.availability_quarter
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn area_m2(&self) -> Option<f64> {
        self.area_m2
    }

    pub fn number_of_rooms(&self) -> Option<i32> {
        self.number_of_rooms
    }

    pub fn voivodeship(&self) -> Option<&str> {
        self.voivodeship.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn seller_type(&self) -> SellerType {
        self.seller_type
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn seller_name(&self) -> Option<&str> {
        self.seller_name.as_deref()
    }

    pub fn seller_phone(&self) -> Option<&str> {
        self.seller_phone.as_deref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description_text.as_deref()
    }

    pub fn description_html(&self) -> Option<&str> {
        self.description_html.as_deref()
    }

    pub fn other_details(&self) -> &Map<String, serde_json::Value> {
        &self.other_details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_from_str_accepts_members_only() {
        assert_eq!("flat".parse::<EstateType>().unwrap(), EstateType::Flat);
        assert_eq!("house".parse::<EstateType>().unwrap(), EstateType::House);
        assert_eq!("primary".parse::<MarketType>().unwrap(), MarketType::Primary);
        assert_eq!(
            "aftermarket".parse::<MarketType>().unwrap(),
            MarketType::Aftermarket
        );
        assert_eq!("private".parse::<SellerType>().unwrap(), SellerType::Private);
        assert_eq!("agency".parse::<SellerType>().unwrap(), SellerType::Agency);
        assert_eq!(
            "developer".parse::<SellerType>().unwrap(),
            SellerType::Developer
        );
    }

    #[test]
    fn enum_from_str_rejects_everything_else() {
        let err = "garage".parse::<EstateType>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidEnum {
                field: "estate type",
                value: "garage".to_string(),
            }
        );
        assert!("".parse::<MarketType>().is_err());
        assert!("Flat".parse::<EstateType>().is_err());
        assert!("investor".parse::<SellerType>().is_err());
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(EstateType::Flat).unwrap(),
            serde_json::json!("flat")
        );
        assert_eq!(
            serde_json::to_value(SellerType::Developer).unwrap(),
            serde_json::json!("developer")
        );
    }
}
