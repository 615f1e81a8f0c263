use serde_json::Map;

use crate::error::ValidationError;
use crate::models::{EstateType, MarketType, Record, SellerType};

/// Mutable accumulator for [`Record`]. Use it instead of constructing a
/// `Record` directly; fields may be set in any order, each validating setter
/// rejects bad input immediately, and [`build`](RecordBuilder::build) performs
/// the final presence check.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    source_offer_id: Option<String>,
    uri: Option<String>,
    source: Option<String>,
    price: Option<f64>,
    estate_type: Option<EstateType>,
    market_type: Option<MarketType>,
    condition: Option<String>,
    availability_year: Option<i32>,
    availability_quarter: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    area_m2: Option<f64>,
    number_of_rooms: Option<i32>,
    voivodeship: Option<String>,
    city: Option<String>,
    street: Option<String>,
    zip: Option<String>,
    seller_type: Option<SellerType>,
    district: Option<String>,
    seller_name: Option<String>,
    seller_phone: Option<String>,
    description_text: Option<String>,
    description_html: Option<String>,
    other_details: Map<String, serde_json::Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source_offer_id(&mut self, source_offer_id: impl Into<String>) -> &mut Self {
        self.source_offer_id = Some(source_offer_id.into());
        self
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn set_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Price in PLN; `None` means "price on request". Negative prices are
    /// rejected.
    pub fn set_price(&mut self, price: Option<f64>) -> Result<&mut Self, ValidationError> {
        if let Some(p) = price {
            if p < 0.0 {
                return Err(ValidationError::NegativePrice(p));
            }
        }
        self.price = price;
        Ok(self)
    }

    pub fn set_estate_type(&mut self, estate_type: EstateType) -> &mut Self {
        self.estate_type = Some(estate_type);
        self
    }

    pub fn set_market_type(&mut self, market_type: MarketType) -> &mut Self {
        self.market_type = Some(market_type);
        self
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn set_availability_year(&mut self, availability_year: Option<i32>) -> &mut Self {
        self.availability_year = availability_year;
        self
    }

    pub fn set_availability_quarter(&mut self, availability_quarter: Option<i32>) -> &mut Self {
        self.availability_quarter = availability_quarter;
        self
    }

    pub fn set_latitude(&mut self, latitude: Option<f64>) -> &mut Self {
        self.latitude = latitude;
        self
    }

    pub fn set_longitude(&mut self, longitude: Option<f64>) -> &mut Self {
        self.longitude = longitude;
        self
    }

    pub fn set_area_m2(&mut self, area_m2: Option<f64>) -> &mut Self {
        self.area_m2 = area_m2;
        self
    }

    pub fn set_number_of_rooms(&mut self, number_of_rooms: Option<i32>) -> &mut Self {
        self.number_of_rooms = number_of_rooms;
        self
    }

    pub fn set_voivodeship(&mut self, voivodeship: Option<String>) -> &mut Self {
        self.voivodeship = voivodeship;
        self
    }

    pub fn set_city(&mut self, city: Option<String>) -> &mut Self {
        self.city = city;
        self
    }

    pub fn set_street(&mut self, street: Option<String>) -> &mut Self {
        self.street = street;
        self
    }

    pub fn set_zip(&mut self, zip: Option<String>) -> &mut Self {
        self.zip = zip;
        self
    }

    pub fn set_seller_type(&mut self, seller_type: SellerType) -> &mut Self {
        self.seller_type = Some(seller_type);
        self
    }

    pub fn set_district(&mut self, district: Option<String>) -> &mut Self {
        self.district = district;
        self
    }

    pub fn set_seller_name(&mut self, seller_name: Option<String>) -> &mut Self {
        self.seller_name = seller_name;
        self
    }

    /// Seller phone must contain digits only, no formatting characters.
    pub fn set_seller_phone(
        &mut self,
        seller_phone: impl Into<String>,
    ) -> Result<&mut Self, ValidationError> {
        let phone = seller_phone.into();
        if phone.is_empty() || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone(phone));
        }
        self.seller_phone = Some(phone);
        Ok(self)
    }

    pub fn set_description_text(&mut self, description_text: Option<String>) -> &mut Self {
        self.description_text = description_text;
        self
    }

    pub fn set_description_html(&mut self, description_html: Option<String>) -> &mut Self {
        self.description_html = description_html;
        self
    }

    pub fn set_other_details(&mut self, other_details: Map<String, serde_json::Value>) -> &mut Self {
        self.other_details = other_details;
        self
    }

    /// Final presence validation. Reports the first missing required field in
    /// a fixed order, regardless of which others are also missing.
    pub fn build(self) -> Result<Record, ValidationError> {
        let source_offer_id = self
            .source_offer_id
            .ok_or(ValidationError::MissingField("sourceOfferId"))?;
        let uri = self.uri.ok_or(ValidationError::MissingField("uri"))?;
        let source = self.source.ok_or(ValidationError::MissingField("source"))?;
        let estate_type = self
            .estate_type
            .ok_or(ValidationError::MissingField("estateType"))?;
        let market_type = self
            .market_type
            .ok_or(ValidationError::MissingField("marketType"))?;
        let condition = self
            .condition
            .ok_or(ValidationError::MissingField("condition"))?;
        let seller_type = self
            .seller_type
            .ok_or(ValidationError::MissingField("sellerType"))?;

        Ok(Record {
            source_offer_id,
            uri,
            source,
            price: self.price,
            estate_type,
            market_type,
            condition,
            availability_year: self.availability_year,
            availability_quarter: self.availability_quarter,
            latitude: self.latitude,
            longitude: self.longitude,
            area_m2: self.area_m2,
            number_of_rooms: self.number_of_rooms,
            voivodeship: self.voivodeship,
            city: self.city,
            street: self.street,
            zip: self.zip,
            seller_type,
            district: self.district,
            seller_name: self.seller_name,
            seller_phone: self.seller_phone,
            description_text: self.description_text,
            description_html: self.description_html,
            other_details: self.other_details,
        })
    }
}
