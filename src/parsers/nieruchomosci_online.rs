use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ParseError;
use crate::models::builder::RecordBuilder;
use crate::models::{EstateType, MarketType, Record, SellerType};
use crate::parsers::embedded::EmbeddedPayload;
use crate::parsers::traits::SiteParser;

/// Site-specific paths and markers, kept as data so a layout change is a
/// one-line fix. They must match nieruchomosci-online.pl bit-for-bit.
const OFFER_ID_SELECTOR: &str = r#"[name="idData"]"#;
const DETAILS_CONTAINER_SELECTOR: &str = "#detailsTable";
const DETAILS_ITEM_SELECTOR: &str = "ul li";
const DETAILS_LABEL_SELECTOR: &str = "strong";
const DETAILS_VALUE_SELECTOR: &str = "span";
const ATTRIBUTES_CONTAINER_SELECTOR: &str = "#attributesTable";
const ATTRIBUTES_CELL_SELECTOR: &str = "td";
const ATTRIBUTES_LABEL_SELECTOR: &str = ".fheader";
const ATTRIBUTES_VALUE_SELECTOR: &str = "span";

const IS_PRIVATE_PATTERN: &str = r"isPrivate: '(\d)'";
const PHOTOS_PATTERN: &str = r"(?m)photos: (\{.*?\}),$";
/// Key of the image list inside the decoded photos object.
const PHOTOS_LIST_KEY: &str = "x";

const ESTATE_TYPE_KEY: &str = "Typ oferty";
const MARKET_TYPE_KEY: &str = "Rynek";
const CONDITION_KEY: &str = "Stan mieszkania";

/// Parser for nieruchomosci-online.pl offer pages.
pub struct NieruchomosciOnlinePlParser {
    offer_id: Selector,
    details_container: Selector,
    details_item: Selector,
    details_label: Selector,
    details_value: Selector,
    attributes_container: Selector,
    attributes_cell: Selector,
    attributes_label: Selector,
    attributes_value: Selector,
    is_private: EmbeddedPayload,
    photos: EmbeddedPayload,
}

impl NieruchomosciOnlinePlParser {
    pub const SOURCE: &'static str = "nieruchomosci_online_pl";

    /// Compile the site's selectors and script patterns once.
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            offer_id: selector(OFFER_ID_SELECTOR)?,
            details_container: selector(DETAILS_CONTAINER_SELECTOR)?,
            details_item: selector(DETAILS_ITEM_SELECTOR)?,
            details_label: selector(DETAILS_LABEL_SELECTOR)?,
            details_value: selector(DETAILS_VALUE_SELECTOR)?,
            attributes_container: selector(ATTRIBUTES_CONTAINER_SELECTOR)?,
            attributes_cell: selector(ATTRIBUTES_CELL_SELECTOR)?,
            attributes_label: selector(ATTRIBUTES_LABEL_SELECTOR)?,
            attributes_value: selector(ATTRIBUTES_VALUE_SELECTOR)?,
            is_private: EmbeddedPayload::new("isPrivate", IS_PRIVATE_PATTERN)?,
            photos: EmbeddedPayload::new("photos", PHOTOS_PATTERN)?,
        })
    }

    fn source_offer_id<'a>(&self, document: &'a Html) -> Result<&'a str, ParseError> {
        document
            .select(&self.offer_id)
            .next()
            .and_then(|input| input.value().attr("value"))
            .ok_or_else(|| ParseError::MissingMarkup(OFFER_ID_SELECTOR.to_string()))
    }

    /// Key→value rows of the details list. The key comes from the label node
    /// stripped of surrounding colons and whitespace, the value from the
    /// first value node. A repeated key overwrites the earlier row.
    fn details_section(&self, document: &Html) -> Result<Map<String, Value>, ParseError> {
        let container = document
            .select(&self.details_container)
            .next()
            .ok_or_else(|| ParseError::MissingMarkup(DETAILS_CONTAINER_SELECTOR.to_string()))?;

        let mut details = Map::new();
        for item in container.select(&self.details_item) {
            let label = first_text(item, &self.details_label, "details item label")?;
            let value = first_text(item, &self.details_value, "details item value")?;
            details.insert(clean_key(&label), Value::String(value.trim().to_string()));
        }
        debug!(rows = details.len(), "extracted details section");
        Ok(details)
    }

    /// Key→value cells of the attributes table. A cell may carry several
    /// value spans; only the last one is authoritative. Site-specific quirk,
    /// not a general rule.
    fn attributes_section(&self, document: &Html) -> Result<Map<String, Value>, ParseError> {
        let container = document
            .select(&self.attributes_container)
            .next()
            .ok_or_else(|| ParseError::MissingMarkup(ATTRIBUTES_CONTAINER_SELECTOR.to_string()))?;

        let mut attributes = Map::new();
        for cell in container.select(&self.attributes_cell) {
            let label = first_text(cell, &self.attributes_label, "attributes cell label")?;
            let value = cell
                .select(&self.attributes_value)
                .last()
                .map(element_text)
                .ok_or_else(|| {
                    ParseError::MissingMarkup("attributes cell value".to_string())
                })?;
            attributes.insert(clean_key(&label), Value::String(value.trim().to_string()));
        }
        debug!(cells = attributes.len(), "extracted attributes section");
        Ok(attributes)
    }

    fn estate_type(&self, raw: &str) -> Result<EstateType, ParseError> {
        match raw {
            "mieszkanie na sprzedaż" => Ok(EstateType::Flat),
            "dom na sprzedaż" => Ok(EstateType::House),
            other => Err(ParseError::UnknownVocabulary {
                field: "estate type",
                value: other.to_string(),
            }),
        }
    }

    fn market_type(&self, raw: &str) -> Result<MarketType, ParseError> {
        match raw {
            "wtórny" => Ok(MarketType::Aftermarket),
            "pierwotny" => Ok(MarketType::Primary),
            other => Err(ParseError::UnknownVocabulary {
                field: "market type",
                value: other.to_string(),
            }),
        }
    }

    /// The seller kind is not in the markup at all; the page inlines an
    /// `isPrivate: '0'|'1'` flag in a script variable.
    fn seller_type(&self, body: &str) -> Result<SellerType, ParseError> {
        let flag = self.is_private.capture(body)?;
        Ok(if flag == "1" {
            SellerType::Private
        } else {
            SellerType::Agency
        })
    }

    /// Image URLs from the embedded photos object.
    fn images(&self, body: &str) -> Result<Vec<Value>, ParseError> {
        let photos = self.photos.capture_json(body)?;
        match photos.get(PHOTOS_LIST_KEY) {
            Some(Value::Array(images)) => Ok(images.clone()),
            _ => Err(ParseError::MissingPayload("photos list")),
        }
    }
}

impl SiteParser for NieruchomosciOnlinePlParser {
    fn source(&self) -> &'static str {
        Self::SOURCE
    }

    fn parse(&self, body: &str, uri: &str) -> Result<Record, ParseError> {
        let document = Html::parse_document(body);

        let mut builder = RecordBuilder::new();
        builder.set_uri(uri).set_source(Self::SOURCE);
        builder.set_source_offer_id(self.source_offer_id(&document)?);

        let details = self.details_section(&document)?;
        let attributes = self.attributes_section(&document)?;

        builder.set_estate_type(self.estate_type(section_value(&details, ESTATE_TYPE_KEY)?)?);
        builder.set_market_type(self.market_type(section_value(&details, MARKET_TYPE_KEY)?)?);
        // Free text, no enum translation.
        builder.set_condition(section_value(&attributes, CONDITION_KEY)?);

        builder.set_seller_type(self.seller_type(body)?);

        let images = self.images(body)?;
        debug!(images = images.len(), "extracted embedded photos");

        let mut other_details = Map::new();
        other_details.insert("images".to_string(), Value::Array(images.clone()));
        other_details.insert("imagesCount".to_string(), Value::from(images.len()));
        other_details.insert("details".to_string(), Value::Object(details));
        other_details.insert("attributes".to_string(), Value::Object(attributes));
        // Not populated for this site yet; kept so downstream consumers see
        // the same shape across sources.
        other_details.insert("localization".to_string(), Value::Object(Map::new()));
        builder.set_other_details(other_details);

        Ok(builder.build()?)
    }
}

fn selector(path: &str) -> Result<Selector, ParseError> {
    Selector::parse(path).map_err(|err| ParseError::InvalidSelector {
        selector: path.to_string(),
        message: err.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn first_text(
    scope: ElementRef<'_>,
    path: &Selector,
    what: &str,
) -> Result<String, ParseError> {
    scope
        .select(path)
        .next()
        .map(element_text)
        .ok_or_else(|| ParseError::MissingMarkup(what.to_string()))
}

fn clean_key(label: &str) -> String {
    label
        .trim_matches(|c: char| c == ':' || c.is_whitespace())
        .to_string()
}

fn section_value<'a>(section: &'a Map<String, Value>, key: &str) -> Result<&'a str, ParseError> {
    section
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::MissingMarkup(format!("section key \"{key}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> NieruchomosciOnlinePlParser {
        NieruchomosciOnlinePlParser::new().unwrap()
    }

    #[test]
    fn details_keys_are_stripped_and_last_occurrence_wins() {
        let html = Html::parse_document(
            r#"<div id="detailsTable"><ul>
                <li><strong>Rynek:</strong> <span>pierwotny</span></li>
                <li><strong> Rynek : </strong> <span> wtórny </span></li>
            </ul></div>"#,
        );
        let details = parser().details_section(&html).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details["Rynek"], Value::String("wtórny".to_string()));
    }

    #[test]
    fn attributes_take_the_last_span_per_cell() {
        let html = Html::parse_document(
            r#"<div id="attributesTable"><table><tr>
                <td><strong class="fheader">Piętro:</strong><span>parter</span><span>4/6</span></td>
            </tr></table></div>"#,
        );
        let attributes = parser().attributes_section(&html).unwrap();
        assert_eq!(attributes["Piętro"], Value::String("4/6".to_string()));
    }

    #[test]
    fn absent_containers_are_structural_errors() {
        let html = Html::parse_document("<html><body></body></html>");
        assert!(matches!(
            parser().details_section(&html).unwrap_err(),
            ParseError::MissingMarkup(_)
        ));
        assert!(matches!(
            parser().attributes_section(&html).unwrap_err(),
            ParseError::MissingMarkup(_)
        ));
    }

    #[test]
    fn known_vocabulary_maps_to_the_closed_enums() {
        let p = parser();
        assert_eq!(
            p.estate_type("mieszkanie na sprzedaż").unwrap(),
            EstateType::Flat
        );
        assert_eq!(p.estate_type("dom na sprzedaż").unwrap(), EstateType::House);
        assert_eq!(p.market_type("wtórny").unwrap(), MarketType::Aftermarket);
        assert_eq!(p.market_type("pierwotny").unwrap(), MarketType::Primary);
    }

    #[test]
    fn unknown_vocabulary_never_defaults() {
        let err = parser().estate_type("garaż na sprzedaż").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownVocabulary { field: "estate type", .. }
        ));
        assert!(parser().market_type("zagraniczny").is_err());
    }

    #[test]
    fn seller_type_comes_from_the_is_private_flag() {
        let p = parser();
        assert_eq!(
            p.seller_type("var a = { isPrivate: '1', };").unwrap(),
            SellerType::Private
        );
        assert_eq!(
            p.seller_type("var a = { isPrivate: '0', };").unwrap(),
            SellerType::Agency
        );
        assert!(matches!(
            p.seller_type("var a = {};").unwrap_err(),
            ParseError::MissingPayload("isPrivate")
        ));
    }

    #[test]
    fn images_come_from_the_embedded_photos_object() {
        let body = "var gallery = {\n    photos: {\"x\": [\"a.jpg\", \"b.jpg\"], \"count\": 2},\n};";
        let images = parser().images(body).unwrap();
        assert_eq!(images, vec![Value::from("a.jpg"), Value::from("b.jpg")]);
    }

    #[test]
    fn photos_object_without_the_list_key_is_an_error() {
        let body = "photos: {\"count\": 0},\n";
        assert!(matches!(
            parser().images(body).unwrap_err(),
            ParseError::MissingPayload("photos list")
        ));
    }
}
