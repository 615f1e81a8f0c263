pub mod embedded;
pub mod nieruchomosci_online;
pub mod traits;

pub use nieruchomosci_online::NieruchomosciOnlinePlParser;
pub use traits::SiteParser;

use crate::error::ParseError;

/// Every shipped site parser, one per source website.
pub fn registry() -> Result<Vec<Box<dyn SiteParser>>, ParseError> {
    Ok(vec![Box::new(NieruchomosciOnlinePlParser::new()?)])
}

/// Look a parser up by its source id.
pub fn by_source(source: &str) -> Result<Option<Box<dyn SiteParser>>, ParseError> {
    Ok(registry()?
        .into_iter()
        .find(|parser| parser.source() == source))
}
