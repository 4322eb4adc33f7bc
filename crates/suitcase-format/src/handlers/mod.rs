//! Format handlers

mod csv;
mod json;
mod xml;
mod yaml;

pub use self::csv::CsvHandler;
pub use self::json::JsonHandler;
pub use self::xml::XmlHandler;
pub use self::yaml::YamlHandler;
