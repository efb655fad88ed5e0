//! Custom request extractors.

mod params;
mod validated_json;

pub use params::{ApiPath, ApiQuery};
pub use validated_json::ValidatedJson;
