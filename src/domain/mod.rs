pub mod errors;
pub mod order;
pub mod ports;
pub mod product;

use uuid::Uuid;

/// Ids arrive as strings; anything that is not a UUID cannot name a record.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
