// src/specs/details.rs
// Yelp business details (`GET /businesses/{id}`): same shape as a search hit,
// usually with more fields filled in.

use crate::error::Result;
use crate::model::Business;

pub fn path(business_id: &str) -> String {
    join!("/businesses/", business_id)
}

pub fn parse_details(json: &str) -> Result<Business> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_parse_into_business() {
        let b = parse_details(r#"{"id":"x","phone":"+1","hours":[{"open":[]}]}"#).unwrap();
        assert_eq!(b.id.as_deref(), Some("x"));
        assert_eq!(b.phone.as_deref(), Some("+1"));
        assert_eq!(path("x"), "/businesses/x");
    }
}
