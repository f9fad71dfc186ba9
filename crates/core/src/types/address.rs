//! Postal address type.

use serde::{Deserialize, Serialize};

/// A shipping address as entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    /// Country used when the shopper does not pick one.
    pub const DEFAULT_COUNTRY: &'static str = "USA";

    /// Single-line rendering, e.g. `"1 Main St, Apt 2, Austin, TX 78701, USA"`.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.clone()];
        if let Some(street2) = self.street2.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(street2.to_owned());
        }
        parts.push(self.city.clone());
        parts.push(format!("{} {}", self.state, self.zip_code));
        parts.push(self.country.clone());
        parts.join(", ")
    }
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: String::new(),
            street2: None,
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: Self::DEFAULT_COUNTRY.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_country() {
        assert_eq!(Address::default().country, "USA");
    }

    #[test]
    fn test_one_line_skips_blank_street2() {
        let mut address = Address {
            street: "1 Main St".to_owned(),
            street2: Some("  ".to_owned()),
            city: "Austin".to_owned(),
            state: "TX".to_owned(),
            zip_code: "78701".to_owned(),
            ..Address::default()
        };
        assert_eq!(address.one_line(), "1 Main St, Austin, TX 78701, USA");

        address.street2 = Some("Apt 2".to_owned());
        assert_eq!(address.one_line(), "1 Main St, Apt 2, Austin, TX 78701, USA");
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(Address::default()).unwrap();
        assert!(json.get("zipCode").is_some());
        assert!(json.get("street2").is_none());
    }
}
