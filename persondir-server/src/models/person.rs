//! Person profile types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier generated by the `person` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an identifier taken from a URL path.
    ///
    /// Returns `None` for anything that cannot be a stored id. Callers treat
    /// that as "no such person" rather than a storage fault.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().map(Self)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flattened read model: a person's name, one phone number and one address.
///
/// Also the request body of `POST /person/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonProfile {
    pub name: String,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    /// Second street line. Optional in the schema, empty when absent or null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street2: String,
    pub zip_code: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers generated by one successful creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedPerson {
    pub person_id: PersonId,
    pub phone_id: i64,
    pub address_id: i64,
    pub address_join_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_id() {
        assert_eq!(PersonId::parse("42"), Some(PersonId::new(42)));
        assert_eq!(PersonId::parse("42").unwrap().to_string(), "42");
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!(PersonId::parse("abc"), None);
        assert_eq!(PersonId::parse(""), None);
        assert_eq!(PersonId::parse("1; DROP TABLE person"), None);
    }

    #[test]
    fn profile_requires_fields() {
        let err = serde_json::from_str::<PersonProfile>(r#"{"name":"Ada"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn profile_street2_defaults_to_empty() {
        let profile: PersonProfile = serde_json::from_str(
            r#"{"name":"Ada","phone_number":"555-1111","city":"Springfield",
                "state":"IL","street1":"1 Main St","zip_code":"62701"}"#,
        )
        .unwrap();
        assert_eq!(profile.street2, "");
    }

    #[test]
    fn profile_street2_null_is_empty() {
        let profile: PersonProfile = serde_json::from_str(
            r#"{"name":"Ada","phone_number":"555-1111","city":"Springfield",
                "state":"IL","street1":"1 Main St","street2":null,"zip_code":"62701"}"#,
        )
        .unwrap();
        assert_eq!(profile.street2, "");
    }

    #[test]
    fn profile_street2_keeps_value() {
        let profile: PersonProfile = serde_json::from_str(
            r#"{"name":"Ada","phone_number":"555-1111","city":"Springfield",
                "state":"IL","street1":"1 Main St","street2":"Apt 4","zip_code":"62701"}"#,
        )
        .unwrap();
        assert_eq!(profile.street2, "Apt 4");
    }

    #[test]
    fn profile_rejects_null_required_field() {
        let result = serde_json::from_str::<PersonProfile>(
            r#"{"name":null,"phone_number":"555-1111","city":"Springfield",
                "state":"IL","street1":"1 Main St","zip_code":"62701"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn profile_serializes_with_wire_names() {
        let profile = PersonProfile {
            name: "Ada".into(),
            phone_number: "555-1111".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            street1: "1 Main St".into(),
            street2: String::new(),
            zip_code: "62701".into(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["phone_number"], "555-1111");
        assert_eq!(value["zip_code"], "62701");
        assert_eq!(value.as_object().unwrap().len(), 7);
    }
}
