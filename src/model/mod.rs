use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// record identity, assigned by the data source and never regenerated
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// payloads carry ids either as "1" or 1
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Ok(Self(s)),
            RawId::Number(n) => Ok(Self(n.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            extra: Map::new(),
        }
    }

    pub fn set_field(&mut self, field: &Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Role => self.role = value,
            Field::Other(key) => {
                self.extra.insert(key.clone(), Value::String(value));
            }
        }
    }
}

/// An editable record field. `id` is deliberately not representable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Role,
    Other(String),
}

impl Field {
    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim();
        match key.to_lowercase().as_str() {
            "" | "id" => None,
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "role" => Some(Self::Role),
            _ => Some(Self::Other(key.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Other(key) => key.as_str(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_string_and_number() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[
                {"id":"1","name":"Aaron Miles","email":"aaron@mailinator.com","role":"member"},
                {"id":2,"name":"Aishwarya Naik","email":"aishwarya@mailinator.com","role":"admin"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].id, RecordId::from("1"));
        assert_eq!(records[1].id, RecordId::from("2"));
    }

    #[test]
    fn extra_fields_survive_round_trip() {
        let record: Record = serde_json::from_str(
            r#"{"id":"7","name":"Ann","email":"a@b.com","role":"admin","team":"ops"}"#,
        )
        .unwrap();
        assert_eq!(record.extra["team"], "ops");
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["team"], "ops");
        assert_eq!(out["id"], "7");
    }

    #[test]
    fn field_parse_rejects_identity() {
        assert_eq!(Field::parse("id"), None);
        assert_eq!(Field::parse(" ID "), None);
        assert_eq!(Field::parse("Email"), Some(Field::Email));
        assert_eq!(Field::parse("team"), Some(Field::Other("team".to_string())));
    }

    #[test]
    fn set_field_writes_through() {
        let mut record = Record::new("1", "Ann", "a@b.com", "admin");
        record.set_field(&Field::Name, "Anna".to_string());
        record.set_field(&Field::Other("team".to_string()), "ops".to_string());
        assert_eq!(record.name, "Anna");
        assert_eq!(record.extra["team"], "ops");
    }
}
