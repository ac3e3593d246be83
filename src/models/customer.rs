//! Customer and export row models

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

/// Customer from /rest/V1/customers/search
///
/// Only the attributes the export needs are mapped; anything else the store
/// sends back (group, addresses, timestamps) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}

impl Customer {
    /// Create a customer with the exported attributes only
    pub fn new(firstname: &str, lastname: &str, email: &str) -> Self {
        Self {
            id: None,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            email: email.to_string(),
        }
    }

    /// First and last name joined by a single space, untrimmed
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// One line of the export file
///
/// Serializes as a two-element sequence so CSV gets a headerless two-field
/// record and JSON gets `["name", "email"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub display_name: String,
    pub email: String,
}

impl From<&Customer> for ExportRow {
    fn from(c: &Customer) -> Self {
        ExportRow {
            display_name: c.display_name(),
            email: c.email.clone(),
        }
    }
}

impl Serialize for ExportRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.display_name)?;
        tup.serialize_element(&self.email)?;
        tup.end()
    }
}
