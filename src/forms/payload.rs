//! Typed submission payload shared by every multipart flow.
//!
//! The portal backend accepts two array encodings: a JSON string under a
//! single key (procurement posting) and repeated `key[]` entries (supplier
//! registration). Files travel under their named slots. Building the
//! payload here keeps the wire shape in one place instead of re-implemented
//! per workflow.

use super::attachment::FileCandidate;

/// How an array field is written onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayEncoding {
    /// One part named `name` carrying `serde_json::to_string(values)`.
    JsonString,
    /// One part per item, each named `name[]`.
    RepeatedKey,
}

/// One field of a transfer payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadField {
    Scalar {
        name: String,
        value: String,
    },
    Array {
        name: String,
        values: Vec<String>,
        encoding: ArrayEncoding,
    },
    File {
        name: String,
        file: FileCandidate,
    },
}

/// Accumulated transfer payload for a single submission attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    fields: Vec<PayloadField>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scalar(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push(PayloadField::Scalar {
            name: name.to_string(),
            value: value.into(),
        });
    }

    pub fn push_array(&mut self, name: &str, values: Vec<String>, encoding: ArrayEncoding) {
        self.fields.push(PayloadField::Array {
            name: name.to_string(),
            values,
            encoding,
        });
    }

    pub fn push_file(&mut self, name: &str, file: FileCandidate) {
        self.fields.push(PayloadField::File {
            name: name.to_string(),
            file,
        });
    }

    pub fn fields(&self) -> &[PayloadField] {
        &self.fields
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            PayloadField::Scalar { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn array(&self, name: &str) -> Option<&[String]> {
        self.fields.iter().find_map(|field| match field {
            PayloadField::Array { name: n, values, .. } if n == name => Some(values.as_slice()),
            _ => None,
        })
    }

    pub fn file(&self, name: &str) -> Option<&FileCandidate> {
        self.fields.iter().find_map(|field| match field {
            PayloadField::File { name: n, file } if n == name => Some(file),
            _ => None,
        })
    }

    /// JSON text written for a `JsonString` array field.
    pub fn encode_array(values: &[String]) -> String {
        serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_fields_round_trip() {
        let deliverables = vec![
            "Feasibility report".to_string(),
            "Installation plan".to_string(),
        ];
        let mut payload = FormPayload::new();
        payload.push_array("deliverables", deliverables.clone(), ArrayEncoding::JsonString);

        let encoded = FormPayload::encode_array(payload.array("deliverables").expect("present"));
        let decoded: Vec<String> = serde_json::from_str(&encoded).expect("valid json");
        assert_eq!(decoded, deliverables);
    }

    #[test]
    fn lookup_by_name_finds_each_field_kind() {
        let mut payload = FormPayload::new();
        payload.push_scalar("procurementID", "NREP-PRF-2024-014");
        payload.push_array(
            "category",
            vec!["Energy".to_string()],
            ArrayEncoding::RepeatedKey,
        );
        payload.push_file("budget", FileCandidate::new("budget.pdf", vec![0u8; 16]));

        assert_eq!(payload.scalar("procurementID"), Some("NREP-PRF-2024-014"));
        assert_eq!(payload.array("category"), Some(&["Energy".to_string()][..]));
        assert_eq!(payload.file("budget").map(|f| f.name()), Some("budget.pdf"));
        assert_eq!(payload.scalar("missing"), None);
    }
}
