use serde::Serialize;

/// Values sent when the form is submitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub name: String,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub emails: Vec<String>,
}

impl Submission {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let submission = Submission {
            name: "Atelier".to_string(),
            address: "10 Rue A".to_string(),
            longitude: Some(4.84),
            latitude: Some(45.76),
            emails: vec!["alice@x.com".to_string()],
        };

        let value: serde_json::Value =
            serde_json::from_str(&submission.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Atelier",
                "address": "10 Rue A",
                "longitude": 4.84,
                "latitude": 45.76,
                "emails": ["alice@x.com"],
            })
        );
    }

    #[test]
    fn test_missing_coordinates_are_null() {
        let submission = Submission {
            name: String::new(),
            address: String::new(),
            longitude: None,
            latitude: None,
            emails: Vec::new(),
        };

        let value: serde_json::Value =
            serde_json::from_str(&submission.to_json().unwrap()).unwrap();
        assert!(value["longitude"].is_null());
        assert!(value["latitude"].is_null());
    }
}
