use std::time::Duration;

use async_trait::async_trait;

use super::{GeocodeError, Place, ReverseGeocoder};

/// Reverse geocoding against a Nominatim instance (`/reverse`, jsonv2).
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl NominatimClient {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        language: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
        zoom: u8,
    ) -> Result<Option<Place>, GeocodeError> {
        let query = [
            ("format", "jsonv2".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("zoom", zoom.to_string()),
            ("accept-language", self.language.clone()),
        ];

        let body: serde_json::Value = self
            .client
            .get(self.reverse_url())
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(interpret_response(body))
    }
}

// Nominatim answers "nothing here" with 200 and an `error` member.
fn interpret_response(body: serde_json::Value) -> Option<Place> {
    match &body {
        serde_json::Value::Object(map) if !map.contains_key("error") => Some(Place(body)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_member_means_no_result() {
        assert_eq!(interpret_response(json!({ "error": "Unable to geocode" })), None);
        assert_eq!(interpret_response(json!(null)), None);
        assert_eq!(interpret_response(json!([])), None);
    }

    #[test]
    fn place_is_passed_through() {
        let body = json!({
            "place_id": 1234,
            "display_name": "Ocean View, Sussex County, Delaware, United States",
            "address": { "country_code": "us" }
        });
        assert_eq!(interpret_response(body.clone()), Some(Place(body)));
    }

    #[test]
    fn base_url_is_normalised() {
        let client = NominatimClient::new(
            "https://nominatim.example.org/",
            "iss_tracker",
            "en",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.reverse_url(), "https://nominatim.example.org/reverse");
    }
}
