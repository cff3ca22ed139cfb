use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::TrajectoryError;

/// A numeric OEM field: textual payload plus its `units` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(rename = "@units", default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(rename(serialize = "#text", deserialize = "$text"), default)]
    pub text: String,
}

impl Quantity {
    #[cfg(test)]
    pub fn new(value: f64, units: &str) -> Self {
        Quantity {
            units: Some(units.to_string()),
            text: value.to_string(),
        }
    }
}

/// One trajectory sample as delivered by the feed.
///
/// Numeric fields stay textual until they are read, so a single bad record
/// only fails the requests that touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StateVector {
    #[serde(rename = "EPOCH")]
    pub epoch: String,
    #[serde(rename = "X", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub x: Option<Quantity>,
    #[serde(rename = "Y", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub y: Option<Quantity>,
    #[serde(rename = "Z", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub z: Option<Quantity>,
    #[serde(rename = "X_DOT", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub x_dot: Option<Quantity>,
    #[serde(rename = "Y_DOT", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub y_dot: Option<Quantity>,
    #[serde(rename = "Z_DOT", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub z_dot: Option<Quantity>,
}

impl StateVector {
    #[cfg(test)]
    pub fn new(epoch: &str, position_km: [f64; 3], velocity_km_s: [f64; 3]) -> Self {
        StateVector {
            epoch: epoch.to_string(),
            x: Some(Quantity::new(position_km[0], "km")),
            y: Some(Quantity::new(position_km[1], "km")),
            z: Some(Quantity::new(position_km[2], "km")),
            x_dot: Some(Quantity::new(velocity_km_s[0], "km/s")),
            y_dot: Some(Quantity::new(velocity_km_s[1], "km/s")),
            z_dot: Some(Quantity::new(velocity_km_s[2], "km/s")),
        }
    }

    /// Position in km.
    pub fn position(&self) -> Result<[f64; 3], TrajectoryError> {
        Ok([
            self.component("X", &self.x)?,
            self.component("Y", &self.y)?,
            self.component("Z", &self.z)?,
        ])
    }

    /// Velocity in km/s.
    pub fn velocity(&self) -> Result<[f64; 3], TrajectoryError> {
        Ok([
            self.component("X_DOT", &self.x_dot)?,
            self.component("Y_DOT", &self.y_dot)?,
            self.component("Z_DOT", &self.z_dot)?,
        ])
    }

    fn component(
        &self,
        field: &'static str,
        quantity: &Option<Quantity>,
    ) -> Result<f64, TrajectoryError> {
        let quantity = quantity
            .as_ref()
            .ok_or_else(|| TrajectoryError::malformed(&self.epoch, field, "is missing"))?;

        let value: f64 = quantity.text.trim().parse().map_err(|_| {
            TrajectoryError::malformed(
                &self.epoch,
                field,
                format!("is not numeric: {:?}", quantity.text),
            )
        })?;

        if !value.is_finite() {
            return Err(TrajectoryError::malformed(
                &self.epoch,
                field,
                format!("is not finite: {:?}", quantity.text),
            ));
        }

        Ok(value)
    }
}
