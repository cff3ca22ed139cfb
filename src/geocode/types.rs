use serde::Serialize;
use utoipa::ToSchema;

/// Raw geocoder answer, passed through to clients untouched.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Place(pub serde_json::Value);
