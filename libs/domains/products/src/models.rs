use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Product entity - one row of the `products` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    /// Opaque server-generated identifier
    #[schema(example = "0b9e6c9e-4a53-4a8e-9d0c-3f1f8f3c2a10")]
    pub id: String,
    /// Human-readable label, never blank
    #[schema(example = "Coffee")]
    pub name: String,
    /// Price in the smallest currency unit, always positive
    #[schema(example = 499)]
    pub price: i64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Coffee")]
    pub name: String,
    #[validate(range(min = 1, message = "price must be positive"))]
    #[schema(example = 499)]
    pub price: i64,
}

/// DTO for replacing a product's fields
///
/// `id` is optional; when present and non-empty it must match the path id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: i64,
}

/// DTO for a partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatchProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: Option<i64>,
}

impl PatchProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// Overlay present fields onto `current`
    pub fn apply_to(&self, current: &Product) -> Product {
        Product {
            id: current.id.clone(),
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .map(str::to_string)
                .unwrap_or_else(|| current.name.clone()),
            price: self.price.unwrap_or(current.price),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("name must not be empty".into());
        return Err(err);
    }
    Ok(())
}
