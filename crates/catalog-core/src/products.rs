use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

fn default_currency() -> String {
    "COP".to_string()
}

/// A catalog listing as stored in the dataset file and returned by the
/// detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<ProductCategory>,
    /// Must be strictly positive.
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<i32>,
    /// ISO 4217 code; listings without one are priced in Colombian pesos.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Free-form condition label, e.g. `"new"` or `"used"`.
    pub condition: String,
    pub available_quantity: i64,
    pub sold_quantity: i64,
    /// Average review score in `[0, 5]`.
    pub rating: f64,
    pub reviews_count: i64,
    /// Gallery in display order; the first entry is the listing thumbnail.
    pub images: Vec<ProductImage>,
    pub description: String,
    pub features: Vec<ProductFeature>,
    pub payment_methods: Vec<PaymentMethod>,
    pub seller: Seller,
    /// Shipping details are passed through untouched.
    pub shipping: serde_json::Value,
    #[serde(default)]
    pub warranty: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// URL of the first gallery image, or an empty string when the product
    /// has no images.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        self.images.first().map_or("", |img| img.url.as_str())
    }

    /// Case-insensitive substring match against the title or the description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Checks the value invariants a listing must satisfy to be served.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason for the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(format!("price must be greater than 0, got {}", self.price));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!("rating must be within [0, 5], got {}", self.rating));
        }
        if !(0.0..=5.0).contains(&self.seller.rating) {
            return Err(format!(
                "seller rating must be within [0, 5], got {}",
                self.seller.rating
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub main: String,
    pub sub: String,
    pub brand: String,
    pub series: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeature {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub logo: String,
    #[serde(default)]
    pub installments: Option<i32>,
}

/// Seller profile embedded in every product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    /// Reputation tier label, e.g. `"platinum"`.
    pub reputation: String,
    pub rating: f64,
    pub sales_count: i64,
    pub location: String,
    #[serde(rename = "is_mercado_lider", default)]
    pub is_top_seller: bool,
}

/// Reduced projection of a [`Product`] used by list and related responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub condition: String,
    pub thumbnail: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub seller_name: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            currency: product.currency.clone(),
            condition: product.condition.clone(),
            thumbnail: product.thumbnail().to_string(),
            rating: product.rating,
            reviews_count: product.reviews_count,
            seller_name: product.seller.name.clone(),
        }
    }
}

/// A dataset timestamp: either RFC 3339 or a naive ISO 8601 local time,
/// which is read as UTC.
///
/// The text it was read from is kept and written back unchanged, so a record
/// is served in the same form it has in the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    raw: String,
}

impl Timestamp {
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` is neither RFC 3339 nor a
    /// naive `%Y-%m-%dT%H:%M:%S%.f` timestamp.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let instant = match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|e| format!("invalid timestamp '{raw}': {e}"))?,
        };
        Ok(Self {
            instant,
            raw: raw.to_string(),
        })
    }

    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            raw: instant.to_rfc3339(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
