use serde::{Deserialize, Serialize};

/// Produto visto, como fica persistido no slot.
///
/// `viewed_at` é sempre atribuído pelo store no momento do registro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    // Slots antigos usam `_id`
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub viewed_at: i64,
}

/// Entrada de `record`: um `ProductView` sem timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub rating: Option<f64>,
    pub discount: Option<f64>,
}

impl NewProductView {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            price,
            rating: None,
            discount: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    pub(crate) fn stamp(self, viewed_at: i64) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name,
            image: self.image,
            price: self.price,
            rating: self.rating,
            discount: self.discount,
            viewed_at,
        }
    }
}

impl ProductView {
    /// Preço como aparece no card do carrossel.
    pub fn price_label(&self) -> String {
        format!("₹{}", self.price)
    }

    /// Selo de desconto; ausente quando não há desconto (ou é zero).
    pub fn discount_badge(&self) -> Option<String> {
        self.discount
            .filter(|d| *d != 0.0)
            .map(|d| format!("{d}% OFF"))
    }

    pub fn rating_label(&self) -> Option<String> {
        self.rating.filter(|r| *r != 0.0).map(|r| format!("⭐ {r}"))
    }
}
