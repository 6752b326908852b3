use common::Money;
use serde::{Deserialize, Serialize};

/// A product as listed by the catalog.
///
/// Field names on the wire follow the storefront's `productos` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id_producto")]
    pub id: i64,
    #[serde(rename = "nom_producto")]
    pub name: String,
    #[serde(rename = "pre_producto")]
    pub price: Money,
    #[serde(rename = "cat_producto")]
    pub category: Option<String>,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
}

impl Product {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: Some(category.into()),
            image: Some(image.into()),
        }
    }
}

/// The sample products served when no database is available.
pub fn mock_products() -> Vec<Product> {
    vec![
        Product::new(
            1,
            "Televisor 50\"",
            Money::from_units(1_499_000),
            "Electrodomésticos",
            "/uploads/tv.jpg",
        ),
        Product::new(
            2,
            "Cafetera",
            Money::from_units(189_000),
            "Hogar",
            "/uploads/cafetera.jpg",
        ),
        Product::new(
            3,
            "Camiseta básica",
            Money::from_units(35_000),
            "Ropa",
            "/uploads/shirt.jpg",
        ),
        Product::new(
            4,
            "Pizza familiar",
            Money::from_units(45_000),
            "Comida",
            "/uploads/pizza.jpg",
        ),
    ]
}
