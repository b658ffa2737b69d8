use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "UPPERCASE")]
pub enum InventoryStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl InventoryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "In stock",
            InventoryStatus::LowStock => "Low stock",
            InventoryStatus::OutOfStock => "Out of stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub internal_reference: Option<String>,
    #[serde(default)]
    pub shell_id: Option<i64>,
    #[serde(default)]
    pub inventory_status: Option<InventoryStatus>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Product {
    pub fn status_display(&self) -> &'static str {
        self.inventory_status
            .as_ref()
            .map(InventoryStatus::label)
            .unwrap_or("Unknown")
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.inventory_status, Some(InventoryStatus::OutOfStock))
            && self.quantity.map(|q| q > 0).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_product() {
        let json = r#"{"id":1000,"code":"f230fh0g3","name":"Bamboo Watch","description":"Product Description","image":"bamboo-watch.jpg","category":"Accessories","price":65.0,"quantity":24,"internalReference":"REF-123-456","shellId":15,"inventoryStatus":"INSTOCK","rating":5.0}"#;

        let product: Product = serde_json::from_str(json).expect("Failed to parse product JSON");
        assert_eq!(product.id, 1000);
        assert_eq!(product.name, "Bamboo Watch");
        assert_eq!(product.internal_reference.as_deref(), Some("REF-123-456"));
        assert_eq!(product.shell_id, Some(15));
        assert_eq!(product.inventory_status, Some(InventoryStatus::InStock));
        assert_eq!(product.status_display(), "In stock");
        assert!(product.is_available());
    }

    #[test]
    fn test_parse_sparse_product() {
        let json = r#"{"id":7,"code":"c","name":"n","price":1.5,"description":null,"inventoryStatus":"OUTOFSTOCK"}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.rating, None);
        assert_eq!(product.inventory_status, Some(InventoryStatus::OutOfStock));
        assert!(!product.is_available());
    }

    #[test]
    fn test_inventory_status_wire_names() {
        assert_eq!(serde_json::to_string(&InventoryStatus::LowStock).unwrap(), "\"LOWSTOCK\"");
        assert!(serde_json::from_str::<InventoryStatus>("\"LOW_STOCK\"").is_err());
    }

    #[test]
    fn test_unknown_status_display() {
        let json = r#"{"id":7,"code":"c","name":"n","price":1.5,"quantity":0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.status_display(), "Unknown");
        assert!(!product.is_available());
    }
}
