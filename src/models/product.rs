use serde::{Deserialize, Deserializer, Serialize};

/// Producto tal como lo devuelve la API (`/admin/products`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub unit: String,
    pub origin_price: f64,
    pub price: f64,
    pub description: String,
    pub content: String,
    #[serde(deserialize_with = "bool_from_int_or_bool")]
    pub is_enabled: bool,
    #[serde(rename = "imagesUrl")]
    pub images_url: Vec<String>,
}

/// Cuerpo normalizado que se envía en POST/PUT (`{ data: ProductPayload }`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub unit: String,
    pub origin_price: f64,
    pub price: f64,
    pub description: String,
    pub content: String,
    /// 1 = habilitado, 0 = deshabilitado
    pub is_enabled: u8,
    #[serde(rename = "imagesUrl")]
    pub images_url: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductEnvelope<'a> {
    pub data: &'a ProductPayload,
}

/// La API devuelve `is_enabled` como 0/1, aunque a veces llega como booleano
fn bool_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
        Flag::Float(f) => f != 0.0,
        Flag::Null(()) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_product() {
        let json = r#"{
            "id": "-Nabc",
            "title": "小王子",
            "category": "童書",
            "origin_price": 300,
            "price": 250,
            "unit": "本",
            "is_enabled": 1,
            "imageUrl": "https://img/main.jpg",
            "imagesUrl": ["https://img/1.jpg"],
            "tags": ["經典", "翻譯"],
            "num": 1
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "-Nabc");
        assert_eq!(product.price, 250.0);
        assert!(product.is_enabled);
        assert_eq!(product.images_url, vec!["https://img/1.jpg"]);
        assert_eq!(product.tags, vec!["經典", "翻譯"]);
        // Campos ausentes quedan vacíos
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_is_enabled_accepts_bool_and_null() {
        let enabled: Product = serde_json::from_str(r#"{"is_enabled": true}"#).unwrap();
        assert!(enabled.is_enabled);
        let disabled: Product = serde_json::from_str(r#"{"is_enabled": 0}"#).unwrap();
        assert!(!disabled.is_enabled);
        let null: Product = serde_json::from_str(r#"{"is_enabled": null}"#).unwrap();
        assert!(!null.is_enabled);
    }

    #[test]
    fn test_payload_wire_names() {
        let payload = ProductPayload {
            id: String::new(),
            image_url: "main.jpg".to_string(),
            title: "t".to_string(),
            category: "c".to_string(),
            tags: vec!["a".to_string()],
            unit: "本".to_string(),
            origin_price: 100.0,
            price: 80.0,
            description: String::new(),
            content: String::new(),
            is_enabled: 1,
            images_url: vec![],
        };
        let value = serde_json::to_value(ProductEnvelope { data: &payload }).unwrap();
        let data = &value["data"];
        assert!(data.get("id").is_none());
        assert_eq!(data["imageUrl"], "main.jpg");
        assert_eq!(data["is_enabled"], 1);
        assert_eq!(data["imagesUrl"], serde_json::json!([]));
    }
}
