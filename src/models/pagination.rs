use serde::{Deserialize, Serialize};

use super::product::Product;

/// Metadatos de paginación, derivados por completo de la respuesta del servidor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
    pub has_pre: bool,
    pub has_next: bool,
    pub category: String,
}

impl Pagination {
    /// `1 <= page <= total_pages`
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn previous(&self) -> Option<u32> {
        if self.has_pre && self.current_page > 1 {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    pub fn next(&self) -> Option<u32> {
        if self.has_next && self.current_page < self.total_pages {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

/// Respuesta de `GET /api/{path}/admin/products?page=N`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(current: u32, total: u32) -> Pagination {
        Pagination {
            total_pages: total,
            current_page: current,
            has_pre: current > 1,
            has_next: current < total,
            category: String::new(),
        }
    }

    #[test]
    fn test_contains_bounds() {
        let p = pagination(1, 3);
        assert!(!p.contains(0));
        assert!(p.contains(1));
        assert!(p.contains(3));
        assert!(!p.contains(4));
        assert!(!Pagination::default().contains(1));
    }

    #[test]
    fn test_previous_next() {
        assert_eq!(pagination(1, 3).previous(), None);
        assert_eq!(pagination(1, 3).next(), Some(2));
        assert_eq!(pagination(3, 3).next(), None);
        assert_eq!(pagination(3, 3).previous(), Some(2));
    }

    #[test]
    fn test_products_response_tolerates_missing_fields() {
        let response: ProductsResponse =
            serde_json::from_str(r#"{"success": true, "products": []}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.pagination, Pagination::default());
    }
}
