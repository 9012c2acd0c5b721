// ============================================================================
// PRODUCT LIST STATE - Página actual de productos + paginación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Pagination, Product};

/// Página de productos; se reemplaza entera para que la vista nunca vea un estado a medias
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct ProductListState {
    pub page: Rc<RefCell<ProductPage>>,
    pub loading: Rc<RefCell<bool>>,
}

impl ProductListState {
    pub fn new() -> Self {
        Self {
            page: Rc::new(RefCell::new(ProductPage::default())),
            loading: Rc::new(RefCell::new(false)),
        }
    }

    /// Reemplazo atómico de productos y paginación
    pub fn replace(&self, page: ProductPage) {
        *self.page.borrow_mut() = page;
    }

    pub fn clear(&self) {
        self.replace(ProductPage::default());
    }

    pub fn snapshot(&self) -> ProductPage {
        self.page.borrow().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.page.borrow().products.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.page.borrow().pagination.clone()
    }

    /// Página actual; 1 si todavía no se cargó nada
    pub fn current_page(&self) -> u32 {
        self.page.borrow().pagination.current_page.max(1)
    }

    pub fn can_go_to(&self, page: u32) -> bool {
        self.page.borrow().pagination.contains(page)
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }
}

impl Default for ProductListState {
    fn default() -> Self {
        Self::new()
    }
}
