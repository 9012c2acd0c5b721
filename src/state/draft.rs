// ============================================================================
// PRODUCT DRAFT - Copia de trabajo del producto en el formulario del modal
// ============================================================================

use crate::config::MAX_IMAGES;
use crate::models::{Product, ProductPayload};

/// Campos de texto editables del formulario
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    ImageUrl,
    Title,
    Category,
    Tags,
    Unit,
    OriginPrice,
    Price,
    Description,
    Content,
}

impl DraftField {
    /// id del input en el DOM (coincide con el nombre del campo en la API)
    pub fn input_id(self) -> &'static str {
        match self {
            DraftField::ImageUrl => "imageUrl",
            DraftField::Title => "title",
            DraftField::Category => "category",
            DraftField::Tags => "tags",
            DraftField::Unit => "unit",
            DraftField::OriginPrice => "origin_price",
            DraftField::Price => "price",
            DraftField::Description => "description",
            DraftField::Content => "content",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProductDraft {
    pub id: String,
    pub image_url: String,
    pub title: String,
    pub category: String,
    /// Tags como texto separado por comas
    pub tags: String,
    pub unit: String,
    /// Precios tal cual se escriben en el input
    pub origin_price: String,
    pub price: String,
    pub description: String,
    pub content: String,
    pub is_enabled: bool,
    pub images_url: Vec<String>,
}

impl ProductDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Poblar desde un producto existente (modal de edición)
    pub fn from_product(product: &Product) -> Self {
        let mut images_url: Vec<String> = product.images_url.clone();
        images_url.truncate(MAX_IMAGES);

        Self {
            id: product.id.clone(),
            image_url: product.image_url.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            tags: product.tags.join(", "),
            unit: product.unit.clone(),
            origin_price: format_price(product.origin_price),
            price: format_price(product.price),
            description: product.description.clone(),
            content: product.content.clone(),
            is_enabled: product.is_enabled,
            images_url,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::ImageUrl => &self.image_url,
            DraftField::Title => &self.title,
            DraftField::Category => &self.category,
            DraftField::Tags => &self.tags,
            DraftField::Unit => &self.unit,
            DraftField::OriginPrice => &self.origin_price,
            DraftField::Price => &self.price,
            DraftField::Description => &self.description,
            DraftField::Content => &self.content,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::ImageUrl => self.image_url = value,
            DraftField::Title => self.title = value,
            DraftField::Category => self.category = value,
            DraftField::Tags => self.tags = value,
            DraftField::Unit => self.unit = value,
            DraftField::OriginPrice => self.origin_price = value,
            DraftField::Price => self.price = value,
            DraftField::Description => self.description = value,
            DraftField::Content => self.content = value,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
    }

    /// Editar el slot `index` de imágenes secundarias.
    ///
    /// La lista termina siempre como mucho en un slot vacío ("agregar otra")
    /// y nunca supera `MAX_IMAGES`. Devuelve `true` si cambió la cantidad de slots.
    pub fn set_image(&mut self, index: usize, value: impl Into<String>) -> bool {
        if index >= self.images_url.len() {
            return false;
        }
        let value = value.into();
        let before = self.images_url.len();
        let is_last = index == before - 1;
        let filled = !value.is_empty();
        self.images_url[index] = value;

        if is_last {
            if filled && before < MAX_IMAGES {
                self.images_url.push(String::new());
            } else if !filled && before > 1 {
                self.images_url.pop();
            }
        }
        self.collapse_trailing_blanks();

        self.images_url.len() != before
    }

    /// Botón "新增圖片": agrega un slot vacío si hay lugar y no hay ya uno al final
    pub fn add_image_slot(&mut self) -> bool {
        if !self.can_add_image_slot() {
            return false;
        }
        self.images_url.push(String::new());
        true
    }

    pub fn can_add_image_slot(&self) -> bool {
        let ends_blank = self.images_url.last().map(|s| s.is_empty()).unwrap_or(false);
        self.images_url.len() < MAX_IMAGES && !ends_blank
    }

    /// Botón "刪除最後一張圖片"
    pub fn remove_last_image(&mut self) -> bool {
        self.images_url.pop().is_some()
    }

    fn collapse_trailing_blanks(&mut self) {
        while self.images_url.len() >= 2
            && self.images_url[self.images_url.len() - 1].is_empty()
            && self.images_url[self.images_url.len() - 2].is_empty()
        {
            self.images_url.pop();
        }
    }

    /// Tags normalizados: split por coma, trim, sin vacíos
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Normalizar para enviar a la API
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            id: self.id.clone(),
            image_url: self.image_url.trim().to_string(),
            title: self.title.clone(),
            category: self.category.clone(),
            tags: self.tag_list(),
            unit: self.unit.clone(),
            origin_price: coerce_number(&self.origin_price),
            price: coerce_number(&self.price),
            description: self.description.clone(),
            content: self.content.clone(),
            is_enabled: u8::from(self.is_enabled),
            images_url: self
                .images_url
                .iter()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Precio para el input: `300` en vez de `300.0`, vacío si es cero
fn format_price(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Coerción numérica del input: vacío o inválido = 0
fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            log::warn!("⚠️ [DRAFT] Valor numérico inválido '{}', se envía 0", raw);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            image_url: "https://img/main.jpg".to_string(),
            title: "小王子".to_string(),
            category: "童書".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            unit: "本".to_string(),
            origin_price: 300.0,
            price: 249.5,
            description: "desc".to_string(),
            content: "content".to_string(),
            is_enabled: true,
            images_url: vec!["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()],
        }
    }

    fn images(draft: &ProductDraft) -> Vec<&str> {
        draft.images_url.iter().map(String::as_str).collect()
    }

    fn assert_image_invariant(draft: &ProductDraft) {
        let list = &draft.images_url;
        assert!(list.len() <= MAX_IMAGES, "más de {} imágenes: {:?}", MAX_IMAGES, list);
        if list.len() >= 2 {
            let blanks_at_end = list.iter().rev().take_while(|s| s.is_empty()).count();
            assert!(blanks_at_end <= 1, "más de un vacío al final: {:?}", list);
        }
    }

    #[test]
    fn test_from_product_flattens_tags() {
        let draft = ProductDraft::from_product(&product());
        assert_eq!(draft.tags, "a, b");
        assert_eq!(draft.origin_price, "300");
        assert_eq!(draft.price, "249.5");
        assert!(draft.is_enabled);
    }

    #[test]
    fn test_from_default_product_is_blank() {
        let draft = ProductDraft::from_product(&Product::default());
        assert_eq!(draft, ProductDraft::blank());
    }

    #[test]
    fn test_roundtrip_without_edits() {
        let p = product();
        let payload = ProductDraft::from_product(&p).to_payload();
        assert_eq!(payload.id, p.id);
        assert_eq!(payload.title, p.title);
        assert_eq!(payload.tags, p.tags);
        assert_eq!(payload.origin_price, p.origin_price);
        assert_eq!(payload.price, p.price);
        assert_eq!(payload.is_enabled, 1);
        assert_eq!(payload.images_url, p.images_url);
        assert_eq!(payload.image_url, p.image_url);
    }

    #[test]
    fn test_tag_string_normalization() {
        let mut draft = ProductDraft::blank();
        draft.set(DraftField::Tags, " 經典 ,翻譯,, ");
        assert_eq!(draft.tag_list(), vec!["經典", "翻譯"]);
        draft.set(DraftField::Tags, "");
        assert!(draft.tag_list().is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        let mut draft = ProductDraft::blank();
        draft.set(DraftField::OriginPrice, " 120 ");
        draft.set(DraftField::Price, "abc");
        let payload = draft.to_payload();
        assert_eq!(payload.origin_price, 120.0);
        assert_eq!(payload.price, 0.0);
        assert_eq!(payload.is_enabled, 0);
    }

    #[test]
    fn test_field_setter_and_getter() {
        let mut draft = ProductDraft::blank();
        draft.set(DraftField::Unit, "套");
        draft.set_enabled(true);
        assert_eq!(draft.get(DraftField::Unit), "套");
        assert_eq!(DraftField::OriginPrice.input_id(), "origin_price");
        assert!(draft.is_enabled);
    }

    #[test]
    fn test_editing_last_slot_appends_blank() {
        let mut draft = ProductDraft::blank();
        assert!(draft.add_image_slot());
        assert!(draft.set_image(0, "u1"));
        assert_eq!(images(&draft), vec!["u1", ""]);
        assert!(draft.set_image(1, "u2"));
        assert_eq!(images(&draft), vec!["u1", "u2", ""]);
        // Editar un slot intermedio no agrega
        assert!(!draft.set_image(0, "u1b"));
        assert_eq!(images(&draft), vec!["u1b", "u2", ""]);
    }

    #[test]
    fn test_cap_at_five() {
        let mut draft = ProductDraft::blank();
        draft.add_image_slot();
        for i in 0..MAX_IMAGES {
            draft.set_image(i, format!("u{}", i));
            assert_image_invariant(&draft);
        }
        assert_eq!(draft.images_url.len(), MAX_IMAGES);
        assert!(draft.images_url.iter().all(|s| !s.is_empty()));
        assert!(!draft.add_image_slot());
    }

    #[test]
    fn test_clearing_last_slot_prunes() {
        let mut draft = ProductDraft::from_product(&product());
        assert_eq!(images(&draft), vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert!(draft.set_image(1, ""));
        assert_eq!(images(&draft), vec!["https://img/1.jpg"]);
        // El único slot vacío se conserva
        draft.set_image(0, "");
        assert_eq!(images(&draft), vec![""]);
    }

    #[test]
    fn test_clearing_middle_slot_collapses_trailing_blanks() {
        let mut draft = ProductDraft::blank();
        draft.add_image_slot();
        draft.set_image(0, "u1");
        draft.set_image(1, "u2");
        assert_eq!(images(&draft), vec!["u1", "u2", ""]);
        draft.set_image(1, "");
        assert_eq!(images(&draft), vec!["u1", ""]);
        assert_image_invariant(&draft);
    }

    #[test]
    fn test_out_of_range_edit_is_ignored() {
        let mut draft = ProductDraft::blank();
        assert!(!draft.set_image(0, "u"));
        assert!(draft.images_url.is_empty());
    }

    #[test]
    fn test_add_and_remove_buttons() {
        let mut draft = ProductDraft::blank();
        assert!(draft.add_image_slot());
        // Ya termina en vacío
        assert!(!draft.add_image_slot());
        assert!(draft.remove_last_image());
        assert!(!draft.remove_last_image());
    }

    #[test]
    fn test_payload_drops_blank_images() {
        let mut draft = ProductDraft::blank();
        draft.add_image_slot();
        draft.set_image(0, "u1");
        assert_eq!(draft.to_payload().images_url, vec!["u1"]);
    }

    #[test]
    fn test_invariant_under_mixed_edits() {
        let mut draft = ProductDraft::blank();
        draft.add_image_slot();
        let edits: &[(usize, &str)] = &[
            (0, "a"), (1, "b"), (2, "c"), (1, ""), (0, ""), (1, "x"),
            (2, "y"), (3, "z"), (4, "w"), (4, ""), (3, ""), (0, "q"),
        ];
        for (index, value) in edits {
            draft.set_image(*index, *value);
            assert_image_invariant(&draft);
        }
    }
}
