//! Product Edit Form
//!
//! The two custom shipping inputs shown in the product's shipping panel, and
//! the handling of their submitted values.

use askama::Template;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    extensions::{ProductPanelHook, ProductSaveHook},
    metadata::{MetadataStore, PRICE_META_KEY, TIME_META_KEY},
    products::ProductKey,
    sanitize::sanitize_text_field,
};

/// Input control type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// Decimal number input
    Number,

    /// Free text input
    Text,
}

impl InputType {
    /// HTML `type` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Number => "number",
            InputType::Text => "text",
        }
    }
}

/// Descriptor of one product edit form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field id; also the metadata key the value is stored under
    pub id: &'static str,

    /// Field label
    pub label: &'static str,

    /// Help text
    pub description: &'static str,

    /// Input control type
    pub input_type: InputType,

    /// Extra HTML attributes
    pub attributes: &'static [(&'static str, &'static str)],
}

/// Custom shipping price field.
pub const PRICE_FIELD: FieldDescriptor = FieldDescriptor {
    id: PRICE_META_KEY,
    label: "Custom Shipping Price",
    description: "Set a custom shipping cost for this product.",
    input_type: InputType::Number,
    attributes: &[("step", "0.01"), ("min", "0")],
};

/// Custom shipping time field.
pub const TIME_FIELD: FieldDescriptor = FieldDescriptor {
    id: TIME_META_KEY,
    label: "Custom Shipping Time",
    description: r#"Set a custom shipping time for this product (e.g. "2-3 days")."#,
    input_type: InputType::Text,
    attributes: &[],
};

/// Fields rendered in the shipping panel, in display order.
pub const SHIPPING_FIELDS: [FieldDescriptor; 2] = [PRICE_FIELD, TIME_FIELD];

/// Values submitted with a product edit form, keyed by field id.
///
/// A field missing from the submission was not posted at all, which is
/// different from a field posted empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFormSubmission {
    fields: FxHashMap<String, String>,
}

impl ProductFormSubmission {
    /// Create an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a submitted field value.
    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }

    /// Raw submitted value of a field.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }
}

/// Write the submitted shipping fields to the metadata store.
///
/// Each posted field is sanitised and stored as-is, even when empty or
/// non-numeric; fields that were not posted leave the stored value untouched.
pub fn save_shipping_fields(
    store: &mut dyn MetadataStore,
    product: ProductKey,
    submission: &ProductFormSubmission,
) {
    for field in SHIPPING_FIELDS {
        let Some(raw) = submission.get(field.id) else {
            continue;
        };

        let value = sanitize_text_field(raw);

        debug!(?product, field = field.id, %value, "saving product shipping field");

        store.set(product, field.id, value);
    }
}

struct FieldView<'a> {
    id: &'a str,
    label: &'a str,
    description: &'a str,
    input_type: &'a str,
    value: &'a str,
    attributes: &'a [(&'a str, &'a str)],
}

#[derive(Template)]
#[template(path = "product_shipping_fields.html")]
struct ShippingFieldsTemplate<'a> {
    fields: Vec<FieldView<'a>>,
}

/// Render the shipping panel inputs for a product, pre-filled with its stored values.
///
/// # Errors
///
/// Returns an [`askama::Error`] if the template fails to render.
pub fn render_shipping_fields(
    store: &dyn MetadataStore,
    product: ProductKey,
) -> Result<String, askama::Error> {
    let fields = SHIPPING_FIELDS
        .iter()
        .map(|field| FieldView {
            id: field.id,
            label: field.label,
            description: field.description,
            input_type: field.input_type.as_str(),
            value: store.get(product, field.id).unwrap_or_default(),
            attributes: field.attributes,
        })
        .collect();

    ShippingFieldsTemplate { fields }.render()
}

/// [`ProductPanelHook`] rendering the custom shipping inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingFieldsPanel;

impl ProductPanelHook for ShippingFieldsPanel {
    fn render(
        &self,
        store: &dyn MetadataStore,
        product: ProductKey,
    ) -> Result<String, askama::Error> {
        render_shipping_fields(store, product)
    }
}

/// [`ProductSaveHook`] persisting the custom shipping inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingFieldsSaver;

impl ProductSaveHook for ShippingFieldsSaver {
    fn save(
        &self,
        store: &mut dyn MetadataStore,
        product: ProductKey,
        submission: &ProductFormSubmission,
    ) {
        save_shipping_fields(store, product, submission);
    }
}
