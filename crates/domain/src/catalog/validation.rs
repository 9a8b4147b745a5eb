//! Command validators.
//!
//! Validators look at raw command input, before any entity exists, and
//! report every broken rule into the caller's [`Notifications`]. They never
//! stop at the first failure.

use crate::notification::Notifications;

use super::{AddProduct, ProductInput, UpdateProduct};

/// Rules for adding a product.
pub struct AddProductValidation;

impl AddProductValidation {
    pub const CATEGORY_ID_MSG: &'static str = "O Id da categoria do produto não foi informado";
    pub const NAME_MSG: &'static str = "O nome do produto não foi informado";
    pub const VALUE_MSG: &'static str = "O valor do produto precisa ser maior que 0";
    pub const IMAGE_MSG: &'static str = "Imagem é obrigatório";
    pub const DESCRIPTION_MSG: &'static str = "Descrição é obrigatório";

    pub fn validate(command: &AddProduct, notifications: &mut Notifications) {
        validate_input(&command.input, notifications);
    }
}

/// Rules for updating a product. The field rules match
/// [`AddProductValidation`]; the target id is resolved by lookup first.
pub struct UpdateProductValidation;

impl UpdateProductValidation {
    pub fn validate(command: &UpdateProduct, notifications: &mut Notifications) {
        validate_input(&command.input, notifications);
    }
}

fn validate_input(input: &ProductInput, notifications: &mut Notifications) {
    if input.category_id.is_nil() {
        notifications.notify("category_id", AddProductValidation::CATEGORY_ID_MSG);
    }
    if input.name.trim().is_empty() {
        notifications.notify("name", AddProductValidation::NAME_MSG);
    }
    if !input.value.is_positive() {
        notifications.notify("value", AddProductValidation::VALUE_MSG);
    }
    if input.image.trim().is_empty() {
        notifications.notify("image", AddProductValidation::IMAGE_MSG);
    }
    if input.description.trim().is_empty() {
        notifications.notify("description", AddProductValidation::DESCRIPTION_MSG);
    }
}
