//! Database Models
//!
//! One module per persisted table, each with the entity struct plus its
//! Create/Update DTOs. Update DTOs carry every field as an `Option` and
//! are merged into the stored record, so a patch only touches the fields
//! it names.

pub mod serde_helpers;

pub mod category;
pub mod item;
pub mod item_modifier_link;
pub mod modifier;
pub mod modifier_group;
pub mod variant;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use item::{Item, ItemCreate, ItemUpdate};
pub use item_modifier_link::{
    ItemModifierLink, ItemModifierLinkUpdate, effective_max_choices,
};
pub use modifier::{Modifier, ModifierCreate, ModifierUpdate};
pub use modifier_group::{
    ModifierGroup, ModifierGroupCreate, ModifierGroupUpdate, SelectionType,
};
pub use variant::{Variant, VariantCreate, VariantUpdate};
