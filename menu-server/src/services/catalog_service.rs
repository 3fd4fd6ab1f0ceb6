//! Catalog Service - catalog management with cached scope views
//!
//! One instance per server. Every read path serves the last-fetched view
//! of a scope; every successful mutation re-fetches its scope wholesale
//! and hands the fresh list back to the caller. Mutations go to the
//! database first, the view is replaced after.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Category, CategoryCreate, CategoryUpdate, Item, ItemCreate, ItemModifierLink,
    ItemModifierLinkUpdate, ItemUpdate, Modifier, ModifierCreate, ModifierGroup,
    ModifierGroupCreate, ModifierGroupUpdate, ModifierUpdate, Variant, VariantCreate,
    VariantUpdate,
};
use crate::db::repository::{
    CategoryRepository, ItemModifierLinkRepository, ItemRepository, ModifierGroupRepository,
    ModifierRepository, RepoError, RepoResult, VariantRepository, record_id, sort,
};

/// Catalog service over categories, items, variants, modifier groups,
/// modifiers and item-group links
#[derive(Clone)]
pub struct CatalogService {
    categories: CategoryRepository,
    items: ItemRepository,
    variants: VariantRepository,
    groups: ModifierGroupRepository,
    modifiers: ModifierRepository,
    links: ItemModifierLinkRepository,
    /// All categories, display order
    category_view: Arc<RwLock<Vec<Category>>>,
    /// Items keyed by category id, display order per scope
    item_views: Arc<RwLock<HashMap<String, Vec<Item>>>>,
    /// Variants keyed by item id
    variant_views: Arc<RwLock<HashMap<String, Vec<Variant>>>>,
    /// All modifier groups, display order
    group_view: Arc<RwLock<Vec<ModifierGroup>>>,
    /// Modifiers keyed by group id
    modifier_views: Arc<RwLock<HashMap<String, Vec<Modifier>>>>,
    /// Links keyed by item id, already projected
    link_views: Arc<RwLock<HashMap<String, Vec<ItemModifierLink>>>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("categories", &self.category_view.read().len())
            .field("modifier_groups", &self.group_view.read().len())
            .finish()
    }
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            items: ItemRepository::new(db.clone()),
            variants: VariantRepository::new(db.clone()),
            groups: ModifierGroupRepository::new(db.clone()),
            modifiers: ModifierRepository::new(db.clone()),
            links: ItemModifierLinkRepository::new(db),
            category_view: Arc::new(RwLock::new(Vec::new())),
            item_views: Arc::new(RwLock::new(HashMap::new())),
            variant_views: Arc::new(RwLock::new(HashMap::new())),
            group_view: Arc::new(RwLock::new(Vec::new())),
            modifier_views: Arc::new(RwLock::new(HashMap::new())),
            link_views: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Fetch all categories and replace the cached view
    pub async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let fetched = self.categories.find_all().await?;
        *self.category_view.write() = fetched.clone();
        Ok(fetched)
    }

    pub async fn create_category(&self, data: CategoryCreate) -> RepoResult<Vec<Category>> {
        self.categories.create(data).await?;
        self.list_categories().await
    }

    pub async fn update_category(
        &self,
        id: &str,
        data: CategoryUpdate,
    ) -> RepoResult<Vec<Category>> {
        let id = record_id("category", id);
        let current = self
            .categories
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        let data = data.prune(&current);
        if data.is_empty() {
            return self.list_categories().await;
        }

        self.categories.update(&id, data).await?;
        self.list_categories().await
    }

    pub async fn move_category(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<Category>> {
        let id = record_id("category", id);
        let view = {
            let cached = self.category_view.read();
            cached.clone()
        };
        let view = if view.is_empty() {
            self.list_categories().await?
        } else {
            view
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.categories.apply_swap(plan).await;
                let refreshed = self.list_categories().await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    /// Delete a category. An unconfirmed delete writes nothing and
    /// returns the current view.
    pub async fn delete_category(&self, id: &str, confirmed: bool) -> RepoResult<Vec<Category>> {
        if !confirmed {
            return self.list_categories().await;
        }
        let id = record_id("category", id);
        self.categories.delete(&id).await?;
        self.item_views.write().remove(&id.to_string());
        self.list_categories().await
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Fetch one category's items and replace that scope's cached view
    pub async fn list_items(&self, category_id: &str) -> RepoResult<Vec<Item>> {
        let category_id = record_id("category", category_id);
        self.refresh_items(&category_id).await
    }

    async fn refresh_items(&self, category_id: &RecordId) -> RepoResult<Vec<Item>> {
        let fetched = self.items.find_by_category(category_id).await?;
        self.item_views
            .write()
            .insert(category_id.to_string(), fetched.clone());
        Ok(fetched)
    }

    pub async fn create_item(&self, category_id: &str, data: ItemCreate) -> RepoResult<Vec<Item>> {
        let category_id = record_id("category", category_id);
        self.items.create(&category_id, data).await?;
        self.refresh_items(&category_id).await
    }

    pub async fn update_item(&self, id: &str, data: ItemUpdate) -> RepoResult<Vec<Item>> {
        let id = record_id("item", id);
        let current = self
            .items
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))?;
        let scope = current.category_id.clone();

        let data = data.prune(&current);
        if data.is_empty() {
            return self.refresh_items(&scope).await;
        }

        self.items.update(&id, data).await?;
        self.refresh_items(&scope).await
    }

    pub async fn move_item(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<Item>> {
        let id = record_id("item", id);
        let current = self
            .items
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))?;
        let scope = current.category_id.clone();

        let view = self.cached_items(&scope);
        let view = match view {
            Some(view) => view,
            None => self.refresh_items(&scope).await?,
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.items.apply_swap(plan).await;
                let refreshed = self.refresh_items(&scope).await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    /// Delete an item and its modifier-group links
    pub async fn delete_item(&self, id: &str, confirmed: bool) -> RepoResult<Vec<Item>> {
        let id = record_id("item", id);
        let current = self
            .items
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))?;
        let scope = current.category_id.clone();

        if !confirmed {
            return self.refresh_items(&scope).await;
        }

        self.items.delete(&id).await?;
        self.variant_views.write().remove(&id.to_string());
        self.link_views.write().remove(&id.to_string());
        self.refresh_items(&scope).await
    }

    fn cached_items(&self, category_id: &RecordId) -> Option<Vec<Item>> {
        self.item_views.read().get(&category_id.to_string()).cloned()
    }

    // =========================================================================
    // Variants
    // =========================================================================

    pub async fn list_variants(&self, item_id: &str) -> RepoResult<Vec<Variant>> {
        let item_id = record_id("item", item_id);
        self.refresh_variants(&item_id).await
    }

    async fn refresh_variants(&self, item_id: &RecordId) -> RepoResult<Vec<Variant>> {
        let fetched = self.variants.find_by_item(item_id).await?;
        self.variant_views
            .write()
            .insert(item_id.to_string(), fetched.clone());
        Ok(fetched)
    }

    pub async fn create_variant(
        &self,
        item_id: &str,
        data: VariantCreate,
    ) -> RepoResult<Vec<Variant>> {
        let item_id = record_id("item", item_id);
        self.variants.create(&item_id, data).await?;
        self.refresh_variants(&item_id).await
    }

    pub async fn update_variant(&self, id: &str, data: VariantUpdate) -> RepoResult<Vec<Variant>> {
        let id = record_id("variant", id);
        let current = self
            .variants
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Variant {} not found", id)))?;
        let scope = current.item_id.clone();

        let data = data.prune(&current);
        if data.is_empty() {
            return self.refresh_variants(&scope).await;
        }

        self.variants.update(&id, data).await?;
        self.refresh_variants(&scope).await
    }

    pub async fn move_variant(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<Variant>> {
        let id = record_id("variant", id);
        let current = self
            .variants
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Variant {} not found", id)))?;
        let scope = current.item_id.clone();

        let view = {
            let cached = self.variant_views.read();
            cached.get(&scope.to_string()).cloned()
        };
        let view = match view {
            Some(view) => view,
            None => self.refresh_variants(&scope).await?,
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.variants.apply_swap(plan).await;
                let refreshed = self.refresh_variants(&scope).await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    pub async fn delete_variant(&self, id: &str, confirmed: bool) -> RepoResult<Vec<Variant>> {
        let id = record_id("variant", id);
        let current = self
            .variants
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Variant {} not found", id)))?;
        let scope = current.item_id.clone();

        if !confirmed {
            return self.refresh_variants(&scope).await;
        }

        self.variants.delete(&id).await?;
        self.refresh_variants(&scope).await
    }

    // =========================================================================
    // Modifier groups
    // =========================================================================

    pub async fn list_groups(&self) -> RepoResult<Vec<ModifierGroup>> {
        let fetched = self.groups.find_all().await?;
        *self.group_view.write() = fetched.clone();
        Ok(fetched)
    }

    pub async fn create_group(&self, data: ModifierGroupCreate) -> RepoResult<Vec<ModifierGroup>> {
        self.groups.create(data).await?;
        self.list_groups().await
    }

    pub async fn update_group(
        &self,
        id: &str,
        data: ModifierGroupUpdate,
    ) -> RepoResult<Vec<ModifierGroup>> {
        let id = record_id("modifier_group", id);
        let current = self
            .groups
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier group {} not found", id)))?;

        let data = data.prune(&current);
        if data.is_empty() {
            return self.list_groups().await;
        }

        self.groups.update(&id, data).await?;
        // Link projections derive from the group's selection type; drop
        // the stale per-item views so the next read re-fetches them.
        self.link_views.write().clear();
        self.list_groups().await
    }

    pub async fn move_group(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<ModifierGroup>> {
        let id = record_id("modifier_group", id);
        let view = {
            let cached = self.group_view.read();
            cached.clone()
        };
        let view = if view.is_empty() {
            self.list_groups().await?
        } else {
            view
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.groups.apply_swap(plan).await;
                let refreshed = self.list_groups().await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    /// Delete a modifier group and every item link that references it.
    /// The group's modifiers are left in place.
    pub async fn delete_group(&self, id: &str, confirmed: bool) -> RepoResult<Vec<ModifierGroup>> {
        if !confirmed {
            return self.list_groups().await;
        }
        let id = record_id("modifier_group", id);
        self.groups.delete(&id).await?;
        self.modifier_views.write().remove(&id.to_string());
        self.link_views.write().clear();
        self.list_groups().await
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    pub async fn list_modifiers(&self, group_id: &str) -> RepoResult<Vec<Modifier>> {
        let group_id = record_id("modifier_group", group_id);
        self.refresh_modifiers(&group_id).await
    }

    async fn refresh_modifiers(&self, group_id: &RecordId) -> RepoResult<Vec<Modifier>> {
        let fetched = self.modifiers.find_by_group(group_id).await?;
        self.modifier_views
            .write()
            .insert(group_id.to_string(), fetched.clone());
        Ok(fetched)
    }

    pub async fn create_modifier(
        &self,
        group_id: &str,
        data: ModifierCreate,
    ) -> RepoResult<Vec<Modifier>> {
        let group_id = record_id("modifier_group", group_id);
        self.modifiers.create(&group_id, data).await?;
        self.refresh_modifiers(&group_id).await
    }

    pub async fn update_modifier(
        &self,
        id: &str,
        data: ModifierUpdate,
    ) -> RepoResult<Vec<Modifier>> {
        let id = record_id("modifier", id);
        let current = self
            .modifiers
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier {} not found", id)))?;
        let scope = current.group_id.clone();

        let data = data.prune(&current);
        if data.is_empty() {
            return self.refresh_modifiers(&scope).await;
        }

        self.modifiers.update(&id, data).await?;
        self.refresh_modifiers(&scope).await
    }

    pub async fn move_modifier(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<Modifier>> {
        let id = record_id("modifier", id);
        let current = self
            .modifiers
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier {} not found", id)))?;
        let scope = current.group_id.clone();

        let view = {
            let cached = self.modifier_views.read();
            cached.get(&scope.to_string()).cloned()
        };
        let view = match view {
            Some(view) => view,
            None => self.refresh_modifiers(&scope).await?,
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.modifiers.apply_swap(plan).await;
                let refreshed = self.refresh_modifiers(&scope).await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    pub async fn delete_modifier(&self, id: &str, confirmed: bool) -> RepoResult<Vec<Modifier>> {
        let id = record_id("modifier", id);
        let current = self
            .modifiers
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier {} not found", id)))?;
        let scope = current.group_id.clone();

        if !confirmed {
            return self.refresh_modifiers(&scope).await;
        }

        self.modifiers.delete(&id).await?;
        self.refresh_modifiers(&scope).await
    }

    // =========================================================================
    // Item ↔ ModifierGroup links
    // =========================================================================

    pub async fn list_links(&self, item_id: &str) -> RepoResult<Vec<ItemModifierLink>> {
        let item_id = record_id("item", item_id);
        self.refresh_links(&item_id).await
    }

    async fn refresh_links(&self, item_id: &RecordId) -> RepoResult<Vec<ItemModifierLink>> {
        let fetched = self.links.find_by_item(item_id).await?;
        self.link_views
            .write()
            .insert(item_id.to_string(), fetched.clone());
        Ok(fetched)
    }

    /// Link a modifier group to an item
    pub async fn link_group(
        &self,
        item_id: &str,
        group_id: &str,
    ) -> RepoResult<Vec<ItemModifierLink>> {
        let item_id = record_id("item", item_id);
        let group_id = record_id("modifier_group", group_id);
        self.links.create(&item_id, &group_id).await?;
        self.refresh_links(&item_id).await
    }

    pub async fn update_link(
        &self,
        id: &str,
        data: ItemModifierLinkUpdate,
    ) -> RepoResult<Vec<ItemModifierLink>> {
        let id = record_id("item_modifier_link", id);
        let current = self
            .links
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Link {} not found", id)))?;
        let scope = current.item_id.clone();

        let data = prune_link_update(data, &current);
        if link_update_is_empty(&data) {
            return self.refresh_links(&scope).await;
        }

        self.links.update(&id, data).await?;
        self.refresh_links(&scope).await
    }

    pub async fn move_link(
        &self,
        id: &str,
        direction: sort::MoveDirection,
    ) -> RepoResult<Vec<ItemModifierLink>> {
        let id = record_id("item_modifier_link", id);
        let current = self
            .links
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Link {} not found", id)))?;
        let scope = current.item_id.clone();

        let view = {
            let cached = self.link_views.read();
            cached.get(&scope.to_string()).cloned()
        };
        let view = match view {
            Some(view) => view,
            None => self.refresh_links(&scope).await?,
        };

        match sort::plan_adjacent_swap(&view, &id, direction) {
            None => Ok(view),
            Some(plan) => {
                let written = self.links.apply_swap(plan).await;
                let refreshed = self.refresh_links(&scope).await?;
                written?;
                Ok(refreshed)
            }
        }
    }

    /// Remove a link. The group and its modifiers are untouched.
    pub async fn unlink_group(&self, id: &str, confirmed: bool) -> RepoResult<Vec<ItemModifierLink>> {
        let id = record_id("item_modifier_link", id);
        let current = self
            .links
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Link {} not found", id)))?;
        let scope = current.item_id.clone();

        if !confirmed {
            return self.refresh_links(&scope).await;
        }

        self.links.delete(&id).await?;
        self.refresh_links(&scope).await
    }

    /// Modifier groups not yet linked to the item
    pub async fn candidate_groups(&self, item_id: &str) -> RepoResult<Vec<ModifierGroup>> {
        let item_id = record_id("item", item_id);
        self.links.candidate_groups(&item_id).await
    }

    /// Modifiers of the item's linked groups, keyed by group id
    pub async fn linked_modifiers(
        &self,
        item_id: &str,
    ) -> RepoResult<HashMap<String, Vec<Modifier>>> {
        let item_id = record_id("item", item_id);
        self.links.modifiers_for_linked_groups(&item_id).await
    }
}

/// Drop patch fields equal to the link's observed state
fn prune_link_update(
    mut data: ItemModifierLinkUpdate,
    current: &ItemModifierLink,
) -> ItemModifierLinkUpdate {
    if data.is_required == Some(current.is_required) {
        data.is_required = None;
    }
    if data.is_active == Some(current.is_active) {
        data.is_active = None;
    }
    if data.max_choices.is_some() && data.max_choices == current.max_choices {
        data.max_choices = None;
    }
    if let Some(raw) = data.default_modifier_id.as_deref() {
        let requested = if raw.is_empty() {
            None
        } else {
            Some(record_id("modifier", raw))
        };
        if requested == current.default_modifier_id {
            data.default_modifier_id = None;
        }
    }
    data
}

fn link_update_is_empty(data: &ItemModifierLinkUpdate) -> bool {
    data.is_required.is_none()
        && data.is_active.is_none()
        && data.max_choices.is_none()
        && data.default_modifier_id.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::SelectionType;

    fn link(required: bool, max: Option<i32>) -> ItemModifierLink {
        ItemModifierLink {
            id: Some(record_id("item_modifier_link", "l1")),
            item_id: record_id("item", "i1"),
            group_id: record_id("modifier_group", "g1"),
            is_required: required,
            is_active: true,
            sort_order: 1,
            max_choices: max,
            default_modifier_id: Some(record_id("modifier", "m1")),
        }
    }

    #[test]
    fn equal_link_fields_are_pruned() {
        let data = ItemModifierLinkUpdate {
            is_required: Some(false),
            is_active: Some(true),
            max_choices: Some(3),
            default_modifier_id: Some("modifier:m1".to_string()),
        };
        let pruned = prune_link_update(data, &link(false, Some(3)));
        assert!(link_update_is_empty(&pruned));
    }

    #[test]
    fn changed_link_fields_survive_pruning() {
        let data = ItemModifierLinkUpdate {
            is_required: Some(true),
            is_active: None,
            max_choices: Some(2),
            default_modifier_id: Some(String::new()),
        };
        let pruned = prune_link_update(data, &link(false, Some(3)));
        assert_eq!(pruned.is_required, Some(true));
        assert_eq!(pruned.max_choices, Some(2));
        assert_eq!(pruned.default_modifier_id, Some(String::new()));
    }

    #[tokio::test]
    async fn confirmed_deletes_evict_child_scope_views() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::new(&tmp.path().join("menu.db")).await.unwrap();
        let catalog = CatalogService::new(db.db);

        let cats = catalog
            .create_category(CategoryCreate { name: "Drinks".into() })
            .await
            .unwrap();
        let category_id = cats[0].id.as_ref().unwrap().to_string();
        let items = catalog
            .create_item(
                &category_id,
                ItemCreate {
                    name: "Latte".into(),
                    base_price: "4.00".into(),
                    description: None,
                    image_url: None,
                },
            )
            .await
            .unwrap();
        let item_id = items[0].id.as_ref().unwrap().to_string();
        catalog
            .create_variant(
                &item_id,
                VariantCreate {
                    name: "Large".into(),
                    price_delta: "0.50".into(),
                },
            )
            .await
            .unwrap();
        let groups = catalog
            .create_group(ModifierGroupCreate {
                name: "Milk".into(),
                selection_type: SelectionType::Multi,
            })
            .await
            .unwrap();
        let group_id = groups[0].id.as_ref().unwrap().to_string();
        catalog
            .create_modifier(
                &group_id,
                ModifierCreate {
                    name: "Oat".into(),
                    price_delta: "0.30".into(),
                    affects_prep: None,
                },
            )
            .await
            .unwrap();
        catalog.link_group(&item_id, &group_id).await.unwrap();

        assert!(catalog.variant_views.read().contains_key(&item_id));
        assert!(catalog.link_views.read().contains_key(&item_id));
        assert!(catalog.modifier_views.read().contains_key(&group_id));
        assert!(catalog.item_views.read().contains_key(&category_id));

        catalog.delete_item(&item_id, true).await.unwrap();
        assert!(!catalog.variant_views.read().contains_key(&item_id));
        assert!(!catalog.link_views.read().contains_key(&item_id));

        catalog.delete_group(&group_id, true).await.unwrap();
        assert!(!catalog.modifier_views.read().contains_key(&group_id));

        catalog.delete_category(&category_id, true).await.unwrap();
        assert!(!catalog.item_views.read().contains_key(&category_id));
    }

    #[test]
    fn clearing_an_absent_default_is_a_no_op() {
        let mut current = link(false, None);
        current.default_modifier_id = None;
        let data = ItemModifierLinkUpdate {
            default_modifier_id: Some(String::new()),
            ..Default::default()
        };
        let pruned = prune_link_update(data, &current);
        assert!(link_update_is_empty(&pruned));
    }
}
