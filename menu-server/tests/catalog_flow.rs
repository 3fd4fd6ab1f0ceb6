//! End-to-end catalog flows over a real embedded database
//!
//! Each test opens a fresh RocksDB under a temp directory and drives the
//! catalog service the way the HTTP handlers do.

use menu_server::db::DbService;
use menu_server::{CatalogService, Config};
use menu_server::db::models::{
    CategoryCreate, ItemCreate, ItemModifierLink, ItemModifierLinkUpdate, ModifierCreate,
    ModifierGroupCreate, ModifierGroupUpdate, SelectionType, VariantCreate,
};
use menu_server::db::repository::RepoError;
use menu_server::db::repository::sort::MoveDirection;

async fn setup() -> (CatalogService, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    config.ensure_work_dir_structure().unwrap();
    let db = DbService::new(&config.database_dir().join("menu.db"))
        .await
        .unwrap();
    (CatalogService::new(db.db), tmp)
}

async fn seed_category(catalog: &CatalogService, name: &str) -> String {
    let list = catalog
        .create_category(CategoryCreate {
            name: name.to_string(),
        })
        .await
        .unwrap();
    list.iter()
        .find(|c| c.name == name)
        .and_then(|c| c.id.as_ref())
        .unwrap()
        .to_string()
}

async fn seed_item(catalog: &CatalogService, category_id: &str, name: &str) -> String {
    let list = catalog
        .create_item(
            category_id,
            ItemCreate {
                name: name.to_string(),
                base_price: "9.50".to_string(),
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap();
    list.iter()
        .find(|i| i.name == name)
        .and_then(|i| i.id.as_ref())
        .unwrap()
        .to_string()
}

async fn seed_group(catalog: &CatalogService, name: &str, selection: SelectionType) -> String {
    let list = catalog
        .create_group(ModifierGroupCreate {
            name: name.to_string(),
            selection_type: selection,
        })
        .await
        .unwrap();
    list.iter()
        .find(|g| g.name == name)
        .and_then(|g| g.id.as_ref())
        .unwrap()
        .to_string()
}

async fn seed_modifier(catalog: &CatalogService, group_id: &str, name: &str) -> String {
    let list = catalog
        .create_modifier(
            group_id,
            ModifierCreate {
                name: name.to_string(),
                price_delta: "0.50".to_string(),
                affects_prep: None,
            },
        )
        .await
        .unwrap();
    list.iter()
        .find(|m| m.name == name)
        .and_then(|m| m.id.as_ref())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn create_appends_to_end_of_scope() {
    let (catalog, _tmp) = setup().await;

    seed_category(&catalog, "Starters").await;
    seed_category(&catalog, "Mains").await;
    seed_category(&catalog, "Desserts").await;

    let list = catalog.list_categories().await.unwrap();
    let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Starters", "Mains", "Desserts"]);
    assert_eq!(
        list.iter().map(|c| c.sort_order).collect::<Vec<_>>(),
        [1, 2, 3]
    );
}

#[tokio::test]
async fn move_up_swaps_with_previous_neighbor() {
    let (catalog, _tmp) = setup().await;

    seed_category(&catalog, "a").await;
    let b = seed_category(&catalog, "b").await;
    seed_category(&catalog, "c").await;

    let list = catalog.move_category(&b, MoveDirection::Up).await.unwrap();
    let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);

    // The swap exchanged only the two sort_order values
    assert_eq!(
        list.iter().map(|c| c.sort_order).collect::<Vec<_>>(),
        [1, 2, 3]
    );
}

#[tokio::test]
async fn edge_moves_are_no_ops() {
    let (catalog, _tmp) = setup().await;

    let first = seed_category(&catalog, "first").await;
    let last = seed_category(&catalog, "last").await;

    let list = catalog
        .move_category(&first, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(list[0].name, "first");

    let list = catalog
        .move_category(&last, MoveDirection::Down)
        .await
        .unwrap();
    assert_eq!(list[1].name, "last");
}

#[tokio::test]
async fn item_moves_stay_inside_their_category() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let other = seed_category(&catalog, "Sides").await;

    seed_item(&catalog, &cat, "Burger").await;
    let fries = seed_item(&catalog, &cat, "Pasta").await;
    seed_item(&catalog, &other, "Salad").await;

    let list = catalog.move_item(&fries, MoveDirection::Up).await.unwrap();
    let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Pasta", "Burger"]);

    // The other scope is untouched and still starts at 1
    let others = catalog.list_items(&other).await.unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].sort_order, 1);
}

fn link_groups(links: &[ItemModifierLink]) -> Vec<String> {
    links.iter().map(|l| l.group_id.to_string()).collect()
}

#[tokio::test]
async fn link_moves_reorder_only_their_items_scope() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let burger = seed_item(&catalog, &cat, "Burger").await;
    let pizza = seed_item(&catalog, &cat, "Pizza").await;
    let toppings = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    let sauces = seed_group(&catalog, "Sauces", SelectionType::Multi).await;
    let sides = seed_group(&catalog, "Sides", SelectionType::Single).await;

    catalog.link_group(&burger, &toppings).await.unwrap();
    catalog.link_group(&burger, &sauces).await.unwrap();
    let links = catalog.link_group(&burger, &sides).await.unwrap();
    assert_eq!(
        link_groups(&links),
        [toppings.clone(), sauces.clone(), sides.clone()]
    );

    catalog.link_group(&pizza, &toppings).await.unwrap();
    catalog.link_group(&pizza, &sauces).await.unwrap();

    let middle = links[1].id.as_ref().unwrap().to_string();
    let moved = catalog.move_link(&middle, MoveDirection::Up).await.unwrap();
    assert_eq!(
        link_groups(&moved),
        [sauces.clone(), toppings.clone(), sides.clone()]
    );
    assert_eq!(
        moved.iter().map(|l| l.sort_order).collect::<Vec<_>>(),
        [1, 2, 3]
    );

    // The other item's link scope keeps its own order
    let other = catalog.list_links(&pizza).await.unwrap();
    assert_eq!(link_groups(&other), [toppings.clone(), sauces.clone()]);
    assert_eq!(
        other.iter().map(|l| l.sort_order).collect::<Vec<_>>(),
        [1, 2]
    );
}

#[tokio::test]
async fn duplicate_link_is_rejected_and_changes_nothing() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let group = seed_group(&catalog, "Toppings", SelectionType::Multi).await;

    let links = catalog.link_group(&item, &group).await.unwrap();
    assert_eq!(links.len(), 1);

    let err = catalog.link_group(&item, &group).await.unwrap_err();
    assert!(matches!(err, RepoError::DuplicateLink(_)));

    let links = catalog.list_links(&item).await.unwrap();
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn single_selection_group_observes_max_choices_one() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let group = seed_group(&catalog, "Doneness", SelectionType::Multi).await;

    let links = catalog.link_group(&item, &group).await.unwrap();
    let link_id = links[0].id.as_ref().unwrap().to_string();

    // Multi passes the stored cap through
    let links = catalog
        .update_link(
            &link_id,
            ItemModifierLinkUpdate {
                max_choices: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(links[0].max_choices, Some(5));

    // Flipping the group to single rewrites no links; the next read
    // projects the cap to 1 anyway
    catalog
        .update_group(
            &group,
            ModifierGroupUpdate {
                selection_type: Some(SelectionType::Single),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let links = catalog.list_links(&item).await.unwrap();
    assert_eq!(links[0].max_choices, Some(1));
}

#[tokio::test]
async fn cross_group_default_modifier_is_rejected() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let linked = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    let other = seed_group(&catalog, "Sauces", SelectionType::Multi).await;
    let foreign = seed_modifier(&catalog, &other, "Ketchup").await;

    let links = catalog.link_group(&item, &linked).await.unwrap();
    let link_id = links[0].id.as_ref().unwrap().to_string();

    let err = catalog
        .update_link(
            &link_id,
            ItemModifierLinkUpdate {
                default_modifier_id: Some(foreign),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidDefaultModifier(_)));

    // Nothing was written; the link keeps its prior (absent) default
    let links = catalog.list_links(&item).await.unwrap();
    assert_eq!(links[0].default_modifier_id, None);
}

#[tokio::test]
async fn own_group_default_modifier_is_accepted_and_clearable() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let group = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    let cheese = seed_modifier(&catalog, &group, "Cheese").await;

    let links = catalog.link_group(&item, &group).await.unwrap();
    let link_id = links[0].id.as_ref().unwrap().to_string();

    let links = catalog
        .update_link(
            &link_id,
            ItemModifierLinkUpdate {
                default_modifier_id: Some(cheese.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        links[0].default_modifier_id.as_ref().map(|id| id.to_string()),
        Some(cheese)
    );

    // Empty string clears the default
    let links = catalog
        .update_link(
            &link_id,
            ItemModifierLinkUpdate {
                default_modifier_id: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(links[0].default_modifier_id, None);
}

#[tokio::test]
async fn unlink_leaves_group_and_modifiers_intact() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let group = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    seed_modifier(&catalog, &group, "Cheese").await;

    let links = catalog.link_group(&item, &group).await.unwrap();
    let link_id = links[0].id.as_ref().unwrap().to_string();

    let links = catalog.unlink_group(&link_id, true).await.unwrap();
    assert!(links.is_empty());

    let groups = catalog.list_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    let modifiers = catalog.list_modifiers(&group).await.unwrap();
    assert_eq!(modifiers.len(), 1);
}

#[tokio::test]
async fn unconfirmed_delete_is_a_silent_no_op() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;

    let list = catalog.delete_category(&cat, false).await.unwrap();
    assert_eq!(list.len(), 1);

    let list = catalog.delete_category(&cat, true).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn item_delete_cascades_its_links_only() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let keeper = seed_item(&catalog, &cat, "Pizza").await;
    let group = seed_group(&catalog, "Toppings", SelectionType::Multi).await;

    catalog.link_group(&item, &group).await.unwrap();
    catalog.link_group(&keeper, &group).await.unwrap();

    catalog.delete_item(&item, true).await.unwrap();

    // Deleted item's link is gone, the sibling's survives
    let links = catalog.list_links(&keeper).await.unwrap();
    assert_eq!(links.len(), 1);
    let groups = catalog.list_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
}

#[tokio::test]
async fn validation_failures_reject_before_any_write() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;

    let err = catalog
        .create_item(
            &cat,
            ItemCreate {
                name: "   ".to_string(),
                base_price: "9.50".to_string(),
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = catalog
        .create_item(
            &cat,
            ItemCreate {
                name: "Burger".to_string(),
                base_price: "nine fifty".to_string(),
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(catalog.list_items(&cat).await.unwrap().is_empty());
}

#[tokio::test]
async fn candidate_groups_excludes_already_linked() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let linked = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    seed_group(&catalog, "Sauces", SelectionType::Multi).await;

    catalog.link_group(&item, &linked).await.unwrap();

    let candidates = catalog.candidate_groups(&item).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Sauces");
}

#[tokio::test]
async fn linked_modifiers_are_partitioned_by_group() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Mains").await;
    let item = seed_item(&catalog, &cat, "Burger").await;
    let toppings = seed_group(&catalog, "Toppings", SelectionType::Multi).await;
    let sauces = seed_group(&catalog, "Sauces", SelectionType::Multi).await;
    seed_modifier(&catalog, &toppings, "Cheese").await;
    seed_modifier(&catalog, &toppings, "Bacon").await;
    seed_modifier(&catalog, &sauces, "Ketchup").await;

    catalog.link_group(&item, &toppings).await.unwrap();
    catalog.link_group(&item, &sauces).await.unwrap();

    let by_group = catalog.linked_modifiers(&item).await.unwrap();
    assert_eq!(by_group.len(), 2);
    assert_eq!(by_group.get(&toppings).map(Vec::len), Some(2));
    assert_eq!(by_group.get(&sauces).map(Vec::len), Some(1));
}

#[tokio::test]
async fn variant_lifecycle_round_trip() {
    let (catalog, _tmp) = setup().await;

    let cat = seed_category(&catalog, "Drinks").await;
    let item = seed_item(&catalog, &cat, "Cola").await;

    let variants = catalog
        .create_variant(
            &item,
            VariantCreate {
                name: "Large".to_string(),
                price_delta: "1.00".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].sort_order, 1);

    let variant_id = variants[0].id.as_ref().unwrap().to_string();
    let variants = catalog.delete_variant(&variant_id, true).await.unwrap();
    assert!(variants.is_empty());
}
