//! Catalog template tests: CRUD, listing order, and the copy (not reference)
//! relationship between templates and quote items.

use azul_core::{Currency, Item, ProductKind, QuoteDraft, SubItem};
use azul_db::repository::product::ProductInput;
use azul_db::{Database, DbConfig};

fn simple_template(name: &str, value: f64) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        kind: ProductKind::Simple,
        value,
        description: Some("Incluye materiales".to_string()),
        sub_items: Vec::new(),
    }
}

#[tokio::test]
async fn templates_round_trip_and_list_alphabetically() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let products = db.products();

    products
        .insert("owner-1", simple_template("Limpieza", 75.0))
        .await
        .unwrap();
    products
        .insert(
            "owner-1",
            ProductInput {
                name: "Arreglo de fisuras".to_string(),
                kind: ProductKind::Bundle,
                value: 0.0,
                description: None,
                sub_items: vec![
                    SubItem::new("Sellado", "Llaves de acero", 120.0),
                    SubItem::new("Revoque", "Material cementicio", 80.0),
                ],
            },
        )
        .await
        .unwrap();

    let listed = products.list_by_owner("owner-1").await.unwrap();
    let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Arreglo de fisuras", "Limpieza"]);

    let bundle = &listed[0];
    assert_eq!(bundle.kind, ProductKind::Bundle);
    assert_eq!(bundle.sub_items.len(), 2);
}

#[tokio::test]
async fn template_updates_do_not_rewrite_existing_quotes() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let template = db
        .products()
        .insert("owner-2", simple_template("Limpieza", 75.0))
        .await
        .unwrap();

    // Build a quote from the template (fields are copied).
    let quote = db
        .quotes()
        .save(QuoteDraft {
            id: None,
            owner_id: "owner-2".to_string(),
            client_name: "Cliente".to_string(),
            client_address: None,
            client_contact: None,
            items: vec![Item::simple_from_template(&template)],
            currency: Currency::Ars,
        })
        .await
        .unwrap();
    assert_eq!(quote.total, 75.0);

    // Raise the catalog price and delete the template entirely.
    db.products()
        .update(&template.id, simple_template("Limpieza", 90.0))
        .await
        .unwrap();
    db.products().delete(&template.id).await.unwrap();

    // The saved quote still bills the price at the time of quoting.
    let stored = db.quotes().get_by_id(&quote.id).await.unwrap().unwrap();
    assert_eq!(stored.total, 75.0);
}
