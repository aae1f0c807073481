//! End-to-end tests for the quote save flow: numbering, totals, edits,
//! conversion-then-save, and the concurrency guarantee on quote numbers.

use std::path::PathBuf;

use azul_core::fx::convert_quote;
use azul_core::{Currency, Item, QuoteDraft, SubItem};
use azul_db::{Database, DbConfig, DbError};
use uuid::Uuid;

/// A file-backed database so tests can exercise multiple connections.
/// In-memory SQLite is limited to a single connection, which would hide
/// every concurrency bug the allocator exists to prevent.
async fn file_db() -> (Database, PathBuf) {
    let path = std::env::temp_dir().join(format!("azul-test-{}.db", Uuid::new_v4()));
    let db = Database::new(DbConfig::new(&path).max_connections(8))
        .await
        .expect("database should initialize");
    (db, path)
}

fn scenario_a_draft(owner_id: &str) -> QuoteDraft {
    QuoteDraft {
        id: None,
        owner_id: owner_id.to_string(),
        client_name: "María Pérez".to_string(),
        client_address: Some("Zufriategui 4005, Villa Martelli".to_string()),
        client_contact: Some("maria@example.com".to_string()),
        items: vec![
            Item::simple("Hidráulica", "Cambio de cañerías", 100.0),
            Item::bundle(
                "Puesta a punto",
                vec![
                    SubItem::new("Filtro", "Limpieza profunda", 30.0),
                    SubItem::new("Bomba", "Revisión general", 20.0),
                ],
            ),
        ],
        currency: Currency::Ars,
    }
}

#[tokio::test]
async fn first_quote_gets_number_one_and_summed_total() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let quote = db.quotes().save(scenario_a_draft("owner-a")).await.unwrap();

    assert_eq!(quote.quote_number, 1);
    assert_eq!(quote.total, 150.0);
    assert_eq!(quote.currency, Currency::Ars);
    assert_eq!(quote.created_at, quote.updated_at);

    // Round-trips through the row mapping.
    let stored = db.quotes().get_by_id(&quote.id).await.unwrap().unwrap();
    assert_eq!(stored.quote_number, 1);
    assert_eq!(stored.total, 150.0);
    assert_eq!(stored.items.len(), 2);
}

#[tokio::test]
async fn second_quote_gets_number_two_regardless_of_content() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let first = db.quotes().save(scenario_a_draft("owner-b")).await.unwrap();
    assert_eq!(first.quote_number, 1);

    let second = db
        .quotes()
        .save(QuoteDraft {
            id: None,
            owner_id: "owner-b".to_string(),
            client_name: "Otro Cliente".to_string(),
            client_address: None,
            client_contact: None,
            items: Vec::new(),
            currency: Currency::Ars,
        })
        .await
        .unwrap();

    assert_eq!(second.quote_number, 2);
    assert_eq!(second.total, 0.0);

    // Numbering is per owner: a different account starts at 1 again.
    let other = db.quotes().save(scenario_a_draft("owner-c")).await.unwrap();
    assert_eq!(other.quote_number, 1);
}

#[tokio::test]
async fn edit_recomputes_total_but_preserves_identity() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let created = db.quotes().save(scenario_a_draft("owner-d")).await.unwrap();
    let before = db.quotes().get_by_id(&created.id).await.unwrap().unwrap();

    // Let the clock move so the updated_at change is observable.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let mut items = before.items.clone();
    match &mut items[1] {
        Item::Bundle(bundle) => {
            bundle
                .sub_items
                .push(SubItem::new("Clorador", "Instalación", 15.0));
        }
        Item::Simple(_) => panic!("expected the bundle line"),
    }

    let updated = db
        .quotes()
        .save(QuoteDraft {
            id: Some(before.id.clone()),
            owner_id: before.owner_id.clone(),
            client_name: before.client_name.clone(),
            client_address: before.client_address.clone(),
            client_contact: before.client_contact.clone(),
            items,
            currency: before.currency,
        })
        .await
        .unwrap();

    assert_eq!(updated.total, 165.0);
    assert_eq!(updated.quote_number, before.quote_number);
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at > before.updated_at);
}

#[tokio::test]
async fn concurrent_creates_never_share_or_skip_numbers() {
    let (db, _path) = file_db().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let draft = QuoteDraft {
                id: None,
                owner_id: "owner-racing".to_string(),
                client_name: format!("Cliente {i}"),
                client_address: None,
                client_contact: None,
                items: vec![Item::simple("Servicio", "", f64::from(i))],
                currency: Currency::Ars,
            };
            db.quotes().save(draft).await.unwrap().quote_number
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort_unstable();

    assert_eq!(numbers, (1..=8).collect::<Vec<i64>>());

    let counter = db.sequences().current("owner-racing").await.unwrap();
    assert_eq!(counter, Some(8));
}

#[tokio::test]
async fn empty_client_name_is_rejected_without_mutation() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let mut draft = scenario_a_draft("owner-e");
    draft.client_name = "   ".to_string();

    let result = db.quotes().save(draft).await;
    assert!(matches!(result, Err(DbError::Validation(_))));

    // Nothing was written, not even a counter bump.
    assert_eq!(db.sequences().current("owner-e").await.unwrap(), None);
    assert!(db.quotes().list_by_owner("owner-e").await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_a_missing_quote_is_not_found() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let mut draft = scenario_a_draft("owner-f");
    draft.id = Some("no-such-id".to_string());

    let result = db.quotes().save(draft).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn convert_then_save_persists_the_converted_snapshot() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let created = db.quotes().save(scenario_a_draft("owner-g")).await.unwrap();

    let converted = convert_quote(&created, Currency::Usd, 1000.0).unwrap();
    let saved = db
        .quotes()
        .save(QuoteDraft {
            id: Some(converted.id.clone()),
            owner_id: converted.owner_id.clone(),
            client_name: converted.client_name.clone(),
            client_address: converted.client_address.clone(),
            client_contact: converted.client_contact.clone(),
            items: converted.items.clone(),
            currency: converted.currency,
        })
        .await
        .unwrap();

    assert_eq!(saved.currency, Currency::Usd);
    assert!((saved.total - 0.15).abs() < 1e-9);
    assert_eq!(saved.quote_number, created.quote_number);
}

#[tokio::test]
async fn listing_orders_by_number_descending() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    for _ in 0..3 {
        db.quotes().save(scenario_a_draft("owner-h")).await.unwrap();
    }

    let quotes = db.quotes().list_by_owner("owner-h").await.unwrap();
    let numbers: Vec<i64> = quotes.iter().map(|q| q.quote_number).collect();
    assert_eq!(numbers, vec![3, 2, 1]);
}

#[tokio::test]
async fn deleting_a_quote_does_not_reuse_its_number() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let first = db.quotes().save(scenario_a_draft("owner-i")).await.unwrap();
    db.quotes().delete(&first.id).await.unwrap();
    assert!(db.quotes().get_by_id(&first.id).await.unwrap().is_none());

    let next = db.quotes().save(scenario_a_draft("owner-i")).await.unwrap();
    assert_eq!(next.quote_number, 2);
}
