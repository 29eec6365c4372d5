//! # PostgreSQL Store Integration Tests
//!
//! These tests need a reachable PostgreSQL instance. They are `#[ignore]`d
//! by default and run with:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/contas_test \
//!     cargo test --lib postgres::tests -- --ignored --test-threads=1
//! ```

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entities::EntryDraft;
use crate::domain::value_objects::EntryKind;
use crate::infrastructure::persistence::postgres::PostgresStore;
use crate::infrastructure::persistence::traits::{
    CounterpartyRepository, EntryRepository, Session, Store,
};

// ============================================================================
// Test Helpers
// ============================================================================

async fn create_test_store() -> Option<PostgresStore> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&database_url).await.ok()?;
    let store = PostgresStore::new(pool);
    store.migrate().await.ok()?;
    Some(store)
}

async fn cleanup_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE contas_a_pagar_e_receber, fornecedor_cliente RESTART IDENTITY")
        .execute(pool)
        .await?;
    Ok(())
}

fn payable(month: u32, amount: i64) -> EntryDraft {
    EntryDraft::new(
        "Conta de Teste",
        Decimal::from(amount),
        EntryKind::Payable,
        NaiveDate::from_ymd_opt(2025, month, 10).unwrap(),
        None,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn entry_insert_and_find() {
    let Some(store) = create_test_store().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    let inserted = session.insert_entry(&payable(5, 100)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    let found = session.find_entry(inserted.id()).await.unwrap().unwrap();
    assert_eq!(found, inserted);
    assert!(!found.is_settled());
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn settlement_round_trips_through_update() {
    let Some(store) = create_test_store().await else {
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    let mut entry = session.insert_entry(&payable(5, 100)).await.unwrap();
    entry.settle(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
    assert!(session.update_entry(&entry).await.unwrap());
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    let found = session.find_entry(entry.id()).await.unwrap().unwrap();
    assert_eq!(found.settled_amount(), Some(Decimal::from(100)));
    assert_eq!(
        found.settlement_date(),
        NaiveDate::from_ymd_opt(2025, 5, 20)
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn month_count_and_year_payables() {
    let Some(store) = create_test_store().await else {
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    for amount in 0..3 {
        session.insert_entry(&payable(5, 100 + amount)).await.unwrap();
    }
    session.insert_entry(&payable(12, 50)).await.unwrap();
    session
        .insert_entry(&EntryDraft::new(
            "Recebimento",
            Decimal::from(70),
            EntryKind::Receivable,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(session.count_entries_due_in(2025, 5).await.unwrap(), 4);
    assert_eq!(session.count_entries_due_in(2025, 12).await.unwrap(), 1);
    assert_eq!(session.payables_due_in(2025).await.unwrap().len(), 4);
    assert!(session.payables_due_in(2026).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn year_payables_exclude_adjacent_years() {
    let Some(store) = create_test_store().await else {
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    for (y, m, d) in [(2024, 12, 31), (2025, 1, 1), (2025, 12, 31), (2026, 1, 1)] {
        session
            .insert_entry(&EntryDraft::new(
                "Conta de Virada",
                Decimal::ONE,
                EntryKind::Payable,
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                None,
            ))
            .await
            .unwrap();
    }

    let due: Vec<_> = session
        .payables_due_in(2025)
        .await
        .unwrap()
        .iter()
        .map(|e| e.due_date())
        .collect();
    assert_eq!(
        due,
        vec![
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        ]
    );
    assert_eq!(session.count_entries_due_in(2025, 12).await.unwrap(), 1);
    assert!(session.payables_due_in(i32::MAX).await.unwrap().is_empty());
    assert!(session.payables_due_in(300_000).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn rollback_discards_insert() {
    let Some(store) = create_test_store().await else {
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    session.insert_counterparty("Fornecedor").await.unwrap();
    session.rollback().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert!(session.list_counterparties().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn deleting_counterparty_nulls_entry_reference() {
    let Some(store) = create_test_store().await else {
        return;
    };
    cleanup_tables(store.pool()).await.unwrap();

    let mut session = store.begin().await.unwrap();
    let counterparty = session.insert_counterparty("Fornecedor").await.unwrap();
    let mut draft = payable(5, 10);
    draft.counterparty_id = Some(counterparty.id());
    let entry = session.insert_entry(&draft).await.unwrap();

    assert_eq!(
        session
            .entries_by_counterparty(counterparty.id())
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(session.delete_counterparty(counterparty.id()).await.unwrap());

    let found = session.find_entry(entry.id()).await.unwrap().unwrap();
    assert_eq!(found.counterparty_id(), None);
    session.commit().await.unwrap();
}
