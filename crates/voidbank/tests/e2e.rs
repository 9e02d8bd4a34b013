// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests across the banker, policy, and telemetry layers.
//!
//! Each test builds an isolated TestBank on a temp SQLite file. Tests are
//! independent and order-insensitive.

use std::sync::Arc;

use voidbank_banker::VoidBanker;
use voidbank_config::{PolicyConfig, PricingConfig, ReadConsistency};
use voidbank_core::{OperationParams, OperationType, PriorityLevel, ThermalStatus};
use voidbank_policy::{DenialReason, PurchaseOutcome, ResourcePolicy};
use voidbank_test_utils::{MockTelemetry, TestBank, snapshots};

fn no_buffer() -> PolicyConfig {
    PolicyConfig {
        min_solvency_buffer: 0.0,
        ..PolicyConfig::default()
    }
}

// ---- Test 1: ten-credit lifecycle through admission control ----

#[tokio::test]
async fn test_ten_credit_lifecycle_through_policy() {
    let bank = TestBank::builder()
        .with_balance("agent_x", 10.0)
        .with_policy(no_buffer())
        .build()
        .await
        .unwrap();
    let policy = ResourcePolicy::new(Arc::clone(&bank.banker), bank.config.policy.clone());
    let buy = |op| {
        policy.purchase(
            "agent_x",
            PriorityLevel::StandardOperation,
            op,
            OperationParams::default(),
        )
    };

    assert!(buy(OperationType::BshGeneration).await.unwrap().is_completed());
    assert_eq!(bank.balance("agent_x").await, 9.0);

    assert!(buy(OperationType::DmfEvaluation).await.unwrap().is_completed());
    assert_eq!(bank.balance("agent_x").await, 4.0);

    let third = buy(OperationType::DmfEvaluation).await.unwrap();
    assert_eq!(third.denial_reason(), Some(DenialReason::Insolvency));
    assert_eq!(bank.balance("agent_x").await, 4.0);
    assert_eq!(bank.transaction_count("agent_x").await, 2);
}

// ---- Test 2: concurrent purchases never overdraw ----

#[tokio::test]
async fn test_racing_purchases_serialize() {
    let bank = TestBank::builder()
        .with_balance("racer", 10.0)
        .build()
        .await
        .unwrap();

    let priced = voidbank_banker::PricedOperation {
        cost: 7.0,
        ..bank
            .banker
            .price(OperationType::DmfEvaluation, OperationParams::default())
    };
    let attempts = (0..2).map(|_| {
        let banker = Arc::clone(&bank.banker);
        let priced = priced.clone();
        tokio::spawn(async move { banker.execute("racer", &priced).await })
    });
    let results = futures::future::join_all(attempts).await;

    let wins = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .filter(|receipt| receipt.is_committed())
        .count();
    assert_eq!(wins, 1);
    assert_eq!(bank.balance("racer").await, 3.0);
    assert_eq!(bank.transaction_count("racer").await, 1);
}

#[tokio::test]
async fn test_many_gated_buyers_never_overdraw() {
    let bank = TestBank::builder()
        .with_balance("shared", 40.0)
        .with_policy(no_buffer())
        .build()
        .await
        .unwrap();
    let policy = Arc::new(ResourcePolicy::new(
        Arc::clone(&bank.banker),
        bank.config.policy.clone(),
    ));

    // 20 buyers of a 5-credit evaluation against 40 credits.
    let buyers = (0..20).map(|_| {
        let policy = Arc::clone(&policy);
        tokio::spawn(async move {
            policy
                .purchase(
                    "shared",
                    PriorityLevel::StandardOperation,
                    OperationType::DmfEvaluation,
                    OperationParams::default(),
                )
                .await
        })
    });
    let outcomes: Vec<_> = futures::future::join_all(buyers)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let completed = outcomes.iter().filter(|o| o.is_completed()).count();
    assert_eq!(completed, 8);
    assert_eq!(bank.balance("shared").await, 0.0);
    assert_eq!(bank.transaction_count("shared").await, 8);
    // Losers were either refused at admission or declined at the debit.
    assert!(outcomes.iter().all(|o| match o {
        PurchaseOutcome::Completed(_) => true,
        PurchaseOutcome::Denied(denial) => denial.reason == DenialReason::Insolvency,
        PurchaseOutcome::Declined(receipt) => !receipt.is_committed(),
    }));
}

// ---- Test 3: telemetry drives pricing and admission ----

#[tokio::test]
async fn test_telemetry_refresh_changes_price_and_admission() {
    let bank = TestBank::builder()
        .with_balance("agent", 1_000.0)
        .build()
        .await
        .unwrap();
    let telemetry = MockTelemetry::with_readings(vec![
        snapshots::with_status(ThermalStatus::Warning),
        snapshots::hot_cpu(92.0),
    ]);
    let policy = ResourcePolicy::new(Arc::clone(&bank.banker), bank.config.policy.clone());

    bank.banker.refresh_from(&telemetry).await.unwrap();
    let outcome = policy
        .purchase(
            "agent",
            PriorityLevel::StandardOperation,
            OperationType::BshGeneration,
            OperationParams::default(),
        )
        .await
        .unwrap();
    match outcome {
        PurchaseOutcome::Completed(receipt) => assert_eq!(receipt.cost, 2.0),
        other => panic!("expected completion, got {other:?}"),
    }

    bank.banker.refresh_from(&telemetry).await.unwrap();
    let outcome = policy
        .purchase(
            "agent",
            PriorityLevel::SystemCritical,
            OperationType::BshGeneration,
            OperationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.denial_reason(), Some(DenialReason::ThermalGuard));
    assert_eq!(bank.balance("agent").await, 998.0);
}

// ---- Test 4: load shedding protects live game state ----

#[tokio::test]
async fn test_load_shedding_keeps_live_traffic_flowing() {
    let bank = TestBank::builder()
        .with_balance("engine", 100.0)
        .with_snapshot(snapshots::cpu_loaded(95.0))
        .build()
        .await
        .unwrap();
    let policy = ResourcePolicy::new(Arc::clone(&bank.banker), bank.config.policy.clone());

    let background = policy
        .purchase(
            "engine",
            PriorityLevel::BackgroundSimulation,
            OperationType::BshGeneration,
            OperationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(background.denial_reason(), Some(DenialReason::LoadShedding));

    // 95% load is above the 80% pricing threshold: 1 * 1.5
    let live = policy
        .purchase(
            "engine",
            PriorityLevel::LiveGameState,
            OperationType::BshGeneration,
            OperationParams::default(),
        )
        .await
        .unwrap();
    assert!(live.is_completed());
    assert_eq!(bank.balance("engine").await, 98.5);
}

// ---- Test 5: ledger survives reopening ----

#[tokio::test]
async fn test_balances_persist_across_reopen() {
    let bank = TestBank::builder()
        .with_balance("saver", 25.0)
        .build()
        .await
        .unwrap();
    assert!(
        bank.banker
            .purchase_operation(
                "saver",
                OperationType::AlphaBetaSearch,
                OperationParams::with_depth(3),
            )
            .await
            .unwrap()
    );

    let reopened = VoidBanker::open(&bank.config).await.unwrap();
    assert_eq!(reopened.ledger().get_balance("saver").await.unwrap(), 17.0);
    let log = reopened.ledger().transactions_for("saver").await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].metadata["depth"], 3);
}

// ---- Test 6: integrity report reflects the ledger ----

#[tokio::test]
async fn test_integrity_report_counts_rows() {
    let bank = TestBank::builder()
        .with_balance("a", 10.0)
        .with_balance("b", 10.0)
        .with_snapshot(snapshots::nominal())
        .build()
        .await
        .unwrap();
    bank.banker
        .purchase_operation("a", OperationType::BshGeneration, OperationParams::default())
        .await
        .unwrap();

    let report = bank.banker.integrity_report().await.unwrap();
    assert!(report.is_operational());
    assert_eq!(report.accounts, Some(2));
    assert_eq!(report.transactions, Some(1));
    assert!(report.hardware.is_some());
}

// ---- Test 7: serializable reads only observe whole debits ----

#[tokio::test]
async fn test_serializable_reads_during_purchases() {
    let bank = TestBank::builder()
        .with_balance("reader", 50.0)
        .with_read_consistency(ReadConsistency::Serializable)
        .build()
        .await
        .unwrap();
    assert_eq!(
        bank.banker.ledger().read_consistency(),
        ReadConsistency::Serializable
    );

    let buyers = (0..10).map(|_| {
        let banker = Arc::clone(&bank.banker);
        tokio::spawn(async move {
            banker
                .purchase_operation("reader", OperationType::DmfEvaluation, OperationParams::default())
                .await
        })
    });
    let readers = (0..10).map(|_| {
        let banker = Arc::clone(&bank.banker);
        tokio::spawn(async move { banker.ledger().get_balance("reader").await })
    });
    let (bought, seen) = futures::future::join(
        futures::future::join_all(buyers),
        futures::future::join_all(readers),
    )
    .await;

    assert!(bought.into_iter().all(|joined| joined.unwrap().unwrap()));
    for balance in seen {
        let balance = balance.unwrap().unwrap();
        // Every observed balance is 50 minus a whole number of 5-credit debits.
        assert_eq!(balance % 5.0, 0.0);
        assert!((0.0..=50.0).contains(&balance));
    }
    assert_eq!(bank.balance("reader").await, 0.0);
    assert_eq!(bank.transaction_count("reader").await, 10);
}

// ---- Test 8: configured multipliers reach the purchase path ----

#[tokio::test]
async fn test_custom_pricing_applies_to_purchases() {
    let bank = TestBank::builder()
        .with_balance("tuned", 100.0)
        .with_snapshot(snapshots::with_status(ThermalStatus::Critical))
        .with_pricing(PricingConfig {
            critical_multiplier: 10.0,
            ..PricingConfig::default()
        })
        .with_policy(no_buffer())
        .build()
        .await
        .unwrap();
    assert_eq!(
        bank.banker
            .quote(OperationType::DmfEvaluation, OperationParams::default()),
        50.0
    );

    let policy = ResourcePolicy::new(Arc::clone(&bank.banker), bank.config.policy.clone());
    let outcome = policy
        .purchase(
            "tuned",
            PriorityLevel::StandardOperation,
            OperationType::DmfEvaluation,
            OperationParams::default(),
        )
        .await
        .unwrap();
    match outcome {
        PurchaseOutcome::Completed(receipt) => assert_eq!(receipt.cost, 50.0),
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(bank.balance("tuned").await, 50.0);
}
