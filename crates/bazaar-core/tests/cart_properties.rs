//! Property-based and scenario tests for the cart engine and checkout.
//!
//! Properties:
//! - Merge additivity: two adds of the same product yield one line with the summed quantity
//! - Stock gate: an add fails with InsufficientStock iff quantity > current stock
//! - Order preservation: lines keep first-insertion order regardless of merges
//! - Checkout totals: total = Σ price × quantity in exact cents
//!
//! Plus the storefront scenarios and a concurrency check on a single cart.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use bazaar_core::{
    CartEngine, CartLedger, CatalogStore, CheckoutCalculator, CoreError, ErrorKind,
    InMemoryCatalog, InMemoryUserDirectory, Money, Product, ProductId, User, UserId,
};
use proptest::prelude::*;

type Engine = CartEngine<InMemoryCatalog, InMemoryUserDirectory>;
type Checkout = CheckoutCalculator<InMemoryCatalog, InMemoryUserDirectory>;

// =============================================================================
// HELPERS
// =============================================================================

struct Store {
    catalog: Arc<InMemoryCatalog>,
    ledger: Arc<CartLedger>,
    engine: Engine,
    checkout: Checkout,
}

fn store_with(products: Vec<Product>) -> Store {
    let catalog = Arc::new(InMemoryCatalog::from_products(products).unwrap());
    let users = Arc::new(InMemoryUserDirectory::new());
    users.insert(User::new(UserId(1), "ada", "ada@example.com")).unwrap();
    users.insert(User::new(UserId(2), "grace", "grace@example.com")).unwrap();
    let ledger = Arc::new(CartLedger::new());

    Store {
        engine: CartEngine::new(catalog.clone(), users.clone(), ledger.clone()),
        checkout: CheckoutCalculator::new(catalog.clone(), users, ledger.clone()),
        catalog,
        ledger,
    }
}

/// The six products the storefront ships with.
fn default_catalog() -> Vec<Product> {
    vec![
        Product::new(ProductId(1), "Smartphone", Money::from_cents(69999), 15),
        Product::new(ProductId(2), "Laptop", Money::from_cents(120000), 8),
        Product::new(ProductId(3), "Wireless Headphones", Money::from_cents(19950), 30),
        Product::new(ProductId(4), "bag", Money::from_cents(50000), 5),
        Product::new(ProductId(5), "lacoste", Money::from_cents(30000), 22),
        Product::new(ProductId(6), "jeans", Money::from_cents(25000), 1),
    ]
}

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn price_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000
}

/// A sequence of (product index 1..=6, quantity) adds.
fn adds_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((1i64..=6, 1i64..=20), 1..30)
}

fn roomy_catalog(prices: &[i64]) -> Vec<Product> {
    prices
        .iter()
        .enumerate()
        .map(|(i, cents)| {
            Product::new(
                ProductId(i as i64 + 1),
                format!("item-{}", i + 1),
                Money::from_cents(*cents),
                1_000,
            )
        })
        .collect()
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// AddToCart(U,P,q1); AddToCart(U,P,q2) → exactly one line (P, q1+q2)
    #[test]
    fn merge_is_additive(q1 in 1i64..=500, q2 in 1i64..=500) {
        let store = store_with(roomy_catalog(&[100]));

        store.engine.add_to_cart(UserId(1), ProductId(1), q1).unwrap();
        let receipt = store.engine.add_to_cart(UserId(1), ProductId(1), q2).unwrap();

        let items = store.engine.get_cart(UserId(1)).unwrap();
        prop_assert_eq!(items.len(), 1);
        prop_assert_eq!(items[0].product_id, ProductId(1));
        prop_assert_eq!(items[0].quantity, q1 + q2);
        prop_assert_eq!(receipt.line_quantity, q1 + q2);
    }

    /// The gate fails iff quantity > stock, whatever the cart already holds.
    #[test]
    fn stock_gate_depends_only_on_request_and_stock(
        stock in 0i64..50,
        already_in_cart in 0i64..50,
        requested in 1i64..100,
    ) {
        let store = store_with(vec![
            Product::new(ProductId(1), "widget", Money::from_cents(100), 1_000),
        ]);

        if already_in_cart > 0 {
            store.engine.add_to_cart(UserId(1), ProductId(1), already_in_cart).unwrap();
        }
        store.catalog.set_stock(ProductId(1), stock).unwrap();

        let result = store.engine.add_to_cart(UserId(1), ProductId(1), requested);
        if requested > stock {
            let err = result.unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Lines appear in the order each product was first added.
    #[test]
    fn order_follows_first_insertion(adds in adds_strategy()) {
        let store = store_with(roomy_catalog(&[100, 200, 300, 400, 500, 600]));

        let mut expected_order: Vec<i64> = Vec::new();
        let mut expected_qty: HashMap<i64, i64> = HashMap::new();
        for (pid, qty) in &adds {
            store.engine.add_to_cart(UserId(1), ProductId(*pid), *qty).unwrap();
            if !expected_order.contains(pid) {
                expected_order.push(*pid);
            }
            *expected_qty.entry(*pid).or_insert(0) += qty;
        }

        let items = store.engine.get_cart(UserId(1)).unwrap();
        let order: Vec<i64> = items.iter().map(|i| i.product_id.0).collect();
        prop_assert_eq!(order, expected_order);
        for item in &items {
            prop_assert_eq!(item.quantity, expected_qty[&item.product_id.0]);
        }
    }

    /// total = Σ price(Pi) · qi, exactly.
    #[test]
    fn checkout_total_is_exact_sum(
        prices in prop::collection::vec(price_strategy(), 6),
        adds in adds_strategy(),
    ) {
        let store = store_with(roomy_catalog(&prices));

        let mut expected = 0i64;
        for (pid, qty) in &adds {
            store.engine.add_to_cart(UserId(1), ProductId(*pid), *qty).unwrap();
            expected += prices[(*pid - 1) as usize] * qty;
        }

        let summary = store.checkout.checkout(UserId(1)).unwrap();
        prop_assert_eq!(summary.total_price.cents(), expected);
        prop_assert_eq!(summary.cart_items, store.engine.get_cart(UserId(1)).unwrap());
    }

    /// Carts of different users never see each other's adds.
    #[test]
    fn carts_are_per_user(adds in adds_strategy()) {
        let store = store_with(roomy_catalog(&[1, 2, 3, 4, 5, 6]));

        for (pid, qty) in &adds {
            store.engine.add_to_cart(UserId(1), ProductId(*pid), *qty).unwrap();
        }

        prop_assert!(store.engine.get_cart(UserId(2)).is_err());
        prop_assert_eq!(store.ledger.len(), 1);
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn scenario_add_five_then_three_smartphones() {
    let store = store_with(default_catalog());

    store.engine.add_to_cart(UserId(1), ProductId(1), 5).unwrap();
    store.engine.add_to_cart(UserId(1), ProductId(1), 3).unwrap();

    let items = store.engine.get_cart(UserId(1)).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!((items[0].product_id, items[0].quantity), (ProductId(1), 8));

    let summary = store.checkout.checkout(UserId(1)).unwrap();
    assert_eq!(summary.total_price.to_decimal_string(), "5599.92");
}

#[test]
fn scenario_two_jeans_exceed_stock() {
    let store = store_with(default_catalog());

    let err = store
        .engine
        .add_to_cart(UserId(1), ProductId(6), 2)
        .unwrap_err();

    match err {
        CoreError::InsufficientStock {
            product_id,
            ref product_name,
            available,
            requested,
        } => {
            assert_eq!(product_id, ProductId(6));
            assert_eq!(product_name, "jeans");
            assert_eq!((available, requested), (1, 2));
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert!(store.ledger.is_empty());
}

#[test]
fn scenario_checkout_for_unknown_user() {
    let store = store_with(default_catalog());

    let err = store.checkout.checkout(UserId(99)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn unknown_ids_are_not_found_everywhere() {
    let store = store_with(default_catalog());

    for err in [
        store.engine.add_to_cart(UserId(99), ProductId(1), 1).unwrap_err(),
        store.engine.get_cart(UserId(99)).unwrap_err(),
        store.checkout.checkout(UserId(99)).unwrap_err(),
        store.engine.add_to_cart(UserId(1), ProductId(99), 1).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    store.engine.add_to_cart(UserId(1), ProductId(2), 1).unwrap();
    store.catalog.remove(ProductId(2));
    assert_eq!(
        store.checkout.checkout(UserId(1)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn malformed_user_ids_are_invalid_input_everywhere() {
    let store = store_with(default_catalog());

    for id in [0, -7] {
        for err in [
            store.engine.add_to_cart(UserId(id), ProductId(1), 1).unwrap_err(),
            store.engine.get_cart(UserId(id)).unwrap_err(),
            store.checkout.checkout(UserId(id)).unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }
}

/// The stock gate is checked per call, so repeated adds can put more units
/// in a cart than the catalog holds. Checkout does not re-check either.
#[test]
fn repeated_adds_can_exceed_stock() {
    let store = store_with(default_catalog());

    store.engine.add_to_cart(UserId(1), ProductId(1), 10).unwrap();
    store.engine.add_to_cart(UserId(1), ProductId(1), 10).unwrap();

    let items = store.engine.get_cart(UserId(1)).unwrap();
    assert_eq!(items[0].quantity, 20);
    assert_eq!(store.catalog.get_product(ProductId(1)).map(|p| p.stock), Some(15));

    let summary = store.checkout.checkout(UserId(1)).unwrap();
    assert_eq!(summary.total_price.cents(), 69999 * 20);
}

// =============================================================================
// CONCURRENCY
// =============================================================================

/// Concurrent adds for one user serialize on the cart and lose no units.
#[test]
fn concurrent_adds_for_one_user_lose_nothing() {
    let store = store_with(roomy_catalog(&[100, 200]));
    let engine = store.engine.clone();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let pid = ProductId(t % 2 + 1);
                    engine.add_to_cart(UserId(1), pid, 1).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let items = store.engine.get_cart(UserId(1)).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().map(|i| i.quantity).sum::<i64>(), 800);
    assert!(items.iter().all(|i| i.quantity == 400));
}

/// Checkouts running alongside adds only ever observe whole merges.
#[test]
fn checkout_sees_whole_merges_under_contention() {
    let store = store_with(roomy_catalog(&[100]));
    store.engine.add_to_cart(UserId(1), ProductId(1), 1).unwrap();

    let writer = {
        let engine = store.engine.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                engine.add_to_cart(UserId(1), ProductId(1), 2).unwrap();
            }
        })
    };

    for _ in 0..200 {
        let summary = store.checkout.checkout(UserId(1)).unwrap();
        let qty = summary.cart_items[0].quantity;
        assert_eq!(qty % 2, 1);
        assert_eq!(summary.total_price.cents(), qty * 100);
    }

    writer.join().unwrap();
    assert_eq!(store.engine.get_cart(UserId(1)).unwrap()[0].quantity, 401);
}
