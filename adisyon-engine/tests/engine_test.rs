use adisyon_core::{OrderStatus, PaymentMethod};
use adisyon_engine::{EngineError, Occupancy, OrderEngine, OrderView};
use adisyon_store::{seed, Db};
use uuid::Uuid;

async fn setup() -> (OrderEngine, Uuid) {
    let db = Db::connect_in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let table_id = seed::insert_table(&db, "Masa 1").await.unwrap();
    (OrderEngine::new(db), table_id)
}

async fn menu_item(engine: &OrderEngine, name: &str, price: f64) -> Uuid {
    engine
        .create_menu_item(name, "Ana Yemek", price)
        .await
        .unwrap()
        .id
}

fn assert_totals(view: &OrderView, expected: f64) {
    assert_eq!(view.total_amount, expected);
    assert_eq!(view.computed_total, expected);
}

#[tokio::test]
async fn opening_a_table_twice_reuses_the_open_order() {
    let (engine, table_id) = setup().await;

    let (first, created) = engine.open_or_create(table_id).await.unwrap();
    assert!(created);
    assert_eq!(first.status, OrderStatus::Open);
    assert_eq!(first.table_name, "Masa 1");
    assert_totals(&first, 0.0);

    let (second, created) = engine.open_or_create(table_id).await.unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);

    let open = engine.list_open_orders().await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, first.id);
}

#[tokio::test]
async fn closing_frees_the_table_for_a_new_order() {
    let (engine, table_id) = setup().await;

    let (first, _) = engine.open_or_create(table_id).await.unwrap();
    engine.close_order(first.id, "cash").await.unwrap();

    let (second, created) = engine.open_or_create(table_id).await.unwrap();
    assert!(created);
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn unknown_table_is_rejected() {
    let (engine, _) = setup().await;
    let err = engine.open_or_create(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound("table")));
}

#[tokio::test]
async fn totals_track_additions_and_cancellations() {
    let (engine, table_id) = setup().await;
    let kebap = menu_item(&engine, "Adana Kebap", 320.0).await;
    let su = menu_item(&engine, "Su", 20.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();

    let view = engine.add_item(order.id, kebap, 2, None).await.unwrap();
    assert_totals(&view, 640.0);
    let kebap_line = view.items[0].id;
    assert_eq!(view.items[0].line_total, 640.0);

    let view = engine
        .set_item_status(kebap_line, "cancelled")
        .await
        .unwrap();
    assert_totals(&view, 0.0);

    let view = engine.add_item(order.id, su, 3, None).await.unwrap();
    assert_totals(&view, 60.0);

    let closed = engine.close_order(order.id, "cash").await.unwrap();
    assert_eq!(closed.status, OrderStatus::Closed);
    assert_eq!(closed.payment_method, Some(PaymentMethod::Cash));
    assert!(closed.closed_at.is_some());
    assert_totals(&closed, 60.0);
}

#[tokio::test]
async fn unit_price_is_frozen_at_add_time() {
    let (engine, table_id) = setup().await;
    let item = engine
        .create_menu_item("Lahmacun", "Ana Yemek", 140.0)
        .await
        .unwrap();
    let (order, _) = engine.open_or_create(table_id).await.unwrap();
    engine.add_item(order.id, item.id, 1, None).await.unwrap();

    // Deactivate the item; the existing line keeps the copied 140.
    engine.set_menu_item_active(item.id, false).await.unwrap();
    let view = engine.get_order_view(order.id).await.unwrap().unwrap();
    assert_eq!(view.items[0].unit_price, 140.0);
    assert_totals(&view, 140.0);
}

#[tokio::test]
async fn items_are_listed_most_recent_first() {
    let (engine, table_id) = setup().await;
    let kebap = menu_item(&engine, "Adana Kebap", 320.0).await;
    let su = menu_item(&engine, "Su", 20.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();

    engine.add_item(order.id, kebap, 1, None).await.unwrap();
    let view = engine.add_item(order.id, su, 1, None).await.unwrap();

    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].menu_item_name, "Su");
    assert_eq!(view.items[1].menu_item_name, "Adana Kebap");
}

#[tokio::test]
async fn closed_orders_reject_new_items_and_second_close() {
    let (engine, table_id) = setup().await;
    let su = menu_item(&engine, "Su", 20.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();
    engine.add_item(order.id, su, 1, None).await.unwrap();
    let closed = engine.close_order(order.id, "card").await.unwrap();

    let err = engine.add_item(order.id, su, 1, None).await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    let err = engine.close_order(order.id, "cash").await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    // The failed attempts changed nothing.
    let after = engine.get_order_view(order.id).await.unwrap().unwrap();
    assert_eq!(after.items.len(), 1);
    assert_eq!(after.payment_method, Some(PaymentMethod::Card));
    assert_eq!(after.closed_at, closed.closed_at);
}

#[tokio::test]
async fn item_status_stays_mutable_after_close() {
    let (engine, table_id) = setup().await;
    let kebap = menu_item(&engine, "Adana Kebap", 320.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();
    let view = engine.add_item(order.id, kebap, 1, None).await.unwrap();
    let line = view.items[0].id;
    engine.close_order(order.id, "cash").await.unwrap();

    // Cancelling a line after close still updates the cached total.
    let view = engine.set_item_status(line, "cancelled").await.unwrap();
    assert_eq!(view.status, OrderStatus::Closed);
    assert_totals(&view, 0.0);
}

#[tokio::test]
async fn input_validation() {
    let (engine, table_id) = setup().await;
    let su = menu_item(&engine, "Su", 20.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();

    let err = engine.add_item(order.id, su, 0, None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let err = engine
        .add_item(order.id, Uuid::new_v4(), 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("menu item")));

    let err = engine
        .add_item(Uuid::new_v4(), su, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("order")));

    let err = engine.close_order(order.id, "bitcoin").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let err = engine
        .close_order(Uuid::new_v4(), "cash")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("order")));

    let view = engine.add_item(order.id, su, 1, None).await.unwrap();
    let line = view.items[0].id;
    let err = engine.set_item_status(line, "ready").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    let err = engine
        .set_item_status(Uuid::new_v4(), "served")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("order item")));
}

#[tokio::test]
async fn inactive_menu_items_cannot_be_ordered() {
    let (engine, table_id) = setup().await;
    let item = engine
        .create_menu_item("Künefe", "Tatlı", 130.0)
        .await
        .unwrap();
    engine.set_menu_item_active(item.id, false).await.unwrap();
    assert!(engine.list_menu_items().await.unwrap().is_empty());

    let (order, _) = engine.open_or_create(table_id).await.unwrap();
    let err = engine.add_item(order.id, item.id, 1, None).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound("menu item")));
}

#[tokio::test]
async fn menu_item_validation() {
    let (engine, _) = setup().await;

    let err = engine
        .create_menu_item("  ", "Tatlı", 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let err = engine
        .create_menu_item("Baklava", "Tatlı", -1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let item = engine.create_menu_item("Baklava", "  ", 155.0).await.unwrap();
    assert_eq!(item.category, "Diğer");

    let err = engine
        .set_menu_item_active(Uuid::new_v4(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("menu item")));
}

#[tokio::test]
async fn kitchen_queue_is_fifo_and_only_shows_pending_lines_of_open_orders() {
    let (engine, table_id) = setup().await;
    let kebap = menu_item(&engine, "Adana Kebap", 320.0).await;
    let ayran = menu_item(&engine, "Ayran", 45.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();

    engine
        .add_item(order.id, kebap, 1, Some("acısız".to_string()))
        .await
        .unwrap();
    let view = engine.add_item(order.id, ayran, 2, None).await.unwrap();
    let ayran_line = view.items[0].id;

    let tickets = engine.kitchen_tickets().await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].menu_item_name, "Adana Kebap");
    assert_eq!(tickets[0].notes.as_deref(), Some("acısız"));
    assert_eq!(tickets[1].menu_item_name, "Ayran");

    engine.set_item_status(ayran_line, "prepared").await.unwrap();
    let tickets = engine.kitchen_tickets().await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].menu_item_name, "Adana Kebap");

    // Closing the order clears its remaining pending lines from the queue.
    engine.close_order(order.id, "qr").await.unwrap();
    assert!(engine.kitchen_tickets().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_notes_are_stored_as_null() {
    let (engine, table_id) = setup().await;
    let su = menu_item(&engine, "Su", 20.0).await;
    let (order, _) = engine.open_or_create(table_id).await.unwrap();

    let view = engine
        .add_item(order.id, su, 1, Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(view.items[0].notes, None);
}

#[tokio::test]
async fn table_status_reflects_occupancy() {
    let (engine, table_id) = setup().await;

    let status = engine.table_status().await.unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].occupancy, Occupancy::Available);
    assert_eq!(status[0].open_order_id, None);

    let (order, _) = engine.open_or_create(table_id).await.unwrap();
    let status = engine.table_status().await.unwrap();
    assert_eq!(status[0].occupancy, Occupancy::Occupied);
    assert_eq!(status[0].open_order_id, Some(order.id));

    engine.close_order(order.id, "cash").await.unwrap();
    let status = engine.table_status().await.unwrap();
    assert_eq!(status[0].occupancy, Occupancy::Available);
}

#[tokio::test]
async fn daily_report_aggregates_todays_closed_orders() {
    let (engine, table_id) = setup().await;
    let kebap = menu_item(&engine, "Adana Kebap", 320.0).await;
    let su = menu_item(&engine, "Su", 20.0).await;

    // Order 1: 2x kebap plus a cancelled water, paid cash.
    let (first, _) = engine.open_or_create(table_id).await.unwrap();
    engine.add_item(first.id, kebap, 2, None).await.unwrap();
    let view = engine.add_item(first.id, su, 1, None).await.unwrap();
    engine
        .set_item_status(view.items[0].id, "cancelled")
        .await
        .unwrap();
    engine.close_order(first.id, "cash").await.unwrap();

    // Order 2: 3x water, paid card. Still-open orders must not count.
    let (second, _) = engine.open_or_create(table_id).await.unwrap();
    engine.add_item(second.id, su, 3, None).await.unwrap();
    engine.close_order(second.id, "card").await.unwrap();
    let (open, _) = engine.open_or_create(table_id).await.unwrap();
    engine.add_item(open.id, kebap, 1, None).await.unwrap();

    let report = engine.daily_report(None).await.unwrap();
    assert_eq!(report.summary.closed_orders, 2);
    assert_eq!(report.summary.revenue, 700.0);

    assert_eq!(report.payments.len(), 2);
    assert_eq!(report.payments[0].method, PaymentMethod::Cash);
    assert_eq!(report.payments[0].count, 1);
    assert_eq!(report.payments[0].amount, 640.0);
    assert_eq!(report.payments[1].method, PaymentMethod::Card);
    assert_eq!(report.payments[1].amount, 60.0);

    // Cancelled lines are excluded from top sellers; water sold 3, kebap 2.
    assert_eq!(report.top_items.len(), 2);
    assert_eq!(report.top_items[0].name, "Su");
    assert_eq!(report.top_items[0].qty, 3);
    assert_eq!(report.top_items[0].amount, 60.0);
    assert_eq!(report.top_items[1].name, "Adana Kebap");
    assert_eq!(report.top_items[1].qty, 2);
    assert_eq!(report.top_items[1].amount, 640.0);
}

#[tokio::test]
async fn daily_report_for_an_empty_day_is_all_zeros() {
    let (engine, _) = setup().await;

    let report = engine.daily_report(Some("2000-01-01")).await.unwrap();
    assert_eq!(report.date.to_string(), "2000-01-01");
    assert_eq!(report.summary.closed_orders, 0);
    assert_eq!(report.summary.revenue, 0.0);
    assert!(report.payments.is_empty());
    assert!(report.top_items.is_empty());

    let err = engine.daily_report(Some("not-a-date")).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[tokio::test]
async fn demo_seed_is_idempotent() {
    let db = Db::connect_in_memory().await.unwrap();
    db.migrate().await.unwrap();
    seed::ensure_demo_data(&db).await.unwrap();
    seed::ensure_demo_data(&db).await.unwrap();

    let engine = OrderEngine::new(db);
    let menu = engine.list_menu_items().await.unwrap();
    assert_eq!(menu.len(), 9);
    let tables = engine.table_status().await.unwrap();
    assert_eq!(tables.len(), 12);
    assert_eq!(tables[0].name, "Masa 1");
}
