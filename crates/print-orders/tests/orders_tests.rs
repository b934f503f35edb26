use chrono::{TimeZone, Utc};
use print_orders::*;
use print_quote::{BindingKind, ColorMode, OrderMode, PaperSize, PrintSide, PrintType};

fn test_file(name: &str) -> OrderFile {
    OrderFile::for_upload(name, "application/pdf", 2048)
}

fn test_request() -> OrderRequest {
    OrderRequest {
        full_name: "Asha Rao".to_string(),
        phone_number: "+91 9876543210".to_string(),
        files: vec![test_file("notes.pdf")],
        total_pages: 10,
        ..Default::default()
    }
}

fn book() -> OrderBook<MemoryStore> {
    OrderBook::new(MemoryStore::new(), "xerox")
}

#[tokio::test]
async fn test_submit_prices_and_stores_order() {
    let mut book = book();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

    let record = book.submit_at(test_request(), now).await.unwrap();

    assert_eq!(record.order_id, format!("ORD-{}", now.timestamp_millis()));
    assert_eq!(record.order_date, now);
    assert_eq!(record.status, OrderStatus::Pending);
    assert_eq!(record.print_type, PrintType::BlackAndWhite);
    assert_eq!(record.total_cost, 15.0);
    assert_eq!(record.selected_pages.as_deref(), Some("all"));
    assert_eq!(record.cost_label(), "₹15.00");

    let orders = book.orders().await.unwrap();
    assert_eq!(orders, vec![record]);
}

#[tokio::test]
async fn test_submit_binding_order() {
    let mut book = book();
    let request = OrderRequest {
        mode: OrderMode::Binding {
            kind: BindingKind::Soft,
            color_mode: ColorMode::Color,
        },
        print_side: PrintSide::Double,
        selected_pages: "1-4".to_string(),
        copies: 2,
        ..test_request()
    };

    let record = book.submit(request).await.unwrap();

    // (2 sheets * 13 + 25) * 2
    assert_eq!(record.total_cost, 102.0);
    assert_eq!(record.print_type, PrintType::SoftBinding);
    assert_eq!(record.binding_color_type, Some(ColorMode::Color));
    assert_eq!(record.mode().binding(), Some(BindingKind::Soft));
}

#[tokio::test]
async fn test_invalid_selection_is_rejected() {
    let mut book = book();
    let request = OrderRequest {
        selected_pages: "1-4, 12".to_string(),
        ..test_request()
    };

    match book.submit(request).await {
        Err(OrderError::InvalidPageSelection(_)) => {}
        other => panic!("Expected InvalidPageSelection, got {:?}", other),
    }
    assert!(book.orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_color_requires_a_range() {
    let mut book = book();
    let request = OrderRequest {
        mode: OrderMode::PlainPrint {
            color_mode: ColorMode::Custom,
        },
        selected_pages: "not checked".to_string(),
        ..test_request()
    };

    match book.submit(request.clone()).await {
        Err(OrderError::MissingPageSelection) => {}
        other => panic!("Expected MissingPageSelection, got {:?}", other),
    }

    // Custom ranges are not strictly validated; bad tokens just cost nothing
    let request = OrderRequest {
        color_pages: "1-3".to_string(),
        bw_pages: "4-6, 99".to_string(),
        ..request
    };
    let record = book.submit(request).await.unwrap();
    assert_eq!(record.total_cost, 3.0 * 8.0 + 3.0 * 1.5);
    assert_eq!(record.color_pages.as_deref(), Some("1-3"));
}

#[tokio::test]
async fn test_custom_quote_order_uses_placeholders() {
    let mut book = book();
    let request = OrderRequest {
        mode: OrderMode::CustomQuote,
        copies: 40,
        paper_size: PaperSize::A3,
        print_side: PrintSide::Double,
        selected_pages: "garbage".to_string(),
        special_instructions: Some("Laminate the cover".to_string()),
        ..test_request()
    };

    let record = book.submit(request).await.unwrap();

    assert_eq!(record.print_type, PrintType::CustomPrint);
    assert_eq!(record.total_cost, 0.0);
    assert_eq!(record.copies, 1);
    assert_eq!(record.paper_size, PaperSize::A4);
    assert_eq!(record.print_side, PrintSide::Single);
    assert_eq!(record.selected_pages.as_deref(), Some("all"));
    assert_eq!(record.cost_label(), "Quote Required");
    assert_eq!(
        record.special_instructions.as_deref(),
        Some("Laminate the cover")
    );
}

#[tokio::test]
async fn test_form_validation() {
    let mut book = book();

    let no_files = OrderRequest {
        files: Vec::new(),
        ..test_request()
    };
    assert!(matches!(book.submit(no_files).await, Err(OrderError::NoFiles)));

    let short_name = OrderRequest {
        full_name: " A ".to_string(),
        ..test_request()
    };
    assert!(matches!(
        book.submit(short_name).await,
        Err(OrderError::NameTooShort)
    ));

    let short_phone = OrderRequest {
        phone_number: "12345".to_string(),
        ..test_request()
    };
    assert!(matches!(
        book.submit(short_phone).await,
        Err(OrderError::InvalidPhone)
    ));
}

#[tokio::test]
async fn test_order_ids_are_unique_within_a_millisecond() {
    let mut book = book();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

    let first = book.submit_at(test_request(), now).await.unwrap();
    let second = book.submit_at(test_request(), now).await.unwrap();

    assert_ne!(first.order_id, second.order_id);
    assert_eq!(book.orders().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_find_trims_order_id() {
    let mut book = book();
    let record = book.submit(test_request()).await.unwrap();

    let found = book.find(&format!("  {} ", record.order_id)).await.unwrap();
    assert_eq!(found, Some(record));
    assert_eq!(book.find("ORD-0").await.unwrap(), None);
}

#[tokio::test]
async fn test_update_status() {
    let mut book = book();
    let record = book.submit(test_request()).await.unwrap();

    let updated = book
        .update_status(&record.order_id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Completed);

    let found = book.find(&record.order_id).await.unwrap().unwrap();
    assert_eq!(found.status, OrderStatus::Completed);
    assert_eq!(found.status.describe(), "Ready for pickup");

    match book.update_status("ORD-missing", OrderStatus::Cancelled).await {
        Err(OrderError::NotFound(id)) => assert_eq!(id, "ORD-missing"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_clear_orders() {
    let mut book = book();
    book.submit(test_request()).await.unwrap();
    book.clear().await.unwrap();
    assert!(book.orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_legacy_records_are_normalized() {
    let mut store = MemoryStore::new();
    let legacy = r#"[{
        "orderId": "ORD-1700000000000",
        "fullName": "Old Customer",
        "phoneNumber": "9876543210",
        "printType": "color",
        "copies": 1,
        "paperSize": "a4",
        "printSide": "single",
        "selectedPages": "1-2",
        "files": [{ "name": "scan.pdf", "size": 100, "type": "application/pdf" }],
        "orderDate": "2023-11-14T22:13:20Z",
        "totalCost": 16
    }]"#;
    store
        .put(&namespaced("xerox", ORDERS_KEY), legacy.to_string())
        .await
        .unwrap();

    let mut book = OrderBook::new(store, "xerox");
    let orders = book.orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert_eq!(orders[0].files[0].path.as_deref(), Some("/uploads/scan.pdf"));

    // Normalized records are written back
    let store = book.into_store();
    let saved = store
        .get(&namespaced("xerox", ORDERS_KEY))
        .await
        .unwrap()
        .unwrap();
    assert!(saved.contains("\"status\":\"pending\""));
    assert!(saved.contains("/uploads/scan.pdf"));
}

#[tokio::test]
async fn test_record_wire_format() {
    let mut book = book();
    let request = OrderRequest {
        mode: OrderMode::Binding {
            kind: BindingKind::Spiral,
            color_mode: ColorMode::BlackAndWhite,
        },
        ..test_request()
    };
    let record = book.submit(request).await.unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["printType"], "spiralBinding");
    assert_eq!(json["bindingColorType"], "blackAndWhite");
    assert_eq!(json["paperSize"], "a4");
    assert_eq!(json["printSide"], "single");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["files"][0]["type"], "application/pdf");
    // 10 * 1.5 + 25
    assert_eq!(json["totalCost"], 40.0);
}

#[tokio::test]
async fn test_custom_rate_card() {
    let rates = print_quote::RateCard {
        bw_single: 2.0,
        ..Default::default()
    };
    let mut book = book().with_rates(rates);
    let record = book.submit(test_request()).await.unwrap();
    assert_eq!(record.total_cost, 20.0);
}

#[test]
fn test_order_status_parse() {
    assert_eq!("processing".parse::<OrderStatus>().unwrap(), OrderStatus::Processing);
    assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    assert!("shipped".parse::<OrderStatus>().is_err());
}
