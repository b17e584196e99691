//! End-to-end API flows against PostgreSQL
//!
//! Run with `cargo test -- --ignored` on a machine with Docker.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{db_test, DateFixtures, TestDatabase};

fn server(db: &TestDatabase) -> TestServer {
    TestServer::new(create_router(db.repositories(), ApiConfig::default())).expect("test server")
}

async fn create(server: &TestServer, path: &str, body: Value) -> Value {
    let response = server.post(path).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn id(value: &Value) -> String {
    value["id"].as_str().expect("id").to_string()
}

db_test!(test_letter_commission_flow, |db| {
    let server = server(&db);
    let bank = create(&server, "/api/banks", json!({"name": "Ziraat"})).await;
    let project = create(&server, "/api/projects", json!({"name": "Ring Road"})).await;

    let letter = create(
        &server,
        "/api/guarantee-letters",
        json!({
            "bankId": id(&bank),
            "projectId": id(&project),
            "letterType": "teminat",
            "contractAmount": "1000000",
            "letterPercentage": "10",
            "letterAmount": "100000",
            "commissionRate": "2",
            "bsmvAndOtherCosts": "500",
            "currency": "try",
            "purchaseDate": "2024-01-10",
            "letterDate": "2024-01-12T00:00:00Z",
            "expiryDate": DateFixtures::days_after(20).to_string()
        }),
    )
    .await;
    assert_eq!(letter["letterType"], "standard");
    assert_eq!(letter["currency"], "TRY");
    assert_eq!(letter["bank"]["name"], "Ziraat");

    for (amount, date) in [("1000", "2024-02-01"), ("700", "2024-03-01")] {
        create(
            &server,
            "/api/letter-payments",
            json!({
                "letterId": id(&letter),
                "paymentDate": date,
                "amount": amount,
                "bsmv": "5"
            }),
        )
        .await;
    }

    let summary: Value = server
        .get(&format!("/api/letter-payments/{}/summary", id(&letter)))
        .await
        .json();
    // 100000 * 2% + 500
    assert_eq!(summary["totalCommission"].as_str().map(parse), Some(parse("2500")));
    assert_eq!(summary["totalPaid"].as_str().map(parse), Some(parse("1700")));
    assert_eq!(summary["remainingCommission"].as_str().map(parse), Some(parse("800")));
    assert_eq!(summary["payments"], 2);
    assert_eq!(summary["lastPaymentDate"], "2024-03-01");

    let payments: Vec<Value> = server
        .get(&format!("/api/letter-payments/letter/{}", id(&letter)))
        .await
        .json();
    assert_eq!(payments.len(), 2);

    let summaries: Vec<Value> = server.get("/api/letter-payments/summaries").await.json();
    assert_eq!(summaries.len(), 1);

    server
        .delete(&format!("/api/guarantee-letters/{}", id(&letter)))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let payments: Vec<Value> = server
        .get(&format!("/api/letter-payments/letter/{}", id(&letter)))
        .await
        .json();
    assert!(payments.is_empty());
});

db_test!(test_deleted_bank_shows_as_null_relation, |db| {
    let server = server(&db);
    let bank = create(&server, "/api/banks", json!({"name": "Denizbank"})).await;
    let project = create(&server, "/api/projects", json!({"name": "Hospital"})).await;
    let credit = create(
        &server,
        "/api/credits",
        json!({
            "bankId": id(&bank),
            "projectId": id(&project),
            "principalAmount": "5000",
            "interestAmount": "250",
            "currency": "USD",
            "creditDate": "2024-01-01",
            "maturityDate": "2025-01-01"
        }),
    )
    .await;
    assert_eq!(credit["status"], "ongoing");

    server
        .delete(&format!("/api/banks/{}", id(&bank)))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let fetched: Value = server.get(&format!("/api/credits/{}", id(&credit))).await.json();
    assert!(fetched["bank"].is_null());
    assert_eq!(fetched["project"]["name"], "Hospital");

    let by_project: Vec<Value> = server
        .get(&format!("/api/credits/project/{}", id(&project)))
        .await
        .json();
    assert_eq!(by_project.len(), 1);
});

db_test!(test_dashboard_converts_with_stored_rates, |db| {
    let server = server(&db);
    let bank = create(&server, "/api/banks", json!({"name": "Halkbank"})).await;
    let project = create(&server, "/api/projects", json!({"name": "Canal"})).await;

    server
        .post("/api/exchange-rates")
        .json(&json!({"fromCurrency": "USD", "toCurrency": "TRY", "rate": "30"}))
        .await
        .assert_status_ok();

    create(
        &server,
        "/api/guarantee-letters",
        json!({
            "bankId": id(&bank),
            "projectId": id(&project),
            "letterType": "advance",
            "contractAmount": "1000",
            "letterPercentage": "10",
            "letterAmount": "100",
            "commissionRate": "1",
            "currency": "USD",
            "purchaseDate": "2024-01-01",
            "letterDate": "2024-01-01"
        }),
    )
    .await;

    let stats: Value = server
        .get("/api/dashboard-stats")
        .add_query_param("currency", "TRY")
        .await
        .json();
    assert_eq!(stats["currency"], "TRY");
    assert_eq!(stats["totalLetters"], 1);
    assert_eq!(stats["totalLetterAmount"].as_str().map(parse), Some(parse("3000")));
    assert_eq!(stats["bankLetterCounts"]["Halkbank"], 1);

    let conversion: Value = server
        .get("/api/exchange-rates/convert")
        .add_query_param("amount", "60")
        .add_query_param("from", "TRY")
        .add_query_param("to", "USD")
        .await
        .json();
    assert_eq!(conversion["source"], "inverse");
    assert_eq!(conversion["converted"].as_str().map(parse), Some(parse("2")));

    let response = server
        .get("/api/exchange-rates/convert")
        .add_query_param("amount", rust_decimal::Decimal::MAX.to_string())
        .add_query_param("from", "USD")
        .add_query_param("to", "TRY")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "amount");
});

db_test!(test_unknown_records_are_not_found, |db| {
    let server = server(&db);
    let missing = "550e8400-e29b-41d4-a716-446655440099";

    let response = server.get(&format!("/api/guarantee-letters/{missing}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "GuaranteeLetter not found");

    server
        .get(&format!("/api/letter-payments/{missing}/summary"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
});

fn parse(raw: &str) -> rust_decimal::Decimal {
    raw.parse().expect("decimal")
}
