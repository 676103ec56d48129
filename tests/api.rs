//! End-to-end CRUD against PostgreSQL. Ignored by default; run with
//! `TEST_DATABASE_URL=... cargo test -- --ignored`. Each test works in its own
//! schema, dropped afterwards.

mod support;

use axum::http::{Method, StatusCode};
use installbase_api::model::Country;
use installbase_api::{EntityStore, Outcome};
use serde_json::{json, Value};
use support::TestApp;

async fn seed_customer_and_product(app: &TestApp) -> anyhow::Result<()> {
    let seeds: [(&str, Value); 4] = [
        ("/v1/countries", json!({ "id": 1, "name": "Norway", "region": "Europe" })),
        ("/v1/product_categories", json!({ "id": 1, "name": "Pumps" })),
        (
            "/v1/products",
            json!({ "id": 1, "reference": "P-100", "name": "Pump 100", "category_id": 1, "price": "1200.50" }),
        ),
        (
            "/v1/customers",
            json!({ "id": 1, "name": "Acme", "email": "ops@acme.test", "country_id": 1, "premium_customer": "yes" }),
        ),
    ];
    for (path, body) in seeds {
        let (status, _) = app.json(Method::POST, path, Some(body)).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "seed {} -> {}", path, status);
    }
    Ok(())
}

/// One entity's walk through the whole contract.
struct Contract {
    segment: &'static str,
    name: &'static str,
    record: Value,
    patch: Value,
    replacement: Value,
}

fn merged(record: &Value, patch: &Value) -> Value {
    let mut out = record.clone();
    if let (Some(out), Some(patch)) = (out.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            out.insert(k.clone(), v.clone());
        }
    }
    out
}

fn contracts() -> Vec<Contract> {
    vec![
        Contract {
            segment: "countries",
            name: "Country",
            record: json!({ "id": 500, "name": "Testland", "region": "TestRegion" }),
            patch: json!({ "name": "Testland II" }),
            replacement: json!({ "id": 500, "name": "Other", "region": "Elsewhere" }),
        },
        Contract {
            segment: "product_categories",
            name: "Product category",
            record: json!({ "id": 500, "name": "Valves" }),
            patch: json!({ "name": "Check valves" }),
            replacement: json!({ "id": 500, "name": "Gauges" }),
        },
        Contract {
            segment: "products",
            name: "Product",
            record: json!({ "id": 500, "reference": "V-1", "name": "Valve", "category_id": 1, "price": "10" }),
            patch: json!({ "price": "12.5" }),
            replacement: json!({ "id": 500, "reference": "V-2", "name": "Valve 2", "category_id": 1, "price": "20" }),
        },
        Contract {
            segment: "customers",
            name: "Customer",
            record: json!({ "id": 500, "name": "Initech", "email": "it@initech.test", "country_id": 1, "premium_customer": "no" }),
            patch: json!({ "premium_customer": "yes", "email": "ops@initech.test" }),
            replacement: json!({ "id": 500, "name": "Initrode", "email": "a@initrode.test", "country_id": 1, "premium_customer": "no" }),
        },
        Contract {
            segment: "installations",
            name: "Installation",
            record: json!({
                "id": 500, "name": "Line 1", "description": "Boiler", "product_id": 1,
                "customer_id": 1, "installation_date": "2023-06-01"
            }),
            patch: json!({ "description": "Boiler, relocated" }),
            replacement: json!({
                "id": 500, "name": "Line 2", "description": "Chiller", "product_id": 1,
                "customer_id": 1, "installation_date": "2024-01-31"
            }),
        },
    ]
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn every_entity_honours_the_crud_contract() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;
    seed_customer_and_product(&app).await?;

    for c in contracts() {
        let collection = format!("/v1/{}", c.segment);
        let item = format!("/v1/{}/500", c.segment);

        let (status, body) = app.json(Method::POST, &collection, Some(c.record.clone())).await?;
        assert_eq!(status, StatusCode::CREATED, "{}", c.segment);
        assert_eq!(body, c.record);

        let (status, body) = app.json(Method::POST, &collection, Some(c.replacement.clone())).await?;
        assert_eq!(status, StatusCode::CONFLICT, "{}", c.segment);
        assert_eq!(body, json!({ "detail": format!("{} with id 500 already exists.", c.name) }));

        let (status, body) = app.json(Method::GET, &item, None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, c.record, "{}: duplicate create must not overwrite", c.segment);

        let (status, body) = app.json(Method::PATCH, &item, Some(c.patch.clone())).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, merged(&c.record, &c.patch), "{}", c.segment);

        let (status, body) = app.json(Method::PUT, &item, Some(c.replacement.clone())).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, c.replacement, "{}", c.segment);

        let (status, body) = app.request(Method::DELETE, &item, None).await?;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, body) = app.json(Method::GET, &item, None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": format!("{} not found", c.name) }));
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn missing_ids_are_not_found_for_every_verb() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;

    let category = json!({ "id": 42, "name": "Valves" });
    let cases = [
        (Method::GET, None),
        (Method::PUT, Some(category.clone())),
        (Method::PATCH, Some(json!({ "name": "Valves" }))),
        (Method::DELETE, None),
    ];
    for (method, body) in cases {
        let (status, body) = app.json(method.clone(), "/v1/product_categories/42", body).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        assert_eq!(body, json!({ "detail": "Product category not found" }));
    }

    let (status, body) = app.json(Method::GET, "/v1/product_categories", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]), "PUT on a missing id must not insert");

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn store_delete_returns_the_removed_row() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;
    let testland = Country { id: 9999, name: "Testland".into(), region: "TestRegion".into() };

    {
        let mut conn = app.state.connection().await?;
        let mut store = EntityStore::<Country>::new(&mut *conn, &app.state.schema);
        assert_eq!(store.create(&testland).await?, Outcome::Done(testland.clone()));
        assert_eq!(store.create(&testland).await?, Outcome::Conflict);
        assert_eq!(store.delete(9999).await?, Outcome::Done(testland.clone()));
        assert_eq!(store.delete(9999).await?, Outcome::NotFound);
        assert_eq!(store.get(9999).await?, Outcome::NotFound);
        assert!(store.list().await?.is_empty());
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn installation_dates_round_trip() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;
    seed_customer_and_product(&app).await?;

    let installation = json!({
        "id": 1000,
        "name": "Line 3",
        "description": "Main press",
        "product_id": 1,
        "customer_id": 1,
        "installation_date": "2024-02-29"
    });
    let (status, body) = app
        .json(Method::POST, "/v1/installations/", Some(installation.clone()))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, installation);

    let (status, body) = app
        .json(
            Method::PATCH,
            "/v1/installations/1000",
            Some(json!({ "installation_date": "2025-01-15" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["installation_date"], "2025-01-15");
    assert_eq!(body["description"], "Main press");

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn list_returns_every_record_in_id_order() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;

    for (id, name) in [(3, "Gamma"), (1, "Alpha"), (2, "Beta")] {
        let (status, _) = app
            .json(Method::POST, "/v1/product_categories", Some(json!({ "id": id, "name": name })))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    for path in ["/v1/product_categories", "/v1/product_categories/"] {
        let (status, body) = app.json(Method::GET, path, None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 1, "name": "Alpha" },
                { "id": 2, "name": "Beta" },
                { "id": 3, "name": "Gamma" }
            ])
        );
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn put_ignores_body_id() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;
    seed_customer_and_product(&app).await?;

    let (status, body) = app
        .json(
            Method::PUT,
            "/v1/products/1",
            Some(json!({ "id": 77, "reference": "P-101", "name": "Pump 101", "category_id": 1, "price": "999" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["reference"], "P-101");

    let (status, _) = app.json(Method::GET, "/v1/products/77", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn dangling_reference_is_a_fault_and_writes_nothing() -> anyhow::Result<()> {
    let app = TestApp::from_env().await?;

    let (status, body) = app
        .json(
            Method::POST,
            "/v1/customers",
            Some(json!({ "id": 5, "name": "Ghost", "email": "g@x.test", "country_id": 404, "premium_customer": "no" })),
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Internal Server Error" }));

    let (status, _) = app.json(Method::GET, "/v1/customers/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.json(Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    app.cleanup().await
}
