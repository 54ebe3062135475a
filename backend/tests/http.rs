use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use survey_server::config::Config;
use survey_server::services;
use survey_server::state::AppState;
use survey_server::storage::{MemoryStore, SurveyStore};

const BOUNDARY: &str = "survey-test-boundary";
const ORDERS_CSV: &str = "OS;Status Serviço;Cliente;Serviço;Data 1;Prestador\n\
                          101;Concluído;Ana;Limpeza;01/05/2024;Joana\n\
                          102;Cancelado;Beto;Passadoria;02/05/2024;Rita\n\
                          103;Concluído;Carla;Faxina;03/05/2024;Dora\n";

fn state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let config = Config {
        public_url: "https://survey.example.com".to_string(),
        ..Config::default()
    };
    (AppState::new(store.clone(), config), store)
}

fn multipart_body(filename: &str, content: &str) -> Vec<u8> {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = filename,
        c = content
    )
    .into_bytes()
}

fn upload_request(filename: &str, content: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/orders/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(filename, content))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(services::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn upload_generate_answer_and_report() {
    let (state, _store) = state();
    let app = app!(state);

    let resp = test::call_service(&app, upload_request("base.csv", ORDERS_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary["orders"], 3);

    let eligible: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/orders/eligible").to_request(),
    )
    .await;
    let eligible_ids: Vec<&str> = eligible
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_id"].as_str().unwrap())
        .collect();
    assert_eq!(eligible_ids, vec!["101", "103"]);

    let links: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/links/generate")
            .set_json(json!({ "order_ids": ["101", "103"] }))
            .to_request(),
    )
    .await;
    let token = links[0]["token"].as_str().unwrap().to_string();
    assert_eq!(
        links[0]["url"],
        format!("https://survey.example.com?link_id={}", token)
    );

    let view: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/view?link_id={}", token))
            .to_request(),
    )
    .await;
    assert_eq!(view["view"], "survey");
    assert_eq!(view["order"]["client"], "Ana");
    assert!(view.get("dashboard").is_none());

    for (rating, expected) in [(5, "recorded"), (1, "already_recorded")] {
        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/survey/submit")
                .set_json(json!({ "link_id": token, "rating": rating, "comment": "ótimo" }))
                .to_request(),
        )
        .await;
        assert_eq!(body["outcome"], expected);
    }

    let dashboard: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/dashboard").to_request(),
    )
    .await;
    assert_eq!(dashboard["stats"]["links"], 2);
    assert_eq!(dashboard["stats"]["answered"], 1);
    assert_eq!(dashboard["stats"]["response_rate"], 50.0);
    assert_eq!(dashboard["stats"]["mean_rating"], 5.0);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/dashboard/export").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    let csv = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&csv).lines().count(), 3);
}

#[actix_web::test]
async fn view_without_link_id_is_the_dashboard() {
    let (state, _store) = state();
    let app = app!(state);

    let view: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/view").to_request(),
    )
    .await;
    assert_eq!(view["view"], "dashboard");
    assert_eq!(view["dashboard"]["stats"]["links"], 0);
}

#[actix_web::test]
async fn unknown_link_id_is_not_found_and_hides_the_dashboard() {
    let (state, _store) = state();
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/view?link_id=forged")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let view: Value = test::read_body_json(resp).await;
    assert_eq!(view["view"], "invalid_link");
    assert_eq!(view["message"], "link invalid or not found");
}

#[actix_web::test]
async fn upload_missing_provider_keeps_the_previous_catalog() {
    let (state, store) = state();
    let app = app!(state);

    let resp = test::call_service(&app, upload_request("base.csv", ORDERS_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let broken = "order_id,status,client,service,date\n9,Concluído,Zé,Limpeza,hoje\n";
    let resp = test::call_service(&app, upload_request("base.csv", broken).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("provider"));

    let ids: Vec<String> = store
        .load_orders()
        .unwrap()
        .into_iter()
        .map(|o| o.order_id)
        .collect();
    assert_eq!(ids, vec!["101", "102", "103"]);
}

#[actix_web::test]
async fn unsupported_upload_is_rejected() {
    let (state, _store) = state();
    let app = app!(state);

    let resp = test::call_service(&app, upload_request("base.pdf", "x").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn a_second_file_part_is_rejected() {
    let (state, store) = state();
    let app = app!(state);

    let second = "OS;Status Serviço;Cliente;Serviço;Data 1;Prestador\n\
                  900;Concluído;Zé;Limpeza;09/05/2024;Joana\n";
    let mut body = multipart_body("base.csv", ORDERS_CSV);
    // Drop the closing boundary and append another `file` part.
    body.truncate(body.len() - format!("--{}--\r\n", BOUNDARY).len());
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"other.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            c = second
        )
        .as_bytes(),
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert!(error["error"].as_str().unwrap().contains("one file"));
    assert!(store.load_orders().unwrap().is_empty());
}

#[actix_web::test]
async fn submit_requires_a_resolvable_link_and_a_valid_rating() {
    let (state, store) = state();
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/survey/submit")
            .set_json(json!({ "link_id": "forged", "rating": 4 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/survey/submit")
            .set_json(json!({ "link_id": "forged", "rating": 7 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.load_responses().unwrap().is_empty());
}

#[actix_web::test]
async fn generating_for_a_cancelled_order_conflicts() {
    let (state, _store) = state();
    let app = app!(state);
    test::call_service(&app, upload_request("base.csv", ORDERS_CSV).to_request()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/links/generate")
            .set_json(json!({ "order_ids": ["102"] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/links/generate")
            .set_json(json!({ "order_ids": ["999"] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn reset_pending_keeps_answered_links() {
    let (state, store) = state();
    let app = app!(state);
    test::call_service(&app, upload_request("base.csv", ORDERS_CSV).to_request()).await;

    let links: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/links/generate")
            .set_json(json!({ "order_ids": ["101", "103"] }))
            .to_request(),
    )
    .await;
    let answered = links[0]["token"].as_str().unwrap().to_string();
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/survey/submit")
            .set_json(json!({ "link_id": answered, "rating": 3 }))
            .to_request(),
    )
    .await;

    let summary: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/links/reset")
            .set_json(json!({ "scope": "pending" }))
            .to_request(),
    )
    .await;
    assert_eq!(summary, json!({ "removed": 1, "kept": 1 }));

    let remaining = store.load_links().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, answered);

    let resolved: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/links/{}", answered))
            .to_request(),
    )
    .await;
    assert_eq!(resolved["order_id"], "101");
}
