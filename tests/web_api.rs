use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use schedule_matcher::store::{encode_share, AvailabilityState};
use schedule_matcher::web::{configure, session_middleware, SessionStates};

fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "schedule-matcher")
        .expect("response should set the session cookie")
        .into_owned()
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(SessionStates::default()))
                .wrap(session_middleware(Key::generate(), false))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn fresh_session_has_default_state() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/state").to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;

    assert_eq!(state, AvailabilityState::default());
}

#[actix_web::test]
async fn index_page_is_served() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn add_intervals_and_find_matches() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/intervals/you")
        .set_json(json!({"day": "Mon", "start": "09:00", "end": "10:00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/api/intervals/them")
        .cookie(cookie.clone())
        .set_json(json!({"day": "Mon", "start": "09:30", "end": "10:30"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let state: AvailabilityState = test::read_body_json(resp).await;
    assert_eq!(state.you.len(), 1);
    assert_eq!(state.them[0].start_min, 570);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .cookie(cookie)
        .set_json(json!({"minDuration": 15}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["labelYou"], "You");
    let texts: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Mon 09:30 - 09:45", "Mon 09:45 - 10:00"]);
}

#[actix_web::test]
async fn invalid_interval_is_a_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/intervals/you")
        .set_json(json!({"day": "Mon", "start": "10:00", "end": "09:00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn non_positive_duration_is_rejected() {
    let app = app!();
    for minutes in [0, -30] {
        let req = test::TestRequest::post()
            .uri("/api/match")
            .set_json(json!({"minDuration": minutes}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn malformed_json_gets_json_error() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/match")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn remove_interval_by_id() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::post().uri("/api/sample").to_request()).await;
    let cookie = session_cookie(&resp);
    let state: AvailabilityState = test::read_body_json(resp).await;
    assert_eq!(state.them.len(), 3);
    let id = state.them[1].id.clone();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/intervals/them/{id}"))
        .cookie(cookie.clone())
        .to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state.them.len(), 2);
    assert!(state.them.iter().all(|entry| entry.id != id));

    let req = test::TestRequest::delete()
        .uri("/api/intervals/them/missing")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn import_export_and_share() {
    let app = app!();
    let document = json!({
        "you": [{"id": "aaaa1111", "day": "Wed", "startMin": 600, "endMin": 645}],
        "them": [{"id": "bbbb2222", "day": "Wed", "startMin": 600, "endMin": 700}],
        "labelYou": "Ann",
        "labelThem": "Ben"
    });

    let req = test::TestRequest::post()
        .uri("/api/import")
        .set_payload(document.to_string())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/api/export").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .contains("schedule-matcher.json"));
    let exported: AvailabilityState = test::read_body_json(resp).await;
    assert_eq!(exported.label_them, "Ben");

    let req = test::TestRequest::get().uri("/api/share").cookie(cookie.clone()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let fragment = body["fragment"].as_str().unwrap();
    assert_eq!(fragment, format!("#share={}", encode_share(&exported).unwrap()));

    let req = test::TestRequest::post()
        .uri("/api/match")
        .cookie(cookie)
        .set_json(json!({"minDuration": 30}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);
    assert_eq!(body["suggestions"][0]["text"], "Wed 10:00 - 10:30");
}

#[actix_web::test]
async fn opening_a_share_link_replaces_the_state() {
    let app = app!();
    let mut shared = AvailabilityState::default();
    shared.set_labels("Kim", "Lee");
    let encoded = format!("#share={}", encode_share(&shared).unwrap());

    let req = test::TestRequest::post()
        .uri("/api/share")
        .set_json(json!({"encoded": encoded}))
        .to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state.label_you, "Kim");

    let req = test::TestRequest::post()
        .uri("/api/share")
        .set_json(json!({"encoded": "#share=???"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn import_rejects_invalid_intervals() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/import")
        .set_payload(r#"{"you": [{"id": "x", "day": "Mon", "startMin": 600, "endMin": 600}]}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn schedule_confirms_the_slot() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/schedule")
        .set_json(json!({"day": "Tue", "start": "14:00", "end": "14:30"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Scheduled call: Tue 14:00 - 14:30");
}

#[actix_web::test]
async fn labels_and_clear() {
    let app = app!();
    let req = test::TestRequest::put()
        .uri("/api/labels")
        .set_json(json!({"labelYou": "Me", "labelThem": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);
    let state: AvailabilityState = test::read_body_json(resp).await;
    assert_eq!((state.label_you.as_str(), state.label_them.as_str()), ("Me", "GPT"));

    let req = test::TestRequest::delete().uri("/api/state").cookie(cookie).to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state, AvailabilityState::default());
}

#[actix_web::test]
async fn dozens_of_intervals_per_side_are_kept() {
    let app = app!();
    let mut cookie: Option<Cookie<'static>> = None;

    for side in ["you", "them"] {
        for i in 0..40u32 {
            let day = ["Mon", "Tue", "Wed", "Thu", "Fri"][(i % 5) as usize];
            let start = 8 + i / 5;
            let mut req = test::TestRequest::post().uri(&format!("/api/intervals/{side}")).set_json(json!({
                "day": day,
                "start": format!("{start:02}:00"),
                "end": format!("{start:02}:45"),
            }));
            if let Some(cookie) = cookie.clone() {
                req = req.cookie(cookie);
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "{side} interval {i} refused");
            if cookie.is_none() {
                cookie = Some(session_cookie(&resp));
            }
        }
    }
    let cookie = cookie.unwrap();

    let req = test::TestRequest::get().uri("/api/state").cookie(cookie.clone()).to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;
    assert_eq!((state.you.len(), state.them.len()), (40, 40));

    let req = test::TestRequest::post()
        .uri("/api/match")
        .cookie(cookie)
        .set_json(json!({"minDuration": 45, "policy": "distinct"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 40);
}

#[actix_web::test]
async fn sessions_do_not_share_state() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::post().uri("/api/sample").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/state").to_request();
    let state: AvailabilityState = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state, AvailabilityState::default());
}
