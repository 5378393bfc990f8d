use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edupanel_api::workflows::{GrantContext, GrantError, GrantWorkflow};
use edupanel_api::{ApiClient, ApiError, Services, Session, SessionStore};
use edupanel_shared::dashboard::{TimeWindow, resolve_window};
use edupanel_shared::models::{Course, Lesson, LoginResponse, Tariff, Teacher};
use edupanel_shared::permission::{GrantInput, GrantRejection};
use edupanel_shared::{Lang, ListQuery};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn now() -> NaiveDateTime {
    today().and_hms_opt(12, 0, 0).unwrap()
}

fn logged_in(server: &MockServer) -> Services {
    let session = Session::from_login(
        LoginResponse {
            access_token: "secret-token".into(),
            refresh_token: None,
            id: 1,
            role: Some("admin".into()),
        },
        Utc::now(),
    );
    Services::new(ApiClient::new(server.uri(), SessionStore::in_memory(Some(session))))
}

fn page(data: Value, total: u64, page: u32, limit: u32) -> Value {
    let total_page = total.div_ceil(limit as u64) as u32;
    json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
        "total_page": total_page,
        "has_previous": page > 1,
        "has_next": page < total_page,
    })
}

fn course(id: i64, durations: &[u32]) -> Course {
    serde_json::from_value(json!({
        "id": id,
        "name": {"uz": "Algebra", "ru": "Алгебра", "en": "Algebra"},
        "price": durations.iter().map(|d| json!({"duration": d, "price": 150000.0 * *d as f64})).collect::<Vec<_>>(),
    }))
    .unwrap()
}

fn tariff(id: i64, duration: u32) -> Tariff {
    serde_json::from_value(json!({
        "id": id,
        "name": {"uz": "Oylik", "ru": "Месячный", "en": "Monthly"},
        "duration": duration,
        "price": 0,
    }))
    .unwrap()
}

#[tokio::test]
async fn login_stores_session_and_authorizes_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/auth/admin/login"))
        .and(body_json(json!({"login": "admin", "password": "pa55"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "abc",
            "refresh_token": "def",
            "id": 12,
            "role": "superadmin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/teacher/3"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "full_name": "Aziza Karimova",
            "bio": {"uz": "Tajribali", "ru": "Опытная", "en": "Experienced"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::open(&session_path).await;
    let services = Services::new(ApiClient::new(server.uri(), store));

    let session = services.auth.login("admin", "pa55").await.unwrap();
    assert_eq!(session.admin_id, 12);
    assert!(session_path.exists());

    let teacher: Teacher = services.resource::<Teacher>().get(3).await.unwrap();
    assert_eq!(teacher.full_name, "Aziza Karimova");
    assert_eq!(teacher.bio.text(Lang::Ru), "Опытная");
}

#[tokio::test]
async fn rejected_login_is_a_plain_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/admin/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&server)
        .await;

    let services = Services::new(ApiClient::new(server.uri(), SessionStore::in_memory(None)));
    let err = services.auth.login("admin", "wrong").await.unwrap_err();
    assert_eq!(err.backend_message(), Some("Invalid credentials"));
}

#[tokio::test]
async fn unauthorized_response_clears_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("GET"))
        .and(path("/subject"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = SessionStore::open(&session_path).await;
    store
        .replace(Session::from_login(
            LoginResponse {
                access_token: "old".into(),
                refresh_token: None,
                id: 1,
                role: None,
            },
            Utc::now(),
        ))
        .await
        .unwrap();
    let services = Services::new(ApiClient::new(server.uri(), store.clone()));

    let err = services
        .resource::<edupanel_shared::models::Subject>()
        .list(&ListQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(store.current().await.is_none());
    assert!(!session_path.exists());
}

#[tokio::test]
async fn expired_token_clears_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("GET"))
        .and(path("/teacher/3"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::open(&session_path).await;
    store
        .replace(Session::from_login(
            LoginResponse {
                access_token: "stale".into(),
                refresh_token: None,
                id: 1,
                role: None,
            },
            Utc::now(),
        ))
        .await
        .unwrap();
    assert!(session_path.exists());
    let services = Services::new(ApiClient::new(server.uri(), store.clone()));

    let err = services.resource::<Teacher>().get(3).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(store.current().await.is_none());
    assert!(!session_path.exists());
}

#[tokio::test]
async fn list_all_stops_at_reported_page_count() {
    let server = MockServer::start().await;
    // Backend ignores the requested page and always claims there is more.
    Mock::given(method("GET"))
        .and(path("/tariff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": {"uz": "Oylik", "ru": "Месячный", "en": "Monthly"}, "duration": 1, "price": 0}],
            "total": 30,
            "page": 1,
            "limit": 10,
            "total_page": 3,
            "has_previous": false,
            "has_next": true,
        })))
        .expect(3)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let rows = services.resource::<Tariff>().list_all(&ListQuery::new(1, 10)).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn list_sends_paging_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lesson"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("module_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 6, "module_id": 4, "name": {"uz": "Kirish", "ru": "Введение", "en": "Intro"}}]),
            6,
            2,
            5,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let query = ListQuery::new(2, 5).with_filter("module_id", 4);
    let lessons = services.resource::<Lesson>().list(&query).await.unwrap();
    assert_eq!(lessons.data.len(), 1);
    assert_eq!(lessons.paginator().label(), "6–6 of 6");
    assert!(!lessons.has_next);
}

#[tokio::test]
async fn update_and_delete_use_action_paths() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/lesson/6/update"))
        .and(body_partial_json(json!({"is_free": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 6, "module_id": 4, "is_free": true,
            "name": {"uz": "Kirish", "ru": "Введение", "en": "Intro"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/teacher/9/delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let lesson = services
        .resource::<Lesson>()
        .update(6, &json!({"is_free": true}))
        .await
        .unwrap();
    assert!(lesson.is_free);
    services.resource::<Teacher>().delete(9).await.unwrap();
}

#[tokio::test]
async fn backend_message_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/course"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": ["name.ru should not be empty"]})),
        )
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let err = services
        .resource::<Course>()
        .create(&json!({"name": {"uz": "Fizika"}}))
        .await
        .unwrap_err();
    assert_eq!(err.backend_message(), Some("name.ru should not be empty"));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn grant_without_matching_price_option_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/course-permission"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let workflow = GrantWorkflow::new(services.permissions.clone());
    let courses = [course(1, &[1, 6])];
    let tariffs = [tariff(2, 3)];
    let ctx = GrantContext {
        courses: &courses,
        tariffs: &tariffs,
        loaded: &[],
        page_limit: 10,
    };
    let input = GrantInput {
        user_id: 7,
        course_id: 1,
        tariff_id: 2,
    };

    let err = workflow.run(ctx, input, now()).await.unwrap_err();
    assert!(matches!(
        err,
        GrantError::Rejected(GrantRejection::NoMatchingPriceOption { months: 3, .. })
    ));
}

#[tokio::test]
async fn grant_finds_active_permission_on_later_page() {
    let server = MockServer::start().await;
    let tomorrow = today().succ_opt().unwrap().to_string();

    Mock::given(method("GET"))
        .and(path("/course-permission"))
        .and(query_param("user_id", "7"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1, "user_id": 7, "course_id": 5, "started_at": "2026-01-01", "ended_at": "2026-02-01"}]),
            2,
            1,
            1,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/course-permission"))
        .and(query_param("user_id", "7"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 2, "user_id": 7, "course_id": 1, "started_at": "2026-09-15", "ended_at": tomorrow}]),
            2,
            2,
            1,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/course-permission"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let workflow = GrantWorkflow::new(services.permissions.clone());
    let courses = [course(1, &[3])];
    let tariffs = [tariff(2, 3)];
    let ctx = GrantContext {
        courses: &courses,
        tariffs: &tariffs,
        loaded: &[],
        page_limit: 10,
    };
    let input = GrantInput {
        user_id: 7,
        course_id: 1,
        tariff_id: 2,
    };

    let err = workflow.run(ctx, input, now()).await.unwrap_err();
    assert!(matches!(err, GrantError::Rejected(GrantRejection::AlreadyActive { course_id: 1, .. })));
    assert_eq!(err.localized(Lang::En), "The user already has active access to this course");
}

#[tokio::test]
async fn grant_submits_window_and_reloads_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course-permission"))
        .and(query_param("user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1, "user_id": 7, "course_id": 1, "started_at": "2026-01-01", "ended_at": "2026-10-14T00:00:00.000Z"}]),
            1,
            1,
            100,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/course-permission"))
        .and(body_json(json!({
            "user_id": 7,
            "course_id": 1,
            "tariff_id": 2,
            "started_at": "2026-10-15",
            "ended_at": "2027-01-15"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 40, "user_id": 7, "course_id": 1, "tariff_id": 2,
            "started_at": "2026-10-15", "ended_at": "2027-01-15"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/course-permission"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 40, "user_id": 7, "course_id": 1, "started_at": "2026-10-15", "ended_at": "2027-01-15"}]),
            1,
            1,
            10,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let workflow = GrantWorkflow::new(services.permissions.clone());
    let courses = [course(1, &[1, 3])];
    let tariffs = [tariff(2, 3)];
    let ctx = GrantContext {
        courses: &courses,
        tariffs: &tariffs,
        loaded: &[],
        page_limit: 10,
    };
    let input = GrantInput {
        user_id: 7,
        course_id: 1,
        tariff_id: 2,
    };

    let outcome = workflow.run(ctx, input, now()).await.unwrap();
    assert_eq!(outcome.permission.id, 40);
    assert_eq!(outcome.request.ended_at, NaiveDate::from_ymd_opt(2027, 1, 15).unwrap());
    let reloaded = outcome.reloaded.expect("list reloaded");
    assert_eq!(reloaded.page, 1);
}

#[tokio::test]
async fn grant_rewrites_backend_still_active_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course-permission"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 0, 1, 100)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/course-permission"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Course is still active"})))
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let workflow = GrantWorkflow::new(services.permissions.clone());
    let courses = [course(1, &[1])];
    let tariffs = [tariff(2, 1)];
    let ctx = GrantContext {
        courses: &courses,
        tariffs: &tariffs,
        loaded: &[],
        page_limit: 10,
    };
    let input = GrantInput {
        user_id: 7,
        course_id: 1,
        tariff_id: 2,
    };

    let err = workflow.run(ctx, input, now()).await.unwrap_err();
    assert!(matches!(err, GrantError::Api(ApiError::Http { .. })));
    assert_eq!(err.localized(Lang::Uz), "Foydalanuvchida bu kurs uchun faol ruxsat allaqachon mavjud");
}

#[tokio::test]
async fn dashboard_requests_resolved_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/statistics"))
        .and(query_param("from", "2000-01-01"))
        .and(query_param("to", "2100-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": 120, "courses": 8, "revenue": 1500000.5})))
        .expect(1)
        .mount(&server)
        .await;

    let services = logged_in(&server);
    let range = resolve_window(TimeWindow::All, today(), (None, None)).unwrap();
    let stats = services.dashboard.statistics(range).await.unwrap();
    assert_eq!(stats.users, 120);
    assert_eq!(stats.orders, 0);
    assert!(!stats.is_zero());
}

#[tokio::test]
async fn upload_posts_multipart_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/file-upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "url": "https://cdn.example.uz/banner.png",
            "filename": "banner.png",
            "size": 4,
            "mime_type": "image/png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("banner.png");
    std::fs::write(&file, [0x89, b'P', b'N', b'G']).unwrap();

    let services = logged_in(&server);
    let uploaded = services.uploads.upload_file(&file).await.unwrap();
    assert_eq!(uploaded.mime_type, "image/png");
    assert_eq!(uploaded.size, 4);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}
