//! End-to-end flows: real `ApiClient` against a mock backend, driven
//! through the dispatcher the way the shell drives it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use turistamap::api::{ApiClient, Coordinate};
use turistamap::core::action::{Action, Field, dispatch, sync_screen};
use turistamap::core::location::{FixedLocation, NoLocation};
use turistamap::core::navigation::Route;
use turistamap::core::state::App;
use turistamap::core::storage::{KeyValueStore, MemoryStore, TOKEN_KEY, load_token};
use turistamap::screens::{ActiveScreen, details, login, tourism};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const TOKEN: &str = "jwt-abc";

const HERE: Coordinate = Coordinate {
    latitude: -22.9068,
    longitude: -43.1729,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn app_for(server: &MockServer, store: MemoryStore) -> App {
    let api = ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    App::new(Arc::new(api), Arc::new(store), Arc::new(FixedLocation(HERE)))
}

async fn open(app: &mut App, route: Route) -> ActiveScreen {
    let mut screen = ActiveScreen::mount(&Route::Login, app).await;
    app.navigator.reset(route);
    sync_screen(app, &mut screen).await;
    screen
}

async fn mount_points(server: &MockServer, points: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/pontosturisticos"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(points))
        .mount(server)
        .await;
}

async fn mount_users(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/usuarios"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "u1", "nome": "ana" },
            { "_id": "u2", "nome": "bruno" },
            { "_id": "u3", "nome": "carla" }
        ])))
        .mount(server)
        .await;
}

// ============================================================================
// Auth flow
// ============================================================================

#[tokio::test]
async fn test_valid_login_persists_token_and_lands_on_home() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .mount(&mock_server)
        .await;
    mount_users(&mock_server).await;

    let mut app = app_for(&mock_server, MemoryStore::new());
    let mut screen = ActiveScreen::mount(&Route::Login, &mut app).await;
    dispatch(&mut app, &mut screen, Action::SetField(Field::Nome, "ana".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::SetField(Field::Senha, "secret".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    let stored = load_token(app.store.as_ref()).await.unwrap();
    assert_eq!(stored.as_deref(), Some(TOKEN));
    assert_eq!(app.navigator.stack(), &[Route::Home]);
    match &screen {
        ActiveScreen::Home(home) => assert_eq!(home.users.len(), 3),
        other => panic!("Expected Home, got {other:?}"),
    }
    assert_eq!(app.take_alerts()[0].message, login::WELCOME);
}

#[tokio::test]
async fn test_invalid_login_persists_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::new());
    let mut screen = ActiveScreen::mount(&Route::Login, &mut app).await;
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    assert_eq!(app.store.get_item(TOKEN_KEY).await.unwrap(), None);
    assert!(matches!(screen, ActiveScreen::Login(_)));
    assert_eq!(app.take_alerts()[0].message, login::WRONG_CREDENTIALS);
}

#[tokio::test]
async fn test_unreachable_backend_reports_same_login_error() {
    let mock_server = MockServer::start().await;
    let mut app = app_for(&mock_server, MemoryStore::new());
    drop(mock_server);

    let mut screen = ActiveScreen::mount(&Route::Login, &mut app).await;
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    assert_eq!(app.take_alerts()[0].message, login::WRONG_CREDENTIALS);
}

#[tokio::test]
async fn test_register_then_back_to_login() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::new());
    let mut screen = ActiveScreen::mount(&Route::Login, &mut app).await;
    dispatch(&mut app, &mut screen, Action::GoToRegister).await.unwrap();
    dispatch(&mut app, &mut screen, Action::SetField(Field::Nome, "davi".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    assert!(matches!(screen, ActiveScreen::Login(_)));
    assert_eq!(app.navigator.current(), &Route::Login);
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_delete_removes_exactly_the_listed_user() {
    let mock_server = MockServer::start().await;
    mount_users(&mock_server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/usuarios/u2"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let mut screen = open(&mut app, Route::Home).await;
    dispatch(&mut app, &mut screen, Action::RequestDelete("u2".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::ConfirmDelete).await.unwrap();

    match &screen {
        ActiveScreen::Home(home) => {
            let ids: Vec<&str> = home.users.iter().map(|u| u.id.as_str()).collect();
            assert_eq!(ids, vec!["u1", "u3"]);
        }
        other => panic!("Expected Home, got {other:?}"),
    }
}

#[tokio::test]
async fn test_home_with_rejected_token_redirects_to_login() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/usuarios"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token("expired"));
    let screen = open(&mut app, Route::Home).await;

    assert!(matches!(screen, ActiveScreen::Login(_)));
}

#[tokio::test]
async fn test_logout_clears_token() {
    let mock_server = MockServer::start().await;
    mount_users(&mock_server).await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let mut screen = open(&mut app, Route::Home).await;
    dispatch(&mut app, &mut screen, Action::Logout).await.unwrap();

    assert_eq!(load_token(app.store.as_ref()).await.unwrap(), None);
    assert!(matches!(screen, ActiveScreen::Login(_)));
}

// ============================================================================
// Tourist points
// ============================================================================

#[tokio::test]
async fn test_create_point_appends_one_and_clears_form() {
    let mock_server = MockServer::start().await;
    mount_points(
        &mock_server,
        json!([{
            "_id": "p1",
            "nome": "Cristo",
            "descricao": "Redentor",
            "latitude": -22.95,
            "longitude": -43.21
        }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/pontosturisticos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "p2",
            "nome": "Arpoador",
            "descricao": "Pôr do sol",
            "latitude": HERE.latitude,
            "longitude": HERE.longitude
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let mut screen = open(&mut app, Route::Tourism).await;
    dispatch(&mut app, &mut screen, Action::SetField(Field::Nome, "Arpoador".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::SetField(Field::Descricao, "Pôr do sol".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    match &screen {
        ActiveScreen::Tourism(points) => {
            assert_eq!(points.points.len(), 2);
            assert_eq!(points.points[1].id, "p2");
            assert!(points.nome.is_empty());
            assert!(points.descricao.is_empty());
        }
        other => panic!("Expected Tourism, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_point_with_missing_field_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/pontosturisticos"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let mut screen = open(&mut app, Route::Tourism).await;
    dispatch(&mut app, &mut screen, Action::SetField(Field::Nome, "Arpoador".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    assert_eq!(app.take_alerts()[0].message, tourism::MISSING_FIELDS);
}

#[tokio::test]
async fn test_create_point_without_location_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/pontosturisticos"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
    let mut app = App::new(
        Arc::new(api),
        Arc::new(MemoryStore::with_token(TOKEN)),
        Arc::new(NoLocation),
    );
    let mut screen = open(&mut app, Route::Tourism).await;
    dispatch(&mut app, &mut screen, Action::SetField(Field::Nome, "Arpoador".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::SetField(Field::Descricao, "Praia".into()))
        .await
        .unwrap();
    dispatch(&mut app, &mut screen, Action::Submit).await.unwrap();

    let messages: Vec<String> = app.take_alerts().into_iter().map(|a| a.message).collect();
    assert_eq!(
        messages,
        vec![tourism::LOCATION_DENIED.to_string(), tourism::MISSING_FIELDS.to_string()]
    );
}

// ============================================================================
// Point detail
// ============================================================================

#[tokio::test]
async fn test_detail_renders_map_centered_on_point() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pontosturisticos/p1"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "p1", "nome": "Cristo", "descricao": "Redentor",
            "latitude": -22.9519, "longitude": -43.2105
        })))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let screen = open(&mut app, Route::Details { point_id: "p1".into() }).await;

    let ActiveScreen::Details(detail) = &screen else {
        panic!("Expected Details, got {screen:?}");
    };
    let region = detail.map_region().unwrap();
    assert_eq!(
        region.center,
        Coordinate {
            latitude: -22.9519,
            longitude: -43.2105
        }
    );
    assert_eq!(region.longitude_delta, details::MAP_DELTA);
    assert_eq!(region.marker.description, "Redentor");
}

#[tokio::test]
async fn test_detail_for_unknown_id_redirects_without_partial_render() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/pontosturisticos/000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, MemoryStore::with_token(TOKEN));
    let mut screen = open(&mut app, Route::Tourism).await;
    dispatch(&mut app, &mut screen, Action::OpenPoint("000".into()))
        .await
        .unwrap();

    assert!(matches!(screen, ActiveScreen::Login(_)));
    let alerts = app.take_alerts();
    assert!(alerts.iter().any(|a| a.message == details::LOAD_FAILED));
}
