//! Shared fixtures: an in-process stand-in for the marketplace API plus
//! recording doubles for the presentation seams.
#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gradwork_client::auth::{AccountState, Session};
use gradwork_client::ui::{Navigator, Notification, NotificationLevel, Notifier};
use gradwork_client::{ApiClient, ClientConfig};

/// One request as the stub API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (u16, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

async fn stub(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.to_vec(),
    });

    let key = format!("{} {}", req.method(), req.path());
    let route = state.routes.lock().unwrap().get(&key).cloned();
    match route {
        Some((status, value)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(value)
        }
        None => HttpResponse::NotFound().json(json!({ "error": true, "message": "Not found" })),
    }
}

/// The marketplace API, served from this process on a random port.
#[derive(Clone)]
pub struct MockApi {
    state: web::Data<MockState>,
    pub base_url: String,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = web::Data::new(MockState::default());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .app_data(web::PayloadConfig::new(8 * 1024 * 1024))
                .default_service(web::to(stub))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);

        Self {
            state,
            base_url: format!("http://{addr}/api"),
        }
    }

    /// Answer `method /api{path}` with `status` and a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(format!("{method} /api{path}"), (status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        let full = format!("/api{path}");
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }

    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_api_url(&self.base_url);
        config.redirect_delay = Duration::from_millis(10);
        config.thumbnail_timeout = Duration::from_millis(50);
        config
    }

    pub fn client(&self, session: Arc<Session>) -> ApiClient {
        ApiClient::new(&self.config(), session)
    }
}

/// A session signed in as `user_id` without going through a token.
pub fn signed_in(user_id: &str) -> Arc<Session> {
    let session = Session::new(AccountState::in_memory());
    session.set_auth_token(Some("test-token".to_string()));
    session.set_user_id(user_id);
    Arc::new(session)
}

pub fn anonymous() -> Arc<Session> {
    Arc::new(Session::new(AccountState::in_memory()))
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Success)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Navigate { path: String, replace: bool },
    Redirect(String),
    ScrollToTop,
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NavEvent::Navigate { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, replace: bool) {
        self.events.lock().unwrap().push(NavEvent::Navigate {
            path: path.to_string(),
            replace,
        });
    }

    fn redirect(&self, url: &str) {
        self.events
            .lock()
            .unwrap()
            .push(NavEvent::Redirect(url.to_string()));
    }

    fn scroll_to_top(&self) {
        self.events.lock().unwrap().push(NavEvent::ScrollToTop);
    }
}

pub fn gig_json(id: &str, title: &str, price: f64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "A gig used in tests",
        "price": { "$numberDecimal": price.to_string() },
        "media": [{ "url": format!("https://cdn.example/{id}.jpg"), "type": "image" }],
        "freelancerId": "seller-1",
        "star": 4.5,
        "ratingsCount": 12
    })
}
