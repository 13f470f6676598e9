//! An in-memory stand-in for the Yoga Studio backend.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reqwest::Client;
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;
use yoga::{
    Backend, LoginRequest, RegisterRequest, Session, SessionInformation,
    Teacher, User,
};

pub const ADMIN_EMAIL: &str = "yoga@studio.com";
pub const ADMIN_PASSWORD: &str = "test!1234";
pub const USER_EMAIL: &str = "hugo@studio.com";
pub const USER_PASSWORD: &str = "secret";

#[derive(Debug)]
pub struct FakeState {
    pub users: Vec<(User, String)>,
    pub teachers: Vec<Teacher>,
    pub sessions: Vec<Session>,
    pub requests: Vec<String>,
    /// Paths answered with a body that isn't JSON.
    pub garbled: Vec<String>,
    next_id: u64,
}

type Shared = Arc<Mutex<FakeState>>;

impl FakeState {
    fn seeded() -> Self {
        FakeState {
            users: vec![
                (
                    user(1, ADMIN_EMAIL, "Admin", "Admin", true),
                    ADMIN_PASSWORD.into(),
                ),
                (
                    user(2, USER_EMAIL, "Hugo", "Lebolide", false),
                    USER_PASSWORD.into(),
                ),
            ],
            teachers: vec![
                teacher(1, "Maya", "Labeille"),
                teacher(2, "Bob", "Léponge"),
            ],
            sessions: vec![
                session(1, "La Reine du Yoga", 1, vec![]),
                session(2, "Yoga Mania", 2, vec![2]),
            ],
            requests: Vec::new(),
            garbled: Vec::new(),
            next_id: 100,
        }
    }

    /// Figure out who a request's bearer token belongs to.
    fn authorize(&self, headers: &HeaderMap) -> Result<u64, StatusCode> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer token-"))
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let id: u64 = token.parse().map_err(|_| StatusCode::UNAUTHORIZED)?;

        if self.users.iter().any(|(u, _)| u.id == id) {
            Ok(id)
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    fn session_mut(&mut self, id: u64) -> Result<&mut Session, StatusCode> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(StatusCode::NOT_FOUND)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn user(id: u64, email: &str, first: &str, last: &str, admin: bool) -> User {
    User {
        id,
        email: email.into(),
        first_name: first.into(),
        last_name: last.into(),
        admin,
        password: None,
        created_at: Some("2025-11-24T00:00:00Z".into()),
        updated_at: Some("2026-01-10T00:00:00Z".into()),
    }
}

fn teacher(id: u64, first: &str, last: &str) -> Teacher {
    Teacher {
        id,
        first_name: first.into(),
        last_name: last.into(),
        created_at: None,
        updated_at: None,
    }
}

fn session(id: u64, name: &str, teacher_id: u64, users: Vec<u64>) -> Session {
    Session {
        id: Some(id),
        name: name.into(),
        description: "Une session de yoga pour débutants".into(),
        date: "2025-12-13T00:00:00.000+00:00".into(),
        teacher_id,
        users,
        created_at: None,
        updated_at: None,
    }
}

/// A running fake backend plus a [`Backend`] pointing at it.
pub struct FakeBackend {
    pub backend: Backend,
    state: Shared,
    _server: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::seeded()));
        let app = router(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url = Url::parse(&format!("http://{}/api/", addr)).unwrap();
        let client = Client::builder().no_proxy().build().unwrap();

        FakeBackend {
            backend: Backend::with_client(client, url),
            state,
            _server: server,
        }
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    /// Every request received so far (e.g. `"GET /api/session"`), clearing
    /// the log.
    pub fn take_requests(&self) -> Vec<String> {
        self.with_state(|s| std::mem::take(&mut s.requests))
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/session", get(all_sessions).post(create_session))
        .route(
            "/api/session/{id}",
            get(session_detail).put(update_session).delete(delete_session),
        )
        .route(
            "/api/session/{id}/participate/{user_id}",
            post(participate).delete(unparticipate),
        )
        .route("/api/teacher", get(all_teachers))
        .route("/api/teacher/{id}", get(teacher_detail))
        .route("/api/user/{id}", get(user_detail).delete(delete_user))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(
    State(state): State<Shared>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let garbled = {
        let mut state = state.lock().unwrap();
        state.requests.push(format!("{} {}", request.method(), path));
        state.garbled.contains(&path)
    };

    if garbled {
        return (StatusCode::OK, "<html>Oops</html>").into_response();
    }

    next.run(request).await
}

async fn login(
    State(state): State<Shared>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionInformation>, StatusCode> {
    let state = state.lock().unwrap();
    let (user, _) = state
        .users
        .iter()
        .find(|(u, password)| {
            u.email == request.email && *password == request.password
        })
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Json(SessionInformation {
        id: user.id,
        token: format!("token-{}", user.id),
        token_type: "Bearer".into(),
        username: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        admin: user.admin,
    }))
}

async fn register(
    State(state): State<Shared>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().unwrap();

    if state.users.iter().any(|(u, _)| u.email == request.email) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let id = state.next_id();
    let new_user = user(
        id,
        &request.email,
        &request.first_name,
        &request.last_name,
        false,
    );
    state.users.push((new_user, request.password));

    Ok(Json(serde_json::json!({ "message": "User registered successfully!" })))
}

async fn all_sessions(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Vec<Session>>, StatusCode> {
    let state = state.lock().unwrap();
    state.authorize(&headers)?;

    Ok(Json(state.sessions.clone()))
}

async fn create_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut new_session): Json<Session>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.authorize(&headers)?;

    new_session.id = Some(state.next_id());
    state.sessions.push(new_session);

    // the real backend doesn't echo the session back
    Ok(Json(serde_json::json!({})))
}

async fn session_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<Session>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.authorize(&headers)?;

    state.session_mut(id).map(|s| Json(s.clone()))
}

async fn update_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(mut updated): Json<Session>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.authorize(&headers)?;

    let existing = state.session_mut(id)?;
    updated.id = Some(id);
    *existing = updated;

    Ok(Json(serde_json::json!({})))
}

async fn delete_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if let Err(status) = state.authorize(&headers) {
        return status;
    }

    let before = state.sessions.len();
    state.sessions.retain(|s| s.id != Some(id));

    if state.sessions.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn participate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(u64, u64)>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if let Err(status) = state.authorize(&headers) {
        return status;
    }

    match state.session_mut(id) {
        Ok(s) if s.users.contains(&user_id) => StatusCode::BAD_REQUEST,
        Ok(s) => {
            s.users.push(user_id);
            StatusCode::OK
        },
        Err(status) => status,
    }
}

async fn unparticipate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(u64, u64)>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if let Err(status) = state.authorize(&headers) {
        return status;
    }

    match state.session_mut(id) {
        Ok(s) if s.users.contains(&user_id) => {
            s.users.retain(|u| *u != user_id);
            StatusCode::OK
        },
        Ok(_) => StatusCode::BAD_REQUEST,
        Err(status) => status,
    }
}

async fn all_teachers(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Vec<Teacher>>, StatusCode> {
    let state = state.lock().unwrap();
    state.authorize(&headers)?;

    Ok(Json(state.teachers.clone()))
}

async fn teacher_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<Teacher>, StatusCode> {
    let state = state.lock().unwrap();
    state.authorize(&headers)?;

    state
        .teachers
        .iter()
        .find(|t| t.id == id)
        .map(|t| Json(t.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn user_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let state = state.lock().unwrap();
    state.authorize(&headers)?;

    state
        .users
        .iter()
        .find(|(u, _)| u.id == id)
        .map(|(u, _)| Json(u.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    match state.authorize(&headers) {
        // you can only delete your own account
        Ok(caller) if caller == id => {
            state.users.retain(|(u, _)| u.id != id);
            StatusCode::OK
        },
        Ok(_) => StatusCode::UNAUTHORIZED,
        Err(status) => status,
    }
}
