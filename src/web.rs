use actix_files::Files;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::availability::{
    parse_day, parse_time_to_minutes, sample_availability, validate_duration, validate_interval, IntervalRequest,
    Side,
};
use crate::display::{format_suggestion, SuggestionView};
use crate::error::Error;
use crate::matcher::{OverlapPolicy, Suggestion};
use crate::store::{decode_share, share_fragment, AvailabilityState, StateStore};

const SESSION_ID_KEY: &str = "sid";
const SESSION_COOKIE: &str = "schedule-matcher";

/// Availability of every visitor, keyed by the id kept in their session cookie.
///
/// Shared by all workers, so it must be created once and cloned into each `App`.
#[derive(Default)]
pub struct SessionStates {
    states: Mutex<HashMap<String, AvailabilityState>>,
}

impl SessionStates {
    fn lock(&self) -> crate::error::Result<MutexGuard<'_, HashMap<String, AvailabilityState>>> {
        self.states
            .lock()
            .map_err(|_| Error::Session("session state lock poisoned".to_string()))
    }
}

/// One visitor's slot in [`SessionStates`]; the cookie only carries the id.
pub struct SessionStore<'a> {
    session: &'a Session,
    states: &'a SessionStates,
}

impl<'a> SessionStore<'a> {
    pub fn new(session: &'a Session, states: &'a SessionStates) -> Self {
        Self { session, states }
    }

    fn session_id(&self) -> crate::error::Result<Option<String>> {
        self.session
            .get::<String>(SESSION_ID_KEY)
            .map_err(|e| Error::Session(e.to_string()))
    }
}

impl StateStore for SessionStore<'_> {
    fn load(&self) -> crate::error::Result<Option<AvailabilityState>> {
        let Some(id) = self.session_id()? else {
            return Ok(None);
        };
        Ok(self.states.lock()?.get(&id).cloned())
    }

    fn save(&self, state: &AvailabilityState) -> crate::error::Result<()> {
        let id = match self.session_id()? {
            Some(id) => id,
            None => {
                let id = new_session_id();
                self.session
                    .insert(SESSION_ID_KEY, &id)
                    .map_err(|e| Error::Session(e.to_string()))?;
                debug!("started session");
                id
            }
        };
        self.states.lock()?.insert(id, state.clone());
        Ok(())
    }

    fn clear(&self) -> crate::error::Result<()> {
        if let Some(id) = self.session_id()? {
            self.states.lock()?.remove(&id);
        }
        Ok(())
    }
}

fn new_session_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsRequest {
    label_you: String,
    label_them: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    min_duration: i64,
    #[serde(default)]
    policy: OverlapPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    label_you: String,
    label_them: String,
    suggestions: Vec<SuggestionView>,
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    day: String,
    start: String,
    end: String,
}

#[derive(Deserialize, Serialize)]
pub struct ShareRequest {
    encoded: String,
}

#[derive(Serialize)]
pub struct ShareResponse {
    fragment: String,
}

fn load_state(session: &Session, states: &SessionStates) -> Result<AvailabilityState> {
    Ok(SessionStore::new(session, states).load_or_default()?)
}

fn save_state(session: &Session, states: &SessionStates, state: &AvailabilityState) -> Result<HttpResponse> {
    SessionStore::new(session, states).save(state)?;
    Ok(HttpResponse::Ok().json(state))
}

async fn get_state(session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(load_state(&session, &states)?))
}

async fn clear_state(session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    SessionStore::new(&session, &states).clear()?;
    info!("cleared availability");
    Ok(HttpResponse::Ok().json(AvailabilityState::default()))
}

async fn update_labels(
    req: web::Json<LabelsRequest>,
    session: Session,
    states: web::Data<SessionStates>,
) -> Result<HttpResponse> {
    let mut state = load_state(&session, &states)?;
    state.set_labels(&req.label_you, &req.label_them);
    save_state(&session, &states, &state)
}

async fn add_interval(
    side: web::Path<Side>,
    req: web::Json<IntervalRequest>,
    session: Session,
    states: web::Data<SessionStates>,
) -> Result<HttpResponse> {
    let side = side.into_inner();
    let entry = req.into_inner().into_entry()?;
    let mut state = load_state(&session, &states)?;
    info!(%side, day = %entry.day, start = entry.start_min, end = entry.end_min, "adding interval");
    state.add(side, entry)?;
    save_state(&session, &states, &state)
}

async fn remove_interval(
    path: web::Path<(Side, String)>,
    session: Session,
    states: web::Data<SessionStates>,
) -> Result<HttpResponse> {
    let (side, id) = path.into_inner();
    let mut state = load_state(&session, &states)?;

    if !state.remove(side, &id) {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "Interval not found"})));
    }
    save_state(&session, &states, &state)
}

async fn fill_sample(session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    let mut state = load_state(&session, &states)?;
    state.replace(Side::Them, sample_availability());
    save_state(&session, &states, &state)
}

async fn find_matches(
    req: web::Json<MatchRequest>,
    session: Session,
    states: web::Data<SessionStates>,
) -> Result<HttpResponse> {
    let min_duration = validate_duration(req.min_duration)?;
    let state = load_state(&session, &states)?;
    let suggestions = state.suggestions(min_duration, req.policy)?;
    info!(
        you = state.you.len(),
        them = state.them.len(),
        min_duration,
        policy = ?req.policy,
        found = suggestions.len(),
        "computed suggestions"
    );

    Ok(HttpResponse::Ok().json(MatchResponse {
        label_you: state.label_you.clone(),
        label_them: state.label_them.clone(),
        suggestions: suggestions.iter().map(SuggestionView::from).collect(),
    }))
}

async fn schedule_call(req: web::Json<ScheduleRequest>) -> Result<HttpResponse> {
    let day = parse_day(&req.day)?;
    let start = parse_time_to_minutes(&req.start)?;
    let end = parse_time_to_minutes(&req.end)?;
    validate_interval(day, start, end)?;

    let message = format!("Scheduled call: {}", format_suggestion(&Suggestion::new(day, start, end)));
    info!("{message}");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "message": message})))
}

async fn export_state(session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    let state = load_state(&session, &states)?;
    let json = state.to_json_pretty()?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header(("Content-Disposition", "attachment; filename=\"schedule-matcher.json\""))
        .body(json))
}

async fn import_state(body: String, session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    let state = AvailabilityState::from_json(&body)?;
    info!(you = state.you.len(), them = state.them.len(), "imported availability");
    save_state(&session, &states, &state)
}

async fn get_share(session: Session, states: web::Data<SessionStates>) -> Result<HttpResponse> {
    let state = load_state(&session, &states)?;
    Ok(HttpResponse::Ok().json(ShareResponse {
        fragment: share_fragment(&state)?,
    }))
}

async fn open_share(
    req: web::Json<ShareRequest>,
    session: Session,
    states: web::Data<SessionStates>,
) -> Result<HttpResponse> {
    let state = decode_share(&req.encoded)?;
    save_state(&session, &states, &state)
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Session key from the configured secret, or a random one.
pub fn session_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            warn!("SESSION_SECRET is shorter than 32 bytes, using a random session key");
            Key::generate()
        }
        None => {
            warn!("no SESSION_SECRET configured, sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn session_middleware(key: Key, secure_cookies: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(secure_cookies)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": err.to_string()}));
        InternalError::from_response(err, response).into()
    })
}

/// Registers the page and API routes; session middleware and [`SessionStates`]
/// are added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(index))
        .service(
            web::resource("/api/state")
                .route(web::get().to(get_state))
                .route(web::delete().to(clear_state)),
        )
        .route("/api/labels", web::put().to(update_labels))
        .route("/api/intervals/{side}", web::post().to(add_interval))
        .route("/api/intervals/{side}/{id}", web::delete().to(remove_interval))
        .route("/api/sample", web::post().to(fill_sample))
        .route("/api/match", web::post().to(find_matches))
        .route("/api/schedule", web::post().to(schedule_call))
        .route("/api/export", web::get().to(export_state))
        .route("/api/import", web::post().to(import_state))
        .service(
            web::resource("/api/share")
                .route(web::get().to(get_share))
                .route(web::post().to(open_share)),
        );
}

pub async fn start_server(host: &str, port: u16, session_key: Key, secure_cookies: bool) -> std::io::Result<()> {
    let states = web::Data::new(SessionStates::default());

    HttpServer::new(move || {
        App::new()
            .app_data(states.clone())
            .wrap(session_middleware(session_key.clone(), secure_cookies))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
