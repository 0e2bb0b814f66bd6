//! OrbitBase HTTP server.
//!
//! One http1 connection task per client; every store operation runs under
//! `spawn_blocking` so the accept loop never waits on the database. The
//! graph endpoint fetches all six collections inside a single blocking
//! unit and only builds once the whole snapshot is in hand — a failed
//! fetch aborts the request, never a partial graph.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

use orbitbase_graph::{DanglingEdgePolicy, GraphBuilder, GraphInput};
use orbitbase_model::{
    AgencyFields, CrewAssignmentFields, CrewMemberFields, LaunchFields, ManufacturerFields,
    MissionFields, PayloadFields, RocketFields, RocketVariantFields,
};
use orbitbase_store::{SqliteStore, StoreError};

const DEFAULT_BROWSE_LIMIT: u32 = 50;

pub(crate) struct ServerState {
    store: Mutex<SqliteStore>,
    builder: GraphBuilder,
    admin_token: Option<String>,
}

impl ServerState {
    pub(crate) fn new(
        store: SqliteStore,
        policy: DanglingEdgePolicy,
        admin_token: Option<String>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            builder: GraphBuilder::new(policy),
            admin_token,
        }
    }
}

pub(crate) fn cmd_serve(args: crate::ServeArgs) -> Result<()> {
    let policy = DanglingEdgePolicy::parse(&args.dangling_edges)?;
    let store = SqliteStore::open(&args.db)?;
    let state = Arc::new(ServerState::new(store, policy, args.admin_token.clone()));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to initialize tokio runtime: {e}"))?;

    rt.block_on(serve_async(state, args.listen, args.ready_file.clone()))
}

async fn serve_async(
    state: Arc<ServerState>,
    listen: SocketAddr,
    ready_file: Option<PathBuf>,
) -> Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| anyhow!("serve: failed to bind {listen}: {e}"))?;
    let bound = listener
        .local_addr()
        .map_err(|e| anyhow!("serve: failed to read bound addr: {e}"))?;

    tracing::info!(addr = %bound, "listening");
    if let Some(path) = ready_file.as_ref() {
        let payload = json!({
            "version": "orbitbase_ready_v1",
            "addr": bound.to_string(),
            "pid": std::process::id(),
        });
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        std::fs::write(path, serde_json::to_string_pretty(&payload).unwrap_or_default()).ok();
    }

    loop {
        let (stream, _peer) = listener
            .accept()
            .await
            .map_err(|e| anyhow!("serve: accept failed: {e}"))?;
        let io = TokioIo::new(stream);
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| handle_request(req, state.clone()));
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                tracing::warn!("connection error: {e}");
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = req.into_body().collect().await?.to_bytes();

    Ok(dispatch(&state, method, &path, query.as_deref(), auth.as_deref(), &body).await)
}

/// Route one request. Split out from [`handle_request`] so tests can drive
/// the full surface without a socket.
pub(crate) async fn dispatch(
    state: &Arc<ServerState>,
    method: Method,
    path: &str,
    query: Option<&str>,
    auth: Option<&str>,
    body: &[u8],
) -> Response<Full<Bytes>> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mutation = matches!(method, Method::POST | Method::PUT | Method::DELETE);
    if mutation {
        if let Err(resp) = require_admin(auth, state) {
            return resp;
        }
    }

    match (method, segments.as_slice()) {
        (Method::GET, []) => text_response(StatusCode::OK, "OrbitBase API is live\n"),
        (Method::GET, ["healthz"]) => text_response(StatusCode::OK, "ok\n"),

        (Method::GET, ["api", "graph"]) => handle_graph(state).await,

        (Method::GET, ["api", "tables"]) => {
            respond(with_store(state, |s| Ok(json!({ "tables": s.table_names() }))).await)
        }
        (Method::GET, ["api", "table", name]) => {
            let name = name.to_string();
            match query_limit(query) {
                Ok(limit) => respond(with_store(state, move |s| s.table_data(&name, limit)).await),
                Err(resp) => resp,
            }
        }

        (Method::GET, ["api", "stats", "active-missions"]) => respond(
            with_store(state, |s| Ok(json!({ "count": s.active_mission_count()? }))).await,
        ),
        (Method::GET, ["api", "launches", id, "total-mass"]) => match parse_id(id) {
            Ok(id) => respond(
                with_store(state, move |s| {
                    Ok(json!({ "total_mass": s.total_payload_mass(id)? }))
                })
                .await,
            ),
            Err(resp) => resp,
        },

        (Method::POST, ["api", "missions", "proc"]) => handle_mission_proc(state, body).await,
        (Method::POST, ["api", "missions", id, "complete"]) => {
            handle_complete_mission(state, id, body).await
        }
        (Method::POST, ["api", "crew_assignments", "proc"]) => {
            handle_crew_assignment_proc(state, body).await
        }
        (Method::POST, ["api", "launches", "proc"]) => handle_launch_proc(state, body).await,

        // Missions
        (Method::GET, ["api", "missions"]) => respond(with_store(state, |s| s.list_missions()).await),
        (Method::POST, ["api", "missions"]) => match parse_body::<MissionFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_mission(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "missions", id]) => {
            match (parse_id(id), parse_body::<MissionFields>(body)) {
                (Ok(id), Ok(f)) => updated(with_store(state, move |s| s.update_mission(id, &f)).await),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "missions", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_mission(id)).await),
            Err(resp) => resp,
        },

        // Agencies
        (Method::GET, ["api", "agencies"]) => respond(with_store(state, |s| s.list_agencies()).await),
        (Method::POST, ["api", "agencies"]) => match parse_body::<AgencyFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_agency(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "agencies", id]) => {
            match (parse_id(id), parse_body::<AgencyFields>(body)) {
                (Ok(id), Ok(f)) => updated(with_store(state, move |s| s.update_agency(id, &f)).await),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "agencies", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_agency(id)).await),
            Err(resp) => resp,
        },

        // Crew members
        (Method::GET, ["api", "crew_members"]) => {
            respond(with_store(state, |s| s.list_crew_members()).await)
        }
        (Method::POST, ["api", "crew_members"]) => match parse_body::<CrewMemberFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_crew_member(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "crew_members", id]) => {
            match (parse_id(id), parse_body::<CrewMemberFields>(body)) {
                (Ok(id), Ok(f)) => {
                    updated(with_store(state, move |s| s.update_crew_member(id, &f)).await)
                }
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "crew_members", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_crew_member(id)).await),
            Err(resp) => resp,
        },

        // Crew assignments
        (Method::GET, ["api", "crew_assignments"]) => {
            respond(with_store(state, |s| s.list_crew_assignments()).await)
        }
        (Method::POST, ["api", "crew_assignments"]) => {
            match parse_body::<CrewAssignmentFields>(body) {
                Ok(f) => created(with_store(state, move |s| s.insert_crew_assignment(&f)).await),
                Err(resp) => resp,
            }
        }
        (Method::PUT, ["api", "crew_assignments", id]) => {
            match (parse_id(id), parse_body::<CrewAssignmentFields>(body)) {
                (Ok(id), Ok(f)) => {
                    updated(with_store(state, move |s| s.update_crew_assignment(id, &f)).await)
                }
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "crew_assignments", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_crew_assignment(id)).await),
            Err(resp) => resp,
        },

        // Launches
        (Method::GET, ["api", "launches"]) => respond(with_store(state, |s| s.list_launches()).await),
        (Method::POST, ["api", "launches"]) => match parse_body::<LaunchFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_launch(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "launches", id]) => {
            match (parse_id(id), parse_body::<LaunchFields>(body)) {
                (Ok(id), Ok(f)) => updated(with_store(state, move |s| s.update_launch(id, &f)).await),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "launches", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_launch(id)).await),
            Err(resp) => resp,
        },

        // Payloads
        (Method::GET, ["api", "payloads"]) => respond(with_store(state, |s| s.list_payloads()).await),
        (Method::POST, ["api", "payloads"]) => match parse_body::<PayloadFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_payload(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "payloads", id]) => {
            match (parse_id(id), parse_body::<PayloadFields>(body)) {
                (Ok(id), Ok(f)) => updated(with_store(state, move |s| s.update_payload(id, &f)).await),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "payloads", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_payload(id)).await),
            Err(resp) => resp,
        },

        // Rockets
        (Method::GET, ["api", "rockets"]) => respond(with_store(state, |s| s.list_rockets()).await),
        (Method::POST, ["api", "rockets"]) => match parse_body::<RocketFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_rocket(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "rockets", id]) => {
            match (parse_id(id), parse_body::<RocketFields>(body)) {
                (Ok(id), Ok(f)) => updated(with_store(state, move |s| s.update_rocket(id, &f)).await),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "rockets", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_rocket(id)).await),
            Err(resp) => resp,
        },

        // Rocket variants
        (Method::GET, ["api", "rocket_variants"]) => {
            respond(with_store(state, |s| s.list_rocket_variants()).await)
        }
        (Method::POST, ["api", "rocket_variants"]) => {
            match parse_body::<RocketVariantFields>(body) {
                Ok(f) => created(with_store(state, move |s| s.insert_rocket_variant(&f)).await),
                Err(resp) => resp,
            }
        }
        (Method::PUT, ["api", "rocket_variants", id]) => {
            match (parse_id(id), parse_body::<RocketVariantFields>(body)) {
                (Ok(id), Ok(f)) => {
                    updated(with_store(state, move |s| s.update_rocket_variant(id, &f)).await)
                }
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "rocket_variants", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_rocket_variant(id)).await),
            Err(resp) => resp,
        },

        // Manufacturers
        (Method::GET, ["api", "manufacturers"]) => {
            respond(with_store(state, |s| s.list_manufacturers()).await)
        }
        (Method::POST, ["api", "manufacturers"]) => match parse_body::<ManufacturerFields>(body) {
            Ok(f) => created(with_store(state, move |s| s.insert_manufacturer(&f)).await),
            Err(resp) => resp,
        },
        (Method::PUT, ["api", "manufacturers", id]) => {
            match (parse_id(id), parse_body::<ManufacturerFields>(body)) {
                (Ok(id), Ok(f)) => {
                    updated(with_store(state, move |s| s.update_manufacturer(id, &f)).await)
                }
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::DELETE, ["api", "manufacturers", id]) => match parse_id(id) {
            Ok(id) => updated(with_store(state, move |s| s.delete_manufacturer(id)).await),
            Err(resp) => resp,
        },

        _ => json_error(StatusCode::NOT_FOUND, "not found"),
    }
}

/* ------------------------------------------------------------------------ */
/* Graph                                                                    */
/* ------------------------------------------------------------------------ */

async fn handle_graph(state: &Arc<ServerState>) -> Response<Full<Bytes>> {
    // All six fetches happen inside one blocking unit; the first failure
    // aborts the whole request and the builder never sees a partial set.
    let fetched = with_store(state, |s| {
        Ok(GraphInput {
            agencies: s.list_agencies()?,
            missions: s.list_missions()?,
            rockets: s.list_rockets()?,
            variants: s.list_rocket_variants()?,
            launches: s.list_launches()?,
            payloads: s.list_payloads()?,
        })
    })
    .await;

    match fetched {
        Ok(input) => {
            let view = state.builder.build(&input);
            json_response(StatusCode::OK, &view)
        }
        Err(resp) => resp,
    }
}

/* ------------------------------------------------------------------------ */
/* Procedure pass-throughs                                                  */
/* ------------------------------------------------------------------------ */

#[derive(Debug, Deserialize)]
struct MissionProcRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    agency_id: Option<i64>,
    #[serde(default)]
    status: Option<String>,
}

async fn handle_mission_proc(state: &Arc<ServerState>, body: &[u8]) -> Response<Full<Bytes>> {
    let req: MissionProcRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let Some(name) = req.name.filter(|n| !n.trim().is_empty()) else {
        return json_error(StatusCode::BAD_REQUEST, "missing required field: name");
    };
    match with_store(state, move |s| {
        s.add_mission(&name, req.agency_id, req.status.as_deref())
    })
    .await
    {
        Ok(id) => json_response(
            StatusCode::CREATED,
            &json!({ "success": true, "id": id, "message": "mission created via procedure" }),
        ),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
struct CompleteMissionRequest {
    #[serde(default)]
    end_date: Option<String>,
}

async fn handle_complete_mission(
    state: &Arc<ServerState>,
    id: &str,
    body: &[u8],
) -> Response<Full<Bytes>> {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let req: CompleteMissionRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match with_store(state, move |s| s.complete_mission(id, req.end_date.as_deref())).await {
        Ok(()) => json_response(
            StatusCode::OK,
            &json!({ "success": true, "message": "mission completed" }),
        ),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
struct CrewAssignmentProcRequest {
    #[serde(default)]
    mission_id: Option<i64>,
    #[serde(default)]
    crew_id: Option<i64>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    assignment_date: Option<String>,
}

async fn handle_crew_assignment_proc(
    state: &Arc<ServerState>,
    body: &[u8],
) -> Response<Full<Bytes>> {
    let req: CrewAssignmentProcRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let (Some(mission_id), Some(crew_id)) = (req.mission_id, req.crew_id) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "mission_id and crew_id are required",
        );
    };
    match with_store(state, move |s| {
        s.assign_crew_to_mission(
            mission_id,
            crew_id,
            req.role.as_deref(),
            req.assignment_date.as_deref(),
        )
    })
    .await
    {
        Ok(id) => json_response(
            StatusCode::CREATED,
            &json!({ "success": true, "id": id, "message": "crew assigned via procedure" }),
        ),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
struct LaunchProcRequest {
    #[serde(default)]
    mission_id: Option<i64>,
    #[serde(default)]
    variant_id: Option<i64>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    launch_date: Option<String>,
    #[serde(default)]
    launch_site: Option<String>,
    #[serde(default)]
    outcome: Option<String>,
}

async fn handle_launch_proc(state: &Arc<ServerState>, body: &[u8]) -> Response<Full<Bytes>> {
    let req: LaunchProcRequest = match parse_body(body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let (Some(mission_id), Some(variant_id)) = (req.mission_id, req.variant_id) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "mission_id and variant_id are required",
        );
    };
    match with_store(state, move |s| {
        s.add_launch(
            mission_id,
            variant_id,
            req.display_name.as_deref(),
            req.launch_date.as_deref(),
            req.launch_site.as_deref(),
            req.outcome.as_deref(),
        )
    })
    .await
    {
        Ok(id) => json_response(
            StatusCode::CREATED,
            &json!({ "success": true, "id": id, "message": "launch created via procedure" }),
        ),
        Err(resp) => resp,
    }
}

/* ------------------------------------------------------------------------ */
/* Plumbing                                                                 */
/* ------------------------------------------------------------------------ */

/// Run a store operation off the async threads. The error side is already
/// a ready-to-send response.
async fn with_store<T, F>(
    state: &Arc<ServerState>,
    op: F,
) -> Result<T, Response<Full<Bytes>>>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteStore) -> Result<T, StoreError> + Send + 'static,
{
    let state = Arc::clone(state);
    let joined = tokio::task::spawn_blocking(move || {
        let mut store = match state.store.lock() {
            Ok(guard) => guard,
            Err(_) => {
                return Err(json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store lock poisoned",
                ))
            }
        };
        op(&mut store).map_err(|e| store_error_response(&e))
    })
    .await;

    match joined {
        Ok(result) => result,
        Err(e) => Err(json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("store task join failed: {e}"),
        )),
    }
}

fn store_error_response(e: &StoreError) -> Response<Full<Bytes>> {
    let status = match e {
        StoreError::UnknownId { .. } => StatusCode::NOT_FOUND,
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoreError::Sql(_) | StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, &e.to_string())
}

fn respond<T: Serialize>(result: Result<T, Response<Full<Bytes>>>) -> Response<Full<Bytes>> {
    match result {
        Ok(value) => json_response(StatusCode::OK, &value),
        Err(resp) => resp,
    }
}

fn created(result: Result<i64, Response<Full<Bytes>>>) -> Response<Full<Bytes>> {
    match result {
        Ok(id) => json_response(StatusCode::CREATED, &json!({ "success": true, "id": id })),
        Err(resp) => resp,
    }
}

fn updated(result: Result<(), Response<Full<Bytes>>>) -> Response<Full<Bytes>> {
    match result {
        Ok(()) => json_response(StatusCode::OK, &json!({ "success": true })),
        Err(resp) => resp,
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Response<Full<Bytes>>> {
    // Clients may POST with no body at all (e.g. mission completion).
    let raw: &[u8] = if body.is_empty() { b"{}" } else { body };
    serde_json::from_slice(raw).map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            &format!("failed to parse request JSON: {e}"),
        )
    })
}

fn parse_id(raw: &str) -> Result<i64, Response<Full<Bytes>>> {
    raw.parse::<i64>()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, &format!("invalid id `{raw}`")))
}

fn query_limit(query: Option<&str>) -> Result<u32, Response<Full<Bytes>>> {
    let Some(query) = query else {
        return Ok(DEFAULT_BROWSE_LIMIT);
    };
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == "limit" {
            return value.parse::<u32>().map_err(|_| {
                json_error(StatusCode::BAD_REQUEST, &format!("invalid limit `{value}`"))
            });
        }
    }
    Ok(DEFAULT_BROWSE_LIMIT)
}

fn require_admin(
    auth: Option<&str>,
    state: &ServerState,
) -> Result<(), Response<Full<Bytes>>> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(());
    };

    let Some(header) = auth else {
        return Err(json_error(
            StatusCode::UNAUTHORIZED,
            "missing Authorization: Bearer <token>",
        ));
    };

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or("");
    if token != expected {
        return Err(json_error(StatusCode::FORBIDDEN, "invalid admin token"));
    }
    Ok(())
}

fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"internal error"))))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{\"error\":\"serialize\"}".to_vec());
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"{\"error\":\"internal\"}"))))
}

fn json_error(status: StatusCode, msg: &str) -> Response<Full<Bytes>> {
    let v = json!({ "error": msg });
    json_response(status, &v)
}
