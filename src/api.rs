use crate::catalog::service::CatalogService;
use crate::identity::{IdentityGenerator, RandomIdentityGenerator};
use crate::routes::{
    add_case, advance_step, begin_selection, close_session, complete_selection, create_session,
    get_matrix, get_selection, get_session, get_steps, get_summary, list_apps, list_builds,
    list_comparison_types, list_custom_scripts, list_device_farms, list_devices,
    list_environments, list_modules, list_os_versions, list_platforms, list_premade_suites,
    list_release_versions, list_suites, remove_case, reset_session, retreat_step,
    schedule_preview, search_modules_route, submit_job, toggle_app, toggle_case,
    update_config, update_matrix_cell,
};
use crate::session::model::WizardSession;
use crate::submission::service::{SimulatedGateway, SubmissionGateway};
use axum::body::Body;
use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, WizardSession>>>,
    pub catalog: Arc<CatalogService>,
    pub gateway: Arc<dyn SubmissionGateway>,
    pub identities: Arc<dyn IdentityGenerator>,
}

// support extracting the catalog directly in read-only handlers
impl FromRef<AppState> for Arc<CatalogService> {
    fn from_ref(app_state: &AppState) -> Arc<CatalogService> {
        app_state.catalog.clone()
    }
}

pub async fn build_api() -> Router {
    tracing_subscriber::fmt::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_state = AppState {
        sessions: Arc::new(RwLock::new(HashMap::new())),
        catalog: Arc::new(CatalogService::new()),
        gateway: Arc::new(SimulatedGateway::new()),
        identities: Arc::new(RandomIdentityGenerator),
    };

    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(close_session))
        .route("/sessions/:id/reset", post(reset_session))
        .route("/sessions/:id/config", patch(update_config))
        .route("/sessions/:id/steps", get(get_steps))
        .route("/sessions/:id/advance", post(advance_step))
        .route("/sessions/:id/retreat", post(retreat_step))
        .route(
            "/sessions/:id/selection",
            post(begin_selection).get(get_selection),
        )
        .route("/sessions/:id/selection/cases", post(add_case))
        .route("/sessions/:id/selection/cases/:case_id", delete(remove_case))
        .route(
            "/sessions/:id/selection/cases/:case_id/toggle",
            post(toggle_case),
        )
        .route(
            "/sessions/:id/selection/cases/:case_id/apps/:app_id/toggle",
            post(toggle_app),
        )
        .route("/sessions/:id/selection/complete", post(complete_selection))
        .route(
            "/sessions/:id/matrix",
            get(get_matrix).patch(update_matrix_cell),
        )
        .route("/sessions/:id/schedule-preview", get(schedule_preview))
        .route("/sessions/:id/submit", post(submit_job))
        .route("/sessions/:id/summary", get(get_summary))
        .route("/catalog/platforms", get(list_platforms))
        .route("/catalog/environments", get(list_environments))
        .route("/catalog/suites", get(list_suites))
        .route("/catalog/release-versions", get(list_release_versions))
        .route("/catalog/builds", get(list_builds))
        .route("/catalog/custom-scripts", get(list_custom_scripts))
        .route("/catalog/device-farms", get(list_device_farms))
        .route("/catalog/comparison-types", get(list_comparison_types))
        .route("/catalog/os-versions", get(list_os_versions))
        .route("/catalog/devices", get(list_devices))
        .route("/catalog/apps", get(list_apps))
        .route("/catalog/modules", get(list_modules))
        .route("/catalog/modules/search", get(search_modules_route))
        .route("/catalog/premade-suites", get(list_premade_suites))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(app_state)
}

pub struct ApiResponse<T>(pub T);

impl<T> ApiResponse<T> {
    pub fn from(result: Result<T, AppError>) -> Result<ApiResponse<T>, AppError> {
        match result {
            Ok(t) => Ok(ApiResponse(t)),
            Err(e) => Err(e),
        }
    }
    pub fn from_option(result: Result<Option<T>, AppError>) -> Result<ApiResponse<T>, AppError> {
        match result {
            Ok(t) => match t {
                None => Err(AppError::NotFound("Not found".to_string())),
                Some(val) => Ok(ApiResponse(val)),
            },
            Err(e) => Err(e),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_string(&self.0) {
            Ok(json) => Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .body(json.into())
                .unwrap(),
            Err(_) => Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("Failed to serialize response".into())
                .unwrap(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(String),
    Processing(String),
    Internal(String),
}

#[derive(Deserialize, Serialize, Clone)]
pub struct ErrorBody {
    pub message: String,
}

impl Into<Body> for ErrorBody {
    fn into(self) -> Body {
        Body::from(serde_json::to_string(&self).unwrap())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => Response::builder()
                .status(404)
                .header("Content-Type", "application/json")
                .body(ErrorBody { message }.into())
                .unwrap(),
            AppError::Validation(message) => Response::builder()
                .status(400)
                .header("Content-Type", "application/json")
                .body(ErrorBody { message }.into())
                .unwrap(),
            AppError::Processing(message) => Response::builder()
                .status(422)
                .header("Content-Type", "application/json")
                .body(ErrorBody { message }.into())
                .unwrap(),
            AppError::Internal(message) => {
                tracing::error!("{}", message);
                Response::builder()
                    .status(500)
                    .header("Content-Type", "application/json")
                    .body(
                        ErrorBody {
                            message: "Internal server error".to_string(),
                        }
                        .into(),
                    )
                    .unwrap()
            }
        }
    }
}
