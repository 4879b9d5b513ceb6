use crate::api::{ApiResponse, AppError, AppState};
use crate::catalog::model::{App, OptionItem, PremadeSuite, TestModule};
use crate::catalog::service::CatalogService;
use crate::config::patch::ConfigPatch;
use crate::matrix::model::TestMatrix;
use crate::matrix::service::{build_matrix, set_user_id};
use crate::schedule::model::SchedulePreview;
use crate::schedule::preview::render_preview;
use crate::session::model::{StepInfo, WizardSession};
use crate::submission::model::{Confirmation, JobSummary};
use crate::submission::service::{build_summary, submit_session};
use crate::suite::model::{ModulePage, SuiteSelection};
use crate::suite::service::search_modules;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub async fn create_session(State(app_state): State<AppState>) -> ApiResponse<WizardSession> {
    let session = WizardSession::new();
    let mut sessions = app_state.sessions.write().await;
    sessions.insert(session.id.clone(), session.clone());
    ApiResponse(session)
}

pub async fn get_session(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<WizardSession>, AppError> {
    let sessions = app_state.sessions.read().await;
    ApiResponse::from_option(Ok(sessions.get(&id).cloned()))
}

pub async fn close_session(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    let mut sessions = app_state.sessions.write().await;
    sessions.remove(&id);
    StatusCode::NO_CONTENT
}

pub async fn reset_session(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<WizardSession>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.reset();
    Ok(ApiResponse(session.clone()))
}

pub async fn update_config(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(patch): Json<ConfigPatch>,
) -> Result<ApiResponse<WizardSession>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.apply_patch(patch)?;
    Ok(ApiResponse(session.clone()))
}

pub async fn get_steps(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<StepState>, AppError> {
    let sessions = app_state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    Ok(ApiResponse(StepState::of(session)))
}

pub async fn advance_step(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<StepState>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.advance()?;
    Ok(ApiResponse(StepState::of(session)))
}

pub async fn retreat_step(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<StepState>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.retreat()?;
    Ok(ApiResponse(StepState::of(session)))
}

pub async fn begin_selection(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.begin_selection(&app_state.catalog, app_state.identities.as_ref())?;
    ApiResponse::from_option(Ok(session.selection.clone()))
}

pub async fn get_selection(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let sessions = app_state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    ApiResponse::from_option(Ok(session.selection.clone()))
}

pub async fn add_case(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<AddCaseRequest>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let case = app_state
        .catalog
        .test_case(&body.test_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::NotFound(format!("Test case {} not found", body.test_case_id))
        })?;
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selection = session.selection_mut()?;
    selection.add_case(&case, app_state.identities.as_ref());
    Ok(ApiResponse(selection.clone()))
}

pub async fn remove_case(
    Path(path_params): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&path_params.0)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selection = session.selection_mut()?;
    selection.remove_case(&path_params.1);
    Ok(ApiResponse(selection.clone()))
}

pub async fn toggle_case(
    Path(path_params): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let case = app_state
        .catalog
        .test_case(&path_params.1)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Test case {} not found", path_params.1)))?;
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&path_params.0)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selection = session.selection_mut()?;
    selection.toggle_case(&case, app_state.identities.as_ref());
    Ok(ApiResponse(selection.clone()))
}

pub async fn toggle_app(
    Path(path_params): Path<(String, String, String)>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SuiteSelection>, AppError> {
    let case = app_state
        .catalog
        .test_case(&path_params.1)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Test case {} not found", path_params.1)))?;
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&path_params.0)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selection = session.selection_mut()?;
    selection.toggle_app(&case, &path_params.2, app_state.identities.as_ref())?;
    Ok(ApiResponse(selection.clone()))
}

pub async fn complete_selection(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<WizardSession>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    session.complete_selection(&app_state.catalog)?;
    Ok(ApiResponse(session.clone()))
}

pub async fn get_matrix(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<TestMatrix>, AppError> {
    let sessions = app_state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selected = match (&session.selection, &session.config.test_suite_config) {
        (Some(selection), _) => selection.selected.as_slice(),
        (None, Some(suite_config)) => suite_config.selected_test_cases(),
        (None, None) => {
            return Err(AppError::Validation(
                "No test selection to build a matrix from".to_string(),
            ))
        }
    };
    Ok(ApiResponse(build_matrix(selected, &app_state.catalog)))
}

pub async fn update_matrix_cell(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<MatrixCellRequest>,
) -> Result<ApiResponse<TestMatrix>, AppError> {
    let mut sessions = app_state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let selection = session.selection_mut()?;
    set_user_id(
        &mut selection.selected,
        &body.test_case_id,
        &body.app_id,
        &body.user_id,
    )?;
    Ok(ApiResponse(build_matrix(
        &selection.selected,
        &app_state.catalog,
    )))
}

pub async fn schedule_preview(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<SchedulePreview>, AppError> {
    let sessions = app_state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    // missing schedule inputs yield an empty preview, not an error
    let preview = match &session.config.schedule_config {
        Some(schedule) => render_preview(schedule),
        None => SchedulePreview {
            description: String::new(),
            runs: vec![],
        },
    };
    Ok(ApiResponse(preview))
}

pub async fn submit_job(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<Confirmation>, AppError> {
    let result = submit_session(&app_state.sessions, app_state.gateway.as_ref(), &id).await;
    ApiResponse::from(result)
}

pub async fn get_summary(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<JobSummary>, AppError> {
    let sessions = app_state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    ApiResponse::from(build_summary(session, &app_state.catalog))
}

pub async fn list_platforms(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.platforms())
}

pub async fn list_environments(
    params: Query<EnvironmentsQueryParams>,
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.environments_for(&params.platform))
}

pub async fn list_suites(
    params: Query<SuitesQueryParams>,
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.suites_for(&params.platform, &params.environment))
}

pub async fn list_release_versions(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.release_versions())
}

pub async fn list_builds(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.builds())
}

pub async fn list_custom_scripts(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.custom_scripts())
}

pub async fn list_device_farms(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.device_farms())
}

pub async fn list_comparison_types(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.comparison_types())
}

pub async fn list_os_versions(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.os_versions())
}

pub async fn list_devices(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<OptionItem>> {
    ApiResponse(catalog.devices())
}

pub async fn list_apps(State(catalog): State<Arc<CatalogService>>) -> ApiResponse<Vec<App>> {
    ApiResponse(catalog.apps())
}

pub async fn list_modules(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<TestModule>> {
    ApiResponse(catalog.modules().to_vec())
}

pub async fn search_modules_route(
    params: Query<ModuleSearchQueryParams>,
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<ModulePage> {
    let term = params.q.clone().unwrap_or_default();
    let page = params.page.unwrap_or(1);
    ApiResponse(search_modules(&catalog, &term, page))
}

pub async fn list_premade_suites(
    State(catalog): State<Arc<CatalogService>>,
) -> ApiResponse<Vec<PremadeSuite>> {
    ApiResponse(catalog.premade_suites().to_vec())
}

/// The sequencer's view of a session: where it is in the visible steps and
/// how far along that is.
#[derive(Serialize)]
pub struct StepState {
    pub current_step: u32,
    pub progress: f64,
    pub steps: Vec<StepInfo>,
}

impl StepState {
    fn of(session: &WizardSession) -> Self {
        StepState {
            current_step: session.current_step,
            progress: session.progress(),
            steps: session.steps(),
        }
    }
}

#[derive(Deserialize)]
pub struct EnvironmentsQueryParams {
    platform: String,
}

#[derive(Deserialize)]
pub struct SuitesQueryParams {
    platform: String,
    environment: String,
}

#[derive(Deserialize)]
pub struct ModuleSearchQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[derive(Deserialize)]
pub struct AddCaseRequest {
    pub test_case_id: String,
}

#[derive(Deserialize)]
pub struct MatrixCellRequest {
    pub test_case_id: String,
    pub app_id: String,
    pub user_id: String,
}
