use axum::extract::{Path, Query, State};
use axum::Json;
use dx_core::query::{Pagination, ReportFilter};
use dx_core::types::{ExportFormat, ExportTicket, Report, ReportRequest};
use serde::Deserialize;

use super::{reply, reply_page, Reply, Shared};
use crate::api_error::BridgeError;

#[derive(Debug, Deserialize)]
pub(crate) struct ExportQuery {
    format: Option<String>,
}

pub(crate) async fn list(
    State(state): Shared,
    Query(criteria): Query<ReportFilter>,
    Query(page): Query<Pagination>,
) -> Reply<Vec<Report>> {
    reply_page(state.backend.list_reports(&criteria, page).await)
}

pub(crate) async fn get_one(State(state): Shared, Path(id): Path<String>) -> Reply<Report> {
    reply(state.backend.report(&id).await)
}

pub(crate) async fn create(State(state): Shared, Json(request): Json<ReportRequest>) -> Reply<Report> {
    reply(state.backend.create_report(&request).await)
}

/// GET /api/v1/reports/{id}/export?format=pdf
///
/// `format` defaults to pdf; an unknown value is a 400.
pub(crate) async fn export(
    State(state): Shared,
    Path(id): Path<String>,
    Query(q): Query<ExportQuery>,
) -> Reply<ExportTicket> {
    let format = match q.format.as_deref() {
        None | Some("") => ExportFormat::Pdf,
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|e| BridgeError::BadRequest(e.to_string()))?,
    };
    reply(state.backend.export_report(&id, format).await)
}
