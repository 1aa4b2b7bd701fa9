//! Caller-side view state for alerts and reports.
//!
//! The backend never mutates its dataset, so acknowledgements, escalations
//! and newly generated reports live here for as long as the caller keeps
//! the board around.

use dx_api_types::ApiResult;
use dx_core::query::{AlertFilter, Pagination, ReportFilter};
use dx_core::types::{
    Alert, AlertAcknowledgement, AlertEscalation, ExportFormat, ExportTicket, Report,
    ReportRequest, Severity,
};

use crate::backend::DataBackend;

// ---------------------------------------------------------------------------
// AlertBoard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub async fn load(backend: &dyn DataBackend, criteria: &AlertFilter) -> ApiResult<Self> {
        let page = backend.list_alerts(criteria, Pagination::default()).await?;
        Ok(Self::from_alerts(page.items))
    }

    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Alerts not yet acknowledged, in load order.
    pub fn active(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| !a.is_acknowledged)
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Local state only changes once the backend call succeeds.
    pub async fn acknowledge(
        &mut self,
        backend: &dyn DataBackend,
        id: &str,
    ) -> ApiResult<AlertAcknowledgement> {
        let ack = backend.acknowledge_alert(id).await?;
        if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == ack.id) {
            alert.is_acknowledged = ack.acknowledged;
        }
        Ok(ack)
    }

    pub async fn escalate(
        &mut self,
        backend: &dyn DataBackend,
        id: &str,
    ) -> ApiResult<AlertEscalation> {
        let esc = backend.escalate_alert(id).await?;
        if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == esc.id) {
            alert.severity = esc.severity;
        }
        Ok(esc)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.alerts.iter().filter(|a| a.severity == severity).count()
    }
}

// ---------------------------------------------------------------------------
// ReportShelf
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReportShelf {
    reports: Vec<Report>,
}

impl ReportShelf {
    pub async fn load(backend: &dyn DataBackend, criteria: &ReportFilter) -> ApiResult<Self> {
        let page = backend.list_reports(criteria, Pagination::default()).await?;
        Ok(Self {
            reports: page.items,
        })
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Generate a report and put it at the front of the shelf.
    pub async fn create(
        &mut self,
        backend: &dyn DataBackend,
        request: &ReportRequest,
    ) -> ApiResult<&Report> {
        let report = backend.create_report(request).await?;
        self.reports.insert(0, report);
        Ok(&self.reports[0])
    }

    /// Drop a report locally. Returns it if it was on the shelf.
    pub fn remove(&mut self, id: &str) -> Option<Report> {
        let idx = self.reports.iter().position(|r| r.id == id)?;
        Some(self.reports.remove(idx))
    }

    pub async fn export(
        &self,
        backend: &dyn DataBackend,
        id: &str,
        format: ExportFormat,
    ) -> ApiResult<ExportTicket> {
        backend.export_report(id, format).await
    }
}
