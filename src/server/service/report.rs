//! Weekly and monthly reports.
//!
//! A report bundles the roster, the user accounts and the events of a period, scoped
//! to one department or to every department, and renders them as an XLSX workbook or a
//! PDF table.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{category::CategoryRepository, event::EventRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        actor::Actor,
        category::Category,
        event::Event,
        label::same_label,
        report::{
            ReportData, ReportFile, ReportFormat, ReportKind, ReportPeriod, ALL_DEPARTMENTS,
        },
        user::User,
    },
};

pub mod pdf;
pub mod xlsx;

const CATEGORY_HEADERS: [&str; 4] = ["ID Number", "Office", "Email", "Department"];
const USER_HEADERS: [&str; 4] = ["ID", "Employee Number", "Email", "Type"];
const EVENT_HEADERS: [&str; 12] = [
    "ID",
    "Program",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "Purpose",
    "Participants",
    "Department",
    "Status",
    "Created By",
    "Created At",
];

/// A report as requested through the API, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub kind: String,
    pub department: Option<String>,
    pub start: String,
    pub end: String,
    pub format: Option<String>,
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Collects and renders a report.
    ///
    /// Administrators may request any department or `All`. Department users always get
    /// their own department: `All` is narrowed to it and any other department is denied.
    ///
    /// # Returns
    /// - `Ok(ReportFile)` - Rendered file with its download name and content type
    /// - `Err(AppError::BadRequest)` - Unknown type or format, missing or invalid range
    /// - `Err(AppError::AuthErr(AccessDenied))` - Office actor, or another department requested
    pub async fn generate(
        &self,
        actor: &Actor,
        request: ReportRequest,
    ) -> Result<ReportFile, AppError> {
        let kind = ReportKind::parse(&request.kind)?;
        let format = ReportFormat::parse(request.format.as_deref())?;
        let period = ReportPeriod::from_query(kind, &request.start, &request.end)?;
        let department = resolve_department(actor, request.department.as_deref())?;

        let data = self.collect(kind, department, &period).await?;

        let bytes = match format {
            ReportFormat::Xlsx => xlsx::render(&data)?,
            ReportFormat::Pdf => pdf::render(&data),
        };

        let filename = format!(
            "report_{}_{}_{}.{}",
            kind.as_str(),
            filename_safe(&data.department),
            Utc::now().timestamp(),
            format.extension()
        );

        tracing::info!(
            actor = %actor.label(),
            events = data.events.len(),
            "Generated {}",
            filename
        );

        Ok(ReportFile {
            filename,
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn collect(
        &self,
        kind: ReportKind,
        department: String,
        period: &ReportPeriod,
    ) -> Result<ReportData, AppError> {
        let mut categories = CategoryRepository::new(self.db).get_all().await?;
        let mut users = UserRepository::new(self.db).get_all().await?;
        let mut events = EventRepository::new(self.db).get_in_period(period).await?;

        if department != ALL_DEPARTMENTS {
            categories.retain(|c| same_label(&c.department, &department));
            users.retain(|u| same_label(u.user_type.as_str(), &department));
            events.retain(|e| e.departments.iter().any(|d| same_label(d, &department)));
        }

        Ok(ReportData {
            kind,
            department,
            categories,
            users,
            events,
        })
    }
}

/// Resolves the department a report is scoped to.
fn resolve_department(actor: &Actor, requested: Option<&str>) -> Result<String, AuthError> {
    if actor.is_office() {
        return Err(AuthError::AccessDenied(
            "Office logins cannot generate reports.".to_string(),
        ));
    }

    let requested = requested
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(ALL_DEPARTMENTS);
    let all = same_label(requested, ALL_DEPARTMENTS);

    match actor.department() {
        None if all => Ok(ALL_DEPARTMENTS.to_string()),
        None => Ok(requested.to_string()),
        Some(own) if all || same_label(own, requested) => Ok(own.to_string()),
        Some(_) => Err(AuthError::AccessDenied(
            "You can only generate reports for your own department.".to_string(),
        )),
    }
}

fn filename_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}

fn category_row(category: &Category) -> Vec<String> {
    vec![
        category.id_number.clone(),
        category.office.clone(),
        category.email.clone(),
        category.department.clone(),
    ]
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.id.to_string(),
        user.employee_number.clone(),
        user.email.clone(),
        user.user_type.as_str().to_string(),
    ]
}

fn event_row(event: &Event) -> Vec<String> {
    vec![
        event.id.to_string(),
        event.program.clone(),
        event.start_at.format("%Y-%m-%d").to_string(),
        event.start_at.format("%H:%M").to_string(),
        event.end_at.format("%Y-%m-%d").to_string(),
        event.end_at.format("%H:%M").to_string(),
        event.purpose.clone(),
        join_labels(&event.participants),
        join_labels(&event.departments),
        event.status.as_str().to_string(),
        event.created_by.clone(),
        event.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}
