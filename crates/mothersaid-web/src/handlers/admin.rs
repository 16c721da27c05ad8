//! Admin landing page: totals and recent uploads.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

use mothersaid_common::entities::DashboardInfo;

use crate::flash::{self, Flash};
use crate::layout::{self, esc, fmt_datetime};
use crate::session;
use crate::state::SharedState;

pub async fn dashboard(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let (token, role) = session::require_admin(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let info = match state.api.dashboard_info(&token).await {
        Ok(info) => Some(info),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(
                err.user_message("Failed to load dashboard information"),
            ));
            None
        }
    };

    let content = render_dashboard(info.as_ref());
    Ok((
        jar,
        layout::admin_page(
            "Dashboard",
            "/portal/admin/dashboard",
            &role,
            flash.as_ref(),
            &content,
        ),
    ))
}

fn render_dashboard(info: Option<&DashboardInfo>) -> String {
    let (students, reports, materials, news) = info
        .map(|i| {
            (
                i.total_students,
                i.total_report_cards,
                i.total_materials,
                i.total_news,
            )
        })
        .unwrap_or_default();

    let recent_rows: String = match info {
        Some(info) if !info.recent_materials.is_empty() => info
            .recent_materials
            .iter()
            .map(|m| {
                format!(
                    r#"<tr>
    <td>{title}</td>
    <td>{subject}</td>
    <td>{class}</td>
    <td>{term} Term, {session}</td>
    <td>{uploaded}</td>
</tr>"#,
                    title = esc(&m.title),
                    subject = esc(&m.subject),
                    class = esc(&m.class_assigned),
                    term = esc(&m.term),
                    session = esc(&m.session),
                    uploaded = fmt_datetime(m.upload_date),
                )
            })
            .collect(),
        _ => r#"<tr><td colspan="5" class="empty-state">No materials uploaded yet.</td></tr>"#
            .to_string(),
    };

    format!(
        r#"<div class="page-header">
    <h1>Dashboard</h1>
    <p class="muted">School overview at a glance</p>
</div>
<div class="stats-grid">
    <div class="stat-card"><div class="stat-value">{students}</div><div class="stat-label">Total Students</div></div>
    <div class="stat-card"><div class="stat-value">{reports}</div><div class="stat-label">Report Cards</div></div>
    <div class="stat-card"><div class="stat-value">{materials}</div><div class="stat-label">Reading Materials</div></div>
    <div class="stat-card"><div class="stat-value">{news}</div><div class="stat-label">News &amp; Updates</div></div>
</div>
<div class="card">
    <div class="card-header">Recent Uploads</div>
    <table class="table">
        <thead><tr><th>Title</th><th>Subject</th><th>Class</th><th>Period</th><th>Uploaded</th></tr></thead>
        <tbody>{recent_rows}</tbody>
    </table>
</div>"#
    )
}
