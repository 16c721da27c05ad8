//! Student portal: profile dashboard, academic reports, reading materials.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mothersaid_common::academics::{group_report_cards, unique_values, Term};
use mothersaid_common::entities::{ReportCard, StudentMaterial, StudentProfile};

use crate::flash::{self, Flash};
use crate::handlers::attachment;
use crate::layout::{self, esc, fmt_date, fmt_datetime};
use crate::session;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub async fn dashboard(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let token = session::require_student(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let profile = match state.api.student_profile(&token).await {
        Ok(profile) => Some(profile),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::STUDENT_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(
                err.user_message("Failed to fetch student data"),
            ));
            None
        }
    };

    let content = match &profile {
        Some(profile) => render_dashboard(profile),
        None => r#"<div class="empty-state">Your profile could not be loaded. Please try again later.</div>"#.to_string(),
    };
    Ok((
        jar,
        layout::student_page("Dashboard", "/portal/dashboard", flash.as_ref(), &content),
    ))
}

fn render_dashboard(profile: &StudentProfile) -> String {
    let latest = profile
        .report_cards
        .iter()
        .max_by_key(|c| c.date_generated)
        .map(|card| {
            format!(
                r#"<div class="card">
    <div class="card-header">Latest Report Card</div>
    <p><span class="label">Term:</span> {term} — {session}</p>
    <p><span class="label">Class:</span> {class}</p>
    <p><span class="label">Attendance:</span> {attendance} days</p>
    <a class="btn btn-outline" href="/portal/dashboard/reports">View all reports</a>
</div>"#,
                term = esc(&card.term),
                session = esc(&card.session),
                class = esc(&card.class_name),
                attendance = card.attendance,
            )
        })
        .unwrap_or_else(|| {
            r#"<div class="card"><div class="card-header">Latest Report Card</div>
    <p class="muted">No report cards yet.</p></div>"#
                .to_string()
        });

    format!(
        r#"<div class="page-header">
    <h1>Welcome, {name}</h1>
    <p class="muted">Admission number {admission}</p>
</div>
<div class="grid-2">
    <div class="card">
        <div class="card-header">My Profile</div>
        <p><span class="label">Class:</span> {class}</p>
        <p><span class="label">Date Admitted:</span> {admitted}</p>
        <p><span class="label">Guardian:</span> {guardian}</p>
        <p><span class="label">Guardian Phone:</span> {phone}</p>
        <p><span class="label">Guardian Email:</span> {email}</p>
    </div>
    {latest}
</div>"#,
        name = esc(&profile.full_name),
        admission = esc(&profile.admission_number),
        class = esc(&profile.current_class),
        admitted = fmt_date(profile.date_admitted),
        guardian = esc(&profile.guardian_name),
        phone = esc(&profile.guardian_phone),
        email = esc(&profile.guardian_email),
        latest = latest,
    )
}

// ---------------------------------------------------------------------------
// Academic reports
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub term: Option<String>,
    pub session: Option<String>,
}

impl ReportFilter {
    /// "all" and empty both mean "no filter", matching the dropdown defaults.
    fn term_param(&self) -> Option<&str> {
        self.term.as_deref().filter(|v| !v.is_empty() && *v != "all")
    }

    fn session_param(&self) -> Option<&str> {
        self.session
            .as_deref()
            .filter(|v| !v.is_empty() && *v != "all")
    }
}

pub async fn reports(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(filter): Query<ReportFilter>,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let token = session::require_student(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let cards = match state
        .api
        .academic_records(&token, filter.term_param(), filter.session_param())
        .await
    {
        Ok(cards) => cards,
        Err(err) if err.is_auth() => return Err(Redirect::to(session::STUDENT_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(
                err.user_message("Failed to fetch report cards"),
            ));
            vec![]
        }
    };

    let content = render_reports(&cards, &filter);
    Ok((
        jar,
        layout::student_page(
            "Academic Reports",
            "/portal/dashboard/reports",
            flash.as_ref(),
            &content,
        ),
    ))
}

fn option_tags(values: &[String], selected: Option<&str>) -> String {
    values
        .iter()
        .map(|v| {
            let sel = if Some(v.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{v}"{sel}>{v}</option>"#, v = esc(v))
        })
        .collect()
}

fn render_reports(cards: &[ReportCard], filter: &ReportFilter) -> String {
    let term_options: String = Term::ALL
        .iter()
        .map(|t| {
            let sel = if Some(t.as_str()) == filter.term_param() {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{sel}>{}</option>"#,
                t.as_str(),
                t.label()
            )
        })
        .collect();
    let sessions = unique_values(cards, |c: &ReportCard| c.session.as_str());
    let session_options = option_tags(&sessions, filter.session_param());

    let filter_bar = format!(
        r#"<form method="get" action="/portal/dashboard/reports" class="filter-bar">
    <select name="term">
        <option value="all">All terms</option>
        {term_options}
    </select>
    <select name="session">
        <option value="all">All sessions</option>
        {session_options}
    </select>
    <button type="submit" class="btn btn-outline">Filter</button>
</form>"#
    );

    let body = if cards.is_empty() {
        r#"<div class="empty-state">No report cards found for the selected period.</div>"#
            .to_string()
    } else {
        group_report_cards(cards)
            .into_iter()
            .map(|(session, cards)| {
                let cards_html: String = cards.iter().map(|c| render_report_card(c)).collect();
                format!(
                    r#"<section class="report-session">
    <h2>{session} Session</h2>
    {cards_html}
</section>"#,
                    session = esc(&session),
                )
            })
            .collect()
    };

    format!(
        r#"<div class="page-header">
    <h1>Academic Reports</h1>
    <p class="muted">Your report cards by session and term</p>
</div>
{filter_bar}
{body}"#
    )
}

fn render_report_card(card: &ReportCard) -> String {
    let subject_rows: String = card
        .subjects
        .iter()
        .map(|s| {
            format!(
                r#"<tr>
    <td>{subject}</td>
    <td class="num">{ca}</td>
    <td class="num">{exam}</td>
    <td class="num">{total}</td>
    <td>{grade}</td>
    <td>{remark}</td>
</tr>"#,
                subject = esc(&s.subject_name),
                ca = s.ca_score,
                exam = s.exam_score,
                total = s.total_score,
                grade = esc(&s.grade),
                remark = esc(&s.teacher_remark),
            )
        })
        .collect();

    let position = match (card.position_in_class, card.total_students) {
        (Some(pos), Some(total)) => format!("{pos} of {total}"),
        (Some(pos), None) => pos.to_string(),
        _ => "—".to_string(),
    };

    format!(
        r#"<div class="card report-card">
    <div class="card-header">
        <span>{term} Term — {class}</span>
        <a class="btn btn-outline btn-sm" href="/portal/dashboard/reports/{id}/download">Download PDF</a>
    </div>
    <p class="muted">Position: {position} &middot; Attendance: {attendance} days &middot; Generated {generated}</p>
    <table class="table">
        <thead>
            <tr><th>Subject</th><th>CA</th><th>Exam</th><th>Total</th><th>Grade</th><th>Remark</th></tr>
        </thead>
        <tbody>{subject_rows}</tbody>
    </table>
</div>"#,
        term = esc(&card.term),
        class = esc(&card.class_name),
        id = esc(&card.id),
        position = position,
        attendance = card.attendance,
        generated = fmt_date(card.date_generated),
    )
}

pub async fn download_report(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(report_id): Path<String>,
) -> Response {
    let Ok(token) = session::require_student(&jar) else {
        return Redirect::to(session::STUDENT_LOGIN).into_response();
    };
    match state.api.download_report_card(&token, &report_id).await {
        Ok(download) => attachment(download, &format!("report_card_{report_id}.pdf")),
        Err(err) if err.is_auth() => Redirect::to(session::STUDENT_LOGIN).into_response(),
        Err(err) => {
            let jar = flash::set_flash(
                jar,
                Flash::error(err.user_message("Failed to download report card")),
            );
            (jar, Redirect::to("/portal/dashboard/reports")).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Reading materials
// ---------------------------------------------------------------------------

pub async fn materials(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let token = session::require_student(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let materials = match state.api.student_materials(&token).await {
        Ok(materials) => materials,
        Err(err) if err.is_auth() => return Err(Redirect::to(session::STUDENT_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(
                err.user_message("Could not load reading materials."),
            ));
            vec![]
        }
    };

    let content = render_materials(&materials);
    Ok((
        jar,
        layout::student_page(
            "Reading Materials",
            "/portal/dashboard/materials",
            flash.as_ref(),
            &content,
        ),
    ))
}

fn render_materials(materials: &[StudentMaterial]) -> String {
    let body = if materials.is_empty() {
        r#"<div class="empty-state">No reading materials have been posted for your class yet.</div>"#
            .to_string()
    } else {
        materials
            .iter()
            .map(|m| {
                format!(
                    r#"<div class="card material-card">
    <div class="card-header">
        <span>{title}</span>
        <a class="btn btn-outline btn-sm" href="/portal/dashboard/materials/{id}/download">Download</a>
    </div>
    <p>{description}</p>
    <p class="muted">{subject} &middot; {term} Term, {session} &middot; Posted {posted}</p>
</div>"#,
                    title = esc(&m.title),
                    id = esc(&m.id),
                    description = esc(&m.description),
                    subject = esc(&m.subject),
                    term = esc(&m.term),
                    session = esc(&m.session),
                    posted = fmt_datetime(m.upload_date),
                )
            })
            .collect()
    };

    format!(
        r#"<div class="page-header">
    <h1>Reading Materials</h1>
    <p class="muted">Access your class reading materials below</p>
</div>
{body}"#
    )
}

pub async fn download_material(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(material_id): Path<String>,
) -> Response {
    let Ok(token) = session::require_student(&jar) else {
        return Redirect::to(session::STUDENT_LOGIN).into_response();
    };
    match state.api.download_material(&token, &material_id).await {
        Ok(download) => attachment(download, "download"),
        Err(err) if err.is_auth() => Redirect::to(session::STUDENT_LOGIN).into_response(),
        Err(err) => {
            let jar = flash::set_flash(
                jar,
                Flash::error(err.user_message("Failed to download file")),
            );
            (jar, Redirect::to("/portal/dashboard/materials")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_empty_are_no_filter() {
        let filter = ReportFilter {
            term: Some("all".to_string()),
            session: Some(String::new()),
        };
        assert_eq!(filter.term_param(), None);
        assert_eq!(filter.session_param(), None);

        let filter = ReportFilter {
            term: Some("First".to_string()),
            session: Some("2023/2024".to_string()),
        };
        assert_eq!(filter.term_param(), Some("First"));
        assert_eq!(filter.session_param(), Some("2023/2024"));
    }
}
