//! Reading material upload page. The file is required and capped at 10 MiB
//! before anything is sent upstream.

use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

use mothersaid_api::materials::MaterialUpload;
use mothersaid_common::academics::{ClassLevel, Term};
use mothersaid_common::error::SchoolError;

use crate::flash::{self, Flash};
use crate::handlers::read_form_data;
use crate::layout;
use crate::session;
use crate::state::SharedState;

const MATERIALS_PATH: &str = "/portal/admin/dashboard/materials";

pub async fn page(jar: CookieJar) -> Result<(CookieJar, Html<String>), Redirect> {
    let (_, role) = session::require_admin(&jar)?;
    let (jar, flash) = flash::take_flash(jar);

    let class_options: String = ClassLevel::ALL
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.as_str(), c.label()))
        .collect();
    let term_options: String = Term::ALL
        .iter()
        .map(|t| format!(r#"<option value="{}">{}</option>"#, t.as_str(), t.label()))
        .collect();

    let content = format!(
        r#"<div class="page-header">
    <h1>Upload Learning Material</h1>
    <p class="muted">Add new reading materials for students</p>
</div>
<div class="card">
    <form method="post" action="{path}" enctype="multipart/form-data">
        <div class="form-grid">
            <div>
                <label for="title">Title</label>
                <input id="title" name="title" required>
            </div>
            <div>
                <label for="subject">Subject</label>
                <input id="subject" name="subject" required>
            </div>
            <div>
                <label for="class_assigned">Class</label>
                <select id="class_assigned" name="class_assigned" required>
                    <option value="" disabled selected>Select class</option>
                    {class_options}
                </select>
            </div>
            <div>
                <label for="term">Term</label>
                <select id="term" name="term" required>
                    <option value="" disabled selected>Select term</option>
                    {term_options}
                </select>
            </div>
            <div>
                <label for="session">Session</label>
                <input id="session" name="session" placeholder="2024/2025" required>
            </div>
        </div>
        <label for="description">Description</label>
        <textarea id="description" name="description" rows="3" required></textarea>
        <label for="file">File (max 10MB)</label>
        <input id="file" name="file" type="file">
        <button type="submit" class="btn btn-primary">Upload Material</button>
    </form>
</div>"#,
        path = MATERIALS_PATH,
    );
    Ok((
        jar,
        layout::admin_page(
            "Reading Materials",
            MATERIALS_PATH,
            &role,
            flash.as_ref(),
            &content,
        ),
    ))
}

async fn submit_material(
    state: &SharedState,
    token: &str,
    multipart: Multipart,
) -> Result<(), SchoolError> {
    let mut form = read_form_data(multipart).await?;
    let meta = MaterialUpload {
        title: form.require("title")?,
        description: form.require("description")?,
        subject: form.require("subject")?,
        class_assigned: form.require("class_assigned")?,
        term: form.require("term")?,
        session: form.require("session")?,
    };
    // Session is user-typed; catch malformed values before the API does
    meta.session
        .parse::<mothersaid_common::Session>()
        .map_err(|_| SchoolError::Validation("Session must look like 2024/2025".to_string()))?;
    let file = form
        .take_file("file")
        .ok_or_else(|| SchoolError::Validation("Please select a file to upload".to_string()))?;
    state.api.upload_material(token, &meta, file).await
}

pub async fn upload(
    State(state): State<SharedState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match submit_material(&state, &token, multipart).await {
        Ok(()) => flash::set_flash(jar, Flash::success("Material uploaded successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(
            jar,
            Flash::error(err.user_message("Failed to upload material")),
        ),
    };
    Ok((jar, Redirect::to(MATERIALS_PATH)))
}
