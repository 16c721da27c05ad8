//! Admin news management: create, edit, delete. Creation requires a cover
//! image; edits may keep the existing one.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mothersaid_common::entities::NewsItem;
use mothersaid_common::error::SchoolError;

use crate::flash::{self, Flash};
use crate::handlers::read_form_data;
use crate::layout::{self, esc, fmt_datetime};
use crate::session;
use crate::state::SharedState;

const NEWS_PATH: &str = "/portal/admin/dashboard/news";

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    /// News id whose edit form is open.
    pub edit: Option<String>,
}

pub async fn page(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<NewsQuery>,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let (_, role) = session::require_admin(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let items = match state.api.list_news().await {
        Ok(items) => items,
        Err(err) => {
            flash = Some(Flash::error(err.user_message("Failed to load news items")));
            vec![]
        }
    };

    let content = render_page(&items, query.edit.as_deref());
    Ok((
        jar,
        layout::admin_page("News & Updates", NEWS_PATH, &role, flash.as_ref(), &content),
    ))
}

fn render_page(items: &[NewsItem], editing: Option<&str>) -> String {
    let create_form = format!(
        r#"<div class="card">
    <div class="card-header">Publish News</div>
    <form method="post" action="{path}" enctype="multipart/form-data">
        <label for="title">Title</label>
        <input id="title" name="title" required>
        <label for="content">Content</label>
        <textarea id="content" name="content" rows="4" required></textarea>
        <label for="cover_image">Cover Image</label>
        <input id="cover_image" name="cover_image" type="file" accept="image/*">
        <button type="submit" class="btn btn-primary">Publish</button>
    </form>
</div>"#,
        path = NEWS_PATH,
    );

    let cards = if items.is_empty() {
        r#"<div class="empty-state">No news published yet.</div>"#.to_string()
    } else {
        let cards: String = items
            .iter()
            .map(|item| {
                if editing == Some(item.id.as_str()) {
                    render_edit_form(item)
                } else {
                    render_news_card(item)
                }
            })
            .collect();
        format!(r#"<div class="card-grid">{cards}</div>"#)
    };

    format!(
        r#"<div class="page-header">
    <h1>News &amp; Updates</h1>
    <p class="muted">Publish and manage school news</p>
</div>
{create_form}
{cards}"#
    )
}

fn render_news_card(item: &NewsItem) -> String {
    format!(
        r#"<div class="card news-card">
    <img src="/news/{id}/image" alt="{title}">
    <div class="news-body">
        <h3>{title}</h3>
        <p class="muted">{date}</p>
        <p>{content}</p>
        <div class="card-actions">
            <a class="btn btn-outline btn-sm" href="{path}?edit={id}">Edit</a>
            <form method="post" action="{path}/{id}/delete"
                  onsubmit="return confirm('Are you sure you want to delete this news item?')">
                <button type="submit" class="btn btn-danger btn-sm">Delete</button>
            </form>
        </div>
    </div>
</div>"#,
        path = NEWS_PATH,
        id = esc(&item.id),
        title = esc(&item.title),
        date = fmt_datetime(item.date_uploaded),
        content = esc(&item.content),
    )
}

fn render_edit_form(item: &NewsItem) -> String {
    format!(
        r#"<div class="card edit-card">
    <div class="card-header">Edit News</div>
    <form method="post" action="{path}/{id}" enctype="multipart/form-data">
        <label for="title">Title</label>
        <input id="title" name="title" value="{title}" required>
        <label for="content">Content</label>
        <textarea id="content" name="content" rows="4" required>{content}</textarea>
        <label for="cover_image">Replace Cover Image (optional)</label>
        <input id="cover_image" name="cover_image" type="file" accept="image/*">
        <button type="submit" class="btn btn-primary">Save</button>
        <a class="btn btn-outline" href="{path}">Cancel</a>
    </form>
</div>"#,
        path = NEWS_PATH,
        id = esc(&item.id),
        title = esc(&item.title),
        content = esc(&item.content),
    )
}

async fn submit_news(
    state: &SharedState,
    token: &str,
    news_id: Option<&str>,
    multipart: Multipart,
) -> Result<(), SchoolError> {
    let mut form = read_form_data(multipart).await?;
    let title = form.require("title")?;
    let content = form.require("content")?;
    let cover_image = form.take_file("cover_image");

    match news_id {
        None => {
            let cover_image = cover_image
                .ok_or_else(|| SchoolError::Validation("Please select a cover image".to_string()))?;
            state.api.create_news(token, &title, &content, cover_image).await
        }
        Some(id) => {
            state
                .api
                .update_news(token, id, &title, &content, cover_image)
                .await
        }
    }
}

pub async fn create(
    State(state): State<SharedState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match submit_news(&state, &token, None, multipart).await {
        Ok(()) => flash::set_flash(jar, Flash::success("News created successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to create news"))),
    };
    Ok((jar, Redirect::to(NEWS_PATH)))
}

pub async fn update(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(news_id): Path<String>,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match submit_news(&state, &token, Some(&news_id), multipart).await {
        Ok(()) => flash::set_flash(jar, Flash::success("News updated successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to update news"))),
    };
    Ok((jar, Redirect::to(NEWS_PATH)))
}

pub async fn delete(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(news_id): Path<String>,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match state.api.delete_news(&token, &news_id).await {
        Ok(()) => flash::set_flash(jar, Flash::success("News deleted successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to delete news"))),
    };
    Ok((jar, Redirect::to(NEWS_PATH)))
}
