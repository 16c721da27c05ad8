//! Public news page. The list comes straight from the API; cover images are
//! proxied so the browser never talks to the API host directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use mothersaid_common::entities::NewsItem;

use crate::flash::{self, Flash};
use crate::handlers::inline_blob;
use crate::layout::{self, esc, fmt_datetime};
use crate::state::SharedState;

pub async fn news_page(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, mut flash) = flash::take_flash(jar);
    let items = match state.api.list_news().await {
        Ok(items) => items,
        Err(err) => {
            flash = Some(Flash::error(err.user_message("Failed to load news items")));
            vec![]
        }
    };
    let content = render_news(&items);
    (jar, layout::public_page("News & Events", flash.as_ref(), &content))
}

fn render_news(items: &[NewsItem]) -> String {
    let grid = if items.is_empty() {
        r#"<div class="empty-state">No news has been published yet. Check back soon.</div>"#
            .to_string()
    } else {
        let cards: String = items
            .iter()
            .map(|item| {
                format!(
                    r#"<article class="card news-card">
    <img src="/news/{id}/image" alt="{title}">
    <div class="news-body">
        <h3>{title}</h3>
        <p class="muted">{date}</p>
        <p>{content}</p>
    </div>
</article>"#,
                    id = esc(&item.id),
                    title = esc(&item.title),
                    date = fmt_datetime(item.date_uploaded),
                    content = esc(&item.content),
                )
            })
            .collect();
        format!(r#"<div class="news-grid">{cards}</div>"#)
    };
    format!(
        r#"<section class="page-hero"><h1>News &amp; Events</h1></section>
<section><h2>Latest News</h2>{grid}</section>"#
    )
}

pub async fn news_image(State(state): State<SharedState>, Path(news_id): Path<String>) -> Response {
    match state.api.news_image(&news_id).await {
        Ok(download) => inline_blob(download),
        Err(err) => {
            tracing::warn!(%news_id, error = %err, "news image unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
