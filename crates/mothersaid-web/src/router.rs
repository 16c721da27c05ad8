//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    admin, admin_admins, admin_materials, admin_news, admin_reports, admin_students, auth, news,
    site, student,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Public site
        .route("/", get(site::home))
        .route("/about/history", get(site::history))
        .route("/about/mission", get(site::mission))
        .route("/about/staff", get(site::staff))
        .route("/academics", get(site::academics))
        .route("/beyond-classroom", get(site::beyond_classroom))
        .route("/admissions", get(site::admissions))
        .route("/contact", get(site::contact_page).post(site::contact_submit))
        .route("/news", get(news::news_page))
        .route("/news/{id}/image", get(news::news_image))

        // Student portal
        .route("/portal/login", get(auth::student_login_page).post(auth::student_login))
        .route("/portal/signup", get(auth::signup_page).post(auth::signup))
        .route("/portal/logout", get(auth::student_logout))
        .route("/portal/dashboard", get(student::dashboard))
        .route("/portal/dashboard/reports", get(student::reports))
        .route("/portal/dashboard/reports/{id}/download", get(student::download_report))
        .route("/portal/dashboard/materials", get(student::materials))
        .route("/portal/dashboard/materials/{id}/download", get(student::download_material))

        // Admin portal
        .route("/portal/admin/login", get(auth::admin_login_page).post(auth::admin_login))
        .route("/portal/admin/logout", get(auth::admin_logout))
        .route("/portal/admin/dashboard", get(admin::dashboard))
        .route("/portal/admin/dashboard/students", get(admin_students::page))
        .route("/portal/admin/dashboard/students/{admission_number}", post(admin_students::update))
        .route("/portal/admin/dashboard/admins", get(admin_admins::page))
        .route("/portal/admin/dashboard/admins/verify", post(admin_admins::verify))
        .route("/portal/admin/dashboard/admins/delete", post(admin_admins::delete))
        .route("/portal/admin/dashboard/news", get(admin_news::page).post(admin_news::create))
        .route("/portal/admin/dashboard/news/{id}", post(admin_news::update))
        .route("/portal/admin/dashboard/news/{id}/delete", post(admin_news::delete))
        .route(
            "/portal/admin/dashboard/materials",
            get(admin_materials::page).post(admin_materials::upload),
        )
        .route(
            "/portal/admin/dashboard/report-cards",
            get(admin_reports::page).post(admin_reports::create),
        )
        .route(
            "/portal/admin/dashboard/report-cards/{id}/download",
            get(admin_reports::download),
        )

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Middleware. The body limit leaves headroom over the 10 MiB
        // material ceiling so the size check can answer with a flash
        // instead of a bare 413.
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
