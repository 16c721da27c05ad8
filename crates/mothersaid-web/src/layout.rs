//! Shared page chrome: the public navbar/footer, the two portal sidebars,
//! and the outer HTML shell every handler renders into.

use axum::response::Html;
use chrono::{NaiveDate, NaiveDateTime};

use crate::flash::{self, Flash};

/// Public navigation, shared across all marketing pages.
pub const NAV_HTML: &str = include_str!("../templates/nav.html");
pub const FOOTER_HTML: &str = include_str!("../templates/footer.html");

/// Escape text interpolated into HTML.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// "Mar 05, 2024" — the format the portal shows dates in.
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

pub fn fmt_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%b %d, %Y").to_string()
}

/// Outer shell for the public marketing pages.
pub fn public_page(title: &str, flash: Option<&Flash>, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Mother's Aid</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{nav}
{flash}
<main class="site-main">
{content}
</main>
{footer}
</body>
</html>"#,
        title = esc(title),
        nav = NAV_HTML,
        flash = flash::render(flash),
        content = content,
        footer = FOOTER_HTML,
    ))
}

// ---------------------------------------------------------------------------
// Portal sidebars
// ---------------------------------------------------------------------------

pub const STUDENT_NAV: [(&str, &str); 3] = [
    ("Dashboard", "/portal/dashboard"),
    ("Academic Report", "/portal/dashboard/reports"),
    ("Reading Materials", "/portal/dashboard/materials"),
];

const ADMIN_NAV: [(&str, &str); 6] = [
    ("Dashboard", "/portal/admin/dashboard"),
    ("Students", "/portal/admin/dashboard/students"),
    ("Report Cards", "/portal/admin/dashboard/report-cards"),
    ("Reading Materials", "/portal/admin/dashboard/materials"),
    ("News & Updates", "/portal/admin/dashboard/news"),
    ("Admins", "/portal/admin/dashboard/admins"),
];

/// Sidebar entries an admin of the given role may see. Teachers are limited
/// to student records and report cards.
pub fn admin_nav_items(role: &str) -> Vec<(&'static str, &'static str)> {
    ADMIN_NAV
        .iter()
        .copied()
        .filter(|(name, _)| {
            if role == "teacher" {
                matches!(*name, "Students" | "Report Cards")
            } else {
                true
            }
        })
        .collect()
}

fn sidebar(items: &[(&str, &str)], active: &str, logout_href: &str) -> String {
    let links: String = items
        .iter()
        .map(|(name, href)| {
            let class = if *href == active {
                "sidebar-link active"
            } else {
                "sidebar-link"
            };
            format!(r#"<a class="{class}" href="{href}">{name}</a>"#)
        })
        .collect();
    format!(
        r#"<aside class="sidebar">
    <div class="sidebar-brand"><a href="/">Mother's Aid</a></div>
    <nav class="sidebar-nav">{links}</nav>
    <a class="sidebar-link logout" href="{logout_href}">Log out</a>
</aside>"#
    )
}

fn portal_shell(title: &str, sidebar_html: &str, flash: Option<&Flash>, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Mother's Aid Portal</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body class="portal">
<div class="portal-container">
{sidebar}
<main class="portal-content">
{flash}
{content}
</main>
</div>
</body>
</html>"#,
        title = esc(title),
        sidebar = sidebar_html,
        flash = flash::render(flash),
        content = content,
    ))
}

/// Shell for student portal pages. `active` is the sidebar href to
/// highlight.
pub fn student_page(
    title: &str,
    active: &str,
    flash: Option<&Flash>,
    content: &str,
) -> Html<String> {
    let sidebar = sidebar(&STUDENT_NAV, active, "/portal/logout");
    portal_shell(title, &sidebar, flash, content)
}

/// Shell for admin portal pages, with the sidebar filtered by role.
pub fn admin_page(
    title: &str,
    active: &str,
    role: &str,
    flash: Option<&Flash>,
    content: &str,
) -> Html<String> {
    let items = admin_nav_items(role);
    let sidebar = sidebar(&items, active, "/portal/admin/logout");
    portal_shell(title, &sidebar, flash, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            esc(r#"<script>alert("hi") & 'bye'</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;) &amp; &#39;bye&#39;&lt;/script&gt;"
        );
        assert_eq!(esc("Adaeze Obi"), "Adaeze Obi");
    }

    #[test]
    fn teacher_sidebar_is_restricted() {
        let items = admin_nav_items("teacher");
        let names: Vec<&str> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Students", "Report Cards"]);
    }

    #[test]
    fn admin_and_principal_see_everything() {
        for role in ["admin", "principal"] {
            assert_eq!(admin_nav_items(role).len(), 6, "role {role}");
        }
    }

    #[test]
    fn active_link_is_highlighted() {
        let html = sidebar(&STUDENT_NAV, "/portal/dashboard/reports", "/portal/logout");
        assert!(html.contains(r#"class="sidebar-link active" href="/portal/dashboard/reports""#));
        assert!(html.contains(r#"class="sidebar-link" href="/portal/dashboard""#));
    }

    #[test]
    fn dates_render_in_portal_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(fmt_date(date), "Mar 05, 2024");
    }
}
