//! Admin account management: listing and verifying pending accounts.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mothersaid_common::entities::Admin;

use crate::flash::{self, Flash};
use crate::layout::{self, esc};
use crate::session;
use crate::state::SharedState;

const ADMINS_PATH: &str = "/portal/admin/dashboard/admins";

pub async fn page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let (token, role) = session::require_admin(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let admins = match state.api.list_admins(&token).await {
        Ok(admins) => admins,
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(err.user_message("Failed to load admins")));
            vec![]
        }
    };

    let content = render_page(&admins);
    Ok((
        jar,
        layout::admin_page("Admins", ADMINS_PATH, &role, flash.as_ref(), &content),
    ))
}

fn render_page(admins: &[Admin]) -> String {
    let cards = if admins.is_empty() {
        r#"<div class="empty-state">No admin found</div>"#.to_string()
    } else {
        let cards: String = admins.iter().map(render_admin_card).collect();
        format!(r#"<div class="card-grid">{cards}</div>"#)
    };
    format!(
        r#"<div class="page-header">
    <h1>Admins</h1>
    <p class="muted">Manage and view all admin</p>
</div>
{cards}"#
    )
}

fn render_admin_card(admin: &Admin) -> String {
    let status = if admin.is_active {
        r#"<span class="badge badge-success">Active</span>"#
    } else {
        r#"<span class="badge badge-danger">Inactive</span>"#
    };
    // Only inactive accounts get the verify action
    let verify = if admin.is_active {
        String::new()
    } else {
        format!(
            r#"<form method="post" action="{path}/verify">
    <input type="hidden" name="username" value="{username}">
    <button type="submit" class="btn btn-outline">Verify Admin</button>
</form>"#,
            path = ADMINS_PATH,
            username = esc(&admin.username),
        )
    };
    let delete = format!(
        r#"<form method="post" action="{path}/delete"
      onsubmit="return confirm('Are you sure you want to remove this admin?')">
    <input type="hidden" name="username" value="{username}">
    <button type="submit" class="btn btn-danger btn-sm">Remove</button>
</form>"#,
        path = ADMINS_PATH,
        username = esc(&admin.username),
    );
    format!(
        r#"<div class="card admin-card">
    <div class="card-header"><span>{name}</span>{status}</div>
    <p class="muted">{username}</p>
    <p><span class="label">Role:</span> {role}</p>
    <p><span class="label">Email:</span> {email}</p>
    <div class="card-actions">
        {verify}
        {delete}
    </div>
</div>"#,
        name = esc(&admin.full_name),
        status = status,
        username = esc(&admin.username),
        role = esc(&admin.role),
        email = esc(&admin.email),
        verify = verify,
        delete = delete,
    )
}

#[derive(Deserialize)]
pub struct VerifyForm {
    pub username: String,
}

pub async fn verify(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<VerifyForm>,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match state.api.verify_admin(&token, &form.username).await {
        Ok(()) => flash::set_flash(jar, Flash::success("Admin updated successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to update admin"))),
    };
    Ok((jar, Redirect::to(ADMINS_PATH)))
}

pub async fn delete(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<VerifyForm>,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;
    let jar = match state.api.delete_admin(&token, &form.username).await {
        Ok(()) => flash::set_flash(jar, Flash::success("Admin removed successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to remove admin"))),
    };
    Ok((jar, Redirect::to(ADMINS_PATH)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(active: bool) -> Admin {
        Admin {
            full_name: "Grace Udo".to_string(),
            username: "g.udo".to_string(),
            email: "g.udo@mothersaidschools.edu".to_string(),
            role: "teacher".to_string(),
            is_active: active,
        }
    }

    #[test]
    fn verify_button_only_for_inactive_accounts() {
        assert!(!render_admin_card(&admin(true)).contains("Verify Admin"));
        assert!(render_admin_card(&admin(false)).contains("Verify Admin"));
    }

    #[test]
    fn remove_action_on_every_card() {
        for active in [true, false] {
            assert!(render_admin_card(&admin(active)).contains("Remove"));
        }
    }
}
