//! Login, signup and logout for both portals.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use mothersaid_common::entities::NewStudent;
use mothersaid_common::ClassLevel;

use crate::flash::{self, Flash};
use crate::layout;
use crate::session;
use crate::state::SharedState;

/// Nigerian states for the signup dropdown: (form value, label).
const STATES: [(&str, &str); 37] = [
    ("abia", "Abia"),
    ("adamawa", "Adamawa"),
    ("akwa_ibom", "Akwa Ibom"),
    ("anambra", "Anambra"),
    ("bauchi", "Bauchi"),
    ("bayelsa", "Bayelsa"),
    ("benue", "Benue"),
    ("borno", "Borno"),
    ("cross_river", "Cross River"),
    ("delta", "Delta"),
    ("ebonyi", "Ebonyi"),
    ("edo", "Edo"),
    ("ekiti", "Ekiti"),
    ("enugu", "Enugu"),
    ("gombe", "Gombe"),
    ("imo", "Imo"),
    ("jigawa", "Jigawa"),
    ("kaduna", "Kaduna"),
    ("kano", "Kano"),
    ("katsina", "Katsina"),
    ("kebbi", "Kebbi"),
    ("kogi", "Kogi"),
    ("kwara", "Kwara"),
    ("lagos", "Lagos"),
    ("nasarawa", "Nasarawa"),
    ("niger", "Niger"),
    ("ogun", "Ogun"),
    ("ondo", "Ondo"),
    ("osun", "Osun"),
    ("oyo", "Oyo"),
    ("plateau", "Plateau"),
    ("rivers", "Rivers"),
    ("sokoto", "Sokoto"),
    ("taraba", "Taraba"),
    ("yobe", "Yobe"),
    ("zamfara", "Zamfara"),
    ("fct", "F.C.T"),
];

// ---------------------------------------------------------------------------
// Student login
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct StudentLoginForm {
    pub admission_number: String,
    pub password: String,
}

pub async fn student_login_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<div class="auth-card">
    <h1>Student Portal Login</h1>
    <p class="muted">Access your academic information, report cards, and more.</p>
    <form method="post" action="/portal/login">
        <label for="admission_number">Admission Number</label>
        <input id="admission_number" name="admission_number" placeholder="MAS-2024-0001" required>
        <label for="password">Password</label>
        <input id="password" name="password" type="password" placeholder="Enter your password" required>
        <button type="submit" class="btn btn-primary">Sign In</button>
    </form>
    <p class="muted small">New student? <a href="/portal/signup">Create your account</a>.
    Need help? Contact <a href="mailto:support@mothersaidschools.edu">support@mothersaidschools.edu</a></p>
</div>"#;
    (jar, layout::public_page("Portal Login", flash.as_ref(), content))
}

pub async fn student_login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<StudentLoginForm>,
) -> (CookieJar, Redirect) {
    match state
        .api
        .login_student(&form.admission_number, &form.password)
        .await
    {
        Ok(token) => {
            info!(admission_number = %form.admission_number, "student logged in");
            let jar = session::open_student_session(jar, token.access_token);
            let jar = flash::set_flash(jar, Flash::success("Welcome back to Mother's Aid Portal"));
            (jar, Redirect::to("/portal/dashboard"))
        }
        Err(err) => {
            let jar = flash::set_flash(
                jar,
                Flash::error(err.user_message("Invalid admission number or password")),
            );
            (jar, Redirect::to(session::STUDENT_LOGIN))
        }
    }
}

pub async fn student_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = session::close_student_session(jar);
    (jar, Redirect::to(session::STUDENT_LOGIN))
}

// ---------------------------------------------------------------------------
// Student signup
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct SignupForm {
    pub full_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub current_class: String,
    pub state_of_origin: String,
    pub local_government: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    pub password: String,
    pub confirm_password: String,
}

pub async fn signup_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);

    let class_options: String = ClassLevel::ALL
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.as_str(), c.label()))
        .collect();
    let state_options: String = STATES
        .iter()
        .map(|(value, label)| format!(r#"<option value="{value}">{label}</option>"#))
        .collect();

    let content = format!(
        r#"<div class="auth-card wide">
    <h1>Student Registration</h1>
    <p class="muted">Create your student account to access the portal</p>
    <form method="post" action="/portal/signup">
        <div class="form-grid">
            <div>
                <label for="full_name">Full Name</label>
                <input id="full_name" name="full_name" placeholder="John Doe" required>
            </div>
            <div>
                <label for="gender">Gender</label>
                <select id="gender" name="gender" required>
                    <option value="" disabled selected>Select gender</option>
                    <option value="male">Male</option>
                    <option value="female">Female</option>
                </select>
            </div>
            <div>
                <label for="date_of_birth">Date of Birth</label>
                <input id="date_of_birth" name="date_of_birth" type="date" required>
            </div>
            <div>
                <label for="current_class">Class</label>
                <select id="current_class" name="current_class" required>
                    <option value="" disabled selected>Select class</option>
                    {class_options}
                </select>
            </div>
            <div>
                <label for="state_of_origin">State of Origin</label>
                <select id="state_of_origin" name="state_of_origin" required>
                    <option value="" disabled selected>Select state</option>
                    {state_options}
                </select>
            </div>
            <div>
                <label for="local_government">Local Government</label>
                <input id="local_government" name="local_government" placeholder="Enter Local Government" required>
            </div>
        </div>
        <h3>Guardian Information</h3>
        <div class="form-grid">
            <div>
                <label for="guardian_name">Guardian Name</label>
                <input id="guardian_name" name="guardian_name" placeholder="Guardian's full name" required>
            </div>
            <div>
                <label for="guardian_phone">Guardian Phone</label>
                <input id="guardian_phone" name="guardian_phone" placeholder="Guardian's phone number" required>
            </div>
            <div class="span-2">
                <label for="guardian_email">Guardian Email</label>
                <input id="guardian_email" name="guardian_email" type="email" placeholder="guardian@example.com" required>
            </div>
        </div>
        <h3>Password</h3>
        <div class="form-grid">
            <div>
                <label for="password">Password</label>
                <input id="password" name="password" type="password" placeholder="Create a password" required>
            </div>
            <div>
                <label for="confirm_password">Confirm Password</label>
                <input id="confirm_password" name="confirm_password" type="password" placeholder="Confirm your password" required>
            </div>
        </div>
        <button type="submit" class="btn btn-primary">Create Account</button>
    </form>
</div>"#
    );
    (
        jar,
        layout::public_page("Student Registration", flash.as_ref(), &content),
    )
}

/// Build the API payload, or the validation message that stops the request
/// from ever being made.
fn signup_payload(form: SignupForm) -> Result<NewStudent, String> {
    if form.password != form.confirm_password {
        return Err("Passwords do not match. Please try again.".to_string());
    }
    Ok(NewStudent {
        full_name: form.full_name,
        gender: form.gender,
        date_of_birth: form.date_of_birth,
        current_class: form.current_class,
        guardian_name: form.guardian_name,
        guardian_phone: form.guardian_phone,
        guardian_email: form.guardian_email,
        password: form.password,
        state_of_origin: form.state_of_origin,
        local_government: form.local_government,
    })
}

pub async fn signup(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> (CookieJar, Redirect) {
    let payload = match signup_payload(form) {
        Ok(payload) => payload,
        Err(message) => {
            let jar = flash::set_flash(jar, Flash::error(message));
            return (jar, Redirect::to("/portal/signup"));
        }
    };
    match state.api.signup(&payload).await {
        Ok(receipt) => {
            info!(admission_number = %receipt.admission_number, "student registered");
            let jar = flash::set_flash(
                jar,
                Flash::success(format!(
                    "Registration successful. Your admission number is {}. Please save it for login; it has also been sent to your email address.",
                    receipt.admission_number
                )),
            );
            (jar, Redirect::to(session::STUDENT_LOGIN))
        }
        Err(err) => {
            let jar = flash::set_flash(jar, Flash::error(err.user_message("Registration failed")));
            (jar, Redirect::to("/portal/signup"))
        }
    }
}

// ---------------------------------------------------------------------------
// Admin login
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
}

pub async fn admin_login_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<div class="auth-card">
    <h1>Staff Portal Login</h1>
    <p class="muted">For administrators, teachers and the principal.</p>
    <form method="post" action="/portal/admin/login">
        <label for="username">Username</label>
        <input id="username" name="username" required>
        <label for="password">Password</label>
        <input id="password" name="password" type="password" required>
        <button type="submit" class="btn btn-primary">Sign In</button>
    </form>
</div>"#;
    (jar, layout::public_page("Staff Login", flash.as_ref(), content))
}

pub async fn admin_login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<AdminLoginForm>,
) -> (CookieJar, Redirect) {
    match state.api.login_admin(&form.username, &form.password).await {
        Ok(token) => {
            info!(username = %form.username, role = %token.role, "admin logged in");
            let jar = session::open_admin_session(jar, token.access_token, token.role);
            (jar, Redirect::to("/portal/admin/dashboard"))
        }
        Err(err) => {
            let jar = flash::set_flash(
                jar,
                Flash::error(err.user_message("Invalid username or password")),
            );
            (jar, Redirect::to(session::ADMIN_LOGIN))
        }
    }
}

pub async fn admin_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = session::close_admin_session(jar);
    (jar, Redirect::to(session::ADMIN_LOGIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            full_name: "Adaeze Obi".to_string(),
            gender: "female".to_string(),
            date_of_birth: "2011-04-02".to_string(),
            current_class: "JSS1".to_string(),
            state_of_origin: "lagos".to_string(),
            local_government: "Ikeja".to_string(),
            guardian_name: "N. Obi".to_string(),
            guardian_phone: "+2348012345678".to_string(),
            guardian_email: "n.obi@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn mismatched_passwords_never_build_a_payload() {
        let err = signup_payload(form("secret-1", "secret-2")).unwrap_err();
        assert_eq!(err, "Passwords do not match. Please try again.");
    }

    #[test]
    fn matching_passwords_build_the_api_payload() {
        let payload = signup_payload(form("secret-1", "secret-1")).unwrap();
        assert_eq!(payload.current_class, "JSS1");
        assert_eq!(payload.password, "secret-1");
    }

    #[test]
    fn state_dropdown_covers_all_states_and_fct() {
        assert_eq!(STATES.len(), 37);
        assert!(STATES.iter().any(|(v, _)| *v == "fct"));
    }
}
