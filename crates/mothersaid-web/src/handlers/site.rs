//! Public marketing pages. All static content, rendered into the shared
//! shell; the contact form is the only POST.

use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::flash::{self, Flash};
use crate::layout;

pub async fn home(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="hero">
    <h1>Nurturing Excellence, Building Character</h1>
    <p>Mother's Aid Schools is a caring and collaborative learning community
    preparing every student for higher education and their career pathway.</p>
    <div class="hero-actions">
        <a class="btn btn-primary" href="/admissions">Apply for Admission</a>
        <a class="btn btn-outline" href="/portal/login">Student Portal</a>
    </div>
</section>
<section class="feature-grid">
    <div class="feature">
        <h3>Academic Excellence</h3>
        <p>A rigorous curriculum from JSS 1 through SSS 3, taught by dedicated
        teachers who foster critical thinking.</p>
    </div>
    <div class="feature">
        <h3>Whole-Child Development</h3>
        <p>Arts, sports and clubs beyond the classroom build confidence,
        empathy and self-discipline.</p>
    </div>
    <div class="feature">
        <h3>Modern Facilities</h3>
        <p>Science laboratories, a well-stocked library and a performing arts
        center support every learner.</p>
    </div>
    <div class="feature">
        <h3>Parent Partnership</h3>
        <p>Guardians follow their child's progress through report cards and
        the student portal.</p>
    </div>
</section>
<section class="cta-band">
    <h2>Ready to join the Mother's Aid family?</h2>
    <a class="btn btn-primary" href="/portal/signup">Register a Student</a>
</section>"#;
    (jar, layout::public_page("Home", flash.as_ref(), content))
}

pub async fn history(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let milestones: &[(&str, &str, &str)] = &[
        ("1995", "Foundation", "Mother's Aid was founded with a vision to provide innovative education that nurtures the whole child."),
        ("2000", "Campus Expansion", "Expanded our campus to include new science laboratories and a state-of-the-art library."),
        ("2005", "STEM Program Launch", "Introduced comprehensive STEM programs and established partnerships with leading technology companies."),
        ("2010", "Arts Center Opening", "Opened our performing arts center, enhancing our commitment to arts education."),
        ("2015", "International Program", "Launched our international exchange program, connecting students with schools worldwide."),
        ("2020", "Digital Innovation", "Implemented comprehensive digital learning platforms and innovative teaching methodologies."),
        ("2025", "Future Vision", "Continuing our commitment to excellence with planned expansions and innovative programs."),
    ];
    let timeline: String = milestones
        .iter()
        .map(|(year, title, description)| {
            format!(
                r#"<div class="milestone">
    <span class="milestone-year">{year}</span>
    <h3>{title}</h3>
    <p>{description}</p>
</div>"#
            )
        })
        .collect();
    let content = format!(
        r#"<section class="page-hero"><h1>Our History</h1>
<p>Three decades of growth in service of our students.</p></section>
<section class="timeline">{timeline}</section>"#
    );
    (jar, layout::public_page("Our History", flash.as_ref(), &content))
}

pub async fn mission(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="page-hero"><h1>Mission &amp; Vision</h1></section>
<section class="grid-2">
    <div class="card">
        <h2>Our Mission</h2>
        <p>Mother's Aid Schools, a caring and collaborative learning community,
        ensures that each student achieves intellectual and personal excellence
        and is well prepared for higher education and career pathway.</p>
        <ul>
            <li>Foster academic excellence and critical thinking</li>
            <li>Nurture creativity and personal growth</li>
            <li>Build strong character and leadership skills</li>
        </ul>
    </div>
    <div class="card">
        <h2>Our Vision</h2>
        <p>To be the school of choice for families seeking an education that
        pairs academic rigour with care for the whole child.</p>
    </div>
</section>
<section class="value-grid">
    <div class="card"><h3>Empathy</h3><p>We care for one another and our community.</p></div>
    <div class="card"><h3>Confidence</h3><p>Every student finds their voice here.</p></div>
    <div class="card"><h3>Self-Discipline</h3><p>Good habits carry our students through life.</p></div>
    <div class="card"><h3>Reliability</h3><p>We do what we say we will do.</p></div>
</section>"#;
    (jar, layout::public_page("Mission & Vision", flash.as_ref(), content))
}

pub async fn staff(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let leadership: &[(&str, &str)] = &[
        ("Dr. Sarah Mitchell", "Principal"),
        ("Prof. James Anderson", "Academic Director"),
        ("Ms. Emily Chen", "Head of Student Affairs"),
    ];
    let directory: &[(&str, &[(&str, &str)])] = &[
        (
            "Administration",
            &[
                ("Amanda Johnson", "Administrative Assistant"),
                ("Robert Davis", "Office Manager"),
            ],
        ),
        (
            "Student Services",
            &[
                ("Dr. Patricia Lee", "School Counselor"),
                ("Mark Wilson", "Career Advisor"),
            ],
        ),
        (
            "Health Services",
            &[
                ("Nurse Sarah Smith", "School Nurse"),
                ("Dr. Michael Brown", "School Physician"),
            ],
        ),
        (
            "Facilities",
            &[
                ("Tom Martinez", "Facilities Manager"),
                ("James Wright", "Maintenance Supervisor"),
            ],
        ),
    ];
    let leaders: String = leadership
        .iter()
        .map(|(name, role)| {
            format!(r#"<div class="card staff-card"><h3>{name}</h3><p class="muted">{role}</p></div>"#)
        })
        .collect();
    let sections: String = directory
        .iter()
        .map(|(department, members)| {
            let rows: String = members
                .iter()
                .map(|(name, role)| format!("<li><strong>{name}</strong> — {role}</li>"))
                .collect();
            format!(r#"<div class="card"><h3>{department}</h3><ul>{rows}</ul></div>"#)
        })
        .collect();
    let content = format!(
        r#"<section class="page-hero"><h1>Staff &amp; Faculty</h1></section>
<section class="staff-grid">{leaders}</section>
<section class="grid-2">{sections}</section>"#
    );
    (jar, layout::public_page("Staff & Faculty", flash.as_ref(), &content))
}

pub async fn academics(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="page-hero"><h1>Academics</h1>
<p>Our curriculum from junior to senior secondary school.</p></section>
<section class="grid-2">
    <div class="card">
        <h2>Curriculum Overview</h2>
        <p>Students progress from JSS 1 to SSS 3 through a curriculum that
        balances the sciences, humanities and the arts. Continuous assessment
        and termly examinations feed each student's report card.</p>
    </div>
    <div class="card">
        <h2>Subjects &amp; Programs</h2>
        <ul>
            <li>Mathematics, English and the core sciences</li>
            <li>Humanities and social studies</li>
            <li>Creative arts and music</li>
            <li>Information and communication technology</li>
        </ul>
    </div>
    <div class="card">
        <h2>Teaching Methodology</h2>
        <p>Small classes, project work and regular feedback keep every
        student engaged and seen.</p>
    </div>
    <div class="card">
        <h2>Assessment</h2>
        <p>Each term combines continuous assessment with examinations;
        guardians receive a detailed report card at term's end.</p>
    </div>
</section>"#;
    (jar, layout::public_page("Academics", flash.as_ref(), content))
}

pub async fn beyond_classroom(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="page-hero"><h1>Beyond the Classroom</h1></section>
<section class="feature-grid">
    <div class="feature"><h3>Sports</h3><p>Football, athletics and table tennis teams compete across the state.</p></div>
    <div class="feature"><h3>Clubs &amp; Societies</h3><p>Debate, press, science and drama clubs meet weekly.</p></div>
    <div class="feature"><h3>Excursions</h3><p>Termly field trips connect classroom learning to the wider world.</p></div>
    <div class="feature"><h3>Community Service</h3><p>Students give back through outreach programmes in the local community.</p></div>
</section>"#;
    (
        jar,
        layout::public_page("Beyond the Classroom", flash.as_ref(), content),
    )
}

pub async fn admissions(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="page-hero"><h1>Admissions</h1>
<p>Join the Mother's Aid family.</p></section>
<section class="grid-2">
    <div class="card">
        <h2>The Process</h2>
        <ol>
            <li>Submit Application</li>
            <li>Provide Documents</li>
            <li>Entrance Assessment</li>
            <li>Family Interview</li>
            <li>Admission Decision</li>
        </ol>
    </div>
    <div class="card">
        <h2>Required Documents</h2>
        <ul>
            <li>Birth certificate</li>
            <li>Previous school records</li>
            <li>Passport photographs</li>
            <li>Guardian contact details</li>
        </ul>
    </div>
    <div class="card">
        <h2>Key Dates</h2>
        <p>Applications open at the start of each session. Entrance
        assessments hold before each term begins.</p>
    </div>
    <div class="card">
        <h2>Start Online</h2>
        <p>New students can begin by registering on the student portal; your
        admission number is issued on completion.</p>
        <a class="btn btn-primary" href="/portal/signup">Register Now</a>
    </div>
</section>"#;
    (jar, layout::public_page("Admissions", flash.as_ref(), content))
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

pub async fn contact_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take_flash(jar);
    let content = r#"<section class="page-hero"><h1>Contact Us</h1></section>
<section class="grid-2">
    <div class="card">
        <h2>Find Us</h2>
        <p>support@mothersaidschools.edu</p>
        <p>Office hours: Monday to Friday, 8:00am&ndash;4:00pm</p>
    </div>
    <div class="card">
        <h2>Send Us a Message</h2>
        <form method="post" action="/contact">
            <div class="form-grid">
                <div>
                    <label for="first_name">First Name</label>
                    <input id="first_name" name="first_name" required placeholder="Enter your first name">
                </div>
                <div>
                    <label for="last_name">Last Name</label>
                    <input id="last_name" name="last_name" required placeholder="Enter your last name">
                </div>
            </div>
            <label for="email">Email</label>
            <input id="email" name="email" type="email" required>
            <label for="message">Message</label>
            <textarea id="message" name="message" rows="5" required></textarea>
            <button type="submit" class="btn btn-primary">Send Message</button>
        </form>
    </div>
</section>"#;
    (jar, layout::public_page("Contact Us", flash.as_ref(), content))
}

pub async fn contact_submit(jar: CookieJar, Form(form): Form<ContactForm>) -> (CookieJar, Redirect) {
    info!(
        from = %form.email,
        name = %format!("{} {}", form.first_name, form.last_name),
        "contact form message received"
    );
    let jar = flash::set_flash(
        jar,
        Flash::success("Thank you for your message. We'll get back to you soon!"),
    );
    (jar, Redirect::to("/contact"))
}
