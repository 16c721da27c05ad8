//! mothersaid-web — Server-rendered site and portals for Mother's Aid
//! Schools:
//!   - Public marketing pages (history, mission, staff, academics,
//!     admissions, news, contact)
//!   - Student portal (profile, academic reports, reading materials)
//!   - Admin portal (students, admins, report cards, materials, news)
//!
//! All data comes from the school REST API through `mothersaid-api`;
//! this crate holds no state of its own beyond the cookies carrying the
//! bearer tokens.

pub mod config;
pub mod flash;
pub mod handlers;
pub mod layout;
pub mod router;
pub mod session;
pub mod state;
