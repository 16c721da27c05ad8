//! mothersaid-api — Typed client for the school REST API.
//!
//! One module per API resource:
//!   - auth: signup and the two login flows
//!   - students: profile, academic records, reading materials
//!   - admins: student management, admin verification, dashboard summary
//!   - news: public listing plus the admin CRUD
//!   - materials: reading material upload
//!   - report_cards: listing, creation, PDF download
//!
//! Everything goes through [`client::ApiClient`], which owns the base URL
//! and turns non-2xx responses into `SchoolError::Api` with the server's
//! `detail` message when the body carries one.

pub mod admins;
pub mod auth;
pub mod client;
pub mod materials;
pub mod news;
pub mod report_cards;
pub mod students;

pub use client::{ApiClient, Download, UploadFile};
