//! Application tier of the CRM: a typed client for the HTTP API, the shared
//! in-memory state (activities, notifications, snackbar) and the workflows
//! the interface drives — the pipeline stage transition with its onboarding
//! fan-out, and transaction booking with its operational reminder.

pub mod api;
pub mod auth;
pub mod booking;
pub mod pipeline;
pub mod state;
pub mod types;

pub use api::{ApiClientError, CrmApi, HttpApi};
pub use state::{AppState, Snackbar, SnackbarKind};
