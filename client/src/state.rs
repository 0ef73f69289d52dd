//! Cross-page application state. One value, explicitly handed to every
//! workflow that needs it; mutation goes through the methods below.

use chrono::Utc;
use uuid::Uuid;

use crate::api::CrmApi;
use crate::types::{Activity, NewNotification, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarKind {
    Success,
    Error,
}

/// The transient toast currently on screen, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Snackbar {
    pub message: String,
    pub kind: SnackbarKind,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub activities: Vec<Activity>,
    pub notifications: Vec<Notification>,
    pub snackbar: Option<Snackbar>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the shared activity list. A failed fetch leaves the list empty
    /// rather than failing the whole application.
    pub async fn bootstrap<A: CrmApi + ?Sized>(api: &A) -> Self {
        let activities = api.list_activities().await.unwrap_or_default();
        Self {
            activities,
            notifications: Vec::new(),
            snackbar: None,
        }
    }

    /// Newest first, as the interface renders them.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.insert(0, activity);
    }

    pub fn add_notification(&mut self, input: NewNotification) {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: input.title,
            message: input.message,
            date: Utc::now(),
            read: false,
        };
        self.notifications.insert(0, notification);
    }

    pub fn show_snackbar(&mut self, message: impl Into<String>, kind: SnackbarKind) {
        self.snackbar = Some(Snackbar {
            message: message.into(),
            kind,
        });
    }

    pub fn dismiss_snackbar(&mut self) {
        self.snackbar = None;
    }
}
