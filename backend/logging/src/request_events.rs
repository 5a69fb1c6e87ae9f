//! Request Event Logger
//!
//! One structured record per notable request outcome (analysis, answer, failure).

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RequestEvent {
    Analyzed {
        image: String,
        backend: String,
        labels: usize,
        objects: usize,
        fallback: bool,
    },
    Answered {
        query: String,
        completion_chars: usize,
    },
    Failed {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct RequestLogEntry {
    pub route: String,
    pub timestamp: DateTime<Utc>,
    pub event: RequestEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit a request event on the `request_events` target.
    pub fn log_event(route: &str, event: RequestEvent) -> RequestLogEntry {
        let event = match event {
            RequestEvent::Analyzed { image, backend, labels, objects, fallback } => {
                RequestEvent::Analyzed {
                    image: redact_sensitive_data(&image),
                    backend,
                    labels,
                    objects,
                    fallback,
                }
            }
            RequestEvent::Answered { query, completion_chars } => RequestEvent::Answered {
                query: redact_sensitive_data(&query),
                completion_chars,
            },
            RequestEvent::Failed { error_msg } => RequestEvent::Failed {
                error_msg: redact_sensitive_data(&error_msg),
            },
        };

        let entry = RequestLogEntry {
            route: route.into(),
            timestamp: Utc::now(),
            event,
        };

        info!(target: "request_events", event = ?entry, "Request event");
        entry
    }
}
