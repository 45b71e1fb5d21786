//! Status line and toast queue shown to the user.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const STATUS_TTL: Duration = Duration::from_secs(5);
/// Failures stay on the status line longer than confirmations.
pub const FAILURE_STATUS_TTL: Duration = Duration::from_secs(10);
pub const TOAST_TTL: Duration = Duration::from_secs(4);
pub const TOAST_LIMIT: usize = 4;

/// Whether a notice confirms an action or reports a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Failure,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
    pub expires_at: Instant,
}

/// Latest status plus a short history of toasts.
#[derive(Debug, Default)]
pub struct Feedback {
    status: Option<Notice>,
    toasts: VecDeque<Notice>,
}

impl Feedback {
    /// Report a completed action (load, save, import).
    pub fn info(&mut self, text: impl Into<String>) {
        self.post(text.into(), Tone::Info, Instant::now());
    }

    /// Report a failed action; it is never retried, so the notice lingers.
    pub fn failure(&mut self, text: impl Into<String>) {
        self.post(text.into(), Tone::Failure, Instant::now());
    }

    fn post(&mut self, text: String, tone: Tone, now: Instant) {
        let status_ttl = match tone {
            Tone::Info => STATUS_TTL,
            Tone::Failure => FAILURE_STATUS_TTL,
        };
        match self.toasts.back_mut() {
            // Same notice again: keep one toast and restart its clock.
            Some(last) if last.text == text && last.tone == tone => {
                last.expires_at = now + TOAST_TTL;
            }
            _ => {
                self.toasts.push_back(Notice {
                    text: text.clone(),
                    tone,
                    expires_at: now + TOAST_TTL,
                });
                let overflow = self.toasts.len().saturating_sub(TOAST_LIMIT);
                self.toasts.drain(..overflow);
            }
        }
        self.status = Some(Notice {
            text,
            tone,
            expires_at: now + status_ttl,
        });
    }

    /// Drops status and toasts whose deadline passed.
    pub fn expire(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
        }
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn toasts(&self) -> &VecDeque<Notice> {
        &self.toasts
    }
}
