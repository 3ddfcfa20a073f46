// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use tracing::{info, warn};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub posted_at: Instant,
}

/// Single slot for short-lived status messages. A newer notice replaces the
/// current one immediately.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn post(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        let text = text.into();
        match kind {
            NoticeKind::Success => info!(notice = %text),
            NoticeKind::Error => warn!(notice = %text),
        }
        self.current = Some(Notice {
            text,
            kind,
            posted_at: now,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.post(text, NoticeKind::Success, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.post(text, NoticeKind::Error, Instant::now());
    }

    /// The notice still on screen at `now`, dropping it once expired.
    pub fn visible(&mut self, now: Instant) -> Option<&Notice> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.posted_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Latest notice regardless of age.
    pub fn latest(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<Notice> {
        self.current.take()
    }
}
