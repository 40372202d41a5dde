// ABOUTME: Tracing layer that captures telemetry events emitted during a test
// ABOUTME: Records the event name and level of every event carrying an `event` field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry;

/// A captured telemetry event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub name: String,
    pub level: Level,
}

/// Shared handle to captured events
#[derive(Clone, Default)]
pub struct TelemetryCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TelemetryCapture {
    /// Install a capturing subscriber for the current thread
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = registry().with(CaptureLayer {
            events: Arc::clone(&capture.events),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.events().iter().any(|e| e.name == name)
    }

    pub fn level_of(&self, name: &str) -> Option<Level> {
        self.events()
            .into_iter()
            .find(|e| e.name == name)
            .map(|e| e.level)
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventNameVisitor(None);
        event.record(&mut visitor);
        if let Some(name) = visitor.0 {
            self.events.lock().unwrap().push(CapturedEvent {
                name,
                level: *event.metadata().level(),
            });
        }
    }
}

struct EventNameVisitor(Option<String>);

impl Visit for EventNameVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "event" && self.0.is_none() {
            self.0 = Some(format!("{value:?}").trim_matches('"').to_owned());
        }
    }
}
