use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PublishError;
use crate::models::events::UserEvent;
use crate::publisher::EventPublisher;

/// In-memory EventPublisher that records every event it is asked to publish
#[derive(Default)]
pub struct MockPublisher {
    events: Mutex<Vec<UserEvent>>,
    fail: bool,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every publish attempt fails after being recorded
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Events published so far, including failed attempts
    pub fn events(&self) -> Vec<UserEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn was_called(&self) -> bool {
        !self.events.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn publish(&self, event: &UserEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            return Err(PublishError::Delivery("injected publish failure".into()));
        }
        Ok(())
    }
}
