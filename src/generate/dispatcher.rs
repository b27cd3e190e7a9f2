//! Background generation dispatch.
//!
//! Each request runs on its own thread against a shared [`Generator`]; results
//! come back over a channel and are collected by polling, so the caller's
//! thread never blocks on the network.

use super::client::{GenerationError, Generator};
use log::{debug, info, warn};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One rewrite request, issued for a single variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub variant_id: String,
    pub request_id: u64,
    pub base_content: String,
    pub prompt: String,
}

/// The outcome of a [`GenerationRequest`], tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub variant_id: String,
    pub request_id: u64,
    pub result: Result<String, GenerationError>,
}

/// Runs generation requests concurrently and hands back their responses.
pub struct GenerationDispatcher {
    generator: Arc<dyn Generator>,
    sender: Sender<GenerationResponse>,
    receiver: Receiver<GenerationResponse>,
    in_flight: usize,
}

impl GenerationDispatcher {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        let (sender, receiver) = channel();
        Self {
            generator,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Start `request` on a background thread.
    pub fn dispatch(&mut self, request: GenerationRequest) {
        let generator = Arc::clone(&self.generator);
        let sender = self.sender.clone();
        info!(
            "Dispatching generation {} for variant {}",
            request.request_id, request.variant_id
        );

        self.in_flight += 1;
        thread::spawn(move || {
            let result = generator.generate(&request.base_content, &request.prompt);
            if let Err(e) = &result {
                warn!("Generation for variant {} failed: {}", request.variant_id, e);
            }
            let response = GenerationResponse {
                variant_id: request.variant_id,
                request_id: request.request_id,
                result,
            };
            // The dispatcher may have been dropped; nobody is waiting then.
            let _ = sender.send(response);
        });
    }

    /// Collect every response that has arrived since the last poll.
    ///
    /// This is non-blocking.
    pub fn poll_responses(&mut self) -> Vec<GenerationResponse> {
        let mut responses = Vec::new();
        while let Ok(response) = self.receiver.try_recv() {
            responses.push(response);
        }
        self.in_flight = self.in_flight.saturating_sub(responses.len());
        responses
    }

    /// Block up to `timeout` for the next response.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<GenerationResponse> {
        match self.receiver.recv_timeout(timeout) {
            Ok(response) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                debug!("Received generation {}", response.request_id);
                Some(response)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Number of requests dispatched whose responses have not been collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
