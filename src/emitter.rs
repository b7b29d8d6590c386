// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Event Emitter
 * Ordered single-writer delivery of progress, result and completion events
 *
 * Features:
 * - One sender owned by the scheduler task, so events keep emission order
 * - Completion is emitted by consuming the emitter, so it happens once
 * - Dropping the consumer side cancels the running scan
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::types::{ScanEvent, ScanResult};

/// Producer side of a scan's event stream
#[derive(Debug)]
pub struct EventEmitter {
    tx: mpsc::UnboundedSender<ScanEvent>,
    cancel: CancellationToken,
}

impl EventEmitter {
    /// Create a connected emitter / stream pair sharing `cancel`
    pub fn channel(cancel: CancellationToken) -> (EventEmitter, ScanStream) {
        let (tx, rx) = mpsc::unbounded_channel();

        let emitter = EventEmitter {
            tx,
            cancel: cancel.clone(),
        };
        let stream = ScanStream {
            rx,
            guard: Some(cancel.clone().drop_guard()),
            cancel,
        };

        (emitter, stream)
    }

    pub fn progress(&self, current: usize, total: usize) -> bool {
        self.send(ScanEvent::progress(current, total))
    }

    pub fn result(&self, result: ScanResult) -> bool {
        self.send(ScanEvent::Result { result })
    }

    /// Emit the terminal event and close the stream
    pub fn complete(self) -> bool {
        self.send(ScanEvent::Complete)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, event: ScanEvent) -> bool {
        if self.tx.send(event).is_err() {
            // Nobody is listening anymore
            if !self.cancel.is_cancelled() {
                debug!("Event consumer disconnected, cancelling scan");
                self.cancel.cancel();
            }
            return false;
        }
        true
    }
}

/// Consumer side of a scan's event stream.
///
/// Yields events in emission order and ends after `Complete`, or early if the
/// scan was cancelled. Dropping it cancels the scan.
#[derive(Debug)]
pub struct ScanStream {
    rx: mpsc::UnboundedReceiver<ScanEvent>,
    cancel: CancellationToken,
    guard: Option<DropGuard>,
}

impl ScanStream {
    pub async fn next_event(&mut self) -> Option<ScanEvent> {
        self.rx.recv().await
    }

    /// Stop the scan; the stream ends without `Complete`
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Let the scan keep running after this stream is dropped
    pub fn detach(&mut self) {
        if let Some(guard) = self.guard.take() {
            let _ = guard.disarm();
        }
    }

    /// Drain every remaining event
    pub async fn collect_events(mut self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }
}

impl Stream for ScanStream {
    type Item = ScanEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Encode one event as a server-sent-events `data:` frame
pub fn sse_frame(event: &ScanEvent) -> serde_json::Result<String> {
    let json = serde_json::to_string(event)?;
    Ok(format!("data: {}\n\n", json))
}
