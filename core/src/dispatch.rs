//! Marshaling of work onto the UI execution context.
//!
//! # Design
//! The view model never mutates observable state from an I/O task. Instead
//! each completion is wrapped in a `Job` and handed to a `Dispatcher`, whose
//! implementation decides which thread runs it. `main_queue()` provides the
//! stock implementation: an unbounded channel whose receiving half,
//! `MainLoop`, is drained by whichever thread owns the UI.

use tokio::sync::mpsc;
use tracing::debug;

/// A unit of work to run on the UI context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Delivers jobs to a specific execution context.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Job);
}

/// Create a connected dispatcher / loop pair.
pub fn main_queue() -> (MainQueue, MainLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MainQueue { tx }, MainLoop { rx })
}

/// Sending half: cheap to clone, usable from any thread.
#[derive(Clone)]
pub struct MainQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl Dispatcher for MainQueue {
    fn dispatch(&self, job: Job) {
        if self.tx.send(job).is_err() {
            debug!("main loop is gone, job dropped");
        }
    }
}

/// Receiving half, owned by the UI thread.
pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl MainLoop {
    /// Wait for the next job without running it. `None` once every
    /// `MainQueue` has been dropped.
    pub async fn recv(&mut self) -> Option<Job> {
        self.rx.recv().await
    }

    /// Wait for the next job and run it. Returns `false` once every
    /// `MainQueue` has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every job that is already queued and return how many ran. Meant
    /// to be called from the host's own event loop tick.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
