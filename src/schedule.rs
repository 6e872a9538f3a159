//! Deferred job scheduling.
//!
//! All work runs on one event loop; "scheduling" defers a callback to a
//! later turn of that loop. The controller queues its animation requests this
//! way so markers and tweens are never applied in the same synchronous pass
//! that observed the value change.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a scheduled job, usable to cancel it before it runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct JobId(u64);

/// Defers callbacks to a later turn of the event loop.
pub trait Scheduler {
    /// Queue a job, returning a cancelable handle.
    fn schedule(&self, job: Box<dyn FnOnce()>) -> JobId;

    /// Cancel a pending job. A no-op when the job already ran or was
    /// already canceled.
    fn cancel(&self, id: JobId);
}

struct QueueInner {
    jobs: Vec<(JobId, Box<dyn FnOnce()>)>,
    next_id: u64,
}

/// Single-threaded job queue drained by the host loop.
///
/// Jobs run in scheduling order. A drain only runs the jobs that were
/// pending when it began; jobs scheduled while draining wait for the next
/// turn.
#[derive(Clone)]
pub struct JobQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(QueueInner {
                jobs: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Run every job queued so far, in order. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let jobs = std::mem::take(&mut self.inner.borrow_mut().jobs);
        let count = jobs.len();
        for (id, job) in jobs {
            log::trace!("running deferred job {:?}", id);
            job();
        }
        count
    }

    /// Whether any job is waiting to run.
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().jobs.is_empty()
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for JobQueue {
    fn schedule(&self, job: Box<dyn FnOnce()>) -> JobId {
        let mut inner = self.inner.borrow_mut();
        let id = JobId(inner.next_id);
        inner.next_id += 1;
        inner.jobs.push((id, job));
        id
    }

    fn cancel(&self, id: JobId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(index) = inner.jobs.iter().position(|(job_id, _)| *job_id == id) {
            inner.jobs.remove(index);
        }
    }
}
