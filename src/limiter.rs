//! A fixed-size worker pool draining one FIFO queue.
//!
//! At most `limit` handlers run at any instant. Queued jobs are admitted
//! strictly in submission order, a panicking handler frees its slot for the
//! next job, and [`WorkerPool::run`] returns only once every job, including
//! those submitted by other jobs, has finished.

use crate::error::Result;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::error;

/// What happened during one [`WorkerPool::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolReport {
    pub completed: usize,
    pub panicked: usize,
    /// Highest number of handlers observed running at the same time.
    pub peak: usize,
}

pub struct WorkerPool {
    limit: usize,
    #[cfg(feature = "parallel")]
    threads: rayon::ThreadPool,
}
impl WorkerPool {
    /// A limit of zero is treated as one.
    pub fn new(limit: usize) -> Result<Self> {
        let limit = limit.max(1);
        Ok(Self {
            limit,
            #[cfg(feature = "parallel")]
            threads: rayon::ThreadPoolBuilder::new()
                .num_threads(limit)
                .thread_name(|i| format!("files-to-prompt-worker-{}", i))
                .build()?,
        })
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    /// Runs `handler` on every seed and on every job it submits through the
    /// [`Spawner`], then returns.
    pub fn run<T, F>(&self, seeds: Vec<T>, handler: F) -> PoolReport
    where
        T: Send,
        F: Fn(T, &Spawner<'_, T>) + Sync,
    {
        let shared = Shared::new(seeds);
        #[cfg(feature = "parallel")]
        {
            let shared = &shared;
            let handler = &handler;
            self.threads.scope(|scope| {
                for _ in 0..self.limit {
                    scope.spawn(move |_| work(shared, handler));
                }
            });
        }
        #[cfg(not(feature = "parallel"))]
        work(&shared, &handler);
        shared.report()
    }
}

/// Handle given to each job for queueing follow-up work.
pub struct Spawner<'a, T> {
    shared: &'a Shared<T>,
}
impl<T> Spawner<'_, T> {
    /// Appends `job` to the back of the queue.
    pub fn spawn(&self, job: T) {
        let mut state = self.shared.lock();
        state.jobs.push_back(job);
        state.pending += 1;
        drop(state);
        self.shared.wake.notify_one();
    }
}

struct QueueState<T> {
    jobs: VecDeque<T>,
    /// Jobs queued or running.
    pending: usize,
}

struct Shared<T> {
    state: Mutex<QueueState<T>>,
    wake: Condvar,
    running: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
    panicked: AtomicUsize,
}
impl<T> Shared<T> {
    fn new(seeds: Vec<T>) -> Self {
        let pending = seeds.len();
        Self {
            state: Mutex::new(QueueState {
                jobs: seeds.into(),
                pending,
            }),
            wake: Condvar::new(),
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            panicked: AtomicUsize::new(0),
        }
    }
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    /// Blocks until a job is available, or returns `None` once nothing is
    /// queued or running.
    fn next_job(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.pending == 0 {
                return None;
            }
            state = self
                .wake
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
    fn report(&self) -> PoolReport {
        PoolReport {
            completed: self.completed.load(Ordering::SeqCst),
            panicked: self.panicked.load(Ordering::SeqCst),
            peak: self.peak.load(Ordering::SeqCst),
        }
    }
}

/// Occupies one running slot; released on drop, including during unwinding.
struct Slot<'a, T> {
    shared: &'a Shared<T>,
}
impl<'a, T> Slot<'a, T> {
    fn enter(shared: &'a Shared<T>) -> Self {
        let now = shared.running.fetch_add(1, Ordering::SeqCst) + 1;
        shared.peak.fetch_max(now, Ordering::SeqCst);
        Self { shared }
    }
}
impl<T> Drop for Slot<'_, T> {
    fn drop(&mut self) {
        self.shared.running.fetch_sub(1, Ordering::SeqCst);
        let mut state = self.shared.lock();
        state.pending -= 1;
        let finished = state.pending == 0;
        drop(state);
        if finished {
            self.shared.wake.notify_all();
        }
    }
}

fn work<T, F>(shared: &Shared<T>, handler: &F)
where
    F: Fn(T, &Spawner<'_, T>),
{
    let spawner = Spawner { shared };
    while let Some(job) = shared.next_job() {
        let _slot = Slot::enter(shared);
        match panic::catch_unwind(AssertUnwindSafe(|| handler(job, &spawner))) {
            Ok(()) => {
                shared.completed.fetch_add(1, Ordering::SeqCst);
            }
            Err(_) => {
                shared.panicked.fetch_add(1, Ordering::SeqCst);
                error!("A traversal task panicked; its slot was released");
            }
        }
    }
}
