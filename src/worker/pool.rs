use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Join handle for a single pool submission.
///
/// The result travels back over a dedicated channel; `join` blocks until
/// the job has run.
pub struct TaskHandle<T> {
    rx: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Wrap an already-known result.
    pub fn ready(value: T) -> Self {
        let (tx, rx) = channel();
        let _ = tx.send(value);
        Self { rx }
    }

    /// Block until the job has run.
    ///
    /// Returns `None` if the pool was torn down before the job ran.
    pub fn join(self) -> Option<T> {
        self.rx.recv().ok()
    }
}

/// Fixed-size pool of worker threads processing commit jobs.
///
/// Jobs are submitted over an mpsc channel and run in submission order per
/// worker. Dropping the pool closes the channel and joins every worker;
/// jobs still queued at that point never run, and their handles resolve to
/// `None`.
pub struct CommitPool {
    tx: Mutex<Option<Sender<Job>>>,
    workers: Vec<JoinHandle<()>>,
}

impl CommitPool {
    /// Create a pool with the given number of workers (at least one).
    pub fn new(workers: usize) -> Self {
        let (tx, rx) = channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..workers.max(1))
            .map(|_| {
                let rx = Arc::clone(&rx);
                thread::spawn(move || loop {
                    let job = {
                        let guard = match rx.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        guard.recv()
                    };
                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                })
            })
            .collect();
        Self {
            tx: Mutex::new(Some(tx)),
            workers,
        }
    }

    /// Create a single-worker pool.
    ///
    /// One worker means submitted commits run strictly one at a time, in
    /// submission order.
    pub fn single() -> Self {
        Self::new(1)
    }

    /// Submit a job; the handle resolves once it has run.
    pub fn submit<T, F>(&self, job: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = channel();
        let wrapped: Job = Box::new(move || {
            let _ = done_tx.send(job());
        });
        let guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(tx) = guard.as_ref() {
            let _ = tx.send(wrapped);
        }
        TaskHandle { rx: done_rx }
    }
}

impl Drop for CommitPool {
    fn drop(&mut self) {
        match self.tx.lock() {
            Ok(mut guard) => {
                guard.take();
            }
            Err(poisoned) => {
                poisoned.into_inner().take();
            }
        }
        for worker in self.workers.drain(..) {
            // A queued job can own the last handle to the pool's owner, in
            // which case this drop runs on the worker itself; skip the
            // self-join and let the thread unwind through its closed
            // channel.
            if worker.thread().id() != thread::current().id() {
                let _ = worker.join();
            }
        }
    }
}
