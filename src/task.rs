use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::data::loader::{self, LoadError, Normalization, Source};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Shared flag telling a background load that nobody wants its result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Background load
// ---------------------------------------------------------------------------

/// A resource load running on its own thread.
///
/// Dropping the task cancels it; a cancelled task never yields a result.
pub struct LoadTask {
    token: CancellationToken,
    rx: Receiver<Result<Dataset, LoadError>>,
    finished: bool,
}

impl LoadTask {
    /// Start loading `source`. `notify` runs on the worker thread once a
    /// result has been sent.
    pub fn spawn<F>(source: Source, normalization: Normalization, notify: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::channel();

        let worker_token = token.clone();
        thread::spawn(move || {
            log::info!("Fetching {source}");
            let result = loader::load(&source, &normalization);
            if worker_token.is_cancelled() {
                log::debug!("Discarding result for {source}: load was cancelled");
                return;
            }
            if tx.send(result).is_ok() {
                notify();
            }
        });

        Self {
            token,
            rx,
            finished: false,
        }
    }

    /// Non-blocking check for the result. Yields it at most once.
    pub fn poll(&mut self) -> Option<Result<Dataset, LoadError>> {
        if self.finished || self.token.is_cancelled() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(LoadError::Interrupted))
            }
        }
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc::RecvTimeoutError;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::data::loader::test_server::serve_after;

    fn wait_for(task: &mut LoadTask) -> Result<Dataset, LoadError> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = task.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "load task did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn csv_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Domain,Traffic\na.com,\"1,234\"\nb.com,\n").unwrap();
        file
    }

    #[test]
    fn delivers_result_once_and_notifies() {
        let file = csv_file();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut task = LoadTask::spawn(
            Source::Path(file.path().to_path_buf()),
            Normalization::default(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        let ds = wait_for(&mut task).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].get("Traffic"), Some("1234"));
        assert!(task.poll().is_none());

        let deadline = Instant::now() + Duration::from_secs(10);
        while calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failure_is_delivered_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut task = LoadTask::spawn(
            Source::Path(dir.path().join("missing.csv")),
            Normalization::default(),
            || {},
        );
        assert!(matches!(wait_for(&mut task), Err(LoadError::Io { .. })));
    }

    #[test]
    fn worker_discards_result_when_cancelled_mid_load() {
        let (release, gate) = mpsc::channel();
        let url = serve_after(gate, "200 OK", "Domain,Traffic\na.com,1\n");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let task = LoadTask::spawn(Source::parse(&url), Normalization::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        task.token.cancel();
        release.send(()).unwrap();

        // The worker drops its sender without sending anything.
        assert!(matches!(
            task.rx.recv_timeout(Duration::from_secs(10)),
            Err(RecvTimeoutError::Disconnected)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancelled_task_never_polls_a_result() {
        let file = csv_file();
        let mut task = LoadTask::spawn(
            Source::Path(file.path().to_path_buf()),
            Normalization::default(),
            || {},
        );
        task.token.cancel();

        thread::sleep(Duration::from_millis(200));
        assert!(task.poll().is_none());
    }

    #[test]
    fn dropping_task_cancels_its_token() {
        let file = csv_file();
        let task = LoadTask::spawn(
            Source::Path(file.path().to_path_buf()),
            Normalization::default(),
            || {},
        );
        let token = task.token.clone();
        drop(task);
        assert!(token.is_cancelled());
    }
}
