use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use tokio::runtime::Runtime;

/// Type alias for boxed async tasks
pub type AsyncTask<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Background runtime for catalog and artwork requests
///
/// One runtime lives for the whole app so the reqwest connection pool stays
/// bound to a single reactor. Results travel back to the UI thread over
/// `std::sync::mpsc` channels and are picked up on the next frame.
pub struct TaskRunner {
    runtime: Runtime,
}

impl TaskRunner {
    pub fn new(worker_threads: usize) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("previewrs-io")
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to create runtime: {}", e))?;
        Ok(Self { runtime })
    }

    /// Runs an async task and sends its output via a channel
    ///
    /// A closed receiver is not an error: the UI simply stopped waiting.
    ///
    /// # Example
    /// ```ignore
    /// let (tx, rx) = std::sync::mpsc::channel();
    /// runner.spawn_and_send(move || Box::pin(async move { catalog.fetch_chart_albums().await }), tx);
    /// // Later: if let Ok(albums) = rx.try_recv() { ... }
    /// ```
    pub fn spawn_and_send<F, T>(&self, task_factory: F, tx: Sender<T>)
    where
        F: FnOnce() -> AsyncTask<T> + Send + 'static,
        T: Send + 'static,
    {
        self.runtime.spawn(async move {
            let result = task_factory().await;
            if tx.send(result).is_err() {
                log::debug!("[AsyncHelper] Receiver dropped before task completed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    #[test]
    fn delivers_result_over_channel() {
        let runner = TaskRunner::new(1).unwrap();
        let (tx, rx) = channel();
        runner.spawn_and_send(move || Box::pin(async move { "done".to_string() }), tx);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "done");
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let runner = TaskRunner::new(1).unwrap();
        let (tx, rx) = channel::<u32>();
        drop(rx);
        runner.spawn_and_send(move || Box::pin(async move { 1 }), tx);
        std::thread::sleep(Duration::from_millis(50));
    }
}
