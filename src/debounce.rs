/// Cancellable debounce timer
///
/// `Debouncer` delivers the most recently scheduled value to its callback
/// once no newer value has arrived for the quiet period. Scheduling
/// replaces any pending value, so at most one callback fires per quiet
/// window of input.

use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

enum Msg<T> {
    Schedule(T),
    Shutdown,
}

/// Schedule-with-replace timer running its callback on a worker thread
pub struct Debouncer<T: Send + 'static> {
    tx: Sender<Msg<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(quiet: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Msg<T>>();

        let worker = std::thread::spawn(move || {
            loop {
                // Block for the first value of a burst
                let mut pending = match rx.recv() {
                    Ok(Msg::Schedule(v)) => v,
                    Ok(Msg::Shutdown) | Err(_) => return,
                };

                // Keep replacing until the line goes quiet
                loop {
                    match rx.recv_timeout(quiet) {
                        Ok(Msg::Schedule(v)) => pending = v,
                        Ok(Msg::Shutdown) => return,
                        Err(RecvTimeoutError::Timeout) => {
                            callback(pending);
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });

        Self { tx, worker: Some(worker) }
    }

    /// Schedule a value, replacing any value still waiting out its quiet period
    pub fn schedule(&self, value: T) {
        if self.tx.send(Msg::Schedule(value)).is_err() {
            debug!("debounce worker gone, dropping scheduled value");
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread::sleep;

    #[test]
    fn test_burst_fires_only_last_value() {
        let fired: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();

        let debouncer = Debouncer::new(Duration::from_millis(30), move |v| {
            sink.lock().unwrap().push(v);
        });

        debouncer.schedule(1);
        debouncer.schedule(2);
        debouncer.schedule(3);
        sleep(Duration::from_millis(200));

        assert_eq!(*fired.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let fired: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();

        let debouncer = Debouncer::new(Duration::from_millis(20), move |v| {
            sink.lock().unwrap().push(v);
        });

        debouncer.schedule("first");
        sleep(Duration::from_millis(150));
        debouncer.schedule("second");
        sleep(Duration::from_millis(150));

        assert_eq!(*fired.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_drop_joins_without_firing_pending() {
        let fired: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();

        {
            let debouncer = Debouncer::new(Duration::from_secs(60), move |v| {
                sink.lock().unwrap().push(v);
            });
            debouncer.schedule(42);
            // Dropped while the value is still waiting out its quiet period
        }

        assert!(fired.lock().unwrap().is_empty());
    }
}
