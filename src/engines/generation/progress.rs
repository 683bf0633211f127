use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Observer of the generational loop.
///
/// `should_stop` is polled once per generation, after that generation's
/// evaluation completes; returning true ends the run with the best plan of
/// the last completed generation.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64);
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// No-op callback for embedding and tests.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64) {}
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64) {
        println!(
            "Generation {} complete. Best fitness: {:.6}",
            generation + 1,
            best_fitness
        );
    }
}

/// Streams progress over an mpsc channel and honours an external stop flag,
/// for callers driving the engine from another thread.
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
    stop: Arc<AtomicBool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_fitness: f64 },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self {
            sender,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle the owning thread can set to stop the run after the current
    /// generation.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
        });
    }

    fn should_stop(&mut self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}
