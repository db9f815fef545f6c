use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::RenderError;
use crate::orchestrator::{Frame, InputEvent, Orchestrator};

/// Destination for finished frames.
///
/// Returning [`RenderError::DisplayClosed`] (or any error) stops the loop.
pub trait FrameSink: Send {
    fn present(&mut self, frame: Frame) -> crate::Result<()>;
}

impl FrameSink for Sender<Frame> {
    fn present(&mut self, frame: Frame) -> crate::Result<()> {
        self.send(frame).map_err(|_| RenderError::DisplayClosed)
    }
}

/// Never blocks: when the display has not consumed the previous frame yet,
/// the new one is dropped.
impl FrameSink for SyncSender<Frame> {
    fn present(&mut self, frame: Frame) -> crate::Result<()> {
        match self.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(frame)) => {
                debug!(frame = frame.number, "Display busy, dropping frame");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(RenderError::DisplayClosed),
        }
    }
}

enum Command {
    Input(InputEvent),
    Shutdown,
}

/// Control side of a running animation loop.
///
/// Dropping the handle stops the loop and joins its thread.
pub struct AnimationHandle {
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Queue an input event. It takes effect at the next tick boundary.
    pub fn send(&self, event: InputEvent) -> crate::Result<()> {
        self.tx
            .send(Command::Input(event))
            .map_err(|_| RenderError::LoopStopped)
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the loop and wait for the in-flight frame, if any, to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Animation worker panicked");
            }
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Move `orchestrator` onto a dedicated thread and drive it.
///
/// While running, a frame is rendered and handed to `sink` every tick with
/// `interval` between ticks. While idle the thread sleeps until an event
/// arrives. Only one tick is ever in flight.
pub fn spawn_animation<S: FrameSink + 'static>(
    orchestrator: Orchestrator,
    sink: S,
    interval: Duration,
) -> crate::Result<AnimationHandle> {
    let (tx, rx) = mpsc::channel();
    let worker = thread::Builder::new()
        .name("julia-animation".into())
        .spawn(move || run_loop(orchestrator, sink, rx, interval))?;
    Ok(AnimationHandle {
        tx,
        worker: Some(worker),
    })
}

fn run_loop<S: FrameSink>(
    mut orchestrator: Orchestrator,
    mut sink: S,
    rx: Receiver<Command>,
    interval: Duration,
) {
    info!(backend = orchestrator.backend_name(), "Animation loop started");

    loop {
        if !orchestrator.wants_tick() {
            match rx.recv() {
                Ok(Command::Input(event)) => orchestrator.apply(event),
                Ok(Command::Shutdown) | Err(_) => break,
            }
        }

        if !drain_pending(&mut orchestrator, &rx) {
            break;
        }

        if let Some(frame) = orchestrator.tick() {
            if let Err(e) = sink.present(frame) {
                info!("{e}; stopping animation loop");
                break;
            }
        }

        if orchestrator.is_running() {
            match rx.recv_timeout(interval) {
                Ok(Command::Input(event)) => orchestrator.apply(event),
                Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }

    info!(frames = orchestrator.frames_rendered(), "Animation loop stopped");
}

/// Apply every queued event. Returns `false` when the loop should exit.
fn drain_pending(orchestrator: &mut Orchestrator, rx: &Receiver<Command>) -> bool {
    loop {
        match rx.try_recv() {
            Ok(Command::Input(event)) => orchestrator.apply(event),
            Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => return false,
            Err(TryRecvError::Empty) => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use crate::config::RenderConfig;
    use crate::orchestrator::AnimationState;
    use std::time::Instant;

    const WAIT: Duration = Duration::from_secs(10);

    fn orchestrator() -> Orchestrator {
        let config = RenderConfig {
            width: 8,
            height: 8,
            max_iterations: 40,
            ..RenderConfig::default()
        };
        Orchestrator::with_backend(&config, Backend::sequential()).unwrap()
    }

    fn spawn(sink: Sender<Frame>) -> AnimationHandle {
        spawn_animation(orchestrator(), sink, Duration::from_millis(1)).unwrap()
    }

    #[test]
    fn idle_loop_renders_on_redraw_only() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn(tx);

        handle.send(InputEvent::Redraw).unwrap();
        let frame = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(frame.number, 1);
        assert_eq!(frame.state, AnimationState::Idle);

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        handle.shutdown();
    }

    #[test]
    fn running_loop_streams_frames_in_order() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn(tx);

        handle.send(InputEvent::ToggleAnimation).unwrap();
        handle.send(InputEvent::ToggleAuto).unwrap();

        let first = rx.recv_timeout(WAIT).unwrap();
        let second = rx.recv_timeout(WAIT).unwrap();
        let third = rx.recv_timeout(WAIT).unwrap();
        assert!(first.number < second.number && second.number < third.number);
        assert!(third.constant.im < first.constant.im);
        assert_eq!(third.state, AnimationState::RunningAuto);

        handle.shutdown();
    }

    #[test]
    fn stop_halts_the_stream() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn(tx);

        handle.send(InputEvent::ToggleAnimation).unwrap();
        rx.recv_timeout(WAIT).unwrap();
        handle.send(InputEvent::ToggleAnimation).unwrap();

        // Whatever was in flight when the toggle landed arrives; then silence.
        while rx.recv_timeout(Duration::from_millis(100)).is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert!(!handle.is_finished());
        handle.shutdown();
    }

    #[test]
    fn closed_display_ends_the_loop() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn(tx);
        drop(rx);

        handle.send(InputEvent::ToggleAnimation).unwrap();
        let deadline = Instant::now() + WAIT;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.is_finished());
        assert!(matches!(
            handle.send(InputEvent::Redraw),
            Err(RenderError::LoopStopped)
        ));
    }

    #[test]
    fn bounded_sink_drops_frames_instead_of_blocking() {
        let (tx, rx) = mpsc::sync_channel(1);
        let handle = spawn_animation(orchestrator(), tx, Duration::from_millis(1)).unwrap();
        handle.send(InputEvent::ToggleAnimation).unwrap();

        thread::sleep(Duration::from_millis(100));
        let first = rx.recv_timeout(WAIT).unwrap();
        let later = rx.recv_timeout(WAIT).unwrap();
        assert!(later.number > first.number + 1);

        handle.shutdown();
    }
}
