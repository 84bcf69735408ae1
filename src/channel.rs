//! The command queue between producers and the playback thread.
//!
//! Any number of [`CommandSender`]s feed one [`CommandReceiver`]. Sending
//! never blocks; the queue is unbounded so callers can run far ahead of what
//! has been animated. The receiver blocks until an instruction arrives, the
//! [`CancellationToken`] fires, or every sender is gone.

use crate::command::Command;
use crate::config::Setting;
use crate::error::{Interrupted, SubmitError};
use crossbeam::channel::{
    bounded, select, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// One entry of the queue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    /// Animated: applied, then ticked until converged.
    Command(Command),
    /// Applied instantly, in order with the commands around it.
    Configure(Setting),
}

/// Creates a connected sender/receiver pair.
pub fn channel() -> (CommandSender, CommandReceiver) {
    let (sender, receiver) = unbounded();
    (
        CommandSender { queue: sender },
        CommandReceiver { queue: receiver },
    )
}

#[derive(Clone, Debug)]
pub struct CommandSender {
    queue: Sender<Instruction>,
}

impl CommandSender {
    pub fn submit(&self, command: Command) -> Result<(), SubmitError> {
        self.send(Instruction::Command(command))
    }

    /// Submits a raw command code. Unknown codes are rejected and nothing is
    /// enqueued.
    pub fn submit_code(&self, code: i32) -> Result<(), SubmitError> {
        let command = Command::try_from(code).inspect_err(|e| log::warn!("{e}; not enqueued"))?;
        self.submit(command)
    }

    pub fn configure(&self, setting: Setting) -> Result<(), SubmitError> {
        self.send(Instruction::Configure(setting))
    }

    /// Instructions waiting to be taken.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn send(&self, instruction: Instruction) -> Result<(), SubmitError> {
        self.queue
            .send(instruction)
            .map_err(|_| SubmitError::Stopped)
    }
}

#[derive(Debug)]
pub struct CommandReceiver {
    queue: Receiver<Instruction>,
}

impl CommandReceiver {
    /// Removes the oldest instruction, waiting for one if the queue is empty.
    ///
    /// Returns `Interrupted::Cancelled` as soon as `cancel` fires, even with
    /// instructions still queued, and `Interrupted::Closed` once all senders
    /// are dropped and the queue has been drained.
    pub fn take_next(&self, cancel: &CancellationToken) -> Result<Instruction, Interrupted> {
        if cancel.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }

        select! {
            recv(self.queue) -> instruction => instruction.map_err(|_| Interrupted::Closed),
            recv(cancel.signal) -> _ => Err(Interrupted::Cancelled),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A stop signal shared between the caller and the playback thread.
///
/// Cancelling wakes every thread blocked in [`CommandReceiver::take_next`] or
/// [`CancellationToken::sleep`]. Clones observe the same signal.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    // Nothing is ever sent; dropping the sender disconnects `signal`.
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        let (trigger, signal) = bounded(0);
        CancellationToken {
            trigger: Arc::new(Mutex::new(Some(trigger))),
            signal,
        }
    }

    pub fn cancel(&self) {
        self.trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleeps for `duration` unless cancelled first.
    pub fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        match self.signal.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            _ => Err(Interrupted::Cancelled),
        }
    }
}
