use crate::channel::{channel, CancellationToken, CommandSender};
use crate::command::Command;
use crate::config::{AnimatorConfig, CellSize, Setting, Speed};
use crate::controller::AnimationController;
use crate::error::SubmitError;
use crate::grid::Orientation;
use crate::render::Renderer;
use std::io;
use std::thread::{self, JoinHandle};

/// The ant animation.
/// Main entry point: queue commands here and watch them play out.
///
/// Every method returns immediately. Commands and settings are queued and
/// handled in order by a dedicated playback thread, which shows each command
/// as an animation before taking the next one.
pub struct AntAnimator {
    sender: Option<CommandSender>,
    cancel: CancellationToken,
    playback: Option<JoinHandle<AnimationController>>,
}

impl AntAnimator {
    /// Starts playback on a new thread with a default controller.
    ///
    /// # Arguments
    /// * `renderer` - Draws every frame of the animation.
    pub fn start(renderer: Box<dyn Renderer>) -> io::Result<AntAnimator> {
        AntAnimator::with_controller(AnimationController::new(renderer))
    }

    /// Starts playback and queues every setting of `config` before anything else.
    ///
    /// # Arguments
    /// * `renderer` - Draws every frame of the animation.
    /// * `config` - Grid, ant, food and speed to start with.
    pub fn with_config(
        renderer: Box<dyn Renderer>,
        config: &AnimatorConfig,
    ) -> io::Result<AntAnimator> {
        let animator = AntAnimator::start(renderer)?;
        for setting in config.settings() {
            // Cannot fail: nothing has been stopped yet
            let _ = animator.configure(setting);
        }
        Ok(animator)
    }

    /// Starts playback on a new thread driving `controller`.
    pub fn with_controller(controller: AnimationController) -> io::Result<AntAnimator> {
        let (sender, receiver) = channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let playback = thread::Builder::new()
            .name("ant-playback".to_string())
            .spawn(move || controller.run(&receiver, &token))?;

        Ok(AntAnimator {
            sender: Some(sender),
            cancel,
            playback: Some(playback),
        })
    }

    pub fn submit(&self, command: Command) -> Result<(), SubmitError> {
        self.open_sender()?.submit(command)
    }

    /// Queues a command given by its numeric code. Unknown codes are rejected.
    pub fn submit_code(&self, code: i32) -> Result<(), SubmitError> {
        self.open_sender()?.submit_code(code)
    }

    pub fn move_forward(&self) -> Result<(), SubmitError> {
        self.submit(Command::Move)
    }

    pub fn rotate_left(&self) -> Result<(), SubmitError> {
        self.submit(Command::RotateLeft)
    }

    pub fn rotate_right(&self) -> Result<(), SubmitError> {
        self.submit(Command::RotateRight)
    }

    pub fn skip(&self) -> Result<(), SubmitError> {
        self.submit(Command::Skip)
    }

    pub fn configure(&self, setting: Setting) -> Result<(), SubmitError> {
        self.open_sender()?.configure(setting)
    }

    /// Resizes the grid, which also moves the ant to the origin and removes
    /// all food. Sizes outside 1..=4096 give a 10x10 grid.
    pub fn set_grid_dimensions(&self, width: i32, height: i32) -> Result<(), SubmitError> {
        self.configure(Setting::Dimensions { width, height })
    }

    pub fn set_start(&self, x: i32, y: i32) -> Result<(), SubmitError> {
        self.configure(Setting::Start { x, y })
    }

    pub fn set_orientation(&self, orientation: Orientation) -> Result<(), SubmitError> {
        self.configure(Setting::Orientation(orientation))
    }

    /// Unknown codes face north.
    pub fn set_orientation_code(&self, code: i32) -> Result<(), SubmitError> {
        self.set_orientation(Orientation::from_code_or_north(code))
    }

    pub fn set_cell_size(&self, cell_size: CellSize) -> Result<(), SubmitError> {
        self.configure(Setting::CellSize(cell_size))
    }

    /// Unknown sizes fall back to medium cells.
    pub fn set_cell_size_pixels(&self, pixels: u32) -> Result<(), SubmitError> {
        self.set_cell_size(CellSize::from_pixels_or_default(pixels))
    }

    pub fn set_speed(&self, speed: Speed) -> Result<(), SubmitError> {
        self.configure(Setting::Speed(speed))
    }

    pub fn add_food(&self, x: i32, y: i32) -> Result<(), SubmitError> {
        self.configure(Setting::Food { x, y })
    }

    /// Another producer handle for submitting from other threads.
    pub fn sender(&self) -> Option<CommandSender> {
        self.sender.clone()
    }

    /// Instructions queued but not yet taken by the playback thread.
    pub fn pending(&self) -> usize {
        self.sender.as_ref().map_or(0, CommandSender::len)
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops playback after the current frame. Whatever is still queued is
    /// dropped and later submissions are rejected.
    pub fn stop(&self) {
        log::info!("stopping playback with {} instructions queued", self.pending());
        self.cancel.cancel();
    }

    /// Lets playback finish everything already queued, then returns the
    /// controller in its final state.
    ///
    /// Blocks until the queue has been drained, which includes whatever is
    /// still submitted through handles obtained from [`AntAnimator::sender`]
    /// until they are dropped. Returns `None` if the playback thread panicked.
    pub fn close(mut self) -> Option<AnimationController> {
        self.sender.take();
        self.join()
    }

    fn join(&mut self) -> Option<AnimationController> {
        let handle = self.playback.take()?;
        match handle.join() {
            Ok(controller) => Some(controller),
            Err(_) => {
                log::error!("playback thread panicked");
                None
            }
        }
    }

    fn open_sender(&self) -> Result<&CommandSender, SubmitError> {
        match &self.sender {
            Some(sender) if !self.cancel.is_cancelled() => Ok(sender),
            _ => {
                log::warn!("animator is stopped; submission rejected");
                Err(SubmitError::Stopped)
            }
        }
    }
}

impl Drop for AntAnimator {
    fn drop(&mut self) {
        if self.playback.is_some() {
            self.cancel.cancel();
            self.join();
        }
    }
}
