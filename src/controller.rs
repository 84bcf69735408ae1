use crate::channel::{CancellationToken, CommandReceiver, Instruction};
use crate::command::Command;
use crate::config::{CellSize, Setting, Speed};
use crate::error::{Interrupted, ReplayError, ValidationError};
use crate::grid::{GridState, Transition};
use crate::render::Renderer;
use crate::replay::{NoOpTransitionLogger, TransitionLogger};
use crate::visual::{Target, VisualState};

/// Turns each discrete grid transition into a short animation.
///
/// The controller owns the logical grid and the visual state that chases it.
/// It is driven from a single thread: [`AnimationController::run`] takes
/// instructions off the queue, applies each command instantly to the grid and
/// then ticks the visual state at the configured frame rate until it has
/// converged on the new target, drawing every frame.
pub struct AnimationController {
    grid: GridState,
    visual: VisualState,
    cell_size: CellSize,
    speed: Speed,
    finished: bool,
    applied: usize,
    frames: usize,
    renderer: Box<dyn Renderer>,
    logger: Box<dyn TransitionLogger>,
}

impl AnimationController {
    /// A controller on the default 10x10 grid, with the ant resting at the
    /// origin facing south.
    pub fn new(mut renderer: Box<dyn Renderer>) -> AnimationController {
        let grid = GridState::default();
        let cell_size = CellSize::default();
        renderer.set_cell_size(cell_size);

        AnimationController {
            visual: VisualState::at(Target::of(&grid, cell_size.pixels())),
            grid,
            cell_size,
            speed: Speed::default(),
            finished: true,
            applied: 0,
            frames: 0,
            renderer,
            logger: Box::new(NoOpTransitionLogger),
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn TransitionLogger>) -> AnimationController {
        self.logger = logger;
        self
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Whether the visual state has caught up with the last transition.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of commands applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn target(&self) -> Target {
        Target::of(&self.grid, self.cell_size.pixels())
    }

    /// Applies a configuration change immediately. Invalid values are logged
    /// and replaced with defaults, or ignored for food.
    pub fn configure(&mut self, setting: Setting) -> Result<(), ValidationError> {
        self.logger.log_setting(setting);

        match setting {
            Setting::Dimensions { width, height } => {
                let result = self.grid.set_dimensions(width, height);
                self.check_surface();
                result
            }
            Setting::Start { x, y } => self.grid.set_start(x, y),
            Setting::Orientation(orientation) => {
                self.grid.set_orientation(orientation);
                Ok(())
            }
            Setting::CellSize(cell_size) => {
                self.cell_size = cell_size;
                self.renderer.set_cell_size(cell_size);
                self.check_surface();
                Ok(())
            }
            Setting::Speed(speed) => {
                let result = speed.validate().map(|_| ());
                self.speed = speed.or_default();
                result
            }
            Setting::Food { x, y } => self.grid.add_food(x, y),
        }
    }

    /// Applies a command to the grid at once and starts a new animation.
    pub fn apply(&mut self, command: Command) -> Transition {
        let transition = self.grid.apply(command);
        let index = self.applied;
        self.applied += 1;
        self.finished = false;
        self.frames = 0;

        log::debug!(
            "transition {index}: {} -> {:?} facing {:?}",
            command.letter(),
            transition.position,
            transition.orientation
        );
        self.logger.log_transition(index, &transition);
        transition
    }

    /// Moves the visual state one frame closer to the grid and reports whether
    /// the current transition has finished.
    pub fn tick(&mut self) -> bool {
        let target = self.target();
        self.finished = self.visual.step(target);
        self.frames += 1;

        log::trace!("frame {}: {:?}", self.frames, self.visual);
        self.finished
    }

    /// Applies `command` and animates it to completion, drawing and then
    /// sleeping one frame interval per tick.
    ///
    /// Returns early, with the grid already updated, when `cancel` fires.
    pub fn play(&mut self, command: Command, cancel: &CancellationToken) -> Result<(), Interrupted> {
        self.apply(command);

        while !self.finished {
            self.tick();
            self.draw();
            cancel.sleep(self.speed.frame_interval())?;
        }

        let index = self.applied - 1;
        log::debug!("transition {index} converged after {} frames", self.frames);
        self.logger.log_converged(index, self.frames);
        Ok(())
    }

    /// The playback loop. Runs until `cancel` fires or every sender of the
    /// queue is dropped and the queue is drained, then saves the transition
    /// log and hands the controller back.
    ///
    /// Instructions still queued when `cancel` fires are dropped.
    pub fn run(
        mut self,
        receiver: &CommandReceiver,
        cancel: &CancellationToken,
    ) -> AnimationController {
        log::info!("playback started");
        self.check_surface();

        let reason = loop {
            match receiver.take_next(cancel) {
                Ok(Instruction::Command(command)) => {
                    if let Err(reason) = self.play(command, cancel) {
                        break reason;
                    }
                }
                Ok(Instruction::Configure(setting)) => {
                    // Already logged where the default was substituted
                    let _ = self.configure(setting);
                }
                Err(reason) => break reason,
            }
        };

        match reason {
            Interrupted::Cancelled => log::info!(
                "playback stopped after {} transitions, {} instructions dropped",
                self.applied,
                receiver.len()
            ),
            Interrupted::Closed => {
                log::info!("playback finished after {} transitions", self.applied)
            }
        }

        if let Err(e) = self.save_log() {
            log::error!("{e}");
        }
        self
    }

    pub fn save_log(&self) -> Result<(), ReplayError> {
        self.logger.save()
    }

    fn draw(&mut self) {
        if let Err(e) = self.renderer.render(&self.visual, &self.grid) {
            log::error!("{e}; frame skipped");
        }
    }

    fn check_surface(&self) {
        let (surface_width, surface_height) = self.renderer.surface_size();
        if surface_width == 0 || surface_height == 0 {
            return;
        }

        let cell = self.cell_size.pixels().unsigned_abs();
        let extent = |cells: usize| {
            u32::try_from(cells).map_or(u32::MAX, |cells| cells.saturating_mul(cell))
        };
        let width = extent(self.grid.width());
        let height = extent(self.grid.height());
        if width > surface_width || height > surface_height {
            log::warn!(
                "a {width}x{height} pixel grid does not fit on the {surface_width}x{surface_height} surface"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::channel;
    use crate::error::RenderError;
    use crate::grid::Orientation;
    use crate::render::NoOpRenderer;
    use crate::replay::Event;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl Recorder {
        fn commands(&self) -> Vec<Command> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|event| match event {
                    Event::Transition { command, .. } => Some(*command),
                    _ => None,
                })
                .collect()
        }

        fn frames(&self) -> Vec<usize> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|event| match event {
                    Event::Converged { frames, .. } => Some(*frames),
                    _ => None,
                })
                .collect()
        }
    }

    impl TransitionLogger for Recorder {
        fn log_event(&mut self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[derive(Clone, Default)]
    struct CountingRenderer {
        frames: Arc<Mutex<usize>>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, _visual: &VisualState, _grid: &GridState) -> Result<(), RenderError> {
            *self.frames.lock().unwrap() += 1;
            Ok(())
        }

        fn surface_size(&self) -> (u32, u32) {
            (0, 0)
        }
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(&mut self, _visual: &VisualState, _grid: &GridState) -> Result<(), RenderError> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone").into())
        }

        fn surface_size(&self) -> (u32, u32) {
            (1, 1)
        }
    }

    fn fast_controller() -> AnimationController {
        let mut controller = AnimationController::new(Box::new(NoOpRenderer));
        controller.configure(Setting::Speed(Speed::Custom(1000))).unwrap();
        controller
    }

    #[test]
    fn when_created_the_ant_rests_on_its_cell_and_nothing_is_animating() {
        let controller = AnimationController::new(Box::new(NoOpRenderer));

        assert!(controller.is_finished());
        assert_eq!(controller.applied(), 0);
        assert!(controller.visual().is_near(controller.target()));
    }

    #[test]
    fn when_applying_a_command_the_grid_changes_at_once_and_the_animation_starts() {
        let mut controller = fast_controller();
        controller.configure(Setting::Orientation(Orientation::East)).unwrap();

        let transition = controller.apply(Command::Move);

        assert_eq!(transition.position, (1, 0));
        assert_eq!(controller.grid().position(), (1, 0));
        assert!(!controller.is_finished());
        assert_eq!(controller.applied(), 1);
    }

    #[test]
    fn when_applying_a_skip_the_animation_still_restarts_and_finishes_on_the_first_tick() {
        let mut controller = fast_controller();

        controller.apply(Command::Skip);
        assert!(!controller.is_finished());

        assert!(controller.tick());
        assert!(controller.is_finished());
    }

    #[test]
    fn when_ticking_after_a_move_the_transition_finishes_in_a_bounded_number_of_frames() {
        let mut controller = fast_controller();
        controller.configure(Setting::CellSize(CellSize::Large)).unwrap();
        controller.configure(Setting::Orientation(Orientation::North)).unwrap();
        controller.apply(Command::Move);

        let mut ticks = 0;
        while !controller.tick() {
            ticks += 1;
            assert!(ticks < 100);
        }

        assert!(controller.visual().is_near(controller.target()));
    }

    #[test]
    fn when_configuring_invalid_values_defaults_are_used() {
        let mut controller = fast_controller();

        assert!(controller
            .configure(Setting::Dimensions {
                width: -1,
                height: -1
            })
            .is_err());
        assert_eq!(controller.grid().width(), 10);
        assert_eq!(controller.grid().height(), 10);
        assert_eq!(controller.grid().position(), (0, 0));

        assert!(controller.configure(Setting::Speed(Speed::Custom(0))).is_err());
        assert_eq!(controller.speed(), Speed::Medium);

        assert!(controller.configure(Setting::Start { x: 99, y: 0 }).is_err());
        assert_eq!(controller.grid().position(), (0, 0));

        assert!(controller.configure(Setting::Food { x: -1, y: 0 }).is_err());
        assert!(controller.grid().food().is_empty());
    }

    #[test]
    fn when_wrapping_across_the_widest_grid_the_animation_still_converges() {
        let mut controller = fast_controller();
        let width = crate::grid::MAX_DIMENSION as i32;
        controller
            .configure(Setting::Dimensions { width, height: 1 })
            .unwrap();
        controller
            .configure(Setting::CellSize(CellSize::Large))
            .unwrap();
        controller
            .configure(Setting::Orientation(Orientation::West))
            .unwrap();

        controller.apply(Command::Move);
        let frames = (0..200).take_while(|_| !controller.tick()).count();

        assert_eq!(controller.grid().position(), (width as usize - 1, 0));
        assert!(frames < 200);
        assert!(controller.visual().is_near(controller.target()));
    }

    #[test]
    fn when_configuring_dimensions_beyond_the_limit_the_default_grid_is_used() {
        let mut controller = fast_controller();

        let result = controller.configure(Setting::Dimensions {
            width: 30_000_000,
            height: 1,
        });

        assert!(result.is_err());
        assert_eq!(controller.grid().width(), 10);
        controller.apply(Command::Move);
        assert!((0..200).any(|_| controller.tick()));
    }

    #[test]
    fn when_playing_a_command_it_is_drawn_every_frame_until_it_converges() {
        let renderer = CountingRenderer::default();
        let recorder = Recorder::default();
        let mut controller = AnimationController::new(Box::new(renderer.clone()))
            .with_logger(Box::new(recorder.clone()));
        controller.configure(Setting::Speed(Speed::Custom(1000))).unwrap();
        let cancel = CancellationToken::new();

        controller.play(Command::RotateRight, &cancel).unwrap();
        controller.play(Command::Move, &cancel).unwrap();

        assert!(controller.is_finished());
        let frames = recorder.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(*renderer.frames.lock().unwrap(), frames.iter().sum::<usize>());
    }

    #[test]
    fn when_the_renderer_fails_playback_carries_on() {
        let mut controller = AnimationController::new(Box::new(BrokenRenderer));
        controller.configure(Setting::Speed(Speed::Custom(1000))).unwrap();
        let cancel = CancellationToken::new();

        controller.play(Command::Move, &cancel).unwrap();

        assert!(controller.is_finished());
        assert_eq!(controller.grid().position(), (0, 9));
    }

    #[test]
    fn when_running_commands_are_applied_in_submission_order() {
        let recorder = Recorder::default();
        let controller = fast_controller().with_logger(Box::new(recorder.clone()));
        let (sender, receiver) = channel();
        let commands = vec![
            Command::Move,
            Command::RotateLeft,
            Command::Move,
            Command::Skip,
            Command::RotateRight,
            Command::RotateRight,
            Command::Move,
        ];
        for command in &commands {
            sender.submit(*command).unwrap();
        }
        drop(sender);

        let controller = controller.run(&receiver, &CancellationToken::new());

        assert_eq!(recorder.commands(), commands);
        assert_eq!(controller.applied(), commands.len());
        assert!(controller.is_finished());
    }

    #[test]
    fn when_running_settings_are_applied_in_order_with_the_commands() {
        let controller = fast_controller();
        let (sender, receiver) = channel();
        sender
            .configure(Setting::Dimensions {
                width: 3,
                height: 3,
            })
            .unwrap();
        sender.configure(Setting::Orientation(Orientation::East)).unwrap();
        sender.configure(Setting::Food { x: 1, y: 0 }).unwrap();
        sender.submit(Command::Move).unwrap();
        sender.configure(Setting::Food { x: 1, y: 0 }).unwrap();
        drop(sender);

        let controller = controller.run(&receiver, &CancellationToken::new());

        assert_eq!(controller.grid().position(), (1, 0));
        // Eaten by the move, then put back by the setting queued after it
        assert!(controller.grid().has_food(1, 0));
    }

    #[test]
    fn when_cancelled_while_animating_the_loop_exits_and_queued_commands_are_dropped() {
        let controller = AnimationController::new(Box::new(NoOpRenderer));
        let (sender, receiver) = channel();
        let cancel = CancellationToken::new();
        sender.configure(Setting::Speed(Speed::Low)).unwrap();
        sender.submit(Command::Move).unwrap();
        sender.submit(Command::Move).unwrap();
        sender.submit(Command::Move).unwrap();

        let stopper = cancel.clone();
        let playback = thread::spawn(move || {
            let controller = controller.run(&receiver, &cancel);
            (controller, receiver)
        });
        thread::sleep(Duration::from_millis(150));
        stopper.cancel();
        let (controller, receiver) = playback.join().unwrap();

        assert_eq!(controller.applied(), 1);
        assert_eq!(controller.grid().position(), (0, 9));
        assert_eq!(receiver.len(), 2);
    }
}
