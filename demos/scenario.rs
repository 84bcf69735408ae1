use ant_animator::{
    create_transition_logger, AnimationController, AntAnimator, Scenario, TerminalRenderer,
};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let scenario_file = args.next().unwrap_or_else(|| {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("demos/scenarios/walk.ant")
            .to_string_lossy()
            .into_owned()
    });
    let replay_filename = args.next();

    let scenario = match Scenario::load(&scenario_file) {
        Ok(scenario) => scenario,
        Err(e) => panic!("Error reading scenario {}: {}", scenario_file, e),
    };

    let controller = AnimationController::new(Box::new(TerminalRenderer::new()))
        .with_logger(create_transition_logger(replay_filename));
    let animator = match AntAnimator::with_controller(controller) {
        Ok(animator) => animator,
        Err(e) => panic!("Error starting playback: {}", e),
    };

    if let Err(e) = scenario.play(&animator) {
        panic!("Error queueing scenario: {}", e);
    }

    if let Some(controller) = animator.close() {
        println!(
            "Played {} commands, ant ended at {:?}",
            controller.applied(),
            controller.grid().position()
        );
    }
}
