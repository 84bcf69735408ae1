use ant_animator::{AntAnimator, CellSize, Orientation, Speed, TerminalRenderer};

fn main() {
    env_logger::init();

    let animator = match AntAnimator::start(Box::new(TerminalRenderer::new())) {
        Ok(animator) => animator,
        Err(e) => panic!("Error starting playback: {}", e),
    };

    animator.set_speed(Speed::Low).unwrap();
    animator.set_grid_dimensions(1, 1).unwrap();
    animator.set_cell_size(CellSize::Large).unwrap();
    animator.set_start(0, 0).unwrap();
    animator.set_orientation(Orientation::South).unwrap();

    for _ in 0..7 {
        animator.rotate_right().unwrap();
    }

    if let Some(controller) = animator.close() {
        println!("Ant is facing {:?}", controller.grid().orientation());
    }
}
