use ant_animator::{AntAnimator, CellSize, Command, Orientation, Speed, TerminalRenderer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: i32 = 32;
const FOOD: usize = 32;
const COMMANDS: usize = 100;

struct RandomAnt {
    rng: StdRng,
}

impl RandomAnt {
    fn new(seed: u64) -> RandomAnt {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // Mostly walks, sometimes turns
    fn act(&mut self) -> Command {
        match self.rng.gen_range(0..10) {
            0 => Command::RotateLeft,
            1 => Command::RotateRight,
            _ => Command::Move,
        }
    }
}

fn main() {
    env_logger::init();

    let animator = match AntAnimator::start(Box::new(TerminalRenderer::new())) {
        Ok(animator) => animator,
        Err(e) => panic!("Error starting playback: {}", e),
    };
    let mut ant = RandomAnt::new(0);

    animator.set_speed(Speed::Medium).unwrap();
    animator.set_cell_size(CellSize::Small).unwrap();
    animator.set_grid_dimensions(SIZE, SIZE).unwrap();
    animator.set_start(0, 0).unwrap();
    animator.set_orientation(Orientation::South).unwrap();

    for _ in 0..FOOD {
        let x = ant.rng.gen_range(0..SIZE);
        let y = ant.rng.gen_range(0..SIZE);
        animator.add_food(x, y).unwrap();
    }

    for _ in 0..COMMANDS {
        animator.submit(ant.act()).unwrap();
    }

    if let Some(controller) = animator.close() {
        println!(
            "Ant ended at {:?} with {} food left",
            controller.grid().position(),
            controller.grid().food().len()
        );
    }
}
