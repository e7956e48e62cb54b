use std::sync::Arc;
use std::thread;
use std::time::Duration;

use train_sim::{
    parse_map, CellCoord, Heading, Simulation, SnapshotBuffer, TrainAttributes, TrainStatus,
};

/// A small demo loop with a sensor on the southern straight.
const DEMO_MAP: &str = "\
+------------+
|............|
|............|
+-----s------+
";

fn main() {
    env_logger::init();

    let grid = parse_map(DEMO_MAP).expect("demo map is well-formed");
    let mut sim = Simulation::new(grid);
    let train = sim.add_train(
        &TrainAttributes::default(),
        CellCoord::new(6, 0),
        Heading::East,
    );
    sim.set_train_accelerating(train, true);

    let buffer = SnapshotBuffer::new();
    buffer.publish(sim.snapshot());

    // Simulation loop: 1 tick per second, publishing a snapshot
    // after each tick.
    let sim_buffer = buffer.clone();
    thread::spawn(move || loop {
        sim.tick();
        sim_buffer.publish(sim.snapshot());
        thread::sleep(Duration::from_secs(1));
    });

    // Reader loop: polls the latest snapshot at a higher rate and
    // reports once per new tick.
    let mut last_tick = u64::MAX;
    loop {
        let world: Arc<_> = buffer.latest();
        if world.tick != last_tick {
            last_tick = world.tick;
            for train in &world.trains {
                let status = match train.status {
                    TrainStatus::Ok => "ok",
                    TrainStatus::Crashed => "crashed",
                };
                println!(
                    "tick {:>4}  train {:?}  head ({}, {})  speed {:.1}  {}",
                    world.tick,
                    train.id,
                    train.body[0].x,
                    train.body[0].y,
                    train.speed,
                    status,
                );
            }
            let occupied = world
                .sensors
                .iter()
                .filter(|(_, occupied)| **occupied)
                .count();
            println!("           sensors occupied: {}/{}", occupied, world.sensors.len());
        }
        thread::sleep(Duration::from_millis(50));
    }
}
