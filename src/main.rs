use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

use mchibernate::ticker::{ClockTicker, Ticker};
use mchibernate::world::Server;
use mchibernate::{command, ChunkPos, EntityKind, Hibernator};

/// A small world to watch the sweep work on: one player near the origin and
/// a 17x17 grid of loaded chunks, each with a monster, an animal and a drop.
fn demo_server() -> Server {
    let mut server = Server::new();
    let world = server.add_world("overworld");
    world.add_player("steve", (8.0, 64.0, 8.0));
    for x in -8..=8 {
        for z in -8..=8 {
            let chunk = ChunkPos::new(x, z);
            world.load_chunk(chunk);
            for kind in [EntityKind::Monster, EntityKind::Animal, EntityKind::Item] {
                world.spawn(chunk, kind);
            }
        }
    }
    server
}

fn main() {
    env_logger::init();
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| "hibernate.properties".into());

    let hibernator = Rc::new(RefCell::new(Hibernator::new(path)));
    let server = Rc::new(RefCell::new(demo_server()));

    // stdin lines become commands, handled on the tick thread so they can
    // never race a sweep
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { return };
            if tx.send(line).is_err() {
                return;
            }
        }
    });

    let interval = hibernator.borrow().settings().interval_ticks();
    let mut wander = 0.0;
    let mut ticker = ClockTicker::new();
    ticker.start(
        interval,
        Box::new(move || {
            while let Ok(line) = rx.try_recv() {
                let args: Vec<&str> = line.split_whitespace().collect();
                println!("{}", command::dispatch(&args, &mut hibernator.borrow_mut()));
            }
            // the demo player drifts east so fresh chunks fall out of range
            wander += 32.0;
            let mut server = server.borrow_mut();
            server
                .world_mut("overworld")
                .expect("demo world exists")
                .move_player("steve", (8.0 + wander, 64.0, 8.0));
            hibernator.borrow().sweep_all(&mut *server);
        }),
    );
    log::info!("sweeping every {interval} ticks; type `reload` to re-read settings");
    ticker.run();
}
