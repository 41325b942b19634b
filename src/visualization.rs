//! 3D visualization of face turns using kiss3d.

use std::time::Instant;

use kiss3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubeturn::cube::Cube;
use cubeturn::{AnimatorConfig, Direction, Face, FaceTurnAnimator, Move, Scramble, ScrambleRunner};

/// Opening sequence played when the binary runs without a subcommand.
pub const INTRO_SEQUENCE: &str = "L'R'UDFBL'R'";

/// Moves queued by the `N` key.
const EXTRA_SCRAMBLE_LEN: usize = 20;

/// Size of each rendered cube (slightly smaller than the spacing for visible gaps).
const CUBE_SIZE: f32 = 1.0;

/// Returns the display color of a block from its home coordinate.
///
/// Each axis drives one color channel, so a solved cube shows a smooth
/// gradient and every displaced block stands out.
fn block_color((x, y, z): (i32, i32, i32)) -> Color {
    let channel = |value: i32| 0.2 + 0.4 * value as f32;
    Color::new(channel(x), channel(y), channel(z), 1.0)
}

/// Builds one scene node per block, in block id order.
fn build_scene(scene: &mut SceneNode3d, cube: &Cube) -> Vec<SceneNode3d> {
    cube.blocks()
        .iter()
        .map(|block| {
            scene
                .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .set_color(block_color(block.home))
        })
        .collect()
}

/// Overwrites every node's position and rotation with the live block transform.
fn sync_scene(nodes: &mut [SceneNode3d], cube: &Cube) {
    for (node, block) in nodes.iter_mut().zip(cube.blocks()) {
        let p = block.position;
        let q = block.rotation;
        node.set_position(Vec3::new(p.x, p.y, p.z));
        node.set_rotation(Quat::from_xyzw(q.x, q.y, q.z, q.w));
    }
}

fn key_face(key: kiss3d::event::Key) -> Option<Face> {
    use kiss3d::event::Key;
    match key {
        Key::L => Some(Face::Left),
        Key::R => Some(Face::Right),
        Key::U => Some(Face::Up),
        Key::D => Some(Face::Down),
        Key::F => Some(Face::Front),
        Key::B => Some(Face::Back),
        _ => None,
    }
}

/// Plays a scramble in an interactive 3D viewer.
pub fn display(config: AnimatorConfig, scramble: Scramble) {
    pollster::block_on(display_async(config, scramble));
}

async fn display_async(config: AnimatorConfig, scramble: Scramble) {
    let mut animator = match FaceTurnAnimator::new(config) {
        Ok(animator) => animator,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let mut runner = ScrambleRunner::new(&scramble);
    let mut rng = StdRng::from_entropy();

    let mut window = Window::new("cubeturn").await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(10.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut nodes = build_scene(&mut scene, animator.cube());
    sync_scene(&mut nodes, animator.cube());

    let mut paused = false;
    let mut last_frame = Instant::now();
    let mut shown_progress = None;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, modifiers) = event.value {
                use kiss3d::event::{Action, Key, Modifiers};
                if action != Action::Press {
                    continue;
                }
                if let Some(face) = key_face(key) {
                    let direction = if modifiers.contains(Modifiers::Shift) {
                        Direction::CounterClockwise
                    } else {
                        Direction::Clockwise
                    };
                    runner.push(Move::new(face, direction));
                    continue;
                }
                match key {
                    Key::Space => paused = !paused,
                    Key::N => {
                        for &mv in Scramble::random(EXTRA_SCRAMBLE_LEN, &mut rng).moves() {
                            runner.push(mv);
                        }
                    }
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        let frames = if paused {
            0.0
        } else {
            (now - last_frame).as_secs_f32() * config.frame_rate
        };
        last_frame = now;

        match runner.tick(&mut animator, frames) {
            Ok(progress) => {
                if shown_progress != Some(progress) {
                    let current = runner
                        .current_move()
                        .map_or_else(|| "idle".to_string(), |mv| mv.to_string());
                    window.set_title(&format!(
                        "Move {}/{} - {} - [LRUDFB] turn, [Shift] reverse, [N] scramble, [Space] pause",
                        progress.completed, progress.total, current
                    ));
                    shown_progress = Some(progress);
                }
            }
            Err(e) => log::warn!("{e}"),
        }

        sync_scene(&mut nodes, animator.cube());

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
