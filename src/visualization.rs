//! Interactive 3D cube viewer using kiss3d.
//!
//! Every face key turns a layer of the cube; after each turn the net
//! permutation of the cube is printed in cycle notation.

use kiss3d::prelude::*;

use magicube::cube::{Cube, CubeError};
use magicube::cycles::render;
use magicube::matcher::Tolerance;
use magicube::moves::Face;

/// Returns the display color for a sticker color index (0-5).
///
/// Western scheme: white up, yellow down, orange left, red right, blue back,
/// green front.
fn sticker_color(color: usize) -> Color {
    match color {
        0 => Color::new(1.0, 1.0, 1.0, 1.0),   // white
        1 => Color::new(1.0, 0.81, 0.0, 1.0),  // yellow
        2 => Color::new(1.0, 0.44, 0.0, 1.0),  // orange
        3 => Color::new(0.81, 0.0, 0.0, 1.0),  // red
        4 => Color::new(0.68, 0.85, 0.9, 1.0), // light blue
        _ => Color::new(0.0, 0.62, 0.06, 1.0), // green
    }
}

/// Adds one thin box per sticker to the scene.
///
/// Stickers only come to rest on whole quarter turns, so each one lies flat on
/// the axis its centroid points along.
fn build_scene(scene: &mut SceneNode3d, cube: &Cube) -> Vec<SceneNode3d> {
    /// Thickness of a rendered sticker.
    const STICKER_DEPTH: f32 = 0.02;

    let sticker_width = 2.0 / cube.size() as f32 * 0.9;

    cube.facelets()
        .iter()
        .map(|facelet| {
            let [x, y, z] = facelet.centroid.map(|c| c as f32);
            let magnitude = [x.abs(), y.abs(), z.abs()];
            let normal_axis = (1..3).fold(0, |best, axis| {
                if magnitude[axis] > magnitude[best] {
                    axis
                } else {
                    best
                }
            });
            let mut extent = [sticker_width; 3];
            extent[normal_axis] = STICKER_DEPTH;

            scene
                .add_cube(extent[0], extent[1], extent[2])
                .set_color(sticker_color(facelet.color))
                .set_position(Vec3::new(x, y, z))
        })
        .collect()
}

fn face_for_key(key: kiss3d::event::Key) -> Option<Face> {
    use kiss3d::event::Key;
    match key {
        Key::U => Some(Face::U),
        Key::D => Some(Face::D),
        Key::L => Some(Face::L),
        Key::R => Some(Face::R),
        Key::F => Some(Face::F),
        Key::B => Some(Face::B),
        _ => None,
    }
}

fn title(layer: usize, clockwise: bool) -> String {
    format!(
        "Layer {layer}, {} - [U/D/L/R/F/B] turn, [Up/Down] layer, [Left/Right] direction, [S] solve",
        if clockwise { "clockwise" } else { "counter-clockwise" }
    )
}

/// Prints the permutation the cube has undergone since it was solved.
fn print_state(cube: &Cube, tolerance: Tolerance) {
    match cube.state(tolerance) {
        Some(permutation) => {
            println!("{} = {}", render(&permutation, &cube.space()), permutation)
        }
        None => eprintln!("Cube state could not be matched against a solved cube"),
    }
}

/// Opens an interactive viewer on a fresh NxNxN cube.
pub fn display(size: usize, tolerance: Tolerance) -> Result<(), CubeError> {
    let cube = Cube::new(size)?;
    pollster::block_on(display_async(cube, tolerance));
    Ok(())
}

async fn display_async(mut cube: Cube, tolerance: Tolerance) {
    let mut layer = 0;
    let mut clockwise = true;

    let mut window = Window::new(&title(layer, clockwise)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(6.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));
    // body
    scene
        .add_cube(1.98, 1.98, 1.98)
        .set_color(Color::new(0.05, 0.05, 0.05, 1.0));

    let mut sticker_nodes = build_scene(&mut scene, &cube);
    // whether the stickers need to be rebuilt (after a turn)
    let mut needs_rebuild = false;
    let mut needs_retitle = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action != Action::Press {
                    continue;
                }
                if let Some(face) = face_for_key(key) {
                    let turns = if clockwise { 1.0 } else { -1.0 };
                    if let Err(error) = cube.rotate_face(face, turns, layer) {
                        eprintln!("{error}");
                        continue;
                    }
                    print_state(&cube, tolerance);
                    needs_rebuild = true;
                    continue;
                }
                match key {
                    Key::Up => layer = (layer + 1).min(cube.size() - 1),
                    Key::Down => layer = layer.saturating_sub(1),
                    Key::Left => clockwise = false,
                    Key::Right => clockwise = true,
                    Key::S => {
                        cube.solve();
                        needs_rebuild = true;
                    }
                    _ => {}
                }
                needs_retitle = true;
            }
        }

        if needs_retitle {
            window.set_title(&title(layer, clockwise));
            needs_retitle = false;
        }

        if needs_rebuild {
            for mut node in sticker_nodes.drain(..) {
                node.remove();
            }
            sticker_nodes = build_scene(&mut scene, &cube);
            needs_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
