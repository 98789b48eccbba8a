/// Example: Render path data as text in the terminal
///
/// Usage: cargo run --example path_text -- path/to/outline.txt
///
/// The file holds `M x,y`, `L x,y` and `Z` commands in millimeters.
use facet3d_core::{parse_path_data, ColorTag, Plane, Rgb, Scene, TextFlip};
use facet3d_terminal::{demo::LOGO_PATH, AppConfig, TerminalApp};
use std::env;
use std::fs;
use std::io;

fn main() -> io::Result<()> {
    let data = match env::args().nth(1) {
        Some(path) => {
            println!("Loading path data: {}", path);
            fs::read_to_string(&path).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Failed to read path data: {}", e),
                )
            })?
        }
        None => {
            eprintln!("No path data file provided, using the built-in logo...");
            LOGO_PATH.to_string()
        }
    };

    let path = parse_path_data(&data).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse path data: {}", e),
        )
    })?;

    let mut scene = Scene::new();
    let added = scene.text(
        ColorTag::Direct(Rgb::BLUE),
        &path,
        Plane::XY,
        TextFlip::NONE,
        0.0,
        0.0,
        0.0,
    );
    scene.text(
        ColorTag::Direct(Rgb::ORANGE),
        &path,
        Plane::XZ,
        TextFlip::NONE,
        0.0,
        0.0,
        0.0,
    );

    println!("Placed {} lines per plane", added);
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, AppConfig::default())?;
    app.run()
}
