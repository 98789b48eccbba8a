/// Facet3D Terminal Demo
///
/// Usage: facet3d-terminal [surface|pie|text]
/// Controls:
///   - WASD / Arrow Keys: Rotate
///   - E/R: Roll rotation
///   - Space: Toggle auto-rotation
///   - Q/ESC: Quit
use facet3d_terminal::{AppConfig, Demo, TerminalApp};
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let name = env::args().nth(1).unwrap_or_else(|| "surface".to_string());
    let demo = Demo::from_name(&name).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown demo '{name}', expected surface, pie or text"),
        )
    })?;

    println!("Facet3D Terminal Renderer - building {name} demo...");
    let scene = demo.build()?;

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, AppConfig::default())?;
    app.run()?;

    Ok(())
}
