/// Terminal front end: drives rotation over time and redraws a scene
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use facet3d_core::{FixedPoint3, RenderOptions, Scene, ViewAngles};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod demo;
pub mod renderer;

pub use demo::Demo;
pub use renderer::AsciiCanvas;

/// Degrees per key press.
const KEY_STEP: f32 = 5.0;

/// Runtime settings for [`TerminalApp`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub frame_rate: u32,
    /// Degrees added to each axis every frame while auto-rotation is on.
    pub auto_rotate: (f32, f32, f32),
    pub initial_angles: ViewAngles,
    pub render: RenderOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            auto_rotate: (0.5, 0.5, 0.5),
            initial_angles: ViewAngles::new(30.0, 20.0, 0.0),
            // Cells, not pixels.
            render: RenderOptions {
                margin: 2,
                marker_size: 2,
                ..RenderOptions::default()
            },
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    angles: ViewAngles,
    camera: FixedPoint3,
    config: AppConfig,
    canvas: AsciiCanvas,
    auto_rotate: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, config, width as usize, height as usize))
    }

    /// App drawing into a fixed `width` x `height` grid.
    pub fn with_size(scene: Scene, config: AppConfig, width: usize, height: usize) -> Self {
        Self {
            scene,
            angles: config.initial_angles,
            camera: FixedPoint3::origin(),
            canvas: AsciiCanvas::new(width, height),
            config,
            auto_rotate: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn angles(&self) -> ViewAngles {
        self.angles
    }

    pub fn canvas(&self) -> &AsciiCanvas {
        &self.canvas
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        info!("starting terminal renderer with {} faces", self.scene.len());
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("terminal renderer stopped");
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.frame_rate.max(1)));

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
                    Event::Resize(width, height) => {
                        debug!("resized to {width}x{height}");
                        self.canvas.resize(width as usize, height as usize);
                    }
                    _ => {}
                }
            }

            self.update();
            self.render_frame();
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.angles.rotate(KEY_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.angles.rotate(-KEY_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.angles.rotate(0.0, -KEY_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.angles.rotate(0.0, KEY_STEP, 0.0),
            KeyCode::Char('e') => self.angles.rotate(0.0, 0.0, KEY_STEP),
            KeyCode::Char('r') => self.angles.rotate(0.0, 0.0, -KEY_STEP),
            KeyCode::Char(' ') => {
                self.auto_rotate = !self.auto_rotate;
                debug!("auto-rotation {}", if self.auto_rotate { "on" } else { "off" });
            }
            _ => {}
        }
    }

    /// Advance the auto-rotation by one frame.
    pub fn update(&mut self) {
        if self.auto_rotate {
            let (dx, dy, dz) = self.config.auto_rotate;
            self.angles.rotate(dx, dy, dz);
        }
    }

    /// Render the scene at the current angles into the canvas.
    pub fn render_frame(&mut self) {
        let output = self.scene.render_with(
            &self.config.render,
            self.canvas.width() as i32,
            self.canvas.height() as i32,
            self.angles.rotation(),
            &self.camera,
        );
        match output {
            Some(output) => output.draw_on(&mut self.canvas),
            None => {
                let (w, h) = (self.canvas.width(), self.canvas.height());
                self.canvas.resize(w, h);
            }
        }
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Status line
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Facet3D | FPS: {:.1} | X {:.0} Y {:.0} Z {:.0} | WASD/Arrows=Rotate E/R=Roll Space=Auto Q=Quit",
                self.fps, self.angles.x, self.angles.y, self.angles.z
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
