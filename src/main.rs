use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use rat_hunt::assets::{AssetId, Assets, Sprite};
use rat_hunt::camera::Camera;
use rat_hunt::config::Config;
use rat_hunt::input::{InputState, InputTuning};
use rat_hunt::map::OccupancyGrid;
use rat_hunt::projector::DrawSpan;
use rat_hunt::renderer::{self, Palette};
use rat_hunt::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use rat_hunt::world::World;

const MAX_FRAME_DT: Duration = Duration::from_millis(100);

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,
    assets: Assets,
    palette: Palette,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal framebuffer, one ray per column
    fb: Vec<u32>,
    fb_w: usize,
    fb_h: usize,
    spans: Vec<DrawSpan>,

    scale_lut: ScaleLut,

    // Input and timing
    input: InputState,
    tuning: InputTuning,
    last_tick: Instant,

    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(world: World, assets: Assets, config: &Config) -> Self {
        Self {
            window: None,
            surface: None,
            world,
            assets,
            palette: Palette::default(),

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb: vec![0; config.width * config.height],
            fb_w: config.width,
            fb_h: config.height,
            spans: Vec::with_capacity(config.width),

            scale_lut: ScaleLut::empty(),

            input: InputState::default(),
            tuning: config.input_tuning(),
            last_tick: Instant::now(),

            fatal: None,
        }
    }

    /// Stops the loop; `main` returns the error, which reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Rat Hunt")
            .with_inner_size(LogicalSize::new(self.fb_w as f64, self.fb_h as f64));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("creating window: {e}"))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("creating softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("creating softbuffer surface: {e}"))?;

        // relative mouse look
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            warn!("cursor grab unavailable, mouse look may drift: {err}");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        self.scale_lut = build_scale_lut(
            size.width as usize,
            size.height as usize,
            self.fb_w,
            self.fb_h,
        );

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(MAX_FRAME_DT);
        self.last_tick = now;
        let dt_s = dt.as_secs_f64();

        let frame = self.input.frame_input(&self.tuning, dt_s);
        self.world.advance(&frame, dt_s);
    }

    fn draw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);

        surface
            .resize(nw, nh)
            .map_err(|e| anyhow!("resizing surface: {e}"))?;

        self.world.compose_frame(&mut self.spans, self.fb_w, self.fb_h);
        renderer::render_frame(&mut self.fb, self.fb_w, self.fb_h, &self.spans, &self.palette);
        if let Some(weapon) = self.assets.get(AssetId::Weapon) {
            renderer::draw_overlay(&mut self.fb, self.fb_w, self.fb_h, weapon);
        }

        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.fb_w, self.fb_h);
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("acquiring surface buffer: {e}"))?;
        blit_nearest_stretch(&mut buf, dw, &self.fb, self.fb_w, &self.scale_lut);
        buf.present().map_err(|e| anyhow!("presenting frame: {e}"))?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let [x, y] = self.world.camera.pos;
            let fps = self.frame_counter as f32 / elapsed;
            debug!(
                fps,
                x,
                y,
                angle = self.world.camera.angle(),
                "frame stats"
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        self.last_tick = Instant::now();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    info!("escape pressed; stopping");
                    event_loop.exit();
                    return;
                }
                self.input.key(code, state);
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(err) = self.draw(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.scale_lut = build_scale_lut(
                    new_size.width as usize,
                    new_size.height as usize,
                    self.fb_w,
                    self.fb_h,
                );
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, _) } = event {
            self.input.mouse_motion(dx);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    config.validate()?;

    let grid = OccupancyGrid::load(&config.map)
        .with_context(|| format!("loading map {}", config.map.display()))?;
    let spawn = grid
        .spawn_point(config.spawn)
        .context("map has no open cell to spawn in")?;
    if spawn != config.spawn {
        warn!(
            requested = ?config.spawn,
            using = ?spawn,
            "spawn point is blocked; using first open cell"
        );
    }

    let camera = Camera::new(spawn, 0.0, config.half_fov_scale());
    info!(
        map = %config.map.display(),
        width = grid.width(),
        height = grid.height(),
        fov_deg = camera.fov_degrees(),
        "map loaded"
    );

    let mut assets = Assets::default();
    if let Some(path) = &config.weapon {
        assets.insert(AssetId::Weapon, Sprite::load(path)?);
    }

    let world = World::new(grid, camera, config.move_speed);
    let mut app = App::new(world, assets, &config);

    let event_loop = EventLoop::new().map_err(|e| anyhow!("creating event loop: {e}"))?;
    // Continuous redraws, this is a game loop
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop: {e}"))?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
