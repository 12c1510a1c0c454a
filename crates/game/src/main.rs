//! Skyhop - arcade flying over a small decorated valley

mod config;
mod events;
mod hud;
mod map_store;
mod simulation;

use anyhow::Result;
use engine_core::{enable_shadows, AssetLoader, GltfLoader, Model, Time};
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use input::{ControlVector, InputState, TouchControls};
use procgen::{asset_url, LoadProgress, WorldPopulator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use view::{DeviceInfo, QualityProfile};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use config::GameConfig;
use hud::{window_title, Diagnostics, TimerDisplay};
use map_store::{MapSnapshot, MapStore};
use simulation::Simulation;

/// Model URLs are written relative to the loader root, like `./assets/models/x.glb`.
const ASSET_URL_BASE: &str = ".";
const AIRCRAFT_MODEL: &str = "assets/models/plane.glb";

/// Marks the entity whose model follows the simulated aircraft.
pub struct PlayerAircraft;

/// Window, scene and per-frame systems.
pub struct Game {
    window: Arc<Window>,
    world: World,
    time: Time,
    input: InputState,
    touch: TouchControls,
    /// Last cursor position; mouse presses land here.
    cursor: Vec2,
    simulation: Simulation,
    aircraft_entity: Entity,
    timer: TimerDisplay,
    diagnostics: Diagnostics,
    map_store: MapStore,
    running: bool,
}

impl Game {
    async fn new(window: Arc<Window>, config: GameConfig) -> Self {
        let size = window.inner_size();
        let quality = QualityProfile::detect(&detect_device(&window));
        let loader = GltfLoader::new(&config.asset_base);
        let mut world = World::new();
        let mut diagnostics = Diagnostics::new();
        let mut progress = LoadProgress::new();

        progress.expect(1);
        let aircraft_url = asset_url(ASSET_URL_BASE, AIRCRAFT_MODEL);
        let mut aircraft_model = match loader.load(&aircraft_url).await {
            Ok(model) => {
                progress.complete();
                model
            }
            Err(e) => {
                progress.fail();
                diagnostics.push(format!("{} not loaded: {}", aircraft_url, e));
                Model::placeholder_aircraft()
            }
        };
        enable_shadows(&mut aircraft_model, quality.shadows_enabled);

        let seed = config.world_seed.unwrap_or_else(rand::random);
        log::info!("World seed {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let populator = WorldPopulator {
            shadows_enabled: quality.shadows_enabled,
            ..Default::default()
        };
        let report = populator
            .populate(
                &mut world,
                &loader,
                config.ground_y,
                ASSET_URL_BASE,
                &mut rng,
                &mut progress,
            )
            .await;
        for failure in &report.failures {
            diagnostics.push(format!("{} not loaded: {}", failure.url, failure.reason));
        }
        log::info!(
            "World ready: {} decoration(s), {} of {} asset load(s) succeeded ({:.0}% settled)",
            report.spawned,
            progress.completed,
            progress.expected,
            progress.fraction() * 100.0
        );

        let mut simulation = Simulation::new(
            config.flight.clone(),
            config.chase.clone(),
            Vec3::ZERO,
            config.ground_y,
        );
        simulation.apply_quality(&quality);
        simulation.resize(size.width, size.height);

        aircraft_model.transform = simulation.state().aircraft.transform();
        let aircraft_entity = world.spawn((aircraft_model, PlayerAircraft));

        let mut time = Time::new();
        time.set_max_delta(config.flight.max_dt);

        Self {
            touch: TouchControls::new(size.width as f32, size.height as f32),
            cursor: Vec2::ZERO,
            window,
            world,
            time,
            input: InputState::new(),
            simulation,
            aircraft_entity,
            timer: TimerDisplay::new(),
            diagnostics,
            map_store: MapStore::in_current_dir(),
            running: true,
        }
    }

    /// One frame: clock, controls, flight and camera, then HUD.
    fn frame(&mut self) {
        self.time.update();
        let controls = ControlVector::gather(&self.input, &self.touch);
        let state = self.simulation.update(self.time.delta_seconds(), &controls);

        let pose = state.aircraft.transform();
        if let Ok(mut model) = self.world.get::<&mut Model>(self.aircraft_entity) {
            model.transform.position = pose.position;
            model.transform.rotation = pose.rotation;
        }

        if self.timer.update(self.time.elapsed_seconds()) {
            self.refresh_title();
        }
        self.input.begin_frame();
    }

    fn refresh_title(&self) {
        self.window
            .set_title(&window_title(&self.timer, self.time.fps(), &self.diagnostics));
    }

    fn save_map(&mut self) {
        let snapshot = MapSnapshot::capture(&self.world);
        if let Err(e) = self.map_store.save(&snapshot) {
            self.diagnostics.push(format!("Map save failed: {:#}", e));
            self.refresh_title();
        }
    }

    fn load_map(&mut self) {
        match self.map_store.load() {
            Ok(Some(snapshot)) => match snapshot.apply(&mut self.world) {
                Ok(applied) => log::info!("Loaded {} map item(s)", applied),
                Err(e) => self.diagnostics.push(format!("Map load failed: {:#}", e)),
            },
            Ok(None) => log::warn!("No saved map at {}", self.map_store.path().display()),
            Err(e) => self.diagnostics.push(format!("Map load failed: {:#}", e)),
        }
        self.refresh_title();
    }
}

fn detect_device(window: &Window) -> DeviceInfo {
    let defaults = DeviceInfo::default();
    let (screen_width, screen_height) = window
        .current_monitor()
        .map(|m| (m.size().width, m.size().height))
        .unwrap_or((defaults.screen_width, defaults.screen_height));
    DeviceInfo {
        touch_capable: cfg!(any(target_os = "android", target_os = "ios")),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
        screen_width,
        screen_height,
        device_pixel_ratio: window.scale_factor() as f32,
    }
}

struct App {
    game: Option<Game>,
}

impl App {
    fn new() -> Self {
        Self { game: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_none() {
            let config = GameConfig::load();
            if !GameConfig::exists() {
                config.save();
            }
            let mut window_attrs = Window::default_attributes()
                .with_title("Skyhop")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.game = Some(pollster::block_on(Game::new(window.clone(), config)));
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(game) = &mut self.game {
            if game.handle_window_event(event) || !game.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Skyhop controls:");
    println!("  W / Up        throttle      S / Down    brake");
    println!("  A D / arrows  turn          Space / Q   climb");
    println!("  Shift         boost");
    println!("  F5            save map      F9          load map");

    log::info!("Starting Skyhop");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
