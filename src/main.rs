//! Storm Survivor entry point
//!
//! Browser build: canvas, keyboard/mouse input, HUD, one tick per animation
//! frame. Native build: headless autopilot run that prints a JSON report.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use storm_survivor::renderer::{RenderState, scene};
    use storm_survivor::sim::{DebugCommand, GameState, TickInput, debug, tick};
    use storm_survivor::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        /// Input gathered by event callbacks, consumed by the next tick
        input: TickInput,
        /// Debug commands applied between ticks
        debug_queue: Vec<DebugCommand>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(width, height, Tuning::default(), seed),
                render_state: None,
                settings,
                input: TickInput::default(),
                debug_queue: Vec::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick. Returns false once the session is over.
        fn update(&mut self, time: f64) -> bool {
            for command in self.debug_queue.drain(..) {
                debug::apply(&mut self.state, command);
            }

            tick(&mut self.state, &self.input);
            self.input.clear_events();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
            if self.settings.show_fps && self.frame_index == 0 {
                log::info!("FPS: {}", self.fps);
            }

            !self.state.is_over()
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state.snapshot(), self.settings.quality);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.state.hud();

            if let Some(el) = document.get_element_by_id("health") {
                el.set_text_content(Some(&format!("{:.1}", hud.health.max(0.0))));
            }
            if let Some(el) = document.get_element_by_id("coins") {
                el.set_text_content(Some(&hud.coins.to_string()));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if hud.over {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Storm Survivor starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // The field is measured in CSS pixels so mouse offsets map directly
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let field = (client_w as f32, client_h as f32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(field.0, field.1, seed, settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, field).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Storm Survivor running!");
    }

    /// Map a key name to a held movement direction
    fn set_held(input: &mut TickInput, key: &str, down: bool) {
        match key {
            "w" | "arrowup" => input.held.up = down,
            "s" | "arrowdown" => input.held.down = down,
            "a" | "arrowleft" => input.held.left = down,
            "d" | "arrowright" => input.held.right = down,
            _ => {}
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: held movement plus one-shot actions
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key().to_lowercase();
                let mut g = game.borrow_mut();
                set_held(&mut g.input, &key, true);
                if event.repeat() {
                    return;
                }
                match key.as_str() {
                    "b" => g.input.build_walls += 1,
                    "c" if g.settings.debug_commands => {
                        let command = DebugCommand::grant_default(&g.state);
                        g.debug_queue.push(command);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key().to_lowercase();
                set_held(&mut game.borrow_mut().input, &key, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - shoot toward the cursor
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.shots.push(target);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            let running = g.update(time);
            g.render();
            g.update_hud();
            running
        };

        if running {
            request_animation_frame(game);
        } else {
            let g = game.borrow();
            log::info!(
                "Game Over - final score {} after {} ticks",
                g.state.player.score,
                g.state.time_ticks
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use storm_survivor::Tuning;
    use storm_survivor::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use storm_survivor::sim::{DebugCommand, GameState, TickInput, debug, tick};

    /// Hard stop for runs where the autopilot survives indefinitely
    const MAX_TICKS: u64 = 60 * 60 * 10;
    /// Autopilot fires once every this many ticks
    const FIRE_INTERVAL: u64 = 8;
    /// Autopilot builds a wall when an enemy gets this close
    const WALL_TRIGGER_DISTANCE: f32 = 120.0;

    /// Command-line options: `[seed] [tuning.json] [--debug-coins]`
    pub struct Options {
        pub seed: u64,
        pub tuning_path: Option<String>,
        pub debug_coins: bool,
    }

    impl Options {
        pub fn from_args(args: impl Iterator<Item = String>) -> Self {
            let mut options = Options {
                seed: 1,
                tuning_path: None,
                debug_coins: false,
            };
            for arg in args {
                if arg == "--debug-coins" {
                    options.debug_coins = true;
                } else if let Ok(seed) = arg.parse::<u64>() {
                    options.seed = seed;
                } else {
                    options.tuning_path = Some(arg);
                }
            }
            options
        }
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning {}: {}, using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}, using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Closest enemy to the player, if any
    fn nearest_enemy(state: &GameState) -> Option<Vec2> {
        let origin = state.player.pos;
        state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(origin)
                    .partial_cmp(&b.pos.distance_squared(origin))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos)
    }

    /// Scripted input: hold position, shoot the nearest enemy, wall up when
    /// the balance allows
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        if state.time_ticks % FIRE_INTERVAL == 0 {
            if let Some(target) = nearest_enemy(state) {
                input.shots.push(target);
            }
        }
        let threatened = nearest_enemy(state)
            .is_some_and(|pos| pos.distance(state.player.pos) < WALL_TRIGGER_DISTANCE);
        if threatened && state.player.coins >= state.tuning.wall_cost {
            input.build_walls = 1;
        }
        input
    }

    pub fn run(options: Options) {
        let tuning = load_tuning(options.tuning_path.as_deref());
        let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, tuning, options.seed);

        if options.debug_coins {
            let command = DebugCommand::grant_default(&state);
            debug::apply(&mut state, command);
        }

        while !state.is_over() && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input);
        }

        match serde_json::to_string_pretty(&state.hud()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize report: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Storm Survivor (native) starting headless run...");
    log::info!("Run with `trunk serve` for the playable web version");

    headless::run(headless::Options::from_args(std::env::args().skip(1)));
}
