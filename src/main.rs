//! RPS Arena entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement};

    use rps_arena::config::parse_count;
    use rps_arena::{ConfigError, SimConfig};
    use rps_arena::renderer::canvas::{CanvasSurface, load_sprites};
    use rps_arena::renderer::{Renderer, Skin, Sprites};
    use rps_arena::sim::{Arena, RunSummary, RunToken, Simulation, TickOutcome};

    /// Everything the page needs between frames
    struct App {
        sim: Simulation,
        surface: CanvasSurface,
        sprites: Sprites<HtmlImageElement>,
        skin: Skin<HtmlImageElement>,
        arena: Arena,
        /// Pending requestAnimationFrame handle
        frame: Option<i32>,
    }

    impl App {
        /// Cancel the pending frame and clear the world
        fn reset(&mut self) {
            if let Some(handle) = self.frame.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
            self.sim.reset();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("RPS Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Arena fills the window
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let arena = Arena::new(width as f32, height as f32);

        let surface = CanvasSurface::new(&canvas).expect("Failed to get 2d context");
        let sprites = load_sprites();
        let app = Rc::new(RefCell::new(App {
            sim: Simulation::new(arena),
            surface,
            sprites: sprites.clone(),
            skin: Skin::Sprites(sprites),
            arena,
            frame: None,
        }));

        setup_start_button(app.clone());
        setup_reset_button(app);

        log::info!("RPS Arena ready ({}x{})", width, height);
    }

    /// Read the preferences form. Blank fields keep their defaults; counts
    /// that are not whole non-negative numbers are rejected.
    fn read_config(document: &Document) -> Result<SimConfig, ConfigError> {
        let mut config = SimConfig::default();
        if let Some(n) = input_count(document, "num-rock")? {
            config.num_rock = n;
        }
        if let Some(n) = input_count(document, "num-paper")? {
            config.num_paper = n;
        }
        if let Some(n) = input_count(document, "num-scissors")? {
            config.num_scissors = n;
        }
        if let Some(v) = input_value(document, "size") {
            config.size = v;
        }
        config.velocity_x = input_value(document, "velocity-x");
        config.velocity_y = input_value(document, "velocity-y");
        config.bounce_on_collision = input(document, "bounce")
            .map(|el| el.checked())
            .unwrap_or(false);
        Ok(config)
    }

    fn input(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn input_count(document: &Document, id: &str) -> Result<Option<u32>, ConfigError> {
        match input(document, id) {
            Some(el) => parse_count(&el.value()),
            None => Ok(None),
        }
    }

    fn input_value(document: &Document, id: &str) -> Option<f32> {
        input(document, id)?.value().trim().parse().ok()
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.prevent_default();
                let document = web_sys::window().unwrap().document().unwrap();
                let seed = js_sys::Date::now() as u64;
                let shapes = input(&document, "shapes")
                    .map(|el| el.checked())
                    .unwrap_or(false);

                let started = read_config(&document).and_then(|config| {
                    let mut a = app.borrow_mut();
                    a.reset();
                    a.skin = if shapes {
                        Skin::Shapes
                    } else {
                        Skin::Sprites(a.sprites.clone())
                    };
                    let arena = a.arena;
                    a.sim.start(&config, arena, seed)
                });

                match started {
                    Ok(token) => {
                        set_visible(&document, "config-error", false);
                        set_visible(&document, "start-screen", false);
                        set_visible(&document, "end-screen", false);
                        request_frame(app.clone(), token);
                    }
                    Err(e) => {
                        log::warn!("Rejected preferences: {}", e);
                        set_text(&document, "config-error", &e.to_string());
                        set_visible(&document, "config-error", true);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().reset();

                let document = web_sys::window().unwrap().document().unwrap();
                set_visible(&document, "end-screen", false);
                set_visible(&document, "start-screen", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_frame(app: Rc<RefCell<App>>, token: RunToken) {
        let window = web_sys::window().unwrap();
        let frame_app = app.clone();
        let closure = Closure::once(move |_time: f64| {
            frame(frame_app, token);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().frame = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, token: RunToken) {
        let outcome = {
            let mut a = app.borrow_mut();
            a.frame = None;
            let App {
                sim, surface, skin, ..
            } = &mut *a;
            let mut renderer = Renderer::new(surface, skin);
            sim.tick(token, &mut renderer)
        };

        match outcome {
            TickOutcome::Continue => request_frame(app, token),
            TickOutcome::Converged(summary) => show_results(&summary),
            TickOutcome::Stale => log::debug!("Dropped stale frame"),
        }
    }

    fn show_results(summary: &RunSummary) {
        let document = web_sys::window().unwrap().document().unwrap();
        set_text(&document, "winner", summary.winner_name());
        set_text(&document, "collision-count", &summary.collisions.to_string());
        set_visible(&document, "end-screen", true);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};

    use rps_arena::SimConfig;
    use rps_arena::consts::{HEADLESS_HEIGHT, HEADLESS_WIDTH, MAX_TICKS};
    use rps_arena::renderer::{RecordingSurface, Renderer, Skin};
    use rps_arena::sim::{Arena, Simulation, TickOutcome};

    /// Read a JSON preferences file
    pub fn load_config(path: &str) -> Result<SimConfig> {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        SimConfig::from_json(&json).with_context(|| format!("parsing {path}"))
    }

    pub fn parse_seed(arg: &str) -> Result<u64> {
        arg.parse()
            .with_context(|| format!("seed argument {arg:?} is not an unsigned integer"))
    }

    /// `rps-arena [config.json] [seed]`
    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);

        let config = match args.next() {
            Some(path) => load_config(&path)?,
            None => SimConfig::default(),
        };
        let seed = match args.next() {
            Some(seed) => parse_seed(&seed)?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock before unix epoch")?
                .as_nanos() as u64,
        };

        let arena = Arena::new(HEADLESS_WIDTH, HEADLESS_HEIGHT);
        let mut sim = Simulation::new(arena);
        let token = sim
            .start(&config, arena, seed)
            .with_context(|| format!("starting run in {HEADLESS_WIDTH}x{HEADLESS_HEIGHT} arena"))?;

        let skin = Skin::Shapes;
        let mut surface = RecordingSurface::default();
        for _ in 0..MAX_TICKS {
            surface.clear();
            let outcome = sim.tick(token, &mut Renderer::new(&mut surface, &skin));
            log::debug!(
                "tick {}: census {:?}, {} items painted",
                sim.world().ticks,
                sim.world().census(),
                surface.items_painted()
            );

            match outcome {
                TickOutcome::Continue => {}
                TickOutcome::Converged(summary) => {
                    let winner = if summary.winner.is_some() {
                        summary.winner_name()
                    } else {
                        "nobody"
                    };
                    println!(
                        "winner: {} ({} collisions, {} ticks, seed {})",
                        winner, summary.collisions, summary.ticks, seed
                    );
                    return Ok(());
                }
                TickOutcome::Stale => break,
            }
        }

        log::warn!("Gave up after {} ticks", MAX_TICKS);
        println!(
            "no winner after {} ticks: census {:?} (seed {})",
            MAX_TICKS,
            sim.world().census(),
            seed
        );
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("RPS Arena (native) starting headless run...");

    if let Err(e) = headless::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
