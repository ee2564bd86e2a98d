//! Plinko entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement};

    use plinko::consts::*;
    use plinko::renderer::{CanvasSurface, draw_frame};
    use plinko::{HudSink, HudSync, Settings, Simulation};

    /// DOM elements the HUD writes to
    struct DomHud {
        money: Option<Element>,
        spawn_button: Option<HtmlButtonElement>,
        score_boxes: Vec<Element>,
    }

    impl DomHud {
        fn new(document: &Document) -> Self {
            Self {
                money: document.get_element_by_id("money"),
                spawn_button: document
                    .get_element_by_id("spawn-ball")
                    .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()),
                score_boxes: score_boxes(document),
            }
        }
    }

    impl HudSink for DomHud {
        fn set_balance_text(&mut self, text: &str) {
            if let Some(el) = &self.money {
                el.set_text_content(Some(text));
            }
        }

        fn set_slot_active(&mut self, index: usize, active: bool) {
            if let Some(el) = self.score_boxes.get(index) {
                let classes = el.class_list();
                let _ = if active {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        }

        fn set_spawn_enabled(&mut self, enabled: bool) {
            if let Some(btn) = &self.spawn_button {
                btn.set_disabled(!enabled);
            }
        }
    }

    /// Every `.score-box` element in document order
    fn score_boxes(document: &Document) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(".score-box") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Slot multipliers from `data-multiplier` attributes
    fn read_multipliers(boxes: &[Element]) -> Vec<f64> {
        boxes
            .iter()
            .map(|el| {
                el.get_attribute("data-multiplier")
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        surface: CanvasSurface,
        hud: HudSync,
        dom: DomHud,
        last_time: f64,
    }

    impl Game {
        fn sync_hud(&mut self) {
            self.hud.sync(self.sim.state(), &mut self.dom);
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            self.last_time = time;

            self.sim.advance(dt);
            for event in self.sim.drain_events() {
                log::debug!("{:?}", event);
            }
            draw_frame(self.sim.state(), &mut self.surface);
            self.sync_hud();
        }
    }

    /// Board settings sized to the canvas, with the page's slot multipliers
    fn load_settings(canvas: &HtmlCanvasElement, boxes: &[Element]) -> Settings {
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        let mut settings = Settings::default().with_board_size(width, height);
        settings.seed = js_sys::Date::now() as u64;

        let multipliers = read_multipliers(boxes);
        if !multipliers.is_empty() {
            settings = settings.with_multipliers(multipliers);
        }

        match settings.validate() {
            Ok(()) => {
                log::info!("Loaded {} slots from page", settings.slot_count());
                settings
            }
            Err(e) => {
                log::error!("Page settings rejected ({}), using defaults", e);
                let sized = Settings {
                    seed: settings.seed,
                    ..Settings::default().with_board_size(width, height)
                };
                if sized.validate().is_ok() {
                    sized
                } else {
                    // Canvas too small for the default peg field
                    Settings {
                        seed: settings.seed,
                        ..Settings::default()
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Plinko starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("plinko-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas #plinko-canvas not found");
            return;
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let dom = DomHud::new(&document);
        let settings = load_settings(&canvas, &dom.score_boxes);
        let sim = match Simulation::new(settings) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Failed to build board: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            sim,
            surface,
            hud: HudSync::new(),
            dom,
            last_time: 0.0,
        }));
        game.borrow_mut().sync_hud();

        setup_spawn_button(&document, game.clone());
        request_animation_frame(game);
    }

    fn setup_spawn_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("spawn-ball") else {
            log::warn!("Spawn button #spawn-ball not found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            if g.sim.request_spawn() {
                log::debug!("Ball dropped, balance {}", g.sim.balance());
            }
            g.sync_hud();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Plinko (native) starting...");
    log::info!("Browser build runs with `trunk serve`; native runs a headless session");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| plinko::Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => plinko::Settings::default(),
    };

    if let Err(e) = headless_session(settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Drop a ball every half second for a minute of simulated time, printing
/// each event as a JSON line
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(settings: plinko::Settings) -> Result<(), plinko::SettingsError> {
    use plinko::Simulation;
    use plinko::consts::FRAME_DT;

    let mut sim = Simulation::new(settings)?;
    let frames = (60.0 / FRAME_DT) as u32;
    for frame in 0..frames {
        if frame % 30 == 0 && sim.can_spawn() {
            sim.queue_spawn();
        }
        sim.step();
        print_events(&mut sim);
    }

    // Let the balls still on the board land and pay out
    for _ in 0..frames {
        if sim.ball_count() == 0 {
            break;
        }
        sim.step();
        print_events(&mut sim);
    }
    if sim.ball_count() > 0 {
        log::warn!("{} balls still on the board", sim.ball_count());
    }

    let stats = sim.state().stats;
    log::info!(
        "Session over: {} balls, wagered {}, won {}, balance {}",
        stats.balls_dropped,
        stats.total_wagered,
        stats.total_won,
        sim.balance()
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_events(sim: &mut plinko::Simulation) {
    for event in sim.drain_events() {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Could not encode event: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
