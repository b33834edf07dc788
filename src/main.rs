//! Lane Rush entry point
//!
//! Handles platform-specific initialization and runs the frame loop. The
//! scene itself lives in the page's JS layer; this side owns simulation,
//! input, HUD text and persistence.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, TouchEvent};

    use lane_rush::api::ApiClient;
    use lane_rush::consts::*;
    use lane_rush::sim::{
        Direction, EffectKind, FrameEvents, GamePhase, GameState, InputIntent, SceneFrame,
        StatusPhase, tick,
    };
    use lane_rush::{PlayerProfile, Shop};

    /// Minimum swipe travel in CSS pixels
    const SWIPE_THRESHOLD: f32 = 30.0;

    // JS binding for the scene layer: the page owns meshes and the camera,
    // we hand it one JSON frame per animation frame.
    #[wasm_bindgen(inline_js = "
        export function scene_apply(json) {
            if (window.laneRushScene) {
                window.laneRushScene.apply(JSON.parse(json));
            }
        }

        export function scene_skin(jacket, trousers) {
            if (window.laneRushScene) {
                window.laneRushScene.setSkin(jacket, trousers);
            }
        }
    ")]
    extern "C" {
        fn scene_apply(json: &str);
        fn scene_skin(jacket: u32, trousers: u32);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        intent: InputIntent,
        accumulator: f32,
        last_time: f64,
        profile: PlayerProfile,
        shop: Shop,
        api: ApiClient,
        touch_start: Option<(f32, f32)>,
        // Track phase to run the game-over flow once
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                intent: InputIntent::new(),
                accumulator: 0.0,
                last_time: 0.0,
                profile: PlayerProfile::load(),
                shop: Shop::load(),
                api: ApiClient::default(),
                touch_start: None,
                last_phase: GamePhase::Start,
            }
        }

        /// Run simulation ticks on the fixed-step accumulator
        fn update(&mut self, dt: f32) -> FrameEvents {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut frame = FrameEvents::default();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                frame.absorb(tick(&mut self.state, &mut self.intent, SIM_DT));
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            if self.last_phase != GamePhase::GameOver && self.state.phase == GamePhase::GameOver {
                self.on_game_over();
            }
            self.last_phase = self.state.phase;

            frame
        }

        /// Ship the frame to the scene layer
        fn render(&self) {
            if let Ok(json) = serde_json::to_string(&SceneFrame::capture(&self.state)) {
                scene_apply(&json);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            set_text(document, "hud-score", &self.state.score.display_score().to_string());
            set_text(document, "hud-coins", &self.state.score.coins.to_string());
            set_text(document, "hud-best", &self.profile.best_score.to_string());

            let player = &self.state.player;
            set_bar(document, "buff-shield", player.shield_timer / SHIELD_DURATION);
            set_bar(document, "buff-magnet", player.magnet_timer / MAGNET_DURATION);
            set_bar(document, "buff-ward", player.ward_timer / WARD_DURATION);
            set_bar(
                document,
                "debuff-confusion",
                player.confusion_timer / CONFUSION_DURATION,
            );

            if let Some(el) = document.get_element_by_id("damage-flash") {
                let class = if self.state.flash.is_flashing() {
                    "flash active"
                } else {
                    "flash"
                };
                let _ = el.set_attribute("class", class);
            }

            // Screen visibility tracks the phase
            show_if(document, "start-screen", self.state.phase == GamePhase::Start);
            show_if(document, "hud", self.state.phase == GamePhase::Playing);
            show_if(document, "game-over", self.state.phase == GamePhase::GameOver);
            show_if(document, "pause-overlay", self.state.paused);
        }

        /// One-time transition work when a run ends
        fn on_game_over(&mut self) {
            let score = self.state.score.display_score();
            let new_best = self.profile.record_score(score);

            let document = web_sys::window().unwrap().document().unwrap();
            set_text(&document, "final-score", &score.to_string());
            set_text(&document, "final-coins", &self.state.score.coins.to_string());
            set_text(
                &document,
                "final-tax",
                &self.state.final_tax.unwrap_or(0).to_string(),
            );
            set_text(&document, "best-score", &self.profile.best_score.to_string());
            show_if(&document, "new-best", new_best);

            // Fire and forget; the panel fills in whenever the server answers
            let api = self.api.clone();
            let profile = self.profile.clone();
            let coins = self.state.score.coins;
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(rank) = api.submit_score(&profile, score, coins).await {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        set_text(&document, "final-rank", &format!("#{rank}"));
                    }
                }
                let entries = api.leaderboard(10).await;
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    render_leaderboard(&document, &entries);
                }
            });
        }

        /// Reset for a fresh run
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.state.start();
            self.intent.clear();
            self.accumulator = 0.0;
            self.last_phase = GamePhase::Playing;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Drive a timer bar; hidden entirely at zero
    fn set_bar(document: &Document, id: &str, fraction: f32) {
        if let Some(el) = document.get_element_by_id(id) {
            if fraction <= 0.0 {
                let _ = el.set_attribute("class", "status-bar hidden");
            } else {
                let _ = el.set_attribute("class", "status-bar");
                if let Ok(Some(fill)) = el.query_selector(".fill") {
                    let width = (fraction.clamp(0.0, 1.0) * 100.0).round();
                    let _ = fill.set_attribute("style", &format!("width:{width}%"));
                }
            }
        }
    }

    fn show_if(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if visible {
                let _ = el.class_list().remove_1("hidden");
            } else {
                let _ = el.class_list().add_1("hidden");
            }
        }
    }

    fn push_notification(document: &Document, text: &str, class: &str) {
        let Some(container) = document.get_element_by_id("notifications") else {
            return;
        };
        if let Ok(el) = document.create_element("div") {
            let _ = el.set_attribute("class", &format!("notice {class}"));
            el.set_text_content(Some(text));
            let _ = container.append_child(&el);
            // Keep the stack short; oldest notices fall off
            while container.child_element_count() > 4 {
                if let Some(first) = container.first_element_child() {
                    first.remove();
                }
            }
        }
    }

    fn announce(document: &Document, events: &FrameEvents) {
        for event in &events.status {
            let text = match (event.phase, event.effect) {
                (StatusPhase::Started, EffectKind::Shield) => "Shield up!",
                (StatusPhase::Started, EffectKind::Magnet) => "Coin magnet!",
                (StatusPhase::Started, EffectKind::Ward) => "Warded!",
                (StatusPhase::Started, EffectKind::Confusion) => "Controls scrambled!",
                (StatusPhase::Ended, EffectKind::Shield) => "Shield down",
                (StatusPhase::Ended, EffectKind::Magnet) => "Magnet faded",
                (StatusPhase::Ended, EffectKind::Ward) => "Ward spent",
                (StatusPhase::Ended, EffectKind::Confusion) => "Head clear",
            };
            let class = match event.phase {
                StatusPhase::Started => event.effect.as_str(),
                StatusPhase::Ended => "ended",
            };
            push_notification(document, text, class);
        }
    }

    fn render_leaderboard(document: &Document, entries: &[lane_rush::api::LeaderboardEntry]) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_text_content(None);
        for entry in entries {
            if let Ok(el) = document.create_element("li") {
                let social = if entry.social.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", entry.social)
                };
                el.set_text_content(Some(&format!(
                    "#{} {}{} - {}",
                    entry.rank, entry.name, social, entry.score
                )));
                let _ = list.append_child(&el);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let g = game.borrow();
            let skin = g.shop.equipped();
            scene_skin(skin.jacket, skin.trousers);

            // Registration is best-effort and never blocks startup
            let api = g.api.clone();
            let profile = g.profile.clone();
            wasm_bindgen_futures::spawn_local(async move {
                api.register(&profile).await;
            });
        }

        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_buttons(game.clone());
        setup_identity_form(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Lane Rush running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(direction) = map_code(&event.code()) else {
                    if event.code() == "Escape" {
                        let mut g = game.borrow_mut();
                        let paused = g.state.paused;
                        g.state.set_paused(!paused);
                    }
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.intent.press(direction);
                } else if g.state.phase == GamePhase::Start {
                    // Any movement key starts a run from the title
                    let seed = js_sys::Date::now() as u64;
                    g.restart(seed);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = map_code(&event.code()) {
                    game.borrow_mut().intent.release(direction);
                }
            });
            let _ = web_sys::window()
                .unwrap()
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn map_code(code: &str) -> Option<Direction> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Direction::Left),
            "ArrowRight" | "KeyD" => Some(Direction::Right),
            "ArrowUp" | "KeyW" | "Space" => Some(Direction::Up),
            "ArrowDown" | "KeyS" => Some(Direction::Down),
            _ => None,
        }
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().touch_start =
                        Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                let Some((start_x, start_y)) = g.touch_start.take() else {
                    return;
                };
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let dx = touch.client_x() as f32 - start_x;
                let dy = touch.client_y() as f32 - start_y;
                if dx.abs().max(dy.abs()) < SWIPE_THRESHOLD {
                    return;
                }
                let direction = if dx.abs() > dy.abs() {
                    if dx > 0.0 { Direction::Right } else { Direction::Left }
                } else if dy > 0.0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                if g.state.phase == GamePhase::Playing {
                    // A swipe is a short synthetic hold the frame loop expires
                    g.intent.press_transient(direction);
                } else if g.state.phase == GamePhase::Start {
                    let seed = js_sys::Date::now() as u64;
                    g.restart(seed);
                }
            });
            let _ = web_sys::window()
                .unwrap()
                .document()
                .unwrap()
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let seed = js_sys::Date::now() as u64;
                    game.borrow_mut().restart(seed);
                    log::info!("Run started with seed: {}", seed);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_identity_form(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("save-identity-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let name = input_value(&document, "player-name");
                let social = input_value(&document, "player-social");

                let mut g = game.borrow_mut();
                g.profile.set_identity(&name, &social);
                let api = g.api.clone();
                let profile = g.profile.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    api.register(&profile).await;
                });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    if g.state.phase == GamePhase::Playing {
                        g.state.set_paused(true);
                        log::info!("Auto-paused (tab hidden)");
                    }
                } else {
                    g.state.set_paused(false);
                    // Discard the hidden interval so it never becomes one
                    // giant dt
                    g.last_time = 0.0;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.state.set_paused(true);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.state.set_paused(false);
                g.last_time = 0.0;
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let events = g.update(dt);
            g.render();

            let document = web_sys::window().unwrap().document().unwrap();
            g.update_hud(&document);
            announce(&document, &events);
        }

        request_animation_frame(game);
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
    log::info!("Lane Rush (native) starting...");
    log::info!("The playable build is web-only - run with `trunk serve`");

    // Headless smoke run so the native binary still proves the sim out
    println!("\nRunning headless simulation...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use lane_rush::consts::SIM_DT;
    use lane_rush::sim::{Direction, GameState, InputIntent, tick};

    let mut state = GameState::new(0xC0FFEE);
    state.start();
    let mut intent = InputIntent::new();

    // Thirty simulated seconds of dodging left and right
    for frame in 0..(30.0 / SIM_DT) as u32 {
        if frame % 240 == 0 {
            intent.press_transient(if frame % 480 == 0 {
                Direction::Left
            } else {
                Direction::Right
            });
        }
        tick(&mut state, &mut intent, SIM_DT);
        if state.phase == lane_rush::sim::GamePhase::GameOver {
            break;
        }
    }

    println!(
        "✓ Headless run finished: score {} coins {} distance {:.0}",
        state.score.display_score(),
        state.score.coins,
        state.world.distance
    );
}
