//! Afureru entry point
//!
//! Browser: canvas 2D render sink, keyboard input, frame loop and spawn
//! interval. Native: a headless auto-typing demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use afureru::consts::*;
    use afureru::highscores::LocalStorageHighScoreStore;
    use afureru::render::{FrameSnapshot, RenderSink, css_color};
    use afureru::sim::{GameEvent, GameSession, KeyInput, SessionPhase, tick};
    use afureru::Settings;

    /// Draws frames onto a 2D canvas
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        /// Remaining frames of the score pulse
        pulse_frames: u32,
    }

    impl CanvasSink {
        fn draw_block(&self, sprite: &afureru::render::BlockSprite) {
            let ctx = &self.ctx;
            let half = sprite.size / 2.0;
            ctx.save();
            let _ = ctx.translate(sprite.pos.x as f64, sprite.pos.y as f64);
            let _ = ctx.rotate(sprite.rotation as f64);
            ctx.set_fill_style_str(&css_color(sprite.color));
            ctx.set_shadow_color("darkblue");
            ctx.set_shadow_blur(10.0);
            ctx.fill_rect(-half as f64, -half as f64, sprite.size as f64, sprite.size as f64);
            ctx.set_shadow_blur(0.0);
            ctx.set_fill_style_str("black");
            ctx.set_font(&format!("{}px sans-serif", (sprite.size * 0.8) as u32));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let _ = ctx.fill_text(&sprite.kana, 0.0, 0.0);
            ctx.restore();
        }
    }

    impl RenderSink for CanvasSink {
        fn draw(&mut self, frame: &FrameSnapshot) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, PLAY_WIDTH as f64, PLAY_HEIGHT as f64);

            // Cup outline and chamfers
            ctx.set_stroke_style_str("white");
            ctx.set_line_width(CUP_WALL_THICKNESS as f64);
            ctx.begin_path();
            let [first, rest @ ..] = frame.cup_outline;
            ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            ctx.stroke();
            ctx.set_fill_style_str("white");
            for [a, b, c] in frame.cup_chamfers {
                ctx.begin_path();
                ctx.move_to(a.x as f64, a.y as f64);
                ctx.line_to(b.x as f64, b.y as f64);
                ctx.line_to(c.x as f64, c.y as f64);
                ctx.close_path();
                ctx.fill();
            }

            for sprite in &frame.blocks {
                self.draw_block(sprite);
            }

            // Typed text
            ctx.set_font("32px monospace");
            ctx.set_text_align("center");
            ctx.set_text_baseline("alphabetic");
            ctx.set_fill_style_str(if frame.typed_on_track { "white" } else { "salmon" });
            let _ = ctx.fill_text(&frame.typed, (PLAY_WIDTH / 2.0) as f64, (PLAY_HEIGHT - 8.0) as f64);

            // Score readout with tier color and pulse
            let font_px = if self.pulse_frames > 0 { 40 } else { 32 };
            self.pulse_frames = self.pulse_frames.saturating_sub(1);
            ctx.set_font(&format!("{}px sans-serif", font_px));
            ctx.set_text_align("left");
            ctx.set_fill_style_str(&css_color(frame.tier.color()));
            let _ = ctx.fill_text(&format!("Score {}", frame.score), 16.0, 40.0);
            ctx.set_font("20px sans-serif");
            ctx.set_fill_style_str("white");
            let _ = ctx.fill_text(&format!("Best {}", frame.high_score), 16.0, 70.0);

            if frame.phase == SessionPhase::GameOver {
                ctx.set_text_align("center");
                ctx.set_font("48px sans-serif");
                let _ = ctx.fill_text(
                    &format!("Game over - {}", frame.last_score),
                    (PLAY_WIDTH / 2.0) as f64,
                    (PLAY_HEIGHT / 3.0) as f64,
                );
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        sink: CanvasSink,
        last_time: f64,
        /// Active `setInterval` id for the spawner
        spawn_interval: Option<i32>,
        spawn_closure: Option<Closure<dyn FnMut()>>,
    }

    impl Game {
        fn handle_events(&mut self) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::ScorePulse { .. } => self.sink.pulse_frames = 8,
                    GameEvent::EmptyVocabulary => show_element("settings-panel", true),
                    GameEvent::GameOver { score, new_high, .. } => {
                        log::info!("Game over: {} (new high: {})", score, new_high);
                    }
                    _ => {}
                }
            }
            let running = self.session.is_running();
            show_element("start-btn", !running);
            show_element("end-btn", running);
        }
    }

    fn show_element(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Start the spawn interval (no-op if already running)
    fn start_spawn_timer(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.spawn_interval.is_some() {
            return;
        }
        let weak = Rc::downgrade(game);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = weak.upgrade() {
                game.borrow_mut().session.on_spawn_timer();
            }
        });
        let period = g.session.spawner().interval_ms() as i32;
        let id = web_sys::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period,
            )
            .ok()
        });
        g.spawn_interval = id;
        g.spawn_closure = Some(closure);
    }

    /// Stop the spawn interval (no-op if already stopped)
    fn stop_spawn_timer(game: &mut Game) {
        if let Some(id) = game.spawn_interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        }
        game.spawn_closure = None;
    }

    fn new_game(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.session.set_settings(Settings::load());
            match g.session.new_game() {
                Ok(true) => show_element("settings-panel", false),
                Ok(false) => return,
                Err(e) => {
                    log::warn!("{}", e);
                    return;
                }
            }
        }
        start_spawn_timer(game);
    }

    fn end_game(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.session.end_game();
        stop_spawn_timer(&mut g);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Afureru starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(PLAY_WIDTH as u32);
        canvas.set_height(PLAY_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(Settings::load(), Box::new(LocalStorageHighScoreStore), seed);
        let game = Rc::new(RefCell::new(Game {
            session,
            sink: CanvasSink { ctx, pulse_frames: 0 },
            last_time: 0.0,
            spawn_interval: None,
            spawn_closure: None,
        }));

        setup_keyboard(game.clone())?;
        setup_buttons(game.clone())?;
        request_animation_frame(game);

        log::info!("Afureru running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if let Some(key) = KeyInput::from_key(&event.key()) {
                event.prevent_default();
                game.borrow_mut().session.on_key(key);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                new_game(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("end-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                end_game(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
        {
            let mut g = game.borrow_mut();
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            let was_running = g.session.is_running();
            tick(&mut g.session, dt);
            if was_running && !g.session.is_running() {
                stop_spawn_timer(&mut g);
            }

            let frame = FrameSnapshot::capture(&g.session);
            g.sink.draw(&frame);
            g.handle_events();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Afureru (native) starting headless demo...");
    log::info!("Run with `trunk serve` for the playable web version");

    demo::run(42, 90.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: an auto-typer plays until the cup overflows
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use afureru::consts::*;
    use afureru::render::{FrameSnapshot, RenderSink};
    use afureru::sim::{GameEvent, GameSession, KeyInput, tick};
    use afureru::Settings;

    /// Logs a one-line summary once per simulated second
    struct LogSink {
        frames: u64,
    }

    impl RenderSink for LogSink {
        fn draw(&mut self, frame: &FrameSnapshot) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::info!(
                    "t={}s blocks={} score={} tier={:?}",
                    self.frames / 60,
                    frame.blocks.len(),
                    frame.score,
                    frame.tier
                );
            }
        }
    }

    pub fn run(seed: u64, max_secs: f32) {
        let settings = Settings {
            spawn_interval_ms: 600,
            ..Default::default()
        };
        let mut session = GameSession::in_memory(settings, seed);
        if let Err(e) = session.new_game() {
            log::error!("{}", e);
            return;
        }

        let mut sink = LogSink { frames: 0 };
        let frames = (max_secs / FRAME_DT) as u32;
        for frame in 0..frames {
            session.update_spawner(FRAME_DT * 1000.0);
            // Type the lowest block's reading every 45 frames
            if frame % 45 == 0 {
                let target = session
                    .blocks()
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|b| b.romanization.clone());
                if let Some(reading) = target {
                    session.on_key(KeyInput::Reset);
                    for c in reading.chars() {
                        session.on_key(KeyInput::Char(c));
                    }
                }
            }
            tick(&mut session, FRAME_DT);
            sink.draw(&FrameSnapshot::capture(&session));

            for event in session.drain_events() {
                if let GameEvent::GameOver { score, high_score, .. } = event {
                    println!("Game over after {:.1}s: score {} (best {})", frame as f32 * FRAME_DT, score, high_score);
                    return;
                }
            }
        }
        session.end_game();
        println!("Demo finished: score {}", session.high_scores().last_score);
    }
}
