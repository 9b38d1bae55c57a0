//! Digital Lab entry point
//!
//! Handles platform-specific initialization: on wasm32 it wires the
//! leaf-disk photosynthesis lab and the custom-work form to the DOM;
//! on native it runs the labs headless and prints their results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lab {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlInputElement;

    use digilab::consts::FAST_DT;
    use digilab::controls::NumberField;
    use digilab::customwork::WorkKind;
    use digilab::labs::photosynthesis::{self, LeafDiskModel, LeafDiskParams};
    use digilab::sim::{RunPhase, Stepper};
    use digilab::CustomWork;

    const LIGHT_FIELD: NumberField = NumberField::new("Light intensity", 0.0, 100.0);

    /// Owns the repeating tick source for one lab instance. Cancelling
    /// (or dropping) clears the pending interval synchronously, so a
    /// torn-down lab never keeps a dangling interval ticking.
    struct RunHandle {
        id: i32,
        _tick: Closure<dyn FnMut()>,
    }

    impl RunHandle {
        fn schedule(tick: Closure<dyn FnMut()>, period_ms: i32) -> Option<RunHandle> {
            let window = web_sys::window()?;
            let id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    period_ms,
                )
                .ok()?;
            Some(RunHandle { id, _tick: tick })
        }

        /// Clear the interval without dropping the closure; safe to call
        /// from inside the tick callback itself.
        fn cancel(&self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.id);
            }
        }
    }

    impl Drop for RunHandle {
        fn drop(&mut self) {
            self.cancel();
        }
    }

    struct Lab {
        stepper: Stepper<LeafDiskModel>,
        handle: Option<RunHandle>,
    }

    impl Lab {
        fn new() -> Self {
            Self {
                stepper: photosynthesis::leaf_disk(LeafDiskParams::default()),
                handle: None,
            }
        }

        /// Release the tick source. Only called from event handlers,
        /// never from inside the tick closure.
        fn halt(&mut self) {
            self.handle = None;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Digital Lab starting...");

        let lab = Rc::new(RefCell::new(Lab::new()));

        setup_light_slider(lab.clone());
        setup_buttons(lab.clone());
        setup_auto_pause(lab.clone());
        setup_custom_work();

        // The lab starts running at the default light level, as the
        // bench version does.
        lab.borrow_mut().stepper.start();
        ensure_scheduled(&lab);

        log::info!("Digital Lab running!");
    }

    /// (Re)create the interval driving the stepper if none is live.
    fn ensure_scheduled(lab: &Rc<RefCell<Lab>>) {
        if lab.borrow().handle.is_some() {
            return;
        }
        let tick = {
            let lab = lab.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut l = lab.borrow_mut();
                let events = l.stepper.advance(FAST_DT);
                if events.milestone {
                    log::info!("Leaf disk is floating!");
                }
                if events.finished {
                    // Stop the tick source; the closure itself is
                    // released when the handle is next replaced.
                    if let Some(handle) = l.handle.as_ref() {
                        handle.cancel();
                    }
                }
                update_hud(&l.stepper);
            })
        };
        let period_ms = (FAST_DT * 1000.0) as i32;
        lab.borrow_mut().handle = RunHandle::schedule(tick, period_ms);
    }

    fn update_hud(stepper: &Stepper<LeafDiskModel>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("elapsed") {
            el.set_text_content(Some(&format!("{:.1}", stepper.elapsed())));
        }
        if let Some(el) = document.get_element_by_id("oxygen") {
            el.set_text_content(Some(&format!("{:.1}", stepper.state().oxygen)));
        }
        if let Some(el) = document.get_element_by_id("float-message") {
            let class = if stepper.milestone() { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
        if let Some(el) = document.get_element_by_id("leaf-disk") {
            let drop_px = photosynthesis::disk_drop(stepper.state(), stepper.milestone()) * 300.0;
            let _ = el.set_attribute(
                "style",
                &format!("transform: translateX(-50%) translateY({drop_px}px)"),
            );
        }
    }

    fn setup_light_slider(lab: Rc<RefCell<Lab>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(slider) = document.get_element_by_id("light-range") else {
            return;
        };

        let closure = {
            let lab = lab.clone();
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                match LIGHT_FIELD.parse_clamped(&input.value()) {
                    Ok(light) => {
                        // Parameter change restarts the run from zero,
                        // on a fresh tick source
                        let mut l = lab.borrow_mut();
                        l.halt();
                        l.stepper.set_params(LeafDiskParams {
                            light_intensity: light,
                        });
                        drop(l);
                        ensure_scheduled(&lab);
                    }
                    Err(e) => show_error(&e.to_string()),
                }
            })
        };
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(lab: Rc<RefCell<Lab>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let lab = lab.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
                let mut l = lab.borrow_mut();
                l.stepper.start();
                if l.stepper.phase() == RunPhase::Running {
                    // Replace any spent handle with a live interval
                    l.halt();
                    drop(l);
                    ensure_scheduled(&lab);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let lab = lab.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
                let mut l = lab.borrow_mut();
                l.stepper.pause();
                l.halt();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let lab = lab.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
                let mut l = lab.borrow_mut();
                l.stepper.reset();
                l.halt();
                update_hud(&l.stepper);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(lab: Rc<RefCell<Lab>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut l = lab.borrow_mut();
                if l.stepper.phase() == RunPhase::Running {
                    l.stepper.pause();
                    l.halt();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn show_error(message: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("control-error"))
        {
            el.set_text_content(Some(message));
        }
    }

    fn setup_custom_work() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let work = Rc::new(RefCell::new(CustomWork::load()));
        render_work_list(&work.borrow());

        if let Some(btn) = document.get_element_by_id("work-add") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let field = |id: &str| {
                    document
                        .get_element_by_id(id)
                        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
                        .map(|i| i.value())
                        .unwrap_or_default()
                };
                let kind_raw = document
                    .get_element_by_id("work-kind")
                    .and_then(|e| e.dyn_into::<web_sys::HtmlSelectElement>().ok())
                    .map(|s| s.value())
                    .unwrap_or_default();
                let kind = match kind_raw.as_str() {
                    "calculus_applications" => WorkKind::CalculusApplications,
                    "geometry_problems" => WorkKind::GeometryProblems,
                    "statistics_analysis" => WorkKind::StatisticsAnalysis,
                    _ => WorkKind::AdvancedAlgebra,
                };
                let created_at = String::from(js_sys::Date::new_0().to_iso_string());

                let mut w = work.borrow_mut();
                if w.add(
                    &field("work-title"),
                    kind,
                    &field("work-desc"),
                    js_sys::Date::now(),
                    created_at,
                )
                .is_some()
                {
                    w.save();
                    render_work_list(&w);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn render_work_list(work: &CustomWork) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("work-list"))
        else {
            return;
        };
        let text = work
            .entries
            .iter()
            .map(|e| format!("{} - {} ({})", e.title, e.kind.label(), e.created_at))
            .collect::<Vec<_>>()
            .join("\n");
        el.set_text_content(Some(&text));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_lab::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Digital Lab (native) starting...");

    run_diffusion_demo();
    run_leaf_disk_demo();
    run_heating_demo();
    run_conversion_demo();
    run_polynomial_demo();
    run_kinematics_demo();
}

#[cfg(not(target_arch = "wasm32"))]
fn run_heating_demo() {
    use digilab::labs::heating::{self, HeatingParams, Material};
    use digilab::sim::{FrameTimer, ManualClock};

    // Drive the stepper the way a frame loop would, but off a manual
    // clock: 0.25 s frames, one simulated minute total.
    let clock = ManualClock::new();
    let mut timer = FrameTimer::new(&clock);
    let mut s = heating::stepper(HeatingParams {
        material: Material::Copper,
        mass_kg: 0.5,
        power_w: 200.0,
        initial_temp_c: 20.0,
    });
    s.start();
    for _ in 0..240 {
        clock.advance(0.25);
        s.advance(timer.frame());
    }
    println!(
        "\nHeating: 0.5 kg copper at 200 W reaches {:.1} C after {:.0} s",
        s.state().temp_c,
        s.elapsed()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn run_diffusion_demo() {
    use digilab::labs::diffusion::{self, DiffusionParams};

    let (series, color_minute) = diffusion::run_table(DiffusionParams::default());
    println!("\nDiffusion (iodine-starch), minute by minute:");
    for &(t, c) in series.points.iter().take(6) {
        println!("  min {:>2}: {:.2} mg/L", t, c);
    }
    println!("  ...");
    if let Some(minute) = color_minute {
        println!("  visible blue-black color at minute {}", minute);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_leaf_disk_demo() {
    use digilab::labs::photosynthesis::{self, LeafDiskParams};

    let mut s = photosynthesis::leaf_disk(LeafDiskParams {
        light_intensity: 100.0,
    });
    s.run_to_finish(10_000);
    println!(
        "\nPhotosynthesis: disk floats after {:.1} s at full light ({} ticks)",
        s.elapsed(),
        s.ticks()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn run_conversion_demo() {
    use digilab::labs::number_base;

    let conv = number_base::convert("255", 10, 16).expect("demo conversion");
    println!("\nNumber systems: 255 in base 16 = {}", conv.result);
    for step in &conv.steps {
        println!("  {}", step);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_polynomial_demo() {
    use digilab::labs::polynomial;

    let exp = polynomial::expand_with_steps("(x + 2)(x - 3)", Some("1")).expect("demo expansion");
    println!("\nPolynomials: (x + 2)(x - 3) = {}", exp.expanded);
    if let Some(v) = exp.value_at {
        println!("  at x = 1: {}", v);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_kinematics_demo() {
    use digilab::labs::kinematics::KinematicsParams;

    let d = KinematicsParams::default().derived();
    println!(
        "\nWork-energy-power: W = {} J, v = {} m/s, KE = {} J, P = {} W",
        d.work_j, d.velocity_ms, d.kinetic_j, d.power_w
    );
}
