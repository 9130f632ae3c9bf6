use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::Vec3;
use log::{debug, info, warn};

use third_person_controller::config::DEFAULT_GRAVITY;
use third_person_controller::inventory::{Inventory, InventoryToggle, InventoryView, Item, ItemPickup};
use third_person_controller::pause::{CursorMode, PauseLogic};
use third_person_controller::{host, rig};
use third_person_controller::{ControllerConfig, InputState, Scene, Tick, World};

use winit::event::DeviceEvent;
use winit::window::{CursorGrabMode, Window};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

const TICK_DT: Duration = Duration::from_micros(16_667); // ~60 TPS
/// Rohes Maus-Delta (Pixel) → Achsen-Einheiten.
const POINTER_AXIS_SCALE: f32 = 0.1;
const TRACE_EVERY: u64 = 60;

fn load_config() -> anyhow::Result<ControllerConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TPC_CONFIG").ok());

    match path {
        Some(p) => {
            info!("loading config from {p}");
            ControllerConfig::load(&p).with_context(|| format!("load config {p}"))
        }
        None => Ok(ControllerConfig::default()),
    }
}

/// Setzt den Grab-Modus; Locked fällt auf Confined zurück (nicht jede Plattform kann Locked).
/// Liefert eine Warnung, wenn kein Versuch geklappt hat.
fn grab_cursor<E: std::fmt::Display>(
    grab: CursorGrabMode,
    mut set_grab: impl FnMut(CursorGrabMode) -> Result<(), E>,
) -> Option<String> {
    let e = set_grab(grab).err()?;
    if grab != CursorGrabMode::Locked {
        return Some(format!("cursor grab failed: {e}"));
    }
    set_grab(CursorGrabMode::Confined)
        .err()
        .map(|fallback| format!("cursor grab failed: locked: {e}, confined: {fallback}"))
}

fn apply_cursor(window: &Window, mode: CursorMode) {
    let (grab, visible) = match mode {
        CursorMode::Locked => (CursorGrabMode::Locked, false),
        CursorMode::None => (CursorGrabMode::None, true),
    };

    if let Some(msg) = grab_cursor(grab, |g| window.set_cursor_grab(g)) {
        warn!("{msg}");
    }
    window.set_cursor_visible(visible);
}

fn demo_pickups() -> Vec<ItemPickup> {
    vec![
        ItemPickup::new(
            Vec3::new(11.5, 3.0, 12.5),
            1.0,
            vec![Item::new("crystal"), Item::new("map")],
        ),
        ItemPickup::new(Vec3::new(7.5, 1.0, 3.5), 0.8, vec![Item::new("medkit")]),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut dispatcher = rig::assemble(&config);
    if dispatcher.is_empty() {
        warn!("no controllers registered, the player will not move");
    }

    let gravity = config.check_gravity().unwrap_or_else(|e| {
        warn!("{e}; host uses {DEFAULT_GRAVITY}");
        DEFAULT_GRAVITY
    });
    let mut scene = Scene::new(World::demo(), Vec3::new(2.5, 1.0, 2.5), gravity);

    let mut input = InputState::default();
    let mut pause = PauseLogic::default();
    let mut inventory = Inventory::default();
    let mut inventory_view = InventoryView::new(8);
    let mut inventory_toggle = InventoryToggle::default();
    let mut pickups = demo_pickups();

    let event_loop = EventLoop::new().context("create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Third Person Controller")
            .build(&event_loop)
            .context("create window")?,
    );
    apply_cursor(&window, pause.cursor_mode());

    let mut next_tick = Instant::now() + TICK_DT;
    let mut tick_count: u64 = 0;

    event_loop
        .run(move |event, elwt| {
            // Default: warten bis zum nächsten Tick
            elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    // sonst bleiben Tasten nach Alt-Tab gedrückt
                    WindowEvent::Focused(false) => input.release_all(),

                    WindowEvent::KeyboardInput { event, .. } => {
                        if let PhysicalKey::Code(code) = event.physical_key {
                            match event.state {
                                ElementState::Pressed => input.key_down(code),
                                ElementState::Released => input.key_up(code),
                            }
                        }
                    }

                    _ => {}
                },

                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    if !pause.is_paused() {
                        let (dx, dy) = delta;
                        // Bildschirm-y zeigt nach unten, die Achse nach oben
                        input.add_pointer_delta(
                            dx as f32 * POINTER_AXIS_SCALE,
                            -(dy as f32) * POINTER_AXIS_SCALE,
                        );
                    }
                }

                Event::AboutToWait => {
                    let now = Instant::now();
                    if now < next_tick {
                        return;
                    }

                    if let Some(mode) = pause.update(&input) {
                        apply_cursor(&window, mode);
                    }
                    if inventory_toggle.update(&input) {
                        info!(
                            "inventory {} ({} items)",
                            if inventory_toggle.is_open() { "open" } else { "closed" },
                            inventory.items().len()
                        );
                    }

                    if !pause.is_paused() {
                        let tick = Tick {
                            input: &input,
                            dt: TICK_DT.as_secs_f32(),
                        };
                        dispatcher.tick(&tick, &mut scene);
                        host::step(&mut scene, tick.dt);

                        for pickup in pickups.iter_mut() {
                            if pickup.try_collect(scene.body.position, &mut inventory) {
                                inventory_view.update(&inventory);
                            }
                        }

                        tick_count += 1;
                        if tick_count % TRACE_EVERY == 0 {
                            let p = scene.body.position;
                            let v = scene.body.velocity;
                            debug!(
                                "POS x={:.2} y={:.2} z={:.2} v=({:.2},{:.2},{:.2}) mode={} active={:?}",
                                p.x,
                                p.y,
                                p.z,
                                v.x,
                                v.y,
                                v.z,
                                scene.animator.mode(),
                                dispatcher.active()
                            );
                            window.set_title(&format!(
                                "Third Person Controller  pos=({:.1}, {:.1}, {:.1})  mode={}  items={}",
                                p.x,
                                p.y,
                                p.z,
                                scene.animator.mode(),
                                inventory_view.slots().iter().flatten().count()
                            ));
                        }
                    }

                    // one-shot inputs zurücksetzen
                    input.clear_one_shots();
                    next_tick += TICK_DT;
                }

                _ => {}
            }
        })
        .context("run event loop")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_ok_needs_no_fallback() {
        let mut tried = Vec::new();
        let msg = grab_cursor(CursorGrabMode::Locked, |g| {
            tried.push(g);
            Ok::<(), String>(())
        });
        assert!(msg.is_none());
        assert_eq!(tried, vec![CursorGrabMode::Locked]);
    }

    #[test]
    fn test_locked_falls_back_to_confined() {
        let mut tried = Vec::new();
        let msg = grab_cursor(CursorGrabMode::Locked, |g| {
            tried.push(g);
            if g == CursorGrabMode::Locked {
                Err("unsupported".to_string())
            } else {
                Ok(())
            }
        });
        assert!(msg.is_none());
        assert_eq!(tried, vec![CursorGrabMode::Locked, CursorGrabMode::Confined]);
    }

    #[test]
    fn test_both_grabs_failing_is_reported() {
        let msg = grab_cursor(CursorGrabMode::Locked, |g| Err(format!("{g:?} unsupported")));
        let msg = msg.expect("warning");
        assert!(msg.contains("Locked unsupported"));
        assert!(msg.contains("Confined unsupported"));
    }

    #[test]
    fn test_release_failure_is_reported_without_retry() {
        let mut calls = 0;
        let msg = grab_cursor(CursorGrabMode::None, |_| {
            calls += 1;
            Err("nope")
        });
        assert_eq!(calls, 1);
        assert!(msg.is_some());
    }
}
