use glam::Vec3;
use winit::keyboard::KeyCode;

use third_person_controller::movement::jump_velocity;
use third_person_controller::{
    host, rig, ControllerConfig, InputController, InputState, Scene, Tick, World,
};

const G: f32 = 9.81;
const DT: f32 = 1.0 / 60.0;

fn tick(dispatcher: &mut InputController, scene: &mut Scene, input: &mut InputState) {
    dispatcher.tick(&Tick { input: &*input, dt: DT }, scene);
    input.clear_one_shots();
}

/// Controller plus Host-Physik, wie im Spiel-Loop.
fn tick_with_physics(dispatcher: &mut InputController, scene: &mut Scene, input: &mut InputState) {
    dispatcher.tick(&Tick { input: &*input, dt: DT }, scene);
    host::step(scene, DT);
    input.clear_one_shots();
}

fn open_field() -> Scene {
    Scene::new(World::demo(), Vec3::new(2.5, 1.0, 2.5), G)
}

#[test]
fn test_walk_in_open_field() {
    let mut d = rig::assemble(&ControllerConfig::default());
    let mut scene = open_field();
    let mut input = InputState::new();

    input.key_down(KeyCode::KeyW);
    tick(&mut d, &mut scene, &mut input);

    assert!((scene.body.velocity.z - 3.0).abs() < 1e-4);
    assert!(scene.body.velocity.x.abs() < 1e-4);
    assert_eq!(scene.animator.mode(), 1);
    assert!((scene.tripod.position - Vec3::new(2.5, 2.6, 2.5)).length() < 1e-5);
}

#[test]
fn test_run_follows_tripod_yaw() {
    let mut d = rig::assemble(&ControllerConfig::default());
    let mut scene = open_field();
    let mut input = InputState::new();

    // 27 * 200 * (1/60) = 90 Grad; ohne Invert negiert, also -27 für +90
    input.add_pointer_delta(-27.0, 0.0);
    tick(&mut d, &mut scene, &mut input);
    assert!((scene.tripod.yaw_degrees() - 90.0).abs() < 1e-2);

    input.key_down(KeyCode::KeyW);
    input.key_down(KeyCode::ShiftLeft);
    tick(&mut d, &mut scene, &mut input);

    let v = scene.body.velocity;
    assert!((v.x - 6.0).abs() < 1e-3, "v = {v:?}");
    assert!(v.z.abs() < 1e-3, "v = {v:?}");
    assert_eq!(scene.animator.mode(), 2);
}

#[test]
fn test_wall_blocks_velocity_and_forces_idle() {
    let mut d = rig::assemble(&ControllerConfig::default());
    // Stone-Wand beginnt bei z=8
    let mut scene = Scene::new(World::demo(), Vec3::new(4.5, 1.0, 7.6), G);
    let mut input = InputState::new();

    input.key_down(KeyCode::KeyW);
    input.key_down(KeyCode::ShiftLeft);
    tick(&mut d, &mut scene, &mut input);

    assert_eq!(scene.body.velocity, Vec3::ZERO);
    assert_eq!(scene.animator.mode(), 0);
}

#[test]
fn test_release_pulse_does_not_slide_forever() {
    let mut d = rig::assemble(&ControllerConfig::default());
    let mut scene = open_field();
    let mut input = InputState::new();

    input.key_down(KeyCode::KeyW);
    for _ in 0..3 {
        tick_with_physics(&mut d, &mut scene, &mut input);
    }
    input.key_up(KeyCode::KeyW);

    // Loslass-Tick setzt stop_speed, danach bremst der Boden
    for _ in 0..120 {
        tick_with_physics(&mut d, &mut scene, &mut input);
    }
    let resting = scene.body.position;
    let v = scene.body.velocity;
    assert!(v.x.hypot(v.z) < 1e-4, "v = {v:?}");
    assert_eq!(scene.animator.mode(), 0);

    for _ in 0..60 {
        tick_with_physics(&mut d, &mut scene, &mut input);
    }
    assert!((scene.body.position - resting).length() < 1e-4);
}

#[test]
fn test_animation_order_does_not_matter() {
    let forward = ControllerConfig::default();
    let reversed = ControllerConfig {
        controllers: vec!["animation".into(), "tripod".into(), "movement".into()],
        ..Default::default()
    };
    let mut a = rig::assemble(&forward);
    let mut b = rig::assemble(&reversed);
    let mut scene_a = open_field();
    let mut scene_b = open_field();
    let mut input_a = InputState::new();
    let mut input_b = InputState::new();

    let script: [fn(&mut InputState); 4] = [
        |i| i.key_down(KeyCode::KeyW),
        |i| i.key_down(KeyCode::ShiftLeft),
        |i| i.key_up(KeyCode::KeyW),
        |i| i.key_down(KeyCode::KeyD),
    ];

    for step in script {
        step(&mut input_a);
        step(&mut input_b);
        tick(&mut a, &mut scene_a, &mut input_a);
        tick(&mut b, &mut scene_b, &mut input_b);

        assert_eq!(scene_a.animator, scene_b.animator);
        assert_eq!(scene_a.body, scene_b.body);
    }
}

#[test]
fn test_land_then_ground_and_double_jump() {
    let mut d = rig::assemble(&ControllerConfig::default());
    let mut scene = Scene::new(World::demo(), Vec3::new(2.5, 3.0, 2.5), G);
    let mut input = InputState::new();

    for _ in 0..120 {
        tick_with_physics(&mut d, &mut scene, &mut input);
    }
    assert!((scene.body.position.y - 1.0).abs() < 1e-4, "y = {}", scene.body.position.y);

    let ground = jump_velocity(G, 5.0);
    let double = jump_velocity(G, 3.0);

    input.key_down(KeyCode::Space);
    d.tick(&Tick { input: &input, dt: DT }, &mut scene);
    assert!((scene.body.velocity.y - ground).abs() < 1e-4);
    host::step(&mut scene, DT);
    input.clear_one_shots();
    input.key_up(KeyCode::Space);

    for _ in 0..10 {
        tick_with_physics(&mut d, &mut scene, &mut input);
    }
    assert!(scene.body.position.y > 1.5);

    input.key_down(KeyCode::Space);
    d.tick(&Tick { input: &input, dt: DT }, &mut scene);
    assert!((scene.body.velocity.y - double).abs() < 1e-4);
    host::step(&mut scene, DT);
    input.clear_one_shots();
    input.key_up(KeyCode::Space);
    tick_with_physics(&mut d, &mut scene, &mut input);

    // dritter Sprung in der Luft: nichts passiert
    let before = scene.body.velocity.y;
    input.key_down(KeyCode::Space);
    d.tick(&Tick { input: &input, dt: DT }, &mut scene);
    assert_eq!(scene.body.velocity.y, before);
    assert!(before < double);
}

#[test]
fn test_missing_bindings_leave_only_tripod() {
    let cfg = ControllerConfig {
        bindings: None,
        ..Default::default()
    };
    let mut d = rig::assemble(&cfg);
    assert_eq!(d.active(), vec!["TripodMovementController"]);

    let mut scene = open_field();
    let mut input = InputState::new();
    input.key_down(KeyCode::KeyW);
    input.add_pointer_delta(-3.0, 0.0);
    tick(&mut d, &mut scene, &mut input);

    assert_eq!(scene.body.velocity, Vec3::ZERO);
    assert_eq!(scene.animator.mode(), 0);
    assert!((scene.tripod.yaw_degrees() - 10.0).abs() < 1e-3);
}

#[test]
fn test_json_overrides_reach_controllers() {
    let cfg = ControllerConfig::from_json(
        r#"{ "controllers": ["tripod", "movement"], "movement": { "run_speed": 8.0 } }"#,
    )
    .unwrap();
    let mut d = rig::assemble(&cfg);
    assert_eq!(
        d.active(),
        vec!["TripodMovementController", "PlayerMovementController"]
    );

    let mut scene = open_field();
    let mut input = InputState::new();
    input.key_down(KeyCode::KeyW);
    input.key_down(KeyCode::ShiftLeft);
    tick(&mut d, &mut scene, &mut input);

    assert!((scene.body.velocity.z - 8.0).abs() < 1e-4);
}
