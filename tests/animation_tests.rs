//! Animation and Frame Driver Tests
//!
//! Tests for:
//! - Mixer binding by node name and sampling into transforms
//! - Loop modes (Loop, Once, PingPong) through the mixer
//! - Pause holds the pose, lost targets freeze animation
//! - FrameDriver ordering: mixers, world matrices, then render

use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};
use std::sync::Arc;

use glam::{Quat, Vec3};

use folio::animation::{InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta};
use folio::assets::{AssetBinder, LoadedAsset, MemoryLoader, ModelConfig, Prefab, PrefabNode, VirtualAudioBackend};
use folio::core::ManualClock;
use folio::{
    AnimationClip, AnimationMixer, Camera, FrameDriver, LoopMode, ModelKey, Node, NodeHandle, Renderer,
    Scene, TargetIndex, TrackingEvent, World,
};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Moves `node` from the origin to +Y over one second.
fn rise(node: &str) -> AnimationClip {
    AnimationClip::new(
        "rise",
        vec![Track {
            meta: TrackMeta {
                node_name: node.into(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Vec3::ZERO, Vec3::Y],
                InterpolationMode::Linear,
            )),
        }],
    )
}

/// Turns `node` an eighth of a revolution around Y over one second.
fn turn(node: &str) -> AnimationClip {
    AnimationClip::new(
        "turn",
        vec![Track {
            meta: TrackMeta {
                node_name: node.into(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_4)],
                InterpolationMode::Linear,
            )),
        }],
    )
}

fn rig() -> (Scene, NodeHandle, NodeHandle) {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("page"));
    let tail = scene.add_to_parent(Node::new("tail"), root);
    (scene, root, tail)
}

#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    /// World-space y of the node named "tail" at each render
    tail_heights: Vec<f32>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        self.frames += 1;
        if let Some(node) = scene.nodes.values().find(|n| n.name == "tail") {
            self.tail_heights.push(node.world_matrix().translation.y);
        }
    }
}

fn animated_world() -> (World, ModelKey) {
    let mut prefab = Prefab::new("page1");
    let tail = prefab.push(PrefabNode::new("tail"));
    prefab.root_indices.push(tail);

    let mut loader = MemoryLoader::new();
    loader.insert("page1.glb", LoadedAsset::new(prefab, vec![rise("tail")]));
    let audio = VirtualAudioBackend::default();
    let binder = AssetBinder::new(&loader, &audio);

    let mut world = World::default();
    let config = ModelConfig {
        scale: Vec3::ONE,
        position: Vec3::ZERO,
    };
    let model = pollster::block_on(binder.bind(&mut world.scene, "page1.glb", "page 1.mp3", &config)).unwrap();
    let key = world.bind_model(TargetIndex(0), model).unwrap();
    (world, key)
}

// ============================================================================
// Mixer
// ============================================================================

#[test]
fn mixer_binds_tracks_by_node_name() {
    let (scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("tail")));

    let bindings = mixer.actions()[index].bindings();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].node, tail);
}

#[test]
fn unknown_node_names_are_skipped() {
    let (scene, root, _) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("wing")));
    assert!(mixer.actions()[index].bindings().is_empty());
}

#[test]
fn mixer_moves_bound_node_over_time() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("tail")));
    mixer.actions_mut()[index].play();

    mixer.update(0.25, &mut scene);
    assert!(approx(scene.get_node(tail).unwrap().transform.position.y, 0.25));

    mixer.update(0.5, &mut scene);
    assert!(approx(scene.get_node(tail).unwrap().transform.position.y, 0.75));
}

#[test]
fn rotation_tracks_write_euler_angles() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(turn("tail")));
    mixer.actions_mut()[index].play();

    mixer.update(0.5, &mut scene);
    let r = scene.get_node(tail).unwrap().transform.rotation;
    assert!((r.y - FRAC_PI_8).abs() < 1e-3, "Expected PI/8, got {}", r.y);
    assert!(r.x.abs() < 1e-3 && r.z.abs() < 1e-3);
}

#[test]
fn stopped_action_does_not_write() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    mixer.clip_action(&scene, Arc::new(rise("tail")));
    scene.get_node_mut(tail).unwrap().transform.position = Vec3::new(5.0, 5.0, 5.0);

    mixer.update(0.5, &mut scene);

    assert_eq!(scene.get_node(tail).unwrap().transform.position, Vec3::new(5.0, 5.0, 5.0));
}

#[test]
fn paused_action_holds_pose() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("tail")));
    mixer.actions_mut()[index].play();
    mixer.update(0.4, &mut scene);

    mixer.actions_mut()[index].paused = true;
    mixer.update(0.4, &mut scene);

    assert!(approx(scene.get_node(tail).unwrap().transform.position.y, 0.4));
}

#[test]
fn loop_mode_wraps_through_mixer() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("tail")));
    mixer.actions_mut()[index].play();

    mixer.update(1.25, &mut scene);

    assert!(approx(mixer.actions()[index].time, 0.25));
    assert!(approx(scene.get_node(tail).unwrap().transform.position.y, 0.25));
}

#[test]
fn once_mode_finishes_and_found_replays() {
    let (mut world, key) = animated_world();
    world.model_mut(key).unwrap().mixer.actions_mut()[0].loop_mode = LoopMode::Once;

    world.update_mixers(2.0);
    assert!(!world.model(key).unwrap().mixer.actions()[0].is_running());

    world.handle_tracking_event(TrackingEvent::Found(TargetIndex(0)));
    let action = &world.model(key).unwrap().mixer.actions()[0];
    assert!(action.is_running());
    assert_eq!(action.time, 0.0);
}

#[test]
fn ping_pong_runs_backwards_after_end() {
    let (mut scene, root, tail) = rig();
    let mut mixer = AnimationMixer::new(root);
    let index = mixer.clip_action(&scene, Arc::new(rise("tail")));
    mixer.actions_mut()[index].loop_mode = LoopMode::PingPong;
    mixer.actions_mut()[index].play();

    mixer.update(1.5, &mut scene);

    assert!(approx(scene.get_node(tail).unwrap().transform.position.y, 0.5));
}

// ============================================================================
// FrameDriver
// ============================================================================

#[test]
fn frame_advances_mixers_before_rendering() {
    let (mut world, _) = animated_world();
    let mut driver = FrameDriver::new(ManualClock::new());
    let mut renderer = RecordingRenderer::default();

    driver.clock_mut().advance(0.5);
    let dt = driver.frame(&mut world, &mut renderer);

    assert!(approx(dt, 0.5));
    assert_eq!(renderer.frames, 1);
    assert_eq!(driver.frame_count(), 1);
    // World matrices were refreshed before the renderer saw the scene.
    assert!(approx(renderer.tail_heights[0], 0.5));
}

#[test]
fn skipped_frames_accumulate_into_next_delta() {
    let (mut world, _) = animated_world();
    let mut driver = FrameDriver::new(ManualClock::new());
    let mut renderer = RecordingRenderer::default();

    driver.clock_mut().advance(0.1);
    driver.clock_mut().advance(0.2);
    let dt = driver.frame(&mut world, &mut renderer);

    assert!(approx(dt, 0.3));
    assert!(approx(renderer.tail_heights[0], 0.3));
}

#[test]
fn lost_target_freezes_animation_across_frames() {
    let (mut world, _) = animated_world();
    let mut driver = FrameDriver::new(ManualClock::new());
    let mut renderer = RecordingRenderer::default();

    driver.clock_mut().advance(0.2);
    driver.frame(&mut world, &mut renderer);

    world.handle_tracking_event(TrackingEvent::Lost(TargetIndex(0)));
    for _ in 0..3 {
        driver.clock_mut().advance(0.2);
        driver.frame(&mut world, &mut renderer);
    }

    world.handle_tracking_event(TrackingEvent::Found(TargetIndex(0)));
    driver.clock_mut().advance(0.2);
    driver.frame(&mut world, &mut renderer);

    let heights = &renderer.tail_heights;
    assert_eq!(heights.len(), 5);
    assert!(approx(heights[0], 0.2));
    assert!(approx(heights[3], 0.2));
    assert!(approx(heights[4], 0.4));
}
