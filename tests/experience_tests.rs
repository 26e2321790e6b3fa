//! Experience Tests
//!
//! Tests for:
//! - Concurrent page setup with per-page failure isolation
//! - Configuration (language from query, path templates, JSON)
//! - A scripted end-to-end session: track, tap, drag, pinch, lose

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use glam::{Vec2, Vec3};

use folio::app::TouchList;
use folio::assets::{LoadedAsset, Loader, MemoryLoader, Prefab, PrefabNode, VirtualAudioBackend};
use folio::core::{Aabb, ManualClock};
use folio::{
    Camera, ConfigError, Experience, ExperienceConfig, FolioError, LoadError, PointerEvent, RawPointer,
    Renderer, Scene, TargetIndex, TrackingEvent, World, setup_pages,
};

/// Per-path number of polls a load stays pending.
type Delays = BTreeMap<String, u32>;

/// Future pending for a fixed number of polls.
struct YieldTimes(u32);

impl Future for YieldTimes {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Loader whose responses arrive after a per-path delay.
struct DelayedLoader {
    inner: MemoryLoader,
    delays: Delays,
}

impl Loader for DelayedLoader {
    async fn load(&self, path: &str) -> Result<LoadedAsset, LoadError> {
        YieldTimes(self.delays.get(path).copied().unwrap_or(0)).await;
        self.inner.load(path).await
    }
}

struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &Scene, _camera: &Camera) {}
}

fn page_asset(page: usize) -> LoadedAsset {
    let mut prefab = Prefab::new(format!("page{page}"));
    let body = prefab.push(PrefabNode::new("body").with_bounds(Aabb::cube(2.0)));
    prefab.root_indices.push(body);
    LoadedAsset::new(prefab, vec![folio::AnimationClip::new("idle", vec![])])
}

fn book_loader(config: &ExperienceConfig, broken: &[usize]) -> MemoryLoader {
    let mut loader = MemoryLoader::new();
    for page in config.pages() {
        if broken.contains(&page.page) {
            loader.insert_failure(
                page.model_path.clone(),
                LoadError::Parse {
                    path: page.model_path,
                    reason: "bad draco stream".into(),
                },
            );
        } else {
            loader.insert(page.model_path, page_asset(page.page));
        }
    }
    loader
}

// ============================================================================
// Page setup
// ============================================================================

#[test]
fn failed_page_does_not_block_the_others() {
    let config = ExperienceConfig::default();
    let loader = book_loader(&config, &[4]);
    let mut world = World::default();

    let report = pollster::block_on(setup_pages(&mut world, &config, &loader, &VirtualAudioBackend::default()));

    assert_eq!(report.bound.len(), 10);
    assert_eq!(report.failed.len(), 1);
    let (target, err) = &report.failed[0];
    assert_eq!(*target, TargetIndex(3));
    assert!(matches!(err, FolioError::Load(LoadError::Parse { .. })));

    assert_eq!(world.interactables().len(), 10);
    assert!(world.model_for_target(TargetIndex(3)).is_none());
    assert!(world.model_for_target(TargetIndex(4)).is_some());
}

#[test]
fn missing_page_file_is_reported_as_not_found() {
    let config = ExperienceConfig {
        page_count: 2,
        ..ExperienceConfig::default()
    };
    let mut loader = MemoryLoader::new();
    loader.insert(config.model_path(1), page_asset(1));
    let mut world = World::default();

    let report = pollster::block_on(setup_pages(&mut world, &config, &loader, &VirtualAudioBackend::default()));

    assert!(matches!(
        &report.failed[..],
        [(TargetIndex(1), FolioError::Load(LoadError::NotFound(path)))] if *path == config.model_path(2)
    ));
}

#[test]
fn pages_bind_in_completion_order() {
    let config = ExperienceConfig {
        page_count: 4,
        ..ExperienceConfig::default()
    };
    // Later pages answer first.
    let delays: Delays = config
        .pages()
        .map(|p| (p.model_path, (config.page_count - p.page) as u32 * 3))
        .collect();
    let loader = DelayedLoader {
        inner: book_loader(&config, &[]),
        delays,
    };
    let mut world = World::default();

    let report = pollster::block_on(setup_pages(&mut world, &config, &loader, &VirtualAudioBackend::default()));

    assert_eq!(
        report.bound,
        vec![TargetIndex(3), TargetIndex(2), TargetIndex(1), TargetIndex(0)]
    );
    assert!(report.is_complete());
    // Each page still landed on its own target.
    for page in config.pages() {
        let key = world.model_for_target(page.target).unwrap();
        assert_eq!(world.model(key).unwrap().model_path, page.model_path);
    }
}

#[test]
fn audio_paths_follow_language() {
    let config = ExperienceConfig {
        page_count: 1,
        ..ExperienceConfig::default()
    }
    .with_language_from_query("?lang=hindi")
    .unwrap();
    assert_eq!(config.audio_path(1), "../assets/audio/hindi/page 1.mp3");

    let unchanged = ExperienceConfig::default().with_language_from_query("?page=2").unwrap();
    assert_eq!(unchanged.language, "english");

    assert!(matches!(
        ExperienceConfig::default().with_language_from_query("lang=..%2F..%2Fetc"),
        Err(ConfigError::InvalidQuery(_))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let config = ExperienceConfig::default().with_language("tamil");
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ExperienceConfig::from_json(&json).unwrap(), config);
}

#[test]
fn json_model_placement_is_applied_to_pages() {
    let config = ExperienceConfig::from_json(
        r#"{ "page_count": 1, "model": { "scale": [0.3, 0.3, 0.3], "position": [0.0, 0.0, 0.0] } }"#,
    )
    .unwrap();
    let loader = book_loader(&config, &[]);
    let mut world = World::default();
    pollster::block_on(setup_pages(&mut world, &config, &loader, &VirtualAudioBackend::default()));

    let key = world.model_for_target(TargetIndex(0)).unwrap();
    let root = world.model(key).unwrap().root;
    let transform = world.scene.get_node(root).unwrap().transform;
    assert_eq!(transform.scale, Vec3::splat(0.3));
    assert_eq!(transform.position, Vec3::ZERO);
}

// ============================================================================
// End-to-end session
// ============================================================================

#[test]
fn scripted_session() {
    let config = ExperienceConfig {
        page_count: 3,
        ..ExperienceConfig::default()
    };
    let loader = book_loader(&config, &[]);
    let mut experience = Experience::new(config, Camera::default(), Vec2::new(600.0, 600.0), ManualClock::new());

    let report = pollster::block_on(experience.load(&loader, &VirtualAudioBackend::default()));
    assert!(report.is_complete());
    assert!(experience.is_ready());

    // Page 2 is recognized 2 m in front of the camera.
    let anchor = experience.world.anchor(TargetIndex(1)).unwrap().anchor();
    anchor.set_pose(
        &mut experience.world.scene,
        glam::Affine3A::from_translation(Vec3::new(0.0, 0.4, -2.0)),
    );
    experience.handle_tracking(TrackingEvent::Found(TargetIndex(1)));
    let key = experience.world.model_for_target(TargetIndex(1)).unwrap();

    experience.frames.clock_mut().advance(1.0 / 60.0);
    experience.frame(&mut NullRenderer);

    // Tap pauses the page; drag rotates it.
    let center = Vec2::new(300.0, 300.0);
    experience.handle_pointer(&PointerEvent::down(RawPointer::Mouse(center)).unwrap());
    assert_eq!(experience.interaction.current_model(), Some(key));
    assert!(experience.world.model(key).unwrap().mixer.actions()[0].paused);

    experience.handle_pointer(&PointerEvent::moved(RawPointer::Mouse(center + Vec2::new(30.0, 0.0))).unwrap());
    experience.handle_pointer(&PointerEvent::up(RawPointer::Mouse(center)));

    // Pinch out by half again.
    let pair = |d: f32| {
        RawPointer::Touches(TouchList::from_slice(&[
            center - Vec2::new(d / 2.0, 0.0),
            center + Vec2::new(d / 2.0, 0.0),
        ]))
    };
    experience.handle_pointer(&PointerEvent::down(pair(200.0)).unwrap());
    experience.handle_pointer(&PointerEvent::moved(pair(300.0)).unwrap());
    experience.handle_pointer(&PointerEvent::up(RawPointer::Touches(TouchList::new())));

    let model = experience.world.model(key).unwrap();
    let transform = experience.world.scene.get_node(model.root).unwrap().transform;
    assert!((transform.rotation.y - 0.3).abs() < 1e-5);
    assert!((transform.scale.x - 0.225).abs() < 1e-5);

    // Closing the book hides the page and keeps the manipulation.
    experience.handle_tracking(TrackingEvent::Lost(TargetIndex(1)));
    experience.frames.clock_mut().advance(1.0 / 60.0);
    experience.frame(&mut NullRenderer);

    let model = experience.world.model(key).unwrap();
    assert!(!model.is_visible(&experience.world.scene));
    assert!(model.audio.is_paused());
    assert_eq!(experience.frames.frame_count(), 2);
}
