//! Storybook
//!
//! Loads an eleven-page book from memory (page 7's file is "corrupt"),
//! then replays a short reading session: the reader opens page 2, taps and
//! turns the model, pinches it larger, moves on to page 3, and closes the
//! book. Run with `RUST_LOG=debug` to watch every gesture transition.
//!
//! Pass a query string to pick the narration language:
//!
//! ```text
//! cargo run -p storybook -- "?lang=hindi"
//! ```

use anyhow::{Context, Result};
use glam::{Affine3A, Vec2, Vec3};

use folio::animation::{InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta};
use folio::app::TouchList;
use folio::core::{Aabb, ManualClock};
use folio::{
    AnimationClip, Camera, Experience, ExperienceConfig, LoadError, LoadedAsset, MemoryLoader, PointerEvent,
    Prefab, PrefabNode, RawPointer, Renderer, Scene, TargetIndex, TrackingEvent, VirtualAudioBackend,
};

const VIEWPORT: Vec2 = Vec2::new(720.0, 1280.0);
const FRAME: f32 = 1.0 / 60.0;
const BROKEN_PAGE: usize = 7;

/// Logs what a real renderer would draw, once per second.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        self.frames += 1;
        if self.frames % 60 != 0 {
            return;
        }
        let visible: Vec<&str> = scene
            .nodes
            .values()
            .filter(|n| n.interactable && n.visible)
            .map(|n| n.name.as_str())
            .collect();
        log::info!("frame {}: drawing {visible:?}", self.frames);
    }
}

/// A page model: a body to tap and a head that bobs.
fn page_asset(page: usize) -> LoadedAsset {
    let mut prefab = Prefab::new(format!("page{page}"));
    let head = prefab.push(PrefabNode::new("head").with_bounds(Aabb::cube(0.8)));
    let body = prefab.push(
        PrefabNode::new("body")
            .with_bounds(Aabb::cube(2.0))
            .with_children(vec![head]),
    );
    prefab.root_indices.push(body);

    let bob = AnimationClip::new(
        "bob",
        vec![Track {
            meta: TrackMeta {
                node_name: "head".into(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, 0.5, 1.0],
                vec![Vec3::new(0.0, 1.2, 0.0), Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 1.2, 0.0)],
                InterpolationMode::Linear,
            )),
        }],
    );
    LoadedAsset::new(prefab, vec![bob])
}

fn book(config: &ExperienceConfig) -> MemoryLoader {
    let mut loader = MemoryLoader::new();
    for page in config.pages() {
        if page.page == BROKEN_PAGE {
            loader.insert_failure(
                page.model_path.clone(),
                LoadError::Parse {
                    path: page.model_path,
                    reason: "unexpected end of buffer".into(),
                },
            );
        } else {
            loader.insert(page.model_path, page_asset(page.page));
        }
    }
    loader
}

fn play_frames(experience: &mut Experience<ManualClock>, renderer: &mut LogRenderer, seconds: f32) {
    let frames = (seconds / FRAME).round() as u32;
    for _ in 0..frames {
        experience.frames.clock_mut().advance(FRAME);
        experience.frame(renderer);
    }
}

fn touches(points: &[Vec2]) -> RawPointer {
    RawPointer::Touches(TouchList::from_slice(points))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ExperienceConfig::default();
    if let Some(query) = std::env::args().nth(1) {
        config = config
            .with_language_from_query(&query)
            .context("reading language from query")?;
    }
    config.validate().context("invalid experience configuration")?;
    log::info!("Narration language: {}", config.language);

    let loader = book(&config);
    let audio = VirtualAudioBackend {
        autoplay_blocked: false,
    };

    let camera = Camera::new_perspective(60.0, VIEWPORT.x / VIEWPORT.y, 0.01, 100.0);
    let mut experience = Experience::new(config, camera, VIEWPORT, ManualClock::new());
    let report = pollster::block_on(experience.load(&loader, &audio));
    for (target, err) in &report.failed {
        log::warn!("Page {} unavailable: {err}", target.0 + 1);
    }
    log::info!("Loading overlay dismissed ({} pages ready)", report.bound.len());

    let mut renderer = LogRenderer::default();
    let center = VIEWPORT / 2.0;
    let page_pose = Affine3A::from_translation(Vec3::new(0.0, 0.4, -1.5));

    // Page 2 comes into view.
    let page2 = TargetIndex(1);
    if let Some(anchor) = experience.world.anchor(page2).map(|c| c.anchor()) {
        anchor.set_pose(&mut experience.world.scene, page_pose);
    }
    experience.handle_tracking(TrackingEvent::Found(page2));
    play_frames(&mut experience, &mut renderer, 2.0);

    // Tap to pause, drag to turn, lift.
    if let Some(down) = PointerEvent::down(RawPointer::Mouse(center)) {
        experience.handle_pointer(&down);
    }
    for step in 1..=20 {
        let at = center + Vec2::new(step as f32 * 6.0, step as f32 * 1.5);
        if let Some(moved) = PointerEvent::moved(RawPointer::Mouse(at)) {
            experience.handle_pointer(&moved);
        }
        play_frames(&mut experience, &mut renderer, FRAME);
    }
    experience.handle_pointer(&PointerEvent::up(RawPointer::Mouse(center)));

    // Pinch out, lift one finger, then the other.
    let spread = |d: f32| touches(&[center - Vec2::new(d / 2.0, 0.0), center + Vec2::new(d / 2.0, 0.0)]);
    if let Some(down) = PointerEvent::down(spread(150.0)) {
        experience.handle_pointer(&down);
    }
    for d in [180.0, 210.0, 240.0] {
        if let Some(moved) = PointerEvent::moved(spread(d)) {
            experience.handle_pointer(&moved);
        }
    }
    experience.handle_pointer(&PointerEvent::up(touches(&[center])));
    experience.handle_pointer(&PointerEvent::up(touches(&[])));

    // Tap again to resume, then scroll a little smaller.
    if let Some(down) = PointerEvent::down(RawPointer::Mouse(center)) {
        experience.handle_pointer(&down);
    }
    experience.handle_pointer(&PointerEvent::up(RawPointer::Mouse(center)));
    experience.handle_pointer(&PointerEvent::wheel(120.0));
    play_frames(&mut experience, &mut renderer, 1.0);

    if let Some(key) = experience.world.model_for_target(page2) {
        let model = experience.world.model(key).context("page 2 model vanished")?;
        let node = experience
            .world
            .scene
            .get_node(model.root)
            .context("page 2 root vanished")?;
        log::info!(
            "Page 2 after interaction: rotation {:?}, scale {:.3}",
            node.transform.rotation,
            node.transform.scale.x
        );
    }

    // Turn the page: 2 is lost, 3 is found.
    experience.handle_tracking(TrackingEvent::Lost(page2));
    let page3 = TargetIndex(2);
    if let Some(anchor) = experience.world.anchor(page3).map(|c| c.anchor()) {
        anchor.set_pose(&mut experience.world.scene, page_pose);
    }
    experience.handle_tracking(TrackingEvent::Found(page3));
    play_frames(&mut experience, &mut renderer, 2.0);

    // The broken page is recognized but has nothing to show.
    experience.handle_tracking(TrackingEvent::Lost(page3));
    experience.handle_tracking(TrackingEvent::Found(TargetIndex(BROKEN_PAGE - 1)));
    play_frames(&mut experience, &mut renderer, 1.0);

    log::info!(
        "Session finished after {} frames",
        experience.frames.frame_count()
    );
    Ok(())
}
