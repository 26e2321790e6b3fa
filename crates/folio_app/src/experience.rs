//! Experience bootstrap.
//!
//! [`setup_pages`] requests every page model at once and binds each page as
//! soon as its own load resolves, so a slow or broken page never holds up the
//! others. [`Experience`] bundles the world with the interaction engine and
//! the frame driver, and ignores pointer input until setup has finished.

use folio_assets::{AssetBinder, AudioBackend, Loader};
use folio_core::{Clock, FolioError, FrameClock};
use folio_scene::{Camera, RayPicker, SceneRaycaster};
use futures::stream::{FuturesUnordered, StreamExt};
use glam::Vec2;

use crate::config::ExperienceConfig;
use crate::frame::{FrameDriver, Renderer};
use crate::input::PointerEvent;
use crate::interaction::InteractionEngine;
use crate::world::{TargetIndex, TrackingEvent, World};

/// Outcome of page setup. Failures are per page and never fatal.
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Targets that received a model, in completion order
    pub bound: Vec<TargetIndex>,
    pub failed: Vec<(TargetIndex, FolioError)>,
}

impl SetupReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates an anchor per configured page, loads all page models
/// concurrently and binds each one as it arrives.
pub async fn setup_pages<L: Loader, A: AudioBackend>(
    world: &mut World,
    config: &ExperienceConfig,
    loader: &L,
    audio: &A,
) -> SetupReport {
    let binder = AssetBinder::new(loader, audio);
    let mut report = SetupReport::default();

    for page in config.pages() {
        world.add_anchor(page.target);
    }

    let binder_ref = &binder;
    let mut pending: FuturesUnordered<_> = config
        .pages()
        .map(|page| async move {
            let result = binder_ref.fetch(&page.model_path).await;
            (page, result)
        })
        .collect();

    while let Some((page, result)) = pending.next().await {
        let asset = match result {
            Ok(asset) => asset,
            Err(err) => {
                log::error!("Error Page {}: {err}", page.page);
                report.failed.push((page.target, err.into()));
                continue;
            }
        };

        let model = binder.instantiate(
            &mut world.scene,
            &asset,
            &page.model_path,
            &page.audio_path,
            &config.model,
        );
        match world.bind_model(page.target, model) {
            Ok(_) => {
                log::info!("Page {} ready", page.page);
                report.bound.push(page.target);
            }
            Err(err) => {
                log::error!("Error Page {}: {err}", page.page);
                report.failed.push((page.target, err.into()));
            }
        }
    }

    log::info!(
        "Setup finished: {} page(s) bound, {} failed",
        report.bound.len(),
        report.failed.len()
    );
    report
}

/// Top-level state of a running picture-book session.
pub struct Experience<C = FrameClock, P = SceneRaycaster> {
    pub config: ExperienceConfig,
    pub world: World,
    pub interaction: InteractionEngine<P>,
    pub frames: FrameDriver<C>,
    ready: bool,
}

impl<C: Clock> Experience<C, SceneRaycaster> {
    pub fn new(config: ExperienceConfig, camera: Camera, viewport: Vec2, clock: C) -> Self {
        Self::with_picker(config, camera, viewport, clock, SceneRaycaster::new())
    }
}

impl<C: Clock, P: RayPicker> Experience<C, P> {
    pub fn with_picker(
        config: ExperienceConfig,
        camera: Camera,
        viewport: Vec2,
        clock: C,
        picker: P,
    ) -> Self {
        Self {
            config,
            world: World::new(camera),
            interaction: InteractionEngine::with_picker(picker, viewport),
            frames: FrameDriver::new(clock),
            ready: false,
        }
    }

    /// Loads and binds every page. Pointer input is accepted afterwards.
    pub async fn load<L: Loader, A: AudioBackend>(&mut self, loader: &L, audio: &A) -> SetupReport {
        let report = setup_pages(&mut self.world, &self.config, loader, audio).await;
        self.ready = true;
        report
    }

    /// Whether setup has finished (the loading overlay can be dismissed).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if !self.ready {
            log::trace!("Pointer input before setup finished; ignored");
            return;
        }
        self.interaction.handle_event(&mut self.world, event);
    }

    pub fn handle_tracking(&mut self, event: TrackingEvent) {
        self.world.handle_tracking_event(event);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.interaction.resize(width, height);
        if height > 0.0 {
            self.world.camera.set_aspect(width / height);
        }
    }

    /// Runs one frame; see [`FrameDriver::frame`].
    pub fn frame(&mut self, renderer: &mut impl Renderer) -> f32 {
        self.frames.frame(&mut self.world, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_assets::{LoadedAsset, MemoryLoader, Prefab, VirtualAudioBackend};
    use folio_core::LoadError;

    fn config(pages: usize) -> ExperienceConfig {
        ExperienceConfig {
            page_count: pages,
            ..ExperienceConfig::default()
        }
    }

    #[test]
    fn every_page_gets_an_anchor_even_when_loading_fails() {
        let config = config(3);
        let mut loader = MemoryLoader::new();
        loader.insert(config.model_path(1), LoadedAsset::new(Prefab::new("page1"), vec![]));
        loader.insert_failure(
            config.model_path(2),
            LoadError::Fetch {
                path: config.model_path(2),
                reason: "offline".into(),
            },
        );

        let mut world = World::default();
        let report = pollster::block_on(setup_pages(
            &mut world,
            &config,
            &loader,
            &VirtualAudioBackend::default(),
        ));

        assert_eq!(report.bound, vec![TargetIndex(0)]);
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_complete());
        for i in 0..3 {
            assert!(world.anchor(TargetIndex(i)).is_some());
        }
        assert_eq!(world.interactables().len(), 1);
    }

    #[test]
    fn pointer_input_is_ignored_until_loaded() {
        let mut experience = Experience::new(
            config(1),
            Camera::default(),
            Vec2::new(100.0, 100.0),
            folio_core::ManualClock::new(),
        );
        experience.handle_pointer(&PointerEvent::wheel(-100.0));
        assert!(!experience.is_ready());

        let loader = MemoryLoader::new();
        let report = pollster::block_on(experience.load(&loader, &VirtualAudioBackend::default()));
        assert!(experience.is_ready());
        assert_eq!(report.failed.len(), 1);
    }
}
