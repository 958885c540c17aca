//! Session orchestrator.
//!
//! Owns the per-photo [`SessionState`] and drives it through
//! `landing -> analyzing -> [dialogue] -> generating -> result`, consulting the
//! artifact cache on every theme switch and writing through to it on every
//! committed generation.
//!
//! Every collaborator call captures a [`RequestTag`] when it is submitted.
//! Its result is committed only while the tag is still current: no reset, new
//! upload or re-analysis happened in the meantime and the tagged theme is
//! still active.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reverie_core::artifact::{Artifact, ArtifactCache};
use reverie_core::config::StudioConfig;
use reverie_core::error::{ReverieError, Result};
use reverie_core::image::ImageData;
use reverie_core::preference::PreferenceRepository;
use reverie_core::session::{
    ACT_COUNT, LiveArtifact, PoemAct, PoemLine, ReflectionMode, SessionEvent, SessionStage,
    SessionState, fallback_acts, finalize_poem, normalize_caption,
};
use reverie_core::studio::{
    AnalysisOutcome, AnalysisRequest, AnalysisService, GenerationOutcome, GenerationRequest,
    GenerationService,
};
use reverie_core::theme::{DEFAULT_THEME_ID, Theme, ThemeRegistry};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

const EVENT_CHANNEL_CAPACITY: usize = 64;

const ANALYSIS_ERROR_MESSAGE: &str = "We couldn't read this photo. Please try again.";
const GENERATION_ERROR_MESSAGE: &str = "We couldn't paint this postcard. Please try again.";

/// Identifies the session context a collaborator call was submitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub theme_id: String,
    /// Bumped on every upload and reset
    pub epoch: u64,
    /// Bumped on every analysis of the current upload
    pub analysis_run: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Start image generation during the dialogue when the theme allows it
    pub parallel_generation: bool,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            parallel_generation: true,
        }
    }
}

impl From<&StudioConfig> for OrchestratorSettings {
    fn from(config: &StudioConfig) -> Self {
        Self {
            parallel_generation: config.parallel_generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Freshness {
    Current,
    /// Same upload, but the user switched to another theme
    ThemeChanged,
    /// A reset, new upload or re-analysis happened since submission
    Superseded,
}

struct BackgroundGeneration {
    tag: RequestTag,
    handle: JoinHandle<Option<GenerationOutcome>>,
}

struct Core {
    session: SessionState,
    epoch: u64,
    analysis_run: u64,
    background: Option<BackgroundGeneration>,
}

impl Core {
    fn tag(&self) -> RequestTag {
        RequestTag {
            theme_id: self.session.active_theme_id.clone(),
            epoch: self.epoch,
            analysis_run: self.analysis_run,
        }
    }

    fn freshness(&self, tag: &RequestTag) -> Freshness {
        if tag.epoch != self.epoch || tag.analysis_run != self.analysis_run {
            Freshness::Superseded
        } else if tag.theme_id != self.session.active_theme_id {
            Freshness::ThemeChanged
        } else {
            Freshness::Current
        }
    }

    fn transition(&mut self, next: SessionStage, events: &mut Vec<SessionEvent>) {
        let current = self.session.stage;
        if current == next {
            return;
        }
        if !current.can_transition_to(next) {
            tracing::warn!(
                "[SessionOrchestrator] Unexpected stage transition {} -> {}",
                current,
                next
            );
        }
        tracing::info!("[SessionOrchestrator] Stage {} -> {}", current, next);
        self.session.stage = next;
        events.push(SessionEvent::StageChanged { stage: next });
    }

    /// Starts a new upload epoch, dropping all per-photo progress.
    fn start_epoch(&mut self, events: &mut Vec<SessionEvent>) {
        self.epoch += 1;
        self.background = None;
        let previous = self.session.stage;
        self.session.reset();
        if previous != SessionStage::Landing {
            events.push(SessionEvent::StageChanged {
                stage: SessionStage::Landing,
            });
        }
    }
}

/// Follow-up work decided once an analysis result has been applied.
enum AfterAnalysis {
    Done,
    Generate(GenerationRequest),
    Background(GenerationRequest),
}

struct Inner {
    registry: Arc<ThemeRegistry>,
    cache: Arc<dyn ArtifactCache>,
    analysis: Arc<dyn AnalysisService>,
    generation: Arc<dyn GenerationService>,
    preferences: Arc<dyn PreferenceRepository>,
    settings: OrchestratorSettings,
    core: Mutex<Core>,
    events: broadcast::Sender<SessionEvent>,
    tracker: TaskTracker,
}

/// Handle to a postcard session. Clones share the same session.
#[derive(Clone)]
pub struct SessionOrchestrator {
    inner: Arc<Inner>,
}

impl SessionOrchestrator {
    pub fn new(
        registry: Arc<ThemeRegistry>,
        cache: Arc<dyn ArtifactCache>,
        analysis: Arc<dyn AnalysisService>,
        generation: Arc<dyn GenerationService>,
        preferences: Arc<dyn PreferenceRepository>,
        settings: OrchestratorSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                registry,
                cache,
                analysis,
                generation,
                preferences,
                settings,
                core: Mutex::new(Core {
                    session: SessionState::new(DEFAULT_THEME_ID, ReflectionMode::default()),
                    epoch: 0,
                    analysis_run: 0,
                    background: None,
                }),
                events,
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// Loads the persisted reflection mode into the session.
    pub async fn restore_preferences(&self) {
        let mode = self.inner.preferences.get_reflection_mode().await;
        self.update(|core, _| core.session.reflection_mode = mode);
    }

    // ============================================================================
    // Observation
    // ============================================================================

    /// Returns a copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.core().session.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn stage(&self) -> SessionStage {
        self.core().session.stage
    }

    pub fn active_theme(&self) -> Option<Theme> {
        let id = self.core().session.active_theme_id.clone();
        self.inner.registry.get_theme(&id)
    }

    /// The act awaiting an answer, if the dialogue is open.
    pub fn current_act(&self) -> Option<PoemAct> {
        let core = self.core();
        if core.session.stage != SessionStage::Dialogue {
            return None;
        }
        core.session.current_act().cloned()
    }

    // ============================================================================
    // Session inputs
    // ============================================================================

    /// Validates and stores a photo, starting a new session epoch.
    ///
    /// Invalid input is rejected without touching the session.
    pub fn set_image(&self, input: &str) -> Result<()> {
        let image = ImageData::parse(input)?;
        self.set_image_data(image);
        Ok(())
    }

    pub fn set_image_data(&self, image: ImageData) {
        tracing::info!(
            "[SessionOrchestrator] New photo: {} ({} bytes)",
            image.mime_type(),
            image.byte_len()
        );
        self.update(|core, events| {
            core.start_epoch(events);
            core.session.original_image = Some(image);
        });
    }

    /// Makes `theme_id` the active theme.
    ///
    /// A cached artifact for the theme is restored into the live fields;
    /// otherwise the live fields are cleared. Returns `false` without any
    /// change for an unknown id.
    pub fn set_theme(&self, theme_id: &str) -> bool {
        if !self.inner.registry.contains(theme_id) {
            tracing::debug!("[SessionOrchestrator] Ignoring unknown theme: {}", theme_id);
            return false;
        }

        self.update(|core, events| {
            core.session.active_theme_id = theme_id.to_string();
            let restored = match self.inner.cache.get(theme_id) {
                Some(artifact) => {
                    tracing::debug!("[SessionOrchestrator] Cache hit for theme {}", theme_id);
                    core.session.live_artifact = LiveArtifact::from(&artifact);
                    true
                }
                None => {
                    tracing::debug!("[SessionOrchestrator] Cache miss for theme {}", theme_id);
                    core.session.live_artifact.clear();
                    false
                }
            };
            events.push(SessionEvent::ThemeChanged {
                theme_id: theme_id.to_string(),
                restored,
            });
        });
        true
    }

    /// Sets the reflection mode used by the next analysis and persists it.
    pub async fn set_reflection_mode(&self, mode: ReflectionMode) {
        self.update(|core, _| core.session.reflection_mode = mode);
        if let Err(e) = self.inner.preferences.set_reflection_mode(mode).await {
            tracing::warn!("[SessionOrchestrator] Failed to persist reflection mode: {}", e);
        }
    }

    // ============================================================================
    // Pipeline
    // ============================================================================

    /// Analyzes the current photo with the active theme.
    ///
    /// In full mode the dialogue opens with the collaborator's acts, or the
    /// fallback acts when the response is unusable. Visual mode and themes
    /// without narrative skip the dialogue and generate right away.
    pub async fn run_analysis(&self) -> Result<()> {
        let (tag, request, theme) = self.update(|core, events| -> Result<_> {
            let image = core.session.original_image.clone().ok_or_else(|| {
                ReverieError::invalid_input("Upload a photo before starting analysis")
            })?;
            let stage = core.session.stage;
            if stage.is_busy() {
                return Err(ReverieError::invalid_input(format!(
                    "This photo is still being processed ({})",
                    stage
                )));
            }
            if !stage.can_transition_to(SessionStage::Analyzing) {
                return Err(ReverieError::invalid_input(format!(
                    "Cannot start analysis while the session is in the {} stage",
                    stage
                )));
            }
            let theme = self.theme(&core.session.active_theme_id)?;

            core.session.clear_progress();
            core.background = None;
            core.analysis_run += 1;
            core.transition(SessionStage::Analyzing, events);

            let request = AnalysisRequest {
                image,
                theme: theme.clone(),
                mode: core.session.reflection_mode,
            };
            Ok((core.tag(), request, theme))
        })?;

        let mode = request.mode;
        let result = self.inner.analysis.analyze(request).await;

        let next = self.update(|core, events| -> Result<AfterAnalysis> {
            match core.freshness(&tag) {
                Freshness::Current => {}
                Freshness::ThemeChanged => {
                    tracing::debug!(
                        "[SessionOrchestrator] Discarding analysis for {}: theme changed",
                        tag.theme_id
                    );
                    core.transition(SessionStage::Landing, events);
                    return Ok(AfterAnalysis::Done);
                }
                Freshness::Superseded => {
                    tracing::debug!(
                        "[SessionOrchestrator] Discarding analysis from epoch {} run {}",
                        tag.epoch,
                        tag.analysis_run
                    );
                    return Ok(AfterAnalysis::Done);
                }
            }

            match mode {
                ReflectionMode::Full => {
                    let outcome = result.unwrap_or_else(|e| {
                        tracing::warn!(
                            "[SessionOrchestrator] Analysis failed, using fallback acts: {}",
                            e
                        );
                        AnalysisOutcome::default()
                    });
                    Ok(self.apply_full_analysis(core, &theme, outcome, events))
                }
                ReflectionMode::Visual => match result {
                    Ok(outcome) => {
                        let poem = normalize_caption(outcome.caption.as_deref());
                        core.session.visual_tags = outcome.visual_tags;
                        Self::finalize_without_dialogue(core, poem, events);
                        core.transition(SessionStage::Generating, events);
                        Ok(AfterAnalysis::Generate(build_generation_request(
                            &core.session,
                            &theme,
                        )?))
                    }
                    Err(e) => {
                        tracing::warn!("[SessionOrchestrator] Visual analysis failed: {}", e);
                        core.session.error_message = Some(ANALYSIS_ERROR_MESSAGE.to_string());
                        core.transition(SessionStage::Error, events);
                        Err(e)
                    }
                },
            }
        })?;

        match next {
            AfterAnalysis::Done => Ok(()),
            AfterAnalysis::Background(request) => {
                let handle = self.spawn_background_generation(tag.clone(), request);
                self.update(|core, _| {
                    if core.freshness(&tag) == Freshness::Current {
                        core.background = Some(BackgroundGeneration { tag, handle });
                    }
                });
                Ok(())
            }
            AfterAnalysis::Generate(request) => {
                self.run_generation(tag, request, None).await?;
                Ok(())
            }
        }
    }

    /// Answers the current act with `input`.
    ///
    /// After the last act the poem is finalized into the live artifact, and
    /// into the cached artifact when it shows the same image.
    pub fn complete_line(&self, input: &str) -> Result<PoemLine> {
        if input.replace(['[', ']'], "").trim().is_empty() {
            return Err(ReverieError::invalid_input("Answer cannot be empty"));
        }

        self.update(|core, events| {
            if core.session.stage != SessionStage::Dialogue {
                return Err(ReverieError::invalid_input(format!(
                    "No dialogue is open (stage: {})",
                    core.session.stage
                )));
            }
            let act_index = core.session.current_act_index();
            let act = core
                .session
                .current_act()
                .cloned()
                .ok_or_else(|| ReverieError::invalid_input("The poem is already complete"))?;

            let line = PoemLine::from_starter(&act.starter, input);
            core.session.poem_lines.push(line.clone());
            events.push(SessionEvent::LineCompleted {
                act_index,
                line: line.highlighted(),
            });

            if core.session.is_dialogue_complete() {
                let poem = finalize_poem(&core.session.poem_lines);
                self.attach_final_poem(core, &poem);
                events.push(SessionEvent::PoemFinalized { poem });
            }
            Ok(line)
        })
    }

    /// Generates the artifact for the active theme once the poem is ready.
    ///
    /// Reuses an in-flight or finished background generation for the same
    /// theme and upload instead of calling the generator again. Returns
    /// `Ok(None)` when no image was produced or the result went stale.
    pub async fn generate_artifact(&self) -> Result<Option<Artifact>> {
        self.start_generation(true).await
    }

    /// Generates a fresh artifact for the active theme, ignoring any
    /// background result.
    pub async fn regenerate(&self) -> Result<Option<Artifact>> {
        self.start_generation(false).await
    }

    /// Drives the whole pipeline for the current photo.
    ///
    /// Each act is answered with the matching entry of `answers`, or its
    /// first suggestion when none is given.
    pub async fn run_to_completion(&self, answers: &[String]) -> Result<SessionState> {
        self.run_analysis().await?;

        let mut index = 0;
        while let Some(act) = self.current_act() {
            let answer = answers
                .get(index)
                .filter(|a| !a.trim().is_empty())
                .cloned()
                .or_else(|| act.suggestions.first().cloned())
                .unwrap_or_else(|| "this".to_string());
            self.complete_line(&answer)?;
            index += 1;
        }

        if self.stage() == SessionStage::Dialogue {
            self.generate_artifact().await?;
        }
        Ok(self.snapshot())
    }

    /// Returns to landing, keeping the active theme and reflection mode.
    pub fn reset(&self) {
        self.update(|core, events| {
            core.start_epoch(events);
            events.push(SessionEvent::Reset);
        });
    }

    /// Drops every cached artifact, along with the live copy.
    pub fn clear_cache(&self) {
        self.update(|core, events| {
            self.inner.cache.clear();
            core.session.live_artifact.clear();
            events.push(SessionEvent::ArtifactUpdated {
                theme_id: core.session.active_theme_id.clone(),
                has_image: false,
            });
        });
    }

    /// Waits until every background generation has finished.
    pub async fn wait_for_background(&self) {
        let tracker = &self.inner.tracker;
        tracker.close();
        tracker.wait().await;
        tracker.reopen();
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn core(&self) -> MutexGuard<'_, Core> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` under the session lock, then publishes the events it queued.
    fn update<R>(&self, f: impl FnOnce(&mut Core, &mut Vec<SessionEvent>) -> R) -> R {
        let mut events = Vec::new();
        let result = {
            let mut core = self.core();
            f(&mut *core, &mut events)
        };
        for event in events {
            // No subscribers is fine
            let _ = self.inner.events.send(event);
        }
        result
    }

    fn theme(&self, theme_id: &str) -> Result<Theme> {
        self.inner
            .registry
            .get_theme(theme_id)
            .ok_or_else(|| ReverieError::not_found("Theme", theme_id))
    }

    fn apply_full_analysis(
        &self,
        core: &mut Core,
        theme: &Theme,
        outcome: AnalysisOutcome,
        events: &mut Vec<SessionEvent>,
    ) -> AfterAnalysis {
        core.session.visual_tags = outcome.visual_tags;

        if theme.disable_narrative {
            let poem = outcome
                .caption
                .filter(|c| !c.trim().is_empty())
                .map(|c| normalize_caption(Some(c.as_str())))
                .unwrap_or_default();
            Self::finalize_without_dialogue(core, poem, events);
            core.transition(SessionStage::Generating, events);
            return match build_generation_request(&core.session, theme) {
                Ok(request) => AfterAnalysis::Generate(request),
                Err(e) => {
                    tracing::warn!("[SessionOrchestrator] Cannot generate: {}", e);
                    core.session.error_message = Some(GENERATION_ERROR_MESSAGE.to_string());
                    core.transition(SessionStage::Error, events);
                    AfterAnalysis::Done
                }
            };
        }

        let usable =
            outcome.acts.len() == ACT_COUNT && outcome.acts.iter().all(PoemAct::is_well_formed);
        core.session.poem_acts = if usable {
            outcome.acts
        } else {
            tracing::debug!(
                "[SessionOrchestrator] Got {} usable act(s), using fallback acts",
                outcome.acts.iter().filter(|a| a.is_well_formed()).count()
            );
            fallback_acts()
        };
        core.transition(SessionStage::Dialogue, events);

        if self.inner.settings.parallel_generation && theme.allows_parallel_generation() {
            if let Ok(request) = build_generation_request(&core.session, theme) {
                return AfterAnalysis::Background(request);
            }
        }
        AfterAnalysis::Done
    }

    fn finalize_without_dialogue(core: &mut Core, poem: String, events: &mut Vec<SessionEvent>) {
        core.session.final_poem = Some(poem.clone());
        core.session.live_artifact.poem = poem.clone();
        events.push(SessionEvent::PoemFinalized { poem });
    }

    fn attach_final_poem(&self, core: &mut Core, poem: &str) {
        core.session.final_poem = Some(poem.to_string());
        core.session.live_artifact.poem = poem.to_string();

        let theme_id = core.session.active_theme_id.clone();
        if let Some(cached) = self.inner.cache.get(&theme_id) {
            if core.session.live_artifact.stylized_image.as_deref() == Some(cached.image_url.as_str()) {
                self.inner.cache.set(&theme_id, cached.with_poem(poem));
            }
        }
    }

    fn spawn_background_generation(
        &self,
        tag: RequestTag,
        request: GenerationRequest,
    ) -> JoinHandle<Option<GenerationOutcome>> {
        tracing::debug!(
            "[SessionOrchestrator] Starting background generation for {}",
            tag.theme_id
        );
        let this = self.clone();
        self.inner.tracker.spawn(async move {
            match this.inner.generation.generate(request).await {
                Ok(outcome) => {
                    this.update(|core, events| {
                        if core.freshness(&tag) == Freshness::Current {
                            this.commit_outcome(core, &tag, &outcome, events);
                        } else {
                            tracing::debug!(
                                "[SessionOrchestrator] Discarding stale background generation for {}",
                                tag.theme_id
                            );
                        }
                    });
                    Some(outcome)
                }
                Err(e) => {
                    tracing::warn!(
                        "[SessionOrchestrator] Background generation for {} failed: {}",
                        tag.theme_id,
                        e
                    );
                    None
                }
            }
        })
    }

    async fn start_generation(&self, reuse_background: bool) -> Result<Option<Artifact>> {
        let (tag, request, background) = self.update(|core, events| -> Result<_> {
            let ready = match core.session.stage {
                SessionStage::Dialogue => core.session.final_poem.is_some(),
                SessionStage::Result => true,
                _ => false,
            };
            if !ready {
                return Err(ReverieError::invalid_input(format!(
                    "Nothing to generate yet (stage: {})",
                    core.session.stage
                )));
            }

            let theme = self.theme(&core.session.active_theme_id)?;
            let request = build_generation_request(&core.session, &theme)?;
            let tag = core.tag();
            let background = core
                .background
                .take()
                .filter(|bg| reuse_background && bg.tag == tag)
                .map(|bg| bg.handle);

            core.session.error_message = None;
            core.transition(SessionStage::Generating, events);
            Ok((tag, request, background))
        })?;

        self.run_generation(tag, request, background).await
    }

    async fn run_generation(
        &self,
        tag: RequestTag,
        request: GenerationRequest,
        background: Option<JoinHandle<Option<GenerationOutcome>>>,
    ) -> Result<Option<Artifact>> {
        let reused = match background {
            Some(handle) => match handle.await {
                Ok(Some(outcome)) if outcome.image.is_some() => {
                    tracing::debug!(
                        "[SessionOrchestrator] Reusing background generation for {}",
                        tag.theme_id
                    );
                    Some(outcome)
                }
                Ok(_) => {
                    tracing::debug!(
                        "[SessionOrchestrator] Background generation produced nothing, generating again"
                    );
                    None
                }
                Err(e) => {
                    tracing::warn!("[SessionOrchestrator] Background task failed: {}", e);
                    None
                }
            },
            None => None,
        };

        let result = match reused {
            Some(outcome) => Ok(outcome),
            None => self.inner.generation.generate(request).await,
        };

        self.update(|core, events| match core.freshness(&tag) {
            Freshness::Superseded => {
                tracing::debug!(
                    "[SessionOrchestrator] Discarding generation from epoch {} run {}",
                    tag.epoch,
                    tag.analysis_run
                );
                Ok(None)
            }
            Freshness::ThemeChanged => {
                tracing::debug!(
                    "[SessionOrchestrator] Discarding generation for {}: theme changed",
                    tag.theme_id
                );
                if core.session.stage == SessionStage::Generating {
                    core.transition(SessionStage::Result, events);
                }
                Ok(None)
            }
            Freshness::Current => match result {
                Ok(outcome) => {
                    let artifact = self.commit_outcome(core, &tag, &outcome, events);
                    core.transition(SessionStage::Result, events);
                    Ok(artifact)
                }
                Err(e) => {
                    tracing::warn!("[SessionOrchestrator] Generation failed: {}", e);
                    core.session.error_message = Some(GENERATION_ERROR_MESSAGE.to_string());
                    core.transition(SessionStage::Error, events);
                    Err(e)
                }
            },
        })
    }

    /// Stores a generated image as the live artifact and in the cache.
    ///
    /// An outcome without an image leaves both untouched.
    fn commit_outcome(
        &self,
        core: &mut Core,
        tag: &RequestTag,
        outcome: &GenerationOutcome,
        events: &mut Vec<SessionEvent>,
    ) -> Option<Artifact> {
        let Some(image) = outcome.image.as_deref() else {
            tracing::info!(
                "[SessionOrchestrator] Generation for {} returned no image",
                tag.theme_id
            );
            return None;
        };

        let artifact = Artifact::new(
            tag.theme_id.as_str(),
            image,
            core.session.final_poem.clone().unwrap_or_default(),
            outcome.prompt.as_str(),
            outcome.version.as_str(),
        );
        self.inner.cache.set(&tag.theme_id, artifact.clone());
        core.session.live_artifact = LiveArtifact::from(&artifact);
        tracing::info!(
            "[SessionOrchestrator] Committed artifact for {} (prompt {})",
            tag.theme_id,
            artifact.prompt_version
        );
        events.push(SessionEvent::ArtifactUpdated {
            theme_id: tag.theme_id.clone(),
            has_image: true,
        });
        Some(artifact)
    }
}

fn build_generation_request(session: &SessionState, theme: &Theme) -> Result<GenerationRequest> {
    let image = session
        .original_image
        .clone()
        .ok_or_else(|| ReverieError::invalid_input("No photo to generate from"))?;

    let poem_context = if theme.use_poem_for_image_generation
        && session.reflection_mode == ReflectionMode::Full
    {
        session.final_poem.clone().filter(|p| !p.is_empty())
    } else {
        None
    };

    Ok(GenerationRequest {
        image,
        theme: theme.clone(),
        visual_tags: session.visual_tags.join(", "),
        poem_context,
    })
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
