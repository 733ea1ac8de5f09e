use std::{
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    color::Rgb8,
    compositor::frame::Frame,
    config::{BoothConfig, MAX_TARGET_FRAMES},
    foundation::{
        core::Rgba8,
        error::{BoothError, BoothResult},
    },
    render::{surface::Surface, text::FontFace},
    strip::{barrier::CompletionBarrier, layout::StripLayout},
    theme::{DecorationContext, Theme},
};

/// Shared counter identifying the newest assembly request.
///
/// Clones share the counter. Bumping it makes every job prepared under an older value stale.
#[derive(Clone, Debug, Default)]
pub struct AssemblyGeneration(Arc<AtomicU64>);

impl AssemblyGeneration {
    /// Fresh counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Advance and return the new value.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Final composited strip and its PNG export.
#[derive(Clone, Debug, PartialEq)]
pub struct Strip {
    theme: Theme,
    background: Rgb8,
    image: RgbaImage,
    png: Vec<u8>,
}

impl Strip {
    /// Theme it was decorated with.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Background colour.
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Straight-alpha pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Owned copy of the pixels.
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Encoded PNG.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,...` URI of the PNG export.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    /// Write the PNG export to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> BoothResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.png)
            .with_context(|| format!("write strip '{}'", path.display()))?;
        Ok(())
    }
}

/// Builds strips from captured frames.
#[derive(Clone, Debug)]
pub struct StripAssembler {
    layout: StripLayout,
    generation: AssemblyGeneration,
    decoration: Option<DecorationContext>,
    font: Option<FontFace>,
    pool: Arc<rayon::ThreadPool>,
}

impl StripAssembler {
    /// Assembler using the layout, font and thread settings of `config`.
    pub fn new(config: &BoothConfig) -> BoothResult<Self> {
        let layout = StripLayout::new(config.capture.canvas()?, config.layout);
        let font = config.font.as_deref().map(FontFace::load).transpose()?;
        if let Some(f) = &font {
            tracing::debug!(family = f.family(), "decoration font loaded");
        }
        let pool = build_thread_pool(config.effective_threads())?;
        Ok(Self {
            layout,
            generation: AssemblyGeneration::new(),
            decoration: None,
            font,
            pool: Arc::new(pool),
        })
    }

    /// Share `generation` with other owners (typically the capture session).
    pub fn with_generation(mut self, generation: AssemblyGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Fix the decoration context instead of reading today's date per assembly.
    ///
    /// A context without a font inherits the configured one.
    pub fn with_decoration(mut self, ctx: DecorationContext) -> Self {
        self.decoration = Some(ctx);
        self
    }

    /// Strip geometry.
    pub fn layout(&self) -> StripLayout {
        self.layout
    }

    /// Generation counter shared by this assembler.
    pub fn generation(&self) -> &AssemblyGeneration {
        &self.generation
    }

    /// Make every prepared job stale. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let next = self.generation.bump();
        tracing::debug!(generation = next, "assembly invalidated");
        next
    }

    /// Validate inputs and claim a new generation.
    pub fn prepare(
        &self,
        theme: Theme,
        background: Rgb8,
        frames: &[Frame],
    ) -> BoothResult<AssemblyJob> {
        if frames.is_empty() {
            return Err(BoothError::validation("a strip needs at least one frame"));
        }
        if frames.len() > MAX_TARGET_FRAMES {
            return Err(BoothError::validation(format!(
                "a strip holds at most {MAX_TARGET_FRAMES} frames, got {}",
                frames.len()
            )));
        }
        if let Some((i, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.canvas() != self.layout.photo)
        {
            return Err(BoothError::validation(format!(
                "frame {i} is {}x{}, expected {}x{}",
                f.canvas().width,
                f.canvas().height,
                self.layout.photo.width,
                self.layout.photo.height
            )));
        }

        let mut decoration = self
            .decoration
            .clone()
            .unwrap_or_else(DecorationContext::today);
        if decoration.font.is_none() {
            decoration.font = self.font.clone();
        }

        let generation = self.generation.bump();
        tracing::debug!(generation, frames = frames.len(), "assembly prepared");
        Ok(AssemblyJob {
            theme,
            background,
            frames: frames.to_vec(),
            generation,
            current: self.generation.clone(),
            layout: self.layout,
            decoration,
            pool: Arc::clone(&self.pool),
        })
    }

    /// Prepare and run in one step.
    pub fn assemble(&self, theme: Theme, background: Rgb8, frames: &[Frame]) -> BoothResult<Strip> {
        self.prepare(theme, background, frames)?.run()
    }
}

/// One assembly request, bound to the generation it was prepared under.
#[derive(Debug)]
pub struct AssemblyJob {
    theme: Theme,
    background: Rgb8,
    frames: Vec<Frame>,
    generation: u64,
    current: AssemblyGeneration,
    layout: StripLayout,
    decoration: DecorationContext,
    pool: Arc<rayon::ThreadPool>,
}

struct Shared {
    surface: Mutex<Option<Surface>>,
    barrier: CompletionBarrier,
}

const SHADOW: Rgba8 = Rgba8::new(0, 0, 0, 26);

impl AssemblyJob {
    /// Generation claimed by this job.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` once a newer job was prepared or the assembler was invalidated.
    pub fn is_stale(&self) -> bool {
        self.current.current() != self.generation
    }

    /// Decode every frame in parallel, draw it into its slot and finalize exactly once.
    #[tracing::instrument(
        skip(self),
        fields(theme = %self.theme, frames = self.frames.len(), generation = self.generation)
    )]
    pub fn run(self) -> BoothResult<Strip> {
        let shared = self.begin()?;
        let results = self.pool.install(|| {
            (0..self.frames.len())
                .into_par_iter()
                .map(|i| self.process(i, &shared))
                .collect::<Vec<_>>()
        });
        self.collect(results)
    }

    /// Sequential run completing frames in `order`. Also returns how often the barrier fired.
    #[cfg(test)]
    pub(crate) fn run_in_order(self, order: &[usize]) -> BoothResult<(Strip, usize)> {
        let shared = self.begin()?;
        let mut results: Vec<BoothResult<Option<Strip>>> =
            (0..self.frames.len()).map(|_| Ok(None)).collect();
        for &i in order {
            results[i] = self.process(i, &shared);
        }
        let strip = self.collect(results)?;
        Ok((strip, shared.barrier.fired()))
    }

    fn begin(&self) -> BoothResult<Shared> {
        if self.is_stale() {
            tracing::warn!(generation = self.generation, "assembly stale before start");
            return Err(BoothError::AssemblyStale);
        }
        let canvas = self.layout.canvas(self.frames.len())?;
        let mut surface = Surface::filled(canvas, self.background.to_rgba8());
        self.theme
            .decorator()
            .decorate(&mut surface, self.background, &self.decoration)?;
        Ok(Shared {
            surface: Mutex::new(Some(surface)),
            barrier: CompletionBarrier::new(self.frames.len()),
        })
    }

    fn process(&self, i: usize, shared: &Shared) -> BoothResult<Option<Strip>> {
        let img = self.frames[i].decode().map_err(|e| {
            tracing::warn!(index = i, error = %e, "frame decode failed");
            BoothError::decode_failed(i, e)
        })?;

        let photo = self.layout.photo_rect(i);
        let passes = self.theme.decorator().photo_passes(photo);
        {
            let mut guard = shared
                .surface
                .lock()
                .map_err(|_| BoothError::render("strip surface poisoned"))?;
            let surface = guard
                .as_mut()
                .ok_or_else(|| BoothError::render("strip surface already finalized"))?;
            surface.fill_rect(self.layout.shadow_rect(i), SHADOW);
            surface.blit(&img, photo.x0 as i64, photo.y0 as i64);
            for pass in &passes {
                pass.apply(surface);
            }
        }

        if !shared.barrier.arrive(i)? {
            return Ok(None);
        }
        self.finalize(shared).map(Some)
    }

    fn finalize(&self, shared: &Shared) -> BoothResult<Strip> {
        if self.is_stale() {
            tracing::warn!(
                generation = self.generation,
                current = self.current.current(),
                "assembly superseded, discarding"
            );
            return Err(BoothError::AssemblyStale);
        }
        let surface = shared
            .surface
            .lock()
            .map_err(|_| BoothError::render("strip surface poisoned"))?
            .take()
            .ok_or_else(|| BoothError::render("strip surface already finalized"))?;
        let image = surface.to_rgba_image()?;
        let png = crate::assets::decode::encode_png(&image)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            bytes = png.len(),
            "strip finalized"
        );
        Ok(Strip {
            theme: self.theme,
            background: self.background,
            image,
            png,
        })
    }

    fn collect(&self, results: Vec<BoothResult<Option<Strip>>>) -> BoothResult<Strip> {
        let mut strip = None;
        for r in results {
            if let Some(s) = r? {
                if strip.is_some() {
                    return Err(BoothError::render("assembly finalized more than once"));
                }
                strip = Some(s);
            }
        }
        strip.ok_or_else(|| BoothError::render("assembly finished without finalizing"))
    }
}

fn build_thread_pool(threads: Option<usize>) -> BoothResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BoothError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BoothError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/strip/assembler.rs"]
mod tests;
