use rayon::prelude::*;

use crate::foundation::core::{Anchor, Statement};
use crate::foundation::error::{OverprintError, OverprintResult};
use crate::foundation::raster::Raster;
use crate::overlay::plan::OverlayPlan;
use crate::render::composite::overlay_on_surface;
use crate::render::cpu::CpuSurface;
use crate::text::font::{FontFace, TextShaper};

/// A stamped raster and the plan that produced it.
#[derive(Clone, Debug)]
pub struct StampOutput {
    /// Output pixels; same dimensions as the input.
    pub raster: Raster,
    /// Layout, placement and color decisions.
    pub plan: OverlayPlan,
}

/// One authoritative stamping job. The worker that runs it owns `image` exclusively.
#[derive(Clone, Debug)]
pub struct StampRequest {
    /// Source pixels.
    pub image: Raster,
    /// Raw statement; validated by the worker.
    pub statement: String,
    /// Target corner.
    pub anchor: Anchor,
}

/// Authoritative stamp of `statement` onto a copy of `image`.
///
/// `image` itself is never modified.
#[tracing::instrument(
    skip(image, statement, font),
    fields(width = image.width(), height = image.height(), font = font.family_name())
)]
pub fn stamp(
    image: &Raster,
    statement: &str,
    anchor: Anchor,
    font: &FontFace,
) -> OverprintResult<StampOutput> {
    let mut shaper = font.shaper()?;
    stamp_with_shaper(image.clone(), statement, anchor, &mut shaper)
}

/// Stamp an owned raster with an existing shaper (one per worker thread).
pub fn stamp_with_shaper(
    image: Raster,
    statement: &str,
    anchor: Anchor,
    shaper: &mut TextShaper,
) -> OverprintResult<StampOutput> {
    let statement = Statement::parse(statement)?;
    let mut surface = CpuSurface::new(image, shaper);
    let plan = overlay_on_surface(&mut surface, &statement, anchor)?;
    Ok(StampOutput {
        raster: surface.into_raster(),
        plan,
    })
}

/// Bounded worker pool for stamping off the caller's thread.
///
/// Every worker keeps its own [`TextShaper`]; requests share nothing mutable.
pub struct StampPool {
    pool: rayon::ThreadPool,
    font: FontFace,
}

impl StampPool {
    /// Build a pool with `threads` workers, or rayon's default when `None`.
    pub fn new(font: FontFace, threads: Option<usize>) -> OverprintResult<Self> {
        Ok(Self {
            pool: build_thread_pool(threads)?,
            font,
        })
    }

    /// Worker count.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Face every worker stamps with.
    pub fn font(&self) -> &FontFace {
        &self.font
    }

    /// Run one request on the pool and wait for it.
    pub fn stamp(&self, request: StampRequest) -> OverprintResult<StampOutput> {
        self.pool.install(|| {
            let mut shaper = self.font.shaper()?;
            stamp_with_shaper(
                request.image,
                &request.statement,
                request.anchor,
                &mut shaper,
            )
        })
    }

    /// Run many requests; results come back in request order and a failure only affects
    /// its own slot.
    #[tracing::instrument(
        skip(self, requests),
        fields(requests = requests.len(), threads = self.threads())
    )]
    pub fn stamp_batch(&self, requests: Vec<StampRequest>) -> Vec<OverprintResult<StampOutput>> {
        let font = &self.font;
        let out: Vec<OverprintResult<StampOutput>> = self.pool.install(|| {
            requests
                .into_par_iter()
                .map_init(
                    || font.shaper(),
                    |shaper, req| match shaper {
                        Ok(shaper) => {
                            stamp_with_shaper(req.image, &req.statement, req.anchor, shaper)
                        }
                        Err(e) => Err(OverprintError::font(e.to_string())),
                    },
                )
                .collect()
        });

        let failed = out.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(failed, total = out.len(), "some stamp requests failed");
        }
        out
    }
}

fn build_thread_pool(threads: Option<usize>) -> OverprintResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(OverprintError::config(
            "stamp pool 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("overprint-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| OverprintError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
