use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    assets::decode::{PreparedImage, decode_image},
    assets::source::ImageSource,
    export::png::encode_png,
    foundation::core::RasterRGBA,
    foundation::error::{MosaicoError, MosaicoResult},
    render::cpu::CpuCompositor,
    render::plan::CompositePlan,
    scene::workspace::Workspace,
};

/// Environment override for decode parallelism (`MOSAICO_DECODE_THREADS=<n>`).
pub const DECODE_THREADS_ENV: &str = "MOSAICO_DECODE_THREADS";

/// How the resolve stage decodes fragment images.
///
/// Drawing is always sequential in fragment order; only decoding may fan out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeThreading {
    pub parallel: bool,
    /// Rayon worker count when `parallel`; `None` lets rayon choose.
    pub threads: Option<usize>,
}

impl DecodeThreading {
    /// Apply [`DECODE_THREADS_ENV`] when it holds a positive integer.
    pub fn with_env_override(self) -> Self {
        std::env::var(DECODE_THREADS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .map(|n| Self {
                parallel: true,
                threads: Some(n),
            })
            .unwrap_or(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeSettings {
    pub threading: DecodeThreading,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Fragments that reached the canvas.
    pub drawn: usize,
    /// Fragments whose image could not be read or decoded.
    pub skipped: usize,
    /// Fragments with no image assigned (e.g. empty grid cells).
    pub unassigned: usize,
}

#[derive(Clone, Debug)]
pub struct CompositeOutput {
    pub raster: RasterRGBA,
    pub stats: CompositeStats,
}

/// Resolves fragment images and rasterizes composite plans.
pub struct Compositor {
    source: Arc<dyn ImageSource>,
    settings: CompositeSettings,
}

impl Compositor {
    pub fn new(source: Arc<dyn ImageSource>, settings: CompositeSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &CompositeSettings {
        &self.settings
    }

    /// Render the workspace's export composite.
    ///
    /// `Ok(None)` when there is nothing to render (no fragments or a zero-sized canvas).
    #[tracing::instrument(skip(self, workspace))]
    pub fn composite(&self, workspace: &Workspace) -> MosaicoResult<Option<CompositeOutput>> {
        workspace
            .plan()
            .map(|plan| self.render_plan(&plan))
            .transpose()
    }

    /// Render the opaque mosaic used to feed a new crop.
    #[tracing::instrument(skip(self, workspace))]
    pub fn composite_for_crop(
        &self,
        workspace: &Workspace,
    ) -> MosaicoResult<Option<CompositeOutput>> {
        workspace
            .plan_mosaic()
            .map(|plan| self.render_plan(&plan))
            .transpose()
    }

    /// Encoded PNG of the export composite, for a preview surface. Nothing is written to disk.
    pub fn preview_png(&self, workspace: &Workspace) -> MosaicoResult<Option<Vec<u8>>> {
        self.composite(workspace)?
            .map(|out| encode_png(&out.raster))
            .transpose()
    }

    /// Resolve every image, then draw in plan order. Per-fragment failures are logged and
    /// counted, never returned.
    pub fn render_plan(&self, plan: &CompositePlan) -> MosaicoResult<CompositeOutput> {
        let (images, mut stats) = self.resolve(plan)?;
        let cpu = CpuCompositor::new(plan.extent.canvas)?;
        let (data, drawn) = cpu.render(plan, &images)?;
        stats.drawn = drawn;
        tracing::debug!(
            drawn = stats.drawn,
            skipped = stats.skipped,
            unassigned = stats.unassigned,
            "composite rendered"
        );
        Ok(CompositeOutput {
            raster: RasterRGBA {
                width: plan.extent.canvas.width,
                height: plan.extent.canvas.height,
                data,
                premultiplied: true,
            },
            stats,
        })
    }

    fn resolve(
        &self,
        plan: &CompositePlan,
    ) -> MosaicoResult<(Vec<Option<Arc<PreparedImage>>>, CompositeStats)> {
        // Each distinct reference is decoded once, in first-use order.
        let mut unique = Vec::<&str>::new();
        let mut index = HashMap::<&str, usize>::new();
        for d in &plan.draws {
            let key = d.source.trim();
            if key.is_empty() || index.contains_key(key) {
                continue;
            }
            index.insert(key, unique.len());
            unique.push(key);
        }

        let decode = |key: &&str| -> Option<Arc<PreparedImage>> {
            match self.source.load_bytes(key).and_then(|b| decode_image(&b)) {
                Ok(img) => Some(Arc::new(img)),
                Err(e) => {
                    tracing::warn!(source = %key, error = %e, "image unavailable, fragment skipped");
                    None
                }
            }
        };

        let t = &self.settings.threading;
        let decoded: Vec<Option<Arc<PreparedImage>>> = if t.parallel && unique.len() > 1 {
            let pool = build_thread_pool(t.threads)?;
            pool.install(|| unique.par_iter().map(decode).collect())
        } else {
            unique.iter().map(decode).collect()
        };

        let mut stats = CompositeStats::default();
        let images = plan
            .draws
            .iter()
            .map(|d| {
                let key = d.source.trim();
                if key.is_empty() {
                    tracing::debug!(fragment = %d.id, "no image assigned");
                    stats.unassigned += 1;
                    return None;
                }
                let img = index.get(key).and_then(|&i| decoded[i].clone());
                if img.is_none() {
                    stats.skipped += 1;
                }
                img
            })
            .collect();
        Ok((images, stats))
    }
}

fn build_thread_pool(threads: Option<usize>) -> MosaicoResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MosaicoError::validation(
            "decode threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MosaicoError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
