use std::collections::HashMap;

use crate::{
    foundation::core::Origin,
    foundation::error::StoryboardResult,
    storyboard::{
        layer::{SpriteId, StoryboardLayer},
        sprite::{AnimationSpec, DEFAULT_POSITION, Sprite},
    },
};

/// How a pool builds a new sprite on a miss.
pub trait SpriteFactory {
    fn create(&self, layer: &mut StoryboardLayer, path: &str, origin: Origin) -> SpriteId;
}

/// Plain static sprites.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSprite;

impl SpriteFactory for StaticSprite {
    fn create(&self, layer: &mut StoryboardLayer, path: &str, origin: Origin) -> SpriteId {
        layer.create_sprite(path, origin, DEFAULT_POSITION)
    }
}

/// Animation sprites sharing one frame sequence.
#[derive(Clone, Copy, Debug)]
pub struct AnimationFactory(pub AnimationSpec);

impl SpriteFactory for AnimationFactory {
    fn create(&self, layer: &mut StoryboardLayer, path: &str, origin: Origin) -> SpriteId {
        layer.create_animation(path, self.0, origin, DEFAULT_POSITION)
    }
}

/// Callback run once per pooled sprite by [`SpritePool::finish`] with its final window.
pub type FinalizeSprite = Box<dyn FnMut(&mut Sprite, f64, f64) -> StoryboardResult<()>>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PooledSprite {
    id: SpriteId,
    start_time: f64,
    end_time: f64,
}

/// Hit/miss counters of a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolStats {
    pub hits: u64,
    pub misses: u64,
}

/// Reuses sprites of one signature whose activity ended before a new request starts.
pub struct SpritePool {
    path: String,
    origin: Origin,
    additive: bool,
    factory: Box<dyn SpriteFactory>,
    finalize: Option<FinalizeSprite>,
    max_pool_duration: f64,
    pooled: Vec<PooledSprite>,
    stats: PoolStats,
}

impl std::fmt::Debug for SpritePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpritePool")
            .field("path", &self.path)
            .field("origin", &self.origin)
            .field("additive", &self.additive)
            .field("max_pool_duration", &self.max_pool_duration)
            .field("pooled", &self.pooled.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl SpritePool {
    pub fn new(path: impl Into<String>, origin: Origin) -> Self {
        Self::with_factory(path, origin, StaticSprite)
    }

    pub fn animation(path: impl Into<String>, origin: Origin, spec: AnimationSpec) -> Self {
        Self::with_factory(path, origin, AnimationFactory(spec))
    }

    pub fn with_factory(
        path: impl Into<String>,
        origin: Origin,
        factory: impl SpriteFactory + 'static,
    ) -> Self {
        Self {
            path: path.into(),
            origin,
            additive: false,
            factory: Box::new(factory),
            finalize: None,
            max_pool_duration: 0.0,
            pooled: Vec::new(),
            stats: PoolStats::default(),
        }
    }

    /// Pooled sprites get additive blending over their whole window on [`Self::finish`].
    pub fn with_additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    pub fn with_finalize(
        mut self,
        finalize: impl FnMut(&mut Sprite, f64, f64) -> StoryboardResult<()> + 'static,
    ) -> Self {
        self.finalize = Some(Box::new(finalize));
        self
    }

    /// Longest span one pooled sprite may cover, in milliseconds. `0` is unbounded.
    pub fn with_max_pool_duration(mut self, max_pool_duration: f64) -> Self {
        self.max_pool_duration = max_pool_duration.max(0.0);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn additive(&self) -> bool {
        self.additive
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Number of distinct sprites the pool has created.
    pub fn len(&self) -> usize {
        self.pooled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pooled.is_empty()
    }

    /// A sprite free for `[start_time, end_time]`: a pooled one whose window ended by
    /// `start_time`, or a new one from the factory.
    pub fn get(&mut self, layer: &mut StoryboardLayer, start_time: f64, end_time: f64) -> SpriteId {
        let max = self.max_pool_duration;
        let reusable = self.pooled.iter_mut().find(|p| {
            p.end_time <= start_time && (max == 0.0 || end_time - p.start_time <= max)
        });
        if let Some(p) = reusable {
            p.end_time = end_time;
            self.stats.hits += 1;
            return p.id;
        }

        let id = self.factory.create(layer, &self.path, self.origin);
        self.pooled.push(PooledSprite {
            id,
            start_time,
            end_time,
        });
        self.stats.misses += 1;
        tracing::debug!(
            path = %self.path,
            pooled = self.pooled.len(),
            start_time,
            end_time,
            "sprite pool miss"
        );
        id
    }

    /// Run the additive marking and the finalize callback once per pooled sprite, then empty
    /// the pool. Dropping a pool without calling this skips finalization.
    pub fn finish(&mut self, layer: &mut StoryboardLayer) -> StoryboardResult<()> {
        for p in std::mem::take(&mut self.pooled) {
            let sprite = layer.require_sprite_mut(p.id)?;
            if self.additive {
                sprite.additive(p.start_time, p.end_time)?;
            }
            if let Some(finalize) = &mut self.finalize {
                finalize(sprite, p.start_time, p.end_time)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PoolKey {
    path: String,
    origin: Origin,
    additive: bool,
    animation: Option<(u32, u64, crate::storyboard::sprite::LoopType)>,
}

/// Pools keyed by signature, all allocating into one layer.
#[derive(Debug, Default)]
pub struct SpritePools {
    pools: HashMap<PoolKey, SpritePool>,
    order: Vec<PoolKey>,
    max_pool_duration: f64,
}

impl SpritePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_pool_duration(mut self, max_pool_duration: f64) -> Self {
        self.max_pool_duration = max_pool_duration.max(0.0);
        self
    }

    pub fn get(
        &mut self,
        layer: &mut StoryboardLayer,
        path: &str,
        origin: Origin,
        additive: bool,
        start_time: f64,
        end_time: f64,
    ) -> SpriteId {
        let key = PoolKey {
            path: path.to_string(),
            origin,
            additive,
            animation: None,
        };
        let max = self.max_pool_duration;
        self.pool(key, || {
            SpritePool::new(path, origin)
                .with_additive(additive)
                .with_max_pool_duration(max)
        })
        .get(layer, start_time, end_time)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn get_animation(
        &mut self,
        layer: &mut StoryboardLayer,
        path: &str,
        spec: AnimationSpec,
        origin: Origin,
        additive: bool,
        start_time: f64,
        end_time: f64,
    ) -> SpriteId {
        let key = PoolKey {
            path: path.to_string(),
            origin,
            additive,
            animation: Some((
                spec.frame_count(),
                spec.frame_delay().to_bits(),
                spec.loop_type(),
            )),
        };
        let max = self.max_pool_duration;
        self.pool(key, || {
            SpritePool::animation(path, origin, spec)
                .with_additive(additive)
                .with_max_pool_duration(max)
        })
        .get(layer, start_time, end_time)
    }

    fn pool(&mut self, key: PoolKey, create: impl FnOnce() -> SpritePool) -> &mut SpritePool {
        if !self.pools.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.pools.entry(key).or_insert_with(create)
    }

    pub fn stats(&self) -> PoolStats {
        self.pools.values().fold(PoolStats::default(), |acc, p| PoolStats {
            hits: acc.hits + p.stats.hits,
            misses: acc.misses + p.stats.misses,
        })
    }

    /// Finish every pool in creation order.
    pub fn finish(&mut self, layer: &mut StoryboardLayer) -> StoryboardResult<()> {
        for key in std::mem::take(&mut self.order) {
            if let Some(mut pool) = self.pools.remove(&key) {
                pool.finish(layer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/pool.rs"]
mod tests;
