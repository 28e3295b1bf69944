//! The render context.

use config::Config;
use geometry::frame::Frame;
use tracing::{span, Level};

use crate::cache::PictureCache;
use crate::canvas::Canvas;
use crate::error::{check_depth, Error, Result};
use crate::picture::{draw_styled, PictureRef};
use crate::raster::RasterImage;
use crate::style::{Color, Style};

/// The capacity of the cache a [`Context`] creates when none is supplied.
pub const DEFAULT_CACHE_LIMIT: usize = 4096;

/// Canvas size, default style, depth cap, and a shared construction cache.
///
/// Cheaply clonable; clones share the cache. Unless
/// [`ContextBuilder::cache`] supplies one, the cache is bounded by
/// [`DEFAULT_CACHE_LIMIT`] and keeps the base pictures it has seen alive
/// until it is cleared or evicts them.
///
/// # Examples
///
/// ```
/// # use tessera::context::Context;
/// # use tessera::shapes::wave;
/// let ctx = Context::builder().size(256, 256).max_depth(4).build();
/// let picture = ctx.square_limit(&wave(), 3).unwrap();
///
/// let mut image = ctx.raster();
/// ctx.draw(&picture, &mut image);
///
/// assert!(ctx.square_limit(&wave(), 5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    width: u32,
    height: u32,
    style: Style,
    max_depth: Option<u32>,
    /// A cache for recursive pictures built through this context.
    pub cache: PictureCache,
}

impl Default for Context {
    fn default() -> Self {
        ContextBuilder::new().build()
    }
}

impl Context {
    /// Creates a [`Context`] with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Creates a context from loaded configuration.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let stroke: Color = cfg.style.stroke.parse()?;
        let mut builder = Self::builder();
        builder
            .size(cfg.canvas.width, cfg.canvas.height)
            .style(Style::new(stroke, cfg.style.weight));
        builder.max_depth = cfg.render.max_depth;
        Ok(builder.build())
    }

    /// Creates a context from the configuration of the current process.
    ///
    /// See [`Config::default`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::default()?)
    }

    /// Canvas width in device units.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in device units.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The default style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The largest recursion depth this context accepts, if capped.
    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// The frame covering the whole canvas.
    pub fn frame(&self) -> Frame {
        Frame::from_size(self.width as f64, self.height as f64)
    }

    /// A blank raster the size of the canvas.
    pub fn raster(&self) -> RasterImage {
        RasterImage::new(self.width, self.height)
    }

    /// Renders `picture` over the whole canvas with the default style.
    pub fn draw(&self, picture: &PictureRef, canvas: &mut dyn Canvas) {
        let span = span!(Level::INFO, "draw", width = self.width, height = self.height);
        let _guard = span.enter();
        draw_styled(picture, &self.frame(), &self.style, canvas);
    }

    /// Validates a recursion depth against the configured cap.
    pub fn check_depth(&self, depth: i32) -> Result<u32> {
        let depth = check_depth(depth)?;
        match self.max_depth {
            Some(max) if depth > max => Err(Error::DepthLimitExceeded { depth, max }),
            _ => Ok(depth),
        }
    }

    /// A cached [`corner_split`](crate::split::corner_split) bounded by the depth cap.
    pub fn corner_split(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        self.check_depth(n)?;
        self.cache.corner_split(p, n)
    }

    /// A cached [`square_limit`](crate::split::square_limit) bounded by the depth cap.
    pub fn square_limit(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        self.check_depth(n)?;
        self.cache.square_limit(p, n)
    }
}

/// Builder for creating a Tessera [`Context`].
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    width: u32,
    height: u32,
    style: Style,
    max_depth: Option<u32>,
    cache: Option<PictureCache>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            width: config::DEFAULT_CANVAS_SIZE,
            height: config::DEFAULT_CANVAS_SIZE,
            style: Style::default(),
            max_depth: Some(config::DEFAULT_MAX_DEPTH),
            cache: None,
        }
    }
}

impl ContextBuilder {
    /// Creates a builder populated with built-in defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canvas size.
    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the default style.
    pub fn style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    /// Caps the recursion depth.
    pub fn max_depth(&mut self, max_depth: u32) -> &mut Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Removes the cap on recursion depth.
    pub fn unbounded(&mut self) -> &mut Self {
        self.max_depth = None;
        self
    }

    /// Shares an existing cache instead of creating a new one.
    pub fn cache(&mut self, cache: PictureCache) -> &mut Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the context based on the configuration in this builder.
    pub fn build(&mut self) -> Context {
        Context {
            width: self.width,
            height: self.height,
            style: self.style,
            max_depth: self.max_depth,
            cache: self
                .cache
                .clone()
                .unwrap_or_else(|| PictureCache::bounded(DEFAULT_CACHE_LIMIT)),
        }
    }
}
