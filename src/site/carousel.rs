use crate::models::Banner;

/// Shown when no banner has been uploaded.
pub const FALLBACK_BANNERS: [&str; 3] = [
    "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=2574",
    "https://images.unsplash.com/photo-1604719312566-8912e9227c6a?w=800",
    "https://images.unsplash.com/photo-1534723452862-4c874018d66d?w=800",
];

pub const DEFAULT_ROTATION_MS: u64 = 3000;

/// Home page banner rotation. Never empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
    fallback: bool,
}

impl Carousel {
    /// `banners` are expected in display order. `active` is not filtered on.
    pub fn new(banners: &[Banner]) -> Self {
        if banners.is_empty() {
            return Self {
                images: FALLBACK_BANNERS.iter().map(|s| s.to_string()).collect(),
                index: 0,
                fallback: true,
            };
        }

        Self {
            images: banners.iter().map(|b| b.image_url.clone()).collect(),
            index: 0,
            fallback: false,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    /// Advances one slide, wrapping at the end.
    pub fn tick(&mut self) {
        self.index = (self.index + 1) % self.images.len();
    }

    /// Position after `ticks` rotations from the first slide.
    pub fn at_tick(mut self, ticks: u64) -> Self {
        self.index = (ticks % self.images.len() as u64) as usize;
        self
    }
}
