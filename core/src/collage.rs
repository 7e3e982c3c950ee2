use crate::config::{FxConfig, MAX_COLLAGE_VARIANTS};

pub const SHOW_CLASS: &str = "show";
pub const TILE_CLASS: &str = "tile";
pub const CARD_IMAGE_SELECTOR: &str = ".card img";

pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="800"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#1b2030"/><stop offset="1" stop-color="#0f1115"/></linearGradient></defs><rect fill="url(#g)" width="100%" height="100%"/><text x="50%" y="50%" fill="#9aa1a9" font-family="Inter, Arial" font-size="42" text-anchor="middle" dominant-baseline="middle">No photo</text></svg>"##;

/// Hero image followed by `variants` derived siblings: `a.jpg` becomes
/// `a.jpg, a-2.jpg, a-3.jpg, ...`. The query string is dropped. Nothing
/// checks that the siblings exist. `variants` is capped at
/// [`MAX_COLLAGE_VARIANTS`].
pub fn collage_sources(src: &str, variants: u32) -> Vec<String> {
    let path = src.split('?').next().unwrap_or(src);
    let (base, ext) = split_extension(path);
    let variants = variants.min(MAX_COLLAGE_VARIANTS);
    let mut sources = Vec::with_capacity(variants as usize + 1);
    sources.push(path.to_string());
    for n in 2..=variants + 1 {
        match ext {
            Some(ext) => sources.push(format!("{base}-{n}.{ext}")),
            None => sources.push(format!("{base}-{n}")),
        }
    }
    sources
}

/// Splits the last path segment at its final dot. A trailing dot is an
/// empty extension (`photo.` numbers as `photo-2.`); a leading dot marks a
/// dotfile, not an extension.
fn split_extension(path: &str) -> (&str, Option<&str>) {
    let segment_start = path.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = segment_start + dot;
            (&path[..dot], Some(&path[dot + 1..]))
        }
        _ => (path, None),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileSpec {
    pub class_name: String,
    pub src: String,
    /// Value for the `--d` custom property driving the staggered entrance.
    pub delay: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub base_s: f64,
    pub step_s: f64,
}

impl Default for Stagger {
    fn default() -> Self {
        Self::from_config(&FxConfig::default())
    }
}

impl Stagger {
    pub fn from_config(config: &FxConfig) -> Self {
        Self {
            base_s: config.collage_stagger_base_s,
            step_s: config.collage_stagger_step_s,
        }
    }

    pub fn delay(&self, index: usize) -> String {
        format!("{}s", self.step_s * index as f64 + self.base_s)
    }
}

pub fn tile_kind(index: usize) -> String {
    if index == 0 {
        "hero".to_string()
    } else {
        format!("t{index}")
    }
}

pub fn tile_specs(sources: &[String], stagger: Stagger) -> Vec<TileSpec> {
    sources
        .iter()
        .enumerate()
        .map(|(index, src)| TileSpec {
            class_name: format!("{TILE_CLASS} {}", tile_kind(index)),
            src: src.clone(),
            delay: stagger.delay(index),
        })
        .collect()
}

/// Per-tile image error handling: the first failure swaps in the
/// placeholder, later failures are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileFallback {
    used: bool,
}

impl TileFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_error<'a>(&mut self, placeholder: &'a str) -> Option<&'a str> {
        if self.used {
            return None;
        }
        self.used = true;
        Some(placeholder)
    }

    pub fn used(&self) -> bool {
        self.used
    }
}

/// Returned by [`Collage::close`] when the overlay was actually open.
#[derive(Debug, PartialEq)]
pub struct Closed<F> {
    pub restore_focus: Option<F>,
}

/// Open/closed state of the overlay and the focus to hand back on close.
/// `F` is whatever handle the surface uses for focusable elements.
#[derive(Debug)]
pub struct Collage<F> {
    open: bool,
    sources: Vec<String>,
    previous_focus: Option<F>,
}

impl<F> Default for Collage<F> {
    fn default() -> Self {
        Self {
            open: false,
            sources: Vec::new(),
            previous_focus: None,
        }
    }
}

impl<F> Collage<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replaces the content. Reopening while open keeps the focus captured
    /// by the first open, since the current focus is inside the overlay.
    pub fn open(&mut self, sources: Vec<String>, focused: Option<F>) -> &[String] {
        if !self.open {
            self.previous_focus = focused;
        }
        self.open = true;
        self.sources = sources;
        &self.sources
    }

    /// Closing a closed overlay changes nothing and returns `None`.
    pub fn close(&mut self) -> Option<Closed<F>> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.sources.clear();
        Some(Closed {
            restore_focus: self.previous_focus.take(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_follow_suffix_convention() {
        assert_eq!(
            collage_sources("img/a.jpg", 4),
            vec!["img/a.jpg", "img/a-2.jpg", "img/a-3.jpg", "img/a-4.jpg", "img/a-5.jpg"]
        );
    }

    #[test]
    fn query_string_is_dropped() {
        let sources = collage_sources("img/a.webp?v=3", 4);
        assert_eq!(sources[0], "img/a.webp");
        assert_eq!(sources[4], "img/a-5.webp");
    }

    #[test]
    fn dots_in_directories_are_not_extensions() {
        assert_eq!(
            collage_sources("assets.v2/photo", 2),
            vec!["assets.v2/photo", "assets.v2/photo-2", "assets.v2/photo-3"]
        );
        assert_eq!(
            collage_sources("shots/night.sky.png", 1),
            vec!["shots/night.sky.png", "shots/night.sky-2.png"]
        );
    }

    #[test]
    fn trailing_dot_and_dotfiles() {
        assert_eq!(
            collage_sources("img/photo.", 2),
            vec!["img/photo.", "img/photo-2.", "img/photo-3."]
        );
        assert_eq!(collage_sources("img/.cover", 1), vec!["img/.cover", "img/.cover-2"]);
    }

    #[test]
    fn variant_count_is_capped() {
        let sources = collage_sources("a.jpg", u32::MAX);
        assert_eq!(sources.len(), MAX_COLLAGE_VARIANTS as usize + 1);
        assert_eq!(sources.last().map(String::as_str), Some("a-17.jpg"));
        assert_eq!(collage_sources("a.jpg", 0), vec!["a.jpg"]);
    }

    #[test]
    fn tiles_are_staggered() {
        let specs = tile_specs(&collage_sources("a.jpg", 4), Stagger::default());
        let classes: Vec<_> = specs.iter().map(|spec| spec.class_name.as_str()).collect();
        assert_eq!(classes, vec!["tile hero", "tile t1", "tile t2", "tile t3", "tile t4"]);
        let delays: Vec<_> = specs.iter().map(|spec| spec.delay.as_str()).collect();
        assert_eq!(delays, vec!["0.08s", "0.14s", "0.2s", "0.26s", "0.32s"]);
    }

    #[test]
    fn fallback_fires_once() {
        let mut fallback = TileFallback::new();
        assert_eq!(fallback.on_error("data:placeholder"), Some("data:placeholder"));
        assert_eq!(fallback.on_error("data:placeholder"), None);
        assert!(fallback.used());
    }

    #[test]
    fn placeholder_carries_label() {
        assert!(PLACEHOLDER_SVG.contains(">No photo</text>"));
    }

    #[test]
    fn close_returns_focus_once() {
        let mut collage = Collage::new();
        collage.open(collage_sources("a.jpg", 4), Some("button#open"));
        assert!(collage.is_open());
        assert_eq!(
            collage.close(),
            Some(Closed {
                restore_focus: Some("button#open")
            })
        );
        assert!(collage.close().is_none());
        assert!(!collage.is_open());
    }

    #[test]
    fn reopen_keeps_first_focus() {
        let mut collage = Collage::new();
        collage.open(collage_sources("a.jpg", 4), Some("card"));
        let sources = collage.open(collage_sources("b.png", 4), Some("close-button"));
        assert_eq!(sources[0], "b.png");
        assert_eq!(collage.close().and_then(|closed| closed.restore_focus), Some("card"));
    }
}
