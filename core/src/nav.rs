use crate::config::FxConfig;

pub const ACTIVE_CLASS: &str = "active";
pub const SECTION_SELECTOR: &str = "section[data-section]";
pub const LINK_SELECTOR: &str = ".nav__links a";
pub const NAV_SELECTOR: &str = ".nav";

/// One entry of an intersection observer callback.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionReport {
    pub id: String,
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl SectionReport {
    pub fn new(id: impl Into<String>, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            id: id.into(),
            ratio,
            is_intersecting,
        }
    }
}

/// What the page must do after a nav link click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickPlan {
    pub id: String,
    pub scroll_top: f64,
    pub fragment: String,
}

/// Section id a link points at. Only in-page fragments count.
pub fn link_target(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Among intersecting entries, the one with the largest ratio. Ties keep the
/// first reported entry.
pub fn most_visible(reports: &[SectionReport]) -> Option<&SectionReport> {
    let mut best: Option<&SectionReport> = None;
    for report in reports.iter().filter(|report| report.is_intersecting) {
        match best {
            Some(current) if report.ratio <= current.ratio => {}
            _ => best = Some(report),
        }
    }
    best
}

/// A reload that lands on a fragment would let the browser restore the
/// anchor scroll position behind the highlighter's back.
pub fn should_reset_on_reload(navigation_type: Option<&str>, hash: &str) -> bool {
    navigation_type == Some("reload") && !hash.trim_start_matches('#').is_empty()
}

/// Active-section state machine shared by link clicks and the section
/// observer.
#[derive(Clone, Debug)]
pub struct NavHighlighter {
    link_ids: Vec<Option<String>>,
    active: Option<String>,
    nav_height: f64,
    clearance: f64,
    settle_ms: f64,
    settle: Option<Settle>,
}

#[derive(Clone, Debug)]
struct Settle {
    target: String,
    until_ms: f64,
}

impl NavHighlighter {
    /// `link_hrefs` are the nav links' `href` values in document order.
    pub fn new<'a>(
        link_hrefs: impl IntoIterator<Item = &'a str>,
        nav_height: f64,
        config: &FxConfig,
    ) -> Self {
        Self {
            link_ids: link_hrefs
                .into_iter()
                .map(|href| link_target(href).map(str::to_string))
                .collect(),
            active: None,
            nav_height,
            clearance: config.nav_clearance_px,
            settle_ms: config.nav_click_settle_ms,
            settle: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Active flag for every link, in link order. Always a full re-sync.
    pub fn link_states(&self) -> Vec<bool> {
        self.link_ids
            .iter()
            .map(|id| match (id, &self.active) {
                (Some(id), Some(active)) => id == active,
                _ => false,
            })
            .collect()
    }

    pub fn set_active(&mut self, id: &str) -> Vec<bool> {
        self.active = Some(id.to_string());
        self.link_states()
    }

    /// Scroll position that puts `element_top` (document coordinates) just
    /// below the fixed nav bar.
    pub fn scroll_target(&self, element_top: f64) -> f64 {
        element_top - (self.nav_height + self.clearance)
    }

    /// Handles a click on a link with `href`. `locate` maps a section id to
    /// its top in document coordinates; a missing section aborts the click
    /// without touching state.
    pub fn click<F>(&mut self, href: &str, now_ms: f64, locate: F) -> Option<ClickPlan>
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        let id = link_target(href)?;
        let top = locate(id)?;
        let plan = ClickPlan {
            id: id.to_string(),
            scroll_top: self.scroll_target(top),
            fragment: format!("#{id}"),
        };
        self.active = Some(plan.id.clone());
        self.settle = (self.settle_ms > 0.0).then(|| Settle {
            target: plan.id.clone(),
            until_ms: now_ms + self.settle_ms,
        });
        Some(plan)
    }

    /// Feeds one observer callback. Returns the new active id when it
    /// changed the state.
    ///
    /// While a click-initiated scroll settles, reports are ignored unless
    /// they already point at the clicked section.
    pub fn observe(&mut self, reports: &[SectionReport], now_ms: f64) -> Option<String> {
        let best = most_visible(reports)?;
        if let Some(settle) = self.settle.as_ref() {
            if now_ms < settle.until_ms && best.id != settle.target {
                return None;
            }
            self.settle = None;
        }
        self.active = Some(best.id.clone());
        Some(best.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter(settle_ms: f64) -> NavHighlighter {
        let config = FxConfig {
            nav_click_settle_ms: settle_ms,
            ..FxConfig::default()
        };
        NavHighlighter::new(["#about", "#projects", "#contact"], 64.0, &config)
    }

    #[test]
    fn link_target_requires_fragment() {
        assert_eq!(link_target("#projects"), Some("projects"));
        assert_eq!(link_target("#"), None);
        assert_eq!(link_target("/cv.pdf"), None);
    }

    #[test]
    fn no_active_link_before_first_determination() {
        let nav = highlighter(0.0);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.link_states(), vec![false, false, false]);
    }

    #[test]
    fn set_active_clears_others() {
        let mut nav = highlighter(0.0);
        nav.set_active("about");
        assert_eq!(nav.set_active("contact"), vec![false, false, true]);
        assert_eq!(nav.set_active("unknown"), vec![false, false, false]);
    }

    #[test]
    fn larger_ratio_wins() {
        let reports = [
            SectionReport::new("about", 0.4, true),
            SectionReport::new("projects", 0.6, true),
        ];
        assert_eq!(most_visible(&reports).map(|r| r.id.as_str()), Some("projects"));
    }

    #[test]
    fn ties_keep_first_and_skip_non_intersecting() {
        let reports = [
            SectionReport::new("about", 0.9, false),
            SectionReport::new("projects", 0.5, true),
            SectionReport::new("contact", 0.5, true),
        ];
        assert_eq!(most_visible(&reports).map(|r| r.id.as_str()), Some("projects"));
        assert!(most_visible(&reports[..1]).is_none());
    }

    #[test]
    fn click_scroll_offset_clears_nav() {
        let mut nav = highlighter(0.0);
        let plan = nav
            .click("#projects", 0.0, |id| (id == "projects").then_some(1200.0))
            .expect("section exists");
        assert_eq!(plan.scroll_top, 1200.0 - 72.0);
        assert_eq!(plan.fragment, "#projects");
    }

    #[test]
    fn missing_target_aborts_click() {
        let mut nav = highlighter(0.0);
        nav.set_active("about");
        assert!(nav.click("#missing", 0.0, |_| None).is_none());
        assert_eq!(nav.active(), Some("about"));
    }

    #[test]
    fn settle_window_suppresses_intermediate_sections() {
        let mut nav = highlighter(800.0);
        nav.click("#contact", 1000.0, |_| Some(3000.0));
        let passing = [SectionReport::new("projects", 0.75, true)];
        assert_eq!(nav.observe(&passing, 1200.0), None);
        assert_eq!(nav.active(), Some("contact"));
        assert_eq!(nav.observe(&passing, 1900.0), Some("projects".to_string()));
    }

    #[test]
    fn reaching_clicked_section_ends_settle() {
        let mut nav = highlighter(800.0);
        nav.click("#contact", 0.0, |_| Some(3000.0));
        let arrived = [SectionReport::new("contact", 0.5, true)];
        assert_eq!(nav.observe(&arrived, 100.0), Some("contact".to_string()));
        let next = [SectionReport::new("projects", 0.5, true)];
        assert_eq!(nav.observe(&next, 200.0), Some("projects".to_string()));
    }

    #[test]
    fn reload_detection() {
        assert!(should_reset_on_reload(Some("reload"), "#projects"));
        assert!(!should_reset_on_reload(Some("reload"), ""));
        assert!(!should_reset_on_reload(Some("reload"), "#"));
        assert!(!should_reset_on_reload(Some("navigate"), "#projects"));
        assert!(!should_reset_on_reload(None, "#projects"));
    }
}
