//! Menu rendering
//!
//! [`MenuRenderer`] runs the whole pipeline for one image: pick the school
//! days, collect and filter their items, plan the page and draw it.

use chrono::{NaiveDate, NaiveDateTime};
use eink_canvas::InkColor;
use embedded_graphics::prelude::*;

use crate::{
    calendar::next_school_days,
    config::RenderConfig,
    filter::DenyList,
    fonts::FontSet,
    layout::{self, LayoutPlan, MenuPage},
    source::{MenuDay, MenuSource},
};

/// Footer text for a render at `now`
pub fn refresh_timestamp(now: NaiveDateTime) -> String {
    format!("Updated {}", now.format("%Y-%m-%d %H:%M"))
}

/// Renders menu pages according to one [`RenderConfig`]
#[derive(Debug, Clone)]
pub struct MenuRenderer {
    config: RenderConfig,
    deny_list: DenyList,
}

impl MenuRenderer {
    /// Renderer with the default deny-list
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            deny_list: DenyList::default(),
        }
    }

    /// Replace the deny-list
    pub fn with_deny_list(mut self, deny_list: DenyList) -> Self {
        self.deny_list = deny_list;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// School days shown for a render on `today`
    pub fn select_days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        next_school_days(today, usize::from(self.config.day_count()))
    }

    /// Raw items for every selected day
    pub fn collect_days<S>(&self, source: &S, today: NaiveDate) -> Vec<MenuDay>
    where
        S: MenuSource + ?Sized,
    {
        self.select_days(today)
            .into_iter()
            .map(|date| {
                let items = match self.config.menu_url.as_deref() {
                    Some(url) => source.menu_from_url(url, date).into_items(),
                    None => source.menu_for_date(date),
                };
                MenuDay::new(date, items)
            })
            .collect()
    }

    /// Apply the deny-list and empty day policy to each day
    pub fn filter_days(&self, days: Vec<MenuDay>) -> Vec<MenuDay> {
        let policy = self.config.empty_day_policy;
        days.into_iter()
            .map(|day| {
                let items = self.deny_list.filter_day(&day.items, policy);
                MenuDay::new(day.date, items)
            })
            .collect()
    }

    /// Plan the page for a canvas of `size` without drawing
    ///
    /// Starts at the configured font scale and steps down while the page does
    /// not fit, keeping the smallest scale's plan if none does.
    pub fn plan<S>(&self, source: &S, now: NaiveDateTime, size: Size) -> LayoutPlan
    where
        S: MenuSource + ?Sized,
    {
        let today = now.date();
        let days = self.filter_days(self.collect_days(source, today));
        tracing::debug!(
            %today,
            days = days.len(),
            url = self.config.menu_url.as_deref().unwrap_or(""),
            "collected menu days"
        );

        let title = if self.config.title.trim().is_empty() {
            crate::config::DEFAULT_TITLE
        } else {
            self.config.title.as_str()
        };
        let mut page = MenuPage {
            title,
            days: &days,
            today,
            show_date: self.config.show_date,
            timestamp: self.config.show_refresh_time.then(|| refresh_timestamp(now)),
            fonts: FontSet::new(self.config.font_scale, size),
            colors: self.config.effective_colors(),
        };
        let mut scale = self.config.font_scale;
        loop {
            let plan = layout::plan(&page, size);
            match scale.smaller() {
                Some(next) if !plan.fits => {
                    tracing::debug!(from = ?scale, to = ?next, "menu does not fit, shrinking text");
                    scale = next;
                    page.fonts = FontSet::new(scale, size);
                }
                _ => return plan,
            }
        }
    }

    /// Plan and draw onto `target`, returning the plan that was drawn
    pub fn render<S, D>(
        &self,
        source: &S,
        now: NaiveDateTime,
        target: &mut D,
    ) -> Result<LayoutPlan, D::Error>
    where
        S: MenuSource + ?Sized,
        D: DrawTarget<Color = InkColor>,
    {
        let size = target.bounding_box().size;
        let plan = self.plan(source, now, size);
        plan.draw(target)?;
        tracing::info!(
            kind = ?plan.kind,
            width = size.width,
            height = size.height,
            elements = plan.elements.len(),
            omitted_items = plan.omitted.items,
            omitted_days = plan.omitted.days,
            "rendered school menu"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::FontScale, filter::EmptyDayPolicy, layout::ElementKind, source::MockMenuSource,
    };
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(7, 30, 0).unwrap())
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(refresh_timestamp(at(2025, 1, 6)), "Updated 2025-01-06 07:30");
    }

    #[test]
    fn test_select_days_follows_config() {
        let renderer = MenuRenderer::new(RenderConfig::new().days(2));
        let days = renderer.select_days(at(2025, 1, 10).date());
        assert_eq!(
            days,
            [
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
            ]
        );
    }

    #[test]
    fn test_pizza_day_filters_to_pizza() {
        let renderer = MenuRenderer::new(RenderConfig::new().days(1));
        let source = MockMenuSource::new();
        let days = renderer.filter_days(renderer.collect_days(&source, at(2025, 1, 8).date()));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].items, ["Pizza"]);
    }

    #[test]
    fn test_url_falls_back_to_mock_items() {
        let source = MockMenuSource::new();
        let today = at(2025, 1, 8).date();
        let with_url = MenuRenderer::new(RenderConfig::new().menu_url("https://example.org/menu"));
        let without = MenuRenderer::new(RenderConfig::new());
        assert_eq!(
            with_url.collect_days(&source, today),
            without.collect_days(&source, today)
        );
    }

    #[test]
    fn test_empty_day_policy_is_applied() {
        // 2025-01-14 lists only deny-listed items
        let source = MockMenuSource::new();
        let today = at(2025, 1, 14).date();

        let keep = MenuRenderer::new(RenderConfig::new().days(1));
        let kept = keep.filter_days(keep.collect_days(&source, today));
        assert_eq!(kept[0].items, source.menu_for_date(today));

        let show = MenuRenderer::new(
            RenderConfig::new()
                .days(1)
                .empty_day_policy(EmptyDayPolicy::ShowEmpty),
        );
        let shown = show.filter_days(show.collect_days(&source, today));
        assert!(shown[0].items.is_empty());
    }

    #[test]
    fn test_blank_title_uses_default() {
        let renderer = MenuRenderer::new(RenderConfig::new().title("   "));
        let plan = renderer.plan(&MockMenuSource::new(), at(2025, 1, 6), Size::new(800, 480));
        assert_eq!(plan.texts(ElementKind::Title), [crate::config::DEFAULT_TITLE]);
    }

    #[test]
    fn test_refresh_time_toggle() {
        let source = MockMenuSource::new();
        let on = MenuRenderer::new(RenderConfig::new());
        let off = MenuRenderer::new(RenderConfig::new().show_refresh_time(false));
        let size = Size::new(800, 480);
        assert_eq!(
            on.plan(&source, at(2025, 1, 6), size).texts(ElementKind::Timestamp),
            ["Updated 2025-01-06 07:30"]
        );
        assert!(off
            .plan(&source, at(2025, 1, 6), size)
            .first(ElementKind::Timestamp)
            .is_none());
    }

    #[test]
    fn test_text_shrinks_until_an_item_fits() {
        let source = MockMenuSource::new();
        let phat = Size::new(250, 122);
        for scale in FontScale::ALL {
            for days in 1..=5 {
                let config = RenderConfig::new().days(days).font_scale(scale);
                let plan = MenuRenderer::new(config).plan(&source, at(2025, 1, 6), phat);
                assert!(plan.fits, "{scale:?} with {days} days does not fit");
                assert!(plan.first(ElementKind::Item).is_some());
            }
        }
    }

    #[test]
    fn test_configured_scale_kept_when_it_fits() {
        let source = MockMenuSource::new();
        let size = Size::new(800, 480);
        let config = RenderConfig::new().days(1).font_scale(FontScale::XLarge);
        let plan = MenuRenderer::new(config).plan(&source, at(2025, 1, 8), size);
        let title = plan.first(ElementKind::Title).unwrap();
        assert_eq!(title.font, Some(FontSet::new(FontScale::XLarge, size).title));
    }

    #[test]
    fn test_custom_deny_list() {
        let renderer =
            MenuRenderer::new(RenderConfig::new().days(1)).with_deny_list(DenyList::new(["pizza"]));
        let source = MockMenuSource::new();
        let days = renderer.filter_days(renderer.collect_days(&source, at(2025, 1, 8).date()));
        assert_eq!(days[0].items, ["Garden Bar", "Milk - 1%"]);
    }
}
