//! Page layout planning
//!
//! Planning and drawing are separate steps. [`plan`] turns a [`MenuPage`]
//! into a [`LayoutPlan`]: a flat list of positioned [`Element`]s plus what
//! had to be left out. [`LayoutPlan::draw`] then paints the elements onto
//! any ink draw target. Tests inspect the plan directly.
//!
//! Lines are placed whole or not at all. Content that does not fit is cut at
//! a line boundary and summarised by a `+N more` indicator. One item line is
//! always kept free below the heading, so the indicator has somewhere to go;
//! the date line and rule give way first, then the timestamp, then the title.

use chrono::NaiveDate;
use eink_canvas::InkColor;
use embedded_graphics::{
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
};

use crate::{
    calendar::{day_header, full_date},
    config::ColorScheme,
    fonts::{FontSet, ResolvedFont},
    source::MenuDay,
};

/// Which of the two page designs is used
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutKind {
    /// One day: date line, rule and bullets
    SingleDay,
    /// Several days, each with a header
    MultiDay,
}

impl LayoutKind {
    /// Single-day for exactly one day, multi-day otherwise
    pub fn for_day_count(count: usize) -> Self {
        if count == 1 {
            LayoutKind::SingleDay
        } else {
            LayoutKind::MultiDay
        }
    }
}

/// What a planned element represents
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Page heading
    Title,
    /// Full date under the title (single day)
    Date,
    /// Horizontal rule under the heading (single day)
    Rule,
    /// Day header (multi day)
    DayHeader,
    /// Bulleted menu item
    Item,
    /// Overflow indicator
    More,
    /// Refresh timestamp
    Timestamp,
}

/// One positioned piece of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// What the element is
    pub kind: ElementKind,
    /// Text as drawn, already shortened to fit; empty for rules
    pub text: String,
    /// Area covered by the text or rule
    pub bounds: Rectangle,
    /// Ink used to draw it
    pub color: InkColor,
    /// Font for text elements
    pub font: Option<ResolvedFont>,
    /// Bullet drawn left of an item
    pub bullet: Option<Circle>,
    /// Index into the page's days for headers and items
    pub day: Option<usize>,
}

/// Content left out because the page was full
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Omitted {
    /// Items cut from the last visible day
    pub items: usize,
    /// Whole days dropped after it
    pub days: usize,
}

impl Omitted {
    /// True when everything was drawn
    pub fn is_empty(&self) -> bool {
        self.items == 0 && self.days == 0
    }

    /// Indicator text such as `+2 more, +1 more day`
    pub fn indicator(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if self.items > 0 {
            parts.push(format!("+{} more", self.items));
        }
        match self.days {
            0 => {}
            1 => parts.push("+1 more day".to_string()),
            n => parts.push(format!("+{n} more days")),
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Everything needed to lay out one page
#[derive(Debug, Clone)]
pub struct MenuPage<'a> {
    /// Heading text
    pub title: &'a str,
    /// Filtered days in display order
    pub days: &'a [MenuDay],
    /// Render date, for Today/Tomorrow labels
    pub today: NaiveDate,
    /// Show the date line or `MM/DD` suffixes
    pub show_date: bool,
    /// Footer text, if any
    pub timestamp: Option<String>,
    /// Fonts per role
    pub fonts: FontSet,
    /// Inks
    pub colors: ColorScheme,
}

/// Positioned page content ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Design used
    pub kind: LayoutKind,
    /// Page size the plan was made for
    pub size: Size,
    /// Page background ink
    pub background: InkColor,
    /// Elements in drawing order
    pub elements: Vec<Element>,
    /// Content that did not fit
    pub omitted: Omitted,
    /// Heading and footer are complete and, when there are items, at least
    /// one of them is shown
    pub fits: bool,
}

impl LayoutPlan {
    /// Elements of one kind, in drawing order
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Texts of one kind, in drawing order
    pub fn texts(&self, kind: ElementKind) -> Vec<&str> {
        self.elements_of(kind).map(|e| e.text.as_str()).collect()
    }

    /// First element of one kind
    pub fn first(&self, kind: ElementKind) -> Option<&Element> {
        self.elements_of(kind).next()
    }

    /// Paint the background and every element
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = InkColor>,
    {
        target.clear(self.background)?;
        for element in &self.elements {
            if let Some(bullet) = element.bullet {
                bullet
                    .into_styled(PrimitiveStyle::with_fill(element.color))
                    .draw(target)?;
            }
            match (element.kind, element.font) {
                (ElementKind::Rule, _) => target.fill_solid(&element.bounds, element.color)?,
                (_, Some(font)) => {
                    font.draw(&element.text, element.bounds.top_left, element.color, target)?;
                }
                (_, None) => {}
            }
        }
        Ok(())
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[derive(Debug, Copy, Clone)]
enum Row {
    Header { day: usize },
    Item { day: usize, index: usize },
}

struct PageBuilder<'p, 'a> {
    page: &'p MenuPage<'a>,
    size: Size,
    margin: i32,
    gap: i32,
    elements: Vec<Element>,
}

impl<'p, 'a> PageBuilder<'p, 'a> {
    fn new(page: &'p MenuPage<'a>, size: Size) -> Self {
        let shorter = size.width.min(size.height);
        let margin = (shorter / 32).clamp(4, 24);
        let gap = (page.fonts.item.line_height() / 4).max(2);
        Self {
            page,
            size,
            margin: to_i32(margin),
            gap: to_i32(gap),
            elements: Vec::new(),
        }
    }

    fn right(&self) -> i32 {
        to_i32(self.size.width).saturating_sub(self.margin)
    }

    fn content_width(&self) -> u32 {
        u32::try_from(self.right().saturating_sub(self.margin)).unwrap_or(0)
    }

    fn width_from(&self, x: i32) -> u32 {
        u32::try_from(self.right().saturating_sub(x)).unwrap_or(0)
    }

    fn push_text(
        &mut self,
        kind: ElementKind,
        text: String,
        top_left: Point,
        font: ResolvedFont,
        color: InkColor,
        day: Option<usize>,
    ) {
        let bounds = Rectangle::new(top_left, font.text_size(&text));
        self.elements.push(Element {
            kind,
            text,
            bounds,
            color,
            font: Some(font),
            bullet: None,
            day,
        });
    }

    /// Height of one item line
    fn line(&self) -> i32 {
        to_i32(self.page.fonts.item.line_height())
    }

    /// Whether a block of `height` at `y` still leaves one item line above `bottom`
    fn room_for(&self, y: i32, height: i32, bottom: i32) -> bool {
        y.saturating_add(height).saturating_add(self.line()) <= bottom
    }

    /// Centred line at `y`; returns the y below it
    fn centered(
        &mut self,
        kind: ElementKind,
        text: &str,
        y: i32,
        font: ResolvedFont,
        color: InkColor,
    ) -> i32 {
        let text = font.fit(text, self.content_width());
        if text.is_empty() {
            return y;
        }
        let free = self.size.width.saturating_sub(font.text_width(&text));
        let x = to_i32(free / 2);
        self.push_text(kind, text, Point::new(x, y), font, color, None);
        y.saturating_add(to_i32(font.line_height()))
            .saturating_add(self.gap)
    }

    /// Right-aligned footer; returns the lowest y content may reach
    fn footer(&mut self) -> i32 {
        let bottom = to_i32(self.size.height).saturating_sub(self.margin);
        let Some(stamp) = self.page.timestamp.as_deref() else {
            return bottom;
        };
        let font = self.page.fonts.small;
        let text = font.fit(stamp, self.content_width());
        let y = bottom.saturating_sub(to_i32(font.line_height()));
        let x = self.right().saturating_sub(to_i32(font.text_width(&text)));
        self.push_text(
            ElementKind::Timestamp,
            text,
            Point::new(x, y),
            font,
            self.page.colors.text,
            None,
        );
        y.saturating_sub(self.gap)
    }

    /// Remove the footer; returns the lowest y content may reach without it
    fn drop_footer(&mut self) -> i32 {
        self.elements.retain(|e| e.kind != ElementKind::Timestamp);
        to_i32(self.size.height).saturating_sub(self.margin)
    }

    fn row_font(&self, row: Row) -> ResolvedFont {
        match row {
            Row::Header { .. } => self.page.fonts.header,
            Row::Item { .. } => self.page.fonts.item,
        }
    }

    /// Top y of every row when nothing is cut
    fn row_positions(&self, rows: &[Row], top: i32) -> Vec<i32> {
        let day_gap = self.gap.saturating_mul(2);
        let mut y = top;
        let mut positions = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if matches!(row, Row::Header { .. }) && i > 0 {
                y = y.saturating_add(day_gap);
            }
            positions.push(y);
            y = y
                .saturating_add(to_i32(self.row_font(*row).line_height()))
                .saturating_add(self.gap);
        }
        positions
    }

    /// Number of leading rows that fit above `limit`
    fn fitting_rows(&self, rows: &[Row], positions: &[i32], limit: i32) -> usize {
        rows.iter()
            .zip(positions)
            .take_while(|(row, y)| {
                let height = to_i32(self.row_font(**row).line_height());
                y.saturating_add(height) <= limit
            })
            .count()
    }

    /// Place `rows` between `top` and `bottom`, cutting and summarising overflow
    ///
    /// On overflow the rows stop one item line short of `bottom`, which holds
    /// the indicator as long as `top` itself leaves that line free.
    fn place_rows(&mut self, rows: &[Row], top: i32, bottom: i32, indent: u32) -> Omitted {
        let positions = self.row_positions(rows, top);
        let item_height = to_i32(self.page.fonts.item.line_height());

        let mut shown = self.fitting_rows(rows, &positions, bottom);
        if shown < rows.len() {
            let limit = bottom.saturating_sub(item_height.saturating_add(self.gap));
            shown = self.fitting_rows(rows, &positions, limit);
            // A header is only kept with at least one of its items
            while let Some(Row::Header { day }) = shown.checked_sub(1).and_then(|i| rows.get(i)) {
                let has_items = self.page.days.get(*day).is_some_and(|d| !d.items.is_empty());
                if !has_items {
                    break;
                }
                shown -= 1;
            }
        }

        let omitted = self.omitted(rows, shown);
        let mut next_y = top;
        for (row, y) in rows.iter().zip(&positions).take(shown) {
            self.push_row(*row, *y, indent);
            next_y = y
                .saturating_add(to_i32(self.row_font(*row).line_height()))
                .saturating_add(self.gap);
        }

        if let Some(indicator) = omitted.indicator() {
            if next_y.saturating_add(item_height) <= bottom {
                let font = self.page.fonts.item;
                let x = self.margin.saturating_add(to_i32(indent));
                let text = font.fit(&indicator, self.width_from(x));
                self.push_text(
                    ElementKind::More,
                    text,
                    Point::new(x, next_y),
                    font,
                    self.page.colors.text,
                    None,
                );
            }
        }
        omitted
    }

    fn omitted(&self, rows: &[Row], shown: usize) -> Omitted {
        let days = &self.page.days;
        let visible_days = rows
            .iter()
            .take(shown)
            .filter(|row| matches!(row, Row::Header { .. }))
            .count();
        let has_headers = rows.iter().any(|row| matches!(row, Row::Header { .. }));
        let last_day = if has_headers {
            visible_days.checked_sub(1)
        } else {
            Some(0)
        };
        let shown_of_last = rows
            .iter()
            .take(shown)
            .filter(|row| matches!(row, Row::Item { day, .. } if Some(*day) == last_day))
            .count();
        let items_of_last = last_day
            .and_then(|d| days.get(d))
            .map_or(0, |d| d.items.len());
        Omitted {
            items: items_of_last.saturating_sub(shown_of_last),
            days: if has_headers {
                days.len().saturating_sub(visible_days)
            } else {
                0
            },
        }
    }

    fn push_row(&mut self, row: Row, y: i32, indent: u32) {
        let font = self.row_font(row);
        match row {
            Row::Header { day } => {
                let Some(menu_day) = self.page.days.get(day) else {
                    return;
                };
                let label = day_header(menu_day.date, self.page.today, self.page.show_date);
                let text = font.fit(&label, self.content_width());
                let origin = Point::new(self.margin, y);
                self.push_text(
                    ElementKind::DayHeader,
                    text,
                    origin,
                    font,
                    self.page.colors.primary,
                    Some(day),
                );
            }
            Row::Item { day, index } => {
                let Some(item) = self.page.days.get(day).and_then(|d| d.items.get(index)) else {
                    return;
                };
                let x = self.margin.saturating_add(to_i32(indent));
                let text = font.fit(item, self.width_from(x));
                let diameter = (font.line_height() / 4).max(3);
                let radius = to_i32(diameter / 2);
                let center = Point::new(
                    x.saturating_sub(to_i32(font.em_width())),
                    y.saturating_add(to_i32(font.line_height() / 2)),
                );
                self.push_text(
                    ElementKind::Item,
                    text,
                    Point::new(x, y),
                    font,
                    self.page.colors.text,
                    Some(day),
                );
                if let Some(element) = self.elements.last_mut() {
                    let top_left = center - Point::new(radius, radius);
                    element.bullet = Some(Circle::new(top_left, diameter));
                }
            }
        }
    }

    fn finish(self, kind: LayoutKind, omitted: Omitted, trimmed: bool) -> LayoutPlan {
        let has_items = self.page.days.iter().any(|d| !d.items.is_empty());
        let shows_item = self.elements.iter().any(|e| e.kind == ElementKind::Item);
        LayoutPlan {
            kind,
            size: self.size,
            background: self.page.colors.background,
            elements: self.elements,
            omitted,
            fits: !trimmed && (shows_item || !has_items),
        }
    }
}

/// Lay out `page` on a canvas of `size`
pub fn plan(page: &MenuPage<'_>, size: Size) -> LayoutPlan {
    let kind = LayoutKind::for_day_count(page.days.len());
    let mut builder = PageBuilder::new(page, size);
    let fonts = page.fonts;
    let colors = page.colors;
    let mut trimmed = false;

    let mut bottom = builder.footer();
    let title_height = to_i32(fonts.title.line_height()).saturating_add(builder.gap);
    if page.timestamp.is_some() && !builder.room_for(builder.margin, title_height, bottom) {
        bottom = builder.drop_footer();
        trimmed = true;
    }
    let mut y = builder.margin;
    if builder.room_for(y, title_height, bottom) {
        y = builder.centered(ElementKind::Title, page.title, y, fonts.title, colors.primary);
    } else {
        trimmed = true;
    }

    let omitted = match kind {
        LayoutKind::SingleDay => {
            let Some(day) = page.days.first() else {
                return builder.finish(kind, Omitted::default(), trimmed);
            };
            if page.show_date {
                let date_height = builder.line().saturating_add(builder.gap);
                if builder.room_for(y, date_height, bottom) {
                    let date = full_date(day.date);
                    y = builder.centered(ElementKind::Date, &date, y, fonts.item, colors.text);
                } else {
                    trimmed = true;
                }
            }
            let thickness = (fonts.item.line_height() / 10).max(1);
            let rule_height = to_i32(thickness).saturating_add(builder.gap);
            if builder.room_for(y, rule_height, bottom) {
                let rule = Rectangle::new(
                    Point::new(builder.margin, y),
                    Size::new(builder.content_width(), thickness),
                );
                builder.elements.push(Element {
                    kind: ElementKind::Rule,
                    text: String::new(),
                    bounds: rule,
                    color: colors.primary,
                    font: None,
                    bullet: None,
                    day: None,
                });
                y = y.saturating_add(rule_height);
            } else {
                trimmed = true;
            }

            let rows: Vec<Row> = (0..day.items.len())
                .map(|index| Row::Item { day: 0, index })
                .collect();
            let indent = fonts.item.em_width().saturating_mul(2);
            builder.place_rows(&rows, y, bottom, indent)
        }
        LayoutKind::MultiDay => {
            let rows: Vec<Row> = page
                .days
                .iter()
                .enumerate()
                .flat_map(|(day, menu)| {
                    core::iter::once(Row::Header { day })
                        .chain((0..menu.items.len()).map(move |index| Row::Item { day, index }))
                })
                .collect();
            let indent = fonts.item.em_width().saturating_mul(3);
            builder.place_rows(&rows, y, bottom, indent)
        }
    };

    tracing::debug!(
        ?kind,
        elements = builder.elements.len(),
        omitted_items = omitted.items,
        omitted_days = omitted.days,
        trimmed,
        "planned menu layout"
    );
    builder.finish(kind, omitted, trimmed)
}
