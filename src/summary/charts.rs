//! Chart generation and rendering for the expense summary.
//!
//! Two charts are drawn from the category buckets:
//! - **Bar chart**: the total for each category
//! - **Pie chart**: each category's share of the grand total
//!
//! Charts are configured with `charming` and rendered on the server to PNG,
//! then base64-encoded into data URIs so the page can embed them inline.

use std::cell::RefCell;

use base64::{Engine, engine::general_purpose::STANDARD};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Grid, Title},
    datatype::DataPointItem,
    element::{AxisLabel, AxisType, ItemStyle, JsFunction, Label, TextStyle},
    series::{Bar, Pie},
};

use crate::{Error, summary::ExpenseSummary};

/// Rendered chart size in pixels.
const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 400;

const LIGHT_PALETTE: [&str; 5] = ["blue", "green", "red", "purple", "orange"];
const DARK_PALETTE: [&str; 5] = ["#ff6384", "#36a2eb", "#ffce56", "#4bc0c0", "#9966ff"];

const NO_DATA_SUBTITLE: &str = "No expenses to show";

/// How many charts a renderer draws before it is replaced.
///
/// Every render leaves its ECharts instance alive inside the JS runtime.
const RENDERS_PER_RENDERER: usize = 200;

/// A chart renderer and the number of charts it has drawn.
struct PooledRenderer {
    renderer: ImageRenderer,
    renders: usize,
}

thread_local! {
    static RENDERER: RefCell<Option<PooledRenderer>> = const { RefCell::new(None) };
}

/// Run `render` with this thread's chart renderer, creating it on first use
/// and replacing it once it has drawn [RENDERS_PER_RENDERER] charts.
fn with_renderer<T>(render: impl FnOnce(&mut ImageRenderer) -> T) -> T {
    RENDERER.with(|cell| {
        let mut slot = cell.borrow_mut();

        if slot
            .as_ref()
            .is_some_and(|pooled| pooled.renders >= RENDERS_PER_RENDERER)
        {
            // V8 isolates on one thread must be dropped before the next is created.
            slot.take();
        }

        let pooled = slot.get_or_insert_with(|| {
            tracing::debug!("Starting a new chart renderer");
            PooledRenderer {
                renderer: ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT),
                renders: 0,
            }
        });
        pooled.renders += 1;

        render(&mut pooled.renderer)
    })
}

/// The colour scheme to draw charts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTheme {
    /// Saturated colours with black text.
    #[default]
    Light,
    /// Pastel colours with white text.
    Dark,
}

impl ChartTheme {
    /// Pick the theme for the dark mode preference.
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            ChartTheme::Dark
        } else {
            ChartTheme::Light
        }
    }

    fn palette(self) -> &'static [&'static str] {
        match self {
            ChartTheme::Light => &LIGHT_PALETTE,
            ChartTheme::Dark => &DARK_PALETTE,
        }
    }

    fn text_color(self) -> &'static str {
        match self {
            ChartTheme::Light => "black",
            ChartTheme::Dark => "white",
        }
    }
}

/// The bar and pie charts as `data:` URIs, ready for an `img` `src`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImages {
    /// Category totals as a bar chart.
    pub bar: String,
    /// Category distribution as a pie chart.
    pub pie: String,
}

/// One category as drawn in a chart.
#[derive(Debug, Clone, PartialEq)]
struct ChartSlice<'a> {
    label: &'a str,
    value: f64,
    color: &'static str,
}

/// Shape the buckets of `summary` into chart data.
///
/// Colours are taken from the theme's palette in bucket order and wrap
/// around when there are more categories than colours.
fn chart_slices(summary: &ExpenseSummary, theme: ChartTheme) -> Vec<ChartSlice<'_>> {
    summary
        .buckets
        .iter()
        .zip(theme.palette().iter().cycle())
        .map(|(bucket, &color)| ChartSlice {
            label: &bucket.category,
            value: bucket.subtotal,
            color,
        })
        .collect()
}

/// Render the bar and pie charts for `summary`.
///
/// An empty summary gives placeholder charts that only show their titles and
/// a note that there is nothing to show.
///
/// This blocks while the charting runtime draws, so call it from a blocking
/// task when inside an async context. The renderer is kept per thread.
///
/// # Errors
/// Returns [Error::ChartRenderError] if the charting library fails.
pub fn render_charts(summary: &ExpenseSummary, theme: ChartTheme) -> Result<ChartImages, Error> {
    let slices = chart_slices(summary, theme);

    Ok(ChartImages {
        bar: render_png(&bar_chart(&slices, theme))?,
        pie: render_png(&pie_chart(&slices, theme))?,
    })
}

fn render_png(chart: &Chart) -> Result<String, Error> {
    with_renderer(|renderer| renderer.render_format(ImageFormat::Png, chart))
        .map(|png| png_data_uri(&png))
        .map_err(|error| Error::ChartRenderError(format!("{error:?}")))
}

fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn bar_chart(slices: &[ChartSlice], theme: ChartTheme) -> Chart {
    let text_color = theme.text_color();
    let labels: Vec<&str> = slices.iter().map(|slice| slice.label).collect();
    let data: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.value)
                .name(slice.label)
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect();

    let chart = Chart::new()
        .background_color("transparent")
        .title(chart_title("Expenses by Category", slices.is_empty(), text_color))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Categories")
                .name_text_style(TextStyle::new().color(text_color))
                .axis_label(AxisLabel::new().rotate(45.0).color(text_color))
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Total Expenses")
                .name_text_style(TextStyle::new().color(text_color))
                .axis_label(AxisLabel::new().color(text_color)),
        );

    if slices.is_empty() {
        return chart;
    }

    chart.series(Bar::new().name("Total Expenses").data(data))
}

fn pie_chart(slices: &[ChartSlice], theme: ChartTheme) -> Chart {
    let text_color = theme.text_color();
    let data: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.value)
                .name(slice.label)
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect();

    let chart = Chart::new()
        .background_color("transparent")
        .title(chart_title("Expense Distribution", slices.is_empty(), text_color));

    if slices.is_empty() {
        return chart;
    }

    chart.series(
        Pie::new()
            .name("Expense Distribution")
            .radius("60%")
            .label(
                Label::new()
                    .show(true)
                    .color(text_color)
                    .formatter(percent_formatter()),
            )
            .data(data),
    )
}

fn chart_title(text: &str, is_empty: bool, text_color: &str) -> Title {
    let title = Title::new()
        .text(text)
        .left("center")
        .text_style(TextStyle::new().color(text_color));

    if is_empty {
        title
            .subtext(NO_DATA_SUBTITLE)
            .subtext_style(TextStyle::new().color(text_color))
    } else {
        title
    }
}

/// Label pie slices with the category name and its share to one decimal place.
fn percent_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "params",
        "return params.name + '\\n' + params.percent.toFixed(1) + '%';",
    )
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::STANDARD};

    use crate::{
        expense::Expense,
        summary::{ExpenseSummary, summarize},
    };

    use super::{
        CHART_HEIGHT, CHART_WIDTH, ChartTheme, DARK_PALETTE, LIGHT_PALETTE, NO_DATA_SUBTITLE,
        RENDERER, RENDERS_PER_RENDERER, bar_chart, chart_slices, pie_chart, render_charts,
    };

    fn summary_with_categories(categories: &[&str]) -> ExpenseSummary {
        let expenses = categories
            .iter()
            .enumerate()
            .map(|(i, category)| Expense {
                id: i as i64 + 1,
                name: format!("Expense {i}"),
                amount: (i + 1) as f64,
                category: category.to_string(),
                date: "2024-01-01".to_owned(),
            })
            .collect();

        summarize(expenses)
    }

    #[test]
    fn slices_follow_bucket_order_and_subtotals() {
        let summary = summary_with_categories(&["Food", "Transport", "food"]);

        let slices = chart_slices(&summary, ChartTheme::Light);

        let labels: Vec<_> = slices.iter().map(|slice| slice.label).collect();
        let values: Vec<_> = slices.iter().map(|slice| slice.value).collect();
        assert_eq!(labels, vec!["food", "transport"]);
        assert_eq!(values, vec![4.0, 2.0]);
    }

    #[test]
    fn palette_cycles_when_there_are_more_than_five_categories() {
        let summary = summary_with_categories(&["a", "b", "c", "d", "e", "f", "g"]);

        let colors: Vec<_> = chart_slices(&summary, ChartTheme::Light)
            .iter()
            .map(|slice| slice.color)
            .collect();

        assert_eq!(
            colors,
            vec!["blue", "green", "red", "purple", "orange", "blue", "green"]
        );
    }

    #[test]
    fn theme_selects_palette() {
        let summary = summary_with_categories(&["a", "b", "c", "d", "e"]);

        let light: Vec<_> = chart_slices(&summary, ChartTheme::Light)
            .iter()
            .map(|slice| slice.color)
            .collect();
        let dark: Vec<_> = chart_slices(&summary, ChartTheme::Dark)
            .iter()
            .map(|slice| slice.color)
            .collect();

        assert_eq!(light, LIGHT_PALETTE.to_vec());
        assert_eq!(dark, DARK_PALETTE.to_vec());
        assert_eq!(ChartTheme::from_dark_mode(true), ChartTheme::Dark);
        assert_eq!(ChartTheme::from_dark_mode(false), ChartTheme::Light);
    }

    #[test]
    fn bar_chart_options() {
        let summary = summary_with_categories(&["Food", "Transport"]);
        let slices = chart_slices(&summary, ChartTheme::Dark);

        let options = bar_chart(&slices, ChartTheme::Dark).to_string();

        assert!(options.contains("transparent"), "{options}");
        assert!(options.contains("rotate"), "{options}");
        assert!(options.contains("Expenses by Category"), "{options}");
        assert!(options.contains("#ff6384"), "{options}");
        assert!(options.contains("#36a2eb"), "{options}");
        assert!(options.contains("white"), "{options}");
        assert!(options.contains("transport"), "{options}");
    }

    #[test]
    fn pie_chart_options() {
        let summary = summary_with_categories(&["Food", "Transport"]);
        let slices = chart_slices(&summary, ChartTheme::Light);

        let options = pie_chart(&slices, ChartTheme::Light).to_string();

        assert!(options.contains("transparent"), "{options}");
        assert!(options.contains("Expense Distribution"), "{options}");
        assert!(options.contains("toFixed(1)"), "{options}");
        assert!(options.contains("blue"), "{options}");
        assert!(options.contains("black"), "{options}");
    }

    #[test]
    fn empty_summary_gives_placeholder_options() {
        let summary = ExpenseSummary::default();
        let slices = chart_slices(&summary, ChartTheme::Light);

        let bar = bar_chart(&slices, ChartTheme::Light).to_string();
        let pie = pie_chart(&slices, ChartTheme::Light).to_string();

        assert!(bar.contains(NO_DATA_SUBTITLE));
        assert!(pie.contains(NO_DATA_SUBTITLE));
        assert!(!pie.contains("toFixed"));
    }

    /// Decode a chart data URI into its PNG bytes.
    fn decode_png(image: &str) -> Vec<u8> {
        let encoded = image
            .strip_prefix("data:image/png;base64,")
            .expect("image should be a PNG data URI");
        let png = STANDARD.decode(encoded).unwrap();

        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG: {:?}", &png[..8]);
        png
    }

    /// The width and height from the IHDR chunk of a PNG.
    fn png_size(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(png[20..24].try_into().unwrap());

        (width, height)
    }

    #[test]
    fn renders_png_data_uris() {
        let summary = summary_with_categories(&["Food", "Transport", "food"]);

        let images = render_charts(&summary, ChartTheme::Light).unwrap();

        for image in [&images.bar, &images.pie] {
            let png = decode_png(image);
            assert_eq!(png_size(&png), (CHART_WIDTH, CHART_HEIGHT));
        }
    }

    #[test]
    fn renders_placeholder_for_empty_summary() {
        let images = render_charts(&ExpenseSummary::default(), ChartTheme::Dark).unwrap();

        for image in [&images.bar, &images.pie] {
            let png = decode_png(image);
            assert_eq!(png_size(&png), (CHART_WIDTH, CHART_HEIGHT));
            // Colour type 6 is RGBA, so the background can stay transparent.
            assert_eq!(png[25], 6);
        }
    }

    #[test]
    fn placeholder_charts_keep_transparent_background() {
        let summary = ExpenseSummary::default();
        let slices = chart_slices(&summary, ChartTheme::Dark);

        for options in [
            bar_chart(&slices, ChartTheme::Dark).to_string(),
            pie_chart(&slices, ChartTheme::Dark).to_string(),
        ] {
            assert!(options.contains("transparent"), "{options}");
        }
    }

    #[test]
    fn renderer_is_reused_and_replaced_on_the_same_thread() {
        let summary = summary_with_categories(&["Food", "Transport"]);

        for _ in 0..3 {
            let images = render_charts(&summary, ChartTheme::Light).unwrap();
            decode_png(&images.pie);
        }
        let renders_before = RENDERER.with(|cell| cell.borrow().as_ref().map(|p| p.renders));
        assert!(renders_before.is_some_and(|renders| renders >= 6));

        RENDERER.with(|cell| {
            if let Some(pooled) = cell.borrow_mut().as_mut() {
                pooled.renders = RENDERS_PER_RENDERER;
            }
        });
        let images = render_charts(&summary, ChartTheme::Dark).unwrap();
        decode_png(&images.bar);

        let renders_after = RENDERER.with(|cell| cell.borrow().as_ref().map(|p| p.renders));
        assert_eq!(renders_after, Some(2));
    }
}
