//! Grouped bar chart rendering
//!
//! Produces a self-contained SVG document: one group per nutrient, two bars
//! per group (consumed, recommended), fixed colour pair and a legend.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use thiserror::Error;

pub const ACTUAL_COLOR: &str = "#4C72B0";
pub const RECOMMENDED_COLOR: &str = "#55A868";

const BAR_WIDTH: f64 = 22.0;
const GROUP_GAP: f64 = 26.0;
const PLOT_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 120.0;

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("chart needs at least one nutrient")]
    Empty,

    #[error("actual and recommended values must cover the same nutrients (differing: {0})")]
    MismatchedKeys(String),

    #[error("value for '{0}' must be a finite, non-negative number")]
    InvalidValue(String),

    #[error("failed to write chart markup")]
    Write(#[from] fmt::Error),
}

/// Render consumed vs. recommended amounts as a grouped bar chart
pub fn render_grouped_bar_chart(
    title: &str,
    actual: &BTreeMap<String, f64>,
    recommended: &BTreeMap<String, f64>,
) -> Result<String, ChartError> {
    if actual.is_empty() && recommended.is_empty() {
        return Err(ChartError::Empty);
    }
    let differing: Vec<&str> = actual
        .keys()
        .filter(|k| !recommended.contains_key(*k))
        .chain(recommended.keys().filter(|k| !actual.contains_key(*k)))
        .map(String::as_str)
        .collect();
    if !differing.is_empty() {
        return Err(ChartError::MismatchedKeys(differing.join(", ")));
    }
    for (name, value) in actual.iter().chain(recommended.iter()) {
        if !value.is_finite() || *value < 0.0 {
            return Err(ChartError::InvalidValue(name.clone()));
        }
    }

    let mut svg = String::new();
    draw(&mut svg, title, actual, recommended)?;
    Ok(svg)
}

fn draw(
    svg: &mut String,
    title: &str,
    actual: &BTreeMap<String, f64>,
    recommended: &BTreeMap<String, f64>,
) -> fmt::Result {
    let max_value = actual
        .values()
        .chain(recommended.values())
        .copied()
        .fold(0.0_f64, f64::max);
    let scale = if max_value > 0.0 {
        PLOT_HEIGHT / max_value
    } else {
        0.0
    };

    let group_width = 2.0 * BAR_WIDTH + GROUP_GAP;
    let plot_width = group_width * actual.len() as f64;
    let width = MARGIN_LEFT + plot_width + MARGIN_RIGHT;
    let height = MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + PLOT_HEIGHT;

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif">"#
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="30" text-anchor="middle" font-size="18">{}</text>"#,
        width / 2.0,
        escape(title)
    )?;
    writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{:.1}" y2="{baseline}" stroke="black"/>"#,
        MARGIN_LEFT + plot_width
    )?;
    writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="black"/>"#
    )?;
    writeln!(
        svg,
        r#"<text x="{MARGIN_LEFT}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"#,
        MARGIN_TOP - 6.0,
        format_value(max_value)
    )?;

    for (index, (name, consumed)) in actual.iter().enumerate() {
        let target = recommended.get(name).copied().unwrap_or_default();
        let group_x = MARGIN_LEFT + GROUP_GAP / 2.0 + index as f64 * group_width;
        for (offset, value, class, color) in [
            (0.0, *consumed, "bar bar-actual", ACTUAL_COLOR),
            (BAR_WIDTH, target, "bar bar-recommended", RECOMMENDED_COLOR),
        ] {
            let bar_height = value * scale;
            writeln!(
                svg,
                r#"<rect class="{class}" x="{:.1}" y="{:.1}" width="{BAR_WIDTH}" height="{bar_height:.1}" fill="{color}"><title>{}: {}</title></rect>"#,
                group_x + offset,
                baseline - bar_height,
                escape(name),
                format_value(value)
            )?;
        }
        let label_x = group_x + BAR_WIDTH;
        let label_y = baseline + 14.0;
        writeln!(
            svg,
            r#"<text x="{label_x:.1}" y="{label_y:.1}" font-size="11" text-anchor="end" transform="rotate(-45 {label_x:.1} {label_y:.1})">{}</text>"#,
            escape(name)
        )?;
    }

    let legend_y = height - 24.0;
    for (i, (label, color)) in [("Consumed", ACTUAL_COLOR), ("Recommended", RECOMMENDED_COLOR)]
        .into_iter()
        .enumerate()
    {
        let x = MARGIN_LEFT + i as f64 * 130.0;
        writeln!(
            svg,
            r#"<rect class="legend" x="{x:.1}" y="{:.1}" width="12" height="12" fill="{color}"/><text x="{:.1}" y="{legend_y:.1}" font-size="12">{label}</text>"#,
            legend_y - 10.0,
            x + 18.0
        )?;
    }
    svg.push_str("</svg>\n");
    Ok(())
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_advisor_shared::NutrientSnapshot;
    use rstest::rstest;

    fn mappings(n: usize) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
        let actual = (0..n).map(|i| (format!("Nutrient {i:02}"), i as f64 * 3.0)).collect();
        let recommended = (0..n).map(|i| (format!("Nutrient {i:02}"), 10.0 + i as f64)).collect();
        (actual, recommended)
    }

    fn count(svg: &str, needle: &str) -> usize {
        svg.matches(needle).count()
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(20)]
    fn test_two_bars_per_key(#[case] n: usize) {
        let (actual, recommended) = mappings(n);
        let svg = render_grouped_bar_chart("Nutrients", &actual, &recommended).unwrap();
        assert_eq!(count(&svg, r#"class="bar "#), 2 * n);
        assert_eq!(count(&svg, "bar-actual"), n);
        assert_eq!(count(&svg, "bar-recommended"), n);
    }

    #[test]
    fn test_placeholder_snapshot_renders() {
        let snapshot = NutrientSnapshot::placeholder();
        let svg =
            render_grouped_bar_chart("Daily intake", &snapshot.actual, &snapshot.recommended).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(ACTUAL_COLOR));
        assert!(svg.contains(RECOMMENDED_COLOR));
        assert!(svg.contains("Vitamin C (mg)"));
    }

    #[test]
    fn test_mismatched_keys_rejected() {
        let (actual, mut recommended) = mappings(3);
        recommended.remove("Nutrient 01");
        recommended.insert("Zinc".to_string(), 11.0);
        let err = render_grouped_bar_chart("x", &actual, &recommended).unwrap_err();
        match err {
            ChartError::MismatchedKeys(keys) => {
                assert!(keys.contains("Nutrient 01"));
                assert!(keys.contains("Zinc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_invalid_rejected() {
        let empty = BTreeMap::new();
        assert_eq!(
            render_grouped_bar_chart("x", &empty, &empty).unwrap_err(),
            ChartError::Empty
        );

        let (mut actual, recommended) = mappings(2);
        actual.insert("Nutrient 00".to_string(), -1.0);
        assert!(matches!(
            render_grouped_bar_chart("x", &actual, &recommended),
            Err(ChartError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_labels_are_escaped() {
        let actual = BTreeMap::from([("Fat <sat> & trans".to_string(), 5.0)]);
        let recommended = actual.clone();
        let svg = render_grouped_bar_chart("A & B", &actual, &recommended).unwrap();
        assert!(svg.contains("Fat &lt;sat&gt; &amp; trans"));
        assert!(svg.contains("A &amp; B"));
    }

    #[test]
    fn test_all_zero_values_render_flat_bars() {
        let actual = BTreeMap::from([("Iron".to_string(), 0.0)]);
        let svg = render_grouped_bar_chart("x", &actual, &actual.clone()).unwrap();
        assert_eq!(count(&svg, r#"height="0.0""#), 2);
    }
}
