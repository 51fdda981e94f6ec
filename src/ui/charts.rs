use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points,
};

use crate::color::{ColorMap, generate_palette};
use crate::data::filter::top_n_by;
use crate::data::model::{NumericField, Player};

/// Height of each chart panel.
const PANEL_HEIGHT: f32 = 300.0;

/// Marker colour for ungrouped scatter series.
const MARKER_COLOR: Color32 = Color32::LIGHT_BLUE;

/// Colour of the least-squares trend overlay.
const TREND_COLOR: Color32 = Color32::LIGHT_RED;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Collect `[x, y]` pairs for the rows where both fields parsed.
fn xy_pairs(players: &[&Player], x: NumericField, y: NumericField) -> Vec<[f64; 2]> {
    players
        .iter()
        .filter_map(|p| Some([x.get(p)?, y.get(p)?]))
        .collect()
}

/// Least-squares line through the pairs; `None` when fewer than two points
/// or the x values have no spread.
fn linear_fit(pairs: &[[f64; 2]]) -> Option<(f64, f64)> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for p in pairs {
        cov += (p[0] - mean_x) * (p[1] - mean_y);
        var += (p[0] - mean_x) * (p[0] - mean_x);
    }
    if var == 0.0 {
        return None;
    }
    let slope = cov / var;
    Some((slope, mean_y - slope * mean_x))
}

/// Interpolated percentile of an already sorted slice, `p` in `[0, 1]`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Five-number summary `(min, q1, median, q3, max)`; `None` on empty input.
fn five_number_summary(values: &mut [f64]) -> Option<(f64, f64, f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some((
        values[0],
        percentile(values, 0.25),
        percentile(values, 0.50),
        percentile(values, 0.75),
        values[values.len() - 1],
    ))
}

/// Scatter panel with a least-squares trend overlay.
fn scatter_with_trend(ui: &mut Ui, id: &str, players: &[&Player], x: NumericField, y: NumericField) {
    let pairs = xy_pairs(players, x, y);
    let trend = linear_fit(&pairs);
    let (x_lo, x_hi) = pairs.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])),
    );

    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .x_axis_label(x.label())
        .y_axis_label(y.label())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(pairs))
                    .radius(2.0)
                    .color(MARKER_COLOR)
                    .name("Players"),
            );
            if let Some((slope, intercept)) = trend {
                let ends = vec![
                    [x_lo, slope * x_lo + intercept],
                    [x_hi, slope * x_hi + intercept],
                ];
                plot_ui.line(
                    Line::new(PlotPoints::from(ends))
                        .color(TREND_COLOR)
                        .width(1.5)
                        .name("Trend"),
                );
            }
        });
}

/// Ranked bar chart: one bar per player at x = rank, grouped into one
/// [`BarChart`] per club so the legend lists clubs.
fn ranked_bars(
    ui: &mut Ui,
    id: &str,
    ranked: &[&Player],
    value: NumericField,
    clubs: &ColorMap,
    y_label: &str,
) {
    let names: Vec<String> = ranked.iter().map(|p| p.short_name.clone()).collect();

    let mut by_club: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for (rank, p) in ranked.iter().enumerate() {
        let Some(v) = value.get(p) else { continue };
        let club = p.club_name.as_deref().unwrap_or("(no club)");
        by_club
            .entry(club)
            .or_default()
            .push(Bar::new(rank as f64, v).name(&p.short_name));
    }

    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            names.get(rounded as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (club, bars) in by_club {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(clubs.color_for(Some(club)))
                        .name(club),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// The eight chart panels, in their fixed page order
// ---------------------------------------------------------------------------

pub fn age_vs_ball_control(ui: &mut Ui, players: &[&Player]) {
    ui.heading("1. Age vs. Ball Control Performance");
    scatter_with_trend(
        ui,
        "age_ball_control",
        players,
        NumericField::Age,
        NumericField::BallControl,
    );
}

/// The five metrics plotted against height, in legend order.
const HEIGHT_METRICS: [NumericField; 5] = [
    NumericField::Stamina,
    NumericField::Dribbling,
    NumericField::Pace,
    NumericField::Passing,
    NumericField::HeadingAccuracy,
];

pub fn height_vs_metrics(ui: &mut Ui, players: &[&Player]) {
    ui.heading("2. Height vs. Performance Metrics");

    let colors = generate_palette(HEIGHT_METRICS.len());
    Plot::new("height_metrics")
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .x_axis_label("Height (cm)")
        .y_axis_label("Performance Metrics")
        .show(ui, |plot_ui| {
            for (metric, color) in HEIGHT_METRICS.iter().zip(colors) {
                let pairs = xy_pairs(players, NumericField::HeightCm, *metric);
                plot_ui.points(
                    Points::new(PlotPoints::from(pairs))
                        .radius(2.0)
                        .color(color)
                        .name(metric.label()),
                );
            }
        });
}

pub fn wage_vs_overall(ui: &mut Ui, players: &[&Player]) {
    ui.heading("3. Wage vs. Overall Rating");
    scatter_with_trend(
        ui,
        "wage_overall",
        players,
        NumericField::WageEur,
        NumericField::Overall,
    );
}

pub fn top_quickest(ui: &mut Ui, players: &[&Player], clubs: &ColorMap) {
    ui.heading("4. Top Quickest Players");
    let ranked = top_n_by(players, NumericField::Pace, 10);
    ranked_bars(ui, "top_quickest", &ranked, NumericField::Pace, clubs, "Pace");
}

pub fn position_wage_value(ui: &mut Ui, players: &[&Player], positions: &ColorMap) {
    ui.heading("5. Position vs. Wage and Value");

    let mut by_position: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in players {
        let (Some(wage), Some(value)) = (p.wage_eur, p.value_eur) else {
            continue;
        };
        let Some(pos) = p.player_positions.as_deref() else {
            continue;
        };
        by_position.entry(pos).or_default().push([wage, value]);
    }

    Plot::new("position_wage_value")
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .x_axis_label("Wage (EUR)")
        .y_axis_label("Value (EUR)")
        .show(ui, |plot_ui| {
            for (pos, pts) in by_position {
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .radius(2.0)
                        .color(positions.color_for(Some(pos)))
                        .name(pos),
                );
            }
        });
}

pub fn nationality_wages(ui: &mut Ui, players: &[&Player]) {
    ui.heading("6. Nationalities with the Highest Wages");

    let mut by_nation: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for p in players {
        let (Some(nation), Some(wage)) = (p.nationality_name.as_deref(), p.wage_eur) else {
            continue;
        };
        by_nation.entry(nation).or_default().push(wage);
    }

    let names: Vec<String> = by_nation.keys().map(|s| s.to_string()).collect();
    let mut boxes = Vec::new();
    let mut dots = Vec::new();
    for (i, (nation, wages)) in by_nation.iter_mut().enumerate() {
        let x = i as f64;
        dots.extend(wages.iter().map(|&w| [x, w]));
        if let Some((min, q1, median, q3, max)) = five_number_summary(wages) {
            boxes.push(BoxElem::new(x, BoxSpread::new(min, q1, median, q3, max)).name(*nation));
        }
    }

    Plot::new("nationality_wages")
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .x_axis_label("Nationality")
        .y_axis_label("Wage (EUR)")
        .x_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            names.get(rounded as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes).name("Wage distribution"));
            // All underlying points, as a strip over each box.
            plot_ui.points(
                Points::new(PlotPoints::from(dots))
                    .radius(1.5)
                    .color(Color32::GRAY)
                    .name("Players"),
            );
        });
}

pub fn age_vs_overall(ui: &mut Ui, players: &[&Player]) {
    ui.heading("7. Age vs. Overall Rating");
    scatter_with_trend(
        ui,
        "age_overall",
        players,
        NumericField::Age,
        NumericField::Overall,
    );
}

pub fn top_overall(ui: &mut Ui, players: &[&Player], clubs: &ColorMap) {
    ui.heading("8. Top 50 Players and their Clubs");
    let ranked = top_n_by(players, NumericField::Overall, 50);
    ranked_bars(
        ui,
        "top_overall",
        &ranked,
        NumericField::Overall,
        clubs,
        "Overall Rating",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_fit_recovers_a_perfect_line() {
        let pairs = vec![[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]];
        let (slope, intercept) = linear_fit(&pairs).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_fit_declines_degenerate_inputs() {
        assert_eq!(linear_fit(&[]), None);
        assert_eq!(linear_fit(&[[1.0, 2.0]]), None);
        // No x spread: vertical data has no least-squares line.
        assert_eq!(linear_fit(&[[1.0, 2.0], [1.0, 5.0]]), None);
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 1.0), 4.0);
        assert_eq!(percentile(&sorted, 0.5), 2.5);
        assert_eq!(percentile(&sorted, 0.25), 1.75);
    }

    #[test]
    fn five_number_summary_orders_the_input_first() {
        let mut values = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        let (min, q1, median, q3, max) = five_number_summary(&mut values).unwrap();
        assert_eq!((min, median, max), (1.0, 3.0, 5.0));
        assert_eq!((q1, q3), (2.0, 4.0));

        assert_eq!(five_number_summary(&mut []), None);
    }

    #[test]
    fn xy_pairs_skip_rows_with_gaps() {
        let full = Player {
            age: Some(20.0),
            overall: Some(80.0),
            ..Player::default()
        };
        let gap = Player {
            age: Some(30.0),
            overall: None,
            ..Player::default()
        };
        let players = vec![&full, &gap];
        let pairs = xy_pairs(&players, NumericField::Age, NumericField::Overall);
        assert_eq!(pairs, vec![[20.0, 80.0]]);
    }
}
