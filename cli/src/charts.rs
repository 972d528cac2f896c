//! Terminal line charts for the trend views. A pure text renderer: given
//! parallel date labels and values it produces a framed plot with a scaled
//! Y axis, dashed gridlines, and thinned MM-DD labels.

use anyhow::{Result, bail};

/// Inner plot size in character cells. Rows run 0..=PLOT_HEIGHT, so the Y
/// axis carries six tick lines.
const PLOT_WIDTH: usize = 56;
const PLOT_HEIGHT: usize = 10;
const Y_TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Calories,
    Sleep,
    Weight,
}

impl ChartKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "calories" => Ok(ChartKind::Calories),
            "sleep" => Ok(ChartKind::Sleep),
            "weight" => Ok(ChartKind::Weight),
            _ => bail!("Chart type must be: calories, sleep, or weight (got '{raw}')"),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Calories => "Calories",
            ChartKind::Sleep => "Sleep (hours)",
            ChartKind::Weight => "Weight (kg)",
        }
    }

    fn format_value(self, value: f64) -> String {
        match self {
            ChartKind::Weight => format!("{value:.1}"),
            ChartKind::Calories | ChartKind::Sleep => format!("{value:.0}"),
        }
    }
}

/// Render a line chart. Weight series drop unrecorded (zero) points before
/// plotting; a series with nothing left renders a placeholder message.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render(labels: &[String], values: &[f64], kind: ChartKind) -> String {
    let (labels, values) = if kind == ChartKind::Weight {
        let kept: Vec<(String, f64)> = labels
            .iter()
            .zip(values)
            .filter(|(_, v)| **v > 0.0)
            .map(|(l, v)| (l.clone(), *v))
            .collect();
        kept.into_iter().unzip()
    } else {
        (labels.to_vec(), values.to_vec())
    };

    if values.is_empty() {
        return "  No data available\n".to_string();
    }

    let max = values.iter().copied().fold(1.0_f64, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let range = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };

    let rows = PLOT_HEIGHT + 1;
    let mut grid = vec![vec![' '; PLOT_WIDTH]; rows];

    // Dashed gridlines on each tick row.
    for tick in 0..=Y_TICKS {
        let row = tick * PLOT_HEIGHT / Y_TICKS;
        for (col, cell) in grid[row].iter_mut().enumerate() {
            if col % 2 == 0 {
                *cell = '┄';
            }
        }
    }

    let n = values.len();
    let col_of = |i: usize| -> usize {
        if n <= 1 {
            0
        } else {
            (PLOT_WIDTH - 1) * i / (n - 1)
        }
    };
    let row_of = |v: f64| -> usize {
        let r = ((max - v) / range * PLOT_HEIGHT as f64).round() as usize;
        r.min(PLOT_HEIGHT)
    };

    // Interpolated line between consecutive points.
    for i in 0..n.saturating_sub(1) {
        let (c0, c1) = (col_of(i), col_of(i + 1));
        let (v0, v1) = (values[i], values[i + 1]);
        for col in c0..=c1 {
            let t = if c1 == c0 {
                0.0
            } else {
                (col - c0) as f64 / (c1 - c0) as f64
            };
            let row = row_of(v0 + t * (v1 - v0));
            grid[row][col] = '·';
        }
    }
    for (i, v) in values.iter().enumerate() {
        grid[row_of(*v)][col_of(i)] = '●';
    }

    // Assemble: Y labels on tick rows, then the frame, then X labels.
    let mut out = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let is_tick = row % (PLOT_HEIGHT / Y_TICKS) == 0;
        if is_tick {
            let tick = row * Y_TICKS / PLOT_HEIGHT;
            let value = max - range / Y_TICKS as f64 * tick as f64;
            out.push_str(&format!("{:>8} ┤", kind.format_value(value)));
        } else {
            out.push_str("         │");
        }
        out.extend(cells.iter());
        out.push('\n');
    }
    out.push_str("         └");
    for _ in 0..PLOT_WIDTH {
        out.push('─');
    }
    out.push('\n');

    out.push_str(&x_labels(&labels, n, col_of));
    out
}

/// MM-DD labels under their columns, thinned to at most about six.
fn x_labels(labels: &[String], n: usize, col_of: impl Fn(usize) -> usize) -> String {
    let mut line = vec![' '; 10 + PLOT_WIDTH + 6];
    let step = (n.div_ceil(6)).max(1);
    for (i, label) in labels.iter().enumerate() {
        if i % step != 0 && i != n - 1 {
            continue;
        }
        // YYYY-MM-DD keys shorten to MM-DD; anything else prints as-is.
        let short = label.get(5..).filter(|s| !s.is_empty()).unwrap_or(label);
        let start = (10 + col_of(i)).saturating_sub(short.len() / 2);
        for (j, c) in short.chars().enumerate() {
            if start + j < line.len() {
                line[start + j] = c;
            }
        }
    }
    let mut s: String = line.into_iter().collect();
    while s.ends_with(' ') {
        s.pop();
    }
    s.push('\n');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<String> {
        (1..=n).map(|d| format!("2024-06-{d:02}")).collect()
    }

    #[test]
    fn test_empty_series_renders_placeholder() {
        let out = render(&[], &[], ChartKind::Calories);
        assert!(out.contains("No data available"));
    }

    #[test]
    fn test_weight_drops_zero_points() {
        let out = render(&dates(3), &[0.0, 0.0, 0.0], ChartKind::Weight);
        assert!(out.contains("No data available"));

        let out = render(&dates(3), &[0.0, 75.5, 0.0], ChartKind::Weight);
        assert!(out.contains('●'));
        assert!(out.contains("75.5"));
    }

    #[test]
    fn test_chart_frame_dimensions() {
        let out = render(&dates(7), &[2100.0, 2400.0, 1900.0, 2600.0, 2200.0, 2500.0, 2300.0], ChartKind::Calories);
        // 11 plot rows + axis + label line.
        assert_eq!(out.lines().count(), 13);
        assert!(out.contains('┤'));
        assert!(out.contains('└'));
        // Extremes appear as Y labels.
        assert!(out.contains("2600"));
        assert!(out.contains("1900"));
    }

    #[test]
    fn test_single_point_does_not_panic() {
        let out = render(&dates(1), &[2000.0], ChartKind::Calories);
        assert!(out.contains('●'));
        assert!(out.contains("06-01"));
    }

    #[test]
    fn test_flat_series_uses_unit_range() {
        let out = render(&dates(5), &[8.0; 5], ChartKind::Sleep);
        assert!(out.contains('●'));
        assert!(out.contains('8'));
    }

    #[test]
    fn test_x_labels_are_thinned() {
        let out = render(&dates(30), &[2000.0; 30], ChartKind::Calories);
        let label_line = out.lines().last().unwrap();
        // 30 labels thinned to at most 7 (every 5th plus the final one).
        assert!(label_line.matches("06-").count() <= 7);
        assert!(label_line.contains("06-30"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(ChartKind::parse("calories").unwrap(), ChartKind::Calories);
        assert_eq!(ChartKind::parse("Sleep").unwrap(), ChartKind::Sleep);
        assert_eq!(ChartKind::parse("weight").unwrap(), ChartKind::Weight);
        assert!(ChartKind::parse("mood").is_err());
    }
}
