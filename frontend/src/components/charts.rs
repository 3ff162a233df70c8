use std::f64::consts::PI;

use yew::prelude::*;

use crate::analytics::{chart, ChartData, PurposeSlice};
use crate::format::format_amount;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PAD_LEFT: f64 = 72.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 56.0;
const TICKS: usize = 5;
const MIN_SEGMENT: f64 = 4.0;

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub data: ChartData,
    /// `(label index, dataset index)` of the clicked segment.
    pub on_select: Callback<(usize, usize)>,
}

#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    let data = &props.data;
    let plot_width = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_height = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let max = nice_max(data.max_column_total());
    let slot = plot_width / data.labels.len().max(1) as f64;
    let bar_width = (slot * 0.7).min(48.0);
    let scale = |value: f64| value / max * plot_height;

    let ticks = (0..=TICKS).map(|i| {
        let value = max * i as f64 / TICKS as f64;
        let y = PAD_TOP + plot_height - scale(value);
        html! {
            <g>
                <line x1={PAD_LEFT.to_string()} x2={(WIDTH - PAD_RIGHT).to_string()} y1={y.to_string()} y2={y.to_string()} stroke="#e2e8f0" />
                <text x={(PAD_LEFT - 6.0).to_string()} y={(y + 4.0).to_string()} text-anchor="end" font-size="10" fill="#64748b">{ format_amount(value) }</text>
            </g>
        }
    });

    let bars = data.labels.iter().enumerate().map(|(label_index, label)| {
        let x = PAD_LEFT + slot * label_index as f64 + (slot - bar_width) / 2.0;
        let mut base = PAD_TOP + plot_height;
        let segments = bar_segments(data, label_index, scale).into_iter().map(|(dataset_index, height)| {
            let dataset = &data.datasets[dataset_index];
            base -= height;
            let on_select = props.on_select.clone();
            let tooltip = data.tooltip(label_index, dataset_index).join("\n");
            html! {
                <rect
                    x={x.to_string()}
                    y={base.to_string()}
                    width={bar_width.to_string()}
                    height={height.to_string()}
                    fill={dataset.fill()}
                    stroke={dataset.border()}
                    class="cursor-pointer"
                    onclick={Callback::from(move |_| on_select.emit((label_index, dataset_index)))}
                >
                    <title>{ tooltip }</title>
                </rect>
            }
        }).collect::<Html>();
        let label_x = x + bar_width / 2.0;
        let label_y = PAD_TOP + plot_height + 14.0;
        html! {
            <g key={label.clone()}>
                { segments }
                <text
                    x={label_x.to_string()}
                    y={label_y.to_string()}
                    text-anchor="end"
                    font-size="10"
                    fill="#334155"
                    transform={format!("rotate(-30 {} {})", label_x, label_y)}
                >
                    { label.clone() }
                </text>
            </g>
        }
    });

    let legend = data.datasets.iter().map(|dataset| html! {
        <span class="flex items-center gap-1 text-[11px] text-slate-600">
            <span class="inline-block w-3 h-3 rounded-sm" style={format!("background:{};border:1px solid {}", dataset.fill(), dataset.border())}></span>
            { dataset.label.clone() }
        </span>
    });

    html! {
        <div class="w-full">
            <div class="flex flex-wrap gap-3 mb-2">{ for legend }</div>
            <svg viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} class="w-full h-auto" role="img">
                { for ticks }
                { for bars }
            </svg>
        </div>
    }
}

/// Drawn segments of one bar, bottom up, as `(dataset index, height)`.
/// Any cell holding expenses gets at least `MIN_SEGMENT` so it stays
/// clickable, zero totals included.
pub fn bar_segments(data: &ChartData, label_index: usize, scale: impl Fn(f64) -> f64) -> Vec<(usize, f64)> {
    (0..data.datasets.len())
        .filter(|&dataset_index| !data.cell(label_index, dataset_index).is_empty())
        .map(|dataset_index| {
            let height = scale(data.value(label_index, dataset_index).max(0.0));
            (dataset_index, height.max(MIN_SEGMENT))
        })
        .collect()
}

/// Round the axis maximum up to 1, 2 or 5 times a power of ten.
pub fn nice_max(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

pub fn wedge_path(cx: f64, cy: f64, r: f64, from: f64, to: f64) -> String {
    let point = |fraction: f64| {
        let angle = fraction * 2.0 * PI - PI / 2.0;
        (cx + r * angle.cos(), cy + r * angle.sin())
    };
    let (x1, y1) = point(from);
    let (x2, y2) = point(to);
    let large_arc = if to - from > 0.5 { 1 } else { 0 };
    format!(
        "M {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} Z",
        cx, cy, x1, y1, r, r, large_arc, x2, y2
    )
}

#[derive(Properties, PartialEq)]
pub struct PieChartProps {
    pub slices: Vec<PurposeSlice>,
}

#[function_component(PieChart)]
pub fn pie_chart(props: &PieChartProps) -> Html {
    const SIZE: f64 = 220.0;
    let (cx, cy, r) = (SIZE / 2.0, SIZE / 2.0, SIZE / 2.0 - 4.0);

    let mut start = 0.0;
    let wedges = props.slices.iter().filter(|s| s.share > 0.0).map(|slice| {
        let end = start + slice.share;
        let title = format!(
            "{}: {} ({:.1}%)",
            slice.purpose,
            format_amount(slice.total),
            slice.share * 100.0
        );
        let shape = if slice.share >= 0.9999 {
            html! {
                <circle cx={cx.to_string()} cy={cy.to_string()} r={r.to_string()} fill={chart::fill_color(slice.color_index)} stroke="#fff">
                    <title>{ title }</title>
                </circle>
            }
        } else {
            html! {
                <path d={wedge_path(cx, cy, r, start, end)} fill={chart::fill_color(slice.color_index)} stroke="#fff">
                    <title>{ title }</title>
                </path>
            }
        };
        start = end;
        shape
    }).collect::<Html>();

    html! {
        <div class="flex flex-col md:flex-row items-center gap-6">
            <svg viewBox={format!("0 0 {} {}", SIZE, SIZE)} class="w-56 h-56" role="img">
                { wedges }
            </svg>
            <ul class="space-y-1">
                { for props.slices.iter().map(|slice| html! {
                    <li class="flex items-center gap-2 text-[12px] text-slate-600">
                        <span class="inline-block w-3 h-3 rounded-sm" style={format!("background:{}", chart::fill_color(slice.color_index))}></span>
                        <span class="font-semibold">{ slice.purpose.clone() }</span>
                        <span>{ format_amount(slice.total) }</span>
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{build_view, FilterMode, FilterState, SortState};
    use crate::models::Expense;
    use chrono::{TimeZone, Utc};

    fn expense(id: &str, purpose: &str, amount: f64, day: u32) -> Expense {
        Expense {
            id: id.to_string(),
            name: id.to_string(),
            purpose: purpose.to_string(),
            description: String::new(),
            quantity: 1.0,
            price: amount,
            total_amount: amount,
            expense_date: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn zero_total_days_still_get_a_clickable_bar() {
        let list = vec![expense("free", "Food", 0.0, 5), expense("paid", "Food", 120.0, 6)];
        let view = build_view(&list, &FilterState::default(), &SortState::default(), &Utc);
        let scale = |value: f64| value / 2.0;

        assert_eq!(view.chart.labels, vec!["Jan 5, 2024", "Jan 6, 2024"]);
        assert_eq!(bar_segments(&view.chart, 0, scale), vec![(0, MIN_SEGMENT)]);
        assert_eq!(bar_segments(&view.chart, 1, scale), vec![(0, 60.0)]);
        assert!(view.chart.click(0, 0).is_some());
    }

    #[test]
    fn empty_stacked_cells_are_not_drawn() {
        let list = vec![expense("a", "Food", 100.0, 5), expense("b", "Travel", 0.0, 6)];
        let filter = FilterState::with_mode(FilterMode::DateRange);
        let view = build_view(&list, &filter, &SortState::default(), &Utc);
        let scale = |value: f64| value;

        assert_eq!(bar_segments(&view.chart, 0, scale), vec![(0, 100.0)]);
        assert_eq!(bar_segments(&view.chart, 1, scale), vec![(1, MIN_SEGMENT)]);
    }

    #[test]
    fn axis_maximum_is_rounded_up() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(350.0), 500.0);
        assert_eq!(nice_max(200.0), 200.0);
        assert_eq!(nice_max(1200.0), 2000.0);
        assert_eq!(nice_max(9.5), 10.0);
    }

    #[test]
    fn quarter_wedge_ends_at_three_o_clock() {
        let path = wedge_path(100.0, 100.0, 50.0, 0.0, 0.25);
        assert_eq!(
            path,
            "M 100.000 100.000 L 100.000 50.000 A 50.000 50.000 0 0 1 150.000 100.000 Z"
        );
    }

    #[test]
    fn wide_wedges_use_the_large_arc() {
        assert!(wedge_path(0.0, 0.0, 1.0, 0.0, 0.75).contains(" 0 1 1 "));
    }
}
