use super::{fit_lines_to_panel, fraction, surface_size_for};
use crate::game_layout::PanelRect;

fn lines(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

#[test]
fn fit_lines_to_panel_keeps_all_lines_when_space_is_sufficient() {
    let all = lines(&["HP", "MP", "Lv"]);
    assert_eq!(fit_lines_to_panel(&all, 200.0, 18.0), all);
}

#[test]
fn fit_lines_to_panel_truncates_and_shows_hidden_count() {
    let all = lines(&["Gold", "Essence", "Enemies", "Seed"]);
    let fitted = fit_lines_to_panel(&all, 40.0, 18.0);
    assert_eq!(fitted, lines(&["Gold", "... and 3 more"]));
}

#[test]
fn fit_lines_to_panel_single_line_summarizes_everything() {
    let all = lines(&["a", "b", "c"]);
    assert_eq!(fit_lines_to_panel(&all, 20.0, 18.0), lines(&["... and 3 more"]));
}

#[test]
fn fit_lines_to_panel_returns_empty_when_no_vertical_space() {
    assert!(fit_lines_to_panel(&lines(&["a", "b"]), 10.0, 18.0).is_empty());
    assert!(fit_lines_to_panel(&lines(&["a"]), 100.0, 0.0).is_empty());
}

#[test]
fn bar_fraction_is_clamped() {
    assert_eq!(fraction(50.0, 100.0), 0.5);
    assert_eq!(fraction(150.0, 100.0), 1.0);
    assert_eq!(fraction(10.0, 0.0), 0.0);
    assert_eq!(fraction(f32::NAN, 100.0), 0.0);
}

#[test]
fn surface_is_half_the_viewport_and_never_empty() {
    let panel = PanelRect { x: 10.0, y: 10.0, width: 641.0, height: 400.0 };
    assert_eq!(surface_size_for(panel), (320, 200));
    let tiny = PanelRect { x: 0.0, y: 0.0, width: 0.0, height: 1.0 };
    assert_eq!(surface_size_for(tiny), (1, 1));
}
