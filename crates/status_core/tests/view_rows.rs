mod common;

use common::{init_logging, with_results};
use status_core::{AppState, RowShade};

#[test]
fn rows_alternate_shade_and_carry_tint() {
    init_logging();
    let state = with_results(AppState::new());
    let rows = state.view().rows;

    let shades: Vec<_> = rows.iter().map(|r| r.shade).collect();
    assert_eq!(shades, vec![RowShade::Even, RowShade::Odd, RowShade::Even]);
    assert_eq!(rows[0].tint, "#00FF0020");
    assert_eq!(rows[1].colour, "#FFFFFF");
    assert_eq!(rows[1].tint, "#FFFFFF20");
    assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn empty_result_set_renders_no_rows() {
    let view = AppState::new().view();
    assert!(view.rows.is_empty());
    assert_eq!(view.error, None);
    assert!(view.inputs_enabled);
}
