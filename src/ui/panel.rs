// src/ui/panel.rs
//! Navigation overlay
//!
//! Draws one radio button per navigation point along the bottom of the
//! window. A filled button is the active point.

use crate::navigation::{NavPoint, NavigationBar};

/// Draws the point navigation and returns the point clicked this frame
pub fn navigation_panel(ui: &imgui::Ui, navigation: &NavigationBar) -> Option<NavPoint> {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let mut clicked = None;
    ui.window("navigation")
        .position(
            [display_size[0] * 0.5, display_size[1] - 40.0],
            imgui::Condition::Always,
        )
        .position_pivot([0.5, 1.0])
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .scroll_bar(false)
        .always_auto_resize(true)
        .bg_alpha(0.0)
        .build(|| {
            for (index, (point, filled)) in navigation.indicators().enumerate() {
                if index > 0 {
                    ui.same_line();
                }
                let _id = ui.push_id(point.label());
                if ui.radio_button_bool("##point", filled) {
                    clicked = Some(point);
                }
            }
        });

    clicked
}
