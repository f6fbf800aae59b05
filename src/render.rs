use crate::types::{Coordinates, Workout};

/// Zoom level used whenever the viewport jumps to a workout.
pub const VIEWPORT_ZOOM: u8 = 15;

/// Map widget capability consumed by the app. Fire-and-forget: nothing
/// is read back from the renderer.
pub trait Renderer {
    fn render_marker(&mut self, coords: Coordinates, label: &str, style_class: &str);
    fn focus_viewport(&mut self, coords: Coordinates, zoom: u8);
}

/// Popup style class for a workout's marker, e.g. "running-popup".
pub fn style_class(workout: &Workout) -> String {
    format!("{}-popup", workout.kind())
}

/// Terminal stand-in for the map widget: one line per call.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render_marker(&mut self, coords: Coordinates, label: &str, style_class: &str) {
        println!(
            "marker\t{:.5},{:.5}\t{label}\t[{style_class}]",
            coords.lat, coords.lon
        );
    }

    fn focus_viewport(&mut self, coords: Coordinates, zoom: u8) {
        println!("view\t{:.5},{:.5}\tzoom={zoom}", coords.lat, coords.lon);
    }
}
