use approx::assert_relative_eq;
use compression_viewer::api::{ViewportClampController, ViewportUpdate};
use compression_viewer::core::{CanonicalInstant, ViewportTuning};
use compression_viewer::interaction::{
    Axis, AxisEdge, CategoryPixelMapping, InteractionKind, InteractionMode, VisibleWindow,
};

const PLOT_LEFT: f64 = 40.0;
const PLOT_RIGHT: f64 = 1_040.0;

fn controller() -> ViewportClampController {
    let labels: Vec<CanonicalInstant> = (0..20)
        .map(|i| CanonicalInstant::from_epoch_millis(i * 60_000).expect("instant"))
        .collect();
    let values: Vec<f64> = (0..20).map(|i| f64::from(i) * 100.0 / 19.0).collect();
    ViewportClampController::fit(labels, values, ViewportTuning::default()).expect("controller")
}

fn complete(controller: &mut ViewportClampController, requested: VisibleWindow) -> ViewportUpdate {
    controller
        .on_interaction_complete_linear(requested, PLOT_LEFT, PLOT_RIGHT)
        .expect("interaction")
}

fn changed_edges(update: &ViewportUpdate) -> Vec<(Axis, AxisEdge)> {
    update.changes.iter().map(|c| (c.axis, c.edge)).collect()
}

#[test]
fn initial_window_covers_padded_bounds() {
    let controller = controller();
    let window = controller.window();
    assert_eq!(window.time_range(), (0.0, 19.0));
    assert_relative_eq!(window.value_min, -5.0, epsilon = 1e-9);
    assert_relative_eq!(window.value_max, 105.0, epsilon = 1e-9);
    assert_relative_eq!(controller.bounds().min_value_range, 1.0, epsilon = 1e-9);
}

#[test]
fn window_inside_bounds_is_left_alone() {
    let mut controller = controller();
    let requested = VisibleWindow::new((2.0, 10.0), (10.0, 50.0));
    let update = complete(&mut controller, requested);
    assert!(update.is_empty());
    assert!(!update.recentered);
    assert_eq!(update.visible_labels, 9);
    assert_eq!(controller.window(), requested);
}

#[test]
fn zoom_out_past_everything_snaps_to_padded_bounds() {
    let mut controller = controller();
    let update = complete(
        &mut controller,
        VisibleWindow::new((-10.0, 30.0), (-50.0, 200.0)),
    );
    assert_eq!(update.changes.len(), 4);
    assert_eq!(update.window.time_range(), (0.0, 19.0));
    assert_relative_eq!(update.window.value_min, -5.0, epsilon = 1e-9);
    assert_relative_eq!(update.window.value_max, 105.0, epsilon = 1e-9);
}

#[test]
fn pan_past_right_edge_keeps_span() {
    let mut controller = controller();
    let update = complete(&mut controller, VisibleWindow::new((15.0, 25.0), (0.0, 100.0)));
    assert_eq!(update.window.time_range(), (9.0, 19.0));
    assert_eq!(
        changed_edges(&update),
        vec![(Axis::Time, AxisEdge::Min), (Axis::Time, AxisEdge::Max)]
    );
}

#[test]
fn narrow_value_zoom_widens_to_min_range() {
    let mut controller = controller();
    let update = complete(&mut controller, VisibleWindow::new((0.0, 19.0), (50.0, 50.2)));
    assert_relative_eq!(update.window.value_min, 49.6, epsilon = 1e-9);
    assert_relative_eq!(update.window.value_max, 50.6, epsilon = 1e-9);
    assert_relative_eq!(
        update.window.value_max - update.window.value_min,
        controller.bounds().min_value_range,
        epsilon = 1e-9
    );
}

#[test]
fn inverted_request_is_reordered() {
    let mut controller = controller();
    let update = complete(&mut controller, VisibleWindow::new((19.0, 0.0), (105.0, -5.0)));
    assert_eq!(update.window.time_range(), (0.0, 19.0));
    assert!(update.window.value_min < update.window.value_max);
}

#[test]
fn too_few_visible_labels_recenters_on_dataset_midpoint() {
    let mut controller = controller();
    controller.begin_interaction(InteractionKind::Zoom);
    assert_eq!(controller.interaction_mode(), InteractionMode::Zooming);

    let update = complete(&mut controller, VisibleWindow::new((9.2, 9.8), (10.0, 50.0)));
    assert!(update.recentered);
    assert_eq!(update.visible_labels, 0);
    assert_eq!(update.window.time_range(), (9.0, 11.0));
    assert_eq!(
        changed_edges(&update),
        vec![(Axis::Time, AxisEdge::Min), (Axis::Time, AxisEdge::Max)]
    );
    assert_eq!(controller.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn three_visible_labels_still_recenters() {
    let mut controller = controller();
    let update = complete(&mut controller, VisibleWindow::new((0.0, 2.0), (10.0, 50.0)));
    assert_eq!(update.visible_labels, 3);
    assert!(update.recentered);
    assert_eq!(update.window.time_range(), (9.0, 11.0));
}

#[test]
fn window_labels_follow_time_edges() {
    let mut controller = controller();
    complete(&mut controller, VisibleWindow::new((2.0, 10.0), (10.0, 50.0)));
    let (start, end) = controller.window_labels();
    assert_eq!(start.map(CanonicalInstant::epoch_millis), Some(120_000));
    assert_eq!(end.map(CanonicalInstant::epoch_millis), Some(600_000));
}

#[test]
fn reset_restores_initial_window() {
    let mut controller = controller();
    let initial = controller.window();
    complete(&mut controller, VisibleWindow::new((2.0, 10.0), (10.0, 50.0)));
    let update = controller.reset();
    assert_eq!(update.window, initial);
    assert_eq!(update.changes.len(), 4);
}

#[test]
fn non_finite_request_is_rejected_without_moving_the_window() {
    let mut controller = controller();
    let before = controller.window();
    let err = controller.on_interaction_complete_linear(
        VisibleWindow::new((f64::NAN, 10.0), (0.0, 1.0)),
        PLOT_LEFT,
        PLOT_RIGHT,
    );
    assert!(err.is_err());
    assert_eq!(controller.window(), before);
}

struct FixedMapping {
    visible: Vec<usize>,
}

impl CategoryPixelMapping for FixedMapping {
    fn pixel_for_category(&self, index: usize) -> f64 {
        if self.visible.contains(&index) { 0.5 } else { -1.0 }
    }

    fn plot_left(&self) -> f64 {
        0.0
    }

    fn plot_right(&self) -> f64 {
        1.0
    }
}

#[test]
fn host_mapping_drives_the_visible_label_count() {
    let mut controller = controller();
    let mapping = FixedMapping {
        visible: vec![4, 5, 6, 7],
    };
    let update = controller
        .on_interaction_complete(VisibleWindow::new((4.0, 7.0), (10.0, 50.0)), &mapping)
        .expect("interaction");
    assert_eq!(update.visible_labels, 4);
    assert!(!update.recentered);
    assert!(update.is_empty());
}
