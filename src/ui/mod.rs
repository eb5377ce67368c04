/// User interface views
///
/// Pure view builders: they read the session and return widgets, all
/// mutation goes through messages in main.rs.
/// - panels.rs: the main editor screen (upload pane, tool grid, options,
///   generate trigger, error banner, result pane)
/// - camera.rs: the fullscreen capture overlay

pub mod camera;
pub mod panels;
