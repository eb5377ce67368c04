/// State management module
///
/// This module handles all application state, including:
/// - The current session (input image, generation lifecycle) in session.rs
/// - The closed edit-mode and age-bucket enumerations in modes.rs

pub mod modes;
pub mod session;
