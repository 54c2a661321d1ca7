/// Rendering: control widgets (`panels`) and the two charts (`plot`).
pub mod panels;
pub mod plot;
