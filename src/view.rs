pub mod pan_zoom;
