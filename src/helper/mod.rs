pub mod jaw_geometry;
