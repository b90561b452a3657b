/// Notes mind map canvas.
pub mod mind_map;
