pub mod ball;
pub mod camera;
pub mod debug;
pub mod goal;
pub mod input;
pub mod math;
pub mod player;
pub mod ron;
pub mod score;
pub mod settings;
pub mod ui;
