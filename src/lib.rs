pub mod app;
pub mod recommend;
pub mod util;
