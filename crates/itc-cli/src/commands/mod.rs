mod all_time;
mod measures;
mod retention;

pub use all_time::execute as all_time;
pub use measures::execute as measures;
pub use retention::execute as retention;
