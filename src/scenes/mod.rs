mod bicycle;
mod floor;

pub use bicycle::{build_bicycle, build_handlebars, build_wheel, Bicycle};
pub use floor::build_floor;
