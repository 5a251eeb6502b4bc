//! Charts module - Interactive and static chart rendering

pub mod palette;
mod plotter;
mod renderer;

pub use plotter::{color32, ChartPlotter};
pub use renderer::{
    ChartRenderer, RenderError, COUNTRY_FILE, MOVIE_GENRES_FILE, TREND_FILE, TV_GENRES_FILE,
};
