//! Terminal rendering of the aggregated report.

pub mod text;
pub mod theme;

pub use text::{
    render_banner, render_footer, render_no_data, render_stdin_hint, render_text_report,
};
pub use theme::Theme;
