pub mod tab_bar;
pub mod breadcrumb;
pub mod status_bar;
pub mod scrollable;

pub use tab_bar::render_tab_bar;
pub use breadcrumb::render_breadcrumb;
pub use status_bar::render_status_bar;
pub use scrollable::Scrollable;
