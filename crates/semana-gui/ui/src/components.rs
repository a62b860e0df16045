mod notification_banner;
mod task_form;
mod week_grid;

pub use notification_banner::NotificationBanner;
pub use task_form::TaskForm;
pub use week_grid::WeekGrid;
