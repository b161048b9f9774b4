pub mod availability_editor;
pub mod calendar_view;
pub mod notice;
pub mod slot_picker;

pub use availability_editor::AvailabilityPanel;
pub use calendar_view::CalendarView;
pub use notice::{ErrorView, NoticeBar};
pub use slot_picker::SlotPickerPanel;
