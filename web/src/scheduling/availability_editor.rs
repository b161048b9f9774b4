use chrono::{NaiveDate, NaiveTime};
use shared_types::{SaveAvailabilityRequest, TimeWindow};

use super::request::{RequestTicket, RequestTracker};
use super::Notice;
use crate::error::{ApiError, ValidationError};

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowField {
    From,
    To,
}

/// Admin editor over the time windows of one selected date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityEditor {
    selected: Option<NaiveDate>,
    windows: Vec<TimeWindow>,
    tracker: RequestTracker,
    saves: RequestTracker,
    loading: bool,
    saving: bool,
    notice: Option<Notice>,
}

impl AvailabilityEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Switches to `date`, dropping the windows of the previous date, and
    /// returns the ticket the availability read must carry.
    pub fn select_date(&mut self, date: NaiveDate) -> RequestTicket {
        self.selected = Some(date);
        self.windows.clear();
        self.notice = None;
        self.loading = true;
        self.saving = false;
        self.tracker.issue(date)
    }

    /// Drops the selected date, its windows and any outstanding read or save.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.windows.clear();
        self.notice = None;
        self.loading = false;
        self.saving = false;
        self.tracker.invalidate();
        self.saves.invalidate();
    }

    /// Applies the result of the read issued with `ticket`. Returns `false`
    /// when the response is stale and was dropped.
    pub fn apply_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<TimeWindow>, ApiError>,
    ) -> bool {
        if !self.tracker.is_current(&ticket) || self.selected != Some(ticket.date()) {
            tracing::debug!(date = %ticket.date(), "Dropping stale availability response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(windows) => self.windows = windows,
            Err(e) => {
                tracing::warn!(date = %ticket.date(), error = %e, "Failed to fetch availability");
                self.windows.clear();
            }
        }
        true
    }

    pub fn add_window(&mut self) {
        self.windows.push(TimeWindow::default());
    }

    /// Updates one field of the window at `index`; out of range is a no-op.
    pub fn edit_window(&mut self, index: usize, field: WindowField, value: impl Into<String>) -> bool {
        let Some(window) = self.windows.get_mut(index) else {
            return false;
        };
        match field {
            WindowField::From => window.from = value.into(),
            WindowField::To => window.to = value.into(),
        }
        true
    }

    pub fn remove_window(&mut self, index: usize) -> bool {
        if index < self.windows.len() {
            self.windows.remove(index);
            true
        } else {
            false
        }
    }

    /// Builds the save request and the ticket its outcome must carry, or
    /// records a validation notice and refuses.
    pub fn prepare_save(
        &mut self,
    ) -> Result<(RequestTicket, SaveAvailabilityRequest), ValidationError> {
        match self.validate() {
            Ok(request) => {
                self.saving = true;
                self.notice = None;
                Ok((self.saves.issue(request.date), request))
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<SaveAvailabilityRequest, ValidationError> {
        let date = self.selected.ok_or(ValidationError::NoDateSelected)?;
        if self.windows.is_empty() {
            return Err(ValidationError::NoWindows);
        }

        for (index, window) in self.windows.iter().enumerate() {
            validate_window(window).map_err(|reason| ValidationError::InvalidWindow {
                position: index + 1,
                reason,
            })?;
        }

        Ok(SaveAvailabilityRequest {
            date,
            time_slots: self.windows.clone(),
        })
    }

    /// Records the outcome of the write issued with `ticket`. Local windows
    /// are left as they are. Returns `false` when the admin has moved to
    /// another date or saved again since.
    pub fn finish_save(&mut self, ticket: RequestTicket, result: Result<(), ApiError>) -> bool {
        if !self.saves.is_current(&ticket) || self.selected != Some(ticket.date()) {
            if let Err(e) = &result {
                tracing::error!(date = %ticket.date(), error = %e, "Failed to save availability");
            }
            tracing::debug!(date = %ticket.date(), "Dropping outcome of a superseded save");
            return false;
        }

        self.saving = false;
        self.notice = Some(match result {
            Ok(()) => Notice::success("Availability saved."),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save availability");
                Notice::error(format!("Could not save availability: {}", e))
            }
        });
        true
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

fn validate_window(window: &TimeWindow) -> Result<(), String> {
    let from = parse_time(&window.from).ok_or_else(|| "start time must be HH:MM".to_string())?;
    let to = parse_time(&window.to).ok_or_else(|| "end time must be HH:MM".to_string())?;
    if from >= to {
        return Err(format!("{} must be before {}", window.from, window.to));
    }
    Ok(())
}
