use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{BookingRequest, TimeSlot};
use validator::{Validate, ValidationErrors};

use super::request::{RequestTicket, RequestTracker};
use super::Notice;
use crate::error::{ApiError, SlotPickerError};

/// Where the client is in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPickerStep {
    #[default]
    Browsing,
    TimeSelected,
    FormOpen,
    Submitted,
}

impl SlotPickerStep {
    fn describe(self) -> &'static str {
        match self {
            SlotPickerStep::Browsing => "browsing times",
            SlotPickerStep::TimeSelected => "a time is selected",
            SlotPickerStep::FormOpen => "the contact form is open",
            SlotPickerStep::Submitted => "the booking is submitted",
        }
    }
}

/// Contact fields of the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactDetails {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "email address is not valid"))]
    pub email: String,
}

impl ContactDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    fn trimmed(&self) -> Self {
        Self::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
        )
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

fn describe_validation(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Client-side picker: bookable times of one date and the booking form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotPicker {
    selected_date: Option<NaiveDate>,
    slots: Vec<TimeSlot>,
    chosen: Option<TimeSlot>,
    step: SlotPickerStep,
    tracker: RequestTracker,
    submissions: RequestTracker,
    loading: bool,
    pending: Option<BookingRequest>,
    booked: Option<BookingRequest>,
    notice: Option<Notice>,
}

impl SlotPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn chosen(&self) -> Option<&TimeSlot> {
        self.chosen.as_ref()
    }

    pub fn step(&self) -> SlotPickerStep {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// The last booking the service accepted.
    pub fn booked(&self) -> Option<&BookingRequest> {
        self.booked.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Starts over on `date`: slots, chosen time, form and notices are
    /// discarded before the read for the new date is issued.
    pub fn select_date(&mut self, date: NaiveDate) -> RequestTicket {
        self.selected_date = Some(date);
        self.slots.clear();
        self.chosen = None;
        self.step = SlotPickerStep::Browsing;
        self.pending = None;
        self.booked = None;
        self.notice = None;
        self.loading = true;
        self.tracker.issue(date)
    }

    /// Back to no selected date; outstanding reads and bookings are ignored
    /// when they complete.
    pub fn deselect(&mut self) {
        self.selected_date = None;
        self.slots.clear();
        self.chosen = None;
        self.step = SlotPickerStep::Browsing;
        self.pending = None;
        self.booked = None;
        self.notice = None;
        self.loading = false;
        self.tracker.invalidate();
        self.submissions.invalidate();
    }

    /// Returns `false` when the response belongs to an older selection.
    pub fn apply_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<TimeSlot>, ApiError>,
    ) -> bool {
        if !self.tracker.is_current(&ticket) || self.selected_date != Some(ticket.date()) {
            tracing::debug!(date = %ticket.date(), "Dropping stale time slot response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(slots) => self.slots = slots,
            Err(e) => {
                tracing::warn!(date = %ticket.date(), error = %e, "Failed to fetch available times");
                self.slots.clear();
            }
        }
        true
    }

    pub fn select_time(&mut self, slot: TimeSlot) -> Result<(), SlotPickerError> {
        match self.step {
            SlotPickerStep::Browsing | SlotPickerStep::TimeSelected => {}
            step => return Err(self.invalid("select a time", step)),
        }
        if !self.slots.contains(&slot) {
            return Err(SlotPickerError::UnknownSlot(slot));
        }
        self.chosen = Some(slot);
        self.step = SlotPickerStep::TimeSelected;
        Ok(())
    }

    /// Opens the contact form for the chosen time.
    pub fn confirm(&mut self) -> Result<(), SlotPickerError> {
        match self.step {
            SlotPickerStep::TimeSelected if self.chosen.is_some() => {
                self.step = SlotPickerStep::FormOpen;
                self.notice = None;
                Ok(())
            }
            step => Err(self.invalid("confirm", step)),
        }
    }

    /// Closes the form; the chosen time is kept.
    pub fn back(&mut self) -> Result<(), SlotPickerError> {
        match self.step {
            SlotPickerStep::FormOpen if self.pending.is_none() => {
                self.step = SlotPickerStep::TimeSelected;
                self.notice = None;
                Ok(())
            }
            step => Err(self.invalid("go back", step)),
        }
    }

    /// Validates `contact` and builds the booking request to send. The
    /// outcome must come back with the returned ticket.
    pub fn submit(
        &mut self,
        contact: &ContactDetails,
    ) -> Result<(RequestTicket, BookingRequest), SlotPickerError> {
        if self.step != SlotPickerStep::FormOpen || self.pending.is_some() {
            return Err(self.invalid("submit", self.step));
        }
        let date = self.selected_date.ok_or(SlotPickerError::NoDateSelected)?;
        let time = self
            .chosen
            .clone()
            .ok_or_else(|| self.invalid("submit", SlotPickerStep::Browsing))?;

        let contact = contact.trimmed();
        if let Err(errors) = contact.validate() {
            let err = SlotPickerError::InvalidContact(describe_validation(&errors));
            self.notice = Some(Notice::error(err.to_string()));
            return Err(err);
        }

        let request = BookingRequest {
            name: contact.full_name(),
            email: contact.email,
            date,
            time,
        };
        let ticket = self.submissions.issue(date);
        self.pending = Some(request.clone());
        self.notice = None;
        Ok((ticket, request))
    }

    /// Records the outcome of the booking write issued with `ticket` and
    /// hands it back. Outcomes of abandoned or superseded submissions leave
    /// the picker untouched.
    pub fn finish_submit(
        &mut self,
        ticket: RequestTicket,
        result: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        let pending = match self.pending.take() {
            Some(pending) if self.submissions.is_current(&ticket) && pending.date == ticket.date() => {
                pending
            }
            other => {
                self.pending = other;
                tracing::debug!(date = %ticket.date(), "Ignoring booking outcome for an abandoned submission");
                return result;
            }
        };

        match &result {
            Ok(()) => {
                self.slots.retain(|slot| slot != &pending.time);
                self.chosen = None;
                self.booked = Some(pending);
                self.step = SlotPickerStep::Submitted;
                self.notice = Some(Notice::success("Your appointment is booked."));
            }
            Err(e) => {
                tracing::error!(error = %e, "Booking submission failed");
                self.notice = Some(Notice::error(format!(
                    "Your booking could not be completed: {}",
                    e
                )));
            }
        }
        result
    }

    fn invalid(&self, action: &'static str, step: SlotPickerStep) -> SlotPickerError {
        SlotPickerError::InvalidTransition {
            action,
            step: step.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn slots(times: &[&str]) -> Vec<TimeSlot> {
        times.iter().map(|t| TimeSlot::from(*t)).collect()
    }

    fn anna() -> ContactDetails {
        ContactDetails::new("Anna", "Rossi", "a@x.com")
    }

    fn picker_with_form_open(time: &str) -> SlotPicker {
        let mut picker = SlotPicker::new();
        let ticket = picker.select_date(march(12));
        picker.apply_fetch(ticket, Ok(slots(&["09:00", "10:30", "11:00"])));
        picker.select_time(TimeSlot::from(time)).unwrap();
        picker.confirm().unwrap();
        picker
    }

    #[test]
    fn successful_booking_removes_slot_and_finishes() {
        let mut picker = picker_with_form_open("10:30");

        let (ticket, request) = picker.submit(&anna()).unwrap();
        assert_eq!(request.name, "Anna Rossi");
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.date, march(12));
        assert_eq!(request.time, TimeSlot::from("10:30"));

        assert!(picker.is_submitting());
        assert!(picker.finish_submit(ticket, Ok(())).is_ok());
        assert_eq!(picker.step(), SlotPickerStep::Submitted);
        assert!(!picker.slots().contains(&TimeSlot::from("10:30")));
        assert_eq!(picker.slots().len(), 2);
        assert_eq!(picker.booked(), Some(&request));
        assert!(!picker.is_submitting());
    }

    #[test]
    fn failed_booking_stays_in_form_and_tells_the_user() {
        let mut picker = picker_with_form_open("10:30");
        let (ticket, _) = picker.submit(&anna()).unwrap();

        let outcome = picker.finish_submit(
            ticket,
            Err(ApiError::Rejected {
                status: 409,
                message: "slot taken".into(),
            }),
        );

        assert!(outcome.is_err());
        assert_eq!(picker.step(), SlotPickerStep::FormOpen);
        assert!(picker.notice().unwrap().is_error());
        assert!(picker.slots().contains(&TimeSlot::from("10:30")));
        assert!(!picker.is_submitting());
    }

    #[test]
    fn time_selection_does_not_open_form() {
        let mut picker = SlotPicker::new();
        let ticket = picker.select_date(march(12));
        picker.apply_fetch(ticket, Ok(slots(&["09:00"])));

        picker.select_time(TimeSlot::from("09:00")).unwrap();
        assert_eq!(picker.step(), SlotPickerStep::TimeSelected);
        assert_eq!(picker.chosen(), Some(&TimeSlot::from("09:00")));
    }

    #[test]
    fn confirm_requires_a_chosen_time() {
        let mut picker = SlotPicker::new();
        picker.select_date(march(12));
        assert!(matches!(
            picker.confirm(),
            Err(SlotPickerError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let mut picker = SlotPicker::new();
        let ticket = picker.select_date(march(12));
        picker.apply_fetch(ticket, Ok(slots(&["09:00"])));

        assert_eq!(
            picker.select_time(TimeSlot::from("18:00")),
            Err(SlotPickerError::UnknownSlot(TimeSlot::from("18:00")))
        );
        assert_eq!(picker.step(), SlotPickerStep::Browsing);
    }

    #[test]
    fn back_closes_form_but_keeps_chosen_time() {
        let mut picker = picker_with_form_open("11:00");

        picker.back().unwrap();
        assert_eq!(picker.step(), SlotPickerStep::TimeSelected);
        assert_eq!(picker.chosen(), Some(&TimeSlot::from("11:00")));

        picker.confirm().unwrap();
        assert_eq!(picker.step(), SlotPickerStep::FormOpen);
    }

    #[test]
    fn submit_only_from_open_form() {
        let mut picker = SlotPicker::new();
        let ticket = picker.select_date(march(12));
        picker.apply_fetch(ticket, Ok(slots(&["09:00"])));
        picker.select_time(TimeSlot::from("09:00")).unwrap();

        assert!(matches!(
            picker.submit(&anna()),
            Err(SlotPickerError::InvalidTransition { .. })
        ));
        assert!(!picker.is_submitting());
    }

    #[test]
    fn invalid_contact_is_refused_before_sending() {
        let mut picker = picker_with_form_open("09:00");

        let err = picker
            .submit(&ContactDetails::new("Anna", "  ", "not-an-email"))
            .unwrap_err();

        assert!(matches!(err, SlotPickerError::InvalidContact(_)));
        assert!(err.to_string().contains("last name is required"));
        assert!(err.to_string().contains("email address is not valid"));
        assert!(!picker.is_submitting());
        assert_eq!(picker.step(), SlotPickerStep::FormOpen);
    }

    #[test]
    fn new_date_resets_everything() {
        let mut picker = picker_with_form_open("09:00");

        let ticket = picker.select_date(march(13));
        assert_eq!(picker.step(), SlotPickerStep::Browsing);
        assert!(picker.slots().is_empty());
        assert_eq!(picker.chosen(), None);
        assert_eq!(ticket.date(), march(13));
    }

    #[test]
    fn stale_slots_are_dropped() {
        let mut picker = SlotPicker::new();
        let first = picker.select_date(march(12));
        let second = picker.select_date(march(13));

        assert!(!picker.apply_fetch(first, Ok(slots(&["09:00"]))));
        assert!(picker.slots().is_empty());
        assert!(picker.is_loading());

        assert!(picker.apply_fetch(second, Ok(slots(&["15:00"]))));
        assert_eq!(picker.slots(), slots(&["15:00"]).as_slice());
    }

    #[test]
    fn outcome_of_abandoned_submission_is_ignored() {
        let mut picker = picker_with_form_open("10:30");
        let (submission, _) = picker.submit(&anna()).unwrap();

        let ticket = picker.select_date(march(13));
        picker.apply_fetch(ticket, Ok(slots(&["10:30"])));

        assert!(picker.finish_submit(submission, Ok(())).is_ok());
        assert_eq!(picker.step(), SlotPickerStep::Browsing);
        assert_eq!(picker.slots(), slots(&["10:30"]).as_slice());
    }

    #[test]
    fn deselect_returns_to_an_empty_picker() {
        let mut picker = picker_with_form_open("10:30");
        let (submission, _) = picker.submit(&anna()).unwrap();

        picker.deselect();
        assert_eq!(picker.selected_date(), None);
        assert_eq!(picker.step(), SlotPickerStep::Browsing);
        assert!(picker.slots().is_empty());
        assert!(!picker.is_submitting());

        assert!(picker.finish_submit(submission, Ok(())).is_ok());
        assert_eq!(picker.step(), SlotPickerStep::Browsing);
        assert_eq!(picker.booked(), None);
    }

    #[test]
    fn earlier_booking_outcome_does_not_complete_a_later_one() {
        let mut picker = picker_with_form_open("10:30");
        let (first, _) = picker.submit(&anna()).unwrap();

        let ticket = picker.select_date(march(13));
        picker.apply_fetch(ticket, Ok(slots(&["11:00", "12:00"])));
        picker.select_time(TimeSlot::from("11:00")).unwrap();
        picker.confirm().unwrap();
        let (second, request) = picker
            .submit(&ContactDetails::new("Bob", "Bianchi", "bob@example.com"))
            .unwrap();

        assert!(picker.finish_submit(first, Ok(())).is_ok());
        assert_eq!(picker.step(), SlotPickerStep::FormOpen);
        assert!(picker.is_submitting());
        assert_eq!(picker.slots(), slots(&["11:00", "12:00"]).as_slice());
        assert_eq!(picker.booked(), None);

        assert!(picker.finish_submit(second, Ok(())).is_ok());
        assert_eq!(picker.step(), SlotPickerStep::Submitted);
        assert_eq!(picker.slots(), slots(&["12:00"]).as_slice());
        assert_eq!(picker.booked(), Some(&request));
    }
}
