//! Date fields (due dates and date properties).
//!
//! A date field's committed value is `None` when the date was never set or
//! has been cleared. Clearing a set date commits `None` explicitly to the
//! sink, which the document stores as an empty string.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, warn};

use crate::codec::{format_date, parse_date};
use crate::config::DisplayConfig;
use crate::error::CommitError;
use crate::session::{EditSession, FieldKind, SyncOutcome};
use crate::sink::ValueSink;
use crate::store::PropertyStore;

/// A calendar date picked by the user. Absent dates start editing unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateField;

impl FieldKind for DateField {
    type Value = Option<DateTime<Utc>>;
    type Draft = Option<DateTime<Utc>>;

    fn initial_draft(committed: &Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        *committed
    }
}

pub type DateSession = EditSession<DateField>;

/// Returns true if `due` is strictly earlier than the start of `now`'s day,
/// in `now`'s timezone. An unset date is never overdue.
pub fn is_overdue_at<Tz: TimeZone>(due: Option<&DateTime<Utc>>, now: &DateTime<Tz>) -> bool {
    match due {
        Some(due) => due.with_timezone(&now.timezone()).date_naive() < now.date_naive(),
        None => false,
    }
}

impl EditSession<DateField> {
    /// Creates a session for the date stored under `key`.
    ///
    /// A stored string that is not a date is treated as unset.
    pub fn for_prop(store: &PropertyStore, key: &str) -> Self {
        Self::new(stored_date(store, key))
    }

    /// Pushes the date currently stored under `key`.
    pub fn sync_prop(&mut self, store: &PropertyStore, key: &str) -> SyncOutcome {
        self.sync_committed(stored_date(store, key))
    }

    /// Overdue state of the committed date against the local clock.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(&Local::now())
    }

    /// Overdue state of the committed date at `now`.
    pub fn is_overdue_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        is_overdue_at(self.committed().as_ref(), now)
    }

    /// Picks a date and commits it in one step, as a date picker does.
    pub fn select<S>(&mut self, date: DateTime<Utc>, sink: &mut S) -> Result<(), CommitError>
    where
        S: ValueSink<Option<DateTime<Utc>>> + ?Sized,
    {
        self.start_editing()?;
        self.set_draft(Some(date))?;
        self.confirm(sink)
    }

    /// Commits an explicit `None`, from either state.
    ///
    /// Clearing a date that is not set only drops the draft; the sink is
    /// not called.
    pub fn clear<S>(&mut self, sink: &mut S) -> Result<(), CommitError>
    where
        S: ValueSink<Option<DateTime<Utc>>> + ?Sized,
    {
        self.ensure_writable()?;
        self.cancel();
        if self.committed().is_none() {
            return Ok(());
        }
        debug!("date cleared");
        sink.submit(None).map_err(|err| {
            warn!(error = %err, "clearing date was rejected");
            CommitError::Rejected(err)
        })
    }

    /// Label of the field in the local timezone.
    pub fn label(&self, config: &DisplayConfig, shortened: bool) -> String {
        self.label_in(&Local, config, shortened)
    }

    /// Label of the field, formatting the committed date in `tz`.
    ///
    /// A `date_format` chrono cannot render falls back to the ISO form.
    pub fn label_in<Tz>(&self, tz: &Tz, config: &DisplayConfig, shortened: bool) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self.committed() {
            Some(date) => {
                let mut label = String::new();
                match write!(label, "{}", date.with_timezone(tz).format(&config.date_format)) {
                    Ok(()) => label,
                    Err(_) => {
                        warn!(format = %config.date_format, "unusable date format");
                        format_date(date)
                    }
                }
            }
            None if shortened => config.due_date_label.clone(),
            None => config.add_due_date_label.clone(),
        }
    }
}

fn stored_date(store: &PropertyStore, key: &str) -> Option<DateTime<Utc>> {
    let raw = store.get(key)?;
    match parse_date(raw) {
        Ok(date) => date,
        Err(err) => {
            warn!(key, error = %err, "ignoring unparsable date property");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;
    use crate::error::{SessionError, SinkError};
    use crate::model::{PropKey, PropType};
    use crate::session::EditState;
    use crate::sink::KeyedSink;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_overdue_yesterday_tomorrow_none() {
        let now = utc(2024, 6, 15, 12);
        assert!(is_overdue_at(Some(&(now - Duration::days(1))), &now));
        assert!(!is_overdue_at(Some(&(now + Duration::days(1))), &now));
        assert!(!is_overdue_at(None, &now));
    }

    #[test]
    fn test_overdue_boundary_is_midnight() {
        let now = utc(2024, 6, 15, 12);
        assert!(!is_overdue_at(Some(&utc(2024, 6, 15, 0)), &now));
        let last_second = Utc.with_ymd_and_hms(2024, 6, 14, 23, 59, 59).unwrap();
        assert!(is_overdue_at(Some(&last_second), &now));
    }

    #[test]
    fn test_overdue_uses_now_timezone() {
        // 2024-06-15 01:00 in UTC+9 is still 2024-06-14 in UTC.
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tokyo.with_ymd_and_hms(2024, 6, 15, 1, 0, 0).unwrap();
        let due = utc(2024, 6, 14, 14); // 23:00 on the 14th in UTC+9
        assert!(is_overdue_at(Some(&due), &now));
        assert!(!is_overdue_at(Some(&due), &now.with_timezone(&Utc)));
    }

    #[test]
    fn test_null_date_session() {
        let mut session = DateSession::new(None);
        assert_eq!(session.start_editing().unwrap(), &None);

        let picked = utc(2024, 7, 1, 0);
        session.set_draft(Some(picked)).unwrap();
        let mut sent = Vec::new();
        let mut sink = |v: Option<DateTime<Utc>>| -> Result<(), SinkError> {
            sent.push(v);
            Ok(())
        };
        session.confirm(&mut sink).unwrap();
        assert_eq!(session.state(), EditState::Viewing);
        assert_eq!(sent, vec![Some(picked)]);
    }

    #[test]
    fn test_clear_commits_explicit_none() {
        let mut session = DateSession::editing(Some(utc(2024, 1, 1, 0)));
        let mut sent = Vec::new();
        let mut sink = |v: Option<DateTime<Utc>>| -> Result<(), SinkError> {
            sent.push(v);
            Ok(())
        };
        session.clear(&mut sink).unwrap();
        assert!(!session.is_editing());
        assert_eq!(sent, vec![None]);
    }

    #[test]
    fn test_clear_unset_date_skips_sink() {
        let mut session = DateSession::editing(None);
        session.set_draft(Some(utc(2024, 1, 1, 0))).unwrap();
        let mut sent = Vec::new();
        let mut sink = |v: Option<DateTime<Utc>>| -> Result<(), SinkError> {
            sent.push(v);
            Ok(())
        };
        session.clear(&mut sink).unwrap();
        assert!(!session.is_editing());
        assert!(sent.is_empty());
    }

    #[test]
    fn test_clear_while_sending() {
        let mut session = DateSession::new(Some(utc(2024, 1, 1, 0))).with_sending(true);
        let mut sink = |_: Option<DateTime<Utc>>| -> Result<(), SinkError> { Ok(()) };
        assert_eq!(
            session.clear(&mut sink),
            Err(CommitError::Session(SessionError::Sending))
        );
    }

    #[test]
    fn test_clear_read_only() {
        let mut session = DateSession::new(Some(utc(2024, 1, 1, 0))).with_read_only(true);
        let mut sink = |_: Option<DateTime<Utc>>| -> Result<(), SinkError> { Ok(()) };
        assert_eq!(
            session.clear(&mut sink),
            Err(CommitError::Session(SessionError::ReadOnly))
        );
    }

    #[test]
    fn test_select_writes_iso_string_to_prop() {
        let key = PropKey::new("Due", PropType::Date);
        let store = PropertyStore::from_snapshot([(key.clone(), "")]);
        let mut session = DateSession::for_prop(&store, key.as_str());
        assert_eq!(session.committed(), &None);

        let mut remote = Vec::new();
        let mut doc = |_: &PropKey, v: &str| -> Result<(), SinkError> {
            remote.push(v.to_string());
            Ok(())
        };
        session
            .select(utc(2024, 2, 29, 0), &mut KeyedSink::new(key, &mut doc))
            .unwrap();
        assert_eq!(remote, vec!["2024-02-29T00:00:00.000Z".to_string()]);
    }

    #[test]
    fn test_unparsable_stored_date_is_unset() {
        let store = PropertyStore::from_snapshot([("Due:date", "someday")]);
        let session = DateSession::for_prop(&store, "Due:date");
        assert_eq!(session.committed(), &None);
    }

    #[test]
    fn test_labels() {
        let config = DisplayConfig::default();
        let unset = DateSession::new(None);
        assert_eq!(unset.label_in(&Utc, &config, false), "Add due date");
        assert_eq!(unset.label_in(&Utc, &config, true), "Due date");
        let set = DateSession::new(Some(utc(2024, 3, 5, 10)));
        assert_eq!(set.label_in(&Utc, &config, false), "Mar 05, 2024");
    }

    #[test]
    fn test_label_with_unknown_specifier_falls_back() {
        let config = DisplayConfig {
            date_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };
        let set = DateSession::new(Some(utc(2024, 3, 5, 10)));
        assert_eq!(set.label_in(&Utc, &config, false), "2024-03-05T10:00:00.000Z");
    }
}
