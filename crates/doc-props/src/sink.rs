//! Outbound mutation sinks.
//!
//! A sink is the external collaborator that persists and broadcasts a
//! committed value (the realtime document's actions layer). Sinks are
//! called synchronously; whatever they do afterwards is not awaited.

use chrono::{DateTime, Utc};

use crate::codec::format_date;
use crate::error::SinkError;
use crate::model::PropKey;

/// Receives property writes for one block.
pub trait PropertySink {
    fn set_prop(&mut self, key: &PropKey, value: &str) -> Result<(), SinkError>;
}

impl<F> PropertySink for F
where
    F: FnMut(&PropKey, &str) -> Result<(), SinkError>,
{
    fn set_prop(&mut self, key: &PropKey, value: &str) -> Result<(), SinkError> {
        self(key, value)
    }
}

/// Receives the committed value of a single field.
pub trait ValueSink<V> {
    fn submit(&mut self, value: V) -> Result<(), SinkError>;
}

impl<V, F> ValueSink<V> for F
where
    F: FnMut(V) -> Result<(), SinkError>,
{
    fn submit(&mut self, value: V) -> Result<(), SinkError> {
        self(value)
    }
}

/// Routes a field's committed value to one property of a block.
#[derive(Debug)]
pub struct KeyedSink<'a, S: ?Sized> {
    key: PropKey,
    sink: &'a mut S,
}

impl<'a, S: PropertySink + ?Sized> KeyedSink<'a, S> {
    pub fn new(key: PropKey, sink: &'a mut S) -> Self {
        Self { key, sink }
    }

    pub fn key(&self) -> &PropKey {
        &self.key
    }
}

impl<S: PropertySink + ?Sized> ValueSink<String> for KeyedSink<'_, S> {
    fn submit(&mut self, value: String) -> Result<(), SinkError> {
        self.sink.set_prop(&self.key, &value)
    }
}

impl<S: PropertySink + ?Sized> ValueSink<Option<DateTime<Utc>>> for KeyedSink<'_, S> {
    fn submit(&mut self, value: Option<DateTime<Utc>>) -> Result<(), SinkError> {
        let encoded = value.as_ref().map(format_date).unwrap_or_default();
        self.sink.set_prop(&self.key, &encoded)
    }
}
