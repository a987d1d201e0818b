//! Input monitor - the single control object.
//!
//! Owns the digit multiplexer and the tracked state. Edges arrive as
//! labels on an [`EdgeChannel`](crate::input::EdgeChannel) filled by one
//! [`EdgeWatch`] per monitored line. Events are handled one at a time
//! through `&mut self`; a segment event runs both multiplexed sub-reads to
//! completion before the next label is taken off the queue.
//!
//! Every rising and falling edge is one event. There is no debouncing.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

use crate::config::MAX_INPUTS;
use crate::error::Error;
use crate::input::{EdgeWatch, InputLabel, PinBinder, PinClaims};
use crate::seg7::DigitMux;
use crate::status::StatusLine;
use crate::tracker::{ProximityTracker, TrackedState};

/// Edge watchers produced by [`Monitor::bind`], one per monitored line.
pub type Watchers<W> = Vec<EdgeWatch<W>, MAX_INPUTS>;

/// A table entry that could not be bound. The label is left out of
/// further processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindFailure<'a> {
    pub label: &'a str,
    pub pin: u8,
    pub error: Error,
}

/// Outcome of [`Monitor::bind`].
#[derive(Debug, Default)]
pub struct BindReport<'a> {
    /// Entries bound successfully.
    pub bound: usize,
    pub failures: Vec<BindFailure<'a>, MAX_INPUTS>,
    /// Failures beyond the capacity of `failures`. Logged, not recorded.
    pub unrecorded: usize,
}

impl<'a> BindReport<'a> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.unrecorded == 0
    }

    /// Total number of failed entries.
    pub fn failed(&self) -> usize {
        self.failures.len() + self.unrecorded
    }

    fn record(&mut self, failure: BindFailure<'a>) {
        if self.failures.push(failure).is_err() {
            self.unrecorded += 1;
        }
    }
}

pub struct Monitor<I, O> {
    tracker: ProximityTracker,
    mux: DigitMux<I, O>,
    /// Monitored labels in table order.
    labels: Vec<InputLabel, MAX_INPUTS>,
}

impl<I, O> Default for Monitor<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> Monitor<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    /// Monitor with no lines bound.
    pub fn new() -> Self {
        Self {
            tracker: ProximityTracker::new(),
            mux: DigitMux::new(),
            labels: Vec::new(),
        }
    }

    /// Bind every `(label, pin)` entry of `table`.
    ///
    /// Each entry is handled on its own: a failure is logged, recorded in
    /// the report and skipped, and binding carries on with the next entry.
    /// Bearing and segment lines come back as watchers, in table order.
    pub fn bind<'a, B>(
        table: &'a [(&'a str, u8)],
        mut claims: PinClaims,
        binder: &mut B,
    ) -> (Self, Watchers<B::Watch>, BindReport<'a>)
    where
        B: PinBinder<Input = I, Output = O>,
    {
        let mut monitor = Self::new();
        let mut watchers = Vec::new();
        let mut report = BindReport::default();

        for &(label, pin) in table {
            match monitor.bind_one(label, pin, &mut claims, binder, &mut watchers) {
                Ok(parsed) => {
                    log_debug!("Bound {} to pin {}", parsed, pin);
                    report.bound += 1;
                }
                Err(error) => {
                    log_warn!("Error initializing {}: {}", label, error);
                    report.record(BindFailure { label, pin, error });
                }
            }
        }

        (monitor, watchers, report)
    }

    fn bind_one<B>(
        &mut self,
        label: &str,
        pin: u8,
        claims: &mut PinClaims,
        binder: &mut B,
        watchers: &mut Watchers<B::Watch>,
    ) -> Result<InputLabel, Error>
    where
        B: PinBinder<Input = I, Output = O>,
    {
        let parsed = InputLabel::parse(label)?;

        match parsed {
            InputLabel::Segment(segment) if self.mux.has_segment(segment) => {
                return Err(Error::DuplicateLabel)
            }
            InputLabel::DigitEnable(select) if self.mux.has_enable(select) => {
                return Err(Error::DuplicateLabel)
            }
            other if other.is_monitored() && self.labels.is_full() => {
                return Err(Error::TooManyInputs)
            }
            _ => {}
        }

        claims.claim(pin)?;
        let attached = self.attach(parsed, pin, binder, watchers);
        if attached.is_err() {
            claims.release(pin);
        }
        attached.map(|()| parsed)
    }

    fn attach<B>(
        &mut self,
        label: InputLabel,
        pin: u8,
        binder: &mut B,
        watchers: &mut Watchers<B::Watch>,
    ) -> Result<(), Error>
    where
        B: PinBinder<Input = I, Output = O>,
    {
        let watch = match label {
            InputLabel::Bearing(_) => binder.bind_watch(pin)?,
            InputLabel::Segment(segment) => {
                let watch = binder.bind_watch(pin)?;
                self.mux.attach_segment(segment, binder.bind_input(pin)?)?;
                watch
            }
            InputLabel::DigitEnable(select) => {
                return self.mux.attach_enable(select, binder.bind_output(pin)?);
            }
        };
        watchers
            .push(EdgeWatch::new(label, watch))
            .map_err(|_| Error::TooManyInputs)?;
        self.labels.push(label).map_err(|_| Error::TooManyInputs)
    }

    pub fn state(&self) -> &TrackedState {
        self.tracker.state()
    }

    /// Number of monitored (bearing + segment) lines.
    pub fn line_count(&self) -> usize {
        self.labels.len()
    }

    /// Labels of the monitored lines, in table order.
    pub fn labels(&self) -> impl Iterator<Item = InputLabel> + '_ {
        self.labels.iter().copied()
    }

    /// Handle one edge on the line labelled `label`.
    ///
    /// Bearing labels set the bearing; segment labels run a full
    /// multiplexed read and feed it to the tracker. The status line is
    /// logged after every event, whatever its class.
    pub fn on_input_change(&mut self, label: InputLabel) -> &TrackedState {
        match label {
            InputLabel::Bearing(degrees) => self.tracker.set_bearing(degrees),
            InputLabel::Segment(_) => {
                let reading = self.mux.decode_distance();
                if reading.is_degraded() {
                    log_debug!("Undecodable digit on {}", label);
                }
                self.tracker.apply_reading(&reading);
            }
            InputLabel::DigitEnable(_) => {}
        }

        log_info!("{}", StatusLine(self.tracker.state()));
        self.tracker.state()
    }

    /// Handle every queued edge, oldest first, without waiting.
    /// `on_event` sees the state after each event. Returns the number of
    /// events handled.
    pub fn drain<M, const N: usize, F>(
        &mut self,
        edges: &Receiver<'_, M, InputLabel, N>,
        mut on_event: F,
    ) -> usize
    where
        M: RawMutex,
        F: FnMut(InputLabel, &TrackedState),
    {
        let mut handled = 0;
        while let Ok(label) = edges.try_receive() {
            let state = self.on_input_change(label);
            on_event(label, state);
            handled += 1;
        }
        handled
    }

    /// Sleep until an edge is queued, handle it, repeat.
    pub async fn run<M, const N: usize, F>(
        &mut self,
        edges: Receiver<'_, M, InputLabel, N>,
        mut on_event: F,
    ) -> !
    where
        M: RawMutex,
        F: FnMut(InputLabel, &TrackedState),
    {
        loop {
            let label = edges.receive().await;
            let state = self.on_input_change(label);
            on_event(label, state);
        }
    }
}
