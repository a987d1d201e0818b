//! Per-line edge watchers.
//!
//! Every monitored line gets its own watcher, which sleeps until the pin
//! sees a rising or falling edge and then queues the line's label:
//!
//! ```text
//!   B90 ──wait_for_any_edge──┐
//!   SEG_A ─wait_for_any_edge─┼──> EdgeChannel ──> Monitor::run
//!   ...                      ┘    (FIFO, one event at a time)
//! ```
//!
//! The watcher never touches the tracked state, so state stays owned by
//! the monitor alone.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender};
use embedded_hal_async::digital::Wait;

use super::InputLabel;
use crate::config::EDGE_QUEUE_DEPTH;
use crate::error::Error;

/// Queue of labels whose line saw an edge, in arrival order.
pub type EdgeChannel<M> = Channel<M, InputLabel, EDGE_QUEUE_DEPTH>;

/// Edge source for one monitored line, carrying its label by value.
pub struct EdgeWatch<W> {
    label: InputLabel,
    pin: W,
}

impl<W: Wait> EdgeWatch<W> {
    pub fn new(label: InputLabel, pin: W) -> Self {
        Self { label, pin }
    }

    pub fn label(&self) -> InputLabel {
        self.label
    }

    /// Wait for the next rising or falling edge on this line.
    pub async fn next_edge(&mut self) -> Result<InputLabel, Error> {
        self.pin.wait_for_any_edge().await.map_err(|_| Error::Gpio)?;
        Ok(self.label)
    }

    /// Queue one label per edge, forever. When the queue is full the
    /// watcher waits for room instead of dropping the edge.
    ///
    /// Only returns if the pin stops delivering edges.
    pub async fn run<M: RawMutex, const N: usize>(
        mut self,
        edges: Sender<'_, M, InputLabel, N>,
    ) -> Error {
        loop {
            match self.next_edge().await {
                Ok(label) => edges.send(label).await,
                Err(error) => {
                    log_warn!("Edge watch on {} stopped: {}", self.label, error);
                    return error;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seg7::{Segment, DIGIT_MAP};
    use crate::testing::{SimBoard, SimWatch};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn queued(edges: &EdgeChannel<NoopRawMutex>) -> std::vec::Vec<InputLabel> {
        core::iter::from_fn(|| edges.try_receive().ok()).collect()
    }

    #[test]
    fn next_edge_yields_the_line_label() {
        let board = SimBoard::shared(DIGIT_MAP[0], DIGIT_MAP[0]);
        let mut watch = EdgeWatch::new(InputLabel::Bearing(90), SimWatch::new(&board, 29));

        board.borrow_mut().set_level(29, true);
        assert_eq!(block_on(watch.next_edge()), Ok(InputLabel::Bearing(90)));
        assert_eq!(watch.label(), InputLabel::Bearing(90));
    }

    #[test]
    fn press_and_release_queue_two_events() {
        let board = SimBoard::shared(DIGIT_MAP[0], DIGIT_MAP[0]);
        let watch = EdgeWatch::new(InputLabel::Bearing(90), SimWatch::new(&board, 29));
        let edges: EdgeChannel<NoopRawMutex> = Channel::new();

        // Both transitions land before the watcher gets to run.
        board.borrow_mut().set_level(29, true);
        board.borrow_mut().set_level(29, false);

        // The simulated pin fails once its edges are used up, ending `run`.
        assert_eq!(block_on(watch.run(edges.sender())), Error::Gpio);
        assert_eq!(
            queued(&edges),
            vec![InputLabel::Bearing(90), InputLabel::Bearing(90)]
        );
    }

    #[test]
    fn rapid_toggles_are_not_collapsed() {
        let board = SimBoard::shared(DIGIT_MAP[0], DIGIT_MAP[0]);
        let watch = EdgeWatch::new(InputLabel::Segment(Segment::A), SimWatch::new(&board, 33));
        let edges: EdgeChannel<NoopRawMutex> = Channel::new();

        for _ in 0..3 {
            board.borrow_mut().pulse(33);
        }
        block_on(watch.run(edges.sender()));
        assert_eq!(queued(&edges).len(), 6);
    }

    #[test]
    fn unchanged_level_is_not_an_edge() {
        let board = SimBoard::shared(DIGIT_MAP[0], DIGIT_MAP[0]);
        let mut watch = EdgeWatch::new(InputLabel::Bearing(0), SimWatch::new(&board, 4));

        board.borrow_mut().set_level(4, false);
        assert_eq!(block_on(watch.next_edge()), Err(Error::Gpio));
    }
}
