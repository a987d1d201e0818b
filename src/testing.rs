//! Simulated board for host tests.
//!
//! Pins are plain numbers. A pin wired to a segment reads the bus as
//! currently driven by the display: the pattern of whichever digit
//! position is enabled, or `idle` when neither is. Other input pins read
//! a settable level. Enable outputs record every transition in `trace`.
//!
//! Level changes made through [`SimBoard::set_level`], [`SimBoard::pulse`]
//! and [`SimBoard::set_idle`] are counted per pin and handed out by
//! [`SimWatch`] one edge at a time. A watch with no edges left reports an
//! error instead of blocking, so async tests run to completion.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::digital::Wait;

use crate::config::INPUT_PINS;
use crate::error::Error;
use crate::input::{InputLabel, PinBinder};
use crate::seg7::{BusSample, DigitSelect, Segment, SegmentPattern};

const PIN_COUNT: usize = 64;

pub type Board = Rc<RefCell<SimBoard>>;

pub struct SimBoard {
    pub digits: [BusSample; 2],
    pub idle: BusSample,
    pub enabled: [bool; 2],
    pub trace: Vec<(DigitSelect, bool)>,
    levels: [bool; PIN_COUNT],
    segment_pins: [Option<Segment>; PIN_COUNT],
    enable_pins: [Option<DigitSelect>; PIN_COUNT],
    /// Edges not yet picked up by a watch, per pin.
    edges: [usize; PIN_COUNT],
    /// Pins whose next bind attempt fails.
    pub faulty: Vec<u8>,
}

impl SimBoard {
    /// Board wired per `INPUT_PINS`, showing `first` and `second`.
    pub fn shared(first: SegmentPattern, second: SegmentPattern) -> Board {
        let mut board = SimBoard {
            digits: [
                BusSample::from_pattern(first, false),
                BusSample::from_pattern(second, false),
            ],
            idle: BusSample::default(),
            enabled: [false; 2],
            trace: Vec::new(),
            levels: [false; PIN_COUNT],
            segment_pins: [None; PIN_COUNT],
            enable_pins: [None; PIN_COUNT],
            edges: [0; PIN_COUNT],
            faulty: Vec::new(),
        };
        board.wire(INPUT_PINS);
        Rc::new(RefCell::new(board))
    }

    /// Route every segment and digit label in `table` to its pin.
    pub fn wire(&mut self, table: &[(&str, u8)]) {
        for &(label, pin) in table {
            match InputLabel::parse(label) {
                Ok(InputLabel::Segment(segment)) => self.segment_pins[pin as usize] = Some(segment),
                Ok(InputLabel::DigitEnable(select)) => self.enable_pins[pin as usize] = Some(select),
                _ => {}
            }
        }
    }

    pub fn show(&mut self, first: SegmentPattern, second: SegmentPattern) {
        self.digits = [
            BusSample::from_pattern(first, false),
            BusSample::from_pattern(second, false),
        ];
    }

    pub fn set_level(&mut self, pin: u8, high: bool) {
        let level = &mut self.levels[pin as usize];
        if *level != high {
            *level = high;
            self.edges[pin as usize] += 1;
        }
    }

    /// High then low again: two edges.
    pub fn pulse(&mut self, pin: u8) {
        let high = self.levels[pin as usize];
        self.set_level(pin, !high);
        self.set_level(pin, high);
    }

    /// Change what the display drives while no position is enabled. Every
    /// segment line whose level changes sees an edge.
    pub fn set_idle(&mut self, idle: BusSample) {
        for pin in 0..PIN_COUNT {
            if let Some(segment) = self.segment_pins[pin] {
                if self.idle.is_lit(segment) != idle.is_lit(segment) {
                    self.edges[pin] += 1;
                }
            }
        }
        self.idle = idle;
    }

    /// Edges on `pin` not yet consumed by a watch.
    pub fn pending_edges(&self, pin: u8) -> usize {
        self.edges[pin as usize]
    }

    /// Bus as seen by the segment inputs right now.
    pub fn bus(&self) -> BusSample {
        match self.enabled {
            [true, _] => self.digits[0],
            [false, true] => self.digits[1],
            [false, false] => self.idle,
        }
    }

    pub fn segment_pin(&self, segment: Segment) -> u8 {
        self.pin_of(|p| self.segment_pins[p] == Some(segment))
    }

    pub fn enable_pin(&self, select: DigitSelect) -> u8 {
        self.pin_of(|p| self.enable_pins[p] == Some(select))
    }

    fn pin_of(&self, pred: impl Fn(usize) -> bool) -> u8 {
        (0..PIN_COUNT).find(|&p| pred(p)).expect("line not wired") as u8
    }
}

pub struct SimInput {
    board: Board,
    pin: u8,
}

impl SimInput {
    pub fn new(board: &Board, pin: u8) -> Self {
        Self {
            board: Rc::clone(board),
            pin,
        }
    }

    pub fn segment(board: &Board, segment: Segment) -> Self {
        let pin = board.borrow().segment_pin(segment);
        Self::new(board, pin)
    }
}

impl ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let board = self.board.borrow();
        Ok(match board.segment_pins[self.pin as usize] {
            Some(segment) => board.bus().is_lit(segment),
            None => board.levels[self.pin as usize],
        })
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

/// Edge source for one simulated pin.
pub struct SimWatch {
    board: Board,
    pin: u8,
}

impl SimWatch {
    pub fn new(board: &Board, pin: u8) -> Self {
        Self {
            board: Rc::clone(board),
            pin,
        }
    }

    fn take_edge(&mut self) -> Result<(), ErrorKind> {
        let mut board = self.board.borrow_mut();
        let pending = &mut board.edges[self.pin as usize];
        if *pending == 0 {
            return Err(ErrorKind::Other);
        }
        *pending -= 1;
        Ok(())
    }
}

impl ErrorType for SimWatch {
    type Error = ErrorKind;
}

impl Wait for SimWatch {
    async fn wait_for_high(&mut self) -> Result<(), ErrorKind> {
        self.take_edge()
    }

    async fn wait_for_low(&mut self) -> Result<(), ErrorKind> {
        self.take_edge()
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), ErrorKind> {
        self.take_edge()
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), ErrorKind> {
        self.take_edge()
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), ErrorKind> {
        self.take_edge()
    }
}

pub struct SimOutput {
    board: Board,
    pin: u8,
}

impl SimOutput {
    pub fn new(board: &Board, pin: u8) -> Self {
        Self {
            board: Rc::clone(board),
            pin,
        }
    }

    pub fn enable(board: &Board, select: DigitSelect) -> Self {
        let pin = board.borrow().enable_pin(select);
        Self::new(board, pin)
    }

    fn drive(&mut self, high: bool) {
        let mut board = self.board.borrow_mut();
        if let Some(select) = board.enable_pins[self.pin as usize] {
            board.enabled[select.index()] = high;
            board.trace.push((select, high));
        } else {
            board.levels[self.pin as usize] = high;
        }
    }
}

impl ErrorType for SimOutput {
    type Error = Infallible;
}

impl OutputPin for SimOutput {
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }
}

/// Binder handing out simulated pins; fails once for each pin in `faulty`.
pub struct SimBinder {
    pub board: Board,
}

impl SimBinder {
    fn take_fault(&self, pin: u8) -> bool {
        let mut board = self.board.borrow_mut();
        match board.faulty.iter().position(|&p| p == pin) {
            Some(i) => {
                board.faulty.remove(i);
                true
            }
            None => false,
        }
    }
}

impl PinBinder for SimBinder {
    type Input = SimInput;
    type Output = SimOutput;
    type Watch = SimWatch;

    fn bind_input(&mut self, pin: u8) -> Result<SimInput, Error> {
        if self.take_fault(pin) {
            return Err(Error::Gpio);
        }
        Ok(SimInput::new(&self.board, pin))
    }

    fn bind_watch(&mut self, pin: u8) -> Result<SimWatch, Error> {
        if self.take_fault(pin) {
            return Err(Error::Gpio);
        }
        Ok(SimWatch::new(&self.board, pin))
    }

    fn bind_output(&mut self, pin: u8) -> Result<SimOutput, Error> {
        if self.take_fault(pin) {
            return Err(Error::Gpio);
        }
        Ok(SimOutput::new(&self.board, pin))
    }
}
