#![allow(dead_code)]

use bmx055::{BusError, RegisterBus};
use embedded_hal::delay::DelayNs;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One transaction seen by the mock bus or its delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { addr: u8, reg: u8, value: u8 },
    Read { addr: u8, reg: u8, len: u8 },
    Delay { ms: u32 },
}

type Log = Rc<RefCell<Vec<Transaction>>>;

/// In-memory register bus.
///
/// Records every transaction, answers reads from programmed responses and
/// can be told to fail a given write or read.
#[derive(Debug, Default)]
pub struct MockBus {
    log: Log,
    responses: HashMap<(u8, u8), Vec<u8>>,
    fail_write: Option<(u8, usize, BusError)>,
    fail_read: Option<(u8, BusError)>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delay that records into the same log as this bus
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: Rc::clone(&self.log),
        }
    }

    /// Program the bytes returned for reads at `addr`/`reg`.
    /// A response shorter than the request simulates a short read.
    pub fn respond(&mut self, addr: u8, reg: u8, data: &[u8]) {
        self.responses.insert((addr, reg), data.to_vec());
    }

    /// Fail the `nth` (1-based) write to `addr`
    pub fn fail_nth_write(&mut self, addr: u8, nth: usize, error: BusError) {
        self.fail_write = Some((addr, nth, error));
    }

    /// Fail every read from `addr`
    pub fn fail_reads(&mut self, addr: u8, error: BusError) {
        self.fail_read = Some((addr, error));
    }

    pub fn log(&self) -> Vec<Transaction> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    /// Writes and delays belonging to `addr`'s startup, in order
    pub fn sequence_for(&self, addr: u8) -> Vec<Transaction> {
        let log = self.log.borrow();
        let mut out = Vec::new();
        let mut active = false;
        for t in log.iter() {
            match *t {
                Transaction::Write { addr: a, .. } | Transaction::Read { addr: a, .. } => {
                    active = a == addr;
                    if active {
                        out.push(t.clone());
                    }
                }
                Transaction::Delay { .. } => {
                    if active {
                        out.push(t.clone());
                    }
                }
            }
        }
        out
    }

    pub fn writes_to(&self, addr: u8) -> Vec<(u8, u8)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|t| match *t {
                Transaction::Write { addr: a, reg, value } if a == addr => Some((reg, value)),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> Vec<(u8, u8, u8)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|t| match *t {
                Transaction::Read { addr, reg, len } => Some((addr, reg, len)),
                _ => None,
            })
            .collect()
    }
}

impl RegisterBus for MockBus {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        let seen = self.writes_to(address).len();
        if let Some((addr, nth, ref error)) = self.fail_write {
            if addr == address && seen + 1 == nth {
                return Err(error.clone());
            }
        }
        self.log.borrow_mut().push(Transaction::Write {
            addr: address,
            reg: register,
            value,
        });
        Ok(())
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        length: u8,
    ) -> Result<Vec<u8>, BusError> {
        if let Some((addr, ref error)) = self.fail_read {
            if addr == address {
                return Err(error.clone());
            }
        }
        self.log.borrow_mut().push(Transaction::Read {
            addr: address,
            reg: register,
            len: length,
        });
        Ok(match self.responses.get(&(address, register)) {
            Some(data) => data.iter().copied().take(length as usize).collect(),
            None => vec![0; length as usize],
        })
    }
}

/// Delay that only records how long it was asked to wait
#[derive(Debug, Default)]
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn calls_ms(&self) -> Vec<u32> {
        self.log
            .borrow()
            .iter()
            .filter_map(|t| match *t {
                Transaction::Delay { ms } => Some(ms),
                _ => None,
            })
            .collect()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log
            .borrow_mut()
            .push(Transaction::Delay { ms: ns / 1_000_000 });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Transaction::Delay { ms });
    }
}
