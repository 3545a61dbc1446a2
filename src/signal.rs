// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use num::{BigUint, One, Zero};

use crate::vcd::Timestamp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SignalIdx(pub usize);

/// Ties one dump identifier to a bit of a tracked signal. Scalar signals
/// have a single binding without a bit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub signal: SignalIdx,
    pub bit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalDescriptor {
    pub name: String,
    // number of bindings
    pub width: u32,
    // true once any binding carries a bit position
    pub positional: bool,
    value: BigUint,
    dirty: bool,
}

impl SignalDescriptor {
    pub fn new(name: String) -> Self {
        SignalDescriptor {
            name,
            width: 0,
            positional: false,
            value: BigUint::zero(),
            dirty: false,
        }
    }

    pub(crate) fn add_binding(&mut self, bit: Option<u32>) {
        self.width += 1;
        self.positional |= bit.is_some();
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drives one binding to `level`. Without a bit position the whole
    /// value is replaced, otherwise only bit `bit` changes.
    pub fn drive(&mut self, bit: Option<u32>, level: bool) {
        match bit {
            None => {
                self.value = if level {
                    BigUint::one()
                } else {
                    BigUint::zero()
                };
            }
            Some(bit) => self.value.set_bit(u64::from(bit), level),
        }
        self.dirty = true;
    }

    /// Clears the dirty flag, handing back the value if it was set.
    pub fn take_dirty(&mut self) -> Option<BigUint> {
        if std::mem::take(&mut self.dirty) {
            Some(self.value.clone())
        } else {
            None
        }
    }

    pub fn format(&self) -> ValueFormat {
        if self.positional {
            let digits = (self.width as usize).div_ceil(4).max(8);
            ValueFormat::Hex { digits }
        } else {
            ValueFormat::Decimal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `0`/`1` for scalars
    Decimal,
    /// zero padded lowercase hex
    Hex { digits: usize },
}

impl ValueFormat {
    pub fn render(&self, value: &BigUint) -> String {
        match self {
            ValueFormat::Decimal => value.to_string(),
            ValueFormat::Hex { digits } => format!("{value:0digits$x}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: Timestamp,
    pub value: BigUint,
}

/// Committed values of one signal, in time order, at most one per timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a commit. A second commit at the timestamp of the last
    /// entry replaces that entry's value.
    pub fn push(&mut self, time: Timestamp, value: BigUint) {
        match self.events.last_mut() {
            Some(last) if last.time == time => last.value = value,
            _ => self.events.push(Event { time, value }),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<(Timestamp, u64)> for EventList {
    fn from_iter<I: IntoIterator<Item = (Timestamp, u64)>>(iter: I) -> Self {
        let mut list = EventList::new();
        for (time, value) in iter {
            list.push(time, BigUint::from(value));
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_drive_replaces_value() {
        let mut clk = SignalDescriptor::new("clk".to_string());
        clk.add_binding(None);
        assert!(!clk.is_dirty());

        clk.drive(None, true);
        assert_eq!(clk.value(), &BigUint::one());
        assert_eq!(clk.take_dirty(), Some(BigUint::one()));
        assert_eq!(clk.take_dirty(), None);

        clk.drive(None, false);
        assert!(clk.value().is_zero());
        assert_eq!(clk.format(), ValueFormat::Decimal);
    }

    #[test]
    fn positional_drive_touches_one_bit() {
        let mut data = SignalDescriptor::new("data_0".to_string());
        for bit in 0..4 {
            data.add_binding(Some(bit));
        }
        assert_eq!(data.width, 4);

        data.drive(Some(0), true);
        data.drive(Some(2), true);
        assert_eq!(data.value(), &BigUint::from(5u32));
        data.drive(Some(0), true);
        assert_eq!(data.value(), &BigUint::from(5u32));
        data.drive(Some(2), false);
        assert_eq!(data.value(), &BigUint::from(1u32));
        // clearing an already clear bit is a no-op
        data.drive(Some(3), false);
        assert_eq!(data.value(), &BigUint::from(1u32));
    }

    #[test]
    fn wide_signals() {
        let mut wide = SignalDescriptor::new("wide".to_string());
        for bit in 0..72 {
            wide.add_binding(Some(bit));
        }
        wide.drive(Some(71), true);
        wide.drive(Some(0), true);

        let format = wide.format();
        assert_eq!(format, ValueFormat::Hex { digits: 18 });
        assert_eq!(format.render(wide.value()), "800000000000000001");
    }

    #[test]
    fn rendering() {
        let hex = ValueFormat::Hex { digits: 8 };
        assert_eq!(hex.render(&BigUint::from(5u32)), "00000005");
        assert_eq!(hex.render(&BigUint::from(0xdead_beefu32)), "deadbeef");
        assert_eq!(ValueFormat::Decimal.render(&BigUint::one()), "1");
    }

    #[test]
    fn event_list_keeps_one_entry_per_timestamp() {
        let mut list = EventList::new();
        list.push(0, BigUint::zero());
        list.push(100, BigUint::from(1u32));
        list.push(100, BigUint::from(3u32));
        list.push(200, BigUint::from(3u32));

        let times = list.events().iter().map(|e| e.time).collect::<Vec<_>>();
        assert_eq!(times, vec![0, 100, 200]);
        assert_eq!(list.events()[1].value, BigUint::from(3u32));
    }
}
