//! Cartesian enumeration over discovered bindings.
//!
//! A mixed-radix odometer with one digit per binding, base = that binding's
//! candidate count. The last digit turns fastest, giving the standard
//! cross-product order. No bindings yields exactly one empty tuple; any
//! empty binding yields nothing.

use crate::binding::{Binding, BindingRealization};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterState {
    Fresh,
    Running,
    Exhausted,
}

/// Odometer over mixed radices.
#[derive(Debug, Clone)]
pub struct MixedRadix {
    radices: Vec<usize>,
    digits: Vec<usize>,
    state: CounterState,
    total: u128,
    emitted: u128,
}

impl MixedRadix {
    pub fn new(radices: Vec<usize>) -> Self {
        let total = radices
            .iter()
            .fold(1u128, |acc, &radix| acc.saturating_mul(radix as u128));
        let state = if total == 0 {
            CounterState::Exhausted
        } else {
            CounterState::Fresh
        };
        Self {
            digits: vec![0; radices.len()],
            radices,
            state,
            total,
            emitted: 0,
        }
    }

    /// Number of combinations overall. Saturates at `u128::MAX`.
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Combinations not yet produced.
    pub fn remaining(&self) -> u128 {
        match self.state {
            CounterState::Exhausted => 0,
            _ => self.total.saturating_sub(self.emitted),
        }
    }

    /// Move to the next combination and return its digits.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.state {
            CounterState::Exhausted => return None,
            CounterState::Fresh => self.state = CounterState::Running,
            CounterState::Running => {
                let mut carried_out = true;
                for (digit, radix) in self.digits.iter_mut().zip(&self.radices).rev() {
                    *digit += 1;
                    if *digit < *radix {
                        carried_out = false;
                        break;
                    }
                    *digit = 0;
                }
                if carried_out {
                    self.state = CounterState::Exhausted;
                    return None;
                }
            }
        }
        self.emitted = self.emitted.saturating_add(1);
        Some(&self.digits)
    }
}

/// Pair each binding with the candidate its digit selects.
pub(crate) fn select<'a>(bindings: &'a [Binding], digits: &[usize]) -> Vec<BindingRealization<'a>> {
    bindings
        .iter()
        .zip(digits)
        .map(|(binding, &digit)| BindingRealization {
            path: &binding.path,
            value: &binding.values[digit],
        })
        .collect()
}

/// Exact `size_hint` for the counter, or unbounded when the remainder does
/// not fit in `usize`.
pub(crate) fn remaining_hint(counter: &MixedRadix) -> (usize, Option<usize>) {
    match usize::try_from(counter.remaining()) {
        Ok(n) => (n, Some(n)),
        Err(_) => (usize::MAX, None),
    }
}
