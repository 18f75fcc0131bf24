// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI / DCS parameter accumulation.
//!
//! Parameters are `u16` with **saturating** accumulation: `ESC[99999H` must
//! behave as `ESC[65535H`, never overflow-panic. At most 16 parameters are
//! kept; further separators are counted but their values dropped, matching
//! what hardware terminals and every major emulator do with runaway input.
//!
//! SGR subparameters use `:` instead of `;` (e.g. `ESC[38:2:255:0:0m`), so
//! the buffer tracks which separator kind has been seen. The dispatch rule
//! built on top of this lives in the parser: colon-separated parameters are
//! only meaningful for `m`, and a sequence that mixes both separators is
//! malformed and suppressed.

use smallvec::SmallVec;

/// Maximum number of parameters retained per sequence.
pub const MAX_PARAMS: usize = 16;

/// Which separator byte(s) appeared between parameters of the current
/// sequence.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, strum_macros::Display)]
pub enum SeparatorMode {
    /// Zero or one parameter, no separator seen.
    #[default]
    None,
    /// Only `;` seen.
    Semicolon,
    /// Only `:` seen.
    Colon,
    /// Both seen. The sequence is malformed and must not dispatch.
    Mixed,
}

impl SeparatorMode {
    /// Fold the next separator byte into the mode.
    #[must_use]
    pub fn record(self, separator: u8) -> Self {
        let this = if separator == b':' {
            Self::Colon
        } else {
            Self::Semicolon
        };
        match self {
            Self::None => this,
            Self::Mixed => Self::Mixed,
            seen if seen == this => seen,
            _ => Self::Mixed,
        }
    }
}

/// Parameter buffer for the sequence currently being collected.
#[derive(Clone, Debug, Default)]
pub struct ParamBuffer {
    params: SmallVec<[u16; MAX_PARAMS]>,
    /// Value being accumulated for the parameter after the last separator.
    accumulator: u16,
    /// `true` once any `param` table action ran for this sequence, so a
    /// trailing (possibly empty) parameter is committed on dispatch while
    /// `ESC[H` still dispatches with zero parameters.
    started: bool,
    separator: SeparatorMode,
}

impl ParamBuffer {
    pub fn clear(&mut self) {
        self.params.clear();
        self.accumulator = 0;
        self.started = false;
        self.separator = SeparatorMode::None;
    }

    /// Feed one byte matched by the `param` table action (`0-9`, `;`, `:`).
    pub fn feed(&mut self, byte: u8) {
        self.started = true;
        match byte {
            b'0'..=b'9' => {
                let digit = u16::from(byte - b'0');
                self.accumulator =
                    self.accumulator.saturating_mul(10).saturating_add(digit);
            }
            b';' | b':' => {
                self.commit_pending();
                self.separator = self.separator.record(byte);
            }
            _ => debug_assert!(false, "param action on non-param byte {byte:#04x}"),
        }
    }

    fn commit_pending(&mut self) {
        // Parameters past MAX_PARAMS are dropped, not an error.
        if self.params.len() < MAX_PARAMS {
            self.params.push(self.accumulator);
        }
        self.accumulator = 0;
    }

    /// Commit any trailing accumulator and return the finished parameter
    /// list plus the separator mode. Leaves the buffer cleared.
    pub fn finish(&mut self) -> (SmallVec<[u16; MAX_PARAMS]>, SeparatorMode) {
        if self.started {
            self.commit_pending();
        }
        let params = std::mem::take(&mut self.params);
        let separator = self.separator;
        self.clear();
        (params, separator)
    }

    #[must_use]
    pub fn separator(&self) -> SeparatorMode { self.separator }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn feed_str(buf: &mut ParamBuffer, input: &str) {
        for byte in input.bytes() {
            buf.feed(byte);
        }
    }

    #[test]
    fn test_no_params() {
        let mut buf = ParamBuffer::default();
        let (params, separator) = buf.finish();
        assert!(params.is_empty());
        assert_eq!(separator, SeparatorMode::None);
    }

    #[test]
    fn test_simple_params() {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, "1;4");
        let (params, separator) = buf.finish();
        assert_eq!(params.as_slice(), &[1, 4]);
        assert_eq!(separator, SeparatorMode::Semicolon);
    }

    #[test]
    fn test_empty_params_default_to_zero() {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, ";");
        let (params, _) = buf.finish();
        assert_eq!(params.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_saturating_accumulation() {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, "99999;");
        let (params, _) = buf.finish();
        assert_eq!(params.as_slice(), &[u16::MAX, 0]);
    }

    #[test]
    fn test_overflow_past_sixteen_params_is_ignored() {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, "1;2;3;4;5;6;7;8;9;10;11;12;13;14;15;16;17;18");
        let (params, _) = buf.finish();
        assert_eq!(params.len(), MAX_PARAMS);
        assert_eq!(params[0], 1);
        assert_eq!(params[MAX_PARAMS - 1], 16);
    }

    #[test_case("1;2", SeparatorMode::Semicolon; "semicolons only")]
    #[test_case("38:2", SeparatorMode::Colon; "colons only")]
    #[test_case("38:2;1", SeparatorMode::Mixed; "colon then semicolon")]
    #[test_case("1;38:2", SeparatorMode::Mixed; "semicolon then colon")]
    #[test_case("7", SeparatorMode::None; "single param")]
    fn test_separator_tracking(input: &str, expected: SeparatorMode) {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, input);
        assert_eq!(buf.separator(), expected);
    }

    #[test]
    fn test_finish_resets() {
        let mut buf = ParamBuffer::default();
        feed_str(&mut buf, "38:2");
        let _ = buf.finish();
        feed_str(&mut buf, "5");
        let (params, separator) = buf.finish();
        assert_eq!(params.as_slice(), &[5]);
        assert_eq!(separator, SeparatorMode::None);
    }
}
