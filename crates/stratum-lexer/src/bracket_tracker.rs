//! Real-time delimiter pairing and depth accounting.

use std::collections::HashMap;

/// Kind of an opening/closing delimiter, per the owning language's
/// delimiter table (brace, bracket, paren, ... — languages are free to
/// add variants the generic tracker doesn't need to distinguish beyond
/// equality).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelimiterKind(pub u8);

/// Info about one bracket occurrence, keyed by byte position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketInfo {
    pub position: u32,
    pub kind: DelimiterKind,
    pub depth: u16,
    pub is_open: bool,
    pub pair_position: Option<u32>,
}

/// Append-only map from opening positions to closing positions (and back),
/// maintained in lock-step with the lexer as it consumes delimiters.
#[derive(Debug, Default)]
pub struct BracketTracker {
    // position -> info, in insertion (= source) order for find_brackets_in.
    positions: Vec<u32>,
    info: HashMap<u32, BracketInfo>,
    stack: Vec<u32>,
    depth: u16,
    max_depth: u16,
    unmatched_closes: u32,
}

impl BracketTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an opening delimiter at `pos`. Depth is reported *after* the
    /// push, matching the generic token's `bracket_depth` invariant for
    /// openers.
    pub fn enter(&mut self, pos: u32, kind: DelimiterKind) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.stack.push(pos);
        self.positions.push(pos);
        self.info.insert(
            pos,
            BracketInfo { position: pos, kind, depth: self.depth, is_open: true, pair_position: None },
        );
    }

    /// Record a closing delimiter at `pos`, pairing it with the most
    /// recent unmatched opener. Returns the opener's position if paired.
    /// An unmatched close does not destabilise state: depth saturates at
    /// zero and a counter tracks the mismatch.
    pub fn exit(&mut self, pos: u32, kind: DelimiterKind) -> Option<u32> {
        self.positions.push(pos);
        match self.stack.pop() {
            Some(open_pos) => {
                if let Some(open_info) = self.info.get_mut(&open_pos) {
                    open_info.pair_position = Some(pos);
                }
                let depth = self.depth;
                self.depth = self.depth.saturating_sub(1);
                self.info.insert(
                    pos,
                    BracketInfo { position: pos, kind, depth, is_open: false, pair_position: Some(open_pos) },
                );
                Some(open_pos)
            }
            None => {
                self.unmatched_closes += 1;
                self.info.insert(
                    pos,
                    BracketInfo { position: pos, kind, depth: 0, is_open: false, pair_position: None },
                );
                None
            }
        }
    }

    pub fn find_pair(&self, pos: u32) -> Option<u32> {
        self.info.get(&pos).and_then(|i| i.pair_position)
    }

    pub fn current_depth(&self) -> u16 {
        self.depth
    }

    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }

    /// True iff every opener has a matching closer and no closer was left
    /// unmatched — a valid Dyck sequence.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.stack.is_empty() && self.unmatched_closes == 0
    }

    pub fn unmatched_close_count(&self) -> u32 {
        self.unmatched_closes
    }

    /// Drop all recorded bracket info within `[start, end)`, for
    /// incremental invalidation ahead of a reparse of that range. Does not
    /// attempt to repair surrounding depth bookkeeping — callers re-run
    /// the tracker forward from the edit point.
    pub fn clear_range(&mut self, start: u32, end: u32) {
        self.positions.retain(|&p| {
            let keep = p < start || p >= end;
            if !keep {
                self.info.remove(&p);
            }
            keep
        });
        self.stack.retain(|&p| p < start || p >= end);
    }

    /// All recorded brackets within `[start, end)`, in source order.
    pub fn find_brackets_in(&self, start: u32, end: u32) -> Vec<BracketInfo> {
        self.positions
            .iter()
            .filter(|&&p| p >= start && p < end)
            .filter_map(|p| self.info.get(p).copied())
            .collect()
    }
}
