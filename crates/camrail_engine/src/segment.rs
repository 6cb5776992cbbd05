// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed segments and the chain that plays them in order.
//!
//! Each segment owns one transition's clock. A segment moves through
//! `Idle -> Running -> (Paused <-> Running) -> Done`; `Done` is final and a
//! finished chain is never rewound, a restart builds a new one.

use crate::easing::Easing;
use crate::keyframe::Transition;

/// Lifecycle state of a segment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SegmentState {
    /// Not yet started
    #[default]
    Idle,
    /// Clock advancing
    Running {
        /// Seconds elapsed on the local clock
        elapsed: f32,
    },
    /// Clock stopped, elapsed time retained
    Paused {
        /// Seconds elapsed on the local clock
        elapsed: f32,
    },
    /// Finished
    Done,
}

impl SegmentState {
    /// Running or paused
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Running { .. } | Self::Paused { .. })
    }

    /// Seconds on the local clock, if live
    pub fn elapsed(&self) -> Option<f32> {
        match self {
            Self::Running { elapsed } | Self::Paused { elapsed } => Some(*elapsed),
            Self::Idle | Self::Done => None,
        }
    }
}

/// One timed span of a motion between two adjacent keyframes
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Position in the chain
    pub index: usize,
    /// Duration in seconds
    pub duration: f32,
    /// Easing applied to local progress
    pub easing: Easing,
    /// Global-t where this segment starts
    pub start_t: f32,
    /// Global-t where this segment ends
    pub end_t: f32,
    /// Lifecycle state
    pub state: SegmentState,
    /// Segment started when this one finishes
    pub next: Option<usize>,
}

impl Segment {
    /// Local progress in `[0, 1]` before easing
    pub fn progress(&self) -> f32 {
        match self.state {
            SegmentState::Idle => 0.0,
            SegmentState::Done => 1.0,
            SegmentState::Running { elapsed } | SegmentState::Paused { elapsed } => {
                self.progress_at(elapsed).clamp(0.0, 1.0)
            }
        }
    }

    /// Unclamped progress after `elapsed` seconds; a segment without a
    /// positive duration is complete as soon as it runs
    fn progress_at(&self, elapsed: f32) -> f32 {
        if self.duration > 0.0 {
            elapsed / self.duration
        } else {
            1.0
        }
    }

    fn start(&mut self) -> bool {
        if self.state != SegmentState::Idle {
            return false;
        }
        self.state = SegmentState::Running { elapsed: 0.0 };
        true
    }

    fn pause(&mut self) -> bool {
        let SegmentState::Running { elapsed } = self.state else {
            return false;
        };
        self.state = SegmentState::Paused { elapsed };
        true
    }

    fn resume(&mut self) -> bool {
        let SegmentState::Paused { elapsed } = self.state else {
            return false;
        };
        self.state = SegmentState::Running { elapsed };
        true
    }
}

/// Outcome of a pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChange {
    /// Segment that was paused
    Paused(usize),
    /// Segment that was resumed
    Resumed(usize),
}

/// Result of advancing the chain by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTick {
    /// Segment that produced this tick
    pub segment: usize,
    /// Eased local curve parameter in `[0, 1]`
    pub local_t: f32,
    /// Curve parameter across the whole motion
    pub global_t: f32,
    /// Whether the segment finished on this tick
    pub completed: bool,
}

/// Ordered, linked segments for one motion
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChain {
    segments: Vec<Segment>,
    head: Option<usize>,
}

impl SegmentChain {
    /// Build one idle segment per transition, linked in order
    ///
    /// Transitions are expected to be valid. A zero, negative or NaN
    /// duration yields a segment that completes on its first advance.
    pub fn from_transitions(transitions: &[Transition]) -> Self {
        let count = transitions.len();
        let segments = transitions
            .iter()
            .enumerate()
            .map(|(index, transition)| Segment {
                index,
                duration: transition.duration,
                easing: transition.easing(),
                start_t: index as f32 / count as f32,
                end_t: (index + 1) as f32 / count as f32,
                state: SegmentState::Idle,
                next: (index + 1 < count).then_some(index + 1),
            })
            .collect();

        Self {
            segments,
            head: (count > 0).then_some(0),
        }
    }

    /// Start the head segment; only an untouched chain can start
    pub fn start(&mut self) -> bool {
        let Some(head) = self.head else {
            return false;
        };
        self.segments[head].start()
    }

    /// Get a segment
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Get all segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get segment count
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chain has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate segments in chain order, starting from the head
    pub fn iter_chain(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Index of the running or paused segment
    pub fn live_segment(&self) -> Option<usize> {
        self.iter_chain()
            .find(|segment| segment.state.is_live())
            .map(|segment| segment.index)
    }

    /// Whether any segment is running
    pub fn is_running(&self) -> bool {
        self.iter_chain()
            .any(|segment| matches!(segment.state, SegmentState::Running { .. }))
    }

    /// Whether every segment is done
    pub fn is_finished(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| segment.state == SegmentState::Done)
    }

    /// Pause the running segment or resume the paused one
    ///
    /// Walks from the head and acts on the first live segment found.
    pub fn toggle_pause(&mut self) -> Option<PauseChange> {
        let index = self.live_segment()?;
        let segment = &mut self.segments[index];
        if segment.pause() {
            Some(PauseChange::Paused(index))
        } else if segment.resume() {
            Some(PauseChange::Resumed(index))
        } else {
            None
        }
    }

    /// Pause or resume the live segment; returns whether anything changed
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let Some(index) = self.live_segment() else {
            return false;
        };
        let segment = &mut self.segments[index];
        if paused {
            segment.pause()
        } else {
            segment.resume()
        }
    }

    /// Advance the running segment's clock by `delta` seconds
    ///
    /// When the segment completes it reports `local_t = 1`, is marked done,
    /// and the next segment starts at local time zero. Overshoot past the
    /// end is discarded, so at most one segment boundary is crossed per call.
    pub fn advance(&mut self, delta: f32) -> Option<SegmentTick> {
        let count = self.segments.len();
        let index = self.live_segment()?;
        let segment = &mut self.segments[index];
        let SegmentState::Running { elapsed } = segment.state else {
            return None;
        };

        let elapsed = elapsed + delta.max(0.0);
        let progress = segment.progress_at(elapsed);
        let completed = progress >= 1.0;

        let local_t = if completed {
            1.0
        } else {
            lerp(0.0, 1.0, segment.easing.apply(progress))
        };
        let global_t = (index as f32 + local_t) / count as f32;

        if completed {
            segment.state = SegmentState::Done;
            let next = segment.next;
            tracing::debug!("Segment {} done", index);
            if let Some(next) = next {
                self.segments[next].start();
                tracing::debug!("Segment {} started", next);
            }
        } else {
            segment.state = SegmentState::Running { elapsed };
        }

        Some(SegmentTick {
            segment: index,
            local_t,
            global_t,
            completed,
        })
    }
}

/// Iterator following `next` links from the head
pub struct ChainIter<'a> {
    chain: &'a SegmentChain,
    cursor: Option<usize>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.chain.segments.get(self.cursor?)?;
        self.cursor = segment.next;
        Some(segment)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
