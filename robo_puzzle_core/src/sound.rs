//! Named audio cues and the sink they are sent to.
//!
//! The core never produces audio. It only says which cue happened; a front-end
//! supplies a [`SoundSink`] and owns the mute state through [`MuteGate`].

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// Block added to the program
    Add,
    /// Block removed, or an action rejected
    Remove,
    /// Undo or redo
    Undo,
    /// Program cleared
    Clear,
    /// Run started
    Run,
    /// Agent walked one cell
    Move,
    Turn,
    /// Agent jumped two cells
    Jump,
    /// Goal reached
    Win,
    /// Hit an obstacle or left the grid
    Crash,
    /// Generic UI click
    Click,
    Step,
}

impl SoundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::Add => "add",
            SoundEvent::Remove => "remove",
            SoundEvent::Undo => "undo",
            SoundEvent::Clear => "clear",
            SoundEvent::Run => "run",
            SoundEvent::Move => "move",
            SoundEvent::Turn => "turn",
            SoundEvent::Jump => "jump",
            SoundEvent::Win => "win",
            SoundEvent::Crash => "crash",
            SoundEvent::Click => "click",
            SoundEvent::Step => "step",
        }
    }
}

/// Receives audio cues.
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

impl<S: SoundSink + ?Sized> SoundSink for &mut S {
    fn play(&mut self, event: SoundEvent) {
        (**self).play(event);
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Keeps every cue in order. Useful for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SoundEvent>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, event: SoundEvent) {
        self.events.push(event);
    }
}

/// Wraps a sink with a caller-owned mute switch.
#[derive(Debug, Clone)]
pub struct MuteGate<S> {
    inner: S,
    muted: bool,
}

impl<S: SoundSink> MuteGate<S> {
    pub fn new(inner: S, muted: bool) -> Self {
        Self { inner, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flips the mute state and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SoundSink> SoundSink for MuteGate<S> {
    fn play(&mut self, event: SoundEvent) {
        if !self.muted {
            self.inner.play(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_gate_swallows_events() {
        let mut gate = MuteGate::new(RecordingSink::default(), false);
        gate.play(SoundEvent::Add);
        assert!(gate.toggle());
        gate.play(SoundEvent::Crash);
        gate.set_muted(false);
        gate.play(SoundEvent::Win);
        assert_eq!(gate.into_inner().events, vec![SoundEvent::Add, SoundEvent::Win]);
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(SoundEvent::Jump.name(), "jump");
        assert_eq!(SoundEvent::Win.name(), "win");
        assert_eq!(SoundEvent::Crash.name(), "crash");
    }
}
