use super::event::DerivedEvent;
use super::tracker::Classification;

pub struct Scheduler {
    pub locate_recordings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Hand the event to the sink.
    Deliver(DerivedEvent),
    /// Look for the recording the dialer may have written for the call that just ended.
    LocateRecording,
}

impl Scheduler {
    /// Pure Projection: Classification -> SideEffects, in execution order.
    pub fn schedule(&self, classification: Classification) -> Vec<SideEffect> {
        match classification.into_event() {
            Some(event) => {
                let mut effects = vec![SideEffect::Deliver(event)];
                if self.locate_recordings {
                    effects.push(SideEffect::LocateRecording);
                }
                effects
            }
            None => Vec::new(),
        }
    }
}
