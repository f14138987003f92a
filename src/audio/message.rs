#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

#[cfg(feature = "rtrb")]
use super::sink::{AudioSink, SinkError};

/// Control messages sent from the UI thread to the tone synth
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToneMessage {
    Play { note: u8, duration_ms: u32 },
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ToneMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        Consumer::pop(self).ok()
    }
}

/// The producer half of a message ring is a sink: the audio thread picks the
/// note up on its next block.
#[cfg(feature = "rtrb")]
impl AudioSink for Producer<ToneMessage> {
    fn play(&mut self, midi_note: u8, duration_hint_ms: u32) -> Result<(), SinkError> {
        let msg = ToneMessage::Play {
            note: midi_note,
            duration_ms: duration_hint_ms,
        };
        self.push(msg).map_err(|_| SinkError::QueueFull)
    }

    fn silence(&mut self) -> Result<(), SinkError> {
        self.push(ToneMessage::AllNotesOff)
            .map_err(|_| SinkError::QueueFull)
    }
}

/// Queue-backed receiver, handy for offline rendering
impl MessageReceiver for std::collections::VecDeque<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        self.pop_front()
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn producer_sink_reports_full_queue() {
        let (mut tx, mut rx) = RingBuffer::<ToneMessage>::new(1);
        assert!(tx.play(60, 150).is_ok());
        assert_eq!(tx.play(62, 150), Err(SinkError::QueueFull));

        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(ToneMessage::Play {
                note: 60,
                duration_ms: 150
            })
        );
        assert_eq!(MessageReceiver::pop(&mut rx), None);
    }

    #[test]
    fn producer_silence_sends_all_notes_off() {
        let (mut tx, mut rx) = RingBuffer::<ToneMessage>::new(2);
        tx.play(60, 150).unwrap();
        tx.silence().unwrap();
        assert!(matches!(
            MessageReceiver::pop(&mut rx),
            Some(ToneMessage::Play { note: 60, .. })
        ));
        assert_eq!(MessageReceiver::pop(&mut rx), Some(ToneMessage::AllNotesOff));
    }
}
