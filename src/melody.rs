//! Built-in melody selection.

/// The stock tunes shipped with the car.
///
/// Selecting one hands it to the [`MelodyPlayer`]; playback detail
/// (tempo, voicing, how much of the tune is rendered) belongs to the
/// player implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Melody {
    Dadadadum,
    Entertainer,
    Prelude,
    Ode,
    Nyan,
    Ringtone,
    Funk,
    Blues,
    Birthday,
    Wedding,
    Funeral,
    Punchline,
    Baddy,
    Chase,
    BaDing,
    Wawawawaa,
    JumpUp,
    JumpDown,
    PowerUp,
    PowerDown,
}

/// Accepts melody requests.
///
/// `play` is fire and forget: it queues the tune and returns without
/// waiting for playback to finish. Requesting a new melody while one is
/// playing replaces it.
pub trait MelodyPlayer {
    fn play(&mut self, melody: Melody);
}
